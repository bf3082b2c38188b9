// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Summer camp service to keep track of campers, activities, and the signups of the former for
//! the latter.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use campsite_core::db::{Db, sqlite};
use campsite_core::env::get_optional_var;
use log::{error, info};
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

mod db;
mod driver;
use driver::Driver;
mod model;
mod rest;
use rest::app;

/// Configuration options for the service.
#[derive(Debug, PartialEq)]
pub struct ServiceOptions {
    /// Address to listen on.
    pub address: IpAddr,

    /// Port to listen on.
    pub port: u16,

    /// Connection string of the SQLite database, which is created if it does not exist yet.
    pub db_uri: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5555,
            db_uri: "sqlite://app.db".to_owned(),
        }
    }
}

impl ServiceOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_ADDRESS`, `<prefix>_PORT` and `<prefix>_DB_URI`,
    /// falling back to the defaults for those that are not set.
    pub fn from_env(prefix: &str) -> Result<ServiceOptions, String> {
        let defaults = ServiceOptions::default();
        Ok(ServiceOptions {
            address: get_optional_var::<IpAddr>(prefix, "ADDRESS")?.unwrap_or(defaults.address),
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(defaults.port),
            db_uri: get_optional_var::<String>(prefix, "DB_URI")?.unwrap_or(defaults.db_uri),
        })
    }
}

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot wait for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Instantiates all resources to serve the application as configured by `opts`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(opts: ServiceOptions) -> Result<(), Box<dyn Error>> {
    let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::connect(&opts.db_uri).await?);
    db::init_schema(&mut db.ex().await?).await?;
    let driver = Driver::new(db.clone());
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(SocketAddr::new(opts.address, opts.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    let result = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;

    db.close().await;
    result?;
    Ok(())
}
