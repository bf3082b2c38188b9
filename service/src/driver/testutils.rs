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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use campsite_core::db::sqlite;
use campsite_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test for the business layer.
pub(crate) struct TestContext {
    db: Arc<dyn Db + Send + Sync>,
    driver: Driver,
}

impl TestContext {
    /// Initializes an in-memory database with the schema of the service and a driver on top.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a camper directly in the database, bypassing the driver.
    pub(crate) async fn create_camper(&self, name: &str, age: i64) -> Camper {
        db::create_camper(
            &mut self.ex().await,
            validate_camper_name(Some(name.to_owned())).unwrap(),
            validate_camper_age(Some(age)).unwrap(),
        )
        .await
        .unwrap()
    }

    /// Creates an activity directly in the database, bypassing the driver.
    pub(crate) async fn create_activity(&self, name: &str, difficulty: i64) -> Activity {
        db::create_activity(&mut self.ex().await, Some(name), Some(difficulty)).await.unwrap()
    }

    /// Creates a signup directly in the database, bypassing the driver.
    pub(crate) async fn create_signup(
        &self,
        camper: &Camper,
        activity: &Activity,
        time: i64,
    ) -> Signup {
        db::create_signup(
            &mut self.ex().await,
            *camper.id(),
            *activity.id(),
            validate_signup_time(Some(time)).unwrap(),
        )
        .await
        .unwrap()
    }
}
