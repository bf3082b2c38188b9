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

//! API to create a new camper.

use crate::driver::Driver;
use crate::model::serialize::{Entity, Graph, Rules, serialize};
use crate::model::{validate_camper_age, validate_camper_name};
use axum::extract::State;
use axum::{Json, http};
use campsite_core::rest::RestError;
use serde::Deserialize;
use serde_json::{Number, Value};

/// Message sent to the server to create or update a camper.
///
/// Missing fields are accepted here so that they are reported as validation errors.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct CamperRequest {
    /// Name of the camper.
    pub(crate) name: Option<String>,

    /// Age of the camper.
    pub(crate) age: Option<Number>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<CamperRequest>,
) -> Result<(http::StatusCode, Json<Value>), RestError> {
    let name = validate_camper_name(request.name)?;
    let age = validate_camper_age(request.age)?;

    let camper = driver.create_camper(name, age).await?;

    let rules = Rules::default().without("signups");
    let response = serialize(Entity::Camper(&camper), &Graph::default(), &rules);
    Ok((http::StatusCode::CREATED, Json(Value::Object(response))))
}
