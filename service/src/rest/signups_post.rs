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

//! API to sign up a camper for an activity.

use crate::driver::Driver;
use crate::model::serialize::{Entity, Rules, serialize};
use crate::model::{ActivityId, CamperId, validate_signup_time};
use axum::extract::State;
use axum::{Json, http};
use campsite_core::rest::RestError;
use serde::Deserialize;
use serde_json::{Number, Value};

/// Message sent to the server to create a signup.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct SignupRequest {
    /// Identifier of the camper signing up.
    camper_id: CamperId,

    /// Identifier of the activity the camper signs up for.
    activity_id: ActivityId,

    /// Hour of the day of the signup.
    time: Option<Number>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<SignupRequest>,
) -> Result<(http::StatusCode, Json<Value>), RestError> {
    let time = validate_signup_time(request.time)?;

    let (signup, graph) = driver.create_signup(request.camper_id, request.activity_id, time).await?;

    let response = serialize(Entity::Signup(&signup), &graph, &Rules::default());
    Ok((http::StatusCode::CREATED, Json(Value::Object(response))))
}
