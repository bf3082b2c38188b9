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

//! API to list all activities.

use crate::driver::Driver;
use crate::model::serialize::{Entity, Graph, Rules, serialize};
use axum::Json;
use axum::extract::State;
use campsite_core::rest::{EmptyBody, RestError};
use serde_json::Value;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<Json<Value>, RestError> {
    let activities = driver.get_activities().await?;

    let graph = Graph::default();
    let rules = Rules::default().without("signups");
    let response = activities
        .iter()
        .map(|activity| Value::Object(serialize(Entity::Activity(activity), &graph, &rules)))
        .collect();
    Ok(Json(Value::Array(response)))
}
