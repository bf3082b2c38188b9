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

//! API to get one camper along with its signups.

use crate::driver::Driver;
use crate::model::CamperId;
use crate::model::serialize::{Entity, Rules, serialize};
use axum::Json;
use axum::extract::{Path, State};
use campsite_core::rest::{EmptyBody, RestError};
use serde_json::Value;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CamperId>,
    _: EmptyBody,
) -> Result<Json<Value>, RestError> {
    let (camper, graph) = driver.get_camper(id).await?;

    let response = serialize(Entity::Camper(&camper), &graph, &Rules::default());
    Ok(Json(Value::Object(response)))
}
