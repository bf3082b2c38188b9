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

//! API to overwrite the details of an existing camper.

use crate::driver::Driver;
use crate::model::serialize::{Entity, Graph, Rules, serialize};
use crate::model::{CamperId, validate_camper_age, validate_camper_name};
use crate::rest::campers_post::CamperRequest;
use axum::extract::{Path, State};
use axum::{Json, http};
use campsite_core::rest::RestError;
use serde_json::Value;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CamperId>,
    Json(request): Json<CamperRequest>,
) -> Result<(http::StatusCode, Json<Value>), RestError> {
    let name = validate_camper_name(request.name)?;
    let age = validate_camper_age(request.age)?;

    let camper = driver.update_camper(id, name, age).await?;

    let rules = Rules::default().without("signups");
    let response = serialize(Entity::Camper(&camper), &Graph::default(), &rules);
    Ok((http::StatusCode::ACCEPTED, Json(Value::Object(response))))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use campsite_core::rest::testutils::*;
    use serde_json::{Value, json};

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::PATCH, format!("/campers/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let ana = context.create_camper("Ana", 10).await;
        let bob = context.create_camper("Bob", 12).await;
        let archery = context.create_activity("Archery", 2).await;
        let signup = context.create_signup(&ana, &archery, 9).await;

        let response = OneShotBuilder::new(context.app(), route(ana.id().as_i64()))
            .send_json(json!({"name": "Anna", "age": 11}))
            .await
            .expect_status(http::StatusCode::ACCEPTED)
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"id": ana.id(), "name": "Anna", "age": 11}), response);

        let campers = context.get_campers().await;
        assert_eq!(2, campers.len());
        assert_eq!("Anna", campers[0].name().as_str());
        assert_eq!(11, campers[0].age().as_u8());
        assert_eq!(bob, campers[1]);
        assert_eq!(vec![signup], context.get_signups_by_camper(&ana).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route(1))
            .send_json(json!({"name": "Anna", "age": 11}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"error": "Camper not found"}), response);
    }

    #[tokio::test]
    async fn test_validation_error() {
        let context = TestContext::setup().await;

        let ana = context.create_camper("Ana", 10).await;

        for request in [json!({"name": "", "age": 11}), json!({"name": "Anna", "age": 40})] {
            let response = OneShotBuilder::new(context.app(), route(ana.id().as_i64()))
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_json::<Value>()
                .await;
            assert_eq!(json!({"errors": ["validation errors"]}), response);
        }

        assert_eq!(vec![ana], context.get_campers().await);
    }

    #[tokio::test]
    async fn test_age_beyond_integer_range() {
        let context = TestContext::setup().await;

        let ana = context.create_camper("Ana", 10).await;

        let request = r#"{"name": "Anna", "age": 100000000000000000000}"#;
        let response = OneShotBuilder::new(context.app(), route(ana.id().as_i64()))
            .send_json(serde_json::from_str::<Value>(request).unwrap())
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"errors": ["validation errors"]}), response);

        assert_eq!(vec![ana], context.get_campers().await);
    }

    #[tokio::test]
    async fn test_validation_precedes_lookup() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(1))
            .send_json(json!({"name": "Anna"}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("validation errors")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route(1));
}
