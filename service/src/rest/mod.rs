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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;

mod activities_get;
mod activity_delete;
mod camper_get;
mod camper_patch;
mod campers_get;
mod campers_post;
mod home_get;
mod signups_post;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{delete, get, post};
    Router::new()
        .route("/", get(home_get::handler))
        .route("/activities", get(activities_get::handler))
        .route("/activities/:id", delete(activity_delete::handler))
        .route("/campers", get(campers_get::handler).post(campers_post::handler))
        .route("/campers/:id", get(camper_get::handler).patch(camper_patch::handler))
        .route("/signups", post(signups_post::handler))
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use axum::http;
    use campsite_core::rest::testutils::*;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_camp_lifecycle() {
        let context = TestContext::setup().await;
        let archery = context.create_activity("Archery", 2).await;

        let response = OneShotBuilder::new(context.app(), (http::Method::POST, "/campers"))
            .send_json(json!({"name": "Ana", "age": 10}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"id": 1, "name": "Ana", "age": 10}), response);

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/campers/1"))
            .send_empty()
            .await
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"id": 1, "name": "Ana", "age": 10, "signups": []}), response);

        let response = OneShotBuilder::new(context.app(), (http::Method::POST, "/campers"))
            .send_json(json!({"name": "", "age": 10}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"errors": ["validation errors"]}), response);

        OneShotBuilder::new(context.app(), (http::Method::POST, "/signups"))
            .send_json(json!({"camper_id": 1, "activity_id": archery.id(), "time": 25}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("validation errors")
            .await;

        let response = OneShotBuilder::new(context.app(), (http::Method::POST, "/signups"))
            .send_json(json!({"camper_id": 1, "activity_id": archery.id(), "time": 9}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Value>()
            .await;
        assert_eq!(json!({"id": 1, "name": "Ana", "age": 10}), response["camper"]);
        let exp_activity = json!({"id": archery.id(), "name": "Archery", "difficulty": 2});
        assert_eq!(exp_activity, response["activity"]);

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/campers/1"))
            .send_empty()
            .await
            .expect_json::<Value>()
            .await;
        assert_eq!(1, response["signups"].as_array().unwrap().len());
        assert_eq!(json!("Archery"), response["signups"][0]["activity"]["name"]);
        assert!(response["signups"][0].get("camper").is_none());
        assert!(response["signups"][0]["activity"].get("signups").is_none());

        let path = format!("/activities/{}", archery.id().as_i64());
        OneShotBuilder::new(context.app(), (http::Method::DELETE, path))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/campers/1"))
            .send_empty()
            .await
            .expect_json::<Value>()
            .await;
        assert_eq!(json!([]), response["signups"]);

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/activities"))
            .send_empty()
            .await
            .expect_json::<Value>()
            .await;
        assert_eq!(json!([]), response);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (http::Method::DELETE, "/campers/1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::METHOD_NOT_ALLOWED)
            .expect_empty()
            .await;
    }
}
