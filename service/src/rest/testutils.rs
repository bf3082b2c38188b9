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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::*;
use crate::rest::app;
use axum::Router;

pub(crate) struct TestContext {
    context: DriverTestContext,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let context = DriverTestContext::setup().await;
        let app = app(context.driver());
        Self { context, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) async fn create_camper(&self, name: &str, age: i64) -> Camper {
        self.context.create_camper(name, age).await
    }

    pub(crate) async fn create_activity(&self, name: &str, difficulty: i64) -> Activity {
        self.context.create_activity(name, difficulty).await
    }

    pub(crate) async fn create_signup(
        &self,
        camper: &Camper,
        activity: &Activity,
        time: i64,
    ) -> Signup {
        self.context.create_signup(camper, activity, time).await
    }

    pub(crate) async fn get_activities(&self) -> Vec<Activity> {
        db::get_activities(&mut self.context.ex().await).await.unwrap()
    }

    pub(crate) async fn get_campers(&self) -> Vec<Camper> {
        db::get_campers(&mut self.context.ex().await).await.unwrap()
    }

    pub(crate) async fn get_signups_by_activity(&self, activity: &Activity) -> Vec<Signup> {
        db::get_signups_by_activity(&mut self.context.ex().await, *activity.id()).await.unwrap()
    }

    pub(crate) async fn get_signups_by_camper(&self, camper: &Camper) -> Vec<Signup> {
        db::get_signups_by_camper(&mut self.context.ex().await, *camper.id()).await.unwrap()
    }
}
