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

//! Operations on campers.

use crate::db;
use crate::driver::{CAMPER_NOT_FOUND, Driver};
use crate::model::serialize::Graph;
use crate::model::*;
use campsite_core::driver::{DriverResult, not_found_as};

impl Driver {
    /// Gets all campers.
    pub(crate) async fn get_campers(self) -> DriverResult<Vec<Camper>> {
        let campers = db::get_campers(&mut self.db.ex().await?).await?;
        Ok(campers)
    }

    /// Creates a new camper with the given validated `name` and `age`.
    pub(crate) async fn create_camper(
        self,
        name: CamperName,
        age: CamperAge,
    ) -> DriverResult<Camper> {
        let mut tx = self.db.begin().await?;
        let camper = db::create_camper(tx.ex(), name, age).await?;
        tx.commit().await?;
        Ok(camper)
    }

    /// Gets the camper identified by `id` along with a snapshot holding its signups and the
    /// activities these refer to.
    pub(crate) async fn get_camper(self, id: CamperId) -> DriverResult<(Camper, Graph)> {
        let mut tx = self.db.begin().await?;
        let camper = db::get_camper(tx.ex(), id).await.map_err(not_found_as(CAMPER_NOT_FOUND))?;
        let signups = db::get_signups_by_camper(tx.ex(), id).await?;
        let activities = db::get_activities_by_camper(tx.ex(), id).await?;
        tx.commit().await?;

        let mut graph = Graph::default();
        graph.add_camper(camper.clone());
        for signup in signups {
            graph.add_signup(signup);
        }
        for activity in activities {
            graph.add_activity(activity);
        }
        Ok((camper, graph))
    }

    /// Replaces the `name` and `age` of the camper identified by `id`.
    pub(crate) async fn update_camper(
        self,
        id: CamperId,
        name: CamperName,
        age: CamperAge,
    ) -> DriverResult<Camper> {
        let mut tx = self.db.begin().await?;
        let camper = db::update_camper(tx.ex(), id, name, age)
            .await
            .map_err(not_found_as(CAMPER_NOT_FOUND))?;
        tx.commit().await?;
        Ok(camper)
    }
}
