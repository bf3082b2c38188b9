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

//! Operations on signups.

use crate::db;
use crate::driver::{ACTIVITY_NOT_FOUND, CAMPER_NOT_FOUND, Driver};
use crate::model::serialize::Graph;
use crate::model::*;
use campsite_core::driver::{DriverResult, not_found_as};

impl Driver {
    /// Signs up the camper identified by `camper_id` for the activity identified by `activity_id`
    /// at the given validated `time`.
    ///
    /// Returns the new signup along with a snapshot holding the camper and the activity it refers
    /// to.
    pub(crate) async fn create_signup(
        self,
        camper_id: CamperId,
        activity_id: ActivityId,
        time: SignupTime,
    ) -> DriverResult<(Signup, Graph)> {
        let mut tx = self.db.begin().await?;
        let camper =
            db::get_camper(tx.ex(), camper_id).await.map_err(not_found_as(CAMPER_NOT_FOUND))?;
        let activity = db::get_activity(tx.ex(), activity_id)
            .await
            .map_err(not_found_as(ACTIVITY_NOT_FOUND))?;
        let signup = db::create_signup(tx.ex(), camper_id, activity_id, time).await?;
        tx.commit().await?;

        let mut graph = Graph::default();
        graph.add_camper(camper);
        graph.add_activity(activity);
        graph.add_signup(signup.clone());
        Ok((signup, graph))
    }
}
