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

//! Operations on activities.

use crate::db;
use crate::driver::{ACTIVITY_NOT_FOUND, Driver};
use crate::model::*;
use campsite_core::driver::{DriverResult, not_found_as};

impl Driver {
    /// Gets all activities.
    pub(crate) async fn get_activities(self) -> DriverResult<Vec<Activity>> {
        let activities = db::get_activities(&mut self.db.ex().await?).await?;
        Ok(activities)
    }

    /// Deletes the activity identified by `id` along with all of its signups.
    pub(crate) async fn delete_activity(self, id: ActivityId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_activity(tx.ex(), id).await.map_err(not_found_as(ACTIVITY_NOT_FOUND))?;
        tx.commit().await?;
        Ok(())
    }
}
