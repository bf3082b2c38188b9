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

//! The `Activity` data type.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Identifier of an activity, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct ActivityId(i64);

impl ActivityId {
    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// Something campers can sign up for.
///
/// Activities are not validated in any way: both the name and the difficulty may be missing.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Activity {
    /// Identifier of the activity.
    id: ActivityId,

    /// Human-readable name of the activity.
    name: Option<String>,

    /// Free-form difficulty rating of the activity.
    difficulty: Option<i64>,
}
