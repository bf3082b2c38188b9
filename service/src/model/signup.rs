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

//! The `Signup` data type and its validated fields.

use crate::model::{ActivityId, CamperId};
use campsite_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Latest hour of the day, inclusive, at which a signup can be scheduled.  The earliest is 0.
const MAX_SIGNUP_TIME: u8 = 23;

/// Identifier of a signup, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct SignupId(i64);

impl SignupId {
    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// The hour of the day at which a signup takes place, always within `[0, MAX_SIGNUP_TIME]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SignupTime(u8);

impl SignupTime {
    /// Returns the hour as a plain integer.
    pub(crate) fn as_u8(self) -> u8 {
        self.0
    }
}

/// Validates a signup time coming from untrusted input.
///
/// Any number is accepted as input so that values that do not fit a machine integer are reported
/// as out of range instead of as malformed.
pub(crate) fn validate_signup_time<N: Into<Number>>(value: Option<N>) -> ModelResult<SignupTime> {
    let Some(time) = value.map(Into::<Number>::into) else {
        return Err(ModelError("Signup time must exist".to_owned()));
    };
    match time.as_u64().and_then(|time| u8::try_from(time).ok()) {
        Some(time) if time <= MAX_SIGNUP_TIME => Ok(SignupTime(time)),
        _ => {
            Err(ModelError(format!("Signup time {} is not within [0, {}]", time, MAX_SIGNUP_TIME)))
        }
    }
}

/// A camper's registration for an activity at a given hour.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Signup {
    /// Identifier of the signup.
    id: SignupId,

    /// Hour of the day at which the camper attends the activity.
    time: SignupTime,

    /// The camper that signed up.
    camper_id: CamperId,

    /// The activity the camper signed up for.
    activity_id: ActivityId,
}
