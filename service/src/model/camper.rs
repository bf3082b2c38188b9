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

//! The `Camper` data type and its validated fields.

use campsite_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Minimum age, inclusive, that a camper can have.
const MIN_CAMPER_AGE: u8 = 8;

/// Maximum age, inclusive, that a camper can have.
const MAX_CAMPER_AGE: u8 = 18;

/// Identifier of a camper, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct CamperId(i64);

impl CamperId {
    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// The name of a camper, which is never empty.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CamperName(String);

impl CamperName {
    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// The age of a camper, which is always within `[MIN_CAMPER_AGE, MAX_CAMPER_AGE]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CamperAge(u8);

impl CamperAge {
    /// Returns the age as a plain integer.
    pub(crate) fn as_u8(self) -> u8 {
        self.0
    }
}

/// Validates a camper name coming from untrusted input.
pub(crate) fn validate_camper_name(value: Option<String>) -> ModelResult<CamperName> {
    match value {
        Some(name) if !name.is_empty() => Ok(CamperName(name)),
        _ => Err(ModelError("Camper name must exist".to_owned())),
    }
}

/// Validates a camper age coming from untrusted input.
///
/// Any number is accepted as input so that values that do not fit a machine integer are reported
/// as out of range instead of as malformed.
pub(crate) fn validate_camper_age<N: Into<Number>>(value: Option<N>) -> ModelResult<CamperAge> {
    let Some(age) = value.map(Into::<Number>::into) else {
        return Err(ModelError("Camper age must exist".to_owned()));
    };
    match age.as_u64().and_then(|age| u8::try_from(age).ok()) {
        Some(age) if (MIN_CAMPER_AGE..=MAX_CAMPER_AGE).contains(&age) => Ok(CamperAge(age)),
        _ => Err(ModelError(format!(
            "Camper age {} is not within [{}, {}]",
            age, MIN_CAMPER_AGE, MAX_CAMPER_AGE
        ))),
    }
}

/// A person attending the camp.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Camper {
    /// Identifier of the camper.
    id: CamperId,

    /// Name of the camper.
    name: CamperName,

    /// Age of the camper.
    age: CamperAge,
}
