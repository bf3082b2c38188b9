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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use campsite_core::db::sqlite::{self, map_sqlx_error};
use campsite_core::db::{DbError, DbResult, Executor, ensure_one_row};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;


/// Initializes the database schema.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,
    }
}

impl TryFrom<SqliteRow> for Activity {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: Option<String> = row.try_get("name").map_err(map_sqlx_error)?;
        let difficulty: Option<i64> = row.try_get("difficulty").map_err(map_sqlx_error)?;

        Ok(Activity::new(ActivityId::new(id), name, difficulty))
    }
}

impl TryFrom<SqliteRow> for Camper {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let age: i64 = row.try_get("age").map_err(map_sqlx_error)?;

        let name = validate_camper_name(Some(name))?;
        let age = validate_camper_age(Some(age))?;

        Ok(Camper::new(CamperId::new(id), name, age))
    }
}

impl TryFrom<SqliteRow> for Signup {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let time: i64 = row.try_get("time").map_err(map_sqlx_error)?;
        let camper_id: i64 = row.try_get("camper_id").map_err(map_sqlx_error)?;
        let activity_id: i64 = row.try_get("activity_id").map_err(map_sqlx_error)?;

        let time = validate_signup_time(Some(time))?;

        Ok(Signup::new(
            SignupId::new(id),
            time,
            CamperId::new(camper_id),
            ActivityId::new(activity_id),
        ))
    }
}

/// Converts all `rows` into entities of type `T`.
fn rows_into<T: TryFrom<SqliteRow, Error = DbError>>(rows: Vec<SqliteRow>) -> DbResult<Vec<T>> {
    rows.into_iter().map(T::try_from).collect()
}

/// Creates a new activity with an optional `name` and `difficulty`.
///
/// There is no API to create activities, so these only come from tests or from direct
/// manipulation of the database.
#[cfg(test)]
pub(crate) async fn create_activity(
    ex: &mut Executor,
    name: Option<&str>,
    difficulty: Option<i64>,
) -> DbResult<Activity> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO activities (name, difficulty) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(difficulty)
                .execute(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            ensure_one_row(done.rows_affected())?;
            let id = ActivityId::new(done.last_insert_rowid());
            Ok(Activity::new(id, name.map(str::to_owned), difficulty))
        }
    }
}

/// Gets all existing activities, sorted by identifier.
pub(crate) async fn get_activities(ex: &mut Executor) -> DbResult<Vec<Activity>> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM activities ORDER BY id";
            let rows = sqlx::query(query_str).fetch_all(&mut **ex).await.map_err(map_sqlx_error)?;
            rows_into(rows)
        }
    }
}

/// Gets the activity identified by `id`.
pub(crate) async fn get_activity(ex: &mut Executor, id: ActivityId) -> DbResult<Activity> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM activities WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            Activity::try_from(row)
        }
    }
}

/// Gets the distinct activities that the camper identified by `camper_id` signed up for, sorted by
/// identifier.
pub(crate) async fn get_activities_by_camper(
    ex: &mut Executor,
    camper_id: CamperId,
) -> DbResult<Vec<Activity>> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT DISTINCT activities.*
                FROM activities JOIN signups ON signups.activity_id = activities.id
                WHERE signups.camper_id = ?
                ORDER BY activities.id
            ";
            let rows = sqlx::query(query_str)
                .bind(camper_id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            rows_into(rows)
        }
    }
}

/// Deletes the activity identified by `id` along with all of its signups.
pub(crate) async fn delete_activity(ex: &mut Executor, id: ActivityId) -> DbResult<()> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM activities WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            ensure_one_row(done.rows_affected())
        }
    }
}

/// Creates a new camper with a `name` and an `age`.
pub(crate) async fn create_camper(
    ex: &mut Executor,
    name: CamperName,
    age: CamperAge,
) -> DbResult<Camper> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO campers (name, age) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(name.as_str())
                .bind(age.as_u8())
                .execute(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            ensure_one_row(done.rows_affected())?;
            Ok(Camper::new(CamperId::new(done.last_insert_rowid()), name, age))
        }
    }
}

/// Gets the camper identified by `id`.
pub(crate) async fn get_camper(ex: &mut Executor, id: CamperId) -> DbResult<Camper> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM campers WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            Camper::try_from(row)
        }
    }
}

/// Gets all existing campers, sorted by identifier.
pub(crate) async fn get_campers(ex: &mut Executor) -> DbResult<Vec<Camper>> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM campers ORDER BY id";
            let rows = sqlx::query(query_str).fetch_all(&mut **ex).await.map_err(map_sqlx_error)?;
            rows_into(rows)
        }
    }
}

/// Replaces the `name` and `age` of the camper identified by `id`.
pub(crate) async fn update_camper(
    ex: &mut Executor,
    id: CamperId,
    name: CamperName,
    age: CamperAge,
) -> DbResult<Camper> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE campers SET name = ?, age = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(name.as_str())
                .bind(age.as_u8())
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            ensure_one_row(done.rows_affected())?;
            Ok(Camper::new(id, name, age))
        }
    }
}

/// Creates a new signup of the camper `camper_id` for the activity `activity_id` at `time`.
///
/// Fails with `NotFound` if either the camper or the activity do not exist.
pub(crate) async fn create_signup(
    ex: &mut Executor,
    camper_id: CamperId,
    activity_id: ActivityId,
    time: SignupTime,
) -> DbResult<Signup> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO signups (time, camper_id, activity_id) VALUES (?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(time.as_u8())
                .bind(camper_id.as_i64())
                .bind(activity_id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            ensure_one_row(done.rows_affected())?;
            let id = SignupId::new(done.last_insert_rowid());
            Ok(Signup::new(id, time, camper_id, activity_id))
        }
    }
}

/// Gets all signups of the activity identified by `activity_id`, sorted by identifier.
#[cfg(test)]
pub(crate) async fn get_signups_by_activity(
    ex: &mut Executor,
    activity_id: ActivityId,
) -> DbResult<Vec<Signup>> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM signups WHERE activity_id = ? ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(activity_id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            rows_into(rows)
        }
    }
}

/// Gets all signups of the camper identified by `camper_id`, sorted by identifier.
pub(crate) async fn get_signups_by_camper(
    ex: &mut Executor,
    camper_id: CamperId,
) -> DbResult<Vec<Signup>> {
    match ex {
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM signups WHERE camper_id = ? ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(camper_id.as_i64())
                .fetch_all(&mut **ex)
                .await
                .map_err(map_sqlx_error)?;
            rows_into(rows)
        }
    }
}
