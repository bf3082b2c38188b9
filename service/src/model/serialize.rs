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

//! Conversion of entities and their relationships into JSON objects.
//!
//! Entities reference each other in cycles (a camper has signups, each of which has a camper, which
//! has signups...), so serialization is driven by explicit `Rules` that decide which dotted paths,
//! such as `signups` or `signups.activity`, get expanded.  Rules are checked before a relationship
//! is resolved, so excluded relationships are never looked up.
//!
//! On top of the rules supplied by the caller, every entity type declares default exclusions for
//! the relationships that lead straight back to it.  These are applied relative to wherever the
//! entity appears in the output, which makes every cycle unreachable.

use crate::model::{Activity, ActivityId, Camper, CamperId, Signup, SignupId};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// In-memory snapshot of the records loaded to build one response.
#[derive(Debug, Default)]
pub(crate) struct Graph {
    /// Activities indexed by their identifier.
    activities: BTreeMap<ActivityId, Activity>,

    /// Campers indexed by their identifier.
    campers: BTreeMap<CamperId, Camper>,

    /// Signups indexed by their identifier.
    signups: BTreeMap<SignupId, Signup>,
}

impl Graph {
    /// Adds an `activity` to the snapshot.
    pub(crate) fn add_activity(&mut self, activity: Activity) {
        self.activities.insert(*activity.id(), activity);
    }

    /// Adds a `camper` to the snapshot.
    pub(crate) fn add_camper(&mut self, camper: Camper) {
        self.campers.insert(*camper.id(), camper);
    }

    /// Adds a `signup` to the snapshot.
    pub(crate) fn add_signup(&mut self, signup: Signup) {
        self.signups.insert(*signup.id(), signup);
    }

    /// Returns all signups in the snapshot that match `pred`, in identifier order.
    fn signups_where<P: Fn(&Signup) -> bool>(&self, pred: P) -> Vec<Entity<'_>> {
        self.signups.values().filter(|s| pred(*s)).map(Entity::Signup).collect()
    }
}

/// Reference to any entity that can be serialized.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Entity<'g> {
    /// An activity.
    Activity(&'g Activity),

    /// A camper.
    Camper(&'g Camper),

    /// A signup.
    Signup(&'g Signup),
}

/// Unresolved relationship from one entity to others.
enum Relationship {
    /// The signups of an activity.
    ActivitySignups(ActivityId),

    /// The signups of a camper.
    CamperSignups(CamperId),

    /// The activity of a signup.
    SignupActivity(ActivityId),

    /// The camper of a signup.
    SignupCamper(CamperId),
}

/// Outcome of resolving a `Relationship` against a `Graph`.
enum Related<'g> {
    /// A to-one relationship, which may point to a record missing from the snapshot.
    One(Option<Entity<'g>>),

    /// A to-many relationship.
    Many(Vec<Entity<'g>>),
}

impl Relationship {
    /// Looks up the entities this relationship points to in `graph`.
    fn resolve(self, graph: &Graph) -> Related<'_> {
        match self {
            Relationship::ActivitySignups(id) => {
                Related::Many(graph.signups_where(|s| *s.activity_id() == id))
            }
            Relationship::CamperSignups(id) => {
                Related::Many(graph.signups_where(|s| *s.camper_id() == id))
            }
            Relationship::SignupActivity(id) => {
                Related::One(graph.activities.get(&id).map(Entity::Activity))
            }
            Relationship::SignupCamper(id) => {
                Related::One(graph.campers.get(&id).map(Entity::Camper))
            }
        }
    }
}

impl Entity<'_> {
    /// Paths, relative to this entity, that are never expanded.
    fn default_exclusions(&self) -> &'static [&'static str] {
        match self {
            Entity::Activity(_) => &["signups.activity"],
            Entity::Camper(_) => &["signups.camper"],
            Entity::Signup(_) => &["activity.signups", "camper.signups"],
        }
    }

    /// Returns the plain columns of this entity.
    fn columns(&self) -> Vec<(&'static str, Value)> {
        match self {
            Entity::Activity(activity) => vec![
                ("id", json!(activity.id().as_i64())),
                ("name", json!(activity.name())),
                ("difficulty", json!(activity.difficulty())),
            ],
            Entity::Camper(camper) => vec![
                ("id", json!(camper.id().as_i64())),
                ("name", json!(camper.name().as_str())),
                ("age", json!(camper.age().as_u8())),
            ],
            Entity::Signup(signup) => vec![
                ("id", json!(signup.id().as_i64())),
                ("time", json!(signup.time().as_u8())),
                ("camper_id", json!(signup.camper_id().as_i64())),
                ("activity_id", json!(signup.activity_id().as_i64())),
            ],
        }
    }

    /// Returns the relationships of this entity, keyed by the name they get in the output.
    fn relationships(&self) -> Vec<(&'static str, Relationship)> {
        match self {
            Entity::Activity(activity) => {
                vec![("signups", Relationship::ActivitySignups(*activity.id()))]
            }
            Entity::Camper(camper) => vec![("signups", Relationship::CamperSignups(*camper.id()))],
            Entity::Signup(signup) => vec![
                ("activity", Relationship::SignupActivity(*signup.activity_id())),
                ("camper", Relationship::SignupCamper(*signup.camper_id())),
            ],
        }
    }
}

/// Joins a `prefix` path with a `name` using dots.
fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_owned() } else { format!("{}.{}", prefix, name) }
}

/// Returns true if `path` is `base` or is nested under `base`.
fn is_under(base: &str, path: &str) -> bool {
    match path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Inclusion and exclusion rules over dotted paths.
#[derive(Clone, Debug, Default)]
pub(crate) struct Rules {
    /// If present, only these paths (plus their ancestors and descendants) are serialized.
    only: Option<Vec<String>>,

    /// Paths that are never serialized, along with everything under them.
    excluded: Vec<String>,
}

impl Rules {
    /// Creates rules that serialize only the given `paths`.
    pub(crate) fn only(paths: &[&str]) -> Self {
        Self { only: Some(paths.iter().map(|p| (*p).to_owned()).collect()), excluded: vec![] }
    }

    /// Extends the rules to never serialize `path` nor anything under it.
    pub(crate) fn without(mut self, path: &str) -> Self {
        self.excluded.push(path.to_owned());
        self
    }

    /// Returns a copy of these rules with the `exclusions` of an entity located at `prefix` added.
    fn with_defaults_at(&self, prefix: &str, exclusions: &[&str]) -> Self {
        let mut rules = self.clone();
        rules.excluded.extend(exclusions.iter().map(|e| join(prefix, e)));
        rules
    }

    /// Returns true if `path` has to be serialized.
    fn allows(&self, path: &str) -> bool {
        if self.excluded.iter().any(|e| is_under(e, path)) {
            return false;
        }
        match &self.only {
            None => true,
            Some(only) => only.iter().any(|o| is_under(o, path) || is_under(path, o)),
        }
    }
}

/// Serializes `entity` located at `prefix` following `rules`.
fn serialize_at(
    entity: Entity<'_>,
    graph: &Graph,
    rules: &Rules,
    prefix: &str,
) -> Map<String, Value> {
    let rules = rules.with_defaults_at(prefix, entity.default_exclusions());

    let mut map = Map::new();
    for (name, value) in entity.columns() {
        if rules.allows(&join(prefix, name)) {
            map.insert(name.to_owned(), value);
        }
    }
    for (name, relationship) in entity.relationships() {
        let path = join(prefix, name);
        if !rules.allows(&path) {
            continue;
        }
        let value = match relationship.resolve(graph) {
            Related::One(Some(other)) => Value::Object(serialize_at(other, graph, &rules, &path)),
            Related::One(None) => Value::Null,
            Related::Many(others) => Value::Array(
                others
                    .into_iter()
                    .map(|other| Value::Object(serialize_at(other, graph, &rules, &path)))
                    .collect(),
            ),
        };
        map.insert(name.to_owned(), value);
    }
    map
}

/// Serializes `entity` into a JSON object following `rules`, resolving its relationships against
/// the records in `graph`.
pub(crate) fn serialize(entity: Entity<'_>, graph: &Graph, rules: &Rules) -> Map<String, Value> {
    serialize_at(entity, graph, rules, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{validate_camper_age, validate_camper_name, validate_signup_time};

    fn camper(id: i64, name: &str, age: i64) -> Camper {
        Camper::new(
            CamperId::new(id),
            validate_camper_name(Some(name.to_owned())).unwrap(),
            validate_camper_age(Some(age)).unwrap(),
        )
    }

    fn activity(id: i64, name: &str, difficulty: i64) -> Activity {
        Activity::new(ActivityId::new(id), Some(name.to_owned()), Some(difficulty))
    }

    fn signup(id: i64, time: i64, camper_id: i64, activity_id: i64) -> Signup {
        Signup::new(
            SignupId::new(id),
            validate_signup_time(Some(time)).unwrap(),
            CamperId::new(camper_id),
            ActivityId::new(activity_id),
        )
    }

    /// Builds a graph with two campers and two activities, all cross-linked by signups.
    fn full_graph() -> Graph {
        let mut graph = Graph::default();
        graph.add_camper(camper(1, "Ana", 10));
        graph.add_camper(camper(2, "Bo", 12));
        graph.add_activity(activity(10, "Archery", 2));
        graph.add_activity(activity(20, "Canoeing", 3));
        graph.add_signup(signup(100, 9, 1, 10));
        graph.add_signup(signup(101, 14, 1, 20));
        graph.add_signup(signup(102, 9, 2, 10));
        graph
    }

    /// Returns how many levels of nested objects `value` has.
    fn max_depth(value: &Value) -> usize {
        match value {
            Value::Object(map) => 1 + map.values().map(max_depth).max().unwrap_or(0),
            Value::Array(values) => values.iter().map(max_depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    #[test]
    fn test_is_under() {
        assert!(is_under("signups", "signups"));
        assert!(is_under("signups", "signups.camper"));
        assert!(!is_under("signups", "signupsx"));
        assert!(!is_under("signups.camper", "signups"));
    }

    #[test]
    fn test_camper_only_columns() {
        let graph = full_graph();
        let ana = camper(1, "Ana", 10);

        let value = serialize(Entity::Camper(&ana), &graph, &Rules::only(&["id", "name", "age"]));
        assert_eq!(json!({"id": 1, "name": "Ana", "age": 10}), Value::Object(value));
    }

    #[test]
    fn test_camper_without_signups() {
        let graph = full_graph();
        let ana = camper(1, "Ana", 10);

        let value = serialize(Entity::Camper(&ana), &graph, &Rules::default().without("signups"));
        assert_eq!(json!({"id": 1, "name": "Ana", "age": 10}), Value::Object(value));
    }

    #[test]
    fn test_camper_deep() {
        let graph = full_graph();
        let ana = camper(1, "Ana", 10);

        let value = serialize(Entity::Camper(&ana), &graph, &Rules::default());
        assert_eq!(
            json!({
                "id": 1,
                "name": "Ana",
                "age": 10,
                "signups": [
                    {
                        "id": 100,
                        "time": 9,
                        "camper_id": 1,
                        "activity_id": 10,
                        "activity": {"id": 10, "name": "Archery", "difficulty": 2},
                    },
                    {
                        "id": 101,
                        "time": 14,
                        "camper_id": 1,
                        "activity_id": 20,
                        "activity": {"id": 20, "name": "Canoeing", "difficulty": 3},
                    },
                ],
            }),
            Value::Object(value)
        );
    }

    #[test]
    fn test_camper_deep_without_signups_is_empty_list() {
        let graph = Graph::default();
        let ana = camper(1, "Ana", 10);

        let value = serialize(Entity::Camper(&ana), &graph, &Rules::default());
        assert_eq!(json!({"id": 1, "name": "Ana", "age": 10, "signups": []}), Value::Object(value));
    }

    #[test]
    fn test_activity_deep() {
        let graph = full_graph();
        let archery = activity(10, "Archery", 2);

        let value = serialize(Entity::Activity(&archery), &graph, &Rules::default());
        assert_eq!(
            json!({
                "id": 10,
                "name": "Archery",
                "difficulty": 2,
                "signups": [
                    {
                        "id": 100,
                        "time": 9,
                        "camper_id": 1,
                        "activity_id": 10,
                        "camper": {"id": 1, "name": "Ana", "age": 10},
                    },
                    {
                        "id": 102,
                        "time": 9,
                        "camper_id": 2,
                        "activity_id": 10,
                        "camper": {"id": 2, "name": "Bo", "age": 12},
                    },
                ],
            }),
            Value::Object(value)
        );
    }

    #[test]
    fn test_activity_without_signups_keeps_missing_fields() {
        let graph = full_graph();
        let unnamed = Activity::new(ActivityId::new(30), None, None);

        let value =
            serialize(Entity::Activity(&unnamed), &graph, &Rules::default().without("signups"));
        assert_eq!(json!({"id": 30, "name": null, "difficulty": null}), Value::Object(value));
    }

    #[test]
    fn test_signup_attaches_parents_without_their_signups() {
        let graph = full_graph();
        let first = signup(100, 9, 1, 10);

        let value = serialize(Entity::Signup(&first), &graph, &Rules::default());
        assert_eq!(
            json!({
                "id": 100,
                "time": 9,
                "camper_id": 1,
                "activity_id": 10,
                "camper": {"id": 1, "name": "Ana", "age": 10},
                "activity": {"id": 10, "name": "Archery", "difficulty": 2},
            }),
            Value::Object(value)
        );
    }

    #[test]
    fn test_signup_missing_parent_is_null() {
        let graph = Graph::default();
        let orphan = signup(100, 9, 1, 10);

        let value = serialize(Entity::Signup(&orphan), &graph, &Rules::default());
        assert_eq!(Value::Null, value["camper"]);
        assert_eq!(Value::Null, value["activity"]);
    }

    #[test]
    fn test_only_nested_path() {
        let graph = full_graph();
        let ana = camper(1, "Ana", 10);

        let rules = Rules::only(&["name", "signups.time"]);
        let value = serialize(Entity::Camper(&ana), &graph, &rules);
        assert_eq!(
            json!({"name": "Ana", "signups": [{"time": 9}, {"time": 14}]}),
            Value::Object(value)
        );
    }

    #[test]
    fn test_without_nested_path() {
        let graph = full_graph();
        let ana = camper(1, "Ana", 10);

        let value =
            serialize(Entity::Camper(&ana), &graph, &Rules::default().without("signups.activity"));
        assert_eq!(
            json!([
                {"id": 100, "time": 9, "camper_id": 1, "activity_id": 10},
                {"id": 101, "time": 14, "camper_id": 1, "activity_id": 20},
            ]),
            value["signups"]
        );
    }

    #[test]
    fn test_cycles_are_never_expanded() {
        let graph = full_graph();

        for camper in graph.campers.values() {
            let value = Value::Object(serialize(Entity::Camper(camper), &graph, &Rules::default()));
            assert!(max_depth(&value) <= 3, "Too deep: {}", value);
            for signup in value["signups"].as_array().unwrap() {
                assert!(signup.get("camper").is_none());
                assert!(signup["activity"].get("signups").is_none());
            }
        }

        for activity in graph.activities.values() {
            let value =
                Value::Object(serialize(Entity::Activity(activity), &graph, &Rules::default()));
            assert!(max_depth(&value) <= 3, "Too deep: {}", value);
            for signup in value["signups"].as_array().unwrap() {
                assert!(signup.get("activity").is_none());
                assert!(signup["camper"].get("signups").is_none());
            }
        }

        for signup in graph.signups.values() {
            let value = Value::Object(serialize(Entity::Signup(signup), &graph, &Rules::default()));
            assert!(max_depth(&value) <= 2, "Too deep: {}", value);
        }
    }
}
