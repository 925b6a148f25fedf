//! Flat race records as delivered by the results server.
//!
//! Cross references are carried as foreign-key ids (`course_id`,
//! `organization_id`, ...). [`crate::linker`] turns them into shared
//! references. Fields the client does not interpret are kept in `extra`.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fields of a record that have no typed counterpart.
pub type Extra = Map<String, Value>;

/// Opaque entity identifier. The server sends integers or strings.
///
/// Integral floats (`1.0`) decode as the integer they spell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl Id {
    /// `0` and `""` are the server's "no reference" sentinels.
    pub fn is_blank(&self) -> bool {
        match self {
            Id::Int(n) => *n == 0,
            Id::Str(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Str(s) => write!(f, "{}", s),
        }
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Id, E> {
        Ok(Id::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Id, E> {
        i64::try_from(v)
            .map(Id::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Id, E> {
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok(Id::Int(v as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
        Ok(Id::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Id, E> {
        Ok(Id::Str(v))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}

/// Decode `null` as the type's default (names the server left unset).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Int(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Str(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub course_id: Option<Id>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(default)]
    pub bib: Option<i64>,
    #[serde(default)]
    pub organization_id: Option<Id>,
    #[serde(default)]
    pub group_id: Option<Id>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Person {
    /// "Surname Name", or just the name when no surname is known.
    pub fn full_name(&self) -> String {
        if self.surname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.surname, self.name)
        }
    }
}

/// One timing result. Named `RaceResult` to stay clear of `std::result::Result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: Id,
    #[serde(default)]
    pub person_id: Option<Id>,
    /// Integer place or a status string, whatever the server computed.
    #[serde(default)]
    pub place: Option<Value>,
    #[serde(default)]
    pub result_msec: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Event header (title and friends).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Race snapshot exactly as served by `GET race`.
///
/// The five lists are mandatory: a payload without one of them is rejected
/// at decode time instead of being half-linked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRace {
    #[serde(default)]
    pub data: Option<RaceData>,
    pub persons: Vec<Person>,
    pub organizations: Vec<Organization>,
    pub groups: Vec<Group>,
    pub courses: Vec<Course>,
    pub results: Vec<RaceResult>,
}

/// Reply of `GET updated_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Epoch seconds of the last change on the server.
    pub updated_time: f64,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
}

fn default_alive() -> bool {
    true
}

impl ServerStatus {
    pub fn updated_time_ms(&self) -> f64 {
        self.updated_time * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_decode_from_numbers_and_strings() {
        let n: Id = serde_json::from_value(json!(5)).unwrap();
        let s: Id = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, Id::Int(5));
        assert_eq!(s, Id::from("a1b2"));
        assert_ne!(Id::Int(1), Id::from("1"));
    }

    #[test]
    fn integral_float_ids_are_integers() {
        let id: Id = serde_json::from_value(json!(1.0)).unwrap();
        assert_eq!(id, Id::Int(1));
        assert!(serde_json::from_value::<Id>(json!(1.5)).is_err());
        assert!(serde_json::from_value::<Id>(json!(null)).is_err());
    }

    #[test]
    fn race_with_float_ids_and_null_names_decodes() {
        let race: RawRace = serde_json::from_value(json!({
            "persons": [{"id": 1.0, "name": null, "surname": null, "group_id": 9.0}],
            "organizations": [{"id": 5, "name": null}],
            "groups": [{"id": 9, "name": null, "course_id": 2.0}],
            "courses": [{"id": 2, "name": "Hill"}],
            "results": [{"id": 100, "person_id": 1.0}]
        }))
        .unwrap();
        assert_eq!(race.persons[0].id, Id::Int(1));
        assert_eq!(race.persons[0].name, "");
        assert_eq!(race.persons[0].group_id, Some(Id::Int(9)));
        assert_eq!(race.organizations[0].name, "");
        assert_eq!(race.groups[0].name, "");
        assert_eq!(race.groups[0].course_id, Some(Id::Int(2)));
        assert_eq!(race.results[0].person_id, Some(Id::Int(1)));
    }

    #[test]
    fn blank_ids() {
        assert!(Id::Int(0).is_blank());
        assert!(Id::from("").is_blank());
        assert!(!Id::Int(-1).is_blank());
        assert!(!Id::from("0").is_blank());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let person: Person = serde_json::from_value(json!({
            "id": 3,
            "name": "Ivan",
            "surname": "Petrov",
            "group_id": null,
            "year": 1990
        }))
        .unwrap();
        assert_eq!(person.group_id, None);
        assert_eq!(person.organization_id, None);
        assert_eq!(person.extra.get("year"), Some(&json!(1990)));
        assert_eq!(person.full_name(), "Petrov Ivan");
    }

    #[test]
    fn full_name_without_surname() {
        let person: Person = serde_json::from_value(json!({"id": 1, "name": "Anna"})).unwrap();
        assert_eq!(person.full_name(), "Anna");
    }

    #[test]
    fn race_without_a_list_is_rejected() {
        let res = serde_json::from_value::<RawRace>(json!({
            "persons": [],
            "organizations": [],
            "groups": [],
            "courses": []
        }));
        assert!(res.is_err());
    }

    #[test]
    fn status_converts_to_milliseconds() {
        let status: ServerStatus =
            serde_json::from_value(json!({"updated_time": 1700000000.5})).unwrap();
        assert!(status.is_alive);
        assert_eq!(status.updated_time_ms(), 1_700_000_000_500.0);
    }
}
