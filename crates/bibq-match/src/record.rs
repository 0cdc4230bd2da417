//! Records and dotted-path lookup.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// An in-memory record: nested sequences and string-keyed mappings over scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    /// Absent value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(Number),
    /// String scalar.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<Self>),
    /// String-keyed mapping.
    Mapping(BTreeMap<String, Self>),
}

impl Record {
    /// Returns the text a scalar is matched against, or `None` for containers
    /// and null.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scalar_text() {
            Some(text) => f.write_str(&text),
            None => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

/// Result of looking a dotted path up in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Located<'r> {
    /// Nothing at the path.
    Missing,
    /// A single value.
    Found(&'r Record),
    /// One result per element of a sequence crossed on the way.
    Many(Vec<Self>),
}

impl<'r> Located<'r> {
    /// Descends one key further.
    fn step(self, key: &str) -> Self {
        match self {
            Self::Missing => Self::Missing,
            Self::Found(record) => step(record, key),
            Self::Many(items) => Self::Many(items.into_iter().map(|item| item.step(key)).collect()),
        }
    }
}

/// Looks `key` up in a single record.
fn step<'r>(record: &'r Record, key: &str) -> Located<'r> {
    match record {
        Record::Mapping(map) => map.get(key).map_or(Located::Missing, Located::Found),
        Record::Sequence(items) => {
            Located::Many(items.iter().map(|item| step(item, key)).collect())
        }
        _ => Located::Missing,
    }
}

/// Resolves a dot-separated path such as `authors.full_name`.
///
/// Each segment indexes a mapping. A sequence met on the way applies the rest
/// of the path to every element. Sequence indexes are not supported.
pub fn lookup<'r>(record: &'r Record, path: &str) -> Located<'r> {
    path.split('.')
        .fold(Located::Found(record), |located, key| located.step(key))
}
