//! Order and having terms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::value::{JsonObject, JsonValue};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(Error::config(format!("Invalid order direction: {}", s))),
        }
    }
}

/// One ORDER BY item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub column: String,
    pub direction: Direction,
}

impl OrderSpec {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn to_wire(&self) -> JsonValue {
        let mut obj = JsonObject::new();
        obj.insert("column".to_string(), JsonValue::from(self.column.as_str()));
        obj.insert("direction".to_string(), JsonValue::from(self.direction.as_str()));
        JsonValue::Object(obj)
    }
}

/// A predicate applied after grouping.
///
/// The operator is passed through untouched; the service owns the
/// HAVING operator vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct HavingSpec {
    pub column: String,
    pub operator: String,
    pub value: JsonValue,
}

impl HavingSpec {
    pub fn new(column: impl Into<String>, operator: impl Into<String>, value: JsonValue) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value,
        }
    }

    pub fn to_wire(&self) -> JsonValue {
        let mut obj = JsonObject::new();
        obj.insert("column".to_string(), JsonValue::from(self.column.as_str()));
        obj.insert("operator".to_string(), JsonValue::from(self.operator.as_str()));
        obj.insert("value".to_string(), self.value.clone());
        JsonValue::Object(obj)
    }
}
