//! Typed values produced by coercion

use serde::Serialize;
use serde_json::{Map, Value};

use crate::field_type::FieldType;

/// A value already coerced into one of the recognized primitives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// String value
    String(String),
    /// String-keyed mapping
    Map(Map<String, Value>),
}

impl FieldValue {
    /// The primitive type this value belongs to
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Bool(_) => FieldType::Bool,
            Self::Int(_) => FieldType::Int,
            Self::String(_) => FieldType::String,
            Self::Map(_) => FieldType::Map,
        }
    }

    /// Get as bool, `None` for any other variant
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64, `None` for any other variant
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice, `None` for any other variant
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as mapping, `None` for any other variant
    #[must_use]
    pub const fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Take the owned string
    #[must_use]
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Take the owned mapping
    #[must_use]
    pub fn into_map(self) -> Option<Map<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Bool(b) => Self::Bool(b),
            FieldValue::Int(n) => Self::from(n),
            FieldValue::String(s) => Self::String(s),
            FieldValue::Map(map) => Self::Object(map),
        }
    }
}

/// Outcome of a non-aborting lookup
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLookup {
    /// The key is declared but missing from the raw record
    Absent,
    /// The key is in the raw record and its value coerced
    Present(FieldValue),
}

impl FieldLookup {
    /// Whether the raw record carried the key
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the decoded value, if any
    #[must_use]
    pub const fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Take the decoded value, if any
    #[must_use]
    pub fn into_value(self) -> Option<FieldValue> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}
