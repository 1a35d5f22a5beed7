//! Primitive type tags a schema field can declare
//!
//! [`FieldType`] is the closed set of primitives the accessor knows how to coerce into.
//! Schemas authored as configuration can still name any tag, so descriptors carry a
//! [`DeclaredType`] that keeps unrecognized tags around until a field is actually touched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Map;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::value::FieldValue;

/// Recognized primitive types
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// UTF-8 string
    String,
    /// String-keyed mapping of arbitrary JSON values
    Map,
}

impl FieldType {
    /// The natural zero value: `false`, `0`, `""`, or an empty mapping
    #[must_use]
    pub fn zero_value(self) -> FieldValue {
        match self {
            Self::Bool => FieldValue::Bool(false),
            Self::Int => FieldValue::Int(0),
            Self::String => FieldValue::String(String::new()),
            Self::Map => FieldValue::Map(Map::new()),
        }
    }
}

/// Type tag exactly as a descriptor declares it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredType {
    /// One of the recognized primitives
    Known(FieldType),
    /// Any other tag, preserved verbatim
    Unrecognized(String),
}

impl DeclaredType {
    /// Parse a tag, falling back to [`DeclaredType::Unrecognized`]
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        Self::from(tag.to_string())
    }

    /// The recognized primitive, if any
    #[must_use]
    pub const fn known(&self) -> Option<FieldType> {
        match self {
            Self::Known(field_type) => Some(*field_type),
            Self::Unrecognized(_) => None,
        }
    }

    /// The tag as written
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Known(field_type) => field_type.as_ref(),
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<FieldType> for DeclaredType {
    fn from(field_type: FieldType) -> Self {
        Self::Known(field_type)
    }
}

impl From<String> for DeclaredType {
    fn from(tag: String) -> Self {
        match tag.parse::<FieldType>() {
            Ok(field_type) => Self::Known(field_type),
            Err(_) => Self::Unrecognized(tag),
        }
    }
}

impl From<DeclaredType> for String {
    fn from(declared: DeclaredType) -> Self {
        match declared {
            DeclaredType::Known(field_type) => field_type.to_string(),
            DeclaredType::Unrecognized(tag) => tag,
        }
    }
}
