//! Error types for schema loading, coercion, and field access
//!
//! There are two distinct categories:
//! - data-level failures ([`FieldDataError`], [`DecodeError`]) that callers handle at runtime
//! - contract violations ([`ContractViolation`]) raised when a trusted call site asks for a field
//!   the schema cannot serve. `get`/`get_ok` panic with these, `try_get`/`try_get_ok` return them.

use serde_json::Value;
use thiserror::Error;

use crate::field_type::FieldType;

/// Result type for data-level field access
pub type Result<T> = std::result::Result<T, FieldDataError>;

/// A raw value could not be coerced into the requested primitive type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The raw JSON shape has no sensible conversion into the target
    #[error("expected type '{expected}', got unconvertible type '{actual}'")]
    Unconvertible {
        /// Requested primitive type
        expected: FieldType,
        /// JSON kind of the raw value
        actual:   &'static str,
    },

    /// A string was the right shape but its contents did not parse
    #[error("cannot parse '{input}' as {expected}: {reason}")]
    Parse {
        /// Requested primitive type
        expected: FieldType,
        /// The string that failed to parse
        input:    String,
        /// Short parser diagnostic
        reason:   &'static str,
    },

    /// A numeric value does not fit the target type
    #[error("value {value} is out of range for {expected}")]
    OutOfRange {
        /// Requested primitive type
        expected: FieldType,
        /// The offending value, rendered
        value:    String,
    },
}

/// Data-level failure surfaced by `validate` and `get_ok_err`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldDataError {
    /// The requested key has no schema descriptor
    #[error("unknown field: {field}")]
    UnknownField {
        /// Requested key
        field: String,
    },

    /// The descriptor names a type tag outside the recognized primitives
    #[error("unknown field type {type_tag} for field {field}")]
    UnknownType {
        /// Field whose descriptor is malformed
        field:    String,
        /// The unrecognized tag as declared
        type_tag: String,
    },

    /// The raw value is present but cannot be coerced to the declared type
    #[error("error converting input {raw} for field {field}: {source}")]
    Conversion {
        /// Offending field
        field:  String,
        /// Raw value as supplied
        raw:    Value,
        /// Decoder diagnostic
        #[source]
        source: DecodeError,
    },
}

impl FieldDataError {
    /// Name of the field the error refers to
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field }
            | Self::UnknownType { field, .. }
            | Self::Conversion { field, .. } => field,
        }
    }

    /// Whether the raw key was present when the error occurred.
    ///
    /// Only a conversion failure implies presence: the key existed, it just didn't coerce.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }
}

/// Misuse of the trusted accessors: the call site asked for something the schema cannot serve
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    /// `get` was called with a key the schema does not declare
    #[error("field {field} not in the schema")]
    NotInSchema {
        /// Requested key
        field: String,
    },

    /// The underlying lookup failed
    #[error("error reading {field}: {source}")]
    Read {
        /// Requested key
        field:  String,
        /// What `get_ok_err` reported
        #[source]
        source: FieldDataError,
    },

    /// A typed getter was used on a field declared with a different type
    #[error("field {field} is declared as {declared}, not {requested}")]
    TypeMismatch {
        /// Requested key
        field:     String,
        /// Type from the schema
        declared:  FieldType,
        /// Type the call site asked for
        requested: FieldType,
    },
}

/// Failure loading a schema declaration
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Malformed JSON or an entry with the wrong shape
    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),

    /// A declared default cannot be coerced to the declared type
    #[error("invalid default for field {field}: {source}")]
    InvalidDefault {
        /// Field whose default is bad
        field:  String,
        /// Decoder diagnostic
        #[source]
        source: DecodeError,
    },
}
