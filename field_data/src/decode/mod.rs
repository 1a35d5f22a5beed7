//! Coercion backends.
//!
//! The accessor never converts values itself: it hands each `(raw value, target type)` pair to a
//! [`Decoder`] exactly once and reports whatever comes back. Swapping the decoder changes how
//! forgiving the accessor is without touching its lookup logic.

mod parse;
mod strict;
mod weak;

use serde_json::Value;
use strum::{Display, EnumString};

pub use strict::StrictDecoder;
pub use weak::WeakDecoder;

use crate::error::DecodeError;
use crate::field_type::FieldType;
use crate::value::FieldValue;

/// Converts a raw JSON value into a typed primitive.
///
/// A raw `null` leaves the target untouched, so both built-in decoders return the target's
/// [`FieldType::zero_value`] for it.
pub trait Decoder: Send + Sync {
    /// Decode `raw` as `target`
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when no conversion into `target` exists.
    fn decode(&self, raw: &Value, target: FieldType) -> Result<FieldValue, DecodeError>;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn decode(&self, raw: &Value, target: FieldType) -> Result<FieldValue, DecodeError> {
        (**self).decode(raw, target)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn decode(&self, raw: &Value, target: FieldType) -> Result<FieldValue, DecodeError> {
        (**self).decode(raw, target)
    }
}

/// Decoder selection, usable directly as a [`Decoder`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DecodeMode {
    /// Best-effort conversions (numeric strings, truthy numbers, ...)
    #[default]
    Weak,
    /// Only the exact JSON shape of the target type
    Strict,
}

impl Decoder for DecodeMode {
    fn decode(&self, raw: &Value, target: FieldType) -> Result<FieldValue, DecodeError> {
        match self {
            Self::Weak => WeakDecoder.decode(raw, target),
            Self::Strict => StrictDecoder.decode(raw, target),
        }
    }
}

/// JSON kind name used in diagnostics
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

const fn unconvertible(expected: FieldType, raw: &Value) -> DecodeError {
    DecodeError::Unconvertible {
        expected,
        actual: json_kind(raw),
    }
}
