//! Schema-driven typed access over loosely-typed JSON records
//!
//! A [`SchemaStore`] declares, per key, one of four primitive types (`bool`, `int`, `string`,
//! `map`) and an optional default. A [`FieldData`] pairs one raw record with that schema and
//! hands back values already coerced to the declared type.
//!
//! # Usage
//!
//! ```
//! use field_data::{FieldData, FieldDescriptor, FieldType, FieldValue, RawRecord, SchemaStore};
//! use serde_json::json;
//!
//! let schema = SchemaStore::builder()
//!     .field("enabled", FieldDescriptor::with_default(false))
//!     .field("count", FieldDescriptor::new(FieldType::Int))
//!     .build();
//!
//! let raw: RawRecord = serde_json::from_value(json!({ "count": "7", "other": 1 })).unwrap();
//! let data = FieldData::new(&raw, &schema);
//!
//! // Pre-flight check before trusting `get` on external input
//! assert!(data.validate().is_ok());
//! assert_eq!(data.get("count"), FieldValue::Int(7));
//! assert_eq!(data.get("enabled"), FieldValue::Bool(false));
//! ```
//!
//! # Strictness levels
//!
//! - [`FieldData::get_ok_err`] never panics; every failure is a [`FieldDataError`]
//! - [`FieldData::get_ok`] and [`FieldData::get`] panic on a [`ContractViolation`] (undeclared
//!   key, unrecognized type tag, or a value that does not coerce)
//! - [`FieldData::try_get_ok`] and [`FieldData::try_get`] return that violation instead
//!
//! Keys in the record that the schema does not declare are ignored everywhere.
//!
//! # Coercion
//!
//! Conversion is delegated to a [`Decoder`]. [`WeakDecoder`] (the default) accepts numeric
//! strings, truthy numbers and similar loose forms; [`StrictDecoder`] accepts only the exact
//! JSON shape. See [`FieldData::with_decoder`].

mod accessor;
mod decode;
mod error;
mod field_type;
mod schema;
mod value;

pub use accessor::{FieldData, RawRecord};
pub use decode::{DecodeMode, Decoder, StrictDecoder, WeakDecoder};
pub use error::{ContractViolation, DecodeError, FieldDataError, Result, SchemaError};
pub use field_type::{DeclaredType, FieldType};
pub use schema::{FieldDescriptor, SchemaBuilder, SchemaStore};
pub use value::{FieldLookup, FieldValue};
