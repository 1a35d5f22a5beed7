//! Schema-driven access to one raw record.
//!
//! Retrieval comes in three strictness levels:
//!
//! | method | unknown key / bad type tag | conversion failure | absent key |
//! |---|---|---|---|
//! | [`FieldData::get_ok_err`] | `Err` | `Err` (still counts as present) | `Ok(FieldLookup::Absent)` |
//! | [`FieldData::get_ok`] | panic | panic | `None` |
//! | [`FieldData::get`] | panic | panic | default or zero value |
//!
//! `get` and `get_ok` are for call sites that already know the key is declared. A mismatch
//! there is a bug, so they panic with a [`ContractViolation`]. The `try_` variants return that
//! violation instead. Run [`FieldData::validate`] once on untrusted input before using the
//! panicking getters.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::decode::{Decoder, WeakDecoder};
use crate::error::{ContractViolation, FieldDataError, Result};
use crate::field_type::{DeclaredType, FieldType};
use crate::schema::{FieldDescriptor, SchemaStore};
use crate::value::{FieldLookup, FieldValue};

/// Raw input record: string keys to arbitrary JSON values
pub type RawRecord = Map<String, Value>;

/// Typed view of one raw record through a shared schema
#[derive(Debug, Clone)]
pub struct FieldData<'a, D = WeakDecoder> {
    raw:     &'a RawRecord,
    schema:  &'a SchemaStore,
    decoder: D,
}

impl<'a> FieldData<'a> {
    /// Accessor using weak coercion
    #[must_use]
    pub const fn new(raw: &'a RawRecord, schema: &'a SchemaStore) -> Self {
        Self {
            raw,
            schema,
            decoder: WeakDecoder,
        }
    }
}

impl<'a, D: Decoder> FieldData<'a, D> {
    /// Accessor using a caller-supplied coercion backend
    #[must_use]
    pub const fn with_decoder(raw: &'a RawRecord, schema: &'a SchemaStore, decoder: D) -> Self {
        Self {
            raw,
            schema,
            decoder,
        }
    }

    /// The raw record
    #[must_use]
    pub const fn raw(&self) -> &'a RawRecord {
        self.raw
    }

    /// The schema
    #[must_use]
    pub const fn schema(&self) -> &'a SchemaStore {
        self.schema
    }

    /// Check every raw key that the schema declares.
    ///
    /// Keys the schema does not know are ignored. Declared fields absent from the record are not
    /// checked. Stops at the first failure; with several bad fields, which one is reported
    /// depends on the record's iteration order.
    ///
    /// # Errors
    ///
    /// [`FieldDataError::UnknownType`] when a present field is declared with an unrecognized
    /// tag, [`FieldDataError::Conversion`] when a present value does not coerce.
    pub fn validate(&self) -> Result<()> {
        tracing::debug!(raw_fields = self.raw.len(), "validating raw record");

        for (field, raw) in self.raw {
            let Some(descriptor) = self.schema.get(field) else {
                tracing::trace!(field = field.as_str(), "skipping field not in schema");
                continue;
            };
            self.decode_declared(field, descriptor, raw)
                .inspect_err(|e| tracing::debug!(error = %e, "validation failed"))?;
        }

        tracing::debug!("raw record is valid");
        Ok(())
    }

    /// Look up `key` without ever panicking.
    ///
    /// # Errors
    ///
    /// - [`FieldDataError::UnknownField`] when the schema does not declare `key`
    /// - [`FieldDataError::UnknownType`] when its type tag is unrecognized
    /// - [`FieldDataError::Conversion`] when the raw value is present but does not coerce; see
    ///   [`FieldDataError::is_present`]
    pub fn get_ok_err(&self, key: &str) -> Result<FieldLookup> {
        let descriptor = self
            .schema
            .get(key)
            .ok_or_else(|| FieldDataError::UnknownField {
                field: key.to_string(),
            })?;
        let field_type = declared_primitive(key, descriptor)?;

        let Some(raw) = self.raw.get(key) else {
            tracing::trace!(field = key, "field absent from raw record");
            return Ok(FieldLookup::Absent);
        };

        let value = self.decode(key, field_type, raw)?;
        tracing::trace!(field = key, value = ?value, "field decoded");
        Ok(FieldLookup::Present(value))
    }

    /// Like [`FieldData::get_ok`], returning the violation instead of panicking
    ///
    /// # Errors
    ///
    /// [`ContractViolation::Read`] wrapping whatever [`FieldData::get_ok_err`] reported.
    pub fn try_get_ok(&self, key: &str) -> std::result::Result<Option<FieldValue>, ContractViolation> {
        self.get_ok_err(key)
            .map(FieldLookup::into_value)
            .map_err(|source| ContractViolation::Read {
                field: key.to_string(),
                source,
            })
    }

    /// Like [`FieldData::get`], returning the violation instead of panicking
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NotInSchema`] for an undeclared key, otherwise see
    /// [`FieldData::try_get_ok`].
    pub fn try_get(&self, key: &str) -> std::result::Result<FieldValue, ContractViolation> {
        if !self.schema.contains(key) {
            return Err(ContractViolation::NotInSchema {
                field: key.to_string(),
            });
        }

        match self.try_get_ok(key)? {
            Some(value) => Ok(value),
            None => self.resolved_default(key),
        }
    }

    /// The coerced value if the key is present, `None` if it is absent.
    ///
    /// A present `null` coerces to the type's zero value, not the declared default.
    ///
    /// # Panics
    ///
    /// When [`FieldData::get_ok_err`] fails for `key`: undeclared key, unrecognized type tag, or
    /// a value that does not coerce.
    #[must_use]
    pub fn get_ok(&self, key: &str) -> Option<FieldValue> {
        self.try_get_ok(key).unwrap_or_else(|violation| abort(&violation))
    }

    /// The coerced value, or the field's default (or zero value) when absent.
    ///
    /// # Panics
    ///
    /// When `key` is not declared, and in every case [`FieldData::get_ok`] panics.
    #[must_use]
    pub fn get(&self, key: &str) -> FieldValue {
        self.try_get(key).unwrap_or_else(|violation| abort(&violation))
    }

    /// [`FieldData::get`] for a field declared as `bool`
    ///
    /// # Panics
    ///
    /// As [`FieldData::get`], and when the field is declared with another type.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get_typed(key, FieldType::Bool) {
            FieldValue::Bool(b) => b,
            other => abort(&mismatch(key, &other, FieldType::Bool)),
        }
    }

    /// [`FieldData::get`] for a field declared as `int`
    ///
    /// # Panics
    ///
    /// As [`FieldData::get`], and when the field is declared with another type.
    #[must_use]
    pub fn get_int(&self, key: &str) -> i64 {
        match self.get_typed(key, FieldType::Int) {
            FieldValue::Int(n) => n,
            other => abort(&mismatch(key, &other, FieldType::Int)),
        }
    }

    /// [`FieldData::get`] for a field declared as `string`
    ///
    /// # Panics
    ///
    /// As [`FieldData::get`], and when the field is declared with another type.
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        match self.get_typed(key, FieldType::String) {
            FieldValue::String(s) => s,
            other => abort(&mismatch(key, &other, FieldType::String)),
        }
    }

    /// [`FieldData::get`] for a field declared as `map`
    ///
    /// # Panics
    ///
    /// As [`FieldData::get`], and when the field is declared with another type.
    #[must_use]
    pub fn get_map(&self, key: &str) -> Map<String, Value> {
        match self.get_typed(key, FieldType::Map) {
            FieldValue::Map(map) => map,
            other => abort(&mismatch(key, &other, FieldType::Map)),
        }
    }

    /// Raw keys the schema does not declare, sorted
    #[must_use]
    pub fn unknown_fields(&self) -> Vec<&'a str> {
        let schema = self.schema;
        let mut unknown: Vec<&'a str> = self
            .raw
            .keys()
            .map(String::as_str)
            .filter(|key| !schema.contains(key))
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Resolve every declared field: the coerced value when present, the default otherwise.
    ///
    /// # Errors
    ///
    /// The first [`FieldDataError`] hit, in field-name order.
    pub fn resolve_all(&self) -> Result<BTreeMap<String, FieldValue>> {
        let mut resolved = BTreeMap::new();
        for name in self.schema.field_names() {
            let value = match self.get_ok_err(name)? {
                FieldLookup::Present(value) => value,
                FieldLookup::Absent => self
                    .schema
                    .get(name)
                    .and_then(FieldDescriptor::default_or_zero)
                    .ok_or_else(|| FieldDataError::UnknownField {
                        field: name.to_string(),
                    })?,
            };
            resolved.insert(name.to_string(), value);
        }
        Ok(resolved)
    }

    fn get_typed(&self, key: &str, requested: FieldType) -> FieldValue {
        let declared = self
            .schema
            .get(key)
            .and_then(FieldDescriptor::field_type)
            .filter(|declared| *declared != requested);
        if let Some(declared) = declared {
            abort(&ContractViolation::TypeMismatch {
                field: key.to_string(),
                declared,
                requested,
            });
        }
        self.get(key)
    }

    fn decode_declared(
        &self,
        field: &str,
        descriptor: &FieldDescriptor,
        raw: &Value,
    ) -> Result<FieldValue> {
        let field_type = declared_primitive(field, descriptor)?;
        self.decode(field, field_type, raw)
    }

    // One decoder call per (field, raw value); failures are reported, never retried.
    fn decode(&self, field: &str, field_type: FieldType, raw: &Value) -> Result<FieldValue> {
        self.decoder
            .decode(raw, field_type)
            .map_err(|source| FieldDataError::Conversion {
                field: field.to_string(),
                raw: raw.clone(),
                source,
            })
    }

    fn resolved_default(&self, key: &str) -> std::result::Result<FieldValue, ContractViolation> {
        let descriptor = self
            .schema
            .get(key)
            .ok_or_else(|| ContractViolation::NotInSchema {
                field: key.to_string(),
            })?;
        descriptor
            .default_or_zero()
            .ok_or_else(|| ContractViolation::Read {
                field:  key.to_string(),
                source: FieldDataError::UnknownType {
                    field:    key.to_string(),
                    type_tag: descriptor.declared_type().tag().to_string(),
                },
            })
    }
}

fn declared_primitive(field: &str, descriptor: &FieldDescriptor) -> Result<FieldType> {
    match descriptor.declared_type() {
        DeclaredType::Known(field_type) => Ok(*field_type),
        DeclaredType::Unrecognized(tag) => Err(FieldDataError::UnknownType {
            field:    field.to_string(),
            type_tag: tag.clone(),
        }),
    }
}

fn mismatch(key: &str, value: &FieldValue, requested: FieldType) -> ContractViolation {
    ContractViolation::TypeMismatch {
        field: key.to_string(),
        declared: value.field_type(),
        requested,
    }
}

#[allow(clippy::panic, reason = "trusted accessors abort on programmer error")]
fn abort(violation: &ContractViolation) -> ! {
    tracing::error!(%violation, "field data contract violated");
    panic!("{violation}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test fixtures are known-good")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode::{DecodeMode, StrictDecoder};
    use crate::error::DecodeError;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => RawRecord::new(),
        }
    }

    fn sample_schema() -> SchemaStore {
        SchemaStore::builder()
            .field("enabled", FieldDescriptor::with_default(false))
            .field("count", FieldDescriptor::new(FieldType::Int))
            .field("name", FieldDescriptor::new(FieldType::String))
            .field("labels", FieldDescriptor::new(FieldType::Map))
            .field("retries", FieldDescriptor::with_default(3_i64))
            .field("ratio", FieldDescriptor::unrecognized("float"))
            .build()
    }

    #[test]
    fn test_absent_bool_returns_declared_default() {
        let schema = SchemaStore::builder()
            .field("enabled", FieldDescriptor::with_default(false))
            .build();
        let raw = RawRecord::new();
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.get("enabled"), FieldValue::Bool(false));
    }

    #[test]
    fn test_absent_fields_resolve_to_default_or_zero() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.get("retries"), FieldValue::Int(3));
        assert_eq!(data.get("count"), FieldValue::Int(0));
        assert_eq!(data.get("name"), FieldValue::String(String::new()));
        assert_eq!(data.get("labels"), FieldValue::Map(Map::new()));
    }

    #[test]
    fn test_numeric_string_coerces_to_int() {
        let schema = sample_schema();
        let raw = record(json!({"count": "7"}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.get("count"), FieldValue::Int(7));
        assert_eq!(data.get_int("count"), 7);
    }

    #[test]
    fn test_three_getters_agree_on_present_values() {
        let schema = sample_schema();
        let raw = record(json!({
            "enabled": "true",
            "count": 12.7,
            "name": 5,
            "labels": [{"a": "1"}, {"b": "2"}],
        }));
        let data = FieldData::new(&raw, &schema);

        for key in ["enabled", "count", "name", "labels"] {
            let via_err = data.get_ok_err(key).unwrap();
            assert!(via_err.is_present());
            let via_ok = data.get_ok(key);
            assert_eq!(via_ok.as_ref(), via_err.value(), "{key}");
            assert_eq!(Some(data.get(key)), via_ok, "{key}");
        }
        assert!(data.get_bool("enabled"));
        assert_eq!(data.get_int("count"), 12);
        assert_eq!(data.get_string("name"), "5");
        assert_eq!(data.get_map("labels").len(), 2);
    }

    #[test]
    fn test_round_trip_of_matching_shapes() {
        let schema = sample_schema();
        let raw = record(json!({"enabled": true, "count": 42, "name": "x", "labels": {}}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.get("enabled"), FieldValue::Bool(true));
        assert_eq!(data.get("count"), FieldValue::Int(42));
        assert_eq!(data.get("name"), FieldValue::from("x"));
        assert_eq!(data.get("labels"), FieldValue::Map(Map::new()));
    }

    #[test]
    fn test_get_ok_err_unknown_field() {
        let schema = sample_schema();
        let raw = record(json!({"nope": 1}));
        let data = FieldData::new(&raw, &schema);

        let err = data.get_ok_err("nope").unwrap_err();
        assert_eq!(
            err,
            FieldDataError::UnknownField {
                field: "nope".to_string(),
            }
        );
        assert!(!err.is_present());
    }

    #[test]
    fn test_get_ok_err_unknown_type() {
        let schema = sample_schema();
        let raw = record(json!({"ratio": 0.5}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(
            data.get_ok_err("ratio"),
            Err(FieldDataError::UnknownType {
                field:    "ratio".to_string(),
                type_tag: "float".to_string(),
            })
        );
    }

    #[test]
    fn test_get_ok_err_absent_is_not_an_error() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.get_ok_err("count"), Ok(FieldLookup::Absent));
    }

    #[test]
    fn test_get_ok_err_conversion_failure_reports_presence() {
        let schema = sample_schema();
        let raw = record(json!({"count": "abc"}));
        let data = FieldData::new(&raw, &schema);

        let err = data.get_ok_err("count").unwrap_err();
        assert!(err.is_present());
        assert!(matches!(
            err,
            FieldDataError::Conversion { ref field, ref raw, .. }
                if field == "count" && *raw == json!("abc")
        ));
    }

    #[test]
    fn test_null_is_present_as_zero_value_not_default() {
        let schema = sample_schema();
        let raw = record(json!({"retries": null, "name": null, "enabled": null, "labels": null}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(
            data.get_ok_err("retries"),
            Ok(FieldLookup::Present(FieldValue::Int(0)))
        );
        assert_eq!(data.get_ok("retries"), Some(FieldValue::Int(0)));
        assert_eq!(data.get("retries"), FieldValue::Int(0));
        assert_eq!(data.get_ok("name"), Some(FieldValue::String(String::new())));
        assert!(!data.get_bool("enabled"));
        assert!(data.get_map("labels").is_empty());
        assert_eq!(data.validate(), Ok(()));

        let strict = FieldData::with_decoder(&raw, &schema, StrictDecoder);
        assert_eq!(strict.get("retries"), FieldValue::Int(0));
    }

    #[test]
    fn test_unknown_raw_field_is_ignored() {
        let schema = SchemaStore::builder()
            .field("name", FieldDescriptor::new(FieldType::String))
            .build();
        let raw = record(json!({"other": 1}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.validate(), Ok(()));
        assert_eq!(data.get_ok("name"), None);
        assert_eq!(data.unknown_fields(), vec!["other"]);
    }

    #[test]
    fn test_validate_reports_conversion_error() {
        let schema = SchemaStore::builder()
            .field("count", FieldDescriptor::new(FieldType::Int))
            .build();
        let raw = record(json!({"count": "abc"}));
        let data = FieldData::new(&raw, &schema);

        let err = data.validate().unwrap_err();
        assert_eq!(err.field(), "count");
        assert!(matches!(err, FieldDataError::Conversion { .. }));
    }

    #[test]
    fn test_validate_reports_unknown_type_for_present_field_only() {
        let schema = sample_schema();

        let absent = RawRecord::new();
        assert_eq!(FieldData::new(&absent, &schema).validate(), Ok(()));

        let present = record(json!({"ratio": 1}));
        assert!(matches!(
            FieldData::new(&present, &schema).validate(),
            Err(FieldDataError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_validate_reports_one_of_several_failures() {
        let schema = sample_schema();
        let raw = record(json!({"count": "abc", "labels": 3, "name": "fine"}));
        let data = FieldData::new(&raw, &schema);

        let err = data.validate().unwrap_err();
        assert!(["count", "labels"].contains(&err.field()));
    }

    #[test]
    fn test_validate_passes_when_every_present_field_coerces() {
        let schema = sample_schema();
        let raw = record(json!({"count": "0x1f", "enabled": 0, "extra": [1, 2]}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(data.validate(), Ok(()));
        assert_eq!(data.get("count"), FieldValue::Int(31));
    }

    #[test]
    #[should_panic(expected = "field nope not in the schema")]
    fn test_get_unknown_key_panics() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        let _ = FieldData::new(&raw, &schema).get("nope");
    }

    #[test]
    #[should_panic(expected = "error reading nope: unknown field: nope")]
    fn test_get_ok_unknown_key_panics() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        let _ = FieldData::new(&raw, &schema).get_ok("nope");
    }

    #[test]
    #[should_panic(expected = "error reading count")]
    fn test_get_conversion_failure_panics() {
        let schema = sample_schema();
        let raw = record(json!({"count": "abc"}));
        let _ = FieldData::new(&raw, &schema).get("count");
    }

    #[test]
    #[should_panic(expected = "unknown field type float for field ratio")]
    fn test_get_unrecognized_type_panics() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        let _ = FieldData::new(&raw, &schema).get("ratio");
    }

    #[test]
    #[should_panic(expected = "field count is declared as int, not bool")]
    fn test_typed_getter_mismatch_panics() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        let _ = FieldData::new(&raw, &schema).get_bool("count");
    }

    #[test]
    fn test_try_variants_return_violations() {
        let schema = sample_schema();
        let raw = record(json!({"count": "abc"}));
        let data = FieldData::new(&raw, &schema);

        assert_eq!(
            data.try_get("nope"),
            Err(ContractViolation::NotInSchema {
                field: "nope".to_string(),
            })
        );
        assert!(matches!(
            data.try_get_ok("count"),
            Err(ContractViolation::Read {
                source: FieldDataError::Conversion { .. },
                ..
            })
        ));
        assert_eq!(data.try_get("retries"), Ok(FieldValue::Int(3)));
    }

    #[test]
    fn test_strict_decoder_is_swappable() {
        let schema = sample_schema();
        let raw = record(json!({"count": "7"}));

        let weak = FieldData::new(&raw, &schema);
        assert_eq!(weak.validate(), Ok(()));

        let strict = FieldData::with_decoder(&raw, &schema, StrictDecoder);
        assert!(matches!(
            strict.get_ok_err("count"),
            Err(FieldDataError::Conversion {
                source: DecodeError::Unconvertible { actual: "string", .. },
                ..
            })
        ));

        let by_mode = FieldData::with_decoder(&raw, &schema, DecodeMode::Strict);
        assert!(by_mode.validate().is_err());
    }

    #[test]
    fn test_resolve_all_fills_defaults() {
        let schema = SchemaStore::builder()
            .field("enabled", FieldDescriptor::with_default(true))
            .field("count", FieldDescriptor::new(FieldType::Int))
            .build();
        let raw = record(json!({"count": "9", "other": "x"}));
        let data = FieldData::new(&raw, &schema);

        let resolved = data.resolve_all().unwrap();
        assert_eq!(resolved.get("enabled"), Some(&FieldValue::Bool(true)));
        assert_eq!(resolved.get("count"), Some(&FieldValue::Int(9)));
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_resolve_all_surfaces_unknown_type() {
        let schema = sample_schema();
        let raw = RawRecord::new();
        assert!(matches!(
            FieldData::new(&raw, &schema).resolve_all(),
            Err(FieldDataError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_shared_schema_concurrent_reads() {
        let schema = sample_schema();
        let first = record(json!({"count": 1}));
        let second = record(json!({"count": "2"}));
        let data = FieldData::new(&first, &schema);

        std::thread::scope(|scope| {
            let a = scope.spawn(|| data.get_int("count"));
            let b = scope.spawn(|| FieldData::new(&second, &schema).get_int("count"));
            let c = scope.spawn(|| data.get("retries"));
            assert_eq!(a.join().unwrap(), 1);
            assert_eq!(b.join().unwrap(), 2);
            assert_eq!(c.join().unwrap(), FieldValue::Int(3));
        });
    }
}
