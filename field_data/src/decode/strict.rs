//! Exact-shape decoding

use serde_json::Value;

use super::{Decoder, unconvertible};
use crate::error::DecodeError;
use crate::field_type::FieldType;
use crate::value::FieldValue;

/// Accepts only the JSON shape that already matches the target type.
///
/// Integers must be integral JSON numbers within `i64`; `7.0` and `"7"` are both rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictDecoder;

impl Decoder for StrictDecoder {
    fn decode(&self, raw: &Value, target: FieldType) -> Result<FieldValue, DecodeError> {
        let value = match (target, raw) {
            (_, Value::Null) => target.zero_value(),
            (FieldType::Bool, Value::Bool(b)) => FieldValue::Bool(*b),
            (FieldType::Int, Value::Number(n)) if n.is_u64() && !n.is_i64() => {
                return Err(DecodeError::OutOfRange {
                    expected: FieldType::Int,
                    value:    n.to_string(),
                });
            },
            (FieldType::Int, Value::Number(n)) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => return Err(unconvertible(target, raw)),
            },
            (FieldType::String, Value::String(s)) => FieldValue::String(s.clone()),
            (FieldType::Map, Value::Object(map)) => FieldValue::Map(map.clone()),
            _ => return Err(unconvertible(target, raw)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_exact_shapes_decode() {
        assert_eq!(
            StrictDecoder.decode(&json!(false), FieldType::Bool),
            Ok(FieldValue::Bool(false))
        );
        assert_eq!(
            StrictDecoder.decode(&json!(-5), FieldType::Int),
            Ok(FieldValue::Int(-5))
        );
        assert_eq!(
            StrictDecoder.decode(&Value::Null, FieldType::String),
            Ok(FieldValue::String(String::new()))
        );
    }

    #[test]
    fn test_weak_forms_are_rejected() {
        for (raw, target) in [
            (json!("7"), FieldType::Int),
            (json!(7.0), FieldType::Int),
            (json!(1), FieldType::Bool),
            (json!(3), FieldType::String),
            (json!([]), FieldType::Map),
        ] {
            assert!(
                matches!(
                    StrictDecoder.decode(&raw, target),
                    Err(DecodeError::Unconvertible { .. })
                ),
                "{raw} as {target}"
            );
        }
    }

    #[test]
    fn test_large_unsigned_is_out_of_range() {
        assert!(matches!(
            StrictDecoder.decode(&json!(u64::MAX), FieldType::Int),
            Err(DecodeError::OutOfRange { .. })
        ));
    }
}
