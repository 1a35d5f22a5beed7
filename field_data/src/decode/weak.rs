//! Best-effort coercion

use serde_json::{Map, Number, Value};

use super::parse::{self, ParseFailure};
use super::{Decoder, unconvertible};
use crate::error::DecodeError;
use crate::field_type::FieldType;
use crate::value::FieldValue;

// 2^63 as f64; finite floats in [-2^63, 2^63) truncate into i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Weakly-typed decoder.
///
/// - **bool**: numbers are `!= 0`, strings accept `1/t/true/...` and `0/f/false/...`, `""` is false
/// - **int**: floats truncate toward zero, bools are `1`/`0`, strings parse with base prefixes,
///   `""` is `0`
/// - **string**: bools become `"1"`/`"0"`, numbers are rendered in plain decimal
/// - **map**: objects pass through, an empty array is an empty map, an array of objects merges
///   left to right (`null` elements are skipped, nested arrays merge recursively)
/// - **null**: the target's zero value, for every type
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakDecoder;

impl Decoder for WeakDecoder {
    fn decode(&self, raw: &Value, target: FieldType) -> Result<FieldValue, DecodeError> {
        if raw.is_null() {
            return Ok(target.zero_value());
        }

        let value = match target {
            FieldType::Bool => FieldValue::Bool(decode_bool(raw)?),
            FieldType::Int => FieldValue::Int(decode_int(raw)?),
            FieldType::String => FieldValue::String(decode_string(raw)?),
            FieldType::Map => FieldValue::Map(decode_map(raw)?),
        };
        Ok(value)
    }
}

fn parse_error(expected: FieldType, input: &str, failure: ParseFailure) -> DecodeError {
    DecodeError::Parse {
        expected,
        input: input.to_string(),
        reason: failure.reason(),
    }
}

fn decode_bool(raw: &Value) -> Result<bool, DecodeError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(number_is_nonzero(n)),
        Value::String(s) if s.is_empty() => Ok(false),
        Value::String(s) => {
            parse::parse_bool(s).map_err(|failure| parse_error(FieldType::Bool, s, failure))
        },
        _ => Err(unconvertible(FieldType::Bool, raw)),
    }
}

fn number_is_nonzero(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i != 0
    } else if let Some(u) = n.as_u64() {
        u != 0
    } else {
        n.as_f64().is_some_and(|f| f != 0.0)
    }
}

fn decode_int(raw: &Value) -> Result<i64, DecodeError> {
    match raw {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => number_to_int(n),
        Value::String(s) if s.is_empty() => Ok(0),
        Value::String(s) => {
            parse::parse_int(s).map_err(|failure| parse_error(FieldType::Int, s, failure))
        },
        _ => Err(unconvertible(FieldType::Int, raw)),
    }
}

fn number_to_int(n: &Number) -> Result<i64, DecodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    let out_of_range = || DecodeError::OutOfRange {
        expected: FieldType::Int,
        value:    n.to_string(),
    };
    if n.is_u64() {
        return Err(out_of_range());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && (-I64_BOUND..I64_BOUND).contains(&f) => {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "truncation toward zero is the weak float-to-int rule, range checked above"
            )]
            let truncated = f.trunc() as i64;
            Ok(truncated)
        },
        _ => Err(out_of_range()),
    }
}

fn decode_string(raw: &Value) -> Result<String, DecodeError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(true) => Ok("1".to_string()),
        Value::Bool(false) => Ok("0".to_string()),
        Value::Number(n) => Ok(number_to_string(n)),
        _ => Err(unconvertible(FieldType::String, raw)),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    // f64 Display is the shortest round-trip form without an exponent
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
}

fn decode_map(raw: &Value) -> Result<Map<String, Value>, DecodeError> {
    match raw {
        Value::Object(map) => Ok(map.clone()),
        Value::Array(items) => {
            let mut merged = Map::new();
            merge_into(&mut merged, items)?;
            Ok(merged)
        },
        _ => Err(unconvertible(FieldType::Map, raw)),
    }
}

// Every element decodes into the same map, so later keys win.
fn merge_into(merged: &mut Map<String, Value>, items: &[Value]) -> Result<(), DecodeError> {
    for item in items {
        match item {
            Value::Null => {},
            Value::Object(map) => merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone()))),
            Value::Array(nested) => merge_into(merged, nested)?,
            _ => return Err(unconvertible(FieldType::Map, item)),
        }
    }
    Ok(())
}
