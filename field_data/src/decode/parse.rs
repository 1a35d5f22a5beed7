//! String parsing rules for weak coercion.
//!
//! Booleans accept the short and long spellings in three casings. Integers infer their base
//! from a prefix, so `"0x1F"`, `"0o17"`, `"017"` and `"0b11111"` all read as 31.

const INVALID_SYNTAX: &str = "invalid syntax";
const OUT_OF_RANGE: &str = "value out of range";

/// Parse failure with a short reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParseFailure {
    Syntax,
    Range,
}

impl ParseFailure {
    pub(super) const fn reason(self) -> &'static str {
        match self {
            Self::Syntax => INVALID_SYNTAX,
            Self::Range => OUT_OF_RANGE,
        }
    }
}

pub(super) fn parse_bool(input: &str) -> Result<bool, ParseFailure> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseFailure::Syntax),
    }
}

/// Signed integer with base inferred from the prefix: `0x`, `0o`, `0b`, or a bare leading `0`
/// for octal. Underscores may separate digits only when a prefix is present.
pub(super) fn parse_int(input: &str) -> Result<i64, ParseFailure> {
    let (negative, body) = match input.as_bytes().first() {
        Some(b'+') => (false, &input[1..]),
        Some(b'-') => (true, &input[1..]),
        _ => (false, input),
    };

    let (radix, digits, prefixed) = split_radix(body);
    if digits.is_empty() {
        return Err(ParseFailure::Syntax);
    }
    if digits.contains('_') && !(prefixed && underscores_ok(digits)) {
        return Err(ParseFailure::Syntax);
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ParseFailure::Syntax);
    }

    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow => ParseFailure::Range,
        _ => ParseFailure::Syntax,
    })?;

    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| ParseFailure::Range)
}

fn split_radix(body: &str) -> (u32, &str, bool) {
    let lower = body.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    }
}

// Each '_' must follow a digit or the prefix, and be followed by a digit.
fn underscores_ok(digits: &str) -> bool {
    let mut after_digit = true;
    for b in digits.bytes() {
        if b == b'_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
        } else {
            after_digit = true;
        }
    }
    after_digit
}
