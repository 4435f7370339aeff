//! Lenient field decoding for provider payloads.
//!
//! Nothing here fails: malformed input decodes to the zero value.

use serde_json::Value;

/// Decode a non-negative integer column. Anything else becomes `0`.
pub(crate) fn parse_count(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

/// Decode a non-negative finite decimal column. Anything else becomes `0.0`.
pub(crate) fn parse_decimal(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Decode a competition column, held to `[0, 1]`.
pub(crate) fn parse_competition(raw: &str) -> f64 {
    parse_decimal(raw).min(1.0)
}

/// String field of a JSON object, empty when missing or not a string.
pub(crate) fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Integer field that may arrive as a number or a numeric string.
pub(crate) fn u64_field(value: &Value, key: &str) -> u64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => parse_count(&s.replace(',', "")),
        _ => 0,
    }
}

/// Array field of a JSON object, empty when missing or not an array.
pub(crate) fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
