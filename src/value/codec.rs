//! Byte-level JSON encoding and decoding

use super::json::{JsonNumber, JsonValue};
use crate::errors::{Error, Result};

/// Encode a value as compact JSON bytes.
///
/// Non-finite floats have no JSON representation and are rejected
/// instead of being written as `null`.
pub fn encode(value: &JsonValue) -> Result<Vec<u8>> {
    ensure_encodable(value)?;
    serde_json::to_vec(value).map_err(|e| Error::encode(e.to_string()))
}

/// Decode JSON bytes into a value.
///
/// Numeric tokens without a fraction or exponent decode as integers,
/// all others as floats.
pub fn decode(bytes: &[u8]) -> Result<JsonValue> {
    serde_json::from_slice(bytes).map_err(|e| Error::malformed_value(e.to_string()))
}

fn ensure_encodable(value: &JsonValue) -> Result<()> {
    match value {
        JsonValue::Number(JsonNumber::Float(f)) if !f.is_finite() => Err(Error::encode(format!(
            "Non-finite number {} cannot be encoded as JSON",
            f
        ))),
        JsonValue::Array(items) => items.iter().try_for_each(ensure_encodable),
        JsonValue::Object(map) => map.values().try_for_each(ensure_encodable),
        _ => Ok(()),
    }
}
