//! Non-2xx classification
//!
//! | status   | kind      |
//! |----------|-----------|
//! | 401, 403 | Auth      |
//! | 404      | NotFound  |
//! | 429      | RateLimit |
//! | other    | Api       |

use crate::errors::{Error, ErrorKind};
use crate::value::{JsonObject, JsonValue};

/// Message carried by every `Permission` error
pub const PERMISSION_REMEDIATION: &str =
    "Schema changes require a service-role key; retry with elevated credentials";

/// Body fields searched for a message, in priority order
const MESSAGE_FIELDS: [&str; 3] = ["error", "message", "detail"];

/// Classify a non-2xx response
pub fn classify(status: u16, body: JsonValue) -> Error {
    let body = into_object(body);

    let kind = match status {
        401 | 403 => ErrorKind::Auth,
        404 => ErrorKind::NotFound,
        429 => ErrorKind::RateLimit,
        _ => ErrorKind::Api,
    };

    let message = extract_message(&body)
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    Error::http(kind, status, message, body)
}

/// Classify a non-2xx response from a schema-mutation endpoint.
///
/// 403 becomes `Permission`; everything else follows [`classify`].
pub fn classify_privileged(status: u16, body: JsonValue) -> Error {
    if status == 403 {
        return Error::http(
            ErrorKind::Permission,
            status,
            PERMISSION_REMEDIATION,
            into_object(body),
        );
    }
    classify(status, body)
}

fn into_object(body: JsonValue) -> JsonObject {
    match body {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    }
}

fn extract_message(body: &JsonObject) -> Option<String> {
    MESSAGE_FIELDS
        .iter()
        .find_map(|field| body.get(*field).and_then(JsonValue::as_str))
        .map(str::to_string)
}
