//! Success response decoding

use serde::de::DeserializeOwned;

use crate::errors::{Error, Result};
use crate::value::{JsonNumber, JsonValue};

/// Rows returned by a query or mutation
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
    pub total: Option<u64>,
    pub error: Option<String>,
}

impl<T> QueryResponse<T> {
    /// No rows
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            count: 0,
            total: None,
            error: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First row, if any
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }
}

/// Decode a `{data?, count?, total?, error?}` body.
///
/// A missing or non-array `data` means "no rows" and yields an empty
/// response with `count = 0` regardless of any `count` in the body.
/// A row that does not match `T` fails the whole decode.
pub fn decode_response<T: DeserializeOwned>(body: JsonValue) -> Result<QueryResponse<T>> {
    let JsonValue::Object(mut map) = body else {
        return Ok(QueryResponse::empty());
    };

    let total = map.get("total").and_then(as_count).map(|n| n as u64);
    let error = map.get("error").and_then(|e| match e {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    });

    let rows = match map.shift_remove("data") {
        Some(JsonValue::Array(rows)) => rows,
        _ => {
            return Ok(QueryResponse {
                total,
                error,
                ..QueryResponse::empty()
            })
        }
    };

    let count = map.get("count").and_then(as_count).unwrap_or(rows.len());

    let data = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            row.deserialize_into::<T>()
                .map_err(|e| Error::decode(format!("Row {}: {}", index, e.message())))
        })
        .collect::<Result<Vec<T>>>()?;

    Ok(QueryResponse {
        data,
        count,
        total,
        error,
    })
}

fn as_count(value: &JsonValue) -> Option<usize> {
    match value {
        JsonValue::Number(JsonNumber::Int(i)) => usize::try_from(*i).ok(),
        JsonValue::Number(JsonNumber::Float(f)) if f.is_finite() && *f >= 0.0 => Some(*f as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    fn body(v: serde_json::Value) -> JsonValue {
        JsonValue::from(v)
    }

    #[test]
    fn test_decodes_rows_and_metadata() {
        let response: QueryResponse<Row> =
            decode_response(body(json!({"data": [{"id": 1}, {"id": 2}], "count": 2, "total": 10})))
                .unwrap();

        assert_eq!(response.data, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(response.count, 2);
        assert_eq!(response.total, Some(10));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_count_defaults_to_row_count() {
        let response: QueryResponse<Row> =
            decode_response(body(json!({"data": [{"id": 1}], "count": "many"}))).unwrap();
        assert_eq!(response.count, 1);

        let response: QueryResponse<Row> =
            decode_response(body(json!({"data": [{"id": 1}, {"id": 3}]}))).unwrap();
        assert_eq!(response.count, 2);
    }

    #[test]
    fn test_missing_data_is_no_rows() {
        let response: QueryResponse<Row> = decode_response(body(json!({"count": 5}))).unwrap();
        assert!(response.is_empty());
        assert_eq!(response.count, 0);

        let response: QueryResponse<Row> =
            decode_response(body(json!({"data": {"id": 1}, "count": 1}))).unwrap();
        assert!(response.is_empty());
        assert_eq!(response.count, 0);
    }

    #[test]
    fn test_non_object_body_is_no_rows() {
        let response: QueryResponse<Row> = decode_response(JsonValue::Null).unwrap();
        assert_eq!(response, QueryResponse::empty());
    }

    #[test]
    fn test_error_field_passes_through() {
        let response: QueryResponse<Row> =
            decode_response(body(json!({"data": [], "error": "partial"}))).unwrap();
        assert_eq!(response.error.as_deref(), Some("partial"));
    }

    #[test]
    fn test_bad_row_is_decode_error() {
        let err = decode_response::<Row>(body(json!({"data": [{"id": 1}, {"id": "two"}]})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.message().starts_with("Row 1:"));
    }
}
