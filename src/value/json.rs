//! JsonValue and conversions

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result};

/// Ordered JSON object
pub type JsonObject = IndexMap<String, JsonValue>;

/// JSON number, kept integral when the token had no fraction or exponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    Int(i64),
    Float(f64),
}

impl JsonNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Int(i) => *i as f64,
            JsonNumber::Float(f) => *f,
        }
    }

    /// Integral value, if representable without loss
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonNumber::Int(i) => Some(*i),
            JsonNumber::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(*f as i64)
            }
            JsonNumber::Float(_) => None,
        }
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Int(i) => write!(f, "{}", i),
            JsonNumber::Float(v) => write!(f, "{}", v),
        }
    }
}

/// A JSON value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonObject),
}

impl JsonValue {
    /// Convert any serializable value into a JsonValue
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(JsonValue::from)
            .map_err(|e| Error::encode(format!("Unsupported value: {}", e)))
    }

    /// Deserialize this value into a typed record
    pub fn deserialize_into<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(serde_json::Value::from(self))
            .map_err(|e| Error::decode(e.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Look up a key on an object value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Textual form used in query-string filter terms.
    ///
    /// Strings are emitted raw, numbers without quoting or a trailing
    /// `.0`, and containers as compact JSON.
    pub fn to_param_string(&self) -> String {
        match self {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null => "null".to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Array(_) | JsonValue::Object(_) => self.to_string(),
        }
    }
}

/// Compact JSON form
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(JsonNumber::Int(i)) => serializer.serialize_i64(*i),
            JsonValue::Number(JsonNumber::Float(f)) => serializer.serialize_f64(*f),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => items.serialize(serializer),
            JsonValue::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, number, string, array, object or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Number(JsonNumber::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Number(match i64::try_from(v) {
            Ok(i) => JsonNumber::Int(i),
            Err(_) => JsonNumber::Float(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Number(JsonNumber::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<JsonValue, D::Error> {
        JsonValue::deserialize(d)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<JsonValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<JsonValue, A::Error> {
        let mut map = JsonObject::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, JsonValue>()? {
            map.insert(key, value);
        }
        Ok(JsonValue::Object(map))
    }
}

// ==================
// Conversions
// ==================

impl From<bool> for JsonValue {
    fn from(v: bool) -> Self {
        JsonValue::Bool(v)
    }
}

impl From<i32> for JsonValue {
    fn from(v: i32) -> Self {
        JsonValue::Number(JsonNumber::Int(v.into()))
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue::Number(JsonNumber::Int(v))
    }
}

impl From<u32> for JsonValue {
    fn from(v: u32) -> Self {
        JsonValue::Number(JsonNumber::Int(v.into()))
    }
}

impl From<u64> for JsonValue {
    fn from(v: u64) -> Self {
        JsonValue::Number(match i64::try_from(v) {
            Ok(i) => JsonNumber::Int(i),
            Err(_) => JsonNumber::Float(v as f64),
        })
    }
}

impl From<f64> for JsonValue {
    fn from(v: f64) -> Self {
        JsonValue::Number(JsonNumber::Float(v))
    }
}

impl From<&str> for JsonValue {
    fn from(v: &str) -> Self {
        JsonValue::String(v.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(v: String) -> Self {
        JsonValue::String(v)
    }
}

impl<T: Into<JsonValue>> From<Vec<T>> for JsonValue {
    fn from(v: Vec<T>) -> Self {
        JsonValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(JsonValue::Null, Into::into)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(v: JsonObject) -> Self {
        JsonValue::Object(v)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => JsonValue::Number(JsonNumber::Int(i)),
                None => n
                    .as_f64()
                    .map_or(JsonValue::Null, |f| JsonValue::Number(JsonNumber::Float(f))),
            },
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(b) => serde_json::Value::Bool(b),
            JsonValue::Number(JsonNumber::Int(i)) => serde_json::Value::Number(i.into()),
            JsonValue::Number(JsonNumber::Float(f)) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            JsonValue::String(s) => serde_json::Value::String(s),
            JsonValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            JsonValue::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_serialize_keeps_field_order() {
        #[derive(Serialize)]
        struct Row {
            zeta: i32,
            alpha: &'static str,
            mid: bool,
        }

        let value = JsonValue::from_serialize(&Row { zeta: 1, alpha: "a", mid: true }).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(value.to_string(), r#"{"zeta":1,"alpha":"a","mid":true}"#);
    }

    #[test]
    fn test_param_string_numbers() {
        assert_eq!(JsonValue::from(1).to_param_string(), "1");
        assert_eq!(JsonValue::from(2.0).to_param_string(), "2");
        assert_eq!(JsonValue::from(2.5).to_param_string(), "2.5");
        assert_eq!(JsonValue::from(-7i64).to_param_string(), "-7");
    }

    #[test]
    fn test_param_string_other_kinds() {
        assert_eq!(JsonValue::from("Alice").to_param_string(), "Alice");
        assert_eq!(JsonValue::Null.to_param_string(), "null");
        assert_eq!(JsonValue::from(true).to_param_string(), "true");
        assert_eq!(
            JsonValue::from(vec![1, 2]).to_param_string(),
            "[1,2]"
        );
    }

    #[test]
    fn test_from_serde_json_keeps_integers() {
        let value = JsonValue::from(json!({"a": 1, "b": 1.5, "c": [true, null]}));
        assert_eq!(value.get("a"), Some(&JsonValue::Number(JsonNumber::Int(1))));
        assert_eq!(value.get("b"), Some(&JsonValue::Number(JsonNumber::Float(1.5))));
        assert_eq!(
            value.get("c"),
            Some(&JsonValue::Array(vec![JsonValue::Bool(true), JsonValue::Null]))
        );
    }

    #[test]
    fn test_from_serialize_rejects_non_string_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1u8], "x");

        let err = JsonValue::from_serialize(&map).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Encode);
    }

    #[test]
    fn test_deserialize_into_record() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct User {
            id: i64,
            name: String,
        }

        let value = JsonValue::from(json!({"id": 7, "name": "Ada"}));
        let user: User = value.deserialize_into().unwrap();
        assert_eq!(user, User { id: 7, name: "Ada".to_string() });
    }

    #[test]
    fn test_deserialize_into_mismatch_is_decode_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct User {
            id: i64,
        }

        let err = JsonValue::from("nope").deserialize_into::<User>().unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Decode);
    }

    #[test]
    fn test_as_i64_on_integral_float() {
        assert_eq!(JsonNumber::Float(3.0).as_i64(), Some(3));
        assert_eq!(JsonNumber::Float(3.5).as_i64(), None);
    }
}
