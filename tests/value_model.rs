//! JsonValue Codec Tests
//!
//! encode/decode are mutual inverses for every value built from the six
//! JSON kinds, at any nesting depth, including empty containers.

use aerodb_client::value::{decode, encode, JsonNumber, JsonObject, JsonValue};
use aerodb_client::ErrorKind;

fn obj(entries: Vec<(&str, JsonValue)>) -> JsonValue {
    JsonValue::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<JsonObject>(),
    )
}

fn round_trip(value: &JsonValue) -> JsonValue {
    decode(&encode(value).unwrap()).unwrap()
}

#[test]
fn test_scalars_round_trip() {
    let values = [
        JsonValue::Null,
        JsonValue::Bool(true),
        JsonValue::Bool(false),
        JsonValue::Number(JsonNumber::Int(0)),
        JsonValue::Number(JsonNumber::Int(i64::MIN)),
        JsonValue::Number(JsonNumber::Int(i64::MAX)),
        JsonValue::Number(JsonNumber::Float(-0.5)),
        JsonValue::Number(JsonNumber::Float(1e-7)),
        JsonValue::Number(JsonNumber::Float(3.0)),
        JsonValue::String(String::new()),
        JsonValue::String("quote \" backslash \\ newline \n unicode é ✓".to_string()),
    ];

    for value in &values {
        assert_eq!(&round_trip(value), value, "round trip of {}", value);
    }
}

#[test]
fn test_empty_containers_round_trip() {
    let value = JsonValue::Array(vec![
        JsonValue::Array(vec![]),
        JsonValue::Object(JsonObject::new()),
        obj(vec![("", JsonValue::String(String::new()))]),
    ]);
    assert_eq!(round_trip(&value), value);
}

#[test]
fn test_deep_nesting_round_trips() {
    let mut value = JsonValue::from("leaf");
    for depth in 0..60 {
        value = if depth % 2 == 0 {
            JsonValue::Array(vec![value, JsonValue::from(depth)])
        } else {
            obj(vec![("child", value), ("depth", JsonValue::from(depth))])
        };
    }
    assert_eq!(round_trip(&value), value);
}

#[test]
fn test_object_order_is_stable() {
    let value = obj(vec![
        ("zeta", JsonValue::from(1)),
        ("alpha", JsonValue::from(2)),
        ("mid", JsonValue::from(3)),
    ]);

    let bytes = encode(&value).unwrap();
    assert_eq!(bytes, br#"{"zeta":1,"alpha":2,"mid":3}"#.to_vec());

    let keys: Vec<String> = round_trip(&value)
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_integers_and_floats_stay_distinct() {
    assert_eq!(decode(b"[1, 1.0, 1e0]").unwrap(), JsonValue::Array(vec![
        JsonValue::Number(JsonNumber::Int(1)),
        JsonValue::Number(JsonNumber::Float(1.0)),
        JsonValue::Number(JsonNumber::Float(1.0)),
    ]));
}

#[test]
fn test_malformed_input() {
    let inputs: [&[u8]; 6] = [b"", b"{", b"[1,]", b"'single'", b"nul", b"1 2"];
    for input in inputs {
        let err = decode(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedValue);
    }
}

#[test]
fn test_non_finite_float_fails_to_encode() {
    let value = obj(vec![("ratio", JsonValue::from(f64::NEG_INFINITY))]);
    assert_eq!(encode(&value).unwrap_err().kind(), ErrorKind::Encode);
}
