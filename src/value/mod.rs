//! # JSON Value Model
//!
//! Closed representation of every JSON cell exchanged with the service:
//! filter values, record fields, response bodies and error bodies.
//!
//! Objects keep insertion order so that request bodies serialize in a
//! stable, predictable key order.

mod codec;
mod json;

pub use codec::{decode, encode};
pub use json::{JsonNumber, JsonObject, JsonValue};
