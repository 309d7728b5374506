//! # Response Handling
//!
//! Turns raw service responses into typed results or classified errors.

mod classifier;
mod decoder;

pub use classifier::{classify, classify_privileged, PERMISSION_REMEDIATION};
pub use decoder::{decode_response, QueryResponse};
