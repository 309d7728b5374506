//! # Client Errors
//!
//! A single error type shared by every layer of the client. Callers
//! branch on [`ErrorKind`] and inspect the status code and the raw
//! error body returned by the service.

use std::fmt;

use thiserror::Error;

use crate::value::JsonObject;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // ==================
    // Value Errors
    // ==================
    /// Value cannot be represented as JSON
    Encode,
    /// Bytes are not a valid JSON document
    MalformedValue,
    /// Response data does not match the requested record type
    Decode,

    // ==================
    // Service Errors (non-2xx)
    // ==================
    /// 401 / 403
    Auth,
    /// 404
    NotFound,
    /// 429
    RateLimit,
    /// 403 from a privileged schema endpoint
    Permission,
    /// Any other non-2xx status
    Api,

    // ==================
    // Local Errors
    // ==================
    /// The transport could not complete the exchange
    Network,
    /// Invalid configuration or command-line arguments
    Config,
}

impl ErrorKind {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Encode => "AERO_CLIENT_ENCODE",
            ErrorKind::MalformedValue => "AERO_CLIENT_MALFORMED_VALUE",
            ErrorKind::Decode => "AERO_CLIENT_DECODE",
            ErrorKind::Auth => "AERO_CLIENT_AUTH",
            ErrorKind::NotFound => "AERO_CLIENT_NOT_FOUND",
            ErrorKind::RateLimit => "AERO_CLIENT_RATE_LIMIT",
            ErrorKind::Permission => "AERO_CLIENT_PERMISSION",
            ErrorKind::Api => "AERO_CLIENT_API",
            ErrorKind::Network => "AERO_CLIENT_NETWORK",
            ErrorKind::Config => "AERO_CLIENT_CONFIG",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Client error with the service's status and body preserved
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    body: JsonObject,
}

impl Error {
    /// Create an error without HTTP context
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: JsonObject::new(),
        }
    }

    /// Create an error from a non-2xx response
    pub fn http(kind: ErrorKind, status: u16, message: impl Into<String>, body: JsonObject) -> Self {
        Self {
            kind,
            message: message.into(),
            status: Some(status),
            body,
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    pub fn malformed_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedValue, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, present only for service errors
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Parsed error body (empty when the service sent none)
    pub fn body(&self) -> &JsonObject {
        &self.body
    }

    /// True for 4xx responses
    pub fn is_client_error(&self) -> bool {
        matches!(self.status, Some(400..=499))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsonValue;

    #[test]
    fn test_display_includes_code() {
        let err = Error::network("connection refused");
        assert_eq!(err.to_string(), "AERO_CLIENT_NETWORK: connection refused");
        assert_eq!(err.status(), None);
        assert!(err.body().is_empty());
    }

    #[test]
    fn test_http_error_keeps_body() {
        let mut body = JsonObject::new();
        body.insert("error".to_string(), JsonValue::from("slow down"));

        let err = Error::http(ErrorKind::RateLimit, 429, "slow down", body);
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.body().get("error"), Some(&JsonValue::from("slow down")));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_server_error_is_not_client_error() {
        let err = Error::http(ErrorKind::Api, 503, "unavailable", JsonObject::new());
        assert!(!err.is_client_error());
    }
}
