//! # Transport
//!
//! The single outbound capability the query core depends on: send one
//! request, get back a status and a parsed JSON body.
//!
//! Non-2xx responses are returned as ordinary responses so that status
//! classification stays in [`crate::response`]. Only a failure to
//! complete the exchange is an error (`Network`).

mod http;

use async_trait::async_trait;

use crate::errors::Result;
use crate::value::JsonValue;

pub use http::HttpTransport;

/// HTTP methods used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request with a fully rendered URL
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<JsonValue>,
}

/// Raw response, any status
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: JsonValue,
}

impl TransportResponse {
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the service
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}
