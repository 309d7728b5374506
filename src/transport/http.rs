//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use super::{Method, Transport, TransportRequest, TransportResponse};
use crate::client::ClientConfig;
use crate::errors::{Error, Result};
use crate::value::{self, JsonValue};

/// Transport over a pooled reqwest client
pub struct HttpTransport {
    client: Client,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(value::encode(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::network(format!("{} {} failed: {}", request.method, request.url, e)))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read response body: {}", e)))?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            JsonValue::Null
        } else {
            match value::decode(&bytes) {
                Ok(body) => body,
                // Error pages are often HTML; classify by status instead.
                Err(_) if !(200..300).contains(&status) => JsonValue::Null,
                Err(e) => return Err(e),
            }
        };

        Ok(TransportResponse::new(status, body))
    }
}
