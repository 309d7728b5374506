//! # Client
//!
//! Entry point: holds the transport and base URL, hands out one
//! [`QueryBuilder`] per table access.

mod config;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{Error, Result};
use crate::query::QueryBuilder;
use crate::router::RequestPlan;
use crate::schema::SchemaClient;
use crate::transport::{HttpTransport, Transport};
use crate::value::JsonValue;

pub use config::{ClientConfig, ENV_API_KEY, ENV_TIMEOUT_SECS, ENV_URL};

/// Classifies a non-2xx status and body
pub(crate) type Classifier = fn(u16, JsonValue) -> Error;

/// Service client
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Client {
    /// Create a client backed by [`HttpTransport`]
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config.base_url, Arc::new(transport)))
    }

    /// Create a client over any transport
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { transport, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a query against `table`
    pub fn from(&self, table: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(Arc::clone(&self.transport), self.base_url.clone(), table.into())
    }

    /// Schema management
    pub fn schema(&self) -> SchemaClient {
        SchemaClient::new(Arc::clone(&self.transport), self.base_url.clone())
    }
}

/// Send one plan and return the success body, or the classified error
pub(crate) async fn dispatch(
    transport: &dyn Transport,
    plan: RequestPlan,
    classify: Classifier,
) -> Result<JsonValue> {
    let request = plan.into_transport_request()?;
    let method = request.method;
    let url = request.url.clone();

    debug!(%method, %url, "sending request");
    let response = transport.send(request).await?;

    if response.is_success() {
        debug!(%method, %url, status = response.status, "request succeeded");
        return Ok(response.body);
    }

    let err = classify(response.status, response.body);
    warn!(%method, %url, status = response.status, code = err.kind().code(), "request failed: {}", err.message());
    Err(err)
}
