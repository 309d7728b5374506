//! # Request Router
//!
//! Chooses the wire shape for a query and renders it.
//!
//! - Simple path: `GET {base}/api/v2/{table}` with query-string params
//! - Advanced path: `POST {base}/api/v2/{table}/query` with a JSON body
//!
//! The advanced path is used iff the state groups, filters on groups,
//! orders by more than the legacy single column, or uses a list/range
//! operator. Mutations always send JSON bodies to the table endpoint.

mod render;

use crate::errors::{Error, Result};
use crate::query::QueryState;
use crate::transport::{Method, TransportRequest};
use crate::value::{JsonObject, JsonValue};

pub use render::{filters_to_wire, render_query_body, render_query_params};

/// A fully rendered request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub method: Method,
    /// Target URL without query string
    pub url: String,
    /// Query-string parameters in render order
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl RequestPlan {
    /// URL with query parameters percent-encoded
    pub fn full_url(&self) -> Result<String> {
        if self.query.is_empty() {
            return Ok(self.url.clone());
        }

        let mut url = url::Url::parse(&self.url)
            .map_err(|e| Error::network(format!("Invalid URL {}: {}", self.url, e)))?;
        url.query_pairs_mut().extend_pairs(&self.query);
        Ok(url.into())
    }

    /// Look up a rendered query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn into_transport_request(self) -> Result<TransportRequest> {
        Ok(TransportRequest {
            method: self.method,
            url: self.full_url()?,
            body: self.body,
        })
    }
}

/// True when the state needs the JSON-body query endpoint
pub fn is_advanced(state: &QueryState) -> bool {
    state.group_by().is_some_and(|cols| !cols.is_empty())
        || !state.having().is_empty()
        || state.order_items().is_some_and(|items| !items.is_empty())
        || state.filters().iter().any(|f| f.operator().is_advanced())
}

/// The table name is one percent-encoded path segment
fn table_url(base_url: &str, table: &str) -> String {
    format!(
        "{}/api/v2/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(table)
    )
}

/// Plan a read
pub fn plan_select(base_url: &str, table: &str, state: &QueryState) -> RequestPlan {
    if is_advanced(state) {
        RequestPlan {
            method: Method::Post,
            url: format!("{}/query", table_url(base_url, table)),
            query: Vec::new(),
            body: Some(render_query_body(state)),
        }
    } else {
        RequestPlan {
            method: Method::Get,
            url: table_url(base_url, table),
            query: render_query_params(state),
            body: None,
        }
    }
}

/// Plan an insert; the body is the record itself
pub fn plan_create(base_url: &str, table: &str, record: JsonValue) -> RequestPlan {
    RequestPlan {
        method: Method::Post,
        url: table_url(base_url, table),
        query: Vec::new(),
        body: Some(record),
    }
}

/// Plan an update: `{data, filters?}`
pub fn plan_update(base_url: &str, table: &str, record: JsonValue, state: &QueryState) -> RequestPlan {
    let mut body = JsonObject::new();
    body.insert("data".to_string(), record);
    if !state.filters().is_empty() {
        body.insert("filters".to_string(), filters_to_wire(state.filters()));
    }

    RequestPlan {
        method: Method::Patch,
        url: table_url(base_url, table),
        query: Vec::new(),
        body: Some(JsonValue::Object(body)),
    }
}

/// Plan a delete: `{filters?}`
pub fn plan_delete(base_url: &str, table: &str, state: &QueryState) -> RequestPlan {
    let mut body = JsonObject::new();
    if !state.filters().is_empty() {
        body.insert("filters".to_string(), filters_to_wire(state.filters()));
    }

    RequestPlan {
        method: Method::Delete,
        url: table_url(base_url, table),
        query: Vec::new(),
        body: Some(JsonValue::Object(body)),
    }
}
