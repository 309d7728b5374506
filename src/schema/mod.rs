//! # Schema Management
//!
//! Privileged table creation and removal. These endpoints require a
//! service-role key, so a 403 is reported as `Permission` rather than
//! `Auth`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::dispatch;
use crate::errors::Result;
use crate::response::classify_privileged;
use crate::router::RequestPlan;
use crate::transport::{Method, Transport};
use crate::value::JsonValue;

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            primary_key: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as primary key (implies NOT NULL)
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}

/// Table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
}

/// Client for `/api/v2/schema`
pub struct SchemaClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl SchemaClient {
    pub(crate) fn new(transport: Arc<dyn Transport>, base_url: String) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// `POST /api/v2/schema/tables`
    pub async fn create_table(&self, table: &TableDefinition) -> Result<JsonValue> {
        let plan = RequestPlan {
            method: Method::Post,
            url: format!("{}/api/v2/schema/tables", self.base_url),
            query: Vec::new(),
            body: Some(JsonValue::from_serialize(table)?),
        };
        dispatch(self.transport.as_ref(), plan, classify_privileged).await
    }

    /// `DELETE /api/v2/schema/tables/{name}`
    pub async fn drop_table(&self, name: &str) -> Result<JsonValue> {
        let plan = RequestPlan {
            method: Method::Delete,
            url: format!(
                "{}/api/v2/schema/tables/{}",
                self.base_url,
                urlencoding::encode(name)
            ),
            query: Vec::new(),
            body: None,
        };
        dispatch(self.transport.as_ref(), plan, classify_privileged).await
    }
}
