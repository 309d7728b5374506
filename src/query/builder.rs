//! # Query Builder
//!
//! Fluent, single-owner mutator over a [`QueryState`].
//!
//! Mutators only record state; nothing is sent until a terminal call
//! (`execute`, `create`, `update`, `delete`). Terminal calls read the
//! state but never clear it, so a second terminal call on the same
//! builder reuses every filter, order and limit set before.
//!
//! A builder must not be mutated from several tasks at once; it holds
//! no internal locking.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::filter::{FilterExpression, FilterOp, LogicalOp};
use super::state::QueryState;
use super::terms::{Direction, HavingSpec, OrderSpec};
use crate::client::dispatch;
use crate::errors::Result;
use crate::response::{classify, decode_response, QueryResponse};
use crate::router::{self, RequestPlan};
use crate::transport::Transport;
use crate::value::JsonValue;

/// Builds and runs queries against one table
pub struct QueryBuilder {
    transport: Arc<dyn Transport>,
    base_url: String,
    table: String,
    state: QueryState,
}

impl QueryBuilder {
    pub(crate) fn new(transport: Arc<dyn Transport>, base_url: String, table: String) -> Self {
        Self {
            transport,
            base_url,
            table,
            state: QueryState::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Accumulated state
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// The request `execute` would send, without sending it
    pub fn plan(&self) -> RequestPlan {
        router::plan_select(&self.base_url, &self.table, &self.state)
    }

    // ==================
    // Projection / Paging
    // ==================

    pub fn select<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.selected_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.state.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.state.offset = Some(offset);
        self
    }

    /// Inclusive row range: rows `from..=to`. An inverted range selects no rows.
    pub fn range(&mut self, from: u64, to: u64) -> &mut Self {
        self.state.offset = Some(from);
        self.state.limit = Some(match to.checked_sub(from) {
            Some(span) => span.saturating_add(1),
            None => 0,
        });
        self
    }

    // ==================
    // Filters
    // ==================

    /// Append an arbitrary filter
    pub fn filter(
        &mut self,
        column: impl Into<String>,
        operator: FilterOp,
        value: impl Into<JsonValue>,
        logical_op: LogicalOp,
    ) -> &mut Self {
        self.state
            .filters
            .push(FilterExpression::new(column, operator, value.into(), logical_op));
        self
    }

    /// Append a filter combined with OR
    pub fn or(
        &mut self,
        column: impl Into<String>,
        operator: FilterOp,
        value: impl Into<JsonValue>,
    ) -> &mut Self {
        self.filter(column, operator, value, LogicalOp::Or)
    }

    pub fn eq(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.filter(column, FilterOp::Eq, value, LogicalOp::And)
    }

    pub fn neq(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.filter(column, FilterOp::Neq, value, LogicalOp::And)
    }

    pub fn gt(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.filter(column, FilterOp::Gt, value, LogicalOp::And)
    }

    pub fn gte(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.filter(column, FilterOp::Gte, value, LogicalOp::And)
    }

    pub fn lt(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.filter(column, FilterOp::Lt, value, LogicalOp::And)
    }

    pub fn lte(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.filter(column, FilterOp::Lte, value, LogicalOp::And)
    }

    /// SQL LIKE pattern (`%` any run, `_` one char)
    pub fn like(&mut self, column: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.filter(column, FilterOp::Like, pattern.into(), LogicalOp::And)
    }

    pub fn is_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state
            .filters
            .push(FilterExpression::null_check(column, FilterOp::IsNull, LogicalOp::And));
        self
    }

    pub fn is_not_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state
            .filters
            .push(FilterExpression::null_check(column, FilterOp::IsNotNull, LogicalOp::And));
        self
    }

    pub fn in_list<I, V>(&mut self, column: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        let values = JsonValue::Array(values.into_iter().map(Into::into).collect());
        self.filter(column, FilterOp::In, values, LogicalOp::And)
    }

    pub fn not_in<I, V>(&mut self, column: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        let values = JsonValue::Array(values.into_iter().map(Into::into).collect());
        self.filter(column, FilterOp::NotIn, values, LogicalOp::And)
    }

    pub fn between(
        &mut self,
        column: impl Into<String>,
        min: impl Into<JsonValue>,
        max: impl Into<JsonValue>,
    ) -> &mut Self {
        let bounds = JsonValue::Array(vec![min.into(), max.into()]);
        self.filter(column, FilterOp::Between, bounds, LogicalOp::And)
    }

    pub fn not_between(
        &mut self,
        column: impl Into<String>,
        min: impl Into<JsonValue>,
        max: impl Into<JsonValue>,
    ) -> &mut Self {
        let bounds = JsonValue::Array(vec![min.into(), max.into()]);
        self.filter(column, FilterOp::NotBetween, bounds, LogicalOp::And)
    }

    // ==================
    // Grouping / Ordering
    // ==================

    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.group_by = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn having(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> &mut Self {
        self.state
            .having
            .push(HavingSpec::new(column, operator, value.into()));
        self
    }

    /// Set the single legacy order column, replacing any previous one
    pub fn order(&mut self, column: impl Into<String>, direction: Direction) -> &mut Self {
        self.state.order_column = Some(column.into());
        self.state.order_direction = Some(direction);
        self
    }

    /// Append an order item; takes precedence over [`order`](Self::order)
    pub fn order_by(&mut self, column: impl Into<String>, direction: Direction) -> &mut Self {
        self.state
            .order_items
            .get_or_insert_with(Vec::new)
            .push(OrderSpec::new(column, direction));
        self
    }

    // ==================
    // Terminal Operations
    // ==================

    /// Run the query
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<QueryResponse<T>> {
        self.send(self.plan()).await
    }

    /// Insert `record`
    pub async fn create<T, R>(&self, record: &R) -> Result<QueryResponse<T>>
    where
        T: DeserializeOwned,
        R: Serialize + ?Sized,
    {
        let record = JsonValue::from_serialize(record)?;
        self.send(router::plan_create(&self.base_url, &self.table, record))
            .await
    }

    /// Update rows matching the current filters with `record`
    pub async fn update<T, R>(&self, record: &R) -> Result<QueryResponse<T>>
    where
        T: DeserializeOwned,
        R: Serialize + ?Sized,
    {
        let record = JsonValue::from_serialize(record)?;
        self.send(router::plan_update(&self.base_url, &self.table, record, &self.state))
            .await
    }

    /// Delete rows matching the current filters
    pub async fn delete<T: DeserializeOwned>(&self) -> Result<QueryResponse<T>> {
        self.send(router::plan_delete(&self.base_url, &self.table, &self.state))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, plan: RequestPlan) -> Result<QueryResponse<T>> {
        let body = dispatch(self.transport.as_ref(), plan, classify).await?;
        decode_response(body)
    }
}
