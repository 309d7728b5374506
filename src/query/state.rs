//! # Query State
//!
//! Everything a builder has accumulated for one table. Owned by exactly
//! one [`QueryBuilder`](super::QueryBuilder) and never cleared by a
//! terminal call.

use super::filter::FilterExpression;
use super::terms::{Direction, HavingSpec, OrderSpec};

/// Accumulated query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub(crate) selected_columns: Option<Vec<String>>,
    pub(crate) filters: Vec<FilterExpression>,
    pub(crate) group_by: Option<Vec<String>>,
    pub(crate) having: Vec<HavingSpec>,
    pub(crate) order_column: Option<String>,
    pub(crate) order_direction: Option<Direction>,
    pub(crate) order_items: Option<Vec<OrderSpec>>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to select (None = all)
    pub fn selected_columns(&self) -> Option<&[String]> {
        self.selected_columns.as_deref()
    }

    /// Filters in insertion order
    pub fn filters(&self) -> &[FilterExpression] {
        &self.filters
    }

    pub fn group_by(&self) -> Option<&[String]> {
        self.group_by.as_deref()
    }

    pub fn having(&self) -> &[HavingSpec] {
        &self.having
    }

    /// Legacy single order column
    pub fn order_column(&self) -> Option<&str> {
        self.order_column.as_deref()
    }

    pub fn order_direction(&self) -> Option<Direction> {
        self.order_direction
    }

    /// Multi-column order; wins over the legacy pair when both are set
    pub fn order_items(&self) -> Option<&[OrderSpec]> {
        self.order_items.as_deref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }
}
