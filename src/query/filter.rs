//! # Filter Expression
//!
//! One column/operator/value/logical-operator term of a query predicate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::value::{JsonObject, JsonValue};

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    /// Equals
    #[serde(rename = "eq")]
    Eq,

    /// Not equals
    #[serde(rename = "neq")]
    Neq,

    /// Greater than
    #[serde(rename = "gt")]
    Gt,

    /// Greater than or equal
    #[serde(rename = "gte")]
    Gte,

    /// Less than
    #[serde(rename = "lt")]
    Lt,

    /// Less than or equal
    #[serde(rename = "lte")]
    Lte,

    /// Pattern match (LIKE)
    #[serde(rename = "like")]
    Like,

    /// Column is null
    #[serde(rename = "isNull")]
    IsNull,

    /// Column is not null
    #[serde(rename = "isNotNull")]
    IsNotNull,

    /// Value in list
    #[serde(rename = "in")]
    In,

    /// Value not in list
    #[serde(rename = "notIn")]
    NotIn,

    /// Inclusive range `[min, max]`
    #[serde(rename = "between")]
    Between,

    /// Outside inclusive range `[min, max]`
    #[serde(rename = "notBetween")]
    NotBetween,
}

impl FilterOp {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Like => "like",
            FilterOp::IsNull => "isNull",
            FilterOp::IsNotNull => "isNotNull",
            FilterOp::In => "in",
            FilterOp::NotIn => "notIn",
            FilterOp::Between => "between",
            FilterOp::NotBetween => "notBetween",
        }
    }

    /// Operators the query-string form cannot express
    pub fn is_advanced(&self) -> bool {
        matches!(
            self,
            FilterOp::In | FilterOp::NotIn | FilterOp::Between | FilterOp::NotBetween
        )
    }

    /// False for the null checks, which carry no operand
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOp::IsNull | FilterOp::IsNotNull)
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "eq" => FilterOp::Eq,
            "neq" => FilterOp::Neq,
            "gt" => FilterOp::Gt,
            "gte" => FilterOp::Gte,
            "lt" => FilterOp::Lt,
            "lte" => FilterOp::Lte,
            "like" => FilterOp::Like,
            "isNull" => FilterOp::IsNull,
            "isNotNull" => FilterOp::IsNotNull,
            "in" => FilterOp::In,
            "notIn" => FilterOp::NotIn,
            "between" => FilterOp::Between,
            "notBetween" => FilterOp::NotBetween,
            other => return Err(Error::config(format!("Unknown filter operator: {}", other))),
        })
    }
}

/// How a filter combines with the ones before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalOp {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpression {
    column: String,
    operator: FilterOp,
    value: Option<JsonValue>,
    logical_op: LogicalOp,
}

impl FilterExpression {
    /// Create a new filter expression.
    ///
    /// The value is dropped for `isNull`/`isNotNull`.
    pub fn new(
        column: impl Into<String>,
        operator: FilterOp,
        value: JsonValue,
        logical_op: LogicalOp,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: operator.takes_value().then_some(value),
            logical_op,
        }
    }

    /// Create a null check (`isNull` / `isNotNull`)
    pub fn null_check(column: impl Into<String>, operator: FilterOp, logical_op: LogicalOp) -> Self {
        Self::new(column, operator, JsonValue::Null, logical_op)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> FilterOp {
        self.operator
    }

    pub fn value(&self) -> Option<&JsonValue> {
        self.value.as_ref()
    }

    pub fn logical_op(&self) -> LogicalOp {
        self.logical_op
    }

    /// Query-string term `column.operator.value`
    pub fn to_param_term(&self) -> String {
        let value = self
            .value
            .as_ref()
            .map(JsonValue::to_param_string)
            .unwrap_or_default();
        format!("{}.{}.{}", self.column, self.operator, value)
    }

    /// JSON body element `{column, operator, value, logical_op}`
    pub fn to_wire(&self) -> JsonValue {
        let mut obj = JsonObject::new();
        obj.insert("column".to_string(), JsonValue::from(self.column.as_str()));
        obj.insert("operator".to_string(), JsonValue::from(self.operator.as_str()));
        obj.insert("value".to_string(), self.value.clone().unwrap_or_default());
        obj.insert("logical_op".to_string(), JsonValue::from(self.logical_op.as_str()));
        JsonValue::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_term() {
        let filter = FilterExpression::new("age", FilterOp::Gt, JsonValue::from(18), LogicalOp::And);
        assert_eq!(filter.to_param_term(), "age.gt.18");

        let filter =
            FilterExpression::new("name", FilterOp::Like, JsonValue::from("%son"), LogicalOp::Or);
        assert_eq!(filter.to_param_term(), "name.like.%son");
    }

    #[test]
    fn test_null_check_has_no_value() {
        let filter = FilterExpression::null_check("deleted_at", FilterOp::IsNull, LogicalOp::And);
        assert_eq!(filter.value(), None);
        assert_eq!(filter.to_param_term(), "deleted_at.isNull.");

        let filter =
            FilterExpression::new("x", FilterOp::IsNotNull, JsonValue::from(5), LogicalOp::And);
        assert_eq!(filter.value(), None);
    }

    #[test]
    fn test_wire_shape() {
        let filter = FilterExpression::new(
            "status",
            FilterOp::In,
            JsonValue::from(vec!["active", "pending"]),
            LogicalOp::Or,
        );

        let wire = filter.to_wire();
        assert_eq!(wire.to_string(), r#"{"column":"status","operator":"in","value":["active","pending"],"logical_op":"OR"}"#);
    }

    #[test]
    fn test_advanced_operators() {
        assert!(FilterOp::In.is_advanced());
        assert!(FilterOp::NotIn.is_advanced());
        assert!(FilterOp::Between.is_advanced());
        assert!(FilterOp::NotBetween.is_advanced());
        assert!(!FilterOp::Eq.is_advanced());
        assert!(!FilterOp::Like.is_advanced());
        assert!(!FilterOp::IsNull.is_advanced());
    }

    #[test]
    fn test_operator_parse() {
        assert_eq!("notBetween".parse::<FilterOp>().unwrap(), FilterOp::NotBetween);
        assert_eq!("isNull".parse::<FilterOp>().unwrap(), FilterOp::IsNull);
        assert!("is".parse::<FilterOp>().is_err());
    }
}
