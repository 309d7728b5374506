//! Query-string and JSON-body rendering

use crate::query::{FilterExpression, QueryState};
use crate::value::{JsonObject, JsonValue};

/// Render the simple-path query parameters.
///
/// Each filter becomes `column.operator.value`. The logical operator is
/// not part of the term, so OR filters render exactly like AND filters.
pub fn render_query_params(state: &QueryState) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(columns) = state.selected_columns() {
        if !columns.is_empty() {
            params.push(("select".to_string(), columns.join(",")));
        }
    }

    if !state.filters().is_empty() {
        let terms: Vec<String> = state
            .filters()
            .iter()
            .map(FilterExpression::to_param_term)
            .collect();
        params.push(("filter".to_string(), terms.join(",")));
    }

    if let Some(column) = state.order_column() {
        params.push(("order".to_string(), column.to_string()));
        if let Some(direction) = state.order_direction() {
            params.push(("order_direction".to_string(), direction.to_string()));
        }
    }

    if let Some(limit) = state.limit() {
        params.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = state.offset() {
        params.push(("offset".to_string(), offset.to_string()));
    }

    params
}

/// Render the advanced-path JSON body
pub fn render_query_body(state: &QueryState) -> JsonValue {
    let mut body = JsonObject::new();

    if let Some(columns) = state.selected_columns() {
        if !columns.is_empty() {
            body.insert("select".to_string(), string_array(columns));
        }
    }

    if !state.filters().is_empty() {
        body.insert("filters".to_string(), filters_to_wire(state.filters()));
    }

    if let Some(columns) = state.group_by() {
        if !columns.is_empty() {
            body.insert("group_by".to_string(), string_array(columns));
        }
    }

    if !state.having().is_empty() {
        let having = state.having().iter().map(|h| h.to_wire()).collect();
        body.insert("having".to_string(), JsonValue::Array(having));
    }

    match state.order_items() {
        Some(items) if !items.is_empty() => {
            let order = items.iter().map(|o| o.to_wire()).collect();
            body.insert("order_by".to_string(), JsonValue::Array(order));
        }
        _ => {
            if let Some(column) = state.order_column() {
                body.insert("order_by".to_string(), JsonValue::from(column));
                if let Some(direction) = state.order_direction() {
                    body.insert(
                        "order_direction".to_string(),
                        JsonValue::from(direction.as_str()),
                    );
                }
            }
        }
    }

    if let Some(limit) = state.limit() {
        body.insert("limit".to_string(), JsonValue::from(limit));
    }
    if let Some(offset) = state.offset() {
        body.insert("offset".to_string(), JsonValue::from(offset));
    }

    JsonValue::Object(body)
}

/// Filter array for JSON bodies
pub fn filters_to_wire(filters: &[FilterExpression]) -> JsonValue {
    JsonValue::Array(filters.iter().map(FilterExpression::to_wire).collect())
}

fn string_array(items: &[String]) -> JsonValue {
    JsonValue::Array(items.iter().map(|s| JsonValue::from(s.as_str())).collect())
}
