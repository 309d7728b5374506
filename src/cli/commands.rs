//! CLI command implementation

use std::path::Path;

use tracing::info;

use crate::client::{Client, ClientConfig};
use crate::errors::{Error, Result};
use crate::query::{Direction, FilterOp, LogicalOp, QueryBuilder};
use crate::response::QueryResponse;
use crate::router::RequestPlan;
use crate::value::{JsonObject, JsonValue};

use super::args::Cli;

/// Parse arguments and run
pub async fn run() -> Result<()> {
    run_command(Cli::parse_args()).await
}

/// Run one parsed invocation
pub async fn run_command(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let client = Client::new(config)?;

    let mut query = client.from(cli.table.as_str());
    apply_args(&mut query, &cli)?;

    if cli.explain {
        let plan = describe_plan(&query.plan())?;
        println!("{}", to_pretty(&plan)?);
        return Ok(());
    }

    let response: QueryResponse<JsonValue> = query.execute().await?;
    info!(table = %cli.table, rows = response.data.len(), count = response.count, "query complete");

    println!("{}", to_pretty(&JsonValue::Array(response.data))?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Apply parsed arguments to a builder
pub fn apply_args(query: &mut QueryBuilder, cli: &Cli) -> Result<()> {
    if !cli.select.is_empty() {
        query.select(cli.select.iter().map(String::as_str));
    }

    for raw in &cli.filters {
        let (column, op, value) = parse_filter_arg(raw)?;
        query.filter(column, op, value, LogicalOp::And);
    }

    if !cli.group_by.is_empty() {
        query.group_by(cli.group_by.iter().map(String::as_str));
    }

    // A single order stays on the query-string path
    match cli.orders.as_slice() {
        [] => {}
        [single] => {
            let (column, direction) = parse_order_arg(single)?;
            query.order(column, direction);
        }
        many => {
            for raw in many {
                let (column, direction) = parse_order_arg(raw)?;
                query.order_by(column, direction);
            }
        }
    }

    if let Some(limit) = cli.limit {
        query.limit(limit);
    }
    if let Some(offset) = cli.offset {
        query.offset(offset);
    }
    Ok(())
}

/// Parse `column.operator.value`
pub fn parse_filter_arg(raw: &str) -> Result<(String, FilterOp, JsonValue)> {
    let mut parts = raw.splitn(3, '.');
    let column = parts.next().filter(|c| !c.is_empty());
    let op = parts.next();

    let (Some(column), Some(op)) = (column, op) else {
        return Err(Error::config(format!(
            "Invalid filter '{}': expected column.operator.value",
            raw
        )));
    };

    let op: FilterOp = op.parse()?;
    let value = match parts.next() {
        Some(value) => parse_value(value),
        None if !op.takes_value() => JsonValue::Null,
        None => {
            return Err(Error::config(format!(
                "Invalid filter '{}': operator {} needs a value",
                raw, op
            )))
        }
    };

    Ok((column.to_string(), op, value))
}

/// Parse `column.direction`; direction defaults to ascending
pub fn parse_order_arg(raw: &str) -> Result<(String, Direction)> {
    match raw.rsplit_once('.') {
        Some((column, direction)) if !column.is_empty() => {
            Ok((column.to_string(), direction.parse()?))
        }
        _ if !raw.is_empty() => Ok((raw.to_string(), Direction::Asc)),
        _ => Err(Error::config("Order term cannot be empty")),
    }
}

/// Parse a literal: `(a,b)` list, null, bool, integer, float, else string
fn parse_value(raw: &str) -> JsonValue {
    if let Some(inner) = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return JsonValue::Array(
            inner
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(parse_value)
                .collect(),
        );
    }

    match raw {
        "null" => return JsonValue::Null,
        "true" => return JsonValue::Bool(true),
        "false" => return JsonValue::Bool(false),
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return JsonValue::from(n);
    }
    if let Ok(n) = raw.parse::<f64>() {
        if n.is_finite() {
            return JsonValue::from(n);
        }
    }

    JsonValue::from(raw)
}

fn describe_plan(plan: &RequestPlan) -> Result<JsonValue> {
    let mut out = JsonObject::new();
    out.insert("method".to_string(), JsonValue::from(plan.method.as_str()));
    out.insert("url".to_string(), JsonValue::from(plan.full_url()?));
    if let Some(body) = &plan.body {
        out.insert("body".to_string(), body.clone());
    }
    Ok(JsonValue::Object(out))
}

fn to_pretty(value: &JsonValue) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::encode(e.to_string()))
}
