//! aerodb-client - query builder and HTTP client for the AeroDB REST API
//!
//! Queries are composed on a [`QueryBuilder`] and sent by one terminal
//! call. The router picks the wire shape: simple queries go out as
//! `GET /api/v2/{table}` with query-string parameters, anything that
//! groups, filters groups, orders by several columns or uses a
//! list/range operator goes out as `POST /api/v2/{table}/query` with a
//! JSON body.
//!
//! ```no_run
//! use aerodb_client::{Client, ClientConfig, Direction};
//! use aerodb_client::value::JsonValue;
//!
//! # async fn demo() -> aerodb_client::Result<()> {
//! let client = Client::new(ClientConfig::with_base_url("http://localhost:54321"))?;
//! let rows = client
//!     .from("users")
//!     .select(["id", "name"])
//!     .gte("age", 21)
//!     .order("name", Direction::Asc)
//!     .limit(10)
//!     .execute::<JsonValue>()
//!     .await?;
//! println!("{} rows", rows.count);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod errors;
pub mod query;
pub mod response;
pub mod router;
pub mod schema;
pub mod transport;
pub mod value;

pub use client::{Client, ClientConfig};
pub use errors::{Error, ErrorKind, Result};
pub use query::{Direction, FilterExpression, FilterOp, LogicalOp, QueryBuilder, QueryState};
pub use response::QueryResponse;
pub use transport::{Transport, TransportRequest, TransportResponse};
pub use value::{JsonObject, JsonValue};
