//! # Query Construction
//!
//! Filter/order/having vocabulary, the accumulated query state, and the
//! fluent builder that owns it.

pub mod builder;
pub mod filter;
pub mod state;
pub mod terms;

pub use builder::QueryBuilder;
pub use filter::{FilterExpression, FilterOp, LogicalOp};
pub use state::QueryState;
pub use terms::{Direction, HavingSpec, OrderSpec};
