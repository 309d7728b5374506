//! CLI module for the `aerodb-query` binary
//!
//! Builds one query from command-line arguments, then either prints the
//! rendered request (`--explain`) or runs it and prints the rows.

mod args;
mod commands;

pub use args::Cli;
pub use commands::{apply_args, parse_filter_arg, parse_order_arg, run, run_command};
