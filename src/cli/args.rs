//! CLI argument definitions using clap
//!
//! aerodb-query <table> [--select a,b] [--filter col.op.value]...
//!     [--order col.dir]... [--group-by a,b] [--limit N] [--offset N]
//!     [--config path] [--explain]

use clap::Parser;
use std::path::PathBuf;

/// Query an AeroDB table over the REST API
#[derive(Parser, Debug)]
#[command(name = "aerodb-query")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Table to query
    pub table: String,

    /// Columns to return (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Filter term `column.operator.value`; lists as `(a,b,c)`
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Order term `column.asc|desc`; repeat for multi-column order
    #[arg(long = "order")]
    pub orders: Vec<String>,

    /// Columns to group by (comma-separated)
    #[arg(long = "group-by", value_delimiter = ',')]
    pub group_by: Vec<String>,

    /// Maximum number of rows
    #[arg(long)]
    pub limit: Option<u64>,

    /// Number of rows to skip
    #[arg(long)]
    pub offset: Option<u64>,

    /// Path to a JSON configuration file (AERODB_* variables override it)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the request that would be sent and exit
    #[arg(long)]
    pub explain: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
