//! Command-line arguments

use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub const DEFAULT_QUERY_FILE: &str = "employees/req_employees.sql";
pub const DEFAULT_REPORT_DIR: &str = "reports/explain_reports";
pub const DEFAULT_REPORT_FILE: &str = "reports/performance_report.md";

#[derive(Debug, Parser)]
#[command(name = "sqlrate")]
#[command(about = "Generate SQL performance and EXPLAIN reports")]
#[command(version)]
pub struct Args {
    /// Path to a file of `;`-separated queries
    #[arg(long, default_value = DEFAULT_QUERY_FILE)]
    pub query_file: PathBuf,

    /// Analyze a single query instead of a file
    #[arg(long)]
    pub query: Option<String>,

    /// Docker container running the database
    #[arg(long, env = "SQLRATE_CONTAINER")]
    pub container: Option<String>,

    /// Database host
    #[arg(long, env = "SQLRATE_HOST")]
    pub host: Option<String>,

    /// Database port
    #[arg(long, env = "SQLRATE_PORT")]
    pub port: Option<u16>,

    /// Database user
    #[arg(long, env = "SQLRATE_USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "SQLRATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long)]
    pub db: Option<String>,

    /// Database client binary
    #[arg(long)]
    pub client: Option<String>,

    /// Directory for the per-query reports
    #[arg(long, default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Path of the Markdown summary
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_file: PathBuf,

    /// Print the analysis to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Deduct two points above the very slow threshold instead of one
    #[arg(long)]
    pub tiered_latency: bool,

    /// JSON configuration file with `connection` and `analyzer` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
