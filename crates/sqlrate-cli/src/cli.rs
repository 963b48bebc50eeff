//! sqlrate CLI - Rate SQL queries from their EXPLAIN plans
//!
//! Usage:
//!   sqlrate --query-file queries.sql [--container mariadb] [--db employees]
//!   sqlrate --query "SELECT * FROM employees WHERE gender = 'M'" --stdout
//!
//! Each query is executed and timed through the database client, its plan is
//! fetched with `EXPLAIN`, and the analysis is written as one text report per
//! query plus a Markdown summary.

mod args;
mod config;
mod logging;
mod mariadb;
mod run;

use args::Args;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Dropping the guard at the end of main flushes the log file
    let _log_guard = match logging::init(logging::LoggingConfig::for_verbosity(args.verbose)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    match run::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
