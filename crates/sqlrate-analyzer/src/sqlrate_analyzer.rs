//! sqlrate Analyzer - EXPLAIN plan analysis and query rating
//!
//! This crate provides functionality for:
//! - Parsing tabular EXPLAIN output into the tables a query touches
//! - Extracting candidate index columns from a query's WHERE clause
//! - Detecting plan anti-patterns (full scans, temporary tables, filesorts)
//! - Rating queries and synthesizing `CREATE INDEX` suggestions

pub mod analysis;
pub mod explain;
pub mod filter;
pub mod statements;
pub mod suggestions;

pub use analysis::*;
pub use explain::*;
pub use filter::*;
pub use statements::*;
pub use suggestions::*;
