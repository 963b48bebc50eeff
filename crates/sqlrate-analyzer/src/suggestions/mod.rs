//! Query Rating Suggestions Module
//!
//! This module turns a tabular plan into findings: it detects anti-patterns
//! in the plan, proposes indexes for full scans, and rates the query with a
//! short list of advice.

mod detector;
mod index;
mod scorer;

pub use detector::*;
pub use index::*;
pub use scorer::*;
