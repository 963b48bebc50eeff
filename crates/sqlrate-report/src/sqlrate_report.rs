//! sqlrate Report - Rendering of analysis records
//!
//! Renderers format [`AnalysisRecord`](sqlrate_analyzer::AnalysisRecord)
//! values without altering them:
//! - Markdown summary of a whole run
//! - Detailed per-query text report
//! - Console output for interactive runs

pub mod markdown;
pub mod text;

pub use markdown::*;
pub use text::*;

use chrono::NaiveDateTime;

/// Run-level details shown in report headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Database the queries ran against
    pub database: String,
    /// When the run was generated
    pub generated_at: NaiveDateTime,
}

impl ReportContext {
    pub fn new(database: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            database: database.into(),
            generated_at,
        }
    }

    /// Timestamp as `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Joins items with `", "`, or `None` when there are none
pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
