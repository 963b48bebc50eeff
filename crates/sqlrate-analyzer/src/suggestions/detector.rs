//! Plan Anti-Pattern Detection
//!
//! Scans raw plan text for the markers the client prints when a query does
//! more work than it should.

use crate::explain::PlanTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

// Access type printed for full table scans
static FULL_SCAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bALL\b").expect("valid regex"));

const TEMPORARY_MARKER: &str = "Using temporary";
const FILESORT_MARKER: &str = "Using filesort";
const KEY_COLUMN: &str = "key";

/// A problem found in a query plan
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "table", rename_all = "snake_case")]
pub enum Issue {
    /// No plan could be retrieved; the query is rated as the worst case
    PlanUnavailable,
    /// At least one table is read in full (`type = ALL`)
    FullScan,
    /// The query materializes a temporary table
    TemporaryTable,
    /// Rows are sorted outside of an index
    Filesort,
    /// A table is accessed without any index
    NoIndexOnTable(String),
}

impl Issue {
    /// Returns true if this issue forces the lowest rating
    pub fn is_plan_unavailable(&self) -> bool {
        matches!(self, Self::PlanUnavailable)
    }

    /// Human-readable label shown in reports
    pub fn label(&self) -> String {
        match self {
            Self::PlanUnavailable => "Could not analyze.".to_string(),
            Self::FullScan => "Full Table Scan (ALL) detected.".to_string(),
            Self::TemporaryTable => "Temporary table used.".to_string(),
            Self::Filesort => "Filesort used (performance impact).".to_string(),
            Self::NoIndexOnTable(table) => format!("No index used for table {}", table),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Detects plan anti-patterns.
///
/// The marker checks are independent and may all fire. `NoIndexOnTable` is
/// reported for each row of `tables` whose `key` cell is `NULL` or empty.
/// Empty plan text yields the single [`Issue::PlanUnavailable`].
pub fn detect_issues(raw_plan: &str, tables: &BTreeSet<String>) -> BTreeSet<Issue> {
    let mut issues = BTreeSet::new();

    if raw_plan.trim().is_empty() {
        issues.insert(Issue::PlanUnavailable);
        return issues;
    }

    if FULL_SCAN_REGEX.is_match(raw_plan) {
        issues.insert(Issue::FullScan);
    }

    if raw_plan.contains(TEMPORARY_MARKER) {
        issues.insert(Issue::TemporaryTable);
    }

    if raw_plan.contains(FILESORT_MARKER) {
        issues.insert(Issue::Filesort);
    }

    let plan = PlanTable::parse(raw_plan);
    for row in plan.rows() {
        let Some(table) = row.table_reference() else {
            continue;
        };
        if !tables.contains(table) {
            continue;
        }
        if let Some(key) = row.get(KEY_COLUMN) {
            if key.is_empty() || key == "NULL" {
                tracing::debug!(table = %table, "table accessed without an index");
                issues.insert(Issue::NoIndexOnTable(table.to_string()));
            }
        }
    }

    issues
}
