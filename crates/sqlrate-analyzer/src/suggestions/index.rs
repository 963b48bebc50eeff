//! Index Suggestions
//!
//! Pairs every table read by a full scan with every filtered column. The
//! pairing is a best-effort heuristic: nothing checks that a column actually
//! belongs to the table it is paired with.

use super::Issue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A proposed single-column index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexSuggestion {
    /// Table to index
    pub table: String,
    /// Column to index
    pub column: String,
}

impl IndexSuggestion {
    /// Creates a new suggestion
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Index name, `idx_<table>_<column>`
    pub fn index_name(&self) -> String {
        format!("idx_{}_{}", self.table, self.column)
    }

    /// The `CREATE INDEX` statement for this suggestion
    pub fn ddl(&self) -> String {
        format!(
            "CREATE INDEX {} ON {}({});",
            self.index_name(),
            self.table,
            self.column
        )
    }
}

impl fmt::Display for IndexSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ddl())
    }
}

/// Proposes indexes when the plan contains a full scan.
///
/// Produces the cross product of `tables` and `filter_columns`, ordered by
/// table then column. Returns nothing unless `issues` contains
/// [`Issue::FullScan`].
pub fn synthesize_index_suggestions(
    issues: &BTreeSet<Issue>,
    tables: &BTreeSet<String>,
    filter_columns: &BTreeSet<String>,
) -> Vec<IndexSuggestion> {
    if !issues.contains(&Issue::FullScan) {
        return Vec::new();
    }

    // BTreeSet iteration already yields (table, column) in lexicographic order
    tables
        .iter()
        .flat_map(|table| {
            filter_columns
                .iter()
                .map(move |column| IndexSuggestion::new(table.as_str(), column.as_str()))
        })
        .collect()
}
