//! WHERE clause column extraction
//!
//! Finds identifiers used on the left of comparison and membership predicates
//! so they can be proposed as index columns. This is a regex heuristic, not a
//! SQL grammar: nested expressions, subqueries and string contents get no
//! special treatment and may over- or under-match.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// Clause text runs from WHERE to the first clause that cannot hold predicates
static WHERE_CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bWHERE\s+(.*?)(?:\bGROUP\s+BY\b|\bORDER\s+BY\b|\bLIMIT\b|;|$)")
        .expect("valid regex")
});

static PREDICATE_COLUMN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\w+)\s*(?:!=|<>|<=|>=|=|<|>|\bIN\b|\bLIKE\b|\bBETWEEN\b)")
        .expect("valid regex")
});

/// Words that precede an operator without being columns (`x NOT IN (...)`)
const CONNECTIVES: [&str; 3] = ["NOT", "AND", "OR"];

/// Source of candidate index columns for a query
pub trait FilterColumnExtractor {
    /// Returns the distinct columns the query filters on
    fn extract(&self, query: &str) -> BTreeSet<String>;
}

/// Regex-based extractor working on the WHERE clause text
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFilterExtractor;

impl FilterColumnExtractor for HeuristicFilterExtractor {
    fn extract(&self, query: &str) -> BTreeSet<String> {
        extract_filter_columns(query)
    }
}

/// Returns the text of the first WHERE clause, up to GROUP BY, ORDER BY,
/// LIMIT, a statement terminator or the end of the query
pub fn where_clause(query: &str) -> Option<&str> {
    WHERE_CLAUSE_REGEX
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts the columns compared in the query's WHERE clause.
///
/// # Example
///
/// ```
/// use sqlrate_analyzer::filter::extract_filter_columns;
///
/// let cols = extract_filter_columns("SELECT * FROM t WHERE dept_id = 5 AND hire_date > '2020-01-01'");
/// assert!(cols.contains("dept_id"));
/// assert!(cols.contains("hire_date"));
/// ```
pub fn extract_filter_columns(query: &str) -> BTreeSet<String> {
    let Some(clause) = where_clause(query) else {
        return BTreeSet::new();
    };

    PREDICATE_COLUMN_REGEX
        .captures_iter(clause)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|word| is_candidate_column(word))
        .map(str::to_string)
        .collect()
}

fn is_candidate_column(word: &str) -> bool {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !CONNECTIVES.iter().any(|kw| word.eq_ignore_ascii_case(kw))
}
