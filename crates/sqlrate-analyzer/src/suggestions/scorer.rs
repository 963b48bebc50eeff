//! Query Rating
//!
//! Rates a query from 1 (worst) to 5 (best) by deducting points for each
//! detected issue and for slow execution, and collects the matching advice.

use super::Issue;
use crate::analysis::{AnalyzerConfig, LatencyPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const PLAN_UNAVAILABLE_ADVICE: &str = "Ensure the query is valid and the database is accessible.";
pub const TEMPORARY_TABLE_ADVICE: &str = "Optimize GROUP BY or DISTINCT to avoid temporary tables.";
pub const FILESORT_ADVICE: &str = "Add an index on columns used in ORDER BY.";
pub const SLOW_QUERY_ADVICE: &str = "Query is slow, consider partitioning or pre-aggregating data.";
pub const WELL_OPTIMIZED_ADVICE: &str = "Query seems well-optimized.";

/// Upper bound on advice lines per query
pub const MAX_SUGGESTIONS: usize = 3;

/// Query quality on a 1-5 scale, higher is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const WORST: Rating = Rating(1);
    pub const BEST: Rating = Rating(5);

    /// Creates a rating, clamping the value into 1..=5
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::WORST.0 as i32, Self::BEST.0 as i32) as u8)
    }

    /// Numeric value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// One star per point
    pub fn stars(&self) -> String {
        "⭐".repeat(self.0 as usize)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::BEST.0)
    }
}

/// Rating and ranked advice for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub rating: Rating,
    /// Advice in rule order, never empty
    pub suggestions: Vec<String>,
}

/// Rates a query.
///
/// Rules apply in a fixed order and are not exclusive: full scan (-2),
/// temporary table (-1), filesort (-1), then latency. An unavailable plan
/// short-circuits to the worst rating. The advice list keeps rule order and is
/// truncated to `config.max_suggestions`, itself held within
/// `1..=MAX_SUGGESTIONS`.
pub fn score_query(
    issues: &BTreeSet<Issue>,
    exec_time_secs: f64,
    tables: &BTreeSet<String>,
    filter_columns: &BTreeSet<String>,
    config: &AnalyzerConfig,
) -> QualityScore {
    if issues.contains(&Issue::PlanUnavailable) {
        return QualityScore {
            rating: Rating::WORST,
            suggestions: vec![PLAN_UNAVAILABLE_ADVICE.to_string()],
        };
    }

    let mut rating = Rating::BEST.value() as i32;
    let mut suggestions = Vec::new();

    if issues.contains(&Issue::FullScan) {
        rating -= 2;
        if !tables.is_empty() && !filter_columns.is_empty() {
            let columns: Vec<&str> = filter_columns.iter().map(String::as_str).collect();
            suggestions.push(format!("Consider indexing: {}", columns.join(", ")));
        }
    }

    if issues.contains(&Issue::TemporaryTable) {
        rating -= 1;
        suggestions.push(TEMPORARY_TABLE_ADVICE.to_string());
    }

    if issues.contains(&Issue::Filesort) {
        rating -= 1;
        suggestions.push(FILESORT_ADVICE.to_string());
    }

    rating -= latency_penalty(exec_time_secs, config, &mut suggestions);

    if suggestions.is_empty() {
        suggestions.push(WELL_OPTIMIZED_ADVICE.to_string());
    }
    suggestions.truncate(config.max_suggestions.clamp(1, MAX_SUGGESTIONS));

    QualityScore {
        rating: Rating::clamped(rating),
        suggestions,
    }
}

fn latency_penalty(exec_time_secs: f64, config: &AnalyzerConfig, suggestions: &mut Vec<String>) -> i32 {
    match config.latency_policy {
        // The very-slow branch is only reachable when its threshold is below
        // the slow one, and it adds no advice.
        LatencyPolicy::FirstMatch => {
            if exec_time_secs > config.slow_query_secs {
                suggestions.push(SLOW_QUERY_ADVICE.to_string());
                1
            } else if exec_time_secs > config.very_slow_query_secs {
                2
            } else {
                0
            }
        }
        LatencyPolicy::Tiered => {
            if exec_time_secs > config.very_slow_query_secs {
                suggestions.push(SLOW_QUERY_ADVICE.to_string());
                2
            } else if exec_time_secs > config.slow_query_secs {
                suggestions.push(SLOW_QUERY_ADVICE.to_string());
                1
            } else {
                0
            }
        }
    }
}
