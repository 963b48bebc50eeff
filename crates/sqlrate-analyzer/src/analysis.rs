//! Query Analysis
//!
//! Composes table extraction, filter column extraction, issue detection,
//! rating and index synthesis into one immutable [`AnalysisRecord`] per query.
//! Analysis is a pure function of its inputs: no I/O, no shared state.

use crate::explain::extract_tables;
use crate::filter::{FilterColumnExtractor, HeuristicFilterExtractor};
use crate::suggestions::{
    IndexSuggestion, Issue, MAX_SUGGESTIONS, Rating, detect_issues, score_query,
    synthesize_index_suggestions,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sqlrate_core::QueryObservation;
use std::collections::BTreeSet;

/// How execution time above the thresholds is penalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyPolicy {
    /// Slow (-1) is checked before very slow (-2), so the first threshold
    /// crossed wins. Compatible with historical ratings.
    #[default]
    FirstMatch,
    /// Very slow (-2) takes precedence over slow (-1)
    Tiered,
}

/// Configuration for the query analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Execution time in seconds above which a query is slow
    pub slow_query_secs: f64,
    /// Execution time in seconds above which a query is very slow
    pub very_slow_query_secs: f64,
    /// How the two latency thresholds interact
    pub latency_policy: LatencyPolicy,
    /// Maximum number of advice lines kept per query, applied within
    /// `1..=MAX_SUGGESTIONS`
    pub max_suggestions: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            slow_query_secs: 1.0,
            very_slow_query_secs: 5.0,
            latency_policy: LatencyPolicy::FirstMatch,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slow query threshold
    pub fn with_slow_query_secs(mut self, secs: f64) -> Self {
        self.slow_query_secs = secs.max(0.0);
        self
    }

    /// Sets the very slow query threshold
    pub fn with_very_slow_query_secs(mut self, secs: f64) -> Self {
        self.very_slow_query_secs = secs.max(0.0);
        self
    }

    /// Sets the latency policy
    pub fn with_latency_policy(mut self, policy: LatencyPolicy) -> Self {
        self.latency_policy = policy;
        self
    }

    /// Sets the maximum number of advice lines, between one and
    /// [`MAX_SUGGESTIONS`]
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.clamp(1, MAX_SUGGESTIONS);
        self
    }
}

/// One query to analyze
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    /// Caller-assigned identifier, usually the 1-based position in the script
    pub id: usize,
    pub query: String,
    /// Raw tabular EXPLAIN output, empty if unavailable
    pub plan: String,
    pub exec_time_secs: f64,
}

impl AnalysisInput {
    pub fn new(
        id: usize,
        query: impl Into<String>,
        plan: impl Into<String>,
        exec_time_secs: f64,
    ) -> Self {
        Self {
            id,
            query: query.into(),
            plan: plan.into(),
            exec_time_secs,
        }
    }

    /// Builds an input from what the collaborators observed
    pub fn from_observation(id: usize, observation: QueryObservation) -> Self {
        Self {
            id,
            query: observation.query,
            plan: observation.plan,
            exec_time_secs: observation.elapsed_secs,
        }
    }
}

/// Immutable result of analyzing one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    id: usize,
    query: String,
    exec_time_secs: f64,
    rating: Rating,
    issues: BTreeSet<Issue>,
    suggestions: Vec<String>,
    index_suggestions: Vec<IndexSuggestion>,
    tables: BTreeSet<String>,
    filter_columns: BTreeSet<String>,
}

impl AnalysisRecord {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Execution time in seconds, never negative or NaN
    pub fn exec_time_secs(&self) -> f64 {
        self.exec_time_secs
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn issues(&self) -> &BTreeSet<Issue> {
        &self.issues
    }

    /// Advice in rule order
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Proposed indexes ordered by table, then column
    pub fn index_suggestions(&self) -> &[IndexSuggestion] {
        &self.index_suggestions
    }

    /// Tables the plan references
    pub fn tables(&self) -> &BTreeSet<String> {
        &self.tables
    }

    /// Columns the WHERE clause filters on
    pub fn filter_columns(&self) -> &BTreeSet<String> {
        &self.filter_columns
    }

    /// Returns true if the plan could not be retrieved
    pub fn plan_unavailable(&self) -> bool {
        self.issues.iter().any(Issue::is_plan_unavailable)
    }

    /// Issue labels in display order
    pub fn issue_labels(&self) -> Vec<String> {
        self.issues.iter().map(Issue::label).collect()
    }

    /// `CREATE INDEX` statements in display order
    pub fn index_ddl(&self) -> Vec<String> {
        self.index_suggestions.iter().map(IndexSuggestion::ddl).collect()
    }
}

/// Query analyzer producing [`AnalysisRecord`]s
#[derive(Debug, Clone, Default)]
pub struct QueryAnalyzer<E = HeuristicFilterExtractor> {
    config: AnalyzerConfig,
    extractor: E,
}

impl QueryAnalyzer {
    /// Creates a new analyzer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new analyzer with custom config
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            extractor: HeuristicFilterExtractor,
        }
    }
}

impl<E: FilterColumnExtractor> QueryAnalyzer<E> {
    /// Replaces the filter column extractor
    pub fn with_extractor<F: FilterColumnExtractor>(self, extractor: F) -> QueryAnalyzer<F> {
        QueryAnalyzer {
            config: self.config,
            extractor,
        }
    }

    /// Returns the analyzer config
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes one query
    pub fn analyze(&self, id: usize, query: &str, raw_plan: &str, exec_time_secs: f64) -> AnalysisRecord {
        let exec_time_secs = sanitize_duration(exec_time_secs);

        let tables = extract_tables(raw_plan);
        let filter_columns = self.extractor.extract(query);
        let issues = detect_issues(raw_plan, &tables);
        let score = score_query(&issues, exec_time_secs, &tables, &filter_columns, &self.config);
        let index_suggestions = synthesize_index_suggestions(&issues, &tables, &filter_columns);

        tracing::debug!(
            id,
            tables = tables.len(),
            filter_columns = filter_columns.len(),
            issues = issues.len(),
            rating = score.rating.value(),
            "analyzed query"
        );

        AnalysisRecord {
            id,
            query: query.to_string(),
            exec_time_secs,
            rating: score.rating,
            issues,
            suggestions: score.suggestions,
            index_suggestions,
            tables,
            filter_columns,
        }
    }

    /// Analyzes a prepared input
    pub fn analyze_input(&self, input: &AnalysisInput) -> AnalysisRecord {
        self.analyze(input.id, &input.query, &input.plan, input.exec_time_secs)
    }
}

impl<E: FilterColumnExtractor + Sync> QueryAnalyzer<E> {
    /// Analyzes many queries in parallel. Records come back in input order.
    pub fn analyze_batch(&self, inputs: &[AnalysisInput]) -> Vec<AnalysisRecord> {
        inputs
            .par_iter()
            .map(|input| self.analyze_input(input))
            .collect()
    }
}

/// Analyzes one query with the default analyzer
pub fn analyze(id: usize, query: &str, raw_plan: &str, exec_time_secs: f64) -> AnalysisRecord {
    QueryAnalyzer::new().analyze(id, query, raw_plan, exec_time_secs)
}

// NaN and negative times become zero; +inf is kept as the slowest finite time
fn sanitize_duration(secs: f64) -> f64 {
    if secs.is_nan() || secs <= 0.0 {
        0.0
    } else {
        secs.min(f64::MAX)
    }
}

#[cfg(test)]
mod tests;
