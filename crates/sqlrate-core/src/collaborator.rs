//! Collaborator traits feeding the analysis engine
//!
//! The engine itself is pure; everything that touches the database goes
//! through these traits so the binary can plug in a real client and tests
//! can plug in fakes.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Output of running a query through the database client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutput {
    /// Wall-clock time in seconds
    pub elapsed_secs: f64,
    /// Text written to stdout
    pub stdout: String,
    /// Text written to stderr
    pub stderr: String,
}

impl ExecutionOutput {
    /// Returns true if the client reported anything on stderr
    pub fn has_errors(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Runs a query and measures it
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str) -> Result<ExecutionOutput>;
}

/// Produces the tabular EXPLAIN output for a query
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Returns the raw plan text. An empty string means the plan is unavailable.
    async fn explain(&self, query: &str) -> Result<String>;
}

/// Describes tables for report enrichment
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// Returns column and index metadata for a table as display text
    async fn describe_table(&self, table: &str) -> Result<String>;

    /// Describes several tables, one titled section per table
    async fn describe_tables(&self, tables: &[String]) -> Result<String> {
        let mut info = String::new();
        for table in tables {
            info.push_str(&format!("\n--- TABLE: {} ---\n", table));
            info.push_str(&self.describe_table(table).await?);
            info.push('\n');
        }
        Ok(info)
    }
}

/// Everything observed about one query before analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryObservation {
    /// The query text as executed
    pub query: String,
    /// Measured execution time in seconds
    pub elapsed_secs: f64,
    /// Raw EXPLAIN output, empty if it could not be retrieved
    pub plan: String,
    /// Errors reported while executing the query
    pub exec_stderr: String,
}

/// Executes a query, then fetches its plan.
///
/// A failing plan lookup is not an error: the observation carries an empty
/// plan, which the engine rates as the worst case. A failing execution is
/// propagated.
pub async fn observe_query(
    query: &str,
    executor: &dyn QueryExecutor,
    plans: &dyn PlanSource,
) -> Result<QueryObservation> {
    let output = executor.execute(query).await?;
    if output.has_errors() {
        tracing::warn!(stderr = %output.stderr.trim(), "query reported errors");
    }

    let plan = match plans.explain(query).await {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(error = %e, "failed to retrieve plan");
            String::new()
        }
    };

    Ok(QueryObservation {
        query: query.to_string(),
        elapsed_secs: output.elapsed_secs,
        plan,
        exec_stderr: output.stderr,
    })
}
