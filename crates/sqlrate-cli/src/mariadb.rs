//! Database collaborators backed by the MariaDB command-line client
//!
//! Every call spawns the client with `-e <sql>`, either directly or through
//! `docker exec` when a container is configured. In batch mode the client
//! prints tab-separated rows, which is the plan format the analyzer expects.

use async_trait::async_trait;
use sqlrate_core::{
    ConnectionConfig, ExecutionOutput, PlanSource, QueryExecutor, Result, SchemaIntrospector,
    SqlrateError,
};
use std::time::Instant;
use tokio::process::Command;

/// Spawns the database client for each request
#[derive(Debug, Clone)]
pub struct MariadbClient {
    config: ConnectionConfig,
}

impl MariadbClient {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Program and arguments that run `sql` through the client
    pub fn command_line(&self, sql: &str) -> (String, Vec<String>) {
        let config = &self.config;
        let client_args = [
            "-h".to_string(),
            config.host.clone(),
            "-P".to_string(),
            config.port.to_string(),
            "-u".to_string(),
            config.user.clone(),
            format!("-p{}", config.password),
            config.database.clone(),
            "-e".to_string(),
            sql.to_string(),
        ];

        match config.container.as_deref().filter(|c| !c.is_empty()) {
            Some(container) => {
                let mut args = vec![
                    "exec".to_string(),
                    container.to_string(),
                    config.client.clone(),
                ];
                args.extend(client_args);
                ("docker".to_string(), args)
            }
            None => (config.client.clone(), client_args.to_vec()),
        }
    }

    #[tracing::instrument(skip(self, sql), fields(client = %self.config.client))]
    async fn run(&self, sql: &str) -> Result<(String, String)> {
        let (program, args) = self.command_line(sql);
        let output = Command::new(&program)
            .args(&args)
            .output()
            .await
            .map_err(|e| SqlrateError::Client(format!("failed to run {}: {}", program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            tracing::debug!(status = %output.status, "client exited unsuccessfully");
        }

        Ok((stdout, stderr))
    }
}

#[async_trait]
impl QueryExecutor for MariadbClient {
    async fn execute(&self, query: &str) -> Result<ExecutionOutput> {
        let start = Instant::now();
        let (stdout, stderr) = self.run(query).await?;
        let elapsed_secs = start.elapsed().as_secs_f64();

        tracing::debug!(elapsed_secs, "query executed");

        Ok(ExecutionOutput {
            elapsed_secs,
            stdout,
            stderr,
        })
    }
}

#[async_trait]
impl PlanSource for MariadbClient {
    async fn explain(&self, query: &str) -> Result<String> {
        let (stdout, stderr) = self.run(&format!("EXPLAIN {}", query)).await?;
        if stdout.trim().is_empty() && !stderr.trim().is_empty() {
            tracing::warn!(stderr = %stderr.trim(), "EXPLAIN failed");
        }
        Ok(stdout)
    }
}

#[async_trait]
impl SchemaIntrospector for MariadbClient {
    async fn describe_table(&self, table: &str) -> Result<String> {
        let sql = schema_query(&self.config.database, table);
        let (stdout, stderr) = self.run(&sql).await?;
        if !stderr.trim().is_empty() {
            tracing::warn!(table, stderr = %stderr.trim(), "schema lookup reported errors");
        }
        Ok(stdout)
    }
}

/// Columns of a table with the indexes each one belongs to
pub fn schema_query(database: &str, table: &str) -> String {
    format!(
        "SELECT \
            c.COLUMN_NAME AS 'Field', \
            c.COLUMN_TYPE AS 'Type', \
            c.COLUMN_KEY AS 'Key', \
            COALESCE(GROUP_CONCAT(DISTINCT s.INDEX_NAME SEPARATOR ', '), 'None') AS 'Indexes' \
        FROM information_schema.COLUMNS c \
        LEFT JOIN information_schema.STATISTICS s \
            ON c.TABLE_SCHEMA = s.TABLE_SCHEMA \
            AND c.TABLE_NAME = s.TABLE_NAME \
            AND c.COLUMN_NAME = s.COLUMN_NAME \
        WHERE c.TABLE_SCHEMA = '{}' \
            AND c.TABLE_NAME = '{}' \
        GROUP BY c.COLUMN_NAME, c.COLUMN_TYPE, c.COLUMN_KEY, c.ORDINAL_POSITION \
        ORDER BY c.ORDINAL_POSITION;",
        quote_literal(database),
        quote_literal(table)
    )
}

fn quote_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "''")
}

#[cfg(test)]
mod tests;
