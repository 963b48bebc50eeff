//! Tests for client invocation

use super::*;
use pretty_assertions::assert_eq;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_direct_command_line() {
    let client = MariadbClient::new(ConnectionConfig::default());
    let (program, args) = client.command_line("SELECT 1");

    assert_eq!(program, "mariadb");
    assert_eq!(
        args,
        strings(&[
            "-h", "127.0.0.1", "-P", "3306", "-u", "root", "-proot", "employees", "-e", "SELECT 1"
        ])
    );
}

#[test]
fn test_docker_command_line() {
    let config = ConnectionConfig::default()
        .with_container("mariadb-dev")
        .with_credentials("app", "s3cret")
        .with_database("sales");
    let (program, args) = MariadbClient::new(config).command_line("EXPLAIN SELECT 1");

    assert_eq!(program, "docker");
    assert_eq!(
        args,
        strings(&[
            "exec",
            "mariadb-dev",
            "mariadb",
            "-h",
            "127.0.0.1",
            "-P",
            "3306",
            "-u",
            "app",
            "-ps3cret",
            "sales",
            "-e",
            "EXPLAIN SELECT 1"
        ])
    );
}

#[test]
fn test_empty_container_runs_directly() {
    let config = ConnectionConfig::default()
        .with_container("")
        .with_client("mysql");
    let (program, args) = MariadbClient::new(config).command_line("SELECT 1");
    assert_eq!(program, "mysql");
    assert_eq!(args[0], "-h");
}

#[test]
fn test_schema_query_targets_table() {
    let sql = schema_query("employees", "salaries");
    assert!(sql.contains("c.TABLE_SCHEMA = 'employees'"));
    assert!(sql.contains("c.TABLE_NAME = 'salaries'"));
    assert!(sql.contains("information_schema.STATISTICS"));
}

#[test]
fn test_schema_query_escapes_quotes() {
    let sql = schema_query("hr", "o'brien");
    assert!(sql.contains("c.TABLE_NAME = 'o''brien'"));
}

#[tokio::test]
async fn test_missing_client_binary_is_a_client_error() {
    let config = ConnectionConfig::default().with_client("sqlrate-no-such-client-binary");
    let err = MariadbClient::new(config).execute("SELECT 1").await.unwrap_err();
    assert!(matches!(err, SqlrateError::Client(_)));
}
