//! Tests for script splitting

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_splits_and_trims() {
    let script = "SELECT 1;\n\n  SELECT *\n  FROM employees\n  WHERE emp_no = 10001 ;\n";
    assert_eq!(
        split_statements(script),
        vec!["SELECT 1", "SELECT *\n  FROM employees\n  WHERE emp_no = 10001"]
    );
}

#[test]
fn test_drops_empty_statements() {
    assert_eq!(split_statements(";;  ;\n"), Vec::<String>::new());
    assert!(split_statements("").is_empty());
}

#[test]
fn test_last_statement_without_terminator() {
    assert_eq!(split_statements("SELECT 1; SELECT 2"), vec!["SELECT 1", "SELECT 2"]);
}
