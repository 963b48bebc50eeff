//! Tabular EXPLAIN Parser Module
//!
//! Parses the tabular plan output printed by the MySQL/MariaDB command-line
//! client, either pipe-delimited (interactive box format) or tab-delimited
//! (batch mode).
//!
//! # Example
//!
//! ```
//! use sqlrate_analyzer::explain::{extract_tables, PlanTable};
//!
//! let plan = "id\tselect_type\ttable\ttype\tpossible_keys\tkey\n\
//!             1\tSIMPLE\temployees\tALL\tNULL\tNULL";
//! let tables = extract_tables(plan);
//! assert!(tables.contains("employees"));
//!
//! let table = PlanTable::parse(plan);
//! let row = table.rows().next().unwrap();
//! assert_eq!(row.get("type"), Some("ALL"));
//! ```

pub mod tabular;

pub use tabular::{PlanRow, PlanTable, extract_tables, is_table_reference, tokenize_row};
