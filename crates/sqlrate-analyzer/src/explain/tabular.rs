//! Tabular EXPLAIN output
//!
//! The client prints one row per table access:
//!
//! ```text
//! | id | select_type | table     | type | possible_keys | key  | key_len | ref  | rows   | Extra       |
//! | 1  | SIMPLE      | employees | ALL  | NULL          | NULL | NULL    | NULL | 299113 | Using where |
//! ```
//!
//! or the same cells separated by tabs in batch mode. Columns are located by
//! name from the header row, never by fixed position, so the parser copes with
//! the optional `partitions` / `filtered` columns and with reordered output.

use std::collections::BTreeSet;

/// Header cell naming the column that holds the accessed table
const TABLE_COLUMN: &str = "table";

/// Splits one line of plan output into trimmed cells.
///
/// Pipe-delimited lines that start with a pipe are box-drawn rows; the empty
/// cells produced by the surrounding delimiters are dropped. Other lines are
/// split on tabs.
pub fn tokenize_row(line: &str) -> Vec<String> {
    if line.contains('|') {
        let cells = line.split('|').map(|cell| cell.trim().to_string());
        if line.trim_start().starts_with('|') {
            cells.filter(|cell| !cell.is_empty()).collect()
        } else {
            cells.collect()
        }
    } else {
        line.split('\t').map(|cell| cell.trim().to_string()).collect()
    }
}

/// Returns true if a `table` cell names a real table.
///
/// `NULL` appears for table-less rows (`SELECT 1`), and `<derived2>`,
/// `<union1,2>` or `<subquery3>` are synthetic plan nodes.
pub fn is_table_reference(name: &str) -> bool {
    !name.is_empty() && name != "NULL" && !name.starts_with('<')
}

/// Parsed tabular plan: the header row plus the data rows under it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanTable {
    headers: Vec<String>,
    table_column: Option<usize>,
    rows: Vec<Vec<String>>,
}

impl PlanTable {
    /// Parses raw plan text. Never fails: text without a recognizable header
    /// yields a table with no header and no rows.
    pub fn parse(raw: &str) -> Self {
        let mut plan = Self::default();

        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let cells = tokenize_row(line);

            let Some(table_column) = plan.table_column else {
                if let Some(idx) = cells
                    .iter()
                    .position(|cell| cell.eq_ignore_ascii_case(TABLE_COLUMN))
                {
                    plan.table_column = Some(idx);
                    plan.headers = cells;
                }
                continue;
            };

            if cells.len() <= table_column {
                continue;
            }

            // Output of several EXPLAINs concatenated repeats the header
            if cells[table_column].eq_ignore_ascii_case(TABLE_COLUMN) {
                continue;
            }

            plan.rows.push(cells);
        }

        tracing::trace!(
            header_found = plan.table_column.is_some(),
            rows = plan.rows.len(),
            "parsed tabular plan"
        );

        plan
    }

    /// Returns true if a header row was found
    pub fn has_header(&self) -> bool {
        self.table_column.is_some()
    }

    /// Header cells in output order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a named column (case-insensitive)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterates over the data rows
    pub fn rows(&self) -> impl Iterator<Item = PlanRow<'_>> {
        self.rows.iter().map(move |cells| PlanRow { plan: self, cells })
    }

    /// Distinct tables referenced by the data rows
    pub fn table_references(&self) -> BTreeSet<String> {
        self.rows()
            .filter_map(|row| row.table_reference())
            .map(str::to_string)
            .collect()
    }
}

/// One data row of a [`PlanTable`], addressed by column name
#[derive(Debug, Clone, Copy)]
pub struct PlanRow<'a> {
    plan: &'a PlanTable,
    cells: &'a [String],
}

impl<'a> PlanRow<'a> {
    /// Cell under the named column, or `None` if the column is unknown or the
    /// row is too short to have it
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.plan.column_index(column)?;
        self.cells.get(idx).map(String::as_str)
    }

    /// Raw cells in output order
    pub fn cells(&self) -> &'a [String] {
        self.cells
    }

    /// Raw `table` cell
    pub fn table(&self) -> Option<&'a str> {
        let idx = self.plan.table_column?;
        self.cells.get(idx).map(String::as_str)
    }

    /// The `table` cell if it names a real table
    pub fn table_reference(&self) -> Option<&'a str> {
        self.table().filter(|name| is_table_reference(name))
    }
}

/// Extracts the distinct tables referenced by a raw plan.
///
/// Returns an empty set when no header row is found, which means the tables
/// could not be identified (empty output, an error message, an unknown shape).
pub fn extract_tables(raw: &str) -> BTreeSet<String> {
    PlanTable::parse(raw).table_references()
}
