//! Markdown summary report

use crate::{ReportContext, join_or_none};
use sqlrate_analyzer::AnalysisRecord;

/// Renders the run summary as a Markdown table, one row per record in the
/// order given
pub fn render_markdown_summary(records: &[AnalysisRecord], context: &ReportContext) -> String {
    let mut lines = vec![
        format!("# SQL Performance Report - {}\n", context.database),
        format!("Generated: {}\n", context.timestamp()),
        "| ID | Time (s) | Rating | Issues | Suggestions |".to_string(),
        "|---|---|---|---|---|".to_string(),
    ];

    for record in records {
        lines.push(format!(
            "| {} | {:.4} | {} | {} | {} |",
            record.id(),
            record.exec_time_secs(),
            record.rating().stars(),
            escape_cell(&join_or_none(&record.issue_labels())),
            escape_cell(&record.suggestions().join(", ")),
        ));
    }

    lines.join("\n")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
