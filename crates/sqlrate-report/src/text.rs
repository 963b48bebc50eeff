//! Per-query text reports and console output

use crate::join_or_none;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use sqlrate_analyzer::AnalysisRecord;

/// Longest query prefix shown in the console summary table
const QUERY_PREVIEW_CHARS: usize = 60;

/// File name of the detailed report for a query, `query_<NN>.txt`
pub fn query_report_file_name(id: usize) -> String {
    format!("query_{:02}.txt", id)
}

/// Renders the detailed report for one query, including the raw plan and the
/// schema details gathered for its tables
pub fn render_query_report(record: &AnalysisRecord, raw_plan: &str, schema_info: &str) -> String {
    let mut report = format!(
        "QUERY: {}\n\nRATING: {}\n\nEXPLAIN:\n{}\n\nSCHEMA:\n{}\n",
        record.query(),
        record.rating().stars(),
        raw_plan,
        schema_info
    );

    if !record.issues().is_empty() {
        report.push_str(&format!("ISSUES: {}\n", record.issue_labels().join(", ")));
    }

    if !record.index_suggestions().is_empty() {
        report.push_str("INDEX SUGGESTIONS:\n");
        report.push_str(&record.index_ddl().join("\n"));
        report.push('\n');
    }

    report
}

/// Renders the console block printed for one query
pub fn render_console_analysis(record: &AnalysisRecord) -> String {
    let mut out = format!(
        "--- QUERY {} analysis ---\nTime: {:.4}s | Rating: {}\nIssues: {}\nSuggestions: {}\n",
        record.id(),
        record.exec_time_secs(),
        "*".repeat(record.rating().value() as usize),
        join_or_none(&record.issue_labels()),
        record.suggestions().join(", "),
    );

    if !record.index_suggestions().is_empty() {
        out.push_str("Suggested SQL:\n");
        out.push_str(&record.index_ddl().join("\n"));
        out.push('\n');
    }

    out
}

/// Renders a console table with one row per record
pub fn render_summary_table(records: &[AnalysisRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Time (s)", "Rating", "Issues", "Query"]);

    for record in records {
        table.add_row(vec![
            record.id().to_string(),
            format!("{:.4}", record.exec_time_secs()),
            record.rating().to_string(),
            record.issues().len().to_string(),
            query_preview(record.query()),
        ]);
    }

    table.to_string()
}

fn query_preview(query: &str) -> String {
    let flat = query.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > QUERY_PREVIEW_CHARS {
        let prefix: String = flat.chars().take(QUERY_PREVIEW_CHARS).collect();
        format!("{}...", prefix)
    } else {
        flat
    }
}
