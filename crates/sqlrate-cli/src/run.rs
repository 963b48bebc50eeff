//! One analysis run: load queries, observe them, analyze, write reports

use crate::args::Args;
use crate::config::SqlrateConfig;
use crate::mariadb::MariadbClient;
use anyhow::Context;
use sqlrate_analyzer::{AnalysisInput, AnalysisRecord, AnalyzerConfig, QueryAnalyzer, split_statements};
use sqlrate_core::{PlanSource, QueryExecutor, QueryObservation, SchemaIntrospector, observe_query};
use sqlrate_report::{
    ReportContext, query_report_file_name, render_console_analysis, render_markdown_summary,
    render_query_report, render_summary_table,
};
use std::path::{Path, PathBuf};

/// Where and how results are written
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub report_dir: PathBuf,
    pub report_file: PathBuf,
    pub print_stdout: bool,
}

impl OutputOptions {
    fn from_args(args: &Args) -> Self {
        Self {
            report_dir: args.report_dir.clone(),
            report_file: args.report_file.clone(),
            print_stdout: args.stdout,
        }
    }
}

/// Runs the analysis described by the command-line arguments
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = SqlrateConfig::resolve(&args)?;
    let queries = load_queries(&args)?;
    let output = OutputOptions::from_args(&args);
    let context = ReportContext::new(
        config.connection.database.clone(),
        chrono::Local::now().naive_local(),
    );

    tracing::info!(
        queries = queries.len(),
        database = %config.connection.database,
        container = ?config.connection.container,
        "starting analysis"
    );

    let client = MariadbClient::new(config.connection.clone());
    let records = analyze_queries(&queries, &client, config.analyzer, &output, &context).await?;

    if output.print_stdout {
        println!("{}", render_summary_table(&records));
    } else {
        println!(
            "Analysis complete. {} queries analyzed. Summary report: {}",
            records.len(),
            output.report_file.display()
        );
    }

    Ok(())
}

/// Queries from `--query`, or the statements of `--query-file`
pub fn load_queries(args: &Args) -> anyhow::Result<Vec<String>> {
    if let Some(query) = &args.query {
        return Ok(vec![query.clone()]);
    }

    let script = std::fs::read_to_string(&args.query_file)
        .with_context(|| format!("query file not found at {}", args.query_file.display()))?;
    Ok(split_statements(&script))
}

/// Observes each query in order, analyzes them all, then writes the reports.
///
/// Queries run one at a time so their timings do not interfere.
pub async fn analyze_queries<C>(
    queries: &[String],
    client: &C,
    analyzer_config: AnalyzerConfig,
    output: &OutputOptions,
    context: &ReportContext,
) -> anyhow::Result<Vec<AnalysisRecord>>
where
    C: QueryExecutor + PlanSource + SchemaIntrospector,
{
    let mut observations = Vec::with_capacity(queries.len());
    for (index, query) in queries.iter().enumerate() {
        let observation = match observe_query(query, client, client).await {
            Ok(observation) => observation,
            Err(e) => {
                tracing::warn!(id = index + 1, error = %e, "query could not be observed");
                QueryObservation {
                    query: query.clone(),
                    ..QueryObservation::default()
                }
            }
        };
        observations.push(observation);
    }

    let inputs: Vec<AnalysisInput> = observations
        .iter()
        .enumerate()
        .map(|(index, observation)| AnalysisInput::from_observation(index + 1, observation.clone()))
        .collect();
    let records = QueryAnalyzer::with_config(analyzer_config).analyze_batch(&inputs);

    std::fs::create_dir_all(&output.report_dir).with_context(|| {
        format!("failed to create report directory {}", output.report_dir.display())
    })?;

    for (record, observation) in records.iter().zip(&observations) {
        let tables: Vec<String> = record.tables().iter().cloned().collect();
        let schema_info = match client.describe_tables(&tables).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(id = record.id(), error = %e, "schema lookup failed");
                String::new()
            }
        };

        let path = output.report_dir.join(query_report_file_name(record.id()));
        let report = render_query_report(record, &observation.plan, &schema_info);
        std::fs::write(&path, report)
            .with_context(|| format!("failed to write {}", path.display()))?;

        if output.print_stdout {
            println!("{}", render_console_analysis(record));
        }
    }

    write_summary(&output.report_file, &render_markdown_summary(&records, context))?;
    tracing::info!(
        records = records.len(),
        report = %output.report_file.display(),
        "reports written"
    );

    Ok(records)
}

fn write_summary(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
