//! Logging setup for the sqlrate binary
//!
//! Console events go to stderr so `--stdout` output stays clean. Structured
//! JSON logs are written to daily rolling files under the local data directory.
//! `RUST_LOG` takes precedence over the configured filter.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where JSON log files are written
    pub log_dir: PathBuf,

    /// Whether to write JSON logs to files
    pub enable_json_logs: bool,

    /// Whether to print events to stderr
    pub enable_console_logs: bool,

    /// Whether to include file/line information in console logs
    pub include_location: bool,

    /// Default log level filter
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: true,
            enable_console_logs: true,
            include_location: cfg!(debug_assertions),
            default_filter: default_filter(0),
        }
    }
}

impl LoggingConfig {
    /// Configuration for a `-v` count given on the command line
    pub fn for_verbosity(verbose: u8) -> Self {
        Self {
            default_filter: default_filter(verbose),
            ..Self::default()
        }
    }
}

fn default_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!(
        "warn,sqlrate={level},sqlrate_core={level},sqlrate_analyzer={level},sqlrate_report={level}"
    )
}

/// Initialize the logging system with the given configuration.
///
/// When file logging is enabled the returned guard owns the background
/// writer; buffered events are flushed when it is dropped, so the caller must
/// hold it until the program exits.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let mut layers = Vec::new();

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(env_filter.clone())
            .boxed();

        layers.push(console_layer);
    }

    let mut file_guard = None;
    if config.enable_json_logs {
        match std::fs::create_dir_all(&config.log_dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(&config.log_dir, "sqlrate.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                file_guard = Some(guard);

                let json_layer = fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .json()
                    .with_current_span(true)
                    .with_writer(non_blocking)
                    .with_filter(env_filter)
                    .boxed();

                layers.push(json_layer);
            }
            Err(e) => eprintln!(
                "Warning: cannot create log directory {}: {}",
                config.log_dir.display(),
                e
            ),
        }
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        log_dir = %config.log_dir.display(),
        json_enabled = file_guard.is_some(),
        console_enabled = config.enable_console_logs,
        "logging initialized"
    );

    Ok(file_guard)
}

/// Get the log directory path
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sqlrate")
        .join("logs")
}
