//! Run configuration: optional JSON file overridden by command-line flags

use crate::args::Args;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlrate_analyzer::{AnalyzerConfig, LatencyPolicy};
use sqlrate_core::{ConnectionConfig, read_json_config};

/// Everything a run needs besides the queries themselves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlrateConfig {
    pub connection: ConnectionConfig,
    pub analyzer: AnalyzerConfig,
}

impl SqlrateConfig {
    /// Loads the config file named by `--config`, if any, then applies flags
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => read_json_config::<SqlrateConfig>(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?,
            None => SqlrateConfig::default(),
        };

        config.apply_overrides(args);
        config
            .connection
            .validate()
            .context("invalid connection settings")?;

        Ok(config)
    }

    fn apply_overrides(&mut self, args: &Args) {
        let connection = &mut self.connection;
        if let Some(container) = &args.container {
            connection.container = Some(container.clone());
        }
        if let Some(host) = &args.host {
            connection.host = host.clone();
        }
        if let Some(port) = args.port {
            connection.port = port;
        }
        if let Some(user) = &args.user {
            connection.user = user.clone();
        }
        if let Some(password) = &args.password {
            connection.password = password.clone();
        }
        if let Some(db) = &args.db {
            connection.database = db.clone();
        }
        if let Some(client) = &args.client {
            connection.client = client.clone();
        }

        if args.tiered_latency {
            self.analyzer.latency_policy = LatencyPolicy::Tiered;
        }
    }
}
