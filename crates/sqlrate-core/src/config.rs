//! Connection configuration

use crate::{Result, SqlrateError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How to reach the database through its command-line client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Database (schema) name
    pub database: String,
    /// Docker container running the database, if the client runs inside it
    pub container: Option<String>,
    /// Client binary to invoke (`mariadb`, `mysql`)
    pub client: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: "root".to_string(),
            database: "employees".to_string(),
            container: None,
            client: "mariadb".to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Creates a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the user and password
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Sets the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Runs the client through `docker exec` in the given container
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Sets the client binary
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    /// Returns true if the client runs inside a docker container
    pub fn uses_container(&self) -> bool {
        self.container.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Checks that the config can produce a usable client invocation
    pub fn validate(&self) -> Result<()> {
        if self.client.trim().is_empty() {
            return Err(SqlrateError::Configuration(
                "client binary must not be empty".to_string(),
            ));
        }
        if self.database.trim().is_empty() {
            return Err(SqlrateError::Configuration(
                "database name must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(SqlrateError::Configuration("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Reads a JSON configuration file into `T`
pub fn read_json_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded configuration file");
    Ok(config)
}
