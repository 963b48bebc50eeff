//! Error types for sqlrate

use thiserror::Error;

/// Core error type for sqlrate operations
#[derive(Error, Debug)]
pub enum SqlrateError {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for sqlrate operations
pub type Result<T> = std::result::Result<T, SqlrateError>;

#[cfg(test)]
mod tests;
