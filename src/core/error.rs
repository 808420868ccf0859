//! Registry error types
//!
//! The registry operations themselves never fail. These errors cover the
//! surrounding setup: loading configuration and installing logging.

use thiserror::Error;

/// Errors that can occur while configuring the hook registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Logging could not be initialized
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RegistryError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        RegistryError::InvalidConfig(msg.into())
    }
}

/// Result type alias for registry setup operations
pub type RegistryResult<T> = Result<T, RegistryError>;
