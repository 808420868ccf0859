//! Registry Configuration
//!
//! Configuration for the hook registry and its logging. Loadable from JSON or
//! from environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `HOOK_REGISTRY_ORDER` | `order` (`lifo` or `unordered`) |
//! | `HOOK_REGISTRY_LOG` | `logging.filter` |
//! | `HOOK_REGISTRY_LOG_JSON` | `logging.json` |
//! | `HOOK_REGISTRY_LOG_DIR` | `logging.directory` |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{RegistryError, RegistryResult};
use crate::hooks::ExecutionOrder;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by `RUST_LOG` when set)
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,

    /// Write to daily-rotated files in this directory instead of stderr
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// File name prefix for rotated log files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_filter() -> String {
    "hook_registry=info".to_string()
}

fn default_file_prefix() -> String {
    "hook-registry.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

impl LoggingConfig {
    /// Set the filter directive
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Enable or disable JSON output
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Log to rotated files in `dir`
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }
}

/// Top-level registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Order in which `exec` runs callbacks
    #[serde(default)]
    pub order: ExecutionOrder,

    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RegistryConfig {
    /// Create the default configuration (LIFO, info-level logging to stderr)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution order
    pub fn with_order(mut self, order: ExecutionOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading registry config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build configuration from `HOOK_REGISTRY_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> RegistryResult<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup function
    pub fn from_vars<F>(lookup: F) -> RegistryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(order) = lookup("HOOK_REGISTRY_ORDER") {
            config.order = order.parse()?;
        }
        if let Some(filter) = lookup("HOOK_REGISTRY_LOG") {
            config.logging.filter = filter;
        }
        if let Some(json) = lookup("HOOK_REGISTRY_LOG_JSON") {
            config.logging.json = parse_bool("HOOK_REGISTRY_LOG_JSON", &json)?;
        }
        if let Some(dir) = lookup("HOOK_REGISTRY_LOG_DIR") {
            config.logging.directory = Some(PathBuf::from(dir));
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> RegistryResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(RegistryError::invalid_config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
