//! Logging setup
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` wins over the configured
//! filter when it is set. When a log directory is configured, output goes to
//! daily-rotated files through a non-blocking writer; keep the returned guard
//! alive until shutdown so buffered lines are flushed.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::core::{RegistryError, RegistryResult};

/// Build the filter: `RUST_LOG` if set, otherwise the configured directive
fn build_filter(config: &LoggingConfig) -> RegistryResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    parse_filter(&config.filter)
}

fn parse_filter(directive: &str) -> RegistryResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| {
        RegistryError::invalid_config(format!("invalid log filter '{}': {}", directive, e))
    })
}

/// Initialize the global logging subscriber
///
/// Returns the file writer guard when logging to a directory, `None` for stderr.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> RegistryResult<Option<WorkerGuard>> {
    let filter = build_filter(config)?;

    let (result, guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false);
            let result = if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            (result, Some(guard))
        }
        None => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr);
            let result = if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            (result, None)
        }
    };

    result.map_err(|e| RegistryError::Logging(e.to_string()))?;

    tracing::debug!(
        "Logging initialized (filter: {}, json: {}, directory: {:?})",
        config.filter,
        config.json,
        config.directory
    );

    Ok(guard)
}
