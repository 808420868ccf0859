//! Hook Types
//!
//! Core types for the hooks system:
//! - `HookId` - Caller-agreed identifier of an extension point
//! - `CallbackId` - Identifier of one registered callback, used for removal
//! - `ExecutionOrder` - Traversal policy used by `exec`
//! - `CallbackError` / `CallbackResult` - What callbacks return

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::RegistryError;

/// Identifier of a hook. Callers agree on the namespace (usually shared constants).
pub type HookId = i64;

/// Identifier of a callback within one hook
///
/// Ids are handed out by the hook's container in increasing order and are
/// never reused, even after the callback is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(u64);

impl CallbackId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order in which `exec` visits the callbacks of a hook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionOrder {
    /// Most recently registered callback runs first
    #[default]
    Lifo,
    /// No guaranteed order
    Unordered,
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionOrder::Lifo => write!(f, "lifo"),
            ExecutionOrder::Unordered => write!(f, "unordered"),
        }
    }
}

impl FromStr for ExecutionOrder {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lifo" => Ok(ExecutionOrder::Lifo),
            "unordered" => Ok(ExecutionOrder::Unordered),
            other => Err(RegistryError::invalid_config(format!(
                "unknown execution order '{}' (expected 'lifo' or 'unordered')",
                other
            ))),
        }
    }
}

/// Failure reported by a callback
///
/// The registry never inspects these. `exec` drops every callback result, so
/// a callback that wants its failures noticed must report them itself.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// Callback failed with a message
    #[error("{0}")]
    Failed(String),

    /// Callback failed with an arbitrary error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CallbackError {
    /// Create a failure from a message
    pub fn failed(msg: impl Into<String>) -> Self {
        CallbackError::Failed(msg.into())
    }
}

/// Result returned from a callback
pub type CallbackResult = Result<(), CallbackError>;
