//! In-process hook registry
//!
//! Register callbacks against integer hook ids, fire them with `exec`, and
//! remove or suspend them at runtime, from any number of threads.
//!
//! - [`hooks`] - the registry, callback trait and id types
//! - [`config`] - execution order and logging configuration
//! - [`logging`] - `tracing` subscriber setup
//! - [`core`] - setup error types

pub mod core;

// Callback registry
pub mod hooks;

// Optional components
pub mod config;
pub mod logging;

pub use config::{LoggingConfig, RegistryConfig};
pub use crate::core::{RegistryError, RegistryResult};
pub use hooks::{
    ArcCallback, Callback, CallbackError, CallbackId, CallbackResult, ExecutionOrder, HookId,
    HookRegistry,
};
