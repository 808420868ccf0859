//! Core types shared across the crate
//!
//! - `RegistryError` / `RegistryResult` - setup error types

pub mod error;

pub use error::{RegistryError, RegistryResult};
