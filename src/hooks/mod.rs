//! Hooks Module
//!
//! Register callbacks against numbered hooks and fire them at runtime.
//!
//! # Overview
//!
//! A hook is an integer id that callers agree on. Any number of callbacks can
//! be registered on it; `exec` runs them all with one argument value.
//!
//! - Callbacks run most-recent-first (`ExecutionOrder::Lifo`) by default
//! - Each registration returns a `CallbackId` for targeted removal
//! - A hook can be suspended without losing its callbacks
//! - Unknown hooks and ids are never an error, just a no-op
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hook_registry::hooks::HookRegistry;
//!
//! let hooks: Arc<HookRegistry<u32>> = Arc::new(HookRegistry::new());
//!
//! hooks.add(1, |n| {
//!     println!("first registered, runs last: {}", n);
//!     Ok(())
//! });
//! hooks.add(1, |n| {
//!     println!("last registered, runs first: {}", n);
//!     Ok(())
//! });
//!
//! hooks.exec(1, &7);
//!
//! hooks.suspend(1);
//! hooks.exec(1, &8); // nothing runs
//! hooks.unsuspend(1);
//! ```
//!
//! # Concurrency
//!
//! `exec` holds the hook's lock while its callbacks run. A callback may call
//! into other hooks only when the calls cannot form a cycle: no hook's
//! callbacks may, directly or indirectly, reach a hook that is currently
//! executing. Hook 1 calling `exec(2)` from a callback while hook 2 calls
//! `exec(1)` on another thread deadlocks both.
//!
//! | Operation | Map lock | Hook lock |
//! |-----------|----------|-----------|
//! | `add` on a new hook | write | write |
//! | `add` / `remove` / `remove_all` | read | write |
//! | `exec` | read | write (held while callbacks run) |
//! | `active` / `count` | read | read |

mod container;
mod registry;
mod types;

pub use registry::{ArcCallback, Callback, HookRegistry};
pub use types::{CallbackError, CallbackId, CallbackResult, ExecutionOrder, HookId};
