//! Hook Registry
//!
//! Contains:
//! - `Callback` trait - for implementing callbacks
//! - `HookRegistry` - maps hook ids to their callbacks and runs them
//!
//! Locking is two-tier. The registry's map lock only guards which hooks
//! exist; each hook's container guards its own callbacks. The map lock is
//! always released before a container lock is taken.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::container::Container;
use super::types::{CallbackId, CallbackResult, ExecutionOrder, HookId};
use crate::config::RegistryConfig;

/// Trait for callback implementations
///
/// Callbacks run synchronously on the thread that called `exec`, while the
/// hook's container lock is held. Keep them short.
///
/// A callback may use other hooks only if the calls can never form a cycle:
/// no callback may, directly or through other hooks, reach a hook that is
/// currently executing. Calling its own hook deadlocks at once. A hook-1
/// callback running `exec(2)` while a hook-2 callback on another thread runs
/// `exec(1)` deadlocks both threads.
pub trait Callback<A>: Send + Sync {
    /// Run the callback with the caller's arguments
    fn call(&self, args: &A) -> CallbackResult;
}

/// Implement Callback for closures
impl<A, F> Callback<A> for F
where
    F: Fn(&A) -> CallbackResult + Send + Sync,
{
    fn call(&self, args: &A) -> CallbackResult {
        (self)(args)
    }
}

/// Type alias for stored callbacks
pub type ArcCallback<A> = Arc<dyn Callback<A>>;

/// Thread-safe registry of callbacks keyed by hook id
///
/// `A` is the argument type every callback of this registry receives. The
/// registry never looks inside it.
///
/// A hook's container is created on first use (`add`, `replace`, `suspend`)
/// and kept for the life of the registry; `remove_all` only empties it. The
/// map therefore grows with every distinct hook id ever touched, which suits
/// a fixed namespace of caller-agreed constants but not ids minted per request.
///
/// # Example
///
/// ```
/// use hook_registry::hooks::HookRegistry;
///
/// const ON_SAVE: i64 = 1;
///
/// let hooks: HookRegistry<String> = HookRegistry::new();
/// let id = hooks.add(ON_SAVE, |path| {
///     println!("saved {}", path);
///     Ok(())
/// });
///
/// if hooks.active(ON_SAVE) {
///     hooks.exec(ON_SAVE, &"notes.txt".to_string());
/// }
///
/// hooks.remove(ON_SAVE, id);
/// assert!(!hooks.active(ON_SAVE));
/// ```
pub struct HookRegistry<A> {
    /// Containers by hook id. Entries are only ever inserted, under the write lock.
    containers: RwLock<HashMap<HookId, Arc<Container<A>>>>,
    /// Traversal policy for `exec`
    order: ExecutionOrder,
}

impl<A> HookRegistry<A> {
    /// Create an empty registry with LIFO execution
    pub fn new() -> Self {
        Self::with_order(ExecutionOrder::default())
    }

    /// Create an empty registry with the given execution order
    pub fn with_order(order: ExecutionOrder) -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            order,
        }
    }

    /// Create an empty registry from configuration
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self::with_order(config.order)
    }

    /// Execution order used by `exec`
    pub fn order(&self) -> ExecutionOrder {
        self.order
    }

    /// Look up a container. The map lock is released on return.
    fn container(&self, hook: HookId) -> Option<Arc<Container<A>>> {
        self.containers.read().get(&hook).cloned()
    }

    /// Look up a container, creating it under the write lock if absent
    fn container_or_create(&self, hook: HookId) -> Arc<Container<A>> {
        if let Some(container) = self.container(hook) {
            return container;
        }

        let mut containers = self.containers.write();
        // Another thread may have created it between the two locks
        let container = containers.entry(hook).or_insert_with(|| {
            tracing::debug!("[HookRegistry] Creating container for hook {}", hook);
            Arc::new(Container::new())
        });
        Arc::clone(container)
    }

    /// Snapshot of all containers, taken under the read lock
    fn snapshot(&self) -> Vec<(HookId, Arc<Container<A>>)> {
        self.containers
            .read()
            .iter()
            .map(|(hook, container)| (*hook, Arc::clone(container)))
            .collect()
    }

    /// Register a callback closure for a hook
    ///
    /// Returns the id to pass to [`remove`](Self::remove). Ids are unique
    /// within the hook and never reused.
    pub fn add<F>(&self, hook: HookId, callback: F) -> CallbackId
    where
        F: Fn(&A) -> CallbackResult + Send + Sync + 'static,
        A: 'static,
    {
        self.add_callback(hook, Arc::new(callback))
    }

    /// Register a pre-built callback for a hook
    pub fn add_callback(&self, hook: HookId, callback: ArcCallback<A>) -> CallbackId {
        let id = self.container_or_create(hook).add(callback);
        tracing::debug!("[HookRegistry] Registered callback {} on hook {}", id, hook);
        id
    }

    /// Make `callback` the only callback of a hook
    ///
    /// Existing callbacks are dropped and the new one registered under a single
    /// container lock, so no `exec` ever sees the hook empty in between.
    pub fn replace<F>(&self, hook: HookId, callback: F) -> CallbackId
    where
        F: Fn(&A) -> CallbackResult + Send + Sync + 'static,
        A: 'static,
    {
        let id = self.container_or_create(hook).replace(Arc::new(callback));
        tracing::debug!("[HookRegistry] Replaced callbacks of hook {} with {}", hook, id);
        id
    }

    /// Run every callback of a hook with `args`
    ///
    /// No-op if the hook has no callbacks or is suspended. Callback results are
    /// discarded: with several callbacks there is no single outcome to return.
    /// Callers that need results should capture them inside the callbacks.
    ///
    /// Blocks while another `exec`, `add` or `remove` on the same hook is in
    /// progress. Other hooks are unaffected.
    pub fn exec(&self, hook: HookId, args: &A) {
        let Some(container) = self.container(hook) else {
            return;
        };
        let ran = container.exec(self.order, args);
        tracing::trace!("[HookRegistry] Executed {} callback(s) on hook {}", ran, hook);
    }

    /// Build the arguments and run the hook, only if it is active
    ///
    /// Saves constructing `args` when nothing would receive them.
    pub fn exec_with<F>(&self, hook: HookId, build: F)
    where
        F: FnOnce() -> A,
    {
        if self.active(hook) {
            let args = build();
            self.exec(hook, &args);
        }
    }

    /// Remove one callback. No-op if the hook or id is unknown.
    pub fn remove(&self, hook: HookId, id: CallbackId) {
        let Some(container) = self.container(hook) else {
            return;
        };
        if container.remove(id) {
            tracing::debug!("[HookRegistry] Removed callback {} from hook {}", id, hook);
        }
    }

    /// Remove every callback of a hook
    ///
    /// The container stays in place (empty) so callback ids keep increasing
    /// if the hook is used again.
    pub fn remove_all(&self, hook: HookId) {
        let Some(container) = self.container(hook) else {
            return;
        };
        let removed = container.remove_all();
        tracing::debug!("[HookRegistry] Removed {} callback(s) from hook {}", removed, hook);
    }

    /// Remove every callback of every hook
    pub fn clear(&self) {
        for (_, container) in self.snapshot() {
            container.remove_all();
        }
        tracing::debug!("[HookRegistry] Cleared all hooks");
    }

    /// Stop `exec` from running a hook's callbacks, keeping them registered
    ///
    /// Suspending a hook that has never been used creates it suspended, so
    /// callbacks added later stay silent until [`unsuspend`](Self::unsuspend).
    pub fn suspend(&self, hook: HookId) {
        if self.container_or_create(hook).suspend() {
            tracing::debug!("[HookRegistry] Suspended hook {}", hook);
        }
    }

    /// Let `exec` run a suspended hook again. No-op for unknown hooks.
    pub fn unsuspend(&self, hook: HookId) {
        let Some(container) = self.container(hook) else {
            return;
        };
        if container.unsuspend() {
            tracing::debug!("[HookRegistry] Unsuspended hook {}", hook);
        }
    }

    /// Whether `exec` on this hook would run anything
    ///
    /// False for unknown, empty and suspended hooks. Cheap enough to call
    /// before building an expensive argument value.
    pub fn active(&self, hook: HookId) -> bool {
        self.container(hook)
            .map(|container| container.is_active())
            .unwrap_or(false)
    }

    /// Whether a hook is suspended
    pub fn is_suspended(&self, hook: HookId) -> bool {
        self.container(hook)
            .map(|container| container.is_suspended())
            .unwrap_or(false)
    }

    /// Number of callbacks registered on a hook, suspended or not
    pub fn count(&self, hook: HookId) -> usize {
        self.container(hook)
            .map(|container| container.len())
            .unwrap_or(0)
    }

    /// Ids of all active hooks, sorted
    pub fn hook_ids(&self) -> Vec<HookId> {
        let mut ids: Vec<HookId> = self
            .snapshot()
            .into_iter()
            .filter(|(_, container)| container.is_active())
            .map(|(hook, _)| hook)
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl<A> Default for HookRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for HookRegistry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("order", &self.order)
            .field("hooks", &self.containers.read().len())
            .finish()
    }
}
