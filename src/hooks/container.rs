//! Per-hook callback container
//!
//! Each hook id owns one `Container`. The container has its own lock, separate
//! from the registry's map lock, so running the callbacks of one hook never
//! stalls registration on another.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::registry::ArcCallback;
use super::types::{CallbackId, ExecutionOrder};

/// Internal state protected by RwLock
struct ContainerState<A> {
    /// Registered callbacks by id
    entries: HashMap<CallbackId, ArcCallback<A>>,
    /// Callback ids in registration order (oldest first)
    order: Vec<CallbackId>,
    /// When set, `exec` is a no-op
    suspended: bool,
    /// Next id to hand out. Never reset.
    next_id: u64,
}

impl<A> ContainerState<A> {
    fn insert(&mut self, callback: ArcCallback<A>) -> CallbackId {
        let id = CallbackId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, callback);
        self.order.push(id);
        id
    }

    fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        removed
    }
}

/// Callbacks, order and suspension flag for a single hook
pub(crate) struct Container<A> {
    state: RwLock<ContainerState<A>>,
}

impl<A> Container<A> {
    /// Create an empty, runnable container
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(ContainerState {
                entries: HashMap::new(),
                order: Vec::new(),
                suspended: false,
                next_id: 0,
            }),
        }
    }

    /// Register a callback and return its id
    pub(crate) fn add(&self, callback: ArcCallback<A>) -> CallbackId {
        self.state.write().insert(callback)
    }

    /// Drop every callback, then register `callback` as the only one
    pub(crate) fn replace(&self, callback: ArcCallback<A>) -> CallbackId {
        let mut state = self.state.write();
        state.clear();
        state.insert(callback)
    }

    /// Run every callback with `args`, returning how many ran
    ///
    /// The write lock is held for the whole traversal, so two `exec` calls on
    /// the same container never overlap, and neither overlaps `add`/`remove`.
    /// Callback results are discarded.
    pub(crate) fn exec(&self, order: ExecutionOrder, args: &A) -> usize {
        let state = self.state.write();
        if state.suspended {
            return 0;
        }

        match order {
            ExecutionOrder::Lifo => {
                let mut ran = 0;
                for id in state.order.iter().rev() {
                    if let Some(callback) = state.entries.get(id) {
                        let _ = callback.call(args);
                        ran += 1;
                    }
                }
                ran
            }
            ExecutionOrder::Unordered => {
                for callback in state.entries.values() {
                    let _ = callback.call(args);
                }
                state.entries.len()
            }
        }
    }

    /// Remove one callback. Returns false if the id is unknown.
    pub(crate) fn remove(&self, id: CallbackId) -> bool {
        let mut state = self.state.write();
        if state.entries.remove(&id).is_none() {
            return false;
        }
        // Vec::remove keeps the relative order of the remaining ids
        if let Some(pos) = state.order.iter().position(|o| *o == id) {
            state.order.remove(pos);
        }
        true
    }

    /// Remove every callback, keeping the id counter. Returns how many were removed.
    pub(crate) fn remove_all(&self) -> usize {
        self.state.write().clear()
    }

    /// Mark as suspended. Returns false if it already was.
    pub(crate) fn suspend(&self) -> bool {
        let mut state = self.state.write();
        !std::mem::replace(&mut state.suspended, true)
    }

    /// Clear the suspended flag. Returns false if it was not set.
    pub(crate) fn unsuspend(&self) -> bool {
        let mut state = self.state.write();
        std::mem::replace(&mut state.suspended, false)
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.state.read().suspended
    }

    /// Not suspended and holding at least one callback
    pub(crate) fn is_active(&self) -> bool {
        let state = self.state.read();
        !state.suspended && !state.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    #[cfg(test)]
    fn order(&self) -> Vec<CallbackId> {
        self.state.read().order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::types::CallbackResult;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> ArcCallback<()> {
        let log = Arc::clone(log);
        Arc::new(move |_: &()| -> CallbackResult {
            log.lock().push(name);
            Ok(())
        })
    }

    #[test]
    fn test_ids_are_monotonic() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();

        let a = container.add(recorder(&log, "a"));
        let b = container.add(recorder(&log, "b"));
        assert!(container.remove(b));
        let c = container.add(recorder(&log, "c"));

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_ids_not_reused_after_remove_all() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();

        let a = container.add(recorder(&log, "a"));
        assert_eq!(container.remove_all(), 1);
        let b = container.add(recorder(&log, "b"));

        assert_ne!(a, b);
    }

    #[test]
    fn test_exec_lifo() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();
        container.add(recorder(&log, "a"));
        container.add(recorder(&log, "b"));
        container.add(recorder(&log, "c"));

        assert_eq!(container.exec(ExecutionOrder::Lifo, &()), 3);
        assert_eq!(*log.lock(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();
        let a = container.add(recorder(&log, "a"));
        let b = container.add(recorder(&log, "b"));
        let c = container.add(recorder(&log, "c"));

        assert!(container.remove(b));
        assert_eq!(container.order(), vec![a, c]);

        container.exec(ExecutionOrder::Lifo, &());
        assert_eq!(*log.lock(), vec!["c", "a"]);
    }

    #[test]
    fn test_remove_unknown_id() {
        let container: Container<()> = Container::new();
        assert!(!container.remove(CallbackId::new(99)));
        assert_eq!(container.len(), 0);
    }

    #[test]
    fn test_exec_unordered_runs_everything() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();
        container.add(recorder(&log, "a"));
        container.add(recorder(&log, "b"));

        assert_eq!(container.exec(ExecutionOrder::Unordered, &()), 2);
        let mut seen = log.lock().clone();
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_suspended_exec_is_noop() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();
        container.add(recorder(&log, "a"));

        assert!(container.suspend());
        assert!(!container.suspend());
        assert!(container.is_suspended());
        assert!(!container.is_active());
        assert_eq!(container.exec(ExecutionOrder::Lifo, &()), 0);
        assert!(log.lock().is_empty());

        assert!(container.unsuspend());
        assert!(!container.unsuspend());
        assert_eq!(container.exec(ExecutionOrder::Lifo, &()), 1);
        assert_eq!(*log.lock(), vec!["a"]);
    }

    #[test]
    fn test_replace_leaves_single_callback() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();
        let a = container.add(recorder(&log, "a"));
        container.add(recorder(&log, "b"));

        let c = container.replace(recorder(&log, "c"));
        assert!(c > a);
        assert_eq!(container.len(), 1);

        container.exec(ExecutionOrder::Lifo, &());
        assert_eq!(*log.lock(), vec!["c"]);
    }

    #[test]
    fn test_empty_container_is_inactive() {
        let container: Container<()> = Container::new();
        assert!(!container.is_active());
        assert_eq!(container.exec(ExecutionOrder::Lifo, &()), 0);
    }

    #[test]
    fn test_failing_callback_does_not_stop_others() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let container = Container::new();
        container.add(recorder(&log, "a"));
        container.add(Arc::new(|_: &()| -> CallbackResult {
            Err(crate::hooks::CallbackError::failed("boom"))
        }));

        assert_eq!(container.exec(ExecutionOrder::Lifo, &()), 2);
        assert_eq!(*log.lock(), vec!["a"]);
    }
}
