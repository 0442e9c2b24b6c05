//! Trellis view state - the process-wide drill-path store.
//!
//! The drill path is an ordered stack of node IDs naming the current
//! subgraph roots (empty = whole-graph view). It is view state, not graph
//! data: it is never synced to collaborators and never persisted by the
//! engine.
//!
//! The store is an explicit state object with a subscribe/notify contract,
//! rather than module-scope mutable state: listeners are notified only on
//! actual value change, and a subscription unsubscribes when dropped.

#![forbid(unsafe_code)]

use std::sync::{Arc, Mutex, PoisonError, Weak};
use trellis::domain::NodeId;

type Listener = Arc<dyn Fn(&[NodeId]) + Send + Sync>;

struct Inner {
    path: Vec<NodeId>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// Thread-safe drill-path store.
///
/// Cloning the store yields another handle to the same state, so a single
/// instance can serve the whole process. Listeners run outside the internal
/// lock; they may re-enter the store freely.
#[derive(Clone)]
pub struct DrillPathStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for DrillPathStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DrillPathStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrillPathStore")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

impl DrillPathStore {
    /// Create an empty store (whole-graph view).
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                path: Vec::new(),
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current drill path. Empty means whole-graph view.
    #[must_use]
    pub fn path(&self) -> Vec<NodeId> {
        self.lock().path.clone()
    }

    /// The current subgraph root: the last path element, or `None` at the
    /// whole-graph view.
    #[must_use]
    pub fn current_root(&self) -> Option<NodeId> {
        self.lock().path.last().cloned()
    }

    /// Whether a drill view is active.
    #[must_use]
    pub fn is_drilled(&self) -> bool {
        !self.lock().path.is_empty()
    }

    /// Drill into a node: push it onto the path.
    pub fn push(&self, node_id: NodeId) {
        let notify = {
            let mut inner = self.lock();
            inner.path.push(node_id);
            Self::snapshot_for_notify(&inner)
        };
        Self::notify(notify);
    }

    /// Return to the parent level. Returns `false` when already at the
    /// whole-graph view; listeners are not notified in that case.
    pub fn pop(&self) -> bool {
        let notify = {
            let mut inner = self.lock();
            if inner.path.pop().is_none() {
                return false;
            }
            Self::snapshot_for_notify(&inner)
        };
        Self::notify(notify);
        true
    }

    /// Jump to a specific path (breadcrumb navigation). No notification
    /// when the path is unchanged.
    pub fn go_to(&self, path: Vec<NodeId>) {
        let notify = {
            let mut inner = self.lock();
            if inner.path == path {
                return;
            }
            inner.path = path;
            Self::snapshot_for_notify(&inner)
        };
        Self::notify(notify);
    }

    /// Return to the whole-graph view. No notification when already there.
    pub fn reset(&self) {
        let notify = {
            let mut inner = self.lock();
            if inner.path.is_empty() {
                return;
            }
            inner.path.clear();
            Self::snapshot_for_notify(&inner)
        };
        Self::notify(notify);
    }

    /// Register a listener for path changes.
    ///
    /// The listener receives the new path after every actual change. The
    /// returned [`Subscription`] unsubscribes when dropped.
    pub fn subscribe(&self, listener: impl Fn(&[NodeId]) + Send + Sync + 'static) -> Subscription {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        tracing::debug!(listener_id = id, "drill path listener registered");
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Clone path and listeners so they can be invoked outside the lock.
    fn snapshot_for_notify(inner: &Inner) -> (Vec<NodeId>, Vec<Listener>) {
        (
            inner.path.clone(),
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect(),
        )
    }

    fn notify((path, listeners): (Vec<NodeId>, Vec<Listener>)) {
        for listener in listeners {
            listener(&path);
        }
    }
}

/// Handle to a registered listener; dropping it unsubscribes.
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_listener(counter: &Arc<AtomicUsize>) -> impl Fn(&[NodeId]) + Send + Sync + 'static {
        let counter = Arc::clone(counter);
        move |_path| {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn push_and_pop_track_current_root() {
        let store = DrillPathStore::new();
        assert_eq!(store.current_root(), None);
        assert!(!store.is_drilled());

        store.push(NodeId::new("a"));
        store.push(NodeId::new("b"));
        assert_eq!(store.current_root(), Some(NodeId::new("b")));
        assert_eq!(store.path(), vec![NodeId::new("a"), NodeId::new("b")]);

        assert!(store.pop());
        assert_eq!(store.current_root(), Some(NodeId::new("a")));
        assert!(store.pop());
        assert!(!store.pop());
        assert_eq!(store.current_root(), None);
    }

    #[rstest]
    #[case::reset_when_already_empty(|store: &DrillPathStore| store.reset())]
    #[case::go_to_identical_path(|store: &DrillPathStore| store.go_to(Vec::new()))]
    #[case::pop_at_whole_graph_view(|store: &DrillPathStore| {
        store.pop();
    })]
    fn no_op_edits_do_not_notify(#[case] op: fn(&DrillPathStore)) {
        let store = DrillPathStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        let _subscription = store.subscribe(counter_listener(&count));

        op(&store);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listeners_notified_only_on_actual_change() {
        let store = DrillPathStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        let _subscription = store.subscribe(counter_listener(&count));

        store.push(NodeId::new("a"));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        store.go_to(vec![NodeId::new("a")]); // unchanged
        assert_eq!(count.load(Ordering::SeqCst), 1);

        store.go_to(vec![NodeId::new("a"), NodeId::new("b")]);
        store.reset();
        assert_eq!(count.load(Ordering::SeqCst), 3);

        assert!(!store.pop()); // empty again, no notification
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn listener_receives_new_path() {
        let store = DrillPathStore::new();
        let seen: Arc<Mutex<Vec<Vec<NodeId>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |path| {
            sink.lock().unwrap().push(path.to_vec());
        });

        store.push(NodeId::new("a"));
        store.push(NodeId::new("b"));
        store.pop();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], vec![NodeId::new("a")]);
        assert_eq!(seen[1], vec![NodeId::new("a"), NodeId::new("b")]);
        assert_eq!(seen[2], vec![NodeId::new("a")]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = DrillPathStore::new();
        let count = Arc::new(AtomicUsize::new(0));

        let subscription = store.subscribe(counter_listener(&count));
        store.push(NodeId::new("a"));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        drop(subscription);
        store.push(NodeId::new("b"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_reenter_the_store() {
        let store = DrillPathStore::new();
        let observed_root = Arc::new(Mutex::new(None));

        let handle = store.clone();
        let sink = Arc::clone(&observed_root);
        let _subscription = store.subscribe(move |_path| {
            *sink.lock().unwrap() = handle.current_root();
        });

        store.push(NodeId::new("a"));
        assert_eq!(*observed_root.lock().unwrap(), Some(NodeId::new("a")));
    }

    #[test]
    fn clones_share_state() {
        let store = DrillPathStore::new();
        let other = store.clone();

        store.push(NodeId::new("a"));
        assert_eq!(other.current_root(), Some(NodeId::new("a")));
    }
}
