//! Versioned state store.
//!
//! A single tree holding `{local, remote}`. Reads hand out immutable snapshots;
//! every mutation copies the tree, applies a transform to the *current* value, and
//! swaps the result in under one lock, so concurrent remote pushes and local edits
//! never lose updates. Subscribers are notified after each mutation that changed
//! something, outside the lock.

pub mod lens;

pub use lens::Lens;

use crate::state::State;
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Immutable view of the tree at one version.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Incremented on every effective mutation.
    pub version: u64,
    /// Tree at `version`.
    pub state: Arc<State>,
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

thread_local! {
    /// Stores whose update closure is running on this thread.
    static UPDATING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a store as updating on this thread until dropped, unwinding included.
struct UpdatingGuard(usize);

impl UpdatingGuard {
    fn enter(key: usize) -> Self {
        UPDATING.with(|stores| stores.borrow_mut().push(key));
        Self(key)
    }

    fn is_updating(key: usize) -> bool {
        UPDATING.with(|stores| stores.borrow().contains(&key))
    }
}

impl Drop for UpdatingGuard {
    fn drop(&mut self) {
        UPDATING.with(|stores| {
            let mut stores = stores.borrow_mut();
            if let Some(index) = stores.iter().rposition(|key| *key == self.0) {
                stores.remove(index);
            }
        });
    }
}

struct Inner {
    tree: Mutex<Snapshot>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

/// Shared store handle. Cloning is cheap; all clones see the same tree.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl Store {
    /// Create a store holding `initial` at version 0.
    pub fn new(initial: State) -> Self {
        Self {
            inner: Arc::new(Inner {
                tree: Mutex::new(Snapshot {
                    version: 0,
                    state: Arc::new(initial),
                }),
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    /// Current snapshot of the whole tree.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::clone(&self.tree())
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.tree().version
    }

    /// Read the value at `lens`.
    pub fn get<T: Clone>(&self, lens: Lens<T>) -> T {
        let snapshot = self.snapshot();
        lens.get(&snapshot.state).clone()
    }

    /// Replace the value at `lens`.
    pub fn set<T>(&self, lens: Lens<T>, value: T) {
        self.update(|state| *lens.get_mut(state) = value);
        trace!(path = lens.name(), "store set");
    }

    /// Replace the value at `lens` with `f(current)`.
    pub fn change<T, F>(&self, lens: Lens<T>, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.update(|state| {
            let next = f(lens.get(state));
            *lens.get_mut(state) = next;
        });
        trace!(path = lens.name(), "store change");
    }

    /// Apply `f` to a private copy of the current tree and commit it atomically.
    ///
    /// This is the primitive behind `set` and `change`, and the entry point for
    /// transitions that touch several paths at once. The closure runs while the
    /// tree lock is held and must not call back into the store.
    ///
    /// The version is bumped and subscribers are notified only when the tree
    /// actually changed.
    ///
    /// # Panics
    ///
    /// If `f` reads or writes this store (or a clone of it). Without the check
    /// the nested lock would deadlock.
    pub fn update<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut State) -> R,
    {
        let (result, committed) = {
            let mut tree = self.tree();
            let mut next = State::clone(&tree.state);
            let result = {
                let _updating = UpdatingGuard::enter(self.key());
                f(&mut next)
            };

            if next == *tree.state {
                (result, None)
            } else {
                tree.version += 1;
                tree.state = Arc::new(next);
                (result, Some(Snapshot::clone(&tree)))
            }
        };

        if let Some(snapshot) = committed {
            self.notify(&snapshot);
        }

        result
    }

    /// Register a listener called with the new snapshot after each mutation.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, snapshot: &Snapshot) {
        // Listeners may subscribe, unsubscribe or mutate; call them unlocked.
        let listeners: Vec<Listener> = self
            .listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(snapshot);
        }
    }

    fn tree(&self) -> MutexGuard<'_, Snapshot> {
        assert!(
            !UpdatingGuard::is_updating(self.key()),
            "store accessed from inside its own update closure"
        );
        self.inner.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Identity shared by all clones.
    fn key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
