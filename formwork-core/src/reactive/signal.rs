//! Signal implementation.
//!
//! A Signal is the fundamental reactive primitive: a value cell whose
//! reads are tracked and whose writes trigger propagation.
//!
//! Reading inside a tracking frame (a memo or effect run) records the
//! reader with the runtime, so the runtime knows who to notify on the
//! next write. Reads outside any frame are plain reads.
//!
//! Clones of a signal share the same cell, which is what lets a field
//! forward a caller-owned signal: writes from either side propagate to
//! the same dependents.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::context::TrackingContext;
use super::runtime::Runtime;

static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A reactive value cell.
pub struct Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    id: u64,
    value: Arc<RwLock<T>>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: next_signal_id(),
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// The signal's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Read the current value.
    ///
    /// Inside a tracking frame this also records the current computation
    /// as a dependent of the signal.
    pub fn get(&self) -> T {
        if let Some(subscriber_id) = TrackingContext::current() {
            Runtime::add_dependency(self.id, subscriber_id);
        }
        self.value.read().clone()
    }

    /// Read the current value without establishing a dependency.
    pub fn get_untracked(&self) -> T {
        self.value.read().clone()
    }

    /// Write a new value and propagate to dependents.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.value.write();
            *guard = value;
        }
        tracing::trace!(signal_id = self.id, "signal write");
        Runtime::notify_signal_change(self.id);
    }

    /// Write a new value computed from the current one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = {
            let guard = self.value.read();
            f(&guard)
        };
        self.set(next);
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &self.get_untracked())
            .finish()
    }
}
