//! Memo implementation.
//!
//! A Memo is a cached derived value. It recomputes only when read after
//! one of its dependencies changed.
//!
//! # How it works
//!
//! 1. On first read, the memo runs its computation inside a tracking
//!    frame, caching the result and recording its signal dependencies
//!    with the runtime.
//!
//! 2. When a dependency changes, the runtime marks the memo maybe-dirty
//!    and, through the memo's recorded dependents, everything downstream
//!    of it. Nothing recomputes yet.
//!
//! 3. The next read recomputes and caches again. Reads while clean return
//!    the cache.
//!
//! Reading a memo inside another computation's frame records the reader
//! as a dependent, which is how invalidation crosses memo-to-memo edges.

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;

use super::context::TrackingContext;
use super::runtime::{Reactive, Runtime, RuntimeHandle};
use super::SubscriberId;

/// Cache state of a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoState {
    /// The cached value is up-to-date.
    Clean,
    /// A dependency changed since the last computation.
    MaybeDirty,
    /// Never computed.
    Dirty,
}

struct MemoInner<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    subscriber_id: SubscriberId,
    compute: Box<dyn Fn() -> T + Send + Sync>,
    value: RwLock<Option<T>>,
    state: RwLock<MemoState>,
    /// Subscribers that read this memo's output during their last run.
    dependents: RwLock<HashSet<SubscriberId>>,
}

impl<T> MemoInner<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    fn get(&self) -> T {
        if let Some(reader) = TrackingContext::current() {
            self.dependents.write().insert(reader);
        }

        if *self.state.read() == MemoState::Clean {
            if let Some(value) = self.value.read().clone() {
                return value;
            }
        }
        self.recompute()
    }

    fn recompute(&self) -> T {
        Runtime::clear_dependencies(self.subscriber_id);

        let new_value = {
            let _frame = TrackingContext::enter(self.subscriber_id);
            (self.compute)()
        };

        *self.value.write() = Some(new_value.clone());
        *self.state.write() = MemoState::Clean;
        new_value
    }
}

impl<T> Reactive for MemoInner<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    fn mark_maybe_dirty(&self) {
        let mut state = self.state.write();
        if *state == MemoState::Clean {
            *state = MemoState::MaybeDirty;
        }
    }

    fn is_eager(&self) -> bool {
        false
    }

    fn dependent_subscribers(&self) -> Vec<SubscriberId> {
        self.dependents.read().iter().copied().collect()
    }

    fn run(&self) {
        // Memos are lazy; they recompute on read.
    }
}

/// A cached derivation that recomputes only when dependencies change.
pub struct Memo<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    inner: Arc<MemoInner<T>>,
    _registration: Arc<RuntimeHandle>,
}

impl<T> Memo<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    /// Create a new memo with the given computation.
    ///
    /// The computation does not run until the first read.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let inner = Arc::new(MemoInner {
            subscriber_id: SubscriberId::new(),
            compute: Box::new(compute),
            value: RwLock::new(None),
            state: RwLock::new(MemoState::Dirty),
            dependents: RwLock::new(HashSet::new()),
        });
        let reactive: Arc<dyn Reactive> = inner.clone();
        let registration = Runtime::register(reactive);
        Self {
            inner,
            _registration: Arc::new(registration),
        }
    }

    /// Read the current value, recomputing if necessary.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// The memo's current cache state.
    pub fn state(&self) -> MemoState {
        *self.inner.state.read()
    }

    /// Whether the memo has ever computed a value.
    pub fn has_value(&self) -> bool {
        self.inner.value.read().is_some()
    }
}

impl<T> Clone for Memo<T>
where
    T: Clone + Send + Sync + PartialEq + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _registration: Arc::clone(&self._registration),
        }
    }
}

impl<T> Debug for Memo<T>
where
    T: Clone + Send + Sync + PartialEq + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo")
            .field("state", &self.state())
            .field("has_value", &self.has_value())
            .finish()
    }
}
