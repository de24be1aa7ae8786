//! Reactive runtime.
//!
//! The runtime is the coordinator between signals, memos, and effects. It
//! keeps two registries: subscriber ID -> weak handle to the computation,
//! and signal ID -> subscriber IDs that read it during their last run.
//!
//! # Propagation
//!
//! When a signal is written, [`Runtime::notify_signal_change`] walks the
//! dependency edges breadth-first starting from the signal's direct
//! readers. Memos are marked maybe-dirty and their own dependents are
//! enqueued; effects are collected, deduplicated, and run once each after
//! the marking walk completes. This ordering guarantees that every effect
//! in a pass observes a fully consistent snapshot and runs at most once.
//!
//! Registrations hold weak references, so dropping the last clone of a
//! memo or effect (via its [`RuntimeHandle`]) removes it from propagation.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, OnceLock, Weak};

use dashmap::DashMap;

use super::SubscriberId;

/// A computation the runtime can notify when dependencies change.
pub trait Reactive: Send + Sync {
    /// The subscriber ID used for dependency tracking.
    fn subscriber_id(&self) -> SubscriberId;

    /// Mark this computation as potentially stale.
    fn mark_maybe_dirty(&self);

    /// Whether the computation runs eagerly on invalidation (effects) or
    /// lazily on read (memos).
    fn is_eager(&self) -> bool;

    /// Subscribers that read this computation's output.
    ///
    /// Empty for effects: they are leaves of the dependency graph.
    fn dependent_subscribers(&self) -> Vec<SubscriberId>;

    /// Execute the computation (eager subscribers only).
    fn run(&self);
}

/// Handle to a registered computation.
///
/// Dropping the handle unregisters the computation from the runtime.
pub struct RuntimeHandle {
    subscriber_id: SubscriberId,
}

impl Drop for RuntimeHandle {
    fn drop(&mut self) {
        Runtime::unregister(self.subscriber_id);
    }
}

/// The global reactive runtime.
pub struct Runtime;

static REGISTRY: OnceLock<DashMap<SubscriberId, Weak<dyn Reactive>>> = OnceLock::new();
static SIGNAL_READERS: OnceLock<DashMap<u64, Vec<SubscriberId>>> = OnceLock::new();

fn registry() -> &'static DashMap<SubscriberId, Weak<dyn Reactive>> {
    REGISTRY.get_or_init(DashMap::new)
}

fn signal_readers() -> &'static DashMap<u64, Vec<SubscriberId>> {
    SIGNAL_READERS.get_or_init(DashMap::new)
}

impl Runtime {
    /// Register a computation with the runtime.
    ///
    /// Returns a handle that unregisters the computation when dropped.
    pub fn register(reactive: Arc<dyn Reactive>) -> RuntimeHandle {
        let subscriber_id = reactive.subscriber_id();
        registry().insert(subscriber_id, Arc::downgrade(&reactive));
        RuntimeHandle { subscriber_id }
    }

    fn unregister(subscriber_id: SubscriberId) {
        registry().remove(&subscriber_id);
        for mut entry in signal_readers().iter_mut() {
            entry.value_mut().retain(|s| *s != subscriber_id);
        }
    }

    /// Record that `subscriber_id` read the signal `signal_id`.
    ///
    /// Called by signals when read inside a tracking frame.
    pub fn add_dependency(signal_id: u64, subscriber_id: SubscriberId) {
        let mut readers = signal_readers().entry(signal_id).or_default();
        if !readers.contains(&subscriber_id) {
            readers.push(subscriber_id);
        }
    }

    /// Remove every recorded dependency of `subscriber_id`.
    ///
    /// Called before a computation re-runs so that edges from a previous
    /// run do not linger.
    pub fn clear_dependencies(subscriber_id: SubscriberId) {
        for mut entry in signal_readers().iter_mut() {
            entry.value_mut().retain(|s| *s != subscriber_id);
        }
    }

    /// Propagate a signal write to everything that depends on it.
    pub fn notify_signal_change(signal_id: u64) {
        let start = signal_readers()
            .get(&signal_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        if start.is_empty() {
            return;
        }

        let mut queue: VecDeque<SubscriberId> = start.into();
        let mut seen: HashSet<SubscriberId> = HashSet::new();
        let mut effects: Vec<Arc<dyn Reactive>> = Vec::new();

        while let Some(subscriber_id) = queue.pop_front() {
            if !seen.insert(subscriber_id) {
                continue;
            }
            let handle = registry().get(&subscriber_id).map(|entry| entry.value().clone());
            let Some(reactive) = handle.and_then(|weak| weak.upgrade()) else {
                continue;
            };

            reactive.mark_maybe_dirty();
            if reactive.is_eager() {
                effects.push(reactive);
            } else {
                queue.extend(reactive.dependent_subscribers());
            }
        }

        tracing::trace!(
            signal_id,
            marked = seen.len(),
            effects = effects.len(),
            "signal change propagated"
        );

        for effect in effects {
            effect.run();
        }
    }
}
