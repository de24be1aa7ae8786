//! Effect implementation.
//!
//! An Effect is a side-effecting computation that re-runs whenever one of
//! its dependencies changes.
//!
//! Effects run once at creation to establish their initial dependencies,
//! then synchronously on every propagation pass that reaches them. Before
//! each run the effect's stale dependency edges are cleared, so only the
//! signals read during the latest run can trigger the next one.
//!
//! Effects live as long as any clone of the handle is alive; dropping the
//! last clone (or calling [`Effect::dispose`]) detaches them from the
//! runtime. The field model holds its observers for the field's lifetime.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::context::TrackingContext;
use super::runtime::{Reactive, Runtime, RuntimeHandle};
use super::SubscriberId;

struct EffectInner {
    subscriber_id: SubscriberId,
    run_fn: Box<dyn Fn() + Send + Sync>,
    disposed: AtomicBool,
    run_count: AtomicUsize,
}

impl EffectInner {
    fn execute(&self) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }

        Runtime::clear_dependencies(self.subscriber_id);
        {
            let _frame = TrackingContext::enter(self.subscriber_id);
            (self.run_fn)();
        }
        self.run_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl Reactive for EffectInner {
    fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    fn mark_maybe_dirty(&self) {}

    fn is_eager(&self) -> bool {
        true
    }

    fn dependent_subscribers(&self) -> Vec<SubscriberId> {
        Vec::new()
    }

    fn run(&self) {
        self.execute();
    }
}

/// A side-effecting subscriber that re-runs when its dependencies change.
pub struct Effect {
    inner: Arc<EffectInner>,
    _registration: Arc<RuntimeHandle>,
}

impl Effect {
    /// Create a new effect.
    ///
    /// The function runs immediately to establish initial dependencies.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let inner = Arc::new(EffectInner {
            subscriber_id: SubscriberId::new(),
            run_fn: Box::new(run),
            disposed: AtomicBool::new(false),
            run_count: AtomicUsize::new(0),
        });
        let reactive: Arc<dyn Reactive> = inner.clone();
        let registration = Runtime::register(reactive);
        inner.execute();
        Self {
            inner,
            _registration: Arc::new(registration),
        }
    }

    /// Stop the effect permanently.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
    }

    /// Whether the effect has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// How many times the effect has run.
    pub fn run_count(&self) -> usize {
        self.inner.run_count.load(Ordering::SeqCst)
    }
}

impl Clone for Effect {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _registration: Arc::clone(&self._registration),
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("run_count", &self.run_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Signal;
    use std::sync::atomic::AtomicI32;

    #[test]
    fn effect_runs_on_creation() {
        let runs = Arc::new(AtomicI32::new(0));
        let runs_clone = runs.clone();

        let effect = Effect::new(move || {
            runs_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(effect.run_count(), 1);
    }

    #[test]
    fn effect_reruns_on_signal_write() {
        let signal = Signal::new(0);
        let observed = Arc::new(AtomicI32::new(-1));

        let source = signal.clone();
        let sink = observed.clone();
        let effect = Effect::new(move || {
            sink.store(source.get(), Ordering::SeqCst);
        });

        assert_eq!(observed.load(Ordering::SeqCst), 0);

        signal.set(42);
        assert_eq!(observed.load(Ordering::SeqCst), 42);
        assert_eq!(effect.run_count(), 2);
    }

    #[test]
    fn disposed_effect_does_not_run() {
        let signal = Signal::new(0);
        let runs = Arc::new(AtomicI32::new(0));

        let source = signal.clone();
        let counter = runs.clone();
        let effect = Effect::new(move || {
            source.get();
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        effect.dispose();
        assert!(effect.is_disposed());

        signal.set(1);
        signal.set(2);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_effect_detaches_from_signal() {
        let signal = Signal::new(0);
        let runs = Arc::new(AtomicI32::new(0));

        let source = signal.clone();
        let counter = runs.clone();
        let effect = Effect::new(move || {
            source.get();
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        drop(effect);
        signal.set(1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn effect_clone_shares_state() {
        let a = Effect::new(|| {});
        let b = a.clone();

        assert_eq!(a.run_count(), 1);
        assert_eq!(b.run_count(), 1);

        a.dispose();
        assert!(b.is_disposed());
    }
}
