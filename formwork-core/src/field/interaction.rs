//! Interaction state: dirty and touched tracking.
//!
//! Dirty tracking is driven by an observer on the value cell. The observer
//! keeps one remembered previous value as its baseline; the first
//! observation of a dirty epoch (after construction or reset) only records
//! the baseline, and every later observation that differs from it by value
//! equality moves the field to dirty. `None` is the explicit "no baseline"
//! sentinel, distinct from any legal field value, so a reset cannot be
//! mistaken for a user edit.
//!
//! Touched is never driven by value changes; it moves only through
//! explicit marking and reset.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::reactive::{Effect, Signal};

/// Pristine/dirty tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirtyState {
    Pristine,
    Dirty,
}

impl DirtyState {
    pub fn is_dirty(self) -> bool {
        self == Self::Dirty
    }
}

/// Touched/untouched tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchedState {
    Untouched,
    Touched,
}

impl TouchedState {
    pub fn is_touched(self) -> bool {
        self == Self::Touched
    }
}

/// Baseline slot shared between the dirty observer and reset.
pub(super) type Baseline<T> = Arc<RwLock<Option<T>>>;

/// Spawn the value observer that drives the dirty transition.
///
/// Returns the baseline slot (cleared by reset) and the observer effect,
/// which must be kept alive for the field's lifetime.
pub(super) fn dirty_observer<T>(
    value: &Signal<T>,
    dirty_state: &Signal<DirtyState>,
) -> (Baseline<T>, Effect)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let baseline: Baseline<T> = Arc::new(RwLock::new(None));

    let observer = {
        let value = value.clone();
        let dirty_state = dirty_state.clone();
        let baseline = baseline.clone();
        Effect::new(move || {
            let current = value.get();
            let diverged = {
                let mut slot = baseline.write();
                let diverged = slot.as_ref().is_some_and(|previous| *previous != current);
                *slot = Some(current);
                diverged
            };
            // Untracked read: the observer must not subscribe to its own
            // output cell.
            if diverged && dirty_state.get_untracked() != DirtyState::Dirty {
                tracing::debug!("field value diverged from baseline, marking dirty");
                dirty_state.set(DirtyState::Dirty);
            }
        })
    };

    (baseline, observer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_only_records_baseline() {
        let value = Signal::new(1);
        let dirty = Signal::new(DirtyState::Pristine);
        let (baseline, _observer) = dirty_observer(&value, &dirty);

        assert_eq!(*baseline.read(), Some(1));
        assert_eq!(dirty.get(), DirtyState::Pristine);
    }

    #[test]
    fn distinct_write_marks_dirty() {
        let value = Signal::new(1);
        let dirty = Signal::new(DirtyState::Pristine);
        let (_baseline, _observer) = dirty_observer(&value, &dirty);

        value.set(2);
        assert_eq!(dirty.get(), DirtyState::Dirty);
    }

    #[test]
    fn equal_write_stays_pristine() {
        let value = Signal::new(1);
        let dirty = Signal::new(DirtyState::Pristine);
        let (_baseline, _observer) = dirty_observer(&value, &dirty);

        value.set(1);
        assert_eq!(dirty.get(), DirtyState::Pristine);
    }

    #[test]
    fn cleared_baseline_starts_a_new_epoch() {
        let value = Signal::new(1);
        let dirty = Signal::new(DirtyState::Pristine);
        let (baseline, _observer) = dirty_observer(&value, &dirty);

        *baseline.write() = None;
        value.set(5);
        // First observation of the new epoch: baseline only.
        assert_eq!(dirty.get(), DirtyState::Pristine);

        value.set(6);
        assert_eq!(dirty.get(), DirtyState::Dirty);
    }
}
