//! The reactive field model.
//!
//! A [`Field`] is one unit of form state. It owns (or forwards) a value
//! cell and derives everything else from it automatically: validation
//! views, dirty/touched interaction state, and hidden/disabled/read-only
//! configuration flags. Callers never re-run checks by hand; writing the
//! value is enough.
//!
//! # Sub-models
//!
//! - value cell and construction plumbing (this file),
//! - validation pipeline, wired through [`crate::validate`],
//! - interaction state machine ([`interaction`]),
//! - configuration flags, one independent observer per supplied predicate.
//!
//! # Reset protocol
//!
//! [`Field::reset`] restores the value captured at construction, returns
//! both interaction tags to their initial states, and starts a new dirty
//! epoch: the baseline tracker is cleared first so the restore write
//! re-establishes the baseline instead of counting as an edit. The
//! registered reset callback runs last and observes the fully reset
//! field.

mod interaction;
mod options;

pub use interaction::{DirtyState, TouchedState};
pub use options::{FieldConfig, FieldOptions, FlagPredicate};

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::reactive::{Effect, Memo, Signal};
use crate::validate::{
    self, compute_errors, compute_errors_array, compute_status, compute_validate_state,
    ErrorDetail, ValidateStatus, Validator, ValidatorList,
};

use interaction::Baseline;

type ResetCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A reactive unit of form state.
///
/// Cloning a field is cheap and yields a handle to the same state.
pub struct Field<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    value: Signal<T>,
    default_value: T,
    validators: Option<ValidatorList<T>>,

    errors: Memo<IndexMap<String, String>>,
    errors_array: Memo<Vec<ErrorDetail>>,
    status: Memo<ValidateStatus>,
    valid: Memo<bool>,

    dirty_state: Signal<DirtyState>,
    touched_state: Signal<TouchedState>,
    dirty: Memo<bool>,
    touched: Memo<bool>,

    hidden: Signal<bool>,
    disabled: Signal<bool>,
    read_only: Signal<bool>,

    baseline: Baseline<T>,
    reset_callback: Arc<RwLock<Option<ResetCallback<T>>>>,

    /// Observers live exactly as long as the field.
    observers: Arc<Vec<Effect>>,
}

impl<T> Field<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a field that exclusively owns its value cell.
    pub fn new(initial: T, options: FieldOptions<T>) -> Self {
        let cell = Signal::new(initial.clone());
        Self::build(cell, initial, options)
    }

    /// Create a field from a configuration that may depend on the initial
    /// value. The configuration is resolved exactly once.
    pub fn with_config(initial: T, config: FieldConfig<T>) -> Self {
        let options = config.resolve(&initial);
        Self::new(initial, options)
    }

    /// Create a field over a caller-owned value cell.
    ///
    /// Ownership of the cell is shared: writes from outside the field and
    /// writes through [`Field::set_value`] drive the same derived state.
    /// The default value is a one-time snapshot of the cell's content at
    /// construction, not a live reference.
    pub fn from_signal(source: Signal<T>, options: FieldOptions<T>) -> Self {
        let snapshot = source.get_untracked();
        Self::build(source, snapshot, options)
    }

    /// [`Field::from_signal`] with a value-dependent configuration.
    pub fn from_signal_with_config(source: Signal<T>, config: FieldConfig<T>) -> Self {
        let snapshot = source.get_untracked();
        let options = config.resolve(&snapshot);
        Self::build(source, snapshot, options)
    }

    fn build(value: Signal<T>, default_value: T, options: FieldOptions<T>) -> Self {
        let FieldOptions {
            validators,
            hidden,
            disabled,
            read_only,
        } = options;

        let validators = validators.map(ValidatorList::resolve);
        let validate_state = compute_validate_state(&value, validators.clone());
        let errors = compute_errors(&validate_state);
        let errors_array = compute_errors_array(&validate_state);
        let status = compute_status(&validate_state);
        let valid = {
            let status = status.clone();
            Memo::new(move || status.get() == ValidateStatus::Valid)
        };

        let dirty_state = Signal::new(DirtyState::Pristine);
        let touched_state = Signal::new(TouchedState::Untouched);
        let dirty = {
            let state = dirty_state.clone();
            Memo::new(move || state.get().is_dirty())
        };
        let touched = {
            let state = touched_state.clone();
            Memo::new(move || state.get().is_touched())
        };

        let mut observers = Vec::new();
        let (baseline, observer) = interaction::dirty_observer(&value, &dirty_state);
        observers.push(observer);

        let hidden = flag_cell(hidden, &mut observers);
        let disabled = flag_cell(disabled, &mut observers);
        let read_only = flag_cell(read_only, &mut observers);

        Self {
            value,
            default_value,
            validators,
            errors,
            errors_array,
            status,
            valid,
            dirty_state,
            touched_state,
            dirty,
            touched,
            hidden,
            disabled,
            read_only,
            baseline,
            reset_callback: Arc::new(RwLock::new(None)),
            observers: Arc::new(observers),
        }
    }

    /// Read the current value (tracked).
    pub fn value(&self) -> T {
        self.value.get()
    }

    /// Write a new value. All derived state reacts synchronously.
    pub fn set_value(&self, value: T) {
        self.value.set(value);
    }

    /// The underlying value cell.
    ///
    /// Useful for wiring the field's value into further derivations, e.g.
    /// another field's flag predicate.
    pub fn value_signal(&self) -> &Signal<T> {
        &self.value
    }

    /// The value captured at construction; restored by [`Field::reset`].
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Error map: validator key -> message, in validator order.
    pub fn errors(&self) -> IndexMap<String, String> {
        self.errors.get()
    }

    /// Ordered list of structured error details.
    pub fn errors_array(&self) -> Vec<ErrorDetail> {
        self.errors_array.get()
    }

    /// Aggregate validation status.
    pub fn status(&self) -> ValidateStatus {
        self.status.get()
    }

    /// `true` exactly when [`Field::status`] is `Valid`.
    pub fn valid(&self) -> bool {
        self.valid.get()
    }

    /// Whether the error map currently contains `key`.
    pub fn has_error(&self, key: &str) -> bool {
        self.errors.get().contains_key(key)
    }

    /// Message of the first error detail with the given key, if any.
    pub fn error_message(&self, key: &str) -> Option<String> {
        self.errors_array
            .get()
            .into_iter()
            .find(|detail| detail.key == key)
            .map(|detail| detail.message)
    }

    /// Whether `validator` is among this field's configured validators.
    ///
    /// `false` when the field was configured without validators.
    pub fn has_validator(&self, validator: &Arc<dyn Validator<T>>) -> bool {
        validate::has_validator(self.validators.as_ref(), validator)
    }

    pub fn dirty_state(&self) -> DirtyState {
        self.dirty_state.get()
    }

    /// Whether the value has diverged from its baseline this epoch.
    pub fn dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn touched_state(&self) -> TouchedState {
        self.touched_state.get()
    }

    /// Whether the field was explicitly marked as interacted-with.
    pub fn touched(&self) -> bool {
        self.touched.get()
    }

    pub fn hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn read_only(&self) -> bool {
        self.read_only.get()
    }

    /// Mark the field as touched. Never depends on the value.
    pub fn mark_as_touched(&self) {
        self.touched_state.set(TouchedState::Touched);
    }

    /// Mark the field as dirty, independent of the value observer.
    pub fn mark_as_dirty(&self) {
        self.dirty_state.set(DirtyState::Dirty);
    }

    /// Register the reset callback.
    ///
    /// A single slot: registering again replaces the previous callback.
    pub fn register_on_reset(&self, callback: impl Fn(&T) + Send + Sync + 'static) {
        *self.reset_callback.write() = Some(Arc::new(callback));
    }

    /// Restore the field to its construction-time state.
    ///
    /// The baseline is cleared before the restore write, so the write's
    /// own propagation starts a fresh dirty epoch instead of marking the
    /// field dirty. The reset callback runs last, observing the field
    /// fully reset.
    pub fn reset(&self) {
        tracing::debug!("resetting field");
        *self.baseline.write() = None;
        self.value.set(self.default_value.clone());
        self.touched_state.set(TouchedState::Untouched);
        self.dirty_state.set(DirtyState::Pristine);

        let callback = self.reset_callback.read().clone();
        if let Some(callback) = callback {
            callback(&self.default_value);
        }
    }
}

impl<T> Clone for Field<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            default_value: self.default_value.clone(),
            validators: self.validators.clone(),
            errors: self.errors.clone(),
            errors_array: self.errors_array.clone(),
            status: self.status.clone(),
            valid: self.valid.clone(),
            dirty_state: self.dirty_state.clone(),
            touched_state: self.touched_state.clone(),
            dirty: self.dirty.clone(),
            touched: self.touched.clone(),
            hidden: self.hidden.clone(),
            disabled: self.disabled.clone(),
            read_only: self.read_only.clone(),
            baseline: self.baseline.clone(),
            reset_callback: self.reset_callback.clone(),
            observers: self.observers.clone(),
        }
    }
}

/// Build one flag cell: constant `false`, or driven by its own observer.
///
/// Each predicate gets an independent effect so re-evaluating one flag
/// never re-evaluates the others.
fn flag_cell(predicate: Option<FlagPredicate>, observers: &mut Vec<Effect>) -> Signal<bool> {
    let cell = Signal::new(false);
    if let Some(predicate) = predicate {
        let target = cell.clone();
        observers.push(Effect::new(move || {
            let current = predicate();
            if target.get_untracked() != current {
                target.set(current);
            }
        }));
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validator;

    fn positive() -> Arc<dyn Validator<i32>> {
        validator("positive", |v: &i32| {
            (*v <= 0).then(|| "must be positive".to_string())
        })
    }

    #[test]
    fn flags_default_to_false_without_predicates() {
        let field = Field::new(0, FieldOptions::default());
        assert!(!field.hidden());
        assert!(!field.disabled());
        assert!(!field.read_only());
    }

    #[test]
    fn flag_predicates_are_independent() {
        let hidden_toggle = Signal::new(false);
        let disabled_toggle = Signal::new(false);

        let h = hidden_toggle.clone();
        let d = disabled_toggle.clone();
        let field = Field::new(
            0,
            FieldOptions::default()
                .hidden(move || h.get())
                .disabled(move || d.get()),
        );

        hidden_toggle.set(true);
        assert!(field.hidden());
        assert!(!field.disabled());

        disabled_toggle.set(true);
        assert!(field.disabled());
    }

    #[test]
    fn valid_mirrors_status() {
        let field = Field::new(0, FieldOptions::default().validators(vec![positive()]));
        assert_eq!(field.status(), ValidateStatus::Invalid);
        assert!(!field.valid());

        field.set_value(1);
        assert_eq!(field.status(), ValidateStatus::Valid);
        assert!(field.valid());
    }

    #[test]
    fn has_validator_is_by_identity() {
        let configured = positive();
        let other = positive();
        let field = Field::new(
            0,
            FieldOptions::default().validators(vec![configured.clone()]),
        );

        assert!(field.has_validator(&configured));
        assert!(!field.has_validator(&other));

        let bare = Field::new(0, FieldOptions::default());
        assert!(!bare.has_validator(&configured));
    }

    #[test]
    fn clone_shares_field_state() {
        let field = Field::new(0, FieldOptions::default());
        let alias = field.clone();

        field.set_value(7);
        assert_eq!(alias.value(), 7);

        alias.mark_as_touched();
        assert!(field.touched());
    }

    #[test]
    fn default_value_is_a_construction_snapshot() {
        let source = Signal::new(3);
        let field = Field::from_signal(source.clone(), FieldOptions::default());

        source.set(9);
        assert_eq!(*field.default_value(), 3);
        assert_eq!(field.value(), 9);
    }
}
