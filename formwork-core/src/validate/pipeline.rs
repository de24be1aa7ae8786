//! Validator resolution and derived validation views.
//!
//! A field resolves its configured validators once at construction into a
//! [`ValidatorList`], then wires the value cell through
//! [`compute_validate_state`]. The remaining derivations are memos over
//! that one snapshot, so a value write recomputes validators exactly once
//! per read of any downstream view.

use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::state::{ErrorDetail, ValidateState, ValidateStatus};
use crate::reactive::{Memo, Signal};

/// A single validation rule for values of type `T`.
pub trait Validator<T>: Send + Sync {
    /// The error key this validator reports under.
    fn key(&self) -> &str;

    /// Check the value; `Err` carries the failure detail.
    fn validate(&self, value: &T) -> Result<(), ErrorDetail>;
}

struct FnValidator<F> {
    key: String,
    check: F,
}

impl<T, F> Validator<T> for FnValidator<F>
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn validate(&self, value: &T) -> Result<(), ErrorDetail> {
        match (self.check)(value) {
            None => Ok(()),
            Some(message) => Err(ErrorDetail::new(self.key.clone(), message)),
        }
    }
}

/// Wrap a closure as a validator.
///
/// The closure returns `Some(message)` on failure, `None` on success.
pub fn validator<T, F>(key: impl Into<String>, check: F) -> Arc<dyn Validator<T>>
where
    T: 'static,
    F: Fn(&T) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(FnValidator {
        key: key.into(),
        check,
    })
}

/// The resolved validator collection of one field.
///
/// Equality and membership are by `Arc` identity: two lists are equal when
/// they hold the same validator instances, and [`ValidatorList::contains`]
/// asks whether a specific instance is configured.
pub struct ValidatorList<T> {
    entries: Vec<Arc<dyn Validator<T>>>,
}

impl<T> ValidatorList<T> {
    /// Resolve a caller-supplied validator set.
    pub fn resolve(entries: Vec<Arc<dyn Validator<T>>>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, validator: &Arc<dyn Validator<T>>) -> bool {
        self.entries.iter().any(|entry| Arc::ptr_eq(entry, validator))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every validator against `value`, collecting failures in order.
    pub fn run(&self, value: &T) -> SmallVec<[ErrorDetail; 4]> {
        self.entries
            .iter()
            .filter_map(|entry| entry.validate(value).err())
            .collect()
    }
}

impl<T> Clone for ValidatorList<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> PartialEq for ValidatorList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

/// Derive the validation snapshot from a value cell and validator list.
pub fn compute_validate_state<T>(
    value: &Signal<T>,
    validators: Option<ValidatorList<T>>,
) -> Memo<ValidateState>
where
    T: Clone + Send + Sync + 'static,
{
    let value = value.clone();
    Memo::new(move || {
        let current = value.get();
        let details = match &validators {
            Some(list) => list.run(&current),
            None => SmallVec::new(),
        };
        ValidateState::new(details)
    })
}

/// Derive the error map: key -> message, in validator order.
pub fn compute_errors(state: &Memo<ValidateState>) -> Memo<IndexMap<String, String>> {
    let state = state.clone();
    Memo::new(move || {
        state
            .get()
            .details()
            .iter()
            .map(|detail| (detail.key.clone(), detail.message.clone()))
            .collect()
    })
}

/// Derive the ordered list of structured error details.
pub fn compute_errors_array(state: &Memo<ValidateState>) -> Memo<Vec<ErrorDetail>> {
    let state = state.clone();
    Memo::new(move || state.get().details().to_vec())
}

/// Derive the aggregate status.
pub fn compute_status(state: &Memo<ValidateState>) -> Memo<ValidateStatus> {
    let state = state.clone();
    Memo::new(move || state.get().status())
}

/// Whether `validator` is among the configured validators.
///
/// `false` when no validators were configured at all.
pub fn has_validator<T>(
    list: Option<&ValidatorList<T>>,
    validator: &Arc<dyn Validator<T>>,
) -> bool {
    list.is_some_and(|list| list.contains(validator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive() -> Arc<dyn Validator<i32>> {
        validator("positive", |v: &i32| {
            (*v <= 0).then(|| "must be positive".to_string())
        })
    }

    #[test]
    fn closure_validator_reports_under_its_key() {
        let v = positive();
        assert_eq!(v.key(), "positive");
        assert!(v.validate(&5).is_ok());

        let detail = v.validate(&0).unwrap_err();
        assert_eq!(detail.key, "positive");
        assert_eq!(detail.message, "must be positive");
    }

    #[test]
    fn validator_list_membership_is_by_identity() {
        let a = positive();
        let b = positive();
        let list = ValidatorList::resolve(vec![a.clone()]);

        assert!(list.contains(&a));
        assert!(!list.contains(&b));
        assert!(has_validator(Some(&list), &a));
        assert!(!has_validator::<i32>(None, &a));
    }

    #[test]
    fn validate_state_tracks_value_writes() {
        let value = Signal::new(0);
        let list = ValidatorList::resolve(vec![positive()]);
        let state = compute_validate_state(&value, Some(list));

        assert!(!state.get().is_valid());

        value.set(3);
        assert!(state.get().is_valid());
    }

    #[test]
    fn derivations_reshape_one_snapshot() {
        let value = Signal::new(-1);
        let list = ValidatorList::resolve(vec![
            positive(),
            validator("even", |v: &i32| {
                (*v % 2 != 0).then(|| "must be even".to_string())
            }),
        ]);
        let state = compute_validate_state(&value, Some(list));
        let errors = compute_errors(&state);
        let errors_array = compute_errors_array(&state);
        let status = compute_status(&state);

        assert_eq!(status.get(), ValidateStatus::Invalid);
        assert_eq!(errors.get().len(), 2);
        let array = errors_array.get();
        assert_eq!(array[0].key, "positive");
        assert_eq!(array[1].key, "even");

        value.set(4);
        assert_eq!(status.get(), ValidateStatus::Valid);
        assert!(errors.get().is_empty());
        assert!(errors_array.get().is_empty());
    }

    #[test]
    fn no_validators_is_always_valid() {
        let value = Signal::new(0);
        let state = compute_validate_state::<i32>(&value, None);
        assert!(state.get().is_valid());

        value.set(-100);
        assert!(state.get().is_valid());
    }
}
