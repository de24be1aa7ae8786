//! Field configuration.
//!
//! A field is configured once at construction. The configuration may be a
//! plain [`FieldOptions`] or a factory from the initial value
//! ([`FieldConfig::WithValue`]); either way it resolves into one static
//! options struct and is never re-evaluated as a whole. Only the
//! individual flag predicates keep reacting after construction.

use std::sync::Arc;

use crate::validate::Validator;

/// Zero-argument predicate driving a configuration flag.
///
/// Re-evaluated whenever its own reactive dependencies change.
pub type FlagPredicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Static configuration of one field.
pub struct FieldOptions<T> {
    pub validators: Option<Vec<Arc<dyn Validator<T>>>>,
    pub hidden: Option<FlagPredicate>,
    pub disabled: Option<FlagPredicate>,
    pub read_only: Option<FlagPredicate>,
}

impl<T> FieldOptions<T> {
    pub fn validators(mut self, validators: Vec<Arc<dyn Validator<T>>>) -> Self {
        self.validators = Some(validators);
        self
    }

    pub fn hidden(mut self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.hidden = Some(Arc::new(predicate));
        self
    }

    pub fn disabled(mut self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    pub fn read_only(mut self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.read_only = Some(Arc::new(predicate));
        self
    }
}

impl<T> Default for FieldOptions<T> {
    fn default() -> Self {
        Self {
            validators: None,
            hidden: None,
            disabled: None,
            read_only: None,
        }
    }
}

/// Configuration as supplied by the caller: static, or derived from the
/// initial value.
pub enum FieldConfig<T> {
    Static(FieldOptions<T>),
    WithValue(Box<dyn FnOnce(&T) -> FieldOptions<T> + Send>),
}

impl<T> FieldConfig<T> {
    /// Build a value-dependent configuration.
    pub fn with_value(factory: impl FnOnce(&T) -> FieldOptions<T> + Send + 'static) -> Self {
        Self::WithValue(Box::new(factory))
    }

    /// Resolve into static options. Evaluated exactly once, at
    /// construction.
    pub fn resolve(self, value: &T) -> FieldOptions<T> {
        match self {
            Self::Static(options) => options,
            Self::WithValue(factory) => factory(value),
        }
    }
}

impl<T> From<FieldOptions<T>> for FieldConfig<T> {
    fn from(options: FieldOptions<T>) -> Self {
        Self::Static(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_carry_nothing() {
        let options = FieldOptions::<i32>::default();
        assert!(options.validators.is_none());
        assert!(options.hidden.is_none());
        assert!(options.disabled.is_none());
        assert!(options.read_only.is_none());
    }

    #[test]
    fn config_factory_sees_the_initial_value() {
        let config = FieldConfig::with_value(|initial: &i32| {
            let locked = *initial < 0;
            FieldOptions::default().read_only(move || locked)
        });

        let options = config.resolve(&-3);
        let predicate = options.read_only.expect("factory set a predicate");
        assert!(predicate());
    }
}
