//! Formwork Core
//!
//! This crate provides the core runtime for the Formwork reactive form
//! framework. It implements:
//!
//! - Reactive primitives (signals, memos, effects) and their runtime
//! - Validator execution and derived validation views
//! - The reactive field model (value, validation, dirty/touched,
//!   configuration flags, reset)
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - `reactive`: dependency-tracked cells, derivations, and side-effect
//!   subscribers, with synchronous single-pass propagation
//! - `validate`: the validator-execution collaborator the field model
//!   consumes through a narrow contract
//! - `field`: the field model itself
//!
//! # Example
//!
//! ```rust,ignore
//! use formwork_core::field::{Field, FieldOptions};
//! use formwork_core::validate::validator;
//!
//! let amount = Field::new(
//!     0,
//!     FieldOptions::default().validators(vec![validator("positive", |v: &i32| {
//!         (*v <= 0).then(|| "must be positive".to_string())
//!     })]),
//! );
//!
//! assert!(!amount.valid());
//! assert!(!amount.dirty());
//!
//! amount.set_value(5);
//! // Validation and dirty tracking reacted automatically.
//! assert!(amount.valid());
//! assert!(amount.dirty());
//!
//! amount.reset();
//! assert_eq!(amount.value(), 0);
//! assert!(!amount.dirty());
//! ```

pub mod field;
pub mod reactive;
pub mod validate;
