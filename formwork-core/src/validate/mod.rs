//! Validator execution.
//!
//! The field model does not implement validation itself; it consumes this
//! module through a narrow contract. Validators run against the current
//! value and produce a [`ValidateState`] snapshot; the derivations in
//! [`pipeline`] reshape that snapshot into the views a field exposes
//! (errors map, ordered error list, aggregate status).
//!
//! Validation errors are data, not faults: a failing validator yields an
//! [`ErrorDetail`], never a panic, and the derivations only read and
//! reshape what the validators produced.

mod pipeline;
mod state;

pub use pipeline::{
    compute_errors, compute_errors_array, compute_status, compute_validate_state, has_validator,
    validator, Validator, ValidatorList,
};
pub use state::{ErrorDetail, ValidateState, ValidateStatus};
