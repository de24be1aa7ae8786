//! Validation state snapshots.

use smallvec::SmallVec;
use thiserror::Error;

/// One structured validation failure.
///
/// `key` identifies the validator that produced the failure; `message` is
/// the human-readable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorDetail {
    pub key: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Aggregate outcome of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidateStatus {
    Valid,
    Invalid,
}

/// Snapshot of validator outcomes for one value.
///
/// `status` is `Valid` exactly when `details` is empty; it is derived at
/// construction and never set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateState {
    details: SmallVec<[ErrorDetail; 4]>,
    status: ValidateStatus,
}

impl ValidateState {
    pub fn new(details: SmallVec<[ErrorDetail; 4]>) -> Self {
        let status = if details.is_empty() {
            ValidateStatus::Valid
        } else {
            ValidateStatus::Invalid
        };
        Self { details, status }
    }

    /// The failures, in validator order.
    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    pub fn status(&self) -> ValidateStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidateStatus::Valid
    }
}

impl Default for ValidateState {
    fn default() -> Self {
        Self::new(SmallVec::new())
    }
}
