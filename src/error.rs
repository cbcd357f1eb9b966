//! Allocation errors.
//!
//! Only configuration problems are errors. A cohort that cannot be filled
//! is reported as a [`ShortfallRecord`](crate::models::ShortfallRecord).

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised before any allocation work begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// The request failed validation; every detected problem is listed.
    #[error("invalid allocation request: {}", join_messages(.0))]
    InvalidRequest(Vec<ValidationError>),

    /// A ranking policy identifier did not match any built-in policy.
    #[error("unknown ranking policy: {0}")]
    UnknownPolicy(String),
}

impl AllocationError {
    /// Validation problems carried by this error (empty for other variants).
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AllocationError::InvalidRequest(errors) => errors,
            AllocationError::UnknownPolicy(_) => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
