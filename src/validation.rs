//! Input validation for allocation requests.
//!
//! Checks configuration before any allocation work begins. Detects:
//! - Negative quota counts
//! - Cohort keys that are not cohort numbers
//! - Two quota keys naming the same cohort (e.g., "4" and "๔")
//! - Inverted or non-finite height ranges
//! - Duplicate pool names when the pool rejects duplicates
//! - Unknown ranking policy identifiers
//!
//! All problems are collected, not just the first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constraints::Constraints;
use crate::models::{CandidatePool, CohortKey, DuplicateNamePolicy, Quota};
use crate::ranking::PolicyKind;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A quota requests fewer than zero people.
    NegativeQuota,
    /// A quota key does not parse as a cohort.
    MalformedCohortKey,
    /// Two quota keys resolve to the same cohort.
    DuplicateCohort,
    /// Height range has min > max or a non-finite bound.
    InvalidHeightRange,
    /// Two pool rows share a normalized name under `Reject`.
    DuplicateCandidate,
    /// Ranking policy identifier is not recognised.
    UnknownPolicy,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of an allocation.
///
/// Checks:
/// 1. No negative quota counts
/// 2. Every quota key parses as a cohort
/// 3. No two quota keys resolve to the same cohort
/// 4. Height range, if set, is finite and ordered
/// 5. No duplicate names when the pool uses [`DuplicateNamePolicy::Reject`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(
    pool: &CandidatePool,
    quotas: &Quota,
    constraints: &Constraints,
) -> ValidationResult {
    let mut errors = Vec::new();

    errors.extend(check_quotas(quotas));

    if let Some(range) = constraints.height_range {
        if !range.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHeightRange,
                format!(
                    "Height range [{}, {}] is not a valid interval",
                    range.min_cm, range.max_cm
                ),
            ));
        }
    }

    if pool.policy() == DuplicateNamePolicy::Reject {
        for name in pool.duplicates() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCandidate,
                format!("Duplicate candidate name: {name}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a ranking policy identifier.
pub fn validate_policy_name(name: &str) -> Result<PolicyKind, ValidationError> {
    name.parse::<PolicyKind>().map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::UnknownPolicy,
            format!("Unknown ranking policy: '{name}'"),
        )
    })
}

fn check_quotas(quotas: &Quota) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashMap<CohortKey, &str> = HashMap::new();

    for (raw, count) in quotas.iter() {
        if count < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeQuota,
                format!("Quota for cohort '{raw}' is negative: {count}"),
            ));
        }

        match CohortKey::parse(raw) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MalformedCohortKey,
                format!("Quota key '{raw}' is not a cohort number"),
            )),
            Some(key) => {
                if let Some(prev) = seen.insert(key, raw) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateCohort,
                        format!("Quota keys '{prev}' and '{raw}' both name cohort {key}"),
                    ));
                }
            }
        }
    }

    errors
}
