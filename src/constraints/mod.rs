//! Eligibility constraints.
//!
//! Turns a [`Constraints`] bundle into a [`ConstraintPipeline`] of
//! [`EligibilityRule`]s and filters the candidate pool with it.
//!
//! Deny-type rules combine with logical AND; the affiliation allow-list is
//! the only inclusive rule and narrows the result further. Filtering never
//! fails: an empty result is a normal outcome that surfaces downstream as a
//! shortfall.
//!
//! # Usage
//!
//! ```
//! use u_roster::constraints::{self, Constraints};
//! use u_roster::models::{Candidate, CandidatePool};
//!
//! let pool = CandidatePool::new(vec![
//!     Candidate::new("A", "One").with_club("Band"),
//!     Candidate::new("B", "Two"),
//! ]);
//! let eligible = constraints::filter(&pool, &Constraints::new().deny_club("Band"));
//! assert_eq!(eligible.len(), 1);
//! ```

mod config;
mod pipeline;
pub mod rules;

pub use config::{Constraints, EmptyAffiliationMode, HeightRange, LockPrecedence};
pub use pipeline::ConstraintPipeline;

use crate::models::{Candidate, CandidatePool};
use std::fmt::Debug;

/// A predicate deciding whether a candidate may be newly allocated.
pub trait EligibilityRule: Send + Sync + Debug {
    /// Rule name (e.g., "DENY_GRADE").
    fn name(&self) -> &'static str;

    /// Returns `true` if the candidate passes this rule.
    fn admits(&self, candidate: &Candidate) -> bool;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Filters a pool with a constraint bundle.
///
/// No locked entries are considered; the engine passes them through
/// [`ConstraintPipeline::from_constraints`] instead.
pub fn filter<'a>(pool: &'a CandidatePool, constraints: &Constraints) -> Vec<&'a Candidate> {
    ConstraintPipeline::from_constraints(constraints, &[]).filter(pool.candidates())
}
