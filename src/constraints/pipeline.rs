//! Constraint pipeline.
//!
//! Composes eligibility rules into a single AND-ed test.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::rules::{
    AffiliationAllowList, AssignmentCeiling, DenyList, HeightWithin, NotExcluded,
    PositionPattern, TagField,
};
use super::{Constraints, EligibilityRule};
use crate::models::{Candidate, LockedEntry};

/// An ordered set of eligibility rules.
///
/// A candidate is eligible when every rule admits it.
///
/// # Example
/// ```
/// use u_roster::constraints::{ConstraintPipeline, Constraints};
/// use u_roster::models::Candidate;
///
/// let constraints = Constraints::new().deny_grade("F");
/// let pipeline = ConstraintPipeline::from_constraints(&constraints, &[]);
///
/// let pool = vec![
///     Candidate::new("A", "One").with_grade("F"),
///     Candidate::new("B", "Two").with_grade("B"),
/// ];
/// let eligible = pipeline.filter(&pool);
/// assert_eq!(eligible.len(), 1);
/// assert_eq!(pipeline.explain(&pool[0]), Some("DENY_GRADE"));
/// ```
#[derive(Clone, Default)]
pub struct ConstraintPipeline {
    rules: Vec<Arc<dyn EligibilityRule>>,
}

impl ConstraintPipeline {
    /// Creates an empty pipeline (admits everyone).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    pub fn with_rule<R: EligibilityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Builds the pipeline for one allocation.
    ///
    /// Names in exclusion sets, the roster draft, and `locked` are all
    /// blocked from new allocation. Rules with nothing to check are left out.
    pub fn from_constraints(constraints: &Constraints, locked: &[LockedEntry]) -> Self {
        let mut pipeline = Self::new().with_rule(AffiliationAllowList::new(
            constraints.affiliations.clone(),
            constraints.empty_affiliation,
        ));

        let deny_lists = [
            (TagField::Grade, &constraints.denied_grades),
            (TagField::AdminDuty, &constraints.denied_admin_duties),
            (TagField::Athlete, &constraints.denied_athlete_tags),
            (TagField::Club, &constraints.denied_clubs),
            (TagField::Position, &constraints.denied_positions),
        ];
        for (field, denied) in deny_lists {
            if !denied.is_empty() {
                pipeline = pipeline.with_rule(DenyList::new(field, denied.clone()));
            }
        }

        if !constraints.position_patterns.is_empty() {
            pipeline =
                pipeline.with_rule(PositionPattern::new(constraints.position_patterns.clone()));
        }
        if let Some(range) = constraints.height_range {
            pipeline = pipeline.with_rule(HeightWithin(range));
        }
        if let Some(max) = constraints.max_times_assigned {
            pipeline = pipeline.with_rule(AssignmentCeiling(max));
        }

        let mut blocked: BTreeSet<String> = constraints
            .excluded_names()
            .iter()
            .map(str::to_string)
            .collect();
        blocked.extend(constraints.draft_names.iter().cloned());
        blocked.extend(locked.iter().map(|l| l.name().to_string()));
        if !blocked.is_empty() {
            pipeline = pipeline.with_rule(NotExcluded::new(blocked));
        }

        pipeline
    }

    /// Whether every rule admits the candidate.
    pub fn admits(&self, candidate: &Candidate) -> bool {
        self.rules.iter().all(|r| r.admits(candidate))
    }

    /// Name of the first rule rejecting the candidate, if any.
    pub fn explain(&self, candidate: &Candidate) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|r| !r.admits(candidate))
            .map(|r| r.name())
    }

    /// Eligible candidates, in input order.
    pub fn filter<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates.iter().filter(|c| self.admits(c)).collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the pipeline has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl std::fmt::Debug for ConstraintPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintPipeline")
            .field("rules", &self.rule_names())
            .finish()
    }
}
