//! Built-in eligibility rules.
//!
//! # Categories
//!
//! - **Inclusive**: affiliation allow-list
//! - **Deny-lists**: grade, admin duty, athlete, club, position, position pattern
//! - **Numeric**: height window, assignment ceiling
//! - **Identity**: excluded names
//!
//! All rules answer "may this candidate be newly allocated?".

use std::collections::BTreeSet;

use super::{EligibilityRule, EmptyAffiliationMode, HeightRange};
use crate::models::Candidate;

/// Candidate field a deny-list applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    /// Academic grade tag.
    Grade,
    /// Administrative-duty tag.
    AdminDuty,
    /// Athlete tag.
    Athlete,
    /// Club tag.
    Club,
    /// Position/role tag.
    Position,
}

impl TagField {
    fn value(self, candidate: &Candidate) -> &str {
        match self {
            TagField::Grade => &candidate.grade,
            TagField::AdminDuty => &candidate.admin_duty,
            TagField::Athlete => &candidate.athlete,
            TagField::Club => &candidate.club,
            TagField::Position => &candidate.position,
        }
    }

    fn rule_name(self) -> &'static str {
        match self {
            TagField::Grade => "DENY_GRADE",
            TagField::AdminDuty => "DENY_ADMIN_DUTY",
            TagField::Athlete => "DENY_ATHLETE",
            TagField::Club => "DENY_CLUB",
            TagField::Position => "DENY_POSITION",
        }
    }
}

// ======================== Inclusive ========================

/// Affiliation allow-list.
///
/// The only inclusive rule. What an empty list means is decided by
/// [`EmptyAffiliationMode`], never by the emptiness alone.
#[derive(Debug, Clone)]
pub struct AffiliationAllowList {
    allowed: BTreeSet<String>,
    empty_mode: EmptyAffiliationMode,
}

impl AffiliationAllowList {
    /// Creates the rule.
    pub fn new(allowed: BTreeSet<String>, empty_mode: EmptyAffiliationMode) -> Self {
        Self {
            allowed,
            empty_mode,
        }
    }
}

impl EligibilityRule for AffiliationAllowList {
    fn name(&self) -> &'static str {
        "AFFILIATION"
    }

    fn admits(&self, candidate: &Candidate) -> bool {
        if self.allowed.is_empty() {
            return self.empty_mode == EmptyAffiliationMode::NoRestriction;
        }
        self.allowed.contains(candidate.affiliation.trim())
    }

    fn description(&self) -> &'static str {
        "Affiliation must be in the allow-list"
    }
}

// ======================== Deny-lists ========================

/// Rejects candidates whose tag is in a set.
#[derive(Debug, Clone)]
pub struct DenyList {
    field: TagField,
    denied: BTreeSet<String>,
}

impl DenyList {
    /// Creates a deny-list over one field.
    pub fn new(field: TagField, denied: BTreeSet<String>) -> Self {
        Self { field, denied }
    }
}

impl EligibilityRule for DenyList {
    fn name(&self) -> &'static str {
        self.field.rule_name()
    }

    fn admits(&self, candidate: &Candidate) -> bool {
        !self.denied.contains(self.field.value(candidate).trim())
    }

    fn description(&self) -> &'static str {
        "Tag must not be in the deny-list"
    }
}

/// Rejects candidates whose position text contains any pattern.
///
/// Used for rules such as cutting administrative staff by title.
/// Empty patterns are ignored.
#[derive(Debug, Clone)]
pub struct PositionPattern {
    patterns: Vec<String>,
}

impl PositionPattern {
    /// Creates the rule.
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns: patterns.into_iter().filter(|p| !p.trim().is_empty()).collect(),
        }
    }
}

impl EligibilityRule for PositionPattern {
    fn name(&self) -> &'static str {
        "POSITION_PATTERN"
    }

    fn admits(&self, candidate: &Candidate) -> bool {
        !self
            .patterns
            .iter()
            .any(|p| candidate.position.contains(p.trim()))
    }

    fn description(&self) -> &'static str {
        "Position must not contain a denied pattern"
    }
}

// ======================== Numeric ========================

/// Height must fall inside an inclusive window.
///
/// Candidates without a parsed height are rejected.
#[derive(Debug, Clone, Copy)]
pub struct HeightWithin(pub HeightRange);

impl EligibilityRule for HeightWithin {
    fn name(&self) -> &'static str {
        "HEIGHT"
    }

    fn admits(&self, candidate: &Candidate) -> bool {
        candidate.height_cm.is_some_and(|h| self.0.contains(h))
    }

    fn description(&self) -> &'static str {
        "Height must be within range"
    }
}

/// "Times assigned" must not exceed a ceiling.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentCeiling(pub u32);

impl EligibilityRule for AssignmentCeiling {
    fn name(&self) -> &'static str {
        "ASSIGNMENT_CEILING"
    }

    fn admits(&self, candidate: &Candidate) -> bool {
        candidate.times_assigned <= self.0
    }

    fn description(&self) -> &'static str {
        "Times assigned must not exceed the ceiling"
    }
}

// ======================== Identity ========================

/// Rejects candidates by normalized name.
///
/// Holds the union of exclusion sets, draft names and locked names.
#[derive(Debug, Clone, Default)]
pub struct NotExcluded {
    names: BTreeSet<String>,
}

impl NotExcluded {
    /// Creates the rule from a name set.
    pub fn new(names: BTreeSet<String>) -> Self {
        Self { names }
    }

    /// Number of blocked names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are blocked.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl EligibilityRule for NotExcluded {
    fn name(&self) -> &'static str {
        "EXCLUDED"
    }

    fn admits(&self, candidate: &Candidate) -> bool {
        !self.names.contains(&candidate.name)
    }

    fn description(&self) -> &'static str {
        "Name must not be excluded, locked or already drafted"
    }
}
