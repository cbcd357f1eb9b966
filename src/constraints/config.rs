//! Constraint bundle passed to each allocation call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{deserialize_names, normalize_full_name, ExclusionSet};

/// Meaning of an empty affiliation allow-list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyAffiliationMode {
    /// Empty list admits every affiliation.
    #[default]
    NoRestriction,
    /// Empty list admits nobody.
    ExcludeAll,
}

/// Which side wins when a locked person also appears in an exclusion set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockPrecedence {
    /// Locked entries stay on the roster regardless of exclusions.
    #[default]
    LockedWins,
    /// Excluded locked entries are dropped from the roster and reported.
    ExclusionWins,
}

/// Inclusive height bounds in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    /// Lower bound (inclusive).
    pub min_cm: f64,
    /// Upper bound (inclusive).
    pub max_cm: f64,
}

impl HeightRange {
    /// Creates a range.
    pub fn new(min_cm: f64, max_cm: f64) -> Self {
        Self { min_cm, max_cm }
    }

    /// Whether `height` lies within the bounds.
    pub fn contains(&self, height: f64) -> bool {
        height >= self.min_cm && height <= self.max_cm
    }

    /// Whether the bounds are ordered and finite.
    pub fn is_valid(&self) -> bool {
        self.min_cm.is_finite() && self.max_cm.is_finite() && self.min_cm <= self.max_cm
    }
}

/// Immutable eligibility settings for one allocation.
///
/// Every deny-list is matched against the trimmed candidate field. An empty
/// deny-list denies nothing.
///
/// # Examples
///
/// ```
/// use u_roster::constraints::{Constraints, HeightRange};
/// use u_roster::models::ExclusionSet;
///
/// let constraints = Constraints::new()
///     .with_affiliation("Bn1")
///     .deny_grade("F")
///     .deny_position_containing("admin")
///     .with_height_range(HeightRange::new(165.0, 190.0))
///     .with_max_times_assigned(3)
///     .with_exclusions(ExclusionSet::from_names("leave", ["Anan Dee"]));
/// assert!(constraints.excluded_names().contains("Anan Dee"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Affiliation allow-list.
    pub affiliations: BTreeSet<String>,
    /// Meaning of an empty `affiliations` list.
    pub empty_affiliation: EmptyAffiliationMode,
    /// Grade tags to exclude.
    pub denied_grades: BTreeSet<String>,
    /// Administrative-duty tags to exclude.
    pub denied_admin_duties: BTreeSet<String>,
    /// Athlete tags to exclude.
    pub denied_athlete_tags: BTreeSet<String>,
    /// Club tags to exclude.
    pub denied_clubs: BTreeSet<String>,
    /// Position tags to exclude (exact match).
    pub denied_positions: BTreeSet<String>,
    /// Substrings; a position containing any of them is excluded.
    pub position_patterns: Vec<String>,
    /// Height window. `None` = no height filter.
    pub height_range: Option<HeightRange>,
    /// Ceiling on "times assigned". `None` = no ceiling.
    pub max_times_assigned: Option<u32>,
    /// Externally supplied exclusion sets.
    pub exclusions: Vec<ExclusionSet>,
    /// Normalized names already in the current roster draft.
    #[serde(deserialize_with = "deserialize_names")]
    pub draft_names: BTreeSet<String>,
    /// Locked-vs-excluded resolution.
    pub lock_precedence: LockPrecedence,
}

impl Constraints {
    /// Creates an unrestricted bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an affiliation to the allow-list.
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliations.insert(affiliation.into());
        self
    }

    /// Sets the empty allow-list semantics.
    pub fn with_empty_affiliation(mut self, mode: EmptyAffiliationMode) -> Self {
        self.empty_affiliation = mode;
        self
    }

    /// Denies a grade tag.
    pub fn deny_grade(mut self, grade: impl Into<String>) -> Self {
        self.denied_grades.insert(grade.into());
        self
    }

    /// Denies an administrative-duty tag.
    pub fn deny_admin_duty(mut self, duty: impl Into<String>) -> Self {
        self.denied_admin_duties.insert(duty.into());
        self
    }

    /// Denies an athlete tag.
    pub fn deny_athlete_tag(mut self, tag: impl Into<String>) -> Self {
        self.denied_athlete_tags.insert(tag.into());
        self
    }

    /// Denies a club tag.
    pub fn deny_club(mut self, club: impl Into<String>) -> Self {
        self.denied_clubs.insert(club.into());
        self
    }

    /// Denies an exact position tag.
    pub fn deny_position(mut self, position: impl Into<String>) -> Self {
        self.denied_positions.insert(position.into());
        self
    }

    /// Denies positions containing `pattern`.
    pub fn deny_position_containing(mut self, pattern: impl Into<String>) -> Self {
        self.position_patterns.push(pattern.into());
        self
    }

    /// Sets the height window.
    pub fn with_height_range(mut self, range: HeightRange) -> Self {
        self.height_range = Some(range);
        self
    }

    /// Sets the "times assigned" ceiling.
    pub fn with_max_times_assigned(mut self, max: u32) -> Self {
        self.max_times_assigned = Some(max);
        self
    }

    /// Adds an exclusion set.
    pub fn with_exclusions(mut self, set: ExclusionSet) -> Self {
        self.exclusions.push(set);
        self
    }

    /// Marks a name as already present in the roster draft.
    pub fn with_draft_name(mut self, raw_name: &str) -> Self {
        let name = normalize_full_name(raw_name);
        if !name.is_empty() {
            self.draft_names.insert(name);
        }
        self
    }

    /// Sets lock-vs-exclusion precedence.
    pub fn with_lock_precedence(mut self, precedence: LockPrecedence) -> Self {
        self.lock_precedence = precedence;
        self
    }

    /// Union of all exclusion sets.
    ///
    /// Does not include `draft_names`; those block new allocation but do not
    /// affect locked entries.
    pub fn excluded_names(&self) -> ExclusionSet {
        ExclusionSet::union(&self.exclusions)
    }
}
