//! Priority ranking of eligible candidates.
//!
//! A [`RankingPolicy`] orders the eligible candidates of one cohort so the
//! allocator can take a prefix. Policies receive an injectable random
//! source; ties are broken by a Fisher–Yates shuffle, never by a random
//! comparator.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use u_roster::models::Candidate;
//! use u_roster::ranking::{self, PolicyKind};
//!
//! let pool = vec![
//!     Candidate::new("A", "One").with_grade("A"),
//!     Candidate::new("B", "Two").with_grade("F"),
//! ];
//! let policy = "grade-weighted".parse::<PolicyKind>().unwrap().policy();
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let ranked = ranking::rank(pool.iter().collect(), policy.as_ref(), &mut rng);
//! assert_eq!(ranked[0].name, "B Two");
//! ```

mod grade;
mod policies;
mod shuffle;

pub use grade::{grade_priority, GRADE_PRIORITY};
pub use policies::{GradeWeighted, LeastAssigned, Uniform};
pub use shuffle::{fisher_yates, shuffle_runs};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::AllocationError;
use crate::models::Candidate;

/// A strategy that orders candidates for selection.
///
/// # Order Convention
/// The first element of the returned list is picked first. The output must
/// be a permutation of the input.
pub trait RankingPolicy: Send + Sync + Debug {
    /// Policy identifier (e.g., "grade-weighted").
    fn name(&self) -> &'static str;

    /// Orders `candidates`, highest priority first.
    fn rank<'a>(&self, candidates: Vec<&'a Candidate>, rng: &mut dyn RngCore)
        -> Vec<&'a Candidate>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Ranks candidates with a policy.
pub fn rank<'a>(
    candidates: Vec<&'a Candidate>,
    policy: &dyn RankingPolicy,
    rng: &mut dyn RngCore,
) -> Vec<&'a Candidate> {
    policy.rank(candidates, rng)
}

/// Identifier of a built-in policy.
///
/// Parsed case-insensitively; `_` and `-` are interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// [`GradeWeighted`].
    #[default]
    GradeWeighted,
    /// [`Uniform`].
    Uniform,
    /// [`LeastAssigned`].
    LeastAssigned,
}

impl PolicyKind {
    /// All built-in kinds.
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::GradeWeighted,
        PolicyKind::Uniform,
        PolicyKind::LeastAssigned,
    ];

    /// Canonical identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::GradeWeighted => "grade-weighted",
            PolicyKind::Uniform => "uniform",
            PolicyKind::LeastAssigned => "least-assigned",
        }
    }

    /// Instantiates the policy.
    pub fn policy(self) -> Box<dyn RankingPolicy> {
        match self {
            PolicyKind::GradeWeighted => Box::new(GradeWeighted),
            PolicyKind::Uniform => Box::new(Uniform),
            PolicyKind::LeastAssigned => Box::new(LeastAssigned),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        PolicyKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| AllocationError::UnknownPolicy(s.to_string()))
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
