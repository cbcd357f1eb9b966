//! Built-in ranking policies.
//!
//! # Policies
//!
//! - **GradeWeighted**: weakest grade first, random within a grade
//! - **Uniform**: plain random order
//! - **LeastAssigned**: fewest past assignments first, random within a count
//!
//! All policies are stable with respect to input order before shuffling,
//! so a fixed seed reproduces the same ranking.

use rand::RngCore;

use super::grade::grade_priority;
use super::shuffle::{fisher_yates, shuffle_runs};
use super::RankingPolicy;
use crate::models::Candidate;

/// Grade-weighted ranking.
///
/// Buckets candidates by [`grade_priority`] and shuffles each bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeWeighted;

impl RankingPolicy for GradeWeighted {
    fn name(&self) -> &'static str {
        "grade-weighted"
    }

    fn rank<'a>(
        &self,
        mut candidates: Vec<&'a Candidate>,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a Candidate> {
        candidates.sort_by_key(|c| grade_priority(&c.grade));
        shuffle_runs(&mut candidates, rng, |c| grade_priority(&c.grade));
        candidates
    }

    fn description(&self) -> &'static str {
        "Weakest academic grade first, random within a grade"
    }
}

/// Uniform random ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl RankingPolicy for Uniform {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn rank<'a>(
        &self,
        mut candidates: Vec<&'a Candidate>,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a Candidate> {
        fisher_yates(&mut candidates, rng);
        candidates
    }

    fn description(&self) -> &'static str {
        "Uniform random order"
    }
}

/// Load-spreading ranking.
///
/// Candidates with the lowest "times assigned" count come first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastAssigned;

impl RankingPolicy for LeastAssigned {
    fn name(&self) -> &'static str {
        "least-assigned"
    }

    fn rank<'a>(
        &self,
        mut candidates: Vec<&'a Candidate>,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a Candidate> {
        candidates.sort_by_key(|c| c.times_assigned);
        shuffle_runs(&mut candidates, rng, |c| c.times_assigned);
        candidates
    }

    fn description(&self) -> &'static str {
        "Fewest past assignments first, random within a count"
    }
}
