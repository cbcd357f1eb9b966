//! Quota-constrained selection.
//!
//! # Algorithm
//!
//! 1. Walk cohorts from highest to lowest.
//! 2. Take the still-available eligible candidates of that cohort.
//! 3. Rank them with the policy and take a prefix of the requested size.
//! 4. Remove the picks from the shared pool.
//! 5. Record a shortfall if fewer were available than requested.
//!
//! Processing order matters: a person picked for a higher cohort is no
//! longer available to a lower one.
//!
//! # Complexity
//! O(k * n log n) where k=cohorts, n=eligible candidates.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::models::{Candidate, CohortKey, ShortfallRecord};
use crate::ranking::RankingPolicy;

/// Requested vs. achieved head-count for one cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortOutcome {
    /// Cohort bucket.
    pub cohort: CohortKey,
    /// Requested head-count.
    pub requested: usize,
    /// Eligible candidates available when the cohort was processed.
    pub available: usize,
    /// Head-count allocated.
    pub assigned: usize,
}

impl CohortOutcome {
    /// Shortfall record, if the quota was not met.
    pub fn shortfall(&self) -> Option<ShortfallRecord> {
        (self.assigned < self.requested)
            .then(|| ShortfallRecord::new(self.cohort, self.requested, self.assigned))
    }
}

/// Selection for a single ranked cohort list.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortAllocation<'a> {
    /// Picked candidates, in rank order.
    pub selected: Vec<&'a Candidate>,
    /// Set when fewer candidates were available than requested.
    pub shortfall: Option<usize>,
}

/// Result of allocating every cohort.
#[derive(Debug, Clone, Default)]
pub struct QuotaOutcome<'a> {
    /// Picks across all cohorts, highest cohort first, rank order within.
    pub selected: Vec<&'a Candidate>,
    /// Per-cohort outcome, in processing order.
    pub cohorts: Vec<CohortOutcome>,
}

impl QuotaOutcome<'_> {
    /// Shortfall records for cohorts that were not filled.
    pub fn shortfalls(&self) -> Vec<ShortfallRecord> {
        self.cohorts.iter().filter_map(CohortOutcome::shortfall).collect()
    }
}

/// Quota allocator.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_roster::allocation::QuotaAllocator;
/// use u_roster::models::{Candidate, CohortKey};
/// use u_roster::ranking::Uniform;
///
/// let pool = vec![
///     Candidate::new("A", "One").with_cohort("4"),
///     Candidate::new("B", "Two").with_cohort("3"),
/// ];
/// let eligible: Vec<&Candidate> = pool.iter().collect();
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
///
/// let outcome = QuotaAllocator::new().allocate_cohorts(
///     &eligible,
///     &[(CohortKey::new(4), 2), (CohortKey::new(3), 1)],
///     &Uniform,
///     &mut rng,
/// );
/// assert_eq!(outcome.selected.len(), 2);
/// assert_eq!(outcome.shortfalls()[0].cohort, CohortKey::new(4));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotaAllocator;

impl QuotaAllocator {
    /// Creates an allocator.
    pub fn new() -> Self {
        Self
    }

    /// Takes the first `requested` entries of a ranked list.
    ///
    /// `shortfall` holds the missing count when the list is too short.
    pub fn allocate<'a>(&self, ranked: &[&'a Candidate], requested: usize) -> CohortAllocation<'a> {
        let take = requested.min(ranked.len());
        CohortAllocation {
            selected: ranked[..take].to_vec(),
            shortfall: (take < requested).then_some(requested - take),
        }
    }

    /// Allocates every cohort against a shared pool.
    ///
    /// `cohorts` must already be in processing order (highest first);
    /// [`Quota::cohorts_descending`](crate::models::Quota::cohorts_descending)
    /// produces that order. Each candidate is picked at most once.
    pub fn allocate_cohorts<'a>(
        &self,
        eligible: &[&'a Candidate],
        cohorts: &[(CohortKey, usize)],
        policy: &dyn RankingPolicy,
        rng: &mut dyn RngCore,
    ) -> QuotaOutcome<'a> {
        let mut taken: HashSet<&str> = HashSet::new();
        let mut outcome = QuotaOutcome::default();

        for &(cohort, requested) in cohorts {
            let available: Vec<&'a Candidate> = eligible
                .iter()
                .copied()
                .filter(|c| c.cohort_key() == Some(cohort) && !taken.contains(c.name.as_str()))
                .collect();
            let available_count = available.len();

            let ranked = policy.rank(available, rng);
            let allocation = self.allocate(&ranked, requested);

            for c in &allocation.selected {
                taken.insert(c.name.as_str());
            }

            debug!(
                %cohort,
                requested,
                available = available_count,
                assigned = allocation.selected.len(),
                policy = policy.name(),
                "cohort allocated"
            );
            if let Some(missing) = allocation.shortfall {
                warn!(%cohort, requested, missing, "quota shortfall");
            }

            outcome.cohorts.push(CohortOutcome {
                cohort,
                requested,
                available: available_count,
                assigned: allocation.selected.len(),
            });
            outcome.selected.extend(allocation.selected);
        }

        outcome
    }
}
