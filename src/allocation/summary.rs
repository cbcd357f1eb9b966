//! Allocation quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Requested | Sum of cohort quotas |
//! | Allocated | People chosen in this run |
//! | Fill Rate | Allocated / Requested (1.0 when nothing was requested) |
//! | Missing | Sum of shortfalls |
//! | Locked | Locked entries kept on the roster |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::AllocationResult;
use crate::models::{CohortKey, EntrySource};

/// Summary figures for a finished allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Total requested head-count.
    pub requested: usize,
    /// Total newly allocated.
    pub allocated: usize,
    /// Locked entries on the roster.
    pub locked: usize,
    /// Total missing across shortfalls.
    pub missing: usize,
    /// Fraction of the request that was filled (0.0..1.0).
    pub fill_rate: f64,
    /// Per-cohort fill rate.
    pub fill_rate_by_cohort: BTreeMap<CohortKey, f64>,
}

impl AllocationSummary {
    /// Computes the summary from an allocation result.
    pub fn calculate(result: &AllocationResult) -> Self {
        let requested: usize = result.cohorts.iter().map(|c| c.requested).sum();
        let allocated: usize = result.cohorts.iter().map(|c| c.assigned).sum();
        let missing: usize = result.shortfalls.iter().map(|s| s.missing()).sum();
        let locked = result
            .roster
            .entries
            .iter()
            .filter(|e| e.source == EntrySource::Locked)
            .count();

        let fill_rate_by_cohort = result
            .cohorts
            .iter()
            .map(|c| (c.cohort, ratio(c.assigned, c.requested)))
            .collect();

        Self {
            requested,
            allocated,
            locked,
            missing,
            fill_rate: ratio(allocated, requested),
            fill_rate_by_cohort,
        }
    }
}

fn ratio(assigned: usize, requested: usize) -> f64 {
    if requested == 0 {
        1.0
    } else {
        assigned as f64 / requested as f64
    }
}
