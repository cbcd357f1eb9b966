//! Quota allocation and roster assembly.
//!
//! Provides the allocation entry point ([`allocate`] / [`AllocationRequest`]),
//! the cohort-by-cohort [`QuotaAllocator`], the [`RosterAssembler`] and
//! result metrics.
//!
//! # Algorithm
//!
//! `allocate` filters the pool once, then walks cohorts from highest to
//! lowest, ranking each cohort's remaining candidates and taking a prefix of
//! the requested size. Picks leave the shared pool immediately. Locked
//! entries join at assembly time and are never re-ranked.
//!
//! # Summary
//!
//! `AllocationSummary` computes fill rates and shortfall totals for
//! reporting.

mod assembler;
mod engine;
mod quota;
mod summary;

pub use assembler::{AssembledRoster, RosterAssembler};
pub use engine::{allocate, AllocationRequest, AllocationResult};
pub use quota::{CohortAllocation, CohortOutcome, QuotaAllocator, QuotaOutcome};
pub use summary::AllocationSummary;
