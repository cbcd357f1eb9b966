//! Duty-roster allocation engine for the U-Engine ecosystem.
//!
//! Given a pool of people, per-cohort quotas, exclusion/inclusion
//! constraints and a priority policy, computes a numbered roster that meets
//! quotas as closely as possible, never violates exclusions, keeps
//! pre-locked picks, and breaks ties reproducibly from a seed.
//!
//! The engine is pure: it performs no I/O and keeps no state between calls.
//! Spreadsheet sync, exclusion-list import and report export belong to the
//! caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Candidate`, `CandidatePool`, `CohortKey`,
//!   `ExclusionSet`, `LockedEntry`, `Quota`, `Roster`, `ShortfallRecord`
//! - **`constraints`**: `Constraints` bundle and the `ConstraintPipeline`
//! - **`ranking`**: `RankingPolicy` strategies and Fisher–Yates shuffling
//! - **`allocation`**: `allocate`, `QuotaAllocator`, `RosterAssembler`
//! - **`validation`**: Up-front request checks
//!
//! # Example
//!
//! ```
//! use u_roster::allocation::allocate;
//! use u_roster::constraints::Constraints;
//! use u_roster::models::{Candidate, CandidatePool, ExclusionSet, Quota};
//! use u_roster::ranking::GradeWeighted;
//!
//! let pool = CandidatePool::new(vec![
//!     Candidate::new("Anan", "Dee").with_cohort("๔").with_grade("C"),
//!     Candidate::new("Boon", "Mee").with_cohort("4").with_grade("A"),
//!     Candidate::new("Chai", "Yo").with_cohort("3").with_grade("B"),
//! ]);
//! let constraints = Constraints::new()
//!     .with_exclusions(ExclusionSet::from_names("leave", ["Chai Yo"]));
//! let quotas = Quota::new().with("4", 1).with("3", 1);
//!
//! let result = allocate(&pool, &quotas, &constraints, &[], &GradeWeighted, 42).unwrap();
//! assert_eq!(result.roster.entries[0].candidate.name, "Anan Dee");
//! assert_eq!(result.shortfalls.len(), 1);
//! ```
//!
//! # References
//!
//! - Knuth (1997), "The Art of Computer Programming", Vol. 2, §3.4.2
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod allocation;
pub mod constraints;
pub mod error;
pub mod models;
pub mod ranking;
pub mod validation;

pub use allocation::{allocate, AllocationRequest, AllocationResult};
pub use error::AllocationError;
