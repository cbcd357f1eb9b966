//! Roster domain models.
//!
//! Plain data types describing an allocation problem and its solution.
//! Everything here is constructed fresh per allocation call from caller
//! snapshots; the engine keeps no state between calls.
//!
//! # Domain Mappings
//!
//! | u-roster | Personnel directory | Duty sheet |
//! |----------|---------------------|------------|
//! | Candidate | Directory row | — |
//! | CohortKey | Class year ("ชั้นปีที่") | Quota column |
//! | ExclusionSet | Uploaded exclusion tab | — |
//! | LockedEntry | — | Manually typed row |
//! | RosterEntry | — | Numbered duty line |

mod candidate;
mod cohort;
mod exclusion;
mod pool;
mod quota;
mod roster;

pub(crate) use candidate::deserialize_names;
pub use candidate::{normalize_digits, normalize_full_name, normalize_name, parse_height, Candidate};
pub use cohort::CohortKey;
pub use exclusion::{ExclusionSet, LockedEntry};
pub use pool::{CandidatePool, DuplicateNamePolicy};
pub use quota::Quota;
pub use roster::{EntrySource, Roster, RosterEntry, ShortfallRecord};
