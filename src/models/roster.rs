//! Roster (solution) model.
//!
//! The roster is the ordered, numbered output of an allocation. It may be
//! accompanied by shortfall records for cohorts that could not be filled.

use serde::{Deserialize, Serialize};

use super::{Candidate, CohortKey};

/// How an entry got onto the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySource {
    /// Committed by the caller before allocation.
    Locked,
    /// Chosen by the allocator in this run.
    Allocated,
}

/// One numbered line of the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// 1-based position in the final roster.
    pub sequence: usize,
    /// Locked or newly allocated.
    pub source: EntrySource,
    /// The assigned person.
    pub candidate: Candidate,
}

/// A cohort whose quota could not be fully met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallRecord {
    /// Cohort bucket.
    pub cohort: CohortKey,
    /// Requested head-count.
    pub requested: usize,
    /// Head-count actually allocated.
    pub assigned: usize,
}

impl ShortfallRecord {
    /// Creates a shortfall record.
    pub fn new(cohort: CohortKey, requested: usize, assigned: usize) -> Self {
        Self {
            cohort,
            requested,
            assigned,
        }
    }

    /// Number of people still missing.
    pub fn missing(&self) -> usize {
        self.requested.saturating_sub(self.assigned)
    }
}

/// The final ordered roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Entries in sequence order.
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in sequence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.candidate.name.as_str())
    }

    /// Names chosen by the allocator in this run.
    ///
    /// These are the people whose "times assigned" statistic the caller
    /// should increment.
    pub fn allocated_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.source == EntrySource::Allocated)
            .map(|e| e.candidate.name.as_str())
            .collect()
    }

    /// Whether a normalized name is on the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.candidate.name == name)
    }

    /// Entries belonging to one cohort.
    pub fn entries_for_cohort(&self, cohort: CohortKey) -> impl Iterator<Item = &RosterEntry> {
        self.entries
            .iter()
            .filter(move |e| e.candidate.cohort_key() == Some(cohort))
    }
}
