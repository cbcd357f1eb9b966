//! Roster assembly.
//!
//! Merges locked and newly allocated entries into the final numbered roster.

use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::warn;

use crate::models::{Candidate, EntrySource, LockedEntry, Roster, RosterEntry};

/// An assembled roster plus any duplicates that had to be dropped.
///
/// `duplicates` is empty under correct upstream behavior; a non-empty list
/// means the caller's inputs (or the allocator) broke the uniqueness
/// invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledRoster {
    /// The final roster.
    pub roster: Roster,
    /// Names dropped because an earlier entry already held them.
    pub duplicates: Vec<String>,
}

/// Roster assembler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterAssembler;

impl RosterAssembler {
    /// Creates an assembler.
    pub fn new() -> Self {
        Self
    }

    /// Builds the final roster.
    ///
    /// # Algorithm
    /// 1. Concatenate locked entries (given order) with allocated entries.
    /// 2. Drop later entries whose name is already present; locked wins.
    /// 3. Stable-sort by cohort, highest first; unparsable cohorts last.
    /// 4. Number entries 1..N.
    pub fn assemble(&self, locked: &[LockedEntry], allocated: &[&Candidate]) -> AssembledRoster {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates = Vec::new();
        let mut entries: Vec<RosterEntry> = Vec::with_capacity(locked.len() + allocated.len());

        let combined = locked
            .iter()
            .map(|l| (&l.candidate, EntrySource::Locked))
            .chain(allocated.iter().map(|&c| (c, EntrySource::Allocated)));

        for (candidate, source) in combined {
            if !seen.insert(candidate.name.as_str()) {
                warn!(name = %candidate.name, ?source, "duplicate roster entry dropped");
                duplicates.push(candidate.name.clone());
                continue;
            }
            entries.push(RosterEntry {
                sequence: 0,
                source,
                candidate: candidate.clone(),
            });
        }

        entries.sort_by_key(|e| Reverse(e.candidate.cohort_key()));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.sequence = i + 1;
        }

        AssembledRoster {
            roster: Roster { entries },
            duplicates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, cohort: &str) -> Candidate {
        Candidate::from_full_name(name).with_cohort(cohort)
    }

    #[test]
    fn test_sorted_by_cohort_and_numbered() {
        let locked = vec![LockedEntry::new(person("L One", "2"))];
        let pool = [person("A One", "3"), person("B Two", "4"), person("C Three", "3")];
        let allocated: Vec<&Candidate> = pool.iter().collect();

        let out = RosterAssembler::new().assemble(&locked, &allocated);
        let names: Vec<&str> = out.roster.names().collect();
        assert_eq!(names, vec!["B Two", "A One", "C Three", "L One"]);
        let seqs: Vec<usize> = out.roster.entries.iter().map(|e| e.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
        assert!(out.duplicates.is_empty());
    }

    #[test]
    fn test_locked_first_within_cohort() {
        let locked = vec![
            LockedEntry::new(person("L2 X", "4")),
            LockedEntry::new(person("L1 X", "4")),
        ];
        let pool = [person("A X", "4")];
        let allocated: Vec<&Candidate> = pool.iter().collect();

        let out = RosterAssembler::new().assemble(&locked, &allocated);
        let names: Vec<&str> = out.roster.names().collect();
        assert_eq!(names, vec!["L2 X", "L1 X", "A X"]);
        assert_eq!(out.roster.entries[2].source, EntrySource::Allocated);
    }

    #[test]
    fn test_locked_wins_over_duplicate() {
        let locked = vec![LockedEntry::new(person("A One", "4").with_grade("locked"))];
        let pool = [person("A One", "4").with_grade("allocated")];
        let allocated: Vec<&Candidate> = pool.iter().collect();

        let out = RosterAssembler::new().assemble(&locked, &allocated);
        assert_eq!(out.roster.len(), 1);
        assert_eq!(out.roster.entries[0].candidate.grade, "locked");
        assert_eq!(out.roster.entries[0].source, EntrySource::Locked);
        assert_eq!(out.duplicates, vec!["A One".to_string()]);
    }

    #[test]
    fn test_unparsable_cohort_sorts_last() {
        let locked = vec![LockedEntry::new(person("Typed In", "?"))];
        let pool = [person("A One", "1")];
        let allocated: Vec<&Candidate> = pool.iter().collect();

        let out = RosterAssembler::new().assemble(&locked, &allocated);
        let names: Vec<&str> = out.roster.names().collect();
        assert_eq!(names, vec!["A One", "Typed In"]);
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let locked = vec![LockedEntry::new(person("L One", "3"))];
        let pool = [person("A One", "4"), person("B Two", "3")];
        let allocated: Vec<&Candidate> = pool.iter().collect();

        let first = RosterAssembler::new().assemble(&locked, &allocated);
        let second = RosterAssembler::new().assemble(&locked, &allocated);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs() {
        let out = RosterAssembler::new().assemble(&[], &[]);
        assert!(out.roster.is_empty());
    }
}
