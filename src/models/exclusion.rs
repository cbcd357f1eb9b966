//! Exclusion sets and locked entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::candidate::{deserialize_names, normalize_full_name};
use super::Candidate;

/// A set of normalized full names that must never be newly allocated.
///
/// Built by the caller from uploaded sheets or earlier roster drafts.
/// Sets only grow; combining sources is a plain union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionSet {
    /// Where the names came from (sheet name, draft label).
    pub source: String,
    #[serde(deserialize_with = "deserialize_names")]
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Creates an empty set tagged with a source label.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            names: BTreeSet::new(),
        }
    }

    /// Creates a set from raw full-name strings.
    pub fn from_names<I, S>(source: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(source);
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Adds a raw full name. Blank names are ignored.
    pub fn insert(&mut self, raw_name: &str) -> bool {
        let name = normalize_full_name(raw_name);
        if name.is_empty() {
            return false;
        }
        self.names.insert(name)
    }

    /// Builder form of [`ExclusionSet::insert`].
    pub fn with_name(mut self, raw_name: &str) -> Self {
        self.insert(raw_name);
        self
    }

    /// Whether a normalized name is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Merges another set into this one.
    pub fn extend(&mut self, other: &ExclusionSet) {
        self.names.extend(other.names.iter().cloned());
    }

    /// Union of any number of sets.
    pub fn union<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a ExclusionSet>,
    {
        let mut merged = Self::new("union");
        for set in sets {
            merged.extend(set);
        }
        merged
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// A person the caller has already committed to the roster.
///
/// Locked entries bypass filtering and ranking and keep their relative
/// order in the final roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LockedRow")]
pub struct LockedEntry {
    /// The committed person.
    pub candidate: Candidate,
}

impl LockedEntry {
    /// Locks a candidate. The name is re-normalized.
    pub fn new(candidate: Candidate) -> Self {
        Self {
            candidate: candidate.normalized(),
        }
    }

    /// Normalized name of the locked person.
    pub fn name(&self) -> &str {
        &self.candidate.name
    }
}

impl From<Candidate> for LockedEntry {
    fn from(candidate: Candidate) -> Self {
        Self::new(candidate)
    }
}

#[derive(Deserialize)]
struct LockedRow {
    candidate: Candidate,
}

impl From<LockedRow> for LockedEntry {
    fn from(row: LockedRow) -> Self {
        Self::new(row.candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_normalizes() {
        let set = ExclusionSet::from_names("sheet1", ["  Somchai   Jaidee ", "", "Anan Dee"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("Somchai Jaidee"));
        assert!(!set.contains("  Somchai   Jaidee "));
    }

    #[test]
    fn test_union_is_additive() {
        let a = ExclusionSet::from_names("a", ["X One", "Y Two"]);
        let b = ExclusionSet::from_names("b", ["Y Two", "Z Three"]);
        let merged = ExclusionSet::union([&a, &b]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.iter().collect::<Vec<_>>(), ["X One", "Y Two", "Z Three"]);
    }

    #[test]
    fn test_union_of_nothing() {
        let merged = ExclusionSet::union(std::iter::empty::<&ExclusionSet>());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_deserialize_normalizes_names() {
        let set: ExclusionSet =
            serde_json::from_str(r#"{"source": "leave", "names": ["Anan  Dee", " ", " Boon Mee"]}"#)
                .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Anan Dee"));
        assert!(set.contains("Boon Mee"));
    }

    #[test]
    fn test_locked_entry_renormalizes() {
        let mut person = Candidate::new("Anan", "Dee");
        person.name = "Anan  Dee".to_string();
        assert_eq!(LockedEntry::new(person).name(), "Anan Dee");

        let locked: LockedEntry =
            serde_json::from_str(r#"{"candidate": {"name": "Anan  Dee"}}"#).unwrap();
        assert_eq!(locked.name(), "Anan Dee");
    }

    #[test]
    fn test_locked_entry_name() {
        let locked = LockedEntry::from(Candidate::new("Anan", "Dee"));
        assert_eq!(locked.name(), "Anan Dee");
    }
}
