//! Candidate pool snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use super::Candidate;

/// What to do when two directory rows normalize to the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateNamePolicy {
    /// Keep the first row; ignore later ones.
    #[default]
    FirstWins,
    /// Keep the last row, at the position of the first.
    LastWins,
    /// Keep the first row, and fail request validation.
    Reject,
}

/// A deduplicated snapshot of eligible people.
///
/// Preserves directory order. Names are unique within a pool, including
/// pools read back from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "PoolRows")]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    policy: DuplicateNamePolicy,
    duplicates: Vec<String>,
}

impl CandidatePool {
    /// Builds a pool with [`DuplicateNamePolicy::FirstWins`].
    pub fn new(rows: Vec<Candidate>) -> Self {
        Self::with_policy(rows, DuplicateNamePolicy::default())
    }

    /// Builds a pool, resolving duplicate names with `policy`.
    ///
    /// Names are re-normalized first. Rows with an empty name are skipped.
    pub fn with_policy(rows: Vec<Candidate>, policy: DuplicateNamePolicy) -> Self {
        let mut candidates: Vec<Candidate> = Vec::with_capacity(rows.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for row in rows.into_iter().map(Candidate::normalized) {
            if row.name.is_empty() {
                warn!(cohort = %row.cohort, "skipping directory row with empty name");
                continue;
            }
            match index.get(&row.name) {
                Some(&pos) => {
                    if !duplicates.contains(&row.name) {
                        duplicates.push(row.name.clone());
                    }
                    if policy == DuplicateNamePolicy::LastWins {
                        candidates[pos] = row;
                    }
                }
                None => {
                    index.insert(row.name.clone(), candidates.len());
                    candidates.push(row);
                }
            }
        }

        if !duplicates.is_empty() {
            warn!(count = duplicates.len(), ?policy, "duplicate names in candidate pool");
        }

        Self {
            candidates,
            policy,
            duplicates,
        }
    }

    /// Candidates in directory order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Names that appeared on more than one row.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Duplicate-resolution policy used to build this pool.
    pub fn policy(&self) -> DuplicateNamePolicy {
        self.policy
    }

    /// Looks up a candidate by normalized name.
    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterates over candidates in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}

#[derive(Deserialize)]
struct PoolRows {
    candidates: Vec<Candidate>,
    #[serde(default)]
    policy: DuplicateNamePolicy,
}

impl From<PoolRows> for CandidatePool {
    fn from(rows: PoolRows) -> Self {
        Self::with_policy(rows.candidates, rows.policy)
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
