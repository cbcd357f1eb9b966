//! Per-cohort quotas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CohortKey;

/// Requested head-count per cohort.
///
/// Keys are cohort tags as the caller typed them; counts are signed so a
/// negative request can be reported instead of silently wrapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quota {
    requests: BTreeMap<String, i64>,
}

impl Quota {
    /// Creates an empty quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the request for a cohort.
    pub fn with(mut self, cohort: impl Into<String>, count: i64) -> Self {
        self.set(cohort, count);
        self
    }

    /// Sets the request for a cohort.
    pub fn set(&mut self, cohort: impl Into<String>, count: i64) {
        self.requests.insert(cohort.into(), count);
    }

    /// Raw request for a cohort tag.
    pub fn get(&self, cohort: &str) -> Option<i64> {
        self.requests.get(cohort).copied()
    }

    /// Raw `(tag, count)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.requests.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of cohort entries.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no cohort has a request.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Sum of all non-negative requests.
    pub fn total_requested(&self) -> usize {
        self.requests.values().map(|&v| v.max(0) as usize).sum()
    }

    /// Parsed requests, highest cohort first.
    ///
    /// Malformed keys and negative counts are skipped; run request
    /// validation first to surface them.
    pub fn cohorts_descending(&self) -> Vec<(CohortKey, usize)> {
        let mut cohorts: Vec<(CohortKey, usize)> = self
            .requests
            .iter()
            .filter_map(|(raw, &count)| {
                let key = CohortKey::parse(raw)?;
                usize::try_from(count).ok().map(|c| (key, c))
            })
            .collect();
        cohorts.sort_by(|a, b| b.0.cmp(&a.0));
        cohorts
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for Quota {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut quota = Self::new();
        for (cohort, count) in iter {
            quota.set(cohort, count);
        }
        quota
    }
}
