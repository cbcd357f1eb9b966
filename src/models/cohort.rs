//! Cohort-year keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::normalize_digits;

/// Labels that may precede the cohort number in a tag. Longest first.
const COHORT_LABELS: &[&str] = &["ชั้นปีที่", "ปีที่", "ปี", "year"];

/// A cohort (class-year) bucket.
///
/// Ordered numerically; allocation walks cohorts from highest to lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CohortKey(u32);

impl CohortKey {
    /// Creates a key from a plain number.
    pub const fn new(year: u32) -> Self {
        Self(year)
    }

    /// Parses a cohort tag.
    ///
    /// Accepts Thai or ASCII digits, optionally preceded by a label such as
    /// "ชั้นปีที่" or "year". Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_digits(raw);
        let mut rest = normalized.trim();
        for label in COHORT_LABELS {
            if let Some(head) = rest.get(..label.len()) {
                if head.eq_ignore_ascii_case(label) {
                    rest = rest[label.len()..].trim_start();
                    break;
                }
            }
        }
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest.parse().ok().map(Self)
    }

    /// The numeric cohort year.
    pub fn year(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
