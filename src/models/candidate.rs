//! Candidate (person) model.
//!
//! A candidate is one row of the personnel directory, flattened by the
//! caller from whatever backend holds it. The normalized full name is the
//! identity key used for deduplication, exclusion and locking.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::CohortKey;

/// A person who may be placed on a duty roster.
///
/// All tag fields are free text as supplied by the directory. Matching
/// against constraint lists trims surrounding whitespace.
///
/// Deserialization always recomputes `name` from `first_name` and
/// `last_name`; a supplied `name` is only used when both are blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandidateRow")]
pub struct Candidate {
    /// Normalized "first last" name. Identity key.
    pub name: String,
    /// First name as supplied.
    pub first_name: String,
    /// Last name as supplied.
    pub last_name: String,
    /// Rank or title (e.g., "นนร.").
    pub rank: String,
    /// Cohort-year tag as supplied. May contain Thai numerals.
    pub cohort: String,
    /// Affiliation group (battalion, company, department).
    pub affiliation: String,
    /// Administrative-duty tag.
    pub admin_duty: String,
    /// Athlete tag.
    pub athlete: String,
    /// Academic grade tag (e.g., "B+").
    pub grade: String,
    /// Height in centimetres. `None` when the source value was unparsable.
    pub height_cm: Option<f64>,
    /// Number of times this person has already been assigned.
    pub times_assigned: u32,
    /// Position or role tag.
    pub position: String,
    /// Club tag.
    pub club: String,
}

impl Candidate {
    /// Creates a candidate from first and last name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        Self {
            name: normalize_name(&first_name, &last_name),
            first_name,
            last_name,
            rank: String::new(),
            cohort: String::new(),
            affiliation: String::new(),
            admin_duty: String::new(),
            athlete: String::new(),
            grade: String::new(),
            height_cm: None,
            times_assigned: 0,
            position: String::new(),
            club: String::new(),
        }
    }

    /// Creates a candidate from a single full-name string.
    ///
    /// The first whitespace-separated token becomes the first name and the
    /// remainder the last name.
    pub fn from_full_name(full_name: &str) -> Self {
        let normalized = normalize_full_name(full_name);
        let (first, last) = normalized
            .split_once(' ')
            .unwrap_or((normalized.as_str(), ""));
        Self::new(first, last)
    }

    /// Sets the rank/title.
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = rank.into();
        self
    }

    /// Sets the cohort-year tag.
    pub fn with_cohort(mut self, cohort: impl Into<String>) -> Self {
        self.cohort = cohort.into();
        self
    }

    /// Sets the affiliation group.
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = affiliation.into();
        self
    }

    /// Sets the administrative-duty tag.
    pub fn with_admin_duty(mut self, admin_duty: impl Into<String>) -> Self {
        self.admin_duty = admin_duty.into();
        self
    }

    /// Sets the athlete tag.
    pub fn with_athlete(mut self, athlete: impl Into<String>) -> Self {
        self.athlete = athlete.into();
        self
    }

    /// Sets the academic grade tag.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Sets the height in centimetres.
    pub fn with_height(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    /// Sets the height from free text (see [`parse_height`]).
    pub fn with_height_text(mut self, text: &str) -> Self {
        self.height_cm = parse_height(text);
        self
    }

    /// Sets the "times assigned" statistic.
    pub fn with_times_assigned(mut self, times: u32) -> Self {
        self.times_assigned = times;
        self
    }

    /// Sets the position/role tag.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Sets the club tag.
    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = club.into();
        self
    }

    /// Parsed cohort key, or `None` if the tag is not a cohort number.
    pub fn cohort_key(&self) -> Option<CohortKey> {
        CohortKey::parse(&self.cohort)
    }

    /// Recomputes the identity key from the name parts.
    ///
    /// Falls back to normalizing `name` itself when both parts are blank.
    pub fn normalized(mut self) -> Self {
        let from_parts = normalize_name(&self.first_name, &self.last_name);
        self.name = if from_parts.is_empty() {
            normalize_full_name(&self.name)
        } else {
            from_parts
        };
        self
    }
}

/// Wire form of a directory row. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateRow {
    name: String,
    first_name: String,
    last_name: String,
    rank: String,
    cohort: String,
    affiliation: String,
    admin_duty: String,
    athlete: String,
    grade: String,
    height_cm: Option<f64>,
    times_assigned: u32,
    position: String,
    club: String,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Candidate {
            name: row.name,
            first_name: row.first_name,
            last_name: row.last_name,
            rank: row.rank,
            cohort: row.cohort,
            affiliation: row.affiliation,
            admin_duty: row.admin_duty,
            athlete: row.athlete,
            grade: row.grade,
            height_cm: row.height_cm,
            times_assigned: row.times_assigned,
            position: row.position,
            club: row.club,
        }
        .normalized()
    }
}

/// Deserializes a list of raw full names into a normalized set.
///
/// Blank names are dropped.
pub(crate) fn deserialize_names<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|name| normalize_full_name(&name))
        .filter(|name| !name.is_empty())
        .collect())
}

/// Joins first and last name into the identity key.
///
/// Each part is trimmed and internal whitespace runs collapse to one space.
pub fn normalize_name(first: &str, last: &str) -> String {
    let first = normalize_full_name(first);
    let last = normalize_full_name(last);
    match (first.is_empty(), last.is_empty()) {
        (true, _) => last,
        (false, true) => first,
        (false, false) => format!("{first} {last}"),
    }
}

/// Normalizes a full-name string the same way as [`normalize_name`].
pub fn normalize_full_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts Thai digits (`๐`..`๙`) to ASCII digits; other chars pass through.
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0E50}'..='\u{0E59}' => {
                char::from(b'0' + (c as u32 - 0x0E50) as u8)
            }
            _ => c,
        })
        .collect()
}

/// Parses a height from free text.
///
/// Takes the first decimal number found (Thai digits allowed), so
/// `"175 cm"`, `"สูง 170.5"` and `"180"` all parse. Returns `None` when
/// no number is present.
pub fn parse_height(text: &str) -> Option<f64> {
    let text = normalize_digits(text);
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let mut end = start;
    let mut seen_dot = false;
    for (i, c) in text[start..].char_indices() {
        if c.is_ascii_digit() {
            end = start + i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    text[start..end].parse().ok()
}
