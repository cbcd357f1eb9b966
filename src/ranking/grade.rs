//! Academic grade priority.

/// Grade tags from highest to lowest roster priority.
///
/// Weaker academic standing is picked first. Any tag not listed ranks
/// after the last entry.
pub const GRADE_PRIORITY: [&str; 9] = ["F", "D", "D+", "C", "C+", "B", "B+", "A", "A+"];

/// Priority bucket of a grade tag. Lower = picked earlier.
///
/// Tags are compared after trimming and upper-casing; unknown tags map to
/// `GRADE_PRIORITY.len()`.
pub fn grade_priority(tag: &str) -> usize {
    let tag = tag.trim().to_uppercase();
    GRADE_PRIORITY
        .iter()
        .position(|&g| g == tag)
        .unwrap_or(GRADE_PRIORITY.len())
}
