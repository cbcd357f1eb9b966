//! Allocation entry point.
//!
//! # Pipeline
//!
//! 1. Validate quotas and constraints (fail fast, collect all problems).
//! 2. Resolve locked entries against exclusions per [`LockPrecedence`].
//! 3. Filter the pool through the [`ConstraintPipeline`].
//! 4. Allocate cohorts, highest first, with the ranking policy.
//! 5. Assemble the final numbered roster.
//!
//! The computation is pure: no I/O, no shared state. Each call seeds its
//! own ChaCha8 generator, so identical inputs and seed give identical
//! output on every platform.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::assembler::RosterAssembler;
use super::quota::{CohortOutcome, QuotaAllocator};
use crate::constraints::{ConstraintPipeline, Constraints, LockPrecedence};
use crate::error::AllocationError;
use crate::models::{
    Candidate, CandidatePool, DuplicateNamePolicy, LockedEntry, Quota, Roster, ShortfallRecord,
};
use crate::ranking::{PolicyKind, RankingPolicy};
use crate::validation::{validate_policy_name, validate_request};

/// Output of one allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Final numbered roster.
    pub roster: Roster,
    /// Cohorts that could not be filled, highest cohort first.
    pub shortfalls: Vec<ShortfallRecord>,
    /// Per-cohort requested/available/assigned counts.
    pub cohorts: Vec<CohortOutcome>,
    /// Locked names removed because an exclusion set named them
    /// (only under [`LockPrecedence::ExclusionWins`]).
    pub dropped_locked: Vec<String>,
    /// Names dropped during assembly because they were already present.
    pub duplicates: Vec<String>,
    /// Number of candidates that passed the constraint pipeline.
    pub eligible_count: usize,
}

impl AllocationResult {
    /// Whether every quota was met.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// Computes a duty roster.
///
/// # Arguments
/// * `pool` - Candidate snapshot.
/// * `quotas` - Requested head-count per cohort.
/// * `constraints` - Eligibility settings for this call.
/// * `locked` - Entries already committed to the roster.
/// * `policy` - Ranking policy.
/// * `seed` - Random seed; fixes every tie-break.
///
/// # Errors
/// [`AllocationError::InvalidRequest`] when quotas or constraints are
/// malformed. Unfillable quotas are not errors; see
/// [`AllocationResult::shortfalls`].
///
/// # Example
/// ```
/// use u_roster::allocation::allocate;
/// use u_roster::constraints::Constraints;
/// use u_roster::models::{Candidate, CandidatePool, Quota};
/// use u_roster::ranking::GradeWeighted;
///
/// let pool = CandidatePool::new(vec![
///     Candidate::new("A", "One").with_cohort("4").with_grade("A"),
///     Candidate::new("B", "Two").with_cohort("4").with_grade("F"),
/// ]);
/// let quotas = Quota::new().with("4", 1);
///
/// let result = allocate(&pool, &quotas, &Constraints::new(), &[], &GradeWeighted, 7).unwrap();
/// assert_eq!(result.roster.entries[0].candidate.name, "B Two");
/// assert!(result.is_complete());
/// ```
pub fn allocate(
    pool: &CandidatePool,
    quotas: &Quota,
    constraints: &Constraints,
    locked: &[LockedEntry],
    policy: &dyn RankingPolicy,
    seed: u64,
) -> Result<AllocationResult, AllocationError> {
    validate_request(pool, quotas, constraints).map_err(AllocationError::InvalidRequest)?;
    Ok(allocate_validated(pool, quotas, constraints, locked, policy, seed))
}

/// Runs the pipeline on an already validated request.
fn allocate_validated(
    pool: &CandidatePool,
    quotas: &Quota,
    constraints: &Constraints,
    locked: &[LockedEntry],
    policy: &dyn RankingPolicy,
    seed: u64,
) -> AllocationResult {
    let (kept_locked, dropped_locked) = resolve_locked(locked, constraints);

    let pipeline = ConstraintPipeline::from_constraints(constraints, locked);
    let eligible = pipeline.filter(pool.candidates());
    debug!(
        pool = pool.len(),
        eligible = eligible.len(),
        rules = ?pipeline.rule_names(),
        "constraint pipeline applied"
    );

    let cohorts = quotas.cohorts_descending();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let outcome = QuotaAllocator::new().allocate_cohorts(&eligible, &cohorts, policy, &mut rng);
    let shortfalls = outcome.shortfalls();

    let assembled = RosterAssembler::new().assemble(&kept_locked, &outcome.selected);

    info!(
        seed,
        policy = policy.name(),
        locked = kept_locked.len(),
        allocated = outcome.selected.len(),
        roster = assembled.roster.len(),
        shortfalls = shortfalls.len(),
        "allocation complete"
    );

    AllocationResult {
        roster: assembled.roster,
        shortfalls,
        cohorts: outcome.cohorts,
        dropped_locked,
        duplicates: assembled.duplicates,
        eligible_count: eligible.len(),
    }
}

/// Splits locked entries into kept and dropped names.
fn resolve_locked(
    locked: &[LockedEntry],
    constraints: &Constraints,
) -> (Vec<LockedEntry>, Vec<String>) {
    if constraints.lock_precedence == LockPrecedence::LockedWins {
        return (locked.to_vec(), Vec::new());
    }

    let excluded = constraints.excluded_names();
    let (kept, dropped): (Vec<LockedEntry>, Vec<LockedEntry>) = locked
        .iter()
        .cloned()
        .partition(|l| !excluded.contains(l.name()));
    for l in &dropped {
        info!(name = %l.name(), "locked entry dropped by exclusion");
    }
    (kept, dropped.into_iter().map(|l| l.candidate.name).collect())
}

/// A self-contained, serializable allocation request.
///
/// Bundles raw directory rows, a policy identifier and a seed so a request
/// can be stored or replayed as JSON.
///
/// # Example
/// ```
/// use u_roster::allocation::AllocationRequest;
/// use u_roster::models::{Candidate, Quota};
///
/// let request = AllocationRequest::new(vec![
///     Candidate::new("A", "One").with_cohort("3"),
/// ])
/// .with_quotas(Quota::new().with("3", 2))
/// .with_policy("uniform")
/// .with_seed(42);
///
/// let result = request.run().unwrap();
/// assert_eq!(result.roster.len(), 1);
/// assert_eq!(result.shortfalls[0].missing(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationRequest {
    /// Directory rows.
    pub candidates: Vec<Candidate>,
    /// How duplicate names in `candidates` are resolved.
    pub duplicate_policy: DuplicateNamePolicy,
    /// Requested head-count per cohort.
    pub quotas: Quota,
    /// Eligibility settings.
    pub constraints: Constraints,
    /// Entries already committed to the roster.
    pub locked: Vec<LockedEntry>,
    /// Ranking policy identifier (see [`PolicyKind`]).
    pub policy: String,
    /// Random seed.
    pub seed: u64,
}

impl Default for AllocationRequest {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            duplicate_policy: DuplicateNamePolicy::default(),
            quotas: Quota::default(),
            constraints: Constraints::default(),
            locked: Vec::new(),
            policy: PolicyKind::default().as_str().to_string(),
            seed: 0,
        }
    }
}

impl AllocationRequest {
    /// Creates a request with the grade-weighted policy and seed 0.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    /// Sets the duplicate-name policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets the quotas.
    pub fn with_quotas(mut self, quotas: Quota) -> Self {
        self.quotas = quotas;
        self
    }

    /// Sets the constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Adds a locked entry.
    pub fn with_locked(mut self, entry: impl Into<LockedEntry>) -> Self {
        self.locked.push(entry.into());
        self
    }

    /// Sets the ranking policy identifier.
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = policy.into();
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates and runs the request.
    ///
    /// Policy-name problems are reported together with all other
    /// validation errors.
    pub fn run(&self) -> Result<AllocationResult, AllocationError> {
        let pool = CandidatePool::with_policy(self.candidates.clone(), self.duplicate_policy);

        let mut errors = validate_request(&pool, &self.quotas, &self.constraints)
            .err()
            .unwrap_or_default();
        let kind = match validate_policy_name(&self.policy) {
            Ok(kind) => Some(kind),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match kind {
            Some(kind) if errors.is_empty() => {
                let policy = kind.policy();
                Ok(allocate_validated(
                    &pool,
                    &self.quotas,
                    &self.constraints,
                    &self.locked,
                    policy.as_ref(),
                    self.seed,
                ))
            }
            _ => Err(AllocationError::InvalidRequest(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::HeightRange;
    use crate::models::{CohortKey, EntrySource, ExclusionSet};
    use crate::ranking::{grade_priority, GradeWeighted, LeastAssigned, Uniform};
    use crate::validation::ValidationErrorKind;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn graded_cohort(cohort: &str, grades: &[&str]) -> Vec<Candidate> {
        grades
            .iter()
            .enumerate()
            .map(|(i, g)| {
                Candidate::new(format!("C{cohort}"), format!("G{g}N{i}"))
                    .with_cohort(cohort)
                    .with_grade(*g)
            })
            .collect()
    }

    fn allocated_grades(result: &AllocationResult) -> HashSet<String> {
        result
            .roster
            .entries
            .iter()
            .filter(|e| e.source == EntrySource::Allocated)
            .map(|e| e.candidate.grade.clone())
            .collect()
    }

    #[test]
    fn test_grade_weighted_picks_weakest_grades() {
        let pool = CandidatePool::new(graded_cohort("4", &["C", "B", "A", "A+", "F"]));
        let quotas = Quota::new().with("4", 3);
        let expected: HashSet<String> = ["F", "C", "B"].iter().map(|s| s.to_string()).collect();

        for seed in 0..20 {
            let result =
                allocate(&pool, &quotas, &Constraints::new(), &[], &GradeWeighted, seed).unwrap();
            assert_eq!(allocated_grades(&result), expected);
            assert!(result.is_complete());
        }
    }

    #[test]
    fn test_shortfall_reported() {
        let pool = CandidatePool::new(graded_cohort("4", &["A", "B", "C", "D"]));
        let quotas = Quota::new().with("4", 10);
        let result = allocate(&pool, &quotas, &Constraints::new(), &[], &Uniform, 1).unwrap();

        assert_eq!(result.roster.len(), 4);
        assert_eq!(
            result.shortfalls,
            vec![ShortfallRecord::new(CohortKey::new(4), 10, 4)]
        );
    }

    #[test]
    fn test_excluded_never_allocated() {
        let pool = CandidatePool::new(graded_cohort("4", &["A", "B", "C"]));
        let banned = pool.candidates()[1].name.clone();
        let constraints =
            Constraints::new().with_exclusions(ExclusionSet::from_names("leave", [&banned]));
        let quotas = Quota::new().with("4", 100);

        let result = allocate(&pool, &quotas, &constraints, &[], &Uniform, 3).unwrap();
        assert!(!result.roster.contains(&banned));
        assert_eq!(result.roster.len(), 2);
        assert_eq!(result.eligible_count, 2);
    }

    #[test]
    fn test_empty_cohort_yields_full_shortfall() {
        let pool = CandidatePool::new(graded_cohort("4", &["A"]));
        let quotas = Quota::new().with("3", 2);
        let result = allocate(&pool, &quotas, &Constraints::new(), &[], &Uniform, 0).unwrap();
        assert!(result.roster.is_empty());
        assert_eq!(
            result.shortfalls,
            vec![ShortfallRecord::new(CohortKey::new(3), 2, 0)]
        );
    }

    #[test]
    fn test_higher_cohort_first_and_roster_order() {
        let mut rows = graded_cohort("2", &["A", "B"]);
        rows.extend(graded_cohort("4", &["A", "B"]));
        rows.extend(graded_cohort("3", &["A"]));
        let pool = CandidatePool::new(rows);
        let quotas = Quota::new().with("2", 1).with("3", 1).with("4", 2);

        let result = allocate(&pool, &quotas, &Constraints::new(), &[], &Uniform, 9).unwrap();
        let cohorts: Vec<u32> = result
            .cohorts
            .iter()
            .map(|c| c.cohort.year())
            .collect();
        assert_eq!(cohorts, vec![4, 3, 2]);

        let roster_cohorts: Vec<String> = result
            .roster
            .entries
            .iter()
            .map(|e| e.candidate.cohort.clone())
            .collect();
        assert_eq!(roster_cohorts, vec!["4", "4", "3", "2"]);
        let seqs: Vec<usize> = result.roster.entries.iter().map(|e| e.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_locked_entries_kept_and_not_reallocated() {
        let pool = CandidatePool::new(graded_cohort("4", &["F", "A", "B"]));
        let locked_person = pool.candidates()[0].clone();
        let locked = vec![LockedEntry::new(locked_person.clone())];
        let quotas = Quota::new().with("4", 3);

        let result = allocate(&pool, &quotas, &Constraints::new(), &locked, &GradeWeighted, 2)
            .unwrap();

        assert_eq!(result.roster.len(), 3);
        assert_eq!(result.roster.entries[0].candidate.name, locked_person.name);
        assert_eq!(result.roster.entries[0].source, EntrySource::Locked);
        assert!(!result.roster.allocated_names().contains(&locked_person.name.as_str()));
        assert!(result.duplicates.is_empty());
        assert_eq!(
            result.shortfalls,
            vec![ShortfallRecord::new(CohortKey::new(4), 3, 2)]
        );
    }

    #[test]
    fn test_locked_bypasses_exclusion_by_default() {
        let pool = CandidatePool::new(graded_cohort("4", &["A"]));
        let locked = vec![LockedEntry::new(Candidate::new("Typed", "Person").with_cohort("4"))];
        let constraints =
            Constraints::new().with_exclusions(ExclusionSet::from_names("x", ["Typed Person"]));

        let result = allocate(&pool, &Quota::new(), &constraints, &locked, &Uniform, 0).unwrap();
        assert!(result.roster.contains("Typed Person"));
        assert!(result.dropped_locked.is_empty());
    }

    #[test]
    fn test_exclusion_wins_drops_locked() {
        let pool = CandidatePool::new(graded_cohort("4", &["A"]));
        let locked = vec![
            LockedEntry::new(Candidate::new("Typed", "Person").with_cohort("4")),
            LockedEntry::new(Candidate::new("Other", "Person").with_cohort("4")),
        ];
        let constraints = Constraints::new()
            .with_exclusions(ExclusionSet::from_names("x", ["Typed Person"]))
            .with_lock_precedence(LockPrecedence::ExclusionWins);

        let result = allocate(&pool, &Quota::new(), &constraints, &locked, &Uniform, 0).unwrap();
        assert!(!result.roster.contains("Typed Person"));
        assert!(result.roster.contains("Other Person"));
        assert_eq!(result.dropped_locked, vec!["Typed Person".to_string()]);
    }

    #[test]
    fn test_draft_names_blocked() {
        let pool = CandidatePool::new(graded_cohort("4", &["A", "B"]));
        let drafted = pool.candidates()[0].name.clone();
        let constraints = Constraints::new().with_draft_name(&drafted);
        let quotas = Quota::new().with("4", 2);

        let result = allocate(&pool, &quotas, &constraints, &[], &Uniform, 0).unwrap();
        assert!(!result.roster.contains(&drafted));
        assert_eq!(result.roster.len(), 1);
    }

    #[test]
    fn test_least_assigned_spreads_load() {
        let pool = CandidatePool::new(vec![
            Candidate::new("A", "X").with_cohort("1").with_times_assigned(4),
            Candidate::new("B", "X").with_cohort("1").with_times_assigned(0),
            Candidate::new("C", "X").with_cohort("1").with_times_assigned(1),
        ]);
        let quotas = Quota::new().with("1", 2);
        let result = allocate(&pool, &quotas, &Constraints::new(), &[], &LeastAssigned, 5).unwrap();
        let mut names = result.roster.allocated_names();
        names.sort_unstable();
        assert_eq!(names, vec!["B X", "C X"]);
    }

    #[test]
    fn test_negative_quota_rejected_before_work() {
        let pool = CandidatePool::new(graded_cohort("4", &["A"]));
        let quotas = Quota::new().with("4", 1).with("3", -1);
        let err = allocate(&pool, &quotas, &Constraints::new(), &[], &Uniform, 0).unwrap_err();
        assert!(err
            .validation_errors()
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeQuota));
    }

    #[test]
    fn test_constraints_too_strict_is_not_error() {
        let pool = CandidatePool::new(graded_cohort("4", &["A", "B"]));
        let constraints = Constraints::new().with_height_range(HeightRange::new(150.0, 200.0));
        let quotas = Quota::new().with("4", 2);
        let result = allocate(&pool, &quotas, &constraints, &[], &Uniform, 0).unwrap();
        assert!(result.roster.is_empty());
        assert_eq!(result.shortfalls[0].missing(), 2);
    }

    #[test]
    fn test_deterministic_output() {
        let mut rows = graded_cohort("4", &["A", "B", "B", "C", "C", "F"]);
        rows.extend(graded_cohort("3", &["A", "A", "D", "D+"]));
        let pool = CandidatePool::new(rows);
        let quotas = Quota::new().with("4", 3).with("3", 2);

        for policy in [&GradeWeighted as &dyn RankingPolicy, &Uniform, &LeastAssigned] {
            let a = allocate(&pool, &quotas, &Constraints::new(), &[], policy, 123).unwrap();
            let b = allocate(&pool, &quotas, &Constraints::new(), &[], policy, 123).unwrap();
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }

    #[test]
    fn test_request_roundtrip_and_run() {
        let request = AllocationRequest::new(graded_cohort("4", &["A", "F", "B"]))
            .with_quotas(Quota::new().with("๔", 1))
            .with_policy("grade_weighted")
            .with_seed(8);
        let json = serde_json::to_string(&request).unwrap();
        let restored: AllocationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, request);

        let result = restored.run().unwrap();
        assert_eq!(result.roster.entries[0].candidate.grade, "F");
    }

    #[test]
    fn test_request_defaults_from_minimal_json() {
        let request: AllocationRequest = serde_json::from_str(r#"{"quotas": {"1": 0}}"#).unwrap();
        assert_eq!(request.policy, "grade-weighted");
        let result = request.run().unwrap();
        assert!(result.roster.is_empty());
        assert!(result.is_complete());
    }

    #[test]
    fn test_request_collects_policy_and_quota_errors() {
        let request = AllocationRequest::new(Vec::new())
            .with_quotas(Quota::new().with("4", -1))
            .with_policy("random-minus-half");
        let err = request.run().unwrap_err();
        let kinds: Vec<ValidationErrorKind> =
            err.validation_errors().iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::NegativeQuota));
        assert!(kinds.contains(&ValidationErrorKind::UnknownPolicy));
    }

    #[test]
    fn test_request_rejects_duplicates_when_asked() {
        let request = AllocationRequest::new(vec![
            Candidate::new("A", "One").with_cohort("1"),
            Candidate::new("A", "One").with_cohort("1"),
        ])
        .with_duplicate_policy(DuplicateNamePolicy::Reject);
        let err = request.run().unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::DuplicateCandidate
        );
    }

    #[test]
    fn test_request_json_names_matched_after_normalizing() {
        let json = r#"{
            "candidates": [
                {"name": "Anan  Dee", "first_name": "Anan", "last_name": "Dee", "cohort": "4"},
                {"first_name": "Boon", "last_name": " Mee ", "cohort": "4"}
            ],
            "quotas": {"4": 5},
            "constraints": {"exclusions": [{"source": "leave", "names": ["Anan Dee"]}]},
            "policy": "uniform"
        }"#;
        let request: AllocationRequest = serde_json::from_str(json).unwrap();
        let result = request.run().unwrap();
        assert_eq!(result.roster.names().collect::<Vec<_>>(), vec!["Boon Mee"]);
    }

    #[test]
    fn test_request_json_locked_not_duplicated() {
        let json = r#"{
            "candidates": [{"name": "Anan Dee", "cohort": "4"}],
            "locked": [{"candidate": {"name": "Anan  Dee", "cohort": "4"}}],
            "quotas": {"4": 2}
        }"#;
        let request: AllocationRequest = serde_json::from_str(json).unwrap();
        let result = request.run().unwrap();
        assert_eq!(result.roster.names().collect::<Vec<_>>(), vec!["Anan Dee"]);
        assert_eq!(result.roster.entries[0].source, EntrySource::Locked);
        assert_eq!(result.shortfalls[0].missing(), 2);
    }

    const GRADES: [&str; 10] = ["F", "D", "D+", "C", "C+", "B", "B+", "A", "A+", "?"];

    fn arb_scenario() -> impl Strategy<Value = (Vec<Candidate>, Vec<i64>, Vec<bool>, Vec<bool>, u64)>
    {
        (1usize..30).prop_flat_map(|n| {
            (
                prop::collection::vec((1u32..=4, 0usize..GRADES.len(), 0u32..4), n),
                prop::collection::vec(0i64..8, 4),
                prop::collection::vec(prop::bool::weighted(0.2), n),
                prop::collection::vec(prop::bool::weighted(0.1), n),
                any::<u64>(),
            )
                .prop_map(|(rows, quotas, excluded, locked, seed)| {
                    let candidates: Vec<Candidate> = rows
                        .into_iter()
                        .enumerate()
                        .map(|(i, (cohort, grade, times))| {
                            Candidate::new(format!("P{i}"), "X")
                                .with_cohort(cohort.to_string())
                                .with_grade(GRADES[grade])
                                .with_times_assigned(times)
                        })
                        .collect();
                    (candidates, quotas, excluded, locked, seed)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_allocation_invariants(
            (rows, counts, excluded_mask, locked_mask, seed) in arb_scenario()
        ) {
            let pool = CandidatePool::new(rows.clone());
            let quotas: Quota = counts
                .iter()
                .enumerate()
                .map(|(i, &c)| ((i + 1).to_string(), c))
                .collect();
            let excluded: Vec<&str> = rows
                .iter()
                .zip(&excluded_mask)
                .filter(|&(_, &x)| x)
                .map(|(c, _)| c.name.as_str())
                .collect();
            let locked: Vec<LockedEntry> = rows
                .iter()
                .zip(&locked_mask)
                .filter(|&(_, &l)| l)
                .map(|(c, _)| LockedEntry::new(c.clone()))
                .collect();
            let constraints =
                Constraints::new().with_exclusions(ExclusionSet::from_names("x", &excluded));

            let result =
                allocate(&pool, &quotas, &constraints, &locked, &GradeWeighted, seed).unwrap();

            // Unique names.
            let names: HashSet<&str> = result.roster.names().collect();
            prop_assert_eq!(names.len(), result.roster.len());
            prop_assert!(result.duplicates.is_empty());

            // Excluded and locked names never newly allocated.
            let locked_names: HashSet<&str> = locked.iter().map(|l| l.name()).collect();
            for name in result.roster.allocated_names() {
                prop_assert!(!excluded.contains(&name));
                prop_assert!(!locked_names.contains(name));
            }

            // Quota bounds and shortfall consistency.
            for outcome in &result.cohorts {
                prop_assert!(outcome.assigned <= outcome.requested);
                prop_assert_eq!(outcome.assigned, outcome.requested.min(outcome.available));
                let has_shortfall = result.shortfalls.iter().any(|s| s.cohort == outcome.cohort);
                prop_assert_eq!(has_shortfall, outcome.available < outcome.requested);
            }

            // Grade priority: nothing unpicked outranks anything picked.
            for outcome in &result.cohorts {
                let picked: Vec<usize> = result
                    .roster
                    .entries_for_cohort(outcome.cohort)
                    .filter(|e| e.source == EntrySource::Allocated)
                    .map(|e| grade_priority(&e.candidate.grade))
                    .collect();
                let worst_picked = picked.iter().copied().max();
                let best_left = rows
                    .iter()
                    .filter(|c| c.cohort_key() == Some(outcome.cohort))
                    .filter(|c| !excluded.contains(&c.name.as_str()))
                    .filter(|c| !locked_names.contains(c.name.as_str()))
                    .filter(|c| !names.contains(c.name.as_str()))
                    .map(|c| grade_priority(&c.grade))
                    .min();
                if let (Some(w), Some(b)) = (worst_picked, best_left) {
                    prop_assert!(w <= b);
                }
            }

            // Same seed, same bytes.
            let again =
                allocate(&pool, &quotas, &constraints, &locked, &GradeWeighted, seed).unwrap();
            prop_assert_eq!(
                serde_json::to_string(&result).unwrap(),
                serde_json::to_string(&again).unwrap()
            );
        }
    }
}
