//! Uniform shuffling.
//!
//! # Reference
//! Knuth (1997), "The Art of Computer Programming", Vol. 2, §3.4.2, Algorithm P

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffles `items` in place with the Fisher–Yates algorithm.
///
/// Every permutation is equally likely given a uniform `rng`, and the
/// result is reproducible under a fixed seed.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Shuffles each run of equal keys in a slice already sorted by `key`.
///
/// Runs are shuffled independently, lowest key first, so the relative
/// order of runs is preserved.
pub fn shuffle_runs<T, K, R, F>(items: &mut [T], rng: &mut R, key: F)
where
    K: PartialEq,
    R: Rng + ?Sized,
    F: Fn(&T) -> K,
{
    let mut start = 0;
    while start < items.len() {
        let run_key = key(&items[start]);
        let mut end = start + 1;
        while end < items.len() && key(&items[end]) == run_key {
            end += 1;
        }
        fisher_yates(&mut items[start..end], &mut *rng);
        start = end;
    }
}
