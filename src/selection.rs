//! Survivor selection and parent pairing.
//!
//! The default survival policy is truncation: rank by cached fitness,
//! keep the fittest. Parent pairing for breeding is uniform random,
//! distinct whenever the pool allows it. Problems override either
//! through the [`Problem`](crate::problem::Problem) trait.

use std::cmp::Ordering;

use rand::Rng;

use crate::candidate::Candidate;

/// Sorts by fitness descending and keeps at most `max` candidates.
///
/// Pure: consumes the population, returns a reordered subset, and
/// synthesizes nothing. Unscored candidates rank below every scored
/// one. Populations no larger than `max` are returned whole.
pub fn select_fittest<C: Candidate>(mut population: Vec<C>, max: usize) -> Vec<C> {
    population.sort_by(|a, b| cmp_fitness(b, a));
    population.truncate(max);
    population
}

/// Ordering on cached fitness: higher is better, unscored sorts last.
pub(crate) fn cmp_fitness<C: Candidate>(a: &C, b: &C) -> Ordering {
    let score = |c: &C| c.fitness().unwrap_or(f64::NEG_INFINITY);
    score(a).partial_cmp(&score(b)).unwrap_or(Ordering::Equal)
}

/// Picks the indices of two parents uniformly at random.
///
/// The indices are distinct whenever the pool holds more than one
/// candidate; a single-candidate pool pairs the candidate with itself.
///
/// # Panics
/// Panics if `population` is empty.
pub fn random_pair<C: Candidate, R: Rng>(population: &[C], rng: &mut R) -> (usize, usize) {
    assert!(
        !population.is_empty(),
        "cannot pair parents from an empty population"
    );
    let n = population.len();
    let first = rng.random_range(0..n);
    if n == 1 {
        return (0, 0);
    }
    let mut second = rng.random_range(0..n);
    while second == first {
        second = rng.random_range(0..n);
    }
    (first, second)
}
