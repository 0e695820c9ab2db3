//! Recombination operators.
//!
//! Both operators blend two parents allele-by-allele into a
//! caller-supplied child genome. Parents are never modified; the child
//! keeps the origin generation it was created with and ends up with the
//! dominator's full allele set.
//!
//! By convention the *dominator* is the higher-fitness parent — use
//! [`rank_parents`] to order a pair before recombining.

use rand::Rng;

use crate::candidate::Candidate;
use crate::error::EvoResult;

/// Default dominator weight: the probability that [`recombine_hard`]
/// copies the dominator's value, and the dominator's share of the
/// weighted mean in [`recombine_soft`].
pub const DOMINATOR_BIAS: f64 = 0.75;

/// Orders a parent pair so the stronger one comes first.
///
/// Strength is the cached fitness; an unscored parent ranks below any
/// scored one. Ties keep the given order.
pub fn rank_parents<'c, C: Candidate>(a: &'c C, b: &'c C) -> (&'c C, &'c C) {
    let score = |c: &C| c.fitness().unwrap_or(f64::NEG_INFINITY);
    if score(b) > score(a) {
        (b, a)
    } else {
        (a, b)
    }
}

/// Discrete recombination: a per-allele Bernoulli choice between the
/// parents' values.
///
/// Each allele is an independent trial: with probability `p` the child
/// takes the dominator's value, otherwise the submissive's — so
/// different alleles may come from different parents. `child` supplies
/// the offspring genome (and its origin generation) and must share the
/// dominator's shape.
pub fn recombine_hard<C, R>(
    dominator: &C,
    submissive: &C,
    mut child: C,
    p: f64,
    rng: &mut R,
) -> EvoResult<C>
where
    C: Candidate,
    R: Rng,
{
    for allele in dominator.alleles() {
        let value = if rng.random_range(0.0..1.0) < p {
            dominator.value(allele)?
        } else {
            submissive.value(allele)?
        };
        child.set_value(allele, value)?;
    }
    Ok(child)
}

/// Continuous recombination: a per-allele weighted mean of the parents'
/// values.
///
/// The child's value for each allele is
/// `dominator * p + submissive * (1 - p)`; deterministic given the
/// parents and `p`. `child` supplies the offspring genome and must share
/// the dominator's shape.
pub fn recombine_soft<C: Candidate>(
    dominator: &C,
    submissive: &C,
    mut child: C,
    p: f64,
) -> EvoResult<C> {
    for allele in dominator.alleles() {
        let value = dominator.value(allele)? * p + submissive.value(allele)? * (1.0 - p);
        child.set_value(allele, value)?;
    }
    Ok(child)
}
