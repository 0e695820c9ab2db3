//! The adapter contract between the engine and a concrete search domain.
//!
//! [`Problem`] is the trait users implement to plug their domain into
//! the generic loop. It covers:
//!
//! 1. **Seeding**: the initial population and a child factory
//! 2. **Evaluation**: the fitness function
//! 3. **Policy overrides**: selection, recombination, and mutation, each
//!    with a sensible default

use rand::Rng;

use crate::candidate::Candidate;
use crate::error::EvoResult;
use crate::mutation::{mutate_random, pick_random_allele};
use crate::recombination::{rank_parents, recombine_hard, DOMINATOR_BIAS};
use crate::selection::select_fittest;

/// Defines an evolutionary search problem.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` because the engine may evaluate
/// candidates in parallel using rayon.
pub trait Problem: Send + Sync {
    /// The candidate (solution) type for this problem.
    type Candidate: Candidate;

    /// Scores a candidate. Higher is better.
    ///
    /// Must be total: an infeasible candidate scores low (commonly
    /// `0.0`) and may have a diagnostic flag set on it, but the function
    /// never fails. The engine caches the returned score on the
    /// candidate and never asks again.
    fn fitness(&self, candidate: &mut Self::Candidate) -> f64;

    /// The seed population for generation zero.
    ///
    /// An empty seed population is legal and makes the run yield no best
    /// candidate.
    fn initial_population(&self) -> Vec<Self::Candidate>;

    /// A fresh, unscored candidate tagged with `generation`.
    ///
    /// Used as the offspring genome during recombination; every allele
    /// value will be overwritten by the recombination operator.
    fn spawn(&self, generation: u64) -> Self::Candidate;

    /// Survivor selection.
    ///
    /// Must be a pure function of the input population: return a subset
    /// of at most `max` candidates and synthesize nothing. Populations
    /// smaller than `max` are returned whole. The default keeps the
    /// fittest, ranked descending.
    fn select(&self, population: Vec<Self::Candidate>, max: usize) -> Vec<Self::Candidate> {
        select_fittest(population, max)
    }

    /// Recombines two parents into a child tagged with `generation`.
    ///
    /// The default ranks the pair so the higher-fitness parent dominates,
    /// then copies each allele from it with probability
    /// [`DOMINATOR_BIAS`].
    fn recombine<R: Rng>(
        &self,
        a: &Self::Candidate,
        b: &Self::Candidate,
        generation: u64,
        rng: &mut R,
    ) -> EvoResult<Self::Candidate> {
        let (dominator, submissive) = rank_parents(a, b);
        recombine_hard(
            dominator,
            submissive,
            self.spawn(generation),
            DOMINATOR_BIAS,
            rng,
        )
    }

    /// Mutates one offspring.
    ///
    /// The default redraws a uniformly picked allele over its full
    /// range.
    fn mutate<R: Rng>(
        &self,
        candidate: Self::Candidate,
        rng: &mut R,
    ) -> EvoResult<Self::Candidate> {
        let allele = pick_random_allele(&candidate, rng);
        mutate_random(&candidate, allele, rng)
    }
}
