//! Mutation operators.
//!
//! All operators are pure: candidate-level mutations clone via
//! [`Candidate::prototype`] and write into the copy, never into the
//! input. Value-level mutations ([`mutate_positive`], [`mutate_negative`])
//! transform a scalar and leave range handling to the caller.
//!
//! # Operators
//!
//! - [`mutate_random`]: redraw one allele over its full range
//! - [`mutate_positive`]: push a value toward the upper bound
//! - [`mutate_negative`]: pull a value toward the lower bound
//! - [`mutate_pitched`]: redraw a random allele inside a window around
//!   its current value
//! - [`pick_random_allele`]: uniform choice over a candidate's alleles

use rand::Rng;

use crate::allele::Allele;
use crate::candidate::Candidate;
use crate::error::{EvoError, EvoResult};

/// Smallest pitch [`mutate_pitched`] will honor.
///
/// Narrower windows starve the search of movement late in convergence,
/// so requested pitches below this are widened to it.
pub const MIN_PITCH: f64 = 0.5;

/// Redraws one allele uniformly over its full `[min, max]` range.
///
/// The draw is independent of the current value; the old value is read
/// anyway so that a foreign allele is rejected before any clone is made.
/// Returns a new candidate, leaving the input untouched.
pub fn mutate_random<C, R>(candidate: &C, allele: &Allele, rng: &mut R) -> EvoResult<C>
where
    C: Candidate,
    R: Rng,
{
    let _ = candidate.value(allele)?;
    let mut mutated = candidate.prototype();
    mutated.set_value(
        allele,
        rng.random_range(allele.min_value()..=allele.max_value()),
    )?;
    Ok(mutated)
}

/// Pushes a value toward the allele's upper bound.
///
/// Requires a positive-only allele; errors with
/// [`EvoError::NotPositive`] otherwise. The result lies in
/// `[value, max]`: `value + (max - value) * u` with `u ~ Uniform(0, 1)`.
pub fn mutate_positive<R: Rng>(value: f64, allele: &Allele, rng: &mut R) -> EvoResult<f64> {
    if !allele.is_only_positive() {
        return Err(EvoError::NotPositive(allele.name().to_string()));
    }
    let offset = (allele.max_value() - value) * rng.random_range(0.0..1.0);
    Ok(value + offset)
}

/// Pulls a value toward the allele's lower bound.
///
/// The result lies in `[min, value]`: `value - (value - min) * u` with
/// `u ~ Uniform(0, 1)`. No positivity precondition.
pub fn mutate_negative<R: Rng>(value: f64, allele: &Allele, rng: &mut R) -> f64 {
    let offset = (value - allele.min_value()) * rng.random_range(0.0..1.0);
    value - offset
}

/// Picks one allele of the candidate uniformly by index.
pub fn pick_random_allele<'c, C, R>(candidate: &'c C, rng: &mut R) -> &'c Allele
where
    C: Candidate,
    R: Rng,
{
    let alleles = candidate.alleles();
    &alleles[rng.random_range(0..alleles.len())]
}

/// Redraws one randomly chosen allele inside a window centered on its
/// current value.
///
/// `pitch` in `(0, 1]` scales how far toward each bound the redraw may
/// reach: the window is `[v - pitch * (v - min), v + pitch * (max - v)]`,
/// which always stays within the allele's bounds. Pitches below
/// [`MIN_PITCH`] are widened to it. Returns a new candidate.
pub fn mutate_pitched<C, R>(candidate: &C, pitch: f64, rng: &mut R) -> EvoResult<C>
where
    C: Candidate,
    R: Rng,
{
    let pitch = pitch.clamp(MIN_PITCH, 1.0);
    let allele = pick_random_allele(candidate, rng);
    let value = candidate.value(allele)?;

    let lo = value - pitch * (value - allele.min_value());
    let hi = value + pitch * (allele.max_value() - value);

    let mut mutated = candidate.prototype();
    mutated.set_value(allele, rng.random_range(lo..=hi))?;
    Ok(mutated)
}
