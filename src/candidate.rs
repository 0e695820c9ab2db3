//! Candidate genomes and the allele-backed storage they embed.
//!
//! [`Candidate`] is the contract the engine and the operators work
//! against: an ordered, fixed set of alleles, a get/set pair keyed by
//! allele identity, a memoized fitness score, and the generation the
//! candidate was created in.
//!
//! [`Genotype`] is the reusable storage for all of that. Concrete
//! candidate kinds embed one by composition and delegate to it, adding
//! whatever diagnostic fields their problem needs.

use crate::allele::{Allele, AlleleSet};
use crate::error::EvoResult;

/// A scoreable candidate solution: one value for every allele of a shape.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct MyCandidate {
///     genotype: Genotype,
/// }
///
/// impl Candidate for MyCandidate {
///     fn alleles(&self) -> &[Allele] { self.genotype.alleles() }
///     fn value(&self, a: &Allele) -> EvoResult<f64> { self.genotype.value(a) }
///     // ... delegate the rest to the genotype
/// }
/// ```
pub trait Candidate: Clone + Send + Sync {
    /// The alleles this candidate supports, in shape order.
    ///
    /// The set is fixed for the candidate's lifetime.
    fn alleles(&self) -> &[Allele];

    /// Reads the value of one allele.
    ///
    /// Total for every allele in [`alleles`](Candidate::alleles); errors
    /// with [`EvoError::UnsupportedAllele`](crate::EvoError) for any other.
    fn value(&self, allele: &Allele) -> EvoResult<f64>;

    /// Writes the value of one allele.
    ///
    /// Same domain as [`value`](Candidate::value).
    fn set_value(&mut self, allele: &Allele, value: f64) -> EvoResult<()>;

    /// The generation index this candidate was created in. Set once.
    fn origin_generation(&self) -> u64;

    /// The cached fitness; `None` until the candidate has been evaluated.
    fn fitness(&self) -> Option<f64>;

    /// Caches the fitness score.
    ///
    /// The engine calls this at most once per candidate; a cached score
    /// is never recomputed.
    fn set_fitness(&mut self, fitness: f64);

    /// A copy of this candidate with the fitness cache cleared.
    ///
    /// Duplicates every allele-backed field; the copy is a distinct,
    /// unscored genome.
    fn prototype(&self) -> Self;
}

/// Allele-backed candidate storage.
///
/// Holds the shared shape, one value per allele, the origin generation,
/// and the memoized fitness. Values start at each allele's lower bound.
#[derive(Debug, Clone)]
pub struct Genotype {
    shape: AlleleSet,
    values: Vec<f64>,
    origin_generation: u64,
    fitness: Option<f64>,
}

impl Genotype {
    /// A fresh, unscored genotype tagged with `generation`.
    pub fn new(shape: AlleleSet, generation: u64) -> Self {
        let values = shape.alleles().iter().map(Allele::min_value).collect();
        Self {
            shape,
            values,
            origin_generation: generation,
            fitness: None,
        }
    }

    /// The shape this genotype belongs to.
    pub fn shape(&self) -> &AlleleSet {
        &self.shape
    }

    /// The alleles, in shape order.
    pub fn alleles(&self) -> &[Allele] {
        self.shape.alleles()
    }

    /// Reads the value for `allele`, resolved by identity.
    pub fn value(&self, allele: &Allele) -> EvoResult<f64> {
        let slot = self.shape.slot_of(allele)?;
        Ok(self.values[slot])
    }

    /// Writes the value for `allele`, resolved by identity.
    pub fn set_value(&mut self, allele: &Allele, value: f64) -> EvoResult<()> {
        let slot = self.shape.slot_of(allele)?;
        self.values[slot] = value;
        Ok(())
    }

    /// Reads the value at a known slot.
    ///
    /// For adapters that own the shape and know their slot layout.
    ///
    /// # Panics
    /// Panics if `slot` is out of range for the shape.
    pub fn value_at(&self, slot: usize) -> f64 {
        self.values[slot]
    }

    /// Writes the value at a known slot.
    ///
    /// # Panics
    /// Panics if `slot` is out of range for the shape.
    pub fn set_value_at(&mut self, slot: usize, value: f64) {
        self.values[slot] = value;
    }

    /// Generation index at creation.
    pub fn origin_generation(&self) -> u64 {
        self.origin_generation
    }

    /// Cached fitness, `None` while unscored.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Caches a fitness score.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// A copy with every allele value intact and the fitness cleared.
    pub fn prototype(&self) -> Self {
        Self {
            fitness: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allele::{Allele, AlleleSet};
    use crate::error::EvoError;

    fn shape() -> AlleleSet {
        AlleleSet::new(vec![
            Allele::new("x", -10.0, 10.0),
            Allele::new("y", 0.0, 5.0),
        ])
    }

    #[test]
    fn test_new_starts_at_lower_bounds() {
        let g = Genotype::new(shape(), 3);
        assert_eq!(g.value_at(0), -10.0);
        assert_eq!(g.value_at(1), 0.0);
        assert_eq!(g.origin_generation(), 3);
        assert!(g.fitness().is_none());
    }

    #[test]
    fn test_get_set_by_identity() {
        let s = shape();
        let mut g = Genotype::new(s.clone(), 0);

        let x = &s.alleles()[0];
        g.set_value(x, 7.5).unwrap();
        assert_eq!(g.value(x), Ok(7.5));

        // An identical-looking allele from a different shape is rejected.
        let foreign_shape = shape();
        let foreign = &foreign_shape.alleles()[0];
        assert_eq!(
            g.value(foreign),
            Err(EvoError::UnsupportedAllele("x".to_string()))
        );
        assert_eq!(
            g.set_value(foreign, 1.0),
            Err(EvoError::UnsupportedAllele("x".to_string()))
        );
    }

    #[test]
    fn test_prototype_resets_fitness_only() {
        let s = shape();
        let mut g = Genotype::new(s.clone(), 2);
        g.set_value(&s.alleles()[0], 4.0).unwrap();
        g.set_fitness(42.0);

        let copy = g.prototype();
        assert_eq!(copy.value(&s.alleles()[0]), Ok(4.0));
        assert_eq!(copy.origin_generation(), 2);
        assert!(copy.fitness().is_none());
        // The original keeps its score.
        assert_eq!(g.fitness(), Some(42.0));
    }
}
