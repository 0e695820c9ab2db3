//! Property-based tests for evosearch.
//!
//! Uses proptest to verify operator invariants: bounds, direction,
//! purity, and recombination boundary behavior.

use evosearch::mutation::{
    mutate_negative, mutate_pitched, mutate_positive, mutate_random, pick_random_allele,
};
use evosearch::recombination::{recombine_hard, recombine_soft};
use evosearch::{Allele, AlleleSet, Candidate, EvoResult, Genotype};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
struct Plain {
    genotype: Genotype,
}

impl Candidate for Plain {
    fn alleles(&self) -> &[Allele] {
        self.genotype.alleles()
    }
    fn value(&self, allele: &Allele) -> EvoResult<f64> {
        self.genotype.value(allele)
    }
    fn set_value(&mut self, allele: &Allele, value: f64) -> EvoResult<()> {
        self.genotype.set_value(allele, value)
    }
    fn origin_generation(&self) -> u64 {
        self.genotype.origin_generation()
    }
    fn fitness(&self) -> Option<f64> {
        self.genotype.fitness()
    }
    fn set_fitness(&mut self, fitness: f64) {
        self.genotype.set_fitness(fitness)
    }
    fn prototype(&self) -> Self {
        Self {
            genotype: self.genotype.prototype(),
        }
    }
}

/// A one-allele candidate holding `value` on an axis bounded to
/// `[min, min + span]`.
fn single(min: f64, span: f64, value: f64, positive: bool) -> (AlleleSet, Plain) {
    let mut allele = Allele::new("axis", min, min + span);
    if positive {
        allele = allele.only_positive();
    }
    let shape = AlleleSet::new(vec![allele]);
    let mut candidate = Plain {
        genotype: Genotype::new(shape.clone(), 0),
    };
    candidate.set_value(&shape.alleles()[0], value).unwrap();
    (shape, candidate)
}

/// A three-allele candidate with the given values on [-100, 100] axes.
fn triple(values: [f64; 3]) -> (AlleleSet, Plain) {
    let shape = AlleleSet::new(
        ["a", "b", "c"]
            .map(|name| Allele::new(name, -100.0, 100.0))
            .to_vec(),
    );
    let mut candidate = Plain {
        genotype: Genotype::new(shape.clone(), 0),
    };
    for (allele, v) in shape.alleles().iter().zip(values) {
        candidate.set_value(allele, v).unwrap();
    }
    (shape, candidate)
}

proptest! {
    // ==================== Mutation bounds ====================

    #[test]
    fn mutate_random_stays_in_bounds(
        min in -1000.0f64..1000.0,
        span in 0.0f64..500.0,
        seed in any::<u64>(),
    ) {
        let (shape, candidate) = single(min, span, min, false);
        let allele = &shape.alleles()[0];
        let mut rng = StdRng::seed_from_u64(seed);

        let mutated = mutate_random(&candidate, allele, &mut rng).unwrap();
        let v = mutated.value(allele).unwrap();
        prop_assert!(v >= allele.min_value() && v <= allele.max_value());
    }

    #[test]
    fn mutate_positive_moves_toward_max(
        min in -1000.0f64..1000.0,
        span in 0.0f64..500.0,
        t in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let value = min + span * t;
        let (shape, _) = single(min, span, value, true);
        let allele = &shape.alleles()[0];
        let mut rng = StdRng::seed_from_u64(seed);

        let v = mutate_positive(value, allele, &mut rng).unwrap();
        prop_assert!(v >= value && v <= allele.max_value());
    }

    #[test]
    fn mutate_negative_moves_toward_min(
        min in -1000.0f64..1000.0,
        span in 0.0f64..500.0,
        t in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let value = min + span * t;
        let (shape, _) = single(min, span, value, false);
        let allele = &shape.alleles()[0];
        let mut rng = StdRng::seed_from_u64(seed);

        let v = mutate_negative(value, allele, &mut rng);
        prop_assert!(v >= allele.min_value() && v <= value);
    }

    #[test]
    fn mutate_pitched_stays_in_bounds(
        min in -1000.0f64..1000.0,
        span in 0.0f64..500.0,
        t in 0.0f64..=1.0,
        pitch in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let (shape, candidate) = single(min, span, min + span * t, false);
        let allele = &shape.alleles()[0];
        let mut rng = StdRng::seed_from_u64(seed);

        let mutated = mutate_pitched(&candidate, pitch, &mut rng).unwrap();
        let v = mutated.value(allele).unwrap();
        prop_assert!(v >= allele.min_value() && v <= allele.max_value());
    }

    #[test]
    fn pick_random_allele_belongs_to_candidate(
        values in prop::array::uniform3(-100.0f64..100.0),
        seed in any::<u64>(),
    ) {
        let (shape, candidate) = triple(values);
        let mut rng = StdRng::seed_from_u64(seed);

        let allele = pick_random_allele(&candidate, &mut rng);
        prop_assert!(shape.slot_of(allele).is_ok());
    }

    // ==================== Recombination ====================

    #[test]
    fn recombination_leaves_parents_untouched(
        dom_values in prop::array::uniform3(-100.0f64..100.0),
        sub_values in prop::array::uniform3(-100.0f64..100.0),
        p in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let (shape, dominator) = triple(dom_values);
        let mut submissive = Plain {
            genotype: Genotype::new(shape.clone(), 0),
        };
        for (allele, v) in shape.alleles().iter().zip(sub_values) {
            submissive.set_value(allele, v).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(seed);

        let child = Plain { genotype: Genotype::new(shape.clone(), 1) };
        recombine_hard(&dominator, &submissive, child, p, &mut rng).unwrap();
        let child = Plain { genotype: Genotype::new(shape.clone(), 1) };
        recombine_soft(&dominator, &submissive, child, p).unwrap();

        for (allele, (d, s)) in shape.alleles().iter().zip(dom_values.iter().zip(sub_values)) {
            prop_assert_eq!(dominator.value(allele).unwrap(), *d);
            prop_assert_eq!(submissive.value(allele).unwrap(), s);
        }
    }

    #[test]
    fn hard_recombination_values_come_from_a_parent(
        dom_values in prop::array::uniform3(-100.0f64..100.0),
        sub_values in prop::array::uniform3(-100.0f64..100.0),
        p in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let (shape, dominator) = triple(dom_values);
        let mut submissive = Plain {
            genotype: Genotype::new(shape.clone(), 0),
        };
        for (allele, v) in shape.alleles().iter().zip(sub_values) {
            submissive.set_value(allele, v).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(seed);

        let child = Plain { genotype: Genotype::new(shape.clone(), 1) };
        let child = recombine_hard(&dominator, &submissive, child, p, &mut rng).unwrap();

        for (i, allele) in shape.alleles().iter().enumerate() {
            let v = child.value(allele).unwrap();
            prop_assert!(
                v == dom_values[i] || v == sub_values[i],
                "allele {} got {} from neither parent", i, v
            );
        }
    }

    #[test]
    fn hard_recombination_boundary_p(
        dom_values in prop::array::uniform3(-100.0f64..100.0),
        sub_values in prop::array::uniform3(-100.0f64..100.0),
        seed in any::<u64>(),
    ) {
        let (shape, dominator) = triple(dom_values);
        let mut submissive = Plain {
            genotype: Genotype::new(shape.clone(), 0),
        };
        for (allele, v) in shape.alleles().iter().zip(sub_values) {
            submissive.set_value(allele, v).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(seed);

        // p = 1.0 always yields the dominator, p = 0.0 the submissive,
        // for any seed.
        let child = Plain { genotype: Genotype::new(shape.clone(), 1) };
        let child = recombine_hard(&dominator, &submissive, child, 1.0, &mut rng).unwrap();
        for (i, allele) in shape.alleles().iter().enumerate() {
            prop_assert_eq!(child.value(allele).unwrap(), dom_values[i]);
        }

        let child = Plain { genotype: Genotype::new(shape.clone(), 1) };
        let child = recombine_hard(&dominator, &submissive, child, 0.0, &mut rng).unwrap();
        for (i, allele) in shape.alleles().iter().enumerate() {
            prop_assert_eq!(child.value(allele).unwrap(), sub_values[i]);
        }
    }

    #[test]
    fn soft_recombination_is_weighted_mean(
        dom_values in prop::array::uniform3(-100.0f64..100.0),
        sub_values in prop::array::uniform3(-100.0f64..100.0),
        p in 0.0f64..=1.0,
    ) {
        let (shape, dominator) = triple(dom_values);
        let mut submissive = Plain {
            genotype: Genotype::new(shape.clone(), 0),
        };
        for (allele, v) in shape.alleles().iter().zip(sub_values) {
            submissive.set_value(allele, v).unwrap();
        }

        let child = Plain { genotype: Genotype::new(shape.clone(), 1) };
        let child = recombine_soft(&dominator, &submissive, child, p).unwrap();

        for (i, allele) in shape.alleles().iter().enumerate() {
            let expected = dom_values[i] * p + sub_values[i] * (1.0 - p);
            prop_assert_eq!(child.value(allele).unwrap(), expected);
        }
    }
}
