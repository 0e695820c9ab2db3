//! The evolutionary loop.
//!
//! [`Engine`] orchestrates the complete process over a [`Problem`]:
//! evaluate → select → breed → repeat, tracking the best candidate seen
//! and stopping on cancellation, generation budget, or a fitness
//! plateau.
//!
//! The engine owns the population and the best-candidate tracker for
//! the duration of a run; the best candidate is handed back by value
//! when the run terminates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::config::EngineConfig;
use crate::error::EvoResult;
use crate::problem::Problem;
use crate::selection::random_pair;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The generation budget was exhausted.
    MaxGenerations,
    /// The best fitness plateaued for the configured number of
    /// generations.
    Converged,
    /// The caller signalled the cancellation handle.
    Cancelled,
}

/// Drives the evolutionary loop over a [`Problem`].
///
/// # Usage
///
/// ```ignore
/// let mut engine = Engine::new(problem, EngineConfig::default().with_seed(42));
/// let best = engine.run(None)?;
/// println!("best after {} generations: {:?}", engine.current_generation(), best);
/// ```
pub struct Engine<P: Problem> {
    problem: P,
    config: EngineConfig,
    generation: u64,
    best: Option<P::Candidate>,
    history: Vec<f64>,
    outcome: Option<Outcome>,
}

impl<P: Problem> Engine<P> {
    /// Creates an engine for `problem` with the given configuration.
    pub fn new(problem: P, config: EngineConfig) -> Self {
        Self {
            problem,
            config,
            generation: 0,
            best: None,
            history: Vec::new(),
            outcome: None,
        }
    }

    /// The problem this engine evolves.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The active configuration. Immutable during a run.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Index of the most recently bred generation (0 before any
    /// breeding).
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// The fittest candidate observed so far across all generations.
    pub fn best_candidate(&self) -> Option<&P::Candidate> {
        self.best.as_ref()
    }

    /// Best fitness after each evaluated generation. Non-decreasing.
    pub fn fitness_history(&self) -> &[f64] {
        &self.history
    }

    /// Why the last run stopped; `None` before the first run and after
    /// a run whose seed population was empty.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Runs the loop on the problem's own seed population.
    pub fn run(&mut self, cancel: Option<Arc<AtomicBool>>) -> EvoResult<Option<P::Candidate>> {
        let initial = self.problem.initial_population();
        self.start_evolution(initial, cancel)
    }

    /// Runs the loop on a caller-supplied seed population.
    ///
    /// Returns the best candidate found, or `None` if `initial` was
    /// empty. Cancellation is polled at the top of every generation, so
    /// a signal set mid-generation takes effect at the next boundary and
    /// the best candidate found up to that point is still returned.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`EngineConfig::validate`] first for a descriptive error), and
    /// propagates any panic from the problem's own callbacks.
    pub fn start_evolution(
        &mut self,
        initial: Vec<P::Candidate>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> EvoResult<Option<P::Candidate>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        self.start_evolution_with(initial, cancel, &mut rng)
    }

    /// Runs the loop with an injected random generator.
    ///
    /// The generator is the only source of randomness for selection,
    /// recombination, and mutation, which makes runs fully
    /// reproducible.
    pub fn start_evolution_with<R: Rng>(
        &mut self,
        initial: Vec<P::Candidate>,
        cancel: Option<Arc<AtomicBool>>,
        rng: &mut R,
    ) -> EvoResult<Option<P::Candidate>> {
        self.config.validate().expect("invalid EngineConfig");
        self.generation = 0;
        self.best = None;
        self.history.clear();
        self.outcome = None;

        if initial.is_empty() {
            debug!("empty seed population, nothing to evolve");
            return Ok(None);
        }

        debug!(
            "evolution start: {} seeds, population cap {}, budget {} generations",
            initial.len(),
            self.config.max_population,
            self.config.max_generations
        );

        let mut population = initial;
        let mut stagnation = 0usize;

        loop {
            if let Some(flag) = cancel.as_ref() {
                if flag.load(Ordering::Relaxed) {
                    debug!("cancelled at generation {}", self.generation);
                    self.outcome = Some(Outcome::Cancelled);
                    break;
                }
            }

            let improved = self.evaluate(&mut population);
            let best_fitness = self
                .best
                .as_ref()
                .and_then(Candidate::fitness)
                .unwrap_or(f64::NEG_INFINITY);
            self.history.push(best_fitness);
            trace!(
                "generation {}: best fitness {best_fitness}",
                self.generation
            );

            if improved {
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            if self.config.stagnation_limit > 0 && stagnation >= self.config.stagnation_limit {
                debug!(
                    "converged: no significant improvement for {stagnation} generations"
                );
                self.outcome = Some(Outcome::Converged);
                break;
            }
            if self.generation >= self.config.max_generations {
                debug!("generation budget exhausted");
                self.outcome = Some(Outcome::MaxGenerations);
                break;
            }

            population = self.problem.select(population, self.config.max_population);
            self.generation += 1;
            let offspring = self.breed(&population, rng)?;
            population.extend(offspring);
        }

        Ok(self.best.clone())
    }

    /// Scores every unscored candidate and folds the results into the
    /// best tracker.
    ///
    /// Returns whether the best fitness improved by at least the
    /// configured convergence threshold. The tracker itself moves on any
    /// strict improvement, so it never decreases.
    fn evaluate(&mut self, population: &mut [P::Candidate]) -> bool {
        if self.config.parallel {
            let problem = &self.problem;
            population
                .par_iter_mut()
                .filter(|c| c.fitness().is_none())
                .for_each(|c| {
                    let score = problem.fitness(c);
                    c.set_fitness(score);
                });
        } else {
            for c in population.iter_mut().filter(|c| c.fitness().is_none()) {
                let score = self.problem.fitness(c);
                c.set_fitness(score);
            }
        }

        let mut improved = false;
        for c in population.iter() {
            let Some(score) = c.fitness() else { continue };
            match self.best.as_ref().and_then(Candidate::fitness) {
                None => {
                    self.best = Some(c.clone());
                    improved = true;
                }
                Some(best_score) if score > best_score => {
                    let gain = if best_score == 0.0 {
                        f64::INFINITY
                    } else {
                        (score - best_score) / best_score.abs()
                    };
                    if gain >= self.config.convergence_threshold {
                        improved = true;
                    }
                    self.best = Some(c.clone());
                }
                _ => {}
            }
        }
        improved
    }

    /// Breeds one generation of offspring from the survivors.
    fn breed<R: Rng>(
        &self,
        survivors: &[P::Candidate],
        rng: &mut R,
    ) -> EvoResult<Vec<P::Candidate>> {
        let mut offspring = Vec::with_capacity(self.config.max_population);
        for _ in 0..self.config.max_population {
            let (i, j) = random_pair(survivors, rng);
            let mut child =
                self.problem
                    .recombine(&survivors[i], &survivors[j], self.generation, rng)?;
            if rng.random_range(0.0..1.0) < self.config.mutation_rate {
                child = self.problem.mutate(child, rng)?;
            }
            offspring.push(child);
        }
        Ok(offspring)
    }
}
