//! Evolutionary search over bounded real-valued genomes.
//!
//! A reusable optimization loop that evolves a population of candidate
//! solutions toward a caller-supplied fitness objective. Candidates are
//! encoded as a fixed set of independently bounded numeric axes
//! ([`Allele`]s); the engine handles population lifecycle, probabilistic
//! mutation and recombination, fitness memoization, cooperative
//! cancellation, and convergence bookkeeping.
//!
//! # Core Traits
//!
//! - [`Candidate`]: a scoreable genome with allele get/set keyed by
//!   identity and a memoized fitness
//! - [`Problem`]: problem definition — seeding, evaluation, and
//!   optional policy overrides for selection, recombination, mutation
//!
//! # Key Types
//!
//! - [`AlleleSet`] / [`Genotype`]: a genome shape and the reusable
//!   storage adapters embed
//! - [`EngineConfig`]: loop parameters (population cap, rates, presets)
//! - [`Engine`]: executes evaluate → select → breed until cancellation,
//!   the generation budget, or a fitness plateau
//!
//! # Submodules
//!
//! - [`mutation`]: uniform, directional, and pitched mutation operators
//! - [`recombination`]: discrete and continuous parent blending
//! - [`selection`]: truncation survival and random parent pairing
//! - [`square`]: reference adapter — the largest square inside a
//!   simple polygon
//!
//! # Quick Start
//!
//! ```ignore
//! use evosearch::{Engine, EngineConfig};
//! use evosearch::square::{Point, Polygon, SquareProblem};
//!
//! let polygon = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 0.0),
//!     Point::new(100.0, 100.0),
//!     Point::new(0.0, 100.0),
//! ]);
//! let mut engine = Engine::new(
//!     SquareProblem::new(polygon),
//!     EngineConfig::default().with_seed(42),
//! );
//! let best = engine.run(None)?;
//! ```

pub mod allele;
pub mod candidate;
pub mod config;
pub mod engine;
pub mod error;
pub mod mutation;
pub mod problem;
pub mod recombination;
pub mod selection;
pub mod square;

pub use allele::{Allele, AlleleSet};
pub use candidate::{Candidate, Genotype};
pub use config::EngineConfig;
pub use engine::{Engine, Outcome};
pub use error::{EvoError, EvoResult};
pub use problem::Problem;
