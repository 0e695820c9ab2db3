//! Engine configuration.
//!
//! [`EngineConfig`] holds all parameters that control the evolutionary
//! loop.

/// Configuration for the evolutionary engine.
///
/// Controls population size, operator rates, termination conditions,
/// and parallelism.
///
/// # Defaults
///
/// ```
/// use evosearch::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_population, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evosearch::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_max_population(200)
///     .with_mutation_rate(0.4)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Upper bound on population size after selection.
    ///
    /// Breeding temporarily grows the population past this; selection
    /// cuts it back each generation. Typical range: 50–500.
    pub max_population: usize,

    /// Maximum number of bred generations before termination.
    pub max_generations: u64,

    /// Probability of mutating each freshly bred offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of generations without significant improvement of the
    /// best fitness before stopping.
    ///
    /// Set to 0 to disable plateau-based termination.
    pub stagnation_limit: usize,

    /// Minimum relative improvement to reset the stagnation counter.
    ///
    /// When the best fitness improves, the gain is measured as
    /// `(new - old) / |old|`. A gain below this threshold still counts
    /// as stagnating. Set to 0.0 to count any strict improvement (the
    /// default).
    pub convergence_threshold: f64,

    /// Whether to evaluate candidates in parallel using rayon.
    ///
    /// Fitness functions are pure per candidate, so parallel evaluation
    /// does not change observable semantics; the reference loop is
    /// sequential, hence the default.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_population: 100,
            max_generations: 500,
            mutation_rate: 0.25,
            stagnation_limit: 50,
            convergence_threshold: 0.0,
            parallel: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population cap.
    pub fn with_max_population(mut self, n: usize) -> Self {
        self.max_population = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: u64) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the convergence threshold.
    ///
    /// The stagnation counter resets only when the relative improvement
    /// reaches this threshold. Set to 0.0 to count any improvement.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick feasibility runs: small population, few
    /// generations, eager plateau cutoff.
    pub fn fast() -> Self {
        Self {
            max_population: 50,
            max_generations: 100,
            stagnation_limit: 20,
            convergence_threshold: 0.001,
            ..Self::default()
        }
    }

    /// Preset balancing solution quality and runtime.
    pub fn balanced() -> Self {
        Self {
            max_population: 100,
            max_generations: 300,
            stagnation_limit: 50,
            convergence_threshold: 0.001,
            ..Self::default()
        }
    }

    /// Preset maximizing solution quality at the cost of longer runs.
    pub fn quality() -> Self {
        Self {
            max_population: 150,
            max_generations: 500,
            stagnation_limit: 80,
            convergence_threshold: 0.0005,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_population == 0 {
            return Err("max_population must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if self.convergence_threshold < 0.0 {
            return Err("convergence_threshold must be non-negative".into());
        }
        Ok(())
    }
}
