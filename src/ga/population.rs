//! Population and generational loop.
//!
//! [`Population`] drives the run:
//! initialise → (score → select → crossover → replace → mutate) × generations.
//!
//! # Lifecycle
//!
//! A population starts uninitialised. [`initialise_population`]
//! samples the first generation; every other operation fails with
//! [`GaError::NotInitialised`] before that. Re-initialising discards the
//! current individuals and restarts the generation counter.
//!
//! [`initialise_population`]: Population::initialise_population

use super::config::GaConfig;
use super::individual::Individual;
use super::selection::select_parents;
use super::types::{FitnessArgs, FitnessFunction};
use crate::error::GaError;
use crate::random::rng_from_seed;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cost summary of one scored generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based index of the generation that was scored.
    pub generation: usize,

    /// Best raw cost in the generation, according to the optimisation
    /// direction.
    pub best_cost: f64,

    /// Mean raw cost of the generation.
    pub mean_cost: f64,
}

impl GenerationStats {
    fn from_costs(generation: usize, costs: &[f64], config: &GaConfig) -> Self {
        let best_cost = costs
            .iter()
            .copied()
            .reduce(|best, c| {
                if config.optimisation.is_better(c, best) {
                    c
                } else {
                    best
                }
            })
            .unwrap_or(f64::NAN);
        let mean_cost = costs.iter().sum::<f64>() / costs.len() as f64;
        Self {
            generation,
            best_cost,
            mean_cost,
        }
    }
}

/// Result of [`Population::optimise`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisationReport {
    /// Number of generations executed.
    pub generations: usize,

    /// Statistics of each generation, scored just before it was replaced.
    pub history: Vec<GenerationStats>,

    /// Index of the best individual in the terminal population.
    pub best_index: usize,

    /// Raw cost of that individual.
    pub best_cost: f64,
}

/// A fixed-size collection of individuals evolved across generations.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_epifit::ga::{GaConfig, Population};
/// use u_epifit::random::create_rng;
///
/// let target = |p: &[f64]| p.iter().map(|x| (x - 0.5) * (x - 0.5)).sum::<f64>();
/// let config = GaConfig::new(5).with_num_generations(10);
/// let mut population = Population::new(config, Arc::new(target), ()).unwrap();
///
/// let mut rng = create_rng(42);
/// population.initialise_population(&mut rng);
/// let report = population.optimise(&mut rng).unwrap();
///
/// assert_eq!(report.history.len(), 10);
/// assert_eq!(population.individuals().len(), 20);
/// ```
pub struct Population<F: FitnessFunction> {
    config: GaConfig,
    fitness_fn: Arc<F>,
    fitness_args: FitnessArgs<F::Args>,
    individuals: Vec<Individual<F>>,
    num_ind: Option<usize>,
    generation: usize,
}

impl<F: FitnessFunction> Population<F> {
    /// Creates an uninitialised population.
    ///
    /// `fitness_args` are forwarded unchanged to every evaluation.
    ///
    /// # Errors
    /// [`GaError::Configuration`] if `config` fails validation.
    pub fn new(config: GaConfig, fitness_fn: Arc<F>, fitness_args: F::Args) -> Result<Self, GaError> {
        config.validate()?;
        Ok(Self {
            config,
            fitness_fn,
            fitness_args: FitnessArgs::new(fitness_args),
            individuals: Vec::new(),
            num_ind: None,
            generation: 0,
        })
    }

    /// Creates a population from existing individuals.
    ///
    /// The population size becomes the number of individuals given, which
    /// may differ from `config.size_population`.
    ///
    /// # Errors
    /// [`GaError::Configuration`] if `config` is invalid or fewer than two
    /// individuals are given; [`GaError::DimensionMismatch`] if any
    /// chromosome length differs from `config.num_genes`.
    pub fn with_individuals(
        config: GaConfig,
        fitness_fn: Arc<F>,
        fitness_args: F::Args,
        individuals: Vec<Individual<F>>,
    ) -> Result<Self, GaError> {
        let mut population = Self::new(config, fitness_fn, fitness_args)?;
        if individuals.len() < 2 {
            return Err(GaError::Configuration(format!(
                "a population needs at least 2 individuals, got {}",
                individuals.len()
            )));
        }
        if let Some(bad) = individuals
            .iter()
            .find(|ind| ind.num_genes() != population.config.num_genes)
        {
            return Err(GaError::DimensionMismatch {
                expected: population.config.num_genes,
                actual: bad.num_genes(),
            });
        }
        population.num_ind = Some(individuals.len());
        population.individuals = individuals;
        Ok(population)
    }

    /// Run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Current individuals, in population order.
    pub fn individuals(&self) -> &[Individual<F>] {
        &self.individuals
    }

    /// Consumes the population, returning its individuals.
    pub fn into_individuals(self) -> Vec<Individual<F>> {
        self.individuals
    }

    /// Population size, or `None` before initialisation.
    pub fn num_ind(&self) -> Option<usize> {
        self.num_ind
    }

    /// Number of generations produced since initialisation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Whether the population holds a generation.
    pub fn is_initialised(&self) -> bool {
        self.num_ind.is_some()
    }

    /// Samples `size_population` individuals.
    ///
    /// Each gene is drawn independently and uniformly from
    /// `[min_values, max_values]` for its position. Any previous
    /// individuals are discarded.
    pub fn initialise_population<R: Rng>(&mut self, rng: &mut R) {
        let config = &self.config;
        self.individuals = (0..config.size_population)
            .map(|_| {
                let chromosome = (0..config.num_genes)
                    .map(|gene| {
                        let lo = config.min_values.at(gene);
                        let hi = config.max_values.at(gene);
                        rng.random::<f64>() * (hi - lo) + lo
                    })
                    .collect();
                Individual::new(
                    Arc::clone(&self.fitness_fn),
                    config.crossover,
                    config.mutation,
                    chromosome,
                )
            })
            .collect();
        self.num_ind = Some(self.individuals.len());
        self.generation = 0;
        debug!(
            size = self.individuals.len(),
            genes = config.num_genes,
            "population initialised"
        );
    }

    /// Evaluates every individual, in population order.
    ///
    /// Nothing is cached: each call re-runs the fitness function for the
    /// whole population.
    ///
    /// # Errors
    /// Any error of the fitness function, unchanged. A NaN cost is
    /// rejected with [`GaError::Numerical`] because it cannot be ranked.
    pub fn scores(&mut self) -> Result<Vec<f64>, GaError> {
        self.require_initialised()?;

        let costs = self.evaluate_all()?;
        if let Some(i) = costs.iter().position(|c| c.is_nan()) {
            return Err(GaError::Numerical(format!(
                "fitness of individual {i} is NaN"
            )));
        }
        Ok(costs)
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all(&mut self) -> Result<Vec<f64>, GaError> {
        if self.config.parallel {
            return self
                .individuals
                .par_iter()
                .map_with(self.fitness_args.clone(), |args, ind| {
                    ind.fitness_function(args)
                })
                .collect();
        }
        self.evaluate_sequential()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all(&mut self) -> Result<Vec<f64>, GaError> {
        self.evaluate_sequential()
    }

    fn evaluate_sequential(&mut self) -> Result<Vec<f64>, GaError> {
        let args = &mut self.fitness_args;
        self.individuals
            .iter()
            .map(|ind| ind.fitness_function(args))
            .collect()
    }

    /// Selects two parent indices by double tournament.
    ///
    /// `scores` must be adjusted for the optimisation direction, so that
    /// a higher score is always better.
    pub fn select_individuals<R: Rng>(
        &self,
        scores: &[f64],
        rng: &mut R,
    ) -> Result<[usize; 2], GaError> {
        let num_ind = self.require_initialised()?;
        if scores.len() != num_ind {
            return Err(GaError::DimensionMismatch {
                expected: num_ind,
                actual: scores.len(),
            });
        }
        select_parents(scores, rng)
    }

    /// Replaces the whole population with a new generation.
    ///
    /// Scores the current generation once, then performs `num_ind`
    /// breeding events. Each keeps only the first child; the second is
    /// dropped. The old individuals are discarded in a single swap.
    ///
    /// Returns the statistics of the generation that was replaced.
    pub fn new_generation<R: Rng>(&mut self, rng: &mut R) -> Result<GenerationStats, GaError> {
        let num_ind = self.require_initialised()?;
        let costs = self.scores()?;
        let stats = GenerationStats::from_costs(self.generation, &costs, &self.config);

        let optimisation = self.config.optimisation;
        let adjusted: Vec<f64> = costs.iter().map(|&c| optimisation.adjust(c)).collect();

        let mut next_generation = Vec::with_capacity(num_ind);
        for _ in 0..num_ind {
            let [first, second] = self.select_individuals(&adjusted, rng)?;
            let (child, _) = self.individuals[first].offspring(&self.individuals[second], rng)?;
            next_generation.push(child);
        }
        next_generation.truncate(num_ind);

        self.individuals = next_generation;
        self.generation += 1;
        Ok(stats)
    }

    /// Mutates each individual independently with probability
    /// `prob_mutation`, using the configured pressure.
    ///
    /// Returns how many individuals were mutated.
    pub fn mutation<R: Rng>(&mut self, prob_mutation: f64, rng: &mut R) -> Result<usize, GaError> {
        self.require_initialised()?;
        let pressure = self.config.pressure;

        let mut mutated = 0;
        for (i, ind) in self.individuals.iter_mut().enumerate() {
            if rng.random::<f64>() < prob_mutation {
                ind.mutate(pressure, rng)?;
                trace!(individual = i, "mutated");
                mutated += 1;
            }
        }
        Ok(mutated)
    }

    /// Runs `num_generations` rounds of [`new_generation`] followed by
    /// [`mutation`].
    ///
    /// There is no early stopping and no elitism. The individuals are not
    /// reordered, so index 0 is not necessarily the best; use
    /// [`OptimisationReport::best_index`] or [`best`].
    ///
    /// [`new_generation`]: Self::new_generation
    /// [`mutation`]: Self::mutation
    /// [`best`]: Self::best
    pub fn optimise<R: Rng>(&mut self, rng: &mut R) -> Result<OptimisationReport, GaError> {
        self.require_initialised()?;
        let generations = self.config.num_generations;
        info!(
            generations,
            size = self.individuals.len(),
            optimisation = %self.config.optimisation,
            "optimisation started"
        );

        let mut history = Vec::with_capacity(generations);
        for _ in 0..generations {
            let stats = self.new_generation(rng)?;
            let mutated = self.mutation(self.config.prob_mutation, rng)?;
            debug!(
                generation = stats.generation,
                best_cost = stats.best_cost,
                mean_cost = stats.mean_cost,
                mutated,
                "generation complete"
            );
            history.push(stats);
        }

        let (best_index, best_cost) = self.best()?;
        info!(best_index, best_cost, "optimisation finished");
        Ok(OptimisationReport {
            generations,
            history,
            best_index,
            best_cost,
        })
    }

    /// Initialises and optimises with a generator built from
    /// `config.seed`.
    ///
    /// With a seed, the whole run is reproducible; without one, the
    /// generator is seeded from entropy.
    pub fn run(&mut self) -> Result<OptimisationReport, GaError> {
        let mut rng = rng_from_seed(self.config.seed);
        debug!(seed = ?self.config.seed, "seeded run");
        self.initialise_population(&mut rng);
        self.optimise(&mut rng)
    }

    /// Scores the population and returns the index and raw cost of its
    /// best individual. Ties go to the lower index.
    pub fn best(&mut self) -> Result<(usize, f64), GaError> {
        let costs = self.scores()?;
        let optimisation = self.config.optimisation;
        let mut best = 0;
        for (i, &cost) in costs.iter().enumerate().skip(1) {
            if optimisation.is_better(cost, costs[best]) {
                best = i;
            }
        }
        Ok((best, costs[best]))
    }

    fn require_initialised(&self) -> Result<usize, GaError> {
        self.num_ind.ok_or(GaError::NotInitialised)
    }
}

// ============================================================================
// Tests
// ============================================================================
