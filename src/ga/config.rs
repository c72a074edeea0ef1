//! GA configuration.
//!
//! [`GaConfig`] holds every parameter that controls a fitting run:
//! population sizing, the gene sampling range, operator tags, and the
//! generation budget. It is consumed read-only by
//! [`Population`](super::Population).

use super::operators::{Crossover, Mutation};
use crate::error::GaError;
use std::fmt;
use std::str::FromStr;

/// Optimisation direction.
///
/// Selection always treats a higher *adjusted* score as better. The
/// adjustment multiplies the raw cost by [`sign`](Self::sign): `+1` when
/// maximising, `-1` when minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Optimisation {
    /// Higher raw cost is better.
    Maximise,
    /// Lower raw cost is better.
    #[default]
    Minimise,
}

impl Optimisation {
    /// The configuration tag for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Optimisation::Maximise => "maximise",
            Optimisation::Minimise => "minimise",
        }
    }

    /// `+1.0` for maximisation, `-1.0` for minimisation.
    pub fn sign(self) -> f64 {
        match self {
            Optimisation::Maximise => 1.0,
            Optimisation::Minimise => -1.0,
        }
    }

    /// Maps a raw cost onto the "higher wins" scale used by selection.
    pub fn adjust(self, cost: f64) -> f64 {
        self.sign() * cost
    }

    /// Whether raw cost `a` is strictly better than raw cost `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.adjust(a) > self.adjust(b)
    }
}

impl FromStr for Optimisation {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maximise" => Ok(Optimisation::Maximise),
            "minimise" => Ok(Optimisation::Minimise),
            other => Err(GaError::Configuration(format!(
                "unknown optimisation `{other}`, expected `maximise` or `minimise`"
            ))),
        }
    }
}

impl fmt::Display for Optimisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower or upper bound of the initial sampling range.
///
/// A scalar applies to every gene; a vector gives one bound per gene and
/// must have exactly `num_genes` entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum GeneBound {
    Scalar(f64),
    PerGene(Vec<f64>),
}

impl GeneBound {
    /// Bound for gene `gene`.
    ///
    /// # Panics
    /// Panics if a per-gene bound has no entry for `gene`. Validated
    /// configurations never hit this.
    pub fn at(&self, gene: usize) -> f64 {
        match self {
            GeneBound::Scalar(v) => *v,
            GeneBound::PerGene(values) => values[gene],
        }
    }

    fn check(&self, name: &str, num_genes: usize) -> Result<(), GaError> {
        match self {
            GeneBound::Scalar(v) if !v.is_finite() => Err(GaError::Configuration(format!(
                "{name} must be finite, got {v}"
            ))),
            GeneBound::Scalar(_) => Ok(()),
            GeneBound::PerGene(values) => {
                if values.len() != num_genes {
                    return Err(GaError::Configuration(format!(
                        "{name} has {} entries but num_genes is {num_genes}",
                        values.len()
                    )));
                }
                match values.iter().position(|v| !v.is_finite()) {
                    Some(i) => Err(GaError::Configuration(format!(
                        "{name}[{i}] must be finite, got {}",
                        values[i]
                    ))),
                    None => Ok(()),
                }
            }
        }
    }
}

impl From<f64> for GeneBound {
    fn from(v: f64) -> Self {
        GeneBound::Scalar(v)
    }
}

impl From<Vec<f64>> for GeneBound {
    fn from(values: Vec<f64>) -> Self {
        GeneBound::PerGene(values)
    }
}

/// Configuration for a GA fitting run.
///
/// # Builder Pattern
///
/// ```
/// use u_epifit::ga::{Crossover, GaConfig, Mutation, Optimisation};
///
/// let config = GaConfig::new(5)
///     .with_size_population(40)
///     .with_bounds(0.0, 1.0)
///     .with_crossover(Crossover::OnePoint)
///     .with_mutation(Mutation::Normal)
///     .with_pressure(0.2)
///     .with_prob_mutation(0.5)
///     .with_num_generations(25)
///     .with_optimisation(Optimisation::Minimise)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
///
/// # Deserialization
///
/// With the `serde` feature every key except `seed` and `parallel` is
/// required. A missing key or an unknown operator tag is rejected instead
/// of being defaulted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals kept in every generation.
    pub size_population: usize,

    /// Chromosome length. Fixed for the lifetime of a run.
    pub num_genes: usize,

    /// Lower bound of the initial uniform sampling range.
    pub min_values: GeneBound,

    /// Upper bound of the initial uniform sampling range.
    pub max_values: GeneBound,

    /// Crossover operator carried by every individual.
    pub crossover: Crossover,

    /// Mutation operator carried by every individual.
    pub mutation: Mutation,

    /// Fraction of genes targeted when an individual mutates (0.0–1.0).
    pub pressure: f64,

    /// Probability that an individual mutates in a generation (0.0–1.0).
    pub prob_mutation: f64,

    /// Number of generations run by `optimise`.
    pub num_generations: usize,

    /// Whether lower or higher raw cost is better.
    pub optimisation: Optimisation,

    /// Random seed for reproducibility. `None` draws one from entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,

    /// Score individuals in parallel. Only effective with the `parallel`
    /// feature.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parallel: bool,
}

impl GaConfig {
    /// Creates a configuration for chromosomes of `num_genes` genes.
    ///
    /// Remaining parameters start at: 20 individuals, genes sampled from
    /// `[0, 1]`, one-point crossover, normal mutation, pressure 0.2,
    /// mutation probability 0.5, 10 generations, minimisation.
    pub fn new(num_genes: usize) -> Self {
        Self {
            size_population: 20,
            num_genes,
            min_values: GeneBound::Scalar(0.0),
            max_values: GeneBound::Scalar(1.0),
            crossover: Crossover::OnePoint,
            mutation: Mutation::Normal,
            pressure: 0.2,
            prob_mutation: 0.5,
            num_generations: 10,
            optimisation: Optimisation::Minimise,
            seed: None,
            parallel: false,
        }
    }

    /// Parses a JSON configuration and validates it.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, GaError> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| GaError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_size_population(mut self, n: usize) -> Self {
        self.size_population = n;
        self
    }

    /// Sets both sampling bounds.
    pub fn with_bounds(mut self, min: impl Into<GeneBound>, max: impl Into<GeneBound>) -> Self {
        self.min_values = min.into();
        self.max_values = max.into();
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the mutation pressure.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-individual mutation probability.
    pub fn with_prob_mutation(mut self, prob: f64) -> Self {
        self.prob_mutation = prob.clamp(0.0, 1.0);
        self
    }

    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    pub fn with_optimisation(mut self, optimisation: Optimisation) -> Self {
        self.optimisation = optimisation;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Operator tags that are declared but unimplemented pass validation;
    /// they fail when the operator is first used.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.size_population < 2 {
            return Err(GaError::Configuration(
                "size_population must be at least 2".into(),
            ));
        }
        if self.num_genes == 0 {
            return Err(GaError::Configuration(
                "num_genes must be at least 1".into(),
            ));
        }
        self.min_values.check("min_values", self.num_genes)?;
        self.max_values.check("max_values", self.num_genes)?;
        for gene in 0..self.num_genes {
            let (lo, hi) = (self.min_values.at(gene), self.max_values.at(gene));
            if lo > hi {
                return Err(GaError::Configuration(format!(
                    "min_values exceeds max_values at gene {gene}: {lo} > {hi}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.pressure) {
            return Err(GaError::Configuration(format!(
                "pressure must be within [0, 1], got {}",
                self.pressure
            )));
        }
        if !(0.0..=1.0).contains(&self.prob_mutation) {
            return Err(GaError::Configuration(format!(
                "prob_mutation must be within [0, 1], got {}",
                self.prob_mutation
            )));
        }
        Ok(())
    }
}
