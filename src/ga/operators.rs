//! Real-valued genetic operators.
//!
//! Operators are selected by tag ([`Crossover`], [`Mutation`]) and carried
//! by every individual. Declared variants without an implementation fail
//! with [`GaError::UnsupportedOperator`] when they are applied, not when
//! they are configured.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: single cut, prefix/suffix exchange
//!
//! # Mutation Operators
//!
//! - [`normal_mutation`]: self-referential Gaussian perturbation
//!
//! # Self-referential noise
//!
//! [`normal_mutation`] draws the perturbation for gene `i` from
//! `N(x_i, std(x))`, where `std(x)` is the population standard deviation of
//! the whole chromosome at the moment gene `i` is mutated. The perturbation
//! is *added* to the gene, so a mutated gene becomes `2 x_i + noise`.
//! Chromosomes with more internal dispersion therefore mutate more
//! aggressively. This is adaptive behaviour and is kept exactly.

use crate::error::GaError;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Operator tags
// ============================================================================

/// Crossover operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Crossover {
    /// Single cut point; see [`one_point_crossover`].
    #[default]
    OnePoint,
    /// Declared but unimplemented.
    MultiplePoints,
}

impl Crossover {
    /// The configuration tag for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Crossover::OnePoint => "one_point",
            Crossover::MultiplePoints => "multiple_points",
        }
    }

    /// Recombines two parent chromosomes into two children.
    ///
    /// Parents are only read; both children are freshly allocated.
    pub fn apply<R: Rng>(
        self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut R,
    ) -> Result<(Vec<f64>, Vec<f64>), GaError> {
        match self {
            Crossover::OnePoint => one_point_crossover(parent1, parent2, rng),
            Crossover::MultiplePoints => Err(GaError::UnsupportedOperator {
                kind: "crossover",
                tag: self.as_str(),
            }),
        }
    }
}

impl FromStr for Crossover {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_point" => Ok(Crossover::OnePoint),
            "multiple_points" => Ok(Crossover::MultiplePoints),
            other => Err(GaError::Configuration(format!(
                "unknown crossover `{other}`, expected `one_point` or `multiple_points`"
            ))),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutation operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Mutation {
    /// Self-referential Gaussian noise; see [`normal_mutation`].
    #[default]
    Normal,
    /// Declared but unimplemented.
    Uniform,
}

impl Mutation {
    /// The configuration tag for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Mutation::Normal => "normal",
            Mutation::Uniform => "uniform",
        }
    }

    /// Mutates a chromosome in place.
    pub fn apply<R: Rng>(
        self,
        chromosome: &mut [f64],
        pressure: f64,
        rng: &mut R,
    ) -> Result<(), GaError> {
        match self {
            Mutation::Normal => normal_mutation(chromosome, pressure, rng),
            Mutation::Uniform => Err(GaError::UnsupportedOperator {
                kind: "mutation",
                tag: self.as_str(),
            }),
        }
    }
}

impl FromStr for Mutation {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Mutation::Normal),
            "uniform" => Ok(Mutation::Uniform),
            other => Err(GaError::Configuration(format!(
                "unknown mutation `{other}`, expected `normal` or `uniform`"
            ))),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// One-point crossover.
///
/// Draws a cut index `t` uniformly from `[0, n)` and returns
/// `(p1[..t] ++ p2[t..], p2[..t] ++ p1[t..])`. A cut of 0 yields children
/// that are copies of the opposite parents.
///
/// # Errors
/// [`GaError::DimensionMismatch`] if the parents differ in length.
pub fn one_point_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>), GaError> {
    let n = parent1.len();
    if parent2.len() != n {
        return Err(GaError::DimensionMismatch {
            expected: n,
            actual: parent2.len(),
        });
    }
    if n == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let cut = rng.random_range(0..n);
    Ok((splice(parent1, parent2, cut), splice(parent2, parent1, cut)))
}

/// `head[..cut] ++ tail[cut..]`.
fn splice(head: &[f64], tail: &[f64], cut: usize) -> Vec<f64> {
    let mut child = Vec::with_capacity(head.len());
    child.extend_from_slice(&head[..cut]);
    child.extend_from_slice(&tail[cut..]);
    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Number of gene draws a mutation makes: `round(pressure * n)`.
pub fn mutation_draws(pressure: f64, n: usize) -> usize {
    (pressure * n as f64).round().max(0.0) as usize
}

/// Normal mutation with self-referential noise.
///
/// Samples [`mutation_draws`] gene indices with replacement, removes
/// duplicates (so at most that many distinct genes change), then for each
/// selected gene in ascending order adds a draw from
/// `N(gene, std(chromosome))`.
///
/// # Errors
/// [`GaError::Numerical`] if the chromosome holds non-finite values that
/// make the noise distribution undefined.
pub fn normal_mutation<R: Rng>(
    chromosome: &mut [f64],
    pressure: f64,
    rng: &mut R,
) -> Result<(), GaError> {
    let n = chromosome.len();
    let draws = mutation_draws(pressure, n);
    if n == 0 || draws == 0 {
        return Ok(());
    }

    let genes: BTreeSet<usize> = (0..draws).map(|_| rng.random_range(0..n)).collect();

    for gene in genes {
        let sigma = std_dev(chromosome);
        let normal = Normal::new(chromosome[gene], sigma).map_err(|e| {
            GaError::Numerical(format!(
                "cannot mutate gene {gene} (mean {}, std {sigma}): {e}",
                chromosome[gene]
            ))
        })?;
        chromosome[gene] += normal.sample(rng);
    }
    Ok(())
}

/// Population standard deviation (no Bessel correction).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt()
}

// ============================================================================
// Tests
// ============================================================================
