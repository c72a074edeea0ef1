//! Genetic algorithm engine.
//!
//! A real-valued GA that searches model parameter vectors. The engine is
//! model-agnostic: it only sees a [`FitnessFunction`] mapping a parameter
//! vector (plus run-constant arguments) to a scalar cost.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population size, sampling range, operators)
//! - [`Individual`]: A chromosome bound to its operators and objective
//! - [`Population`]: Fixed-size collection driving the generation loop
//! - [`OptimisationReport`]: Per-generation statistics and the final best
//!
//! # Submodules
//!
//! - [`operators`]: One-point crossover and self-referential normal mutation
//! - [`selection`]: Double tournament parent selection
//!
//! # Determinism
//!
//! Every stochastic step draws from an explicitly passed `Rng`. Given the
//! same seed and configuration, two runs produce identical chromosomes.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod individual;
pub mod operators;
mod population;
pub mod selection;
mod types;

pub use config::{GaConfig, GeneBound, Optimisation};
pub use individual::Individual;
pub use operators::{Crossover, Mutation};
pub use population::{GenerationStats, OptimisationReport, Population};
pub use types::{FitnessArgs, FitnessFunction};
