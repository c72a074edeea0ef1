//! Genetic-algorithm fitting of compartmental epidemic models.
//!
//! Unknown epidemic parameters are estimated by evolving a population of
//! candidate parameter vectors. Each candidate is scored by integrating
//! the model and comparing the simulated curve with observed case data.
//!
//! - **GA engine** ([`ga`]): population, tournament selection, one-point
//!   crossover, self-referential Gaussian mutation, generational loop.
//! - **Epidemic collaborators** ([`epidemic`]): SEIR-D right-hand side,
//!   fixed-step RK4 integration, and a least-squares fitness function.
//!
//! # Architecture
//!
//! The engine depends on the model only through
//! [`ga::FitnessFunction`]; any objective mapping a parameter vector to a
//! scalar cost can be optimised. Randomness is always passed in
//! explicitly (see [`random`]), so runs replay exactly from a seed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_epifit::epidemic::{simulate, Compartment, SeirArgs, SeirFitness, SeirParams};
//! use u_epifit::ga::{GaConfig, Population};
//! use u_epifit::random::create_rng;
//!
//! let truth = SeirParams::new(0.5, 0.2, 0.3, 0.1, 0.01);
//! let initial = [995.0, 0.0, 5.0, 0.0, 0.0];
//! let observed: Vec<f64> = simulate(&initial, &truth, 1.0, 20)
//!     .iter()
//!     .map(|s| s[Compartment::Infected.index()])
//!     .collect();
//!
//! let args = SeirArgs::new(initial, 1.0, Compartment::Infected, observed);
//! let config = GaConfig::new(5).with_num_generations(5).with_prob_mutation(0.0);
//! let mut population = Population::new(config, Arc::new(SeirFitness), args).unwrap();
//!
//! let mut rng = create_rng(7);
//! population.initialise_population(&mut rng);
//! let report = population.optimise(&mut rng).unwrap();
//! assert!(report.best_cost.is_finite());
//! ```

pub mod epidemic;
pub mod error;
pub mod ga;
pub mod random;

pub use error::GaError;
