//! Epidemic model collaborators.
//!
//! The GA engine never depends on this module; it is one concrete
//! objective the engine is typically run against.
//!
//! - [`model`]: SEIR-D compartment equations
//! - [`integrator`]: Fixed-step fourth-order Runge-Kutta
//! - [`fitness`]: Least-squares fit of one compartment to observed data

pub mod fitness;
pub mod integrator;
pub mod model;

pub use fitness::{SeirArgs, SeirFitness};
pub use integrator::{runge_kutta_4, simulate};
pub use model::{seir_model, Compartment, SeirParams, States, NUM_COMPARTMENTS};
