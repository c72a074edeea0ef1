//! Least-squares objective for fitting SEIR-D rates to observed data.

use super::integrator::runge_kutta_4;
use super::model::{seir_model, Compartment, SeirParams, States};
use crate::error::GaError;
use crate::ga::{FitnessArgs, FitnessFunction};

/// Run-constant inputs of [`SeirFitness`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeirArgs {
    /// Compartment populations at the first observation.
    pub initial_states: States,

    /// Integration step, in the time unit of the rates.
    pub step: f64,

    /// Compartment compared against `observed`.
    pub compartment: Compartment,

    /// Observed series, one value per observation.
    pub observed: Vec<f64>,

    /// Integration steps between consecutive observations.
    #[cfg_attr(feature = "serde", serde(default = "default_steps_per_observation"))]
    pub steps_per_observation: usize,
}

#[cfg(feature = "serde")]
fn default_steps_per_observation() -> usize {
    1
}

impl SeirArgs {
    /// Observations taken every integration step.
    pub fn new(
        initial_states: States,
        step: f64,
        compartment: Compartment,
        observed: Vec<f64>,
    ) -> Self {
        Self {
            initial_states,
            step,
            compartment,
            observed,
            steps_per_observation: 1,
        }
    }

    /// Sets how many integration steps separate two observations, e.g. 24
    /// for daily data integrated hourly.
    pub fn with_steps_per_observation(mut self, steps: usize) -> Self {
        self.steps_per_observation = steps;
        self
    }
}

/// Sum of squared residuals between a simulated compartment and the
/// observed series.
///
/// The chromosome is read as `[β, ε, σ, ρ, μ]`. Lower is better, so runs
/// should minimise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeirFitness;

impl FitnessFunction for SeirFitness {
    type Args = SeirArgs;

    fn evaluate(&self, args: &FitnessArgs<SeirArgs>) -> Result<f64, GaError> {
        let params = SeirParams::from_slice(&args.params)?;
        let seir = &args.extra;

        if !(seir.step.is_finite() && seir.step > 0.0) {
            return Err(GaError::Configuration(format!(
                "integration step must be positive and finite, got {}",
                seir.step
            )));
        }
        let stride = seir.steps_per_observation;
        if stride == 0 {
            return Err(GaError::Configuration(
                "steps_per_observation must be at least 1".into(),
            ));
        }
        if seir.observed.is_empty() {
            return Ok(0.0);
        }

        let intervals = seir.observed.len() - 1;
        if intervals
            .checked_mul(stride)
            .and_then(|steps| steps.checked_add(1))
            .is_none()
        {
            return Err(GaError::Configuration(format!(
                "{} observations {stride} steps apart overflow the step count",
                seir.observed.len()
            )));
        }

        // Integrated in place; the trajectory between observations is never stored.
        let n: f64 = seir.initial_states.iter().sum();
        let index = seir.compartment.index();
        let mut states = seir.initial_states;
        let mut cost = 0.0;
        for (i, &observed) in seir.observed.iter().enumerate() {
            if i > 0 {
                for _ in 0..stride {
                    states = runge_kutta_4(seir_model, n, &states, &params, seir.step);
                }
            }
            let simulated = states[index];
            if !simulated.is_finite() {
                return Err(GaError::Numerical(format!(
                    "simulated {} compartment is {simulated} at observation {i} (params {:?})",
                    seir.compartment,
                    params.to_array()
                )));
            }
            cost += (simulated - observed) * (simulated - observed);
        }

        if !cost.is_finite() {
            return Err(GaError::Numerical(format!(
                "residual sum overflowed (params {:?})",
                params.to_array()
            )));
        }
        Ok(cost)
    }
}
