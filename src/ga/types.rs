//! Fitness function contract.
//!
//! The engine knows nothing about the model being fitted. It hands each
//! chromosome to a [`FitnessFunction`] inside a [`FitnessArgs`] record:
//! the chromosome goes into `params`, and every other configured argument
//! travels unchanged in `extra`.

use crate::error::GaError;

/// Arguments passed to a fitness evaluation.
///
/// `params` is overwritten with the chromosome being scored before every
/// call, so callers must not rely on it keeping its previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitnessArgs<A> {
    /// The parameter vector under evaluation.
    pub params: Vec<f64>,
    /// The remaining, run-constant arguments.
    pub extra: A,
}

impl<A> FitnessArgs<A> {
    /// Wraps run-constant arguments with an empty parameter slot.
    pub fn new(extra: A) -> Self {
        Self {
            params: Vec::new(),
            extra,
        }
    }
}

/// Scalar objective evaluated for every individual.
///
/// Implementations must be deterministic: the same `args` must always
/// yield the same cost. Whether lower or higher cost is better is decided
/// by the run's [`Optimisation`](super::Optimisation), not here.
///
/// Any error is propagated unchanged and aborts the run.
///
/// # Implementing
///
/// Plain closures over the parameter vector implement the trait with
/// `Args = ()`:
///
/// ```
/// use u_epifit::ga::{FitnessArgs, FitnessFunction};
///
/// let sphere = |params: &[f64]| params.iter().map(|x| x * x).sum::<f64>();
/// let mut args = FitnessArgs::new(());
/// args.params = vec![3.0, 4.0];
/// assert_eq!(sphere.evaluate(&args).unwrap(), 25.0);
/// ```
///
/// Objectives that need extra inputs implement it on their own type:
///
/// ```ignore
/// struct Residuals;
///
/// impl FitnessFunction for Residuals {
///     type Args = Vec<f64>;
///     fn evaluate(&self, args: &FitnessArgs<Vec<f64>>) -> Result<f64, GaError> {
///         Ok(args.params.iter().zip(&args.extra).map(|(p, o)| (p - o).powi(2)).sum())
///     }
/// }
/// ```
pub trait FitnessFunction: Send + Sync {
    /// Run-constant arguments forwarded with every evaluation.
    type Args: Clone + Send + Sync;

    /// Computes the cost of `args.params`.
    fn evaluate(&self, args: &FitnessArgs<Self::Args>) -> Result<f64, GaError>;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    type Args = ();

    fn evaluate(&self, args: &FitnessArgs<()>) -> Result<f64, GaError> {
        Ok(self(&args.params))
    }
}
