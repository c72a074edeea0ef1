//! SEIR-D compartment model.
//!
//! States are `[S, E, I, R, D]`: susceptible, exposed, infected,
//! recovered, dead. Both exposed and infected individuals transmit.
//!
//! ```text
//! dS/dt = -(β I + ε E) S / N
//! dE/dt =  (β I + ε E) S / N - σ E
//! dI/dt =  σ E - ρ I - μ I
//! dR/dt =  ρ I
//! dD/dt =  μ I
//! ```
//!
//! The derivatives sum to zero, so the total population `N` is conserved.

use crate::error::GaError;
use std::fmt;

/// Number of compartments.
pub const NUM_COMPARTMENTS: usize = 5;

/// Compartment populations `[S, E, I, R, D]`.
pub type States = [f64; NUM_COMPARTMENTS];

/// One compartment of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
    Dead,
}

impl Compartment {
    /// Position of this compartment in [`States`].
    pub fn index(self) -> usize {
        match self {
            Compartment::Susceptible => 0,
            Compartment::Exposed => 1,
            Compartment::Infected => 2,
            Compartment::Recovered => 3,
            Compartment::Dead => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compartment::Susceptible => "susceptible",
            Compartment::Exposed => "exposed",
            Compartment::Infected => "infected",
            Compartment::Recovered => "recovered",
            Compartment::Dead => "dead",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition rates of the model, per unit of integration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeirParams {
    /// Transmission rate from infected contacts.
    pub beta: f64,
    /// Transmission rate from exposed contacts.
    pub epsilon: f64,
    /// Incubation rate (exposed → infected).
    pub sigma: f64,
    /// Recovery rate.
    pub rho: f64,
    /// Mortality rate.
    pub mu: f64,
}

impl SeirParams {
    /// Number of parameters, and so the chromosome length when fitting.
    pub const LEN: usize = 5;

    pub fn new(beta: f64, epsilon: f64, sigma: f64, rho: f64, mu: f64) -> Self {
        Self {
            beta,
            epsilon,
            sigma,
            rho,
            mu,
        }
    }

    /// Reads `[β, ε, σ, ρ, μ]` from a parameter vector.
    ///
    /// # Errors
    /// [`GaError::DimensionMismatch`] unless `values` has exactly
    /// [`LEN`](Self::LEN) entries.
    pub fn from_slice(values: &[f64]) -> Result<Self, GaError> {
        match *values {
            [beta, epsilon, sigma, rho, mu] => Ok(Self::new(beta, epsilon, sigma, rho, mu)),
            _ => Err(GaError::DimensionMismatch {
                expected: Self::LEN,
                actual: values.len(),
            }),
        }
    }

    /// `[β, ε, σ, ρ, μ]`.
    pub fn to_array(self) -> [f64; Self::LEN] {
        [self.beta, self.epsilon, self.sigma, self.rho, self.mu]
    }
}

/// Time derivative of the SEIR-D states for a total population `n`.
pub fn seir_model(n: f64, states: &States, params: &SeirParams) -> States {
    let [s, e, i, _r, _d] = *states;
    let infection = (params.beta * i + params.epsilon * e) * s / n;

    [
        -infection,
        infection - params.sigma * e,
        params.sigma * e - params.rho * i - params.mu * i,
        params.rho * i,
        params.mu * i,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compartment_indices() {
        let all = [
            Compartment::Susceptible,
            Compartment::Exposed,
            Compartment::Infected,
            Compartment::Recovered,
            Compartment::Dead,
        ];
        for (expected, c) in all.iter().enumerate() {
            assert_eq!(c.index(), expected);
        }
        assert_eq!(Compartment::Infected.to_string(), "infected");
    }

    #[test]
    fn test_params_from_slice() {
        let p = SeirParams::from_slice(&[0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(p, SeirParams::new(0.1, 0.2, 0.3, 0.4, 0.5));
        assert_eq!(p.to_array(), [0.1, 0.2, 0.3, 0.4, 0.5]);

        assert_eq!(
            SeirParams::from_slice(&[0.1, 0.2]).unwrap_err(),
            GaError::DimensionMismatch {
                expected: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn test_derivatives() {
        let states = [900.0, 50.0, 40.0, 10.0, 0.0];
        let params = SeirParams::new(0.5, 0.1, 0.2, 0.1, 0.05);
        let d = seir_model(1000.0, &states, &params);

        let infection = (0.5 * 40.0 + 0.1 * 50.0) * 900.0 / 1000.0;
        assert!((d[0] + infection).abs() < 1e-12);
        assert!((d[1] - (infection - 0.2 * 50.0)).abs() < 1e-12);
        assert!((d[2] - (0.2 * 50.0 - 0.1 * 40.0 - 0.05 * 40.0)).abs() < 1e-12);
        assert!((d[3] - 4.0).abs() < 1e-12);
        assert!((d[4] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_derivatives_conserve_population() {
        let states = [700.0, 120.0, 90.0, 80.0, 10.0];
        let params = SeirParams::new(0.3, 0.05, 0.25, 0.07, 0.02);
        let d = seir_model(1000.0, &states, &params);
        assert!(d.iter().sum::<f64>().abs() < 1e-12);
    }

    #[test]
    fn test_disease_free_equilibrium() {
        let states = [1000.0, 0.0, 0.0, 0.0, 0.0];
        let params = SeirParams::new(0.5, 0.1, 0.2, 0.1, 0.05);
        assert_eq!(seir_model(1000.0, &states, &params), [0.0; 5]);
    }
}
