//! Error type shared by the GA engine and the epidemic collaborators.
//!
//! Every failure is fatal to the current optimisation run: nothing in the
//! crate retries or suppresses an error.

use thiserror::Error;

/// Errors raised while configuring or running an optimisation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaError {
    /// A configuration value is missing, malformed, or out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A declared operator without an implementation was selected.
    #[error("unsupported {kind} operator `{tag}`")]
    UnsupportedOperator {
        kind: &'static str,
        tag: &'static str,
    },

    /// Chromosome lengths disagree with each other or with the model.
    #[error("dimension mismatch: expected {expected} genes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A fitness evaluation produced an unusable value.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// A population operation ran before `initialise_population`.
    #[error("population has not been initialised")]
    NotInitialised,
}

impl GaError {
    /// Whether this error stems from the run's configuration.
    ///
    /// Unsupported operators count as configuration errors: the tag was
    /// accepted but cannot be executed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GaError::Configuration(_) | GaError::UnsupportedOperator { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GaError::UnsupportedOperator {
            kind: "crossover",
            tag: "multiple_points",
        };
        assert_eq!(
            err.to_string(),
            "unsupported crossover operator `multiple_points`"
        );

        let err = GaError::DimensionMismatch {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: expected 5 genes, got 3"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(GaError::Configuration("x".into()).is_configuration());
        assert!(GaError::UnsupportedOperator {
            kind: "mutation",
            tag: "uniform"
        }
        .is_configuration());
        assert!(!GaError::Numerical("nan".into()).is_configuration());
        assert!(!GaError::NotInitialised.is_configuration());
    }
}
