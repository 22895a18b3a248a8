//! Error types for brewing calculations.

use bc_core::BcError;
use bc_ingredients::LookupError;
use thiserror::Error;

/// Errors that abort a calculation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Lookup failure: {0}")]
    Lookup(#[from] LookupError),

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Convergence failed after {iterations} iterations: {what}")]
    ConvergenceFailed { iterations: usize, what: String },

    #[error("Degenerate turbid step #{index}: {what}")]
    DegenerateTurbidStep { index: usize, what: String },
}

pub type CalcResult<T> = Result<T, CalcError>;

impl CalcError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        CalcError::InvalidInput { what: what.into() }
    }
}

impl From<BcError> for CalcError {
    fn from(e: BcError) -> Self {
        CalcError::InvalidInput {
            what: e.to_string(),
        }
    }
}
