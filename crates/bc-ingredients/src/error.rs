//! Ingredient lookup errors.

use bc_core::BcError;
use thiserror::Error;

/// Result type for ingredient lookups.
pub type LookupResult<T> = Result<T, LookupError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Name is not present in the database.
    #[error("{kind} not found in database: {name}")]
    NotFound { kind: &'static str, name: String },

    /// Entry exists but an attribute is unusable (zero extract yield etc.).
    #[error("{kind} '{name}' has invalid {what}: {value}")]
    InvalidAttribute {
        kind: &'static str,
        name: String,
        what: &'static str,
        value: f64,
    },
}

impl From<LookupError> for BcError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { .. } => BcError::InvalidArg {
                what: "unknown ingredient",
            },
            LookupError::InvalidAttribute { what, value, .. } => {
                BcError::OutOfRange { what, value }
            }
        }
    }
}
