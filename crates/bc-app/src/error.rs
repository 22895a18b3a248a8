//! Error types for the bc-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates, shared by all front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        source: bc_recipe::RecipeError,
    },

    #[error("Failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        source: bc_recipe::RecipeError,
    },

    #[error("Recipe error: {0}")]
    Recipe(#[from] bc_recipe::RecipeError),

    #[error("Calculation failed: {0}")]
    Calc(#[from] bc_calc::CalcError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True when the recipe is well-formed but not brewable on the chosen system.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            AppError::Calc(bc_calc::CalcError::ConvergenceFailed { .. })
        )
    }
}
