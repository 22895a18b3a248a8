//! bc-recipe: recipe and turbid step file formats, loading and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{PERCENT_TOLERANCE, ValidationError, validate_recipe, validate_turbid_steps};

use std::path::Path;

use tracing::debug;

pub type RecipeResult<T> = Result<T, RecipeError>;

#[derive(thiserror::Error, Debug)]
pub enum RecipeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> RecipeResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(RecipeError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path) -> RecipeResult<T> {
    let content = std::fs::read_to_string(path)?;
    let value = match format_of(path)? {
        Format::Yaml => serde_yaml::from_str(&content)?,
        Format::Json => serde_json::from_str(&content)?,
    };
    Ok(value)
}

/// Loads and validates a recipe; format is picked from the file extension.
pub fn load_recipe(path: &Path) -> RecipeResult<Recipe> {
    debug!(path = %path.display(), "loading recipe");
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    match format {
        Format::Yaml => recipe_from_yaml_str(&content),
        Format::Json => recipe_from_json_str(&content),
    }
}

pub fn save_recipe(path: &Path, recipe: &Recipe) -> RecipeResult<()> {
    validate_recipe(recipe)?;
    let content = match format_of(path)? {
        Format::Yaml => serde_yaml::to_string(recipe)?,
        Format::Json => serde_json::to_string_pretty(recipe)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads and validates a turbid step file.
pub fn load_turbid_steps(path: &Path) -> RecipeResult<TurbidScheduleDef> {
    debug!(path = %path.display(), "loading turbid steps");
    let schedule: TurbidScheduleDef = parse(path)?;
    validate_turbid_steps(&schedule)?;
    Ok(schedule)
}

pub fn recipe_from_yaml_str(content: &str) -> RecipeResult<Recipe> {
    let recipe: Recipe = serde_yaml::from_str(content)?;
    validate_recipe(&recipe)?;
    Ok(recipe)
}

pub fn recipe_from_json_str(content: &str) -> RecipeResult<Recipe> {
    let recipe: Recipe = serde_json::from_str(content)?;
    validate_recipe(&recipe)?;
    Ok(recipe)
}
