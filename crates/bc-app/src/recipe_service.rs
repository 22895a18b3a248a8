//! Recipe and schedule loading plus introspection.

use std::path::Path;

use bc_recipe::{Recipe, TurbidScheduleDef};

use crate::error::{AppError, AppResult};

/// Short description of a recipe for listing.
#[derive(Debug, Clone)]
pub struct RecipeSummary {
    pub name: String,
    pub version: Option<String>,
    pub batch_size_l: f64,
    pub target_og_plato: f64,
    pub target_ibu: f64,
    pub fermentable_count: usize,
    pub boil_hop_count: usize,
    pub dry_hop_count: usize,
}

pub fn load_recipe(path: &Path) -> AppResult<Recipe> {
    bc_recipe::load_recipe(path).map_err(|source| AppError::Load {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_turbid_steps(path: &Path) -> AppResult<TurbidScheduleDef> {
    bc_recipe::load_turbid_steps(path).map_err(|source| AppError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a validated recipe; the format follows the file extension.
pub fn save_recipe(path: &Path, recipe: &Recipe) -> AppResult<()> {
    bc_recipe::save_recipe(path, recipe).map_err(|source| AppError::Save {
        path: path.to_path_buf(),
        source,
    })
}

pub fn summarize(recipe: &Recipe) -> RecipeSummary {
    RecipeSummary {
        name: recipe.name.clone(),
        version: recipe.version.clone(),
        batch_size_l: recipe.batch_size_l,
        target_og_plato: recipe.target_og_plato,
        target_ibu: recipe.target_ibu,
        fermentable_count: recipe.mash_fermentables.len() + recipe.fermentor_fermentables.len(),
        boil_hop_count: recipe.boil_hops.len(),
        dry_hop_count: recipe.dry_hops.len(),
    }
}
