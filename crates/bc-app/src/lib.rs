//! Shared application service layer for brewcalc.
//!
//! Loads recipe and schedule files, resolves ingredients and runs one complete
//! calculation into a [`BrewPlan`] for a front end to present.

pub mod error;
pub mod plan_service;
pub mod recipe_service;

pub use error::{AppError, AppResult};
pub use plan_service::{BrewPlan, FERMENTOR_EFFICIENCY, PlanRequest, compute_plan, plan_to_json};
pub use recipe_service::{RecipeSummary, load_recipe, load_turbid_steps, save_recipe, summarize};
