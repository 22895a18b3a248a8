//! Recipe and turbid step validation.

use std::collections::HashSet;

use tracing::error;

use crate::schema::{Recipe, TurbidScheduleDef};

/// Allowed deviation of percentage sums from 100.
pub const PERCENT_TOLERANCE: f64 = 0.01;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{context} must sum to 100 %, but sums to {total:.2} %")]
    PercentSum { context: String, total: f64 },

    #[error("Missing field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },
}

fn check_sum(total: f64, context: &str) -> Result<(), ValidationError> {
    if (total - 100.0).abs() > PERCENT_TOLERANCE {
        let err = ValidationError::PercentSum {
            context: context.to_string(),
            total,
        };
        error!("{err}");
        return Err(err);
    }
    Ok(())
}

fn positive(value: f64, field: &str) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive".to_string(),
        })
    }
}

fn non_negative(value: f64, field: &str) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be zero or positive".to_string(),
        })
    }
}

/// Checks totals and required fields before any calculation runs.
///
/// Mash and fermentor fermentables together must sum to 100 %. Boil hops must
/// sum to 100 % unless the recipe has no bitterness target and no boil hops.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), ValidationError> {
    positive(recipe.batch_size_l, "batch_size_l")?;
    non_negative(recipe.boil_time_min, "boil_time_min")?;
    positive(recipe.target_og_plato, "target_og_plato")?;
    non_negative(recipe.target_ibu, "target_ibu")?;

    let mut names = HashSet::new();
    for f in recipe
        .mash_fermentables
        .iter()
        .chain(&recipe.fermentor_fermentables)
    {
        non_negative(f.percent, &format!("fermentable '{}' percent", f.name))?;
        if !names.insert(f.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: f.name.clone(),
                context: "fermentables".to_string(),
            });
        }
    }
    check_sum(
        recipe.mash_percent() + recipe.fermentor_percent(),
        "mash_fermentables + fermentor_fermentables",
    )?;

    for hop in &recipe.boil_hops {
        non_negative(hop.percent, &format!("boil hop '{}' percent", hop.name))?;
        match hop.boil_time_min {
            None => {
                let err = ValidationError::MissingField {
                    field: "boil_time_min".to_string(),
                    context: format!("boil hop '{}'", hop.name),
                };
                error!("{err}");
                return Err(err);
            }
            Some(t) => positive(t, &format!("boil hop '{}' boil_time_min", hop.name))?,
        }
    }
    if !(recipe.boil_hops.is_empty() && recipe.target_ibu == 0.0) {
        check_sum(recipe.boil_hop_percent(), "boil_hops")?;
    }

    for hop in &recipe.dry_hops {
        non_negative(hop.g_per_l, &format!("dry hop '{}' g_per_l", hop.name))?;
    }

    Ok(())
}

/// Infusion shares (non-negative percentages) must add up to the full mash-in
/// volume; removals are limited to the water present.
pub fn validate_turbid_steps(schedule: &TurbidScheduleDef) -> Result<(), ValidationError> {
    if schedule.steps.is_empty() {
        return Err(ValidationError::MissingField {
            field: "steps".to_string(),
            context: "turbid schedule".to_string(),
        });
    }

    for (i, step) in schedule.steps.iter().enumerate() {
        non_negative(step.time_min, &format!("step {i} time_min"))?;
        if !step.target_temp_c.is_finite() || !(0.0..=100.0).contains(&step.target_temp_c) {
            return Err(ValidationError::InvalidValue {
                field: format!("step {i} target_temp_c"),
                value: step.target_temp_c.to_string(),
                reason: "must be between 0 and 100 °C".to_string(),
            });
        }
        if !step.percent_water.is_finite() || step.percent_water < -100.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("step {i} percent_water"),
                value: step.percent_water.to_string(),
                reason: "cannot remove more than the water in the vessel".to_string(),
            });
        }
    }

    let infused: f64 = schedule
        .steps
        .iter()
        .map(|s| s.percent_water)
        .filter(|p| *p >= 0.0)
        .sum();
    check_sum(infused, "turbid infusion percentages")
}
