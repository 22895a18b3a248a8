//! Turbid mash schedule.
//!
//! Walks an ordered list of rests. Each infusion step adds a share of the total
//! mash-in water, hot enough to lift grain, water already in the vessel, and
//! the vessel itself from the current temperature to the step target. A
//! removal step draws off a share of whatever water is in the vessel at that
//! point and leaves the mash temperature alone.
//!
//! The two step kinds use different bases on purpose: infusion percentages are
//! of the final mash-in volume, removal percentages are of the running total.

use bc_core::constants::{MALT_SPECIFIC_HEAT, STAINLESS_SPECIFIC_HEAT, WATER_SPECIFIC_HEAT};
use bc_core::{
    Tolerances, ensure_finite, ensure_non_negative, ensure_positive, nearly_equal,
    percent_to_fraction,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CalcError, CalcResult};

/// One configured mash step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbidStep {
    pub target_temp_c: f64,
    pub hold_min: f64,
    /// Positive: percent of total mash-in water to add.
    /// Negative: percent of the water currently in the vessel to remove.
    pub percent_water: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Infusion,
    Removal,
    /// No water moves and the temperature is already at target.
    Rest,
}

/// Computed step. Never changed after the schedule is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TurbidMashStep {
    pub kind: StepKind,
    pub target_temp_c: f64,
    pub hold_min: f64,
    /// Water moved by this step; negative for removals.
    pub water_l: f64,
    /// Infusion water temperature. For removals and rests, the target temperature.
    pub water_temp_c: f64,
    /// Water in the vessel after this step.
    pub total_water_l: f64,
}

/// Run inputs for the scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbidInputs {
    pub grain_kg: f64,
    /// Total water put in over the whole schedule (L).
    pub mash_in_l: f64,
    pub ambient_temp_c: f64,
    /// Vessel mass heated along with the mash (kg).
    pub vessel_mass_kg: f64,
}

impl TurbidInputs {
    fn validate(&self) -> CalcResult<()> {
        ensure_non_negative(self.grain_kg, "grain_kg")?;
        ensure_positive(self.mash_in_l, "mash_in_l")?;
        ensure_finite(self.ambient_temp_c, "ambient_temp_c")?;
        ensure_non_negative(self.vessel_mass_kg, "vessel_mass_kg")?;
        Ok(())
    }
}

fn validate_step(index: usize, step: &TurbidStep) -> CalcResult<()> {
    ensure_finite(step.target_temp_c, "target_temp_c")?;
    ensure_non_negative(step.hold_min, "hold_min")?;
    ensure_finite(step.percent_water, "percent_water")?;
    if step.percent_water < -100.0 {
        return Err(CalcError::invalid(format!(
            "step #{index} removes {}% of the water in the vessel",
            -step.percent_water
        )));
    }
    Ok(())
}

/// Computes water volume and temperature for every step, in order.
pub fn schedule_turbid_mash(
    steps: &[TurbidStep],
    inputs: &TurbidInputs,
) -> CalcResult<Vec<TurbidMashStep>> {
    inputs.validate()?;

    let fixed_heat_capacity =
        inputs.grain_kg * MALT_SPECIFIC_HEAT + inputs.vessel_mass_kg * STAINLESS_SPECIFIC_HEAT;

    let mut current_temp_c = inputs.ambient_temp_c;
    let mut total_water_l = 0.0;
    let mut schedule = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        validate_step(index, step)?;

        let (kind, water_l, water_temp_c) = if step.percent_water < 0.0 {
            let water_l = percent_to_fraction(step.percent_water) * total_water_l;
            (StepKind::Removal, water_l, step.target_temp_c)
        } else if step.percent_water == 0.0 {
            if !nearly_equal(step.target_temp_c, current_temp_c, Tolerances::default()) {
                return Err(CalcError::DegenerateTurbidStep {
                    index,
                    what: format!(
                        "no water is added but the mash must move from {current_temp_c:.1} °C \
                         to {:.1} °C",
                        step.target_temp_c
                    ),
                });
            }
            (StepKind::Rest, 0.0, step.target_temp_c)
        } else {
            let water_l = percent_to_fraction(step.percent_water) * inputs.mash_in_l;
            let temp_diff_c = step.target_temp_c - current_temp_c;
            let energy_kj =
                temp_diff_c * (fixed_heat_capacity + total_water_l * WATER_SPECIFIC_HEAT);
            let water_temp_c = energy_kj / (water_l * WATER_SPECIFIC_HEAT) + step.target_temp_c;
            current_temp_c = step.target_temp_c;
            (StepKind::Infusion, water_l, water_temp_c)
        };

        total_water_l += water_l;
        debug!(
            index,
            ?kind,
            target_temp_c = step.target_temp_c,
            water_l,
            water_temp_c,
            total_water_l,
            "turbid step"
        );
        if kind == StepKind::Infusion && water_temp_c > 100.0 {
            warn!(
                index,
                water_temp_c,
                "infusion water must be hotter than boiling; add more water at this step"
            );
        }

        schedule.push(TurbidMashStep {
            kind,
            target_temp_c: step.target_temp_c,
            hold_min: step.hold_min,
            water_l,
            water_temp_c,
            total_water_l,
        });
    }

    Ok(schedule)
}
