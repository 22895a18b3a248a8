//! Mash cycle and water planning for one system.
//!
//! All water goes in at the start. When the grain does not fit in one malt
//! pipe, the bill is split evenly over several mash cycles in the same wort.

use bc_core::ensure_positive;
use bc_profile::SystemProfile;
use serde::Serialize;

use crate::error::{CalcError, CalcResult};
use crate::volumes::Volumes;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MashPlan {
    pub grain_total_kg: f64,
    pub num_mashes: usize,
    /// Grain per mash cycle, in order.
    pub grain_per_mash_kg: Vec<f64>,
    pub mash_losses_l: f64,
    pub boil_loss_l: f64,
    pub trub_loss_l: f64,
    pub total_water_l: f64,
    /// Liquid level in the vessel at mash-in.
    pub mash_in_level_mm: f64,
}

pub fn plan_mash(
    profile: &SystemProfile,
    volumes: &Volumes,
    grain_total_kg: f64,
) -> CalcResult<MashPlan> {
    ensure_positive(grain_total_kg, "total grain")?;

    let num_mashes = profile.num_mashes(grain_total_kg);
    let per_mash = grain_total_kg / num_mashes as f64;
    let total_water_l = volumes.total_mash_in();

    if total_water_l < profile.min_mash_volume_l {
        return Err(CalcError::invalid(format!(
            "total water {total_water_l:.2} L is below the smallest practical volume \
             for {} ({:.2} L)",
            profile.name, profile.min_mash_volume_l
        )));
    }

    Ok(MashPlan {
        grain_total_kg,
        num_mashes,
        grain_per_mash_kg: vec![per_mash; num_mashes],
        mash_losses_l: volumes.mash_loss_l,
        boil_loss_l: volumes.boil_off_l,
        trub_loss_l: volumes.trub_loss_l,
        total_water_l,
        mash_in_level_mm: profile.level_mm(total_water_l),
    })
}
