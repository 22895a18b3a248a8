//! Batch volume and wort density model.

use bc_core::{ensure_non_negative, ensure_positive, plato_to_sg};
use bc_profile::SystemProfile;
use serde::Serialize;

use crate::error::{CalcError, CalcResult};

/// Liquid volumes at each process phase (liters).
///
/// `pre_boil = post_boil + boil_off`; mash loss is compensated on top of that,
/// so the water needed at mash-in is [`Volumes::total_mash_in`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Volumes {
    /// Volume transferred to the fermentor.
    pub batch_size_l: f64,
    pub trub_loss_l: f64,
    /// Batch size plus trub loss.
    pub post_boil_l: f64,
    pub boil_off_l: f64,
    pub pre_boil_l: f64,
    /// Liquid retained by spent grain.
    pub mash_loss_l: f64,
}

impl Volumes {
    /// Initial estimate before the grain bill is known (no mash loss).
    pub fn estimate(
        batch_size_l: f64,
        boil_time_min: f64,
        profile: &SystemProfile,
    ) -> CalcResult<Self> {
        ensure_positive(batch_size_l, "batch_size_l")?;
        ensure_non_negative(boil_time_min, "boil_time_min")?;

        let trub_loss_l = profile.trub_loss_l;
        let post_boil_l = batch_size_l + trub_loss_l;
        let boil_off_l = profile.boil_off_l(boil_time_min);

        Ok(Self {
            batch_size_l,
            trub_loss_l,
            post_boil_l,
            boil_off_l,
            pre_boil_l: post_boil_l + boil_off_l,
            mash_loss_l: 0.0,
        })
    }

    /// Water to put in the vessel at mash-in.
    pub fn total_mash_in(&self) -> f64 {
        self.pre_boil_l + self.mash_loss_l
    }

    pub fn with_mash_loss(self, mash_loss_l: f64) -> Self {
        Self {
            mash_loss_l,
            ..self
        }
    }

    /// Post-boil over pre-boil volume; boiling concentrates wort by the inverse.
    pub fn dilution_ratio(&self) -> f64 {
        self.post_boil_l / self.pre_boil_l
    }
}

/// Wort density before and after the boil (°P).
///
/// [`Gravities::from_post_boil`] gives whole-recipe targets, counting every
/// fermentable as if it were dissolved in the kettle. Use
/// [`Gravities::kettle_share`] for what a hydrometer reads in the kettle when
/// part of the extract is only added in the fermentor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Gravities {
    pub pre_boil_plato: f64,
    pub post_boil_plato: f64,
}

impl Gravities {
    /// Works back from the target post-boil density.
    pub fn from_post_boil(post_boil_plato: f64, volumes: &Volumes) -> CalcResult<Self> {
        ensure_positive(post_boil_plato, "target_plato")?;
        ensure_positive(volumes.pre_boil_l, "pre_boil_l")?;
        Ok(Self {
            pre_boil_plato: post_boil_plato * volumes.dilution_ratio(),
            post_boil_plato,
        })
    }

    /// Densities carried by the kettle wort when only `mash_fraction` (0-1] of
    /// the total extract comes from the mash.
    pub fn kettle_share(&self, mash_fraction: f64) -> CalcResult<Self> {
        ensure_positive(mash_fraction, "mash_fraction")?;
        if mash_fraction > 1.0 {
            return Err(CalcError::invalid(format!(
                "mash_fraction must be at most 1, got {mash_fraction}"
            )));
        }
        Ok(Self {
            pre_boil_plato: self.pre_boil_plato * mash_fraction,
            post_boil_plato: self.post_boil_plato * mash_fraction,
        })
    }

    pub fn pre_boil_sg(&self) -> f64 {
        plato_to_sg(self.pre_boil_plato)
    }

    pub fn post_boil_sg(&self) -> f64 {
        plato_to_sg(self.post_boil_plato)
    }
}
