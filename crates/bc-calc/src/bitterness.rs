//! Hop additions for a target bitterness (Tinseth).

use bc_core::{ensure_non_negative, ensure_positive, percent_to_fraction, plato_to_sg};
use bc_ingredients::HopLookup;
use serde::Serialize;
use tracing::debug;

use crate::error::{CalcError, CalcResult};

/// A boil hop line from the recipe.
#[derive(Clone, Debug, PartialEq)]
pub struct HopShare {
    pub name: String,
    /// Share of the target IBU this addition provides (0-100).
    pub percent: f64,
    pub boil_time_min: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HopAddition {
    pub name: String,
    pub alpha_acid: f64,
    pub boil_time_min: f64,
    pub percent: f64,
    pub ibu: f64,
    pub utilization: f64,
    pub grams: f64,
}

/// A dry hop line, dosed per liter of batch.
#[derive(Clone, Debug, PartialEq)]
pub struct DryHopShare {
    pub name: String,
    pub g_per_l: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DryHopAddition {
    pub name: String,
    pub g_per_l: f64,
    pub grams: f64,
}

/// Tinseth utilization for a wort density (°P) and boil time.
pub fn tinseth_utilization(plato: f64, boil_time_min: f64) -> f64 {
    let og = plato_to_sg(plato);
    let f_og = 1.65 * 0.000125_f64.powf(og - 1.0);
    let f_t = (1.0 - (-0.04 * boil_time_min).exp()) / 4.15;
    f_og * f_t
}

/// Grams of hop needed for `ibu` in `volume_l` of wort.
pub fn hop_weight_grams(
    ibu: f64,
    volume_l: f64,
    plato: f64,
    boil_time_min: f64,
    alpha_acid: f64,
) -> CalcResult<f64> {
    ensure_non_negative(ibu, "ibu")?;
    ensure_positive(volume_l, "volume_l")?;
    ensure_positive(boil_time_min, "boil_time_min")?;
    ensure_positive(alpha_acid, "alpha_acid")?;

    let utilization = tinseth_utilization(plato, boil_time_min);
    Ok(ibu * volume_l / (1000.0 * alpha_acid * utilization))
}

/// Splits `target_ibu` over the boil hops and computes each addition's mass.
pub fn compute_hop_additions(
    plato: f64,
    volume_l: f64,
    target_ibu: f64,
    hops: &[HopShare],
    lookup: &dyn HopLookup,
) -> CalcResult<Vec<HopAddition>> {
    ensure_positive(plato, "plato")?;
    ensure_non_negative(target_ibu, "target_ibu")?;

    hops.iter()
        .map(|hop| {
            let info = lookup.get_hop(&hop.name)?;
            if hop.boil_time_min <= 0.0 {
                return Err(CalcError::invalid(format!(
                    "boil hop '{}' needs a positive boil time, got {}",
                    hop.name, hop.boil_time_min
                )));
            }
            let ibu = percent_to_fraction(hop.percent) * target_ibu;
            let grams =
                hop_weight_grams(ibu, volume_l, plato, hop.boil_time_min, info.alpha_acid)?;
            let utilization = tinseth_utilization(plato, hop.boil_time_min);
            debug!(
                name = %hop.name,
                percent = hop.percent,
                boil_time_min = hop.boil_time_min,
                alpha_acid = info.alpha_acid,
                utilization,
                grams,
                "hop addition"
            );
            Ok(HopAddition {
                name: hop.name.clone(),
                alpha_acid: info.alpha_acid,
                boil_time_min: hop.boil_time_min,
                percent: hop.percent,
                ibu,
                utilization,
                grams,
            })
        })
        .collect()
}

/// Dry hop masses for the batch. Names are checked against the hop database.
pub fn compute_dry_hops(
    batch_size_l: f64,
    dry_hops: &[DryHopShare],
    lookup: &dyn HopLookup,
) -> CalcResult<Vec<DryHopAddition>> {
    ensure_positive(batch_size_l, "batch_size_l")?;
    dry_hops
        .iter()
        .map(|hop| {
            lookup.get_hop(&hop.name)?;
            ensure_non_negative(hop.g_per_l, "dry hop g_per_l")?;
            Ok(DryHopAddition {
                name: hop.name.clone(),
                g_per_l: hop.g_per_l,
                grams: hop.g_per_l * batch_size_l,
            })
        })
        .collect()
}
