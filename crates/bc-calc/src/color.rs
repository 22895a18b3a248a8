//! Beer color estimate (Morey).

use bc_core::ensure_positive;
use serde::Serialize;

use crate::error::CalcResult;
use crate::grain_bill::MaltAddition;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorEstimate {
    /// Malt color units: sum of kg x EBC per liter.
    pub mcu: f64,
    pub ebc: f64,
}

/// Color of the additions dissolved in `volume_l`.
pub fn estimate_color<'a, I>(additions: I, volume_l: f64) -> CalcResult<ColorEstimate>
where
    I: IntoIterator<Item = &'a MaltAddition>,
{
    ensure_positive(volume_l, "volume_l")?;
    let mcu = additions
        .into_iter()
        .map(|m| m.amount_kg * m.entry.color_ebc)
        .sum::<f64>()
        / volume_l;
    let ebc = if mcu <= 0.0 {
        0.0
    } else {
        2.9396 * mcu.powf(0.6859)
    };
    Ok(ColorEstimate { mcu, ebc })
}
