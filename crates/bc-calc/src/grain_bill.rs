//! Grain bill solver.
//!
//! The mash has to make enough wort to cover both the target volume and the
//! liquid the spent grain keeps. That liquid depends on the grain mass, which
//! in turn depends on the volume, so the two are solved together by fixed-point
//! iteration: volume -> masses -> absorption -> volume, until the total mass
//! stops moving.

use bc_core::{ensure_finite, ensure_non_negative, ensure_positive, percent_to_fraction};
use bc_ingredients::MaltLookup;
use serde::Serialize;
use tracing::debug;

use crate::error::{CalcError, CalcResult};

/// A fermentable line resolved against the malt database.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaltEntry {
    pub name: String,
    /// Share of the total fermentable extract (0-100).
    pub percent: f64,
    pub extract_yield: f64,
    pub color_ebc: f64,
}

impl MaltEntry {
    pub fn resolve(name: &str, percent: f64, lookup: &dyn MaltLookup) -> CalcResult<Self> {
        let info = lookup.get_malt(name)?;
        Ok(Self {
            name: name.to_string(),
            percent,
            extract_yield: info.extract_yield,
            color_ebc: info.color_ebc,
        })
    }
}

/// Resolves `(name, percent)` pairs, failing on the first unknown name.
pub fn resolve_malts<'a, I>(shares: I, lookup: &dyn MaltLookup) -> CalcResult<Vec<MaltEntry>>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    shares
        .into_iter()
        .map(|(name, percent)| MaltEntry::resolve(name, percent, lookup))
        .collect()
}

/// A malt entry with its computed mass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaltAddition {
    #[serde(flatten)]
    pub entry: MaltEntry,
    pub amount_kg: f64,
}

impl MaltAddition {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Extract this addition yields at the given efficiency (kg).
    pub fn extract_kg(&self, efficiency: f64) -> f64 {
        self.amount_kg * self.entry.extract_yield * efficiency
    }
}

/// Grain bill solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct ConvergenceConfig {
    /// Stop once the total grain mass moves less than this between iterations (kg).
    pub mass_tolerance_kg: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            mass_tolerance_kg: 0.1,
            max_iterations: 50,
        }
    }
}

/// One solver iteration, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConvergenceStep {
    pub iteration: usize,
    pub volume_l: f64,
    pub total_kg: f64,
    pub delta_kg: f64,
}

/// Converged grain bill.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrainBill {
    pub malts: Vec<MaltAddition>,
    pub total_kg: f64,
    /// Absorption compensation included in `volume_l`: the liquid absorbed by
    /// the previous iteration's total. It trails `total_kg * absorption` by
    /// less than the mass tolerance times the absorption rate.
    pub mash_loss_l: f64,
    /// Volume the masses were computed for (base volume + mash loss).
    pub volume_l: f64,
    pub iterations: usize,
    pub history: Vec<ConvergenceStep>,
}

fn validate(
    target_plato: f64,
    volume_l: f64,
    entries: &[MaltEntry],
    efficiency: f64,
) -> CalcResult<()> {
    ensure_positive(target_plato, "target_plato")?;
    ensure_positive(volume_l, "volume_l")?;
    ensure_positive(efficiency, "mash_efficiency")?;
    if efficiency > 1.0 {
        return Err(CalcError::invalid(format!(
            "mash_efficiency must be at most 1, got {efficiency}"
        )));
    }
    for entry in entries {
        if !(entry.extract_yield > 0.0 && entry.extract_yield.is_finite()) {
            return Err(CalcError::invalid(format!(
                "malt '{}' has extract yield {}",
                entry.name, entry.extract_yield
            )));
        }
        ensure_non_negative(entry.percent, "fermentable percent")?;
    }
    Ok(())
}

/// One pass: masses needed to put `target_plato` of extract into `volume_l`.
fn pass(
    target_plato: f64,
    volume_l: f64,
    entries: &[MaltEntry],
    efficiency: f64,
) -> Vec<MaltAddition> {
    let total_extract = target_plato * volume_l / 100.0;
    entries
        .iter()
        .map(|entry| {
            let extract_i = total_extract * percent_to_fraction(entry.percent);
            MaltAddition {
                entry: entry.clone(),
                amount_kg: extract_i / (entry.extract_yield * efficiency),
            }
        })
        .collect()
}

/// Single non-iterative pass, for additions with no mash loss (fermentor sugars etc.).
pub fn compute_additions(
    target_plato: f64,
    volume_l: f64,
    entries: &[MaltEntry],
    efficiency: f64,
) -> CalcResult<Vec<MaltAddition>> {
    validate(target_plato, volume_l, entries, efficiency)?;
    Ok(pass(target_plato, volume_l, entries, efficiency))
}

/// Solves the mash grain bill for `target_plato` at `base_volume_l`, growing the
/// volume by `absorption_l_per_kg` of liquid per kg of grain.
pub fn compute_grain_bill(
    target_plato: f64,
    base_volume_l: f64,
    entries: &[MaltEntry],
    efficiency: f64,
    absorption_l_per_kg: f64,
    config: &ConvergenceConfig,
) -> CalcResult<GrainBill> {
    validate(target_plato, base_volume_l, entries, efficiency)?;
    ensure_non_negative(absorption_l_per_kg, "absorption_l_per_kg")?;
    if config.max_iterations == 0 {
        return Err(CalcError::invalid("max_iterations must be positive"));
    }

    if entries.is_empty() {
        return Ok(GrainBill {
            malts: Vec::new(),
            total_kg: 0.0,
            mash_loss_l: 0.0,
            volume_l: base_volume_l,
            iterations: 0,
            history: Vec::new(),
        });
    }

    let mut previous_kg: Option<f64> = None;
    let mut mash_loss_l = 0.0;
    let mut history = Vec::new();

    for iteration in 1..=config.max_iterations {
        let volume_l = base_volume_l + mash_loss_l;
        let malts = pass(target_plato, volume_l, entries, efficiency);
        let total_kg: f64 = malts.iter().map(|m| m.amount_kg).sum();
        if ensure_finite(total_kg, "total_grain_kg").is_err() {
            return Err(CalcError::ConvergenceFailed {
                iterations: iteration,
                what: format!("total grain mass became {total_kg}"),
            });
        }

        // The first pass has no absorption feedback yet, so it never converges.
        let delta_kg = previous_kg.map_or(total_kg, |prev| (total_kg - prev).abs());
        debug!(iteration, volume_l, total_kg, delta_kg, "grain bill iteration");
        history.push(ConvergenceStep {
            iteration,
            volume_l,
            total_kg,
            delta_kg,
        });

        if previous_kg.is_some() && delta_kg < config.mass_tolerance_kg {
            return Ok(GrainBill {
                malts,
                total_kg,
                mash_loss_l,
                volume_l,
                iterations: iteration,
                history,
            });
        }

        previous_kg = Some(total_kg);
        mash_loss_l = total_kg * absorption_l_per_kg;
    }

    Err(CalcError::ConvergenceFailed {
        iterations: config.max_iterations,
        what: format!(
            "grain mass still moving after {} iterations (last total {:.3} kg); \
             target density is not reachable for this volume and system",
            config.max_iterations,
            previous_kg.unwrap_or_default()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pale(percent: f64) -> MaltEntry {
        MaltEntry {
            name: "Pale".to_string(),
            percent,
            extract_yield: 0.80,
            color_ebc: 6.0,
        }
    }

    #[test]
    fn single_pass_matches_hand_calculation() {
        let additions = compute_additions(15.0, 25.0, &[pale(100.0)], 0.8).unwrap();
        assert_eq!(additions.len(), 1);
        let expected = (15.0 * 25.0 / 100.0) / (0.80 * 0.8);
        assert!((additions[0].amount_kg - expected).abs() < 1e-12);
        assert!((additions[0].amount_kg - 5.86).abs() < 0.01);
    }

    #[test]
    fn convergence_adds_mass_for_absorption() {
        let single = compute_additions(15.0, 25.0, &[pale(100.0)], 0.8).unwrap()[0].amount_kg;
        let bill = compute_grain_bill(
            15.0,
            25.0,
            &[pale(100.0)],
            0.8,
            0.8,
            &ConvergenceConfig::default(),
        )
        .unwrap();
        assert!(bill.total_kg > single);
        assert!(bill.mash_loss_l > 0.0);
        assert!((bill.volume_l - (25.0 + bill.mash_loss_l)).abs() < 1e-12);
        assert!(bill.iterations > 1);
        assert_eq!(bill.history.len(), bill.iterations);
    }

    #[test]
    fn no_absorption_converges_on_second_iteration() {
        let bill = compute_grain_bill(
            12.0,
            20.0,
            &[pale(100.0)],
            0.8,
            0.0,
            &ConvergenceConfig::default(),
        )
        .unwrap();
        assert_eq!(bill.iterations, 2);
        assert_eq!(bill.mash_loss_l, 0.0);
    }

    #[test]
    fn tiny_bill_still_gets_absorption_compensation() {
        // A first pass under the mass tolerance must not stop the solver.
        let bill = compute_grain_bill(
            5.0,
            1.0,
            &[pale(100.0)],
            0.8,
            0.8,
            &ConvergenceConfig::default(),
        )
        .unwrap();
        assert!(bill.iterations >= 2);
        assert!(bill.mash_loss_l > 0.0);
        assert!(bill.volume_l > 1.0);
        let first = compute_additions(5.0, 1.0, &[pale(100.0)], 0.8).unwrap()[0].amount_kg;
        assert!((bill.mash_loss_l - first * 0.8).abs() < 1e-12);
    }

    #[test]
    fn mash_loss_is_absorption_of_previous_total() {
        let config = ConvergenceConfig::default();
        let bill = compute_grain_bill(15.0, 25.0, &[pale(100.0)], 0.8, 0.8, &config).unwrap();
        let previous = bill.history[bill.history.len() - 2].total_kg;
        assert!((bill.mash_loss_l - previous * 0.8).abs() < 1e-12);
        let lag = (bill.total_kg * 0.8 - bill.mash_loss_l).abs();
        assert!(lag < config.mass_tolerance_kg * 0.8, "lag = {lag}");
    }

    #[test]
    fn empty_bill_is_zero() {
        let bill =
            compute_grain_bill(12.0, 20.0, &[], 0.8, 0.8, &ConvergenceConfig::default()).unwrap();
        assert!(bill.malts.is_empty());
        assert_eq!(bill.total_kg, 0.0);
        assert_eq!(bill.iterations, 0);
    }

    #[test]
    fn zero_extract_yield_is_invalid() {
        let mut malt = pale(100.0);
        malt.extract_yield = 0.0;
        let err = compute_additions(12.0, 20.0, &[malt], 0.8).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn non_positive_volume_is_invalid() {
        let err = compute_grain_bill(
            12.0,
            0.0,
            &[pale(100.0)],
            0.8,
            0.8,
            &ConvergenceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn runaway_absorption_fails_to_converge() {
        // Each kg of grain soaks up more wort than its extract can replace.
        let err = compute_grain_bill(
            60.0,
            20.0,
            &[pale(100.0)],
            0.2,
            10.0,
            &ConvergenceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CalcError::ConvergenceFailed { iterations: 50, .. }
        ));
    }

    #[test]
    fn iteration_cap_is_reported() {
        let config = ConvergenceConfig {
            mass_tolerance_kg: 1e-15,
            max_iterations: 3,
        };
        let err = compute_grain_bill(15.0, 25.0, &[pale(100.0)], 0.8, 0.8, &config).unwrap_err();
        assert!(matches!(
            err,
            CalcError::ConvergenceFailed { iterations: 3, .. }
        ));
    }
}
