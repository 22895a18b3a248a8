//! Integration test: grain bill solver against the malt database.

use bc_calc::{
    CalcError, ConvergenceConfig, MaltEntry, compute_additions, compute_grain_bill, resolve_malts,
};
use bc_core::{Tolerances, nearly_equal};
use bc_ingredients::{BuiltinCatalog, InMemoryCatalog, LookupError};
use proptest::prelude::*;

fn entries(percents: &[f64], yields: &[f64]) -> Vec<MaltEntry> {
    percents
        .iter()
        .zip(yields)
        .enumerate()
        .map(|(i, (&percent, &extract_yield))| MaltEntry {
            name: format!("malt-{i}"),
            percent,
            extract_yield,
            color_ebc: 5.0,
        })
        .collect()
}

#[test]
fn fifteen_plato_twenty_five_liters() {
    let catalog = InMemoryCatalog::new().with_malt("Pale", 0.80, 6.0);
    let malts = resolve_malts([("Pale", 100.0)], &catalog).unwrap();

    let single = compute_additions(15.0, 25.0, &malts, 0.8).unwrap();
    assert!((single[0].amount_kg - 5.859375).abs() < 1e-9);

    let bill =
        compute_grain_bill(15.0, 25.0, &malts, 0.8, 0.8, &ConvergenceConfig::default()).unwrap();
    // Absorption pulls in roughly another kilogram.
    assert!(bill.total_kg > 6.5 && bill.total_kg < 7.5, "{}", bill.total_kg);
}

#[test]
fn builtin_recipe_resolves_and_converges() {
    let malts = resolve_malts(
        [
            ("Pale Ale Malt", 80.0),
            ("Munich Malt", 15.0),
            ("Caramunich 3", 5.0),
        ],
        &BuiltinCatalog,
    )
    .unwrap();
    let bill =
        compute_grain_bill(13.0, 24.2, &malts, 0.8, 0.8, &ConvergenceConfig::default()).unwrap();

    assert_eq!(bill.malts.len(), 3);
    assert_eq!(bill.malts[0].name(), "Pale Ale Malt");
    assert!(bill.malts[0].amount_kg > bill.malts[1].amount_kg);
    let sum: f64 = bill.malts.iter().map(|m| m.amount_kg).sum();
    assert!((sum - bill.total_kg).abs() < 1e-12);
}

#[test]
fn unknown_malt_aborts_resolution() {
    let err = resolve_malts([("Pale Ale Malt", 50.0), ("Ghost Malt", 50.0)], &BuiltinCatalog)
        .unwrap_err();
    assert!(matches!(
        err,
        CalcError::Lookup(LookupError::NotFound { ref name, .. }) if name == "Ghost Malt"
    ));
}

#[test]
fn zero_yield_fails_at_lookup() {
    let catalog = InMemoryCatalog::new().with_malt("Rice Hulls", 0.0, 0.0);
    let err = resolve_malts([("Rice Hulls", 100.0)], &catalog).unwrap_err();
    assert!(matches!(
        err,
        CalcError::Lookup(LookupError::InvalidAttribute { .. })
    ));
}

#[test]
fn repeated_runs_are_independent() {
    let malts = entries(&[70.0, 30.0], &[0.8, 0.75]);
    let config = ConvergenceConfig::default();
    let first = compute_grain_bill(14.0, 22.0, &malts, 0.75, 0.8, &config).unwrap();
    let _other = compute_grain_bill(20.0, 40.0, &malts, 0.75, 0.8, &config).unwrap();
    let again = compute_grain_bill(14.0, 22.0, &malts, 0.75, 0.8, &config).unwrap();
    assert_eq!(first, again);
}

proptest! {
    #[test]
    fn extract_is_reconstructed(
        weights in prop::collection::vec(0.1_f64..1.0, 1..5),
        yields in prop::collection::vec(0.6_f64..0.85, 5),
        plato in 5.0_f64..20.0,
        volume in 5.0_f64..60.0,
        efficiency in 0.6_f64..1.0,
        absorption in 0.0_f64..1.0,
    ) {
        let sum: f64 = weights.iter().sum();
        let percents: Vec<f64> = weights.iter().map(|w| w / sum * 100.0).collect();
        let malts = entries(&percents, &yields[..percents.len()]);

        let bill = compute_grain_bill(
            plato, volume, &malts, efficiency, absorption, &ConvergenceConfig::default(),
        ).unwrap();

        let extract: f64 = bill.malts.iter().map(|m| m.extract_kg(efficiency)).sum();
        let target = plato * bill.volume_l / 100.0;
        let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
        prop_assert!(nearly_equal(extract, target, tol), "{extract} vs {target}");
        prop_assert!(bill.iterations <= ConvergenceConfig::default().max_iterations);
    }

    #[test]
    fn successive_differences_do_not_grow(
        plato in 5.0_f64..20.0,
        volume in 5.0_f64..60.0,
        absorption in 0.0_f64..1.0,
    ) {
        let malts = entries(&[100.0], &[0.78]);
        let bill = compute_grain_bill(
            plato, volume, &malts, 0.8, absorption, &ConvergenceConfig::default(),
        ).unwrap();
        for pair in bill.history.windows(2) {
            prop_assert!(pair[1].delta_kg <= pair[0].delta_kg + 1e-12);
        }
    }
}
