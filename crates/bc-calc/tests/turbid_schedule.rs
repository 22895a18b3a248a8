//! Integration test: turbid mash schedules.

use bc_calc::{StepKind, TurbidInputs, TurbidStep, schedule_turbid_mash};
use bc_profile::SystemProfile;
use proptest::prelude::*;

const WATER: f64 = 4.18;
const MALT: f64 = 1.7;
const STEEL: f64 = 0.5;

fn step(target_temp_c: f64, percent_water: f64) -> TurbidStep {
    TurbidStep {
        target_temp_c,
        hold_min: 20.0,
        percent_water,
    }
}

#[test]
fn two_step_schedule_from_cold_water() {
    let vessel = SystemProfile::braumeister20().system_mass_kg;
    let inputs = TurbidInputs {
        grain_kg: 5.0,
        mash_in_l: 20.0,
        ambient_temp_c: 8.0,
        vessel_mass_kg: vessel,
    };
    let out = schedule_turbid_mash(&[step(50.0, 60.0), step(65.0, 40.0)], &inputs).unwrap();

    assert_eq!(out.len(), 2);
    assert!((out[0].water_l - 12.0).abs() < 1e-12);
    let e1 = (50.0 - 8.0) * (5.0 * MALT + 0.0 * WATER + vessel * STEEL);
    assert!((out[0].water_temp_c - (e1 / (12.0 * WATER) + 50.0)).abs() < 1e-9);

    assert!((out[1].water_l - 8.0).abs() < 1e-12);
    let e2 = (65.0 - 50.0) * (5.0 * MALT + 12.0 * WATER + vessel * STEEL);
    assert!((out[1].water_temp_c - (e2 / (8.0 * WATER) + 65.0)).abs() < 1e-9);

    assert!((out[1].total_water_l - 20.0).abs() < 1e-12);
    assert!(out.iter().all(|s| s.kind == StepKind::Infusion));
    assert_eq!(out[1].hold_min, 20.0);
}

#[test]
fn classic_turbid_sequence() {
    let inputs = TurbidInputs {
        grain_kg: 5.5,
        mash_in_l: 30.0,
        ambient_temp_c: 15.0,
        vessel_mass_kg: 15.0,
    };
    let steps = [
        step(30.0, 25.0),
        step(30.0, -40.0),
        step(52.0, 25.0),
        step(65.0, 25.0),
        step(72.0, 25.0),
    ];
    let out = schedule_turbid_mash(&steps, &inputs).unwrap();

    let kinds: Vec<_> = out.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::Infusion,
            StepKind::Removal,
            StepKind::Infusion,
            StepKind::Infusion,
            StepKind::Infusion
        ]
    );
    assert!((out[1].water_l + 3.0).abs() < 1e-12);
    assert!((out[4].total_water_l - (30.0 - 3.0)).abs() < 1e-9);
}

proptest! {
    #[test]
    fn infusions_only_end_at_mash_in_volume(
        weights in prop::collection::vec(0.1_f64..1.0, 1..6),
        start in 5.0_f64..25.0,
        mash_in in 10.0_f64..40.0,
        grain in 1.0_f64..10.0,
    ) {
        let sum: f64 = weights.iter().sum();
        let steps: Vec<TurbidStep> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| step(start + 10.0 * (i as f64 + 1.0), w / sum * 100.0))
            .collect();
        let inputs = TurbidInputs {
            grain_kg: grain,
            mash_in_l: mash_in,
            ambient_temp_c: start,
            vessel_mass_kg: 15.0,
        };
        let out = schedule_turbid_mash(&steps, &inputs).unwrap();
        let last = out.last().unwrap();
        prop_assert!((last.total_water_l - mash_in).abs() < 1e-9 * mash_in);
    }

    #[test]
    fn removals_never_overdraw(
        percents in prop::collection::vec(-100.0_f64..100.0, 1..10),
        mash_in in 10.0_f64..40.0,
    ) {
        let steps: Vec<TurbidStep> = percents
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                // Nudge exact zeros so every step moves water.
                let p = if p == 0.0 { 1.0 } else { p };
                step(40.0 + i as f64, p)
            })
            .collect();
        let inputs = TurbidInputs {
            grain_kg: 4.0,
            mash_in_l: mash_in,
            ambient_temp_c: 20.0,
            vessel_mass_kg: 15.0,
        };
        let out = schedule_turbid_mash(&steps, &inputs).unwrap();

        let mut before = 0.0_f64;
        for s in &out {
            if s.kind == StepKind::Removal {
                prop_assert!(s.water_l.abs() <= before + 1e-12);
            }
            prop_assert!(s.total_water_l >= -1e-12);
            before = s.total_water_l;
        }
    }
}
