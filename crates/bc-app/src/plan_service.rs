//! One complete calculation run: recipe + system profile -> brew plan.

use bc_calc::{
    ColorEstimate, ConvergenceConfig, DryHopAddition, DryHopShare, GrainBill, Gravities,
    HopAddition, HopShare, MaltAddition, MashPlan, TurbidInputs, TurbidMashStep, TurbidStep,
    Volumes, compute_additions, compute_dry_hops, compute_grain_bill, compute_hop_additions,
    estimate_color, plan_mash, resolve_malts, schedule_turbid_mash,
};
use bc_ingredients::{HopLookup, MaltLookup};
use bc_profile::SystemProfile;
use bc_recipe::{Recipe, TurbidScheduleDef};
use serde::Serialize;
use tracing::info;

use crate::error::AppResult;

/// Extract efficiency for fermentables added to the fermentor: nothing is
/// left behind in a mash, so all of their extract is realized.
pub const FERMENTOR_EFFICIENCY: f64 = 1.0;

/// Everything a calculation run needs besides the ingredient lookups.
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub recipe: &'a Recipe,
    pub profile: SystemProfile,
    pub turbid: Option<&'a TurbidScheduleDef>,
    pub ambient_temp_c: f64,
    pub convergence: ConvergenceConfig,
}

impl<'a> PlanRequest<'a> {
    pub fn new(recipe: &'a Recipe, profile: SystemProfile) -> Self {
        Self {
            recipe,
            profile,
            turbid: None,
            ambient_temp_c: 15.0,
            convergence: ConvergenceConfig::default(),
        }
    }

    pub fn with_turbid(mut self, schedule: &'a TurbidScheduleDef, ambient_temp_c: f64) -> Self {
        self.turbid = Some(schedule);
        self.ambient_temp_c = ambient_temp_c;
        self
    }
}

/// Result of one run, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct BrewPlan {
    pub recipe_name: String,
    pub profile_name: &'static str,
    pub volumes: Volumes,
    /// Whole-recipe density targets.
    pub gravities: Gravities,
    /// Densities of the kettle wort, without fermentor additions.
    pub kettle_gravities: Gravities,
    pub grain_bill: GrainBill,
    pub fermentor_additions: Vec<MaltAddition>,
    pub hop_additions: Vec<HopAddition>,
    pub dry_hops: Vec<DryHopAddition>,
    pub color: ColorEstimate,
    pub mash: MashPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbid: Option<Vec<TurbidMashStep>>,
}

impl BrewPlan {
    pub fn total_fermentables_kg(&self) -> f64 {
        let fermentor_kg: f64 = self.fermentor_additions.iter().map(|m| m.amount_kg).sum();
        self.grain_bill.total_kg + fermentor_kg
    }

    pub fn total_boil_hops_g(&self) -> f64 {
        self.hop_additions.iter().map(|h| h.grams).sum()
    }
}

fn turbid_steps(schedule: &TurbidScheduleDef) -> Vec<TurbidStep> {
    schedule
        .steps
        .iter()
        .map(|s| TurbidStep {
            target_temp_c: s.target_temp_c,
            hold_min: s.time_min,
            percent_water: s.percent_water,
        })
        .collect()
}

/// Runs the full calculation. State is built fresh for every call.
pub fn compute_plan(
    request: &PlanRequest<'_>,
    malts: &dyn MaltLookup,
    hops: &dyn HopLookup,
) -> AppResult<BrewPlan> {
    let recipe = request.recipe;
    let profile = &request.profile;
    info!(recipe = %recipe.name, profile = profile.name, "computing brew plan");

    let volumes = Volumes::estimate(recipe.batch_size_l, recipe.boil_time_min, profile)?;
    let gravities = Gravities::from_post_boil(recipe.target_og_plato, &volumes)?;
    let mash_fraction =
        recipe.mash_percent() / (recipe.mash_percent() + recipe.fermentor_percent());
    let kettle_gravities = gravities.kettle_share(mash_fraction)?;

    let mash_entries = resolve_malts(
        recipe
            .mash_fermentables
            .iter()
            .map(|f| (f.name.as_str(), f.percent)),
        malts,
    )?;
    let fermentor_entries = resolve_malts(
        recipe
            .fermentor_fermentables
            .iter()
            .map(|f| (f.name.as_str(), f.percent)),
        malts,
    )?;

    // Solve at pre-boil volume and density: same extract as post-boil, and the
    // wort kept by the grain is pre-boil wort.
    let grain_bill = compute_grain_bill(
        gravities.pre_boil_plato,
        volumes.pre_boil_l,
        &mash_entries,
        profile.mash_efficiency,
        profile.physical.grain_absorption_l_per_kg,
        &request.convergence,
    )?;
    let volumes = volumes.with_mash_loss(grain_bill.mash_loss_l);
    let extract_kg: f64 = grain_bill
        .malts
        .iter()
        .map(|m| m.extract_kg(profile.mash_efficiency))
        .sum();
    info!(
        total_grain_kg = grain_bill.total_kg,
        extract_kg,
        iterations = grain_bill.iterations,
        mash_in_l = volumes.total_mash_in(),
        "grain bill converged"
    );

    let fermentor_additions = if fermentor_entries.is_empty() {
        Vec::new()
    } else {
        compute_additions(
            gravities.post_boil_plato,
            volumes.batch_size_l,
            &fermentor_entries,
            FERMENTOR_EFFICIENCY,
        )?
    };

    let boil_hops: Vec<HopShare> = recipe
        .boil_hops
        .iter()
        .map(|h| HopShare {
            name: h.name.clone(),
            percent: h.percent,
            boil_time_min: h.boil_time_min.unwrap_or(0.0),
        })
        .collect();
    let hop_additions = compute_hop_additions(
        gravities.post_boil_plato,
        volumes.post_boil_l,
        recipe.target_ibu,
        &boil_hops,
        hops,
    )?;

    let dry_hop_shares: Vec<DryHopShare> = recipe
        .dry_hops
        .iter()
        .map(|h| DryHopShare {
            name: h.name.clone(),
            g_per_l: h.g_per_l,
        })
        .collect();
    let dry_hops = compute_dry_hops(recipe.batch_size_l, &dry_hop_shares, hops)?;

    let color = estimate_color(
        grain_bill.malts.iter().chain(&fermentor_additions),
        volumes.post_boil_l,
    )?;

    let mash = plan_mash(profile, &volumes, grain_bill.total_kg)?;
    info!(num_mashes = mash.num_mashes, "mash plan ready");

    let turbid = match request.turbid {
        Some(schedule) => {
            let inputs = TurbidInputs {
                grain_kg: grain_bill.total_kg,
                mash_in_l: volumes.total_mash_in(),
                ambient_temp_c: request.ambient_temp_c,
                vessel_mass_kg: profile.system_mass_kg,
            };
            Some(schedule_turbid_mash(&turbid_steps(schedule), &inputs)?)
        }
        None => None,
    };

    Ok(BrewPlan {
        recipe_name: recipe.name.clone(),
        profile_name: profile.name,
        volumes,
        gravities,
        kettle_gravities,
        grain_bill,
        fermentor_additions,
        hop_additions,
        dry_hops,
        color,
        mash,
        turbid,
    })
}

pub fn plan_to_json(plan: &BrewPlan) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}
