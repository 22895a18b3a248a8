//! Recipe and turbid step file schema.

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "Unknown recipe".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Volume into the fermentor (L).
    pub batch_size_l: f64,
    pub boil_time_min: f64,
    /// Target original gravity (°P).
    pub target_og_plato: f64,
    #[serde(default)]
    pub target_ibu: f64,
    #[serde(default)]
    pub mash_fermentables: Vec<FermentableDef>,
    /// Fermentables added after the boil. Percentages share the 100 % with the mash.
    #[serde(default)]
    pub fermentor_fermentables: Vec<FermentableDef>,
    #[serde(default)]
    pub boil_hops: Vec<BoilHopDef>,
    #[serde(default)]
    pub dry_hops: Vec<DryHopDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FermentableDef {
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoilHopDef {
    pub name: String,
    /// Share of the target IBU.
    pub percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boil_time_min: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DryHopDef {
    pub name: String,
    pub g_per_l: f64,
}

/// Turbid step file:
/// ```yaml
/// steps:
///   - target_temp_c: 50
///     time_min: 15
///     percent_water: 60
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TurbidScheduleDef {
    #[serde(default)]
    pub steps: Vec<TurbidStepDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TurbidStepDef {
    pub target_temp_c: f64,
    pub time_min: f64,
    /// Negative removes that percent of the water currently in the vessel.
    pub percent_water: f64,
}

impl Recipe {
    pub fn mash_percent(&self) -> f64 {
        self.mash_fermentables.iter().map(|f| f.percent).sum()
    }

    pub fn fermentor_percent(&self) -> f64 {
        self.fermentor_fermentables.iter().map(|f| f.percent).sum()
    }

    pub fn boil_hop_percent(&self) -> f64 {
        self.boil_hops.iter().map(|h| h.percent).sum()
    }
}
