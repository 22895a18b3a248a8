//! Brewing calculators for brewcalc.
//!
//! Provides:
//! - Volume/gravity model for one batch
//! - Fixed-point grain bill solver with grain absorption feedback
//! - Turbid mash infusion/removal schedule from an energy balance
//! - Tinseth hop additions, Morey color, mash cycle planning

pub mod bitterness;
pub mod color;
pub mod error;
pub mod grain_bill;
pub mod mash;
pub mod turbid;
pub mod volumes;

pub use bitterness::{
    DryHopAddition, DryHopShare, HopAddition, HopShare, compute_dry_hops, compute_hop_additions,
    hop_weight_grams, tinseth_utilization,
};
pub use color::{ColorEstimate, estimate_color};
pub use error::{CalcError, CalcResult};
pub use grain_bill::{
    ConvergenceConfig, ConvergenceStep, GrainBill, MaltAddition, MaltEntry, compute_additions,
    compute_grain_bill, resolve_malts,
};
pub use mash::{MashPlan, plan_mash};
pub use turbid::{StepKind, TurbidInputs, TurbidMashStep, TurbidStep, schedule_turbid_mash};
pub use volumes::{Gravities, Volumes};
