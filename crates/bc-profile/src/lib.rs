//! Brewing system profiles.
//!
//! A profile is an immutable set of vessel constants. Both stock profiles are
//! produced by [`SystemProfile::braumeister20`]; the short malt pipe variant
//! only overrides the grain capacity.

pub mod profile;

pub use profile::{PhysicalConstants, ProfileKind, SystemProfile};
