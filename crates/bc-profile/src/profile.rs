use std::fmt;

use bc_core::units::{Area, Length, constants::MINUTES_PER_HOUR, liters, mm, to_liters, to_mm};
use clap::ValueEnum;
use serde::Serialize;

/// Constants shared by every system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PhysicalConstants {
    /// Liquid retained by spent grain, L per kg of grain.
    pub grain_absorption_l_per_kg: f64,
    pub minutes_per_hour: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            grain_absorption_l_per_kg: 0.8,
            minutes_per_hour: MINUTES_PER_HOUR,
        }
    }
}

/// Immutable vessel constants for one brewing system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SystemProfile {
    pub name: &'static str,
    /// Smallest practical liquid volume in the vessel (L).
    pub min_mash_volume_l: f64,
    /// Grain capacity of the malt pipe for one mash cycle (kg).
    pub max_grain_per_mash_kg: f64,
    pub boil_off_l_per_hour: f64,
    /// Cone, hop and dead-space loss (L).
    pub trub_loss_l: f64,
    /// Fraction of the theoretical extract realized by this system.
    pub mash_efficiency: f64,
    pub vessel_diameter_mm: f64,
    /// Stainless mass heated along with the mash (kg).
    pub system_mass_kg: f64,
    pub physical: PhysicalConstants,
}

/// Named profile selection. Parsed on the command line as `braumeister20` or
/// `braumeister20-short`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    /// Braumeister 20 L with the full-size malt pipe (5.0 kg per mash)
    #[value(name = "braumeister20")]
    Braumeister20,
    /// Braumeister 20 L with the short malt pipe (2.6 kg per mash)
    #[default]
    #[value(name = "braumeister20-short")]
    Braumeister20Short,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 2] = [ProfileKind::Braumeister20, ProfileKind::Braumeister20Short];

    pub fn profile(self) -> SystemProfile {
        match self {
            ProfileKind::Braumeister20 => SystemProfile::braumeister20(),
            ProfileKind::Braumeister20Short => SystemProfile::braumeister20_short(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Braumeister20 => "braumeister20",
            ProfileKind::Braumeister20Short => "braumeister20-short",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SystemProfile {
    /// Braumeister 20 L, full-size malt pipe. Values are empirical and typical.
    pub fn braumeister20() -> Self {
        Self {
            name: "Braumeister 20",
            min_mash_volume_l: 10.0,
            max_grain_per_mash_kg: 5.0,
            boil_off_l_per_hour: 3.0,
            trub_loss_l: 1.2,
            mash_efficiency: 0.8,
            vessel_diameter_mm: 348.0,
            system_mass_kg: 15.0,
            physical: PhysicalConstants::default(),
        }
    }

    /// Braumeister 20 L, short malt pipe.
    pub fn braumeister20_short() -> Self {
        Self {
            name: "Braumeister 20 (short malt pipe)",
            max_grain_per_mash_kg: 2.6,
            ..Self::braumeister20()
        }
    }

    fn cross_section(&self) -> Area {
        let radius: Length = mm(self.vessel_diameter_mm / 2.0);
        radius * radius * std::f64::consts::PI
    }

    /// Liquid level in the vessel for a volume, mm.
    pub fn level_mm(&self, volume_l: f64) -> f64 {
        let level: Length = liters(volume_l) / self.cross_section();
        to_mm(level)
    }

    /// Volume held by the vessel up to a liquid level, L.
    pub fn volume_at_level(&self, level_mm: f64) -> f64 {
        to_liters(self.cross_section() * mm(level_mm))
    }

    /// Volume evaporated over a boil, L.
    pub fn boil_off_l(&self, boil_time_min: f64) -> f64 {
        boil_time_min / self.physical.minutes_per_hour * self.boil_off_l_per_hour
    }

    /// Number of physical mash cycles needed for a grain mass.
    pub fn num_mashes(&self, total_grain_kg: f64) -> usize {
        if total_grain_kg <= 0.0 {
            return 0;
        }
        (total_grain_kg / self.max_grain_per_mash_kg).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn profiles_differ_only_in_grain_capacity() {
        let full = SystemProfile::braumeister20();
        let short = SystemProfile::braumeister20_short();
        assert_eq!(full.max_grain_per_mash_kg, 5.0);
        assert_eq!(short.max_grain_per_mash_kg, 2.6);
        assert_eq!(
            SystemProfile {
                name: full.name,
                max_grain_per_mash_kg: full.max_grain_per_mash_kg,
                ..short
            },
            full
        );
    }

    #[test]
    fn profile_kind_parses_as_its_display_name() {
        for kind in ProfileKind::ALL {
            assert_eq!(ProfileKind::from_str(kind.as_str(), false).unwrap(), kind);
        }
        assert_eq!(
            ProfileKind::from_str("Braumeister20", true).unwrap(),
            ProfileKind::Braumeister20
        );
        assert!(ProfileKind::from_str("bm50", true).is_err());
    }

    #[test]
    fn level_for_twenty_liters() {
        // 348 mm vessel: ~951 cm² cross section, so 20 L stands ~210 mm
        let level = SystemProfile::braumeister20().level_mm(20.0);
        assert!((level - 210.3).abs() < 0.5, "level = {level}");
    }

    #[test]
    fn boil_off_scales_with_time() {
        let p = SystemProfile::braumeister20();
        assert!((p.boil_off_l(60.0) - 3.0).abs() < 1e-12);
        assert!((p.boil_off_l(90.0) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn num_mashes_rounds_up() {
        let short = SystemProfile::braumeister20_short();
        assert_eq!(short.num_mashes(0.0), 0);
        assert_eq!(short.num_mashes(2.6), 1);
        assert_eq!(short.num_mashes(2.61), 2);
        assert_eq!(short.num_mashes(5.5), 3);
    }

    proptest! {
        #[test]
        fn level_and_volume_are_inverse(volume in 0.1_f64..60.0) {
            let p = SystemProfile::braumeister20();
            let back = p.volume_at_level(p.level_mm(volume));
            prop_assert!((back - volume).abs() < 1e-9 * volume.max(1.0));
        }
    }
}
