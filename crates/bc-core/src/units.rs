// bc-core/src/units.rs

use uom::si::f64::{Area as UomArea, Length as UomLength, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Volume = UomVolume;

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

#[inline]
pub fn to_liters(v: Volume) -> f64 {
    v.get::<uom::si::volume::liter>()
}

#[inline]
pub fn to_mm(v: Length) -> f64 {
    v.get::<uom::si::length::millimeter>()
}

pub mod constants {
    /// Specific heat of water, kJ/(kg·°C). One liter of water is taken as one kilogram.
    pub const WATER_SPECIFIC_HEAT: f64 = 4.18;
    /// Specific heat of crushed malt, kJ/(kg·°C).
    pub const MALT_SPECIFIC_HEAT: f64 = 1.7;
    /// Specific heat of the stainless vessel, kJ/(kg·°C).
    pub const STAINLESS_SPECIFIC_HEAT: f64 = 0.5;
    pub const MINUTES_PER_HOUR: f64 = 60.0;
}
