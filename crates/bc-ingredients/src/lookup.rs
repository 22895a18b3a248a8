//! Lookup capability traits and the attribute records they return.

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};

/// Fixed attributes of a malt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaltInfo {
    /// Fraction of the malt mass convertible to extract under lab conditions (0-1].
    pub extract_yield: f64,
    /// Color contribution in EBC.
    pub color_ebc: f64,
}

/// Fixed attributes of a hop variety.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HopInfo {
    /// Alpha acid content as a fraction (0-1].
    pub alpha_acid: f64,
}

impl MaltInfo {
    /// Rejects attributes that would make the grain-bill formula divide by zero.
    pub fn validated(self, name: &str) -> LookupResult<Self> {
        if !(self.extract_yield > 0.0 && self.extract_yield <= 1.0) {
            return Err(LookupError::InvalidAttribute {
                kind: "malt",
                name: name.to_string(),
                what: "extract_yield",
                value: self.extract_yield,
            });
        }
        if !(self.color_ebc.is_finite() && self.color_ebc >= 0.0) {
            return Err(LookupError::InvalidAttribute {
                kind: "malt",
                name: name.to_string(),
                what: "color_ebc",
                value: self.color_ebc,
            });
        }
        Ok(self)
    }
}

impl HopInfo {
    pub fn validated(self, name: &str) -> LookupResult<Self> {
        if !(self.alpha_acid > 0.0 && self.alpha_acid <= 1.0) {
            return Err(LookupError::InvalidAttribute {
                kind: "hop",
                name: name.to_string(),
                what: "alpha_acid",
                value: self.alpha_acid,
            });
        }
        Ok(self)
    }
}

/// Maps a malt name to its attributes. Fails when the name is absent.
pub trait MaltLookup {
    fn get_malt(&self, name: &str) -> LookupResult<MaltInfo>;
}

/// Maps a hop name to its attributes. Fails when the name is absent.
pub trait HopLookup {
    fn get_hop(&self, name: &str) -> LookupResult<HopInfo>;
}

impl<T: MaltLookup + ?Sized> MaltLookup for &T {
    fn get_malt(&self, name: &str) -> LookupResult<MaltInfo> {
        (**self).get_malt(name)
    }
}

impl<T: HopLookup + ?Sized> HopLookup for &T {
    fn get_hop(&self, name: &str) -> LookupResult<HopInfo> {
        (**self).get_hop(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extract_yield_is_rejected() {
        let info = MaltInfo {
            extract_yield: 0.0,
            color_ebc: 5.0,
        };
        let err = info.validated("Dust").unwrap_err();
        assert!(matches!(
            err,
            LookupError::InvalidAttribute {
                what: "extract_yield",
                ..
            }
        ));
    }

    #[test]
    fn nan_alpha_is_rejected() {
        let info = HopInfo {
            alpha_acid: f64::NAN,
        };
        assert!(info.validated("Ghost").is_err());
    }
}
