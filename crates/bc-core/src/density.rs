//! Wort density conversion from degrees Plato to specific gravity.

use crate::Real;

/// Specific gravity (20 °C reference) for a wort density in °P.
pub fn plato_to_sg(plato: Real) -> Real {
    1.0 + plato / (258.6 - (plato / 258.2) * 227.1)
}
