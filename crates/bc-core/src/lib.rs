//! bc-core: stable foundation for brewcalc.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - density (Plato to specific gravity)
//! - error (shared error types)

pub mod density;
pub mod error;
pub mod numeric;
pub mod units;

pub use density::plato_to_sg;
pub use error::BcError;
pub use numeric::*;
pub use units::*;
