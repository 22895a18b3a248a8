//! Malt and hop attribute lookup for brewcalc.
//!
//! The calculators never touch a global table: they receive a [`MaltLookup`]
//! and/or [`HopLookup`] implementation. [`BuiltinCatalog`] carries the stock
//! database, [`InMemoryCatalog`] is for tests and user-supplied data.

pub mod catalog;
pub mod error;
pub mod lookup;

pub use catalog::{BuiltinCatalog, HopCatalogEntry, InMemoryCatalog, MaltCatalogEntry};
pub use error::{LookupError, LookupResult};
pub use lookup::{HopInfo, HopLookup, MaltInfo, MaltLookup};
