use std::collections::HashMap;

use crate::error::{LookupError, LookupResult};
use crate::lookup::{HopInfo, HopLookup, MaltInfo, MaltLookup};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaltCatalogEntry {
    pub name: &'static str,
    pub extract_yield: f64,
    pub color_ebc: f64,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopCatalogEntry {
    pub name: &'static str,
    pub alpha_acid: f64,
    pub aliases: &'static [&'static str],
}

/// Case-insensitive match on name or any alias, ignoring surrounding whitespace.
fn matches(name: &'static str, aliases: &[&'static str], query: &str) -> bool {
    let query = query.trim();
    name.eq_ignore_ascii_case(query) || aliases.iter().any(|a| a.eq_ignore_ascii_case(query))
}

impl MaltCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        matches(self.name, self.aliases, query)
    }

    pub fn info(&self) -> MaltInfo {
        MaltInfo {
            extract_yield: self.extract_yield,
            color_ebc: self.color_ebc,
        }
    }
}

impl HopCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        matches(self.name, self.aliases, query)
    }

    pub fn info(&self) -> HopInfo {
        HopInfo {
            alpha_acid: self.alpha_acid,
        }
    }
}

const BUILTIN_MALTS: [MaltCatalogEntry; 7] = [
    MaltCatalogEntry {
        name: "Pale Ale Malt",
        extract_yield: 0.80,
        color_ebc: 6.0,
        aliases: &["pale ale"],
    },
    MaltCatalogEntry {
        name: "Best a-xl",
        extract_yield: 0.80,
        color_ebc: 3.0,
        aliases: &["best extra light"],
    },
    MaltCatalogEntry {
        name: "Caramunich 3",
        extract_yield: 0.73,
        color_ebc: 150.0,
        aliases: &["caramunich iii"],
    },
    MaltCatalogEntry {
        name: "Carapils",
        extract_yield: 0.72,
        color_ebc: 4.0,
        aliases: &["carapils malt"],
    },
    MaltCatalogEntry {
        name: "Munich Malt",
        extract_yield: 0.78,
        color_ebc: 15.0,
        aliases: &["munich"],
    },
    MaltCatalogEntry {
        name: "Carafa special 2",
        extract_yield: 0.72,
        color_ebc: 1150.0,
        aliases: &["carafa special ii"],
    },
    MaltCatalogEntry {
        name: "Dextrose",
        extract_yield: 0.91,
        color_ebc: 0.0,
        aliases: &["corn sugar", "glucose"],
    },
];

const BUILTIN_HOPS: [HopCatalogEntry; 3] = [
    HopCatalogEntry {
        name: "Cascade",
        alpha_acid: 0.055,
        aliases: &[],
    },
    HopCatalogEntry {
        name: "Centennial",
        alpha_acid: 0.10,
        aliases: &[],
    },
    HopCatalogEntry {
        name: "Saaz",
        alpha_acid: 0.035,
        aliases: &["czech saaz"],
    },
];

/// The stock malt and hop database.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn malts(&self) -> &'static [MaltCatalogEntry] {
        &BUILTIN_MALTS
    }

    pub fn hops(&self) -> &'static [HopCatalogEntry] {
        &BUILTIN_HOPS
    }
}

impl MaltLookup for BuiltinCatalog {
    fn get_malt(&self, name: &str) -> LookupResult<MaltInfo> {
        BUILTIN_MALTS
            .iter()
            .find(|m| m.name == name)
            .or_else(|| BUILTIN_MALTS.iter().find(|m| m.matches_query(name)))
            .ok_or_else(|| LookupError::NotFound {
                kind: "malt",
                name: name.to_string(),
            })
            .and_then(|m| m.info().validated(name))
    }
}

impl HopLookup for BuiltinCatalog {
    fn get_hop(&self, name: &str) -> LookupResult<HopInfo> {
        BUILTIN_HOPS
            .iter()
            .find(|h| h.name == name)
            .or_else(|| BUILTIN_HOPS.iter().find(|h| h.matches_query(name)))
            .ok_or_else(|| LookupError::NotFound {
                kind: "hop",
                name: name.to_string(),
            })
            .and_then(|h| h.info().validated(name))
    }
}

/// Map-backed catalog with exact-name keys.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    malts: HashMap<String, MaltInfo>,
    hops: HashMap<String, HopInfo>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_malt(
        mut self,
        name: impl Into<String>,
        extract_yield: f64,
        color_ebc: f64,
    ) -> Self {
        self.malts.insert(
            name.into(),
            MaltInfo {
                extract_yield,
                color_ebc,
            },
        );
        self
    }

    pub fn with_hop(mut self, name: impl Into<String>, alpha_acid: f64) -> Self {
        self.hops.insert(name.into(), HopInfo { alpha_acid });
        self
    }
}

impl MaltLookup for InMemoryCatalog {
    fn get_malt(&self, name: &str) -> LookupResult<MaltInfo> {
        let info = self.malts.get(name).ok_or_else(|| LookupError::NotFound {
            kind: "malt",
            name: name.to_string(),
        })?;
        info.validated(name)
    }
}

impl HopLookup for InMemoryCatalog {
    fn get_hop(&self, name: &str) -> LookupResult<HopInfo> {
        let info = self.hops.get(name).ok_or_else(|| LookupError::NotFound {
            kind: "hop",
            name: name.to_string(),
        })?;
        info.validated(name)
    }
}
