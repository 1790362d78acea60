//! Symbol catalog and the static groupings built on it
//!
//! The catalog is read-only configuration: it is built once, validated, and
//! shared behind an `Arc` by every tool.

use crate::data;
use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Immutable set of canonical tickers plus alias and industry tables
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    symbols: Vec<String>,
    index: HashSet<String>,
    aliases: HashMap<String, String>,
    industries: Vec<(String, Vec<String>)>,
}

impl SymbolCatalog {
    /// Build a catalog
    ///
    /// Symbols are uppercased, trimmed and de-duplicated keeping first
    /// occurrence. Every alias must point at a catalog symbol.
    pub fn new<S, I, A, G>(symbols: I, aliases: A, industries: G) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
        A: IntoIterator<Item = (S, S)>,
        G: IntoIterator<Item = (S, Vec<S>)>,
    {
        let mut ordered = Vec::new();
        let mut index = HashSet::new();
        for symbol in symbols {
            let symbol = normalize(symbol.as_ref());
            if !symbol.is_empty() && index.insert(symbol.clone()) {
                ordered.push(symbol);
            }
        }

        let mut alias_map = HashMap::new();
        for (alias, target) in aliases {
            let alias = normalize(alias.as_ref());
            let target = normalize(target.as_ref());
            if !index.contains(&target) {
                return Err(StockError::Config(format!(
                    "alias {alias} points at {target}, which is not in the catalog"
                )));
            }
            alias_map.insert(alias, target);
        }

        let industries = industries
            .into_iter()
            .map(|(key, members)| {
                (
                    normalize(key.as_ref()),
                    members.iter().map(|m| normalize(m.as_ref())).collect(),
                )
            })
            .collect();

        Ok(Self {
            symbols: ordered,
            index,
            aliases: alias_map,
            industries,
        })
    }

    /// The bundled NSE dataset
    pub fn indian_equities() -> Result<Self> {
        Self::new(
            data::SUPPORTED_STOCKS.iter().copied(),
            data::STOCK_ALIASES.iter().copied(),
            data::INDUSTRY_KEYWORDS
                .iter()
                .map(|(key, members)| (*key, members.to_vec())),
        )
    }

    /// Tickers in catalog order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Whether `symbol` (already uppercase) is a catalog entry
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains(symbol)
    }

    /// The catalog entry equal to `symbol` (already uppercase)
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.index.get(symbol).map(String::as_str)
    }

    /// Canonical ticker for an alias (already uppercase)
    pub fn alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Industry keyword groups in declaration order
    pub fn industries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.industries
            .iter()
            .map(|(key, members)| (key.as_str(), members.as_slice()))
    }

    /// Keep only group members that are catalog entries, preserving order
    pub fn filter_members<'a>(&self, members: &[&'a str]) -> Vec<&'a str> {
        members
            .iter()
            .copied()
            .filter(|m| self.contains(m))
            .collect()
    }

    /// Number of tickers
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the catalog has no tickers
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Market sectors with curated constituents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sector {
    Banking,
    It,
    Pharma,
    Auto,
    Fmcg,
    Energy,
    Metals,
    Telecom,
    Financial,
}

impl Sector {
    /// All sectors in matching order
    pub const ALL: [Sector; 9] = [
        Sector::Banking,
        Sector::It,
        Sector::Pharma,
        Sector::Auto,
        Sector::Fmcg,
        Sector::Energy,
        Sector::Metals,
        Sector::Telecom,
        Sector::Financial,
    ];

    /// Uppercase key used for matching and display
    pub fn key(self) -> &'static str {
        match self {
            Sector::Banking => "BANKING",
            Sector::It => "IT",
            Sector::Pharma => "PHARMA",
            Sector::Auto => "AUTO",
            Sector::Fmcg => "FMCG",
            Sector::Energy => "ENERGY",
            Sector::Metals => "METALS",
            Sector::Telecom => "TELECOM",
            Sector::Financial => "FINANCIAL",
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Sector::Banking => "Banking and Financial Services",
            Sector::It => "Information Technology",
            Sector::Pharma => "Pharmaceuticals",
            Sector::Auto => "Automotive",
            Sector::Fmcg => "Fast Moving Consumer Goods",
            Sector::Energy => "Energy and Oil & Gas",
            Sector::Metals => "Metals and Mining",
            Sector::Telecom => "Telecommunications",
            Sector::Financial => "Non-Banking Financial Services",
        }
    }

    /// Curated constituents (may include unlisted tickers)
    pub fn constituents(self) -> &'static [&'static str] {
        match self {
            Sector::Banking => data::BANKING,
            Sector::It => data::IT,
            Sector::Pharma => data::PHARMA,
            Sector::Auto => data::AUTO,
            Sector::Fmcg => data::FMCG,
            Sector::Energy => data::ENERGY,
            Sector::Metals => data::METALS,
            Sector::Telecom => data::TELECOM,
            Sector::Financial => data::FINANCIAL,
        }
    }

    /// Short sector commentary, where one exists
    pub fn insight(self) -> Option<&'static str> {
        match self {
            Sector::Banking => {
                Some("Banking sector is interest-rate sensitive. Monitor RBI policy changes.")
            }
            Sector::It => {
                Some("IT sector benefits from digital transformation and export revenues.")
            }
            Sector::Pharma => {
                Some("Pharma sector driven by domestic demand and export opportunities.")
            }
            Sector::Auto => {
                Some("Auto sector influenced by rural demand, fuel prices, and EV transition.")
            }
            Sector::Energy => Some(
                "Energy sector tied to oil prices, renewable energy policies, and global demand.",
            ),
            Sector::Fmcg | Sector::Metals | Sector::Telecom | Sector::Financial => None,
        }
    }

    /// First sector whose key equals, contains, or is contained by the query
    pub fn matching(query: &str) -> Option<Sector> {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|sector| {
            let key = sector.key();
            key == query || key.contains(query.as_str()) || query.contains(key)
        })
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Market capitalisation buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCap {
    #[serde(rename = "large_cap")]
    Large,
    #[serde(rename = "mid_cap")]
    Mid,
    #[serde(rename = "small_cap")]
    Small,
}

impl MarketCap {
    /// All categories
    pub const ALL: [MarketCap; 3] = [MarketCap::Large, MarketCap::Mid, MarketCap::Small];

    /// Exact, case-insensitive parse of `large_cap`, `mid_cap` or `small_cap`
    pub fn parse(raw: &str) -> Option<MarketCap> {
        match raw.trim().to_lowercase().as_str() {
            "large_cap" => Some(MarketCap::Large),
            "mid_cap" => Some(MarketCap::Mid),
            "small_cap" => Some(MarketCap::Small),
            _ => None,
        }
    }

    /// Parameter value
    pub fn key(self) -> &'static str {
        match self {
            MarketCap::Large => "large_cap",
            MarketCap::Mid => "mid_cap",
            MarketCap::Small => "small_cap",
        }
    }

    /// Display label, e.g. `LARGE-CAP`
    pub fn label(self) -> &'static str {
        match self {
            MarketCap::Large => "LARGE-CAP",
            MarketCap::Mid => "MID-CAP",
            MarketCap::Small => "SMALL-CAP",
        }
    }

    /// Curated constituents
    pub fn constituents(self) -> &'static [&'static str] {
        match self {
            MarketCap::Large => data::LARGE_CAP,
            MarketCap::Mid => data::MID_CAP,
            MarketCap::Small => data::SMALL_CAP,
        }
    }

    /// Investment profile blurb
    pub fn profile(self) -> &'static str {
        match self {
            MarketCap::Large => {
                "Large-cap stocks offer stability, lower volatility, and steady dividend yields. Suitable for conservative investors."
            }
            MarketCap::Mid => {
                "Mid-cap stocks offer growth potential with moderate risk. Good balance of growth and stability."
            }
            MarketCap::Small => {
                "Small-cap stocks offer high growth potential but with higher volatility and risk. Suitable for aggressive investors."
            }
        }
    }
}
