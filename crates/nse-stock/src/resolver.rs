//! Free-text symbol resolution over a [`SymbolCatalog`]

use crate::catalog::SymbolCatalog;
use std::sync::Arc;

/// Shortest query `search` will act on
pub const MIN_SEARCH_LEN: usize = 2;

/// Most results `search` returns
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Maps user queries onto catalog tickers
#[derive(Debug, Clone)]
pub struct SymbolResolver {
    catalog: Arc<SymbolCatalog>,
}

impl SymbolResolver {
    /// Create a resolver over a catalog
    pub fn new(catalog: Arc<SymbolCatalog>) -> Self {
        Self { catalog }
    }

    /// The underlying catalog
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Resolve a query to a canonical ticker
    ///
    /// Tries an exact match, then the alias table, then the first catalog
    /// entry (in catalog order) that contains the query or is contained by it.
    /// The substring step is permissive: `"A"` resolves to the first ticker
    /// with an `A` in it.
    pub fn resolve(&self, query: &str) -> Option<&str> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return None;
        }

        if let Some(exact) = self.catalog.get(&query) {
            return Some(exact);
        }

        if let Some(target) = self.catalog.alias(&query) {
            return Some(target);
        }

        self.catalog
            .symbols()
            .iter()
            .find(|s| s.contains(query.as_str()) || query.contains(s.as_str()))
            .map(String::as_str)
    }

    /// Search tickers by partial symbol or industry keyword
    ///
    /// Direct substring hits come first, followed by the members of the first
    /// industry group the term selects. A group is selected when its key
    /// contains the term or the term contains the key's first four characters.
    /// Results are de-duplicated and capped at [`MAX_SEARCH_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<String> {
        let term = query.trim().to_uppercase();
        if term.chars().count() < MIN_SEARCH_LEN {
            return Vec::new();
        }

        let mut results: Vec<String> = self
            .catalog
            .symbols()
            .iter()
            .filter(|s| s.contains(term.as_str()) || term.contains(s.as_str()))
            .cloned()
            .collect();

        let industry = self.catalog.industries().find(|(key, _)| {
            let prefix: String = key.chars().take(4).collect();
            key.contains(term.as_str()) || term.contains(prefix.as_str())
        });
        if let Some((_, members)) = industry {
            results.extend(members.iter().cloned());
        }

        let mut seen = std::collections::HashSet::new();
        results.retain(|s| seen.insert(s.clone()));
        results.truncate(MAX_SEARCH_RESULTS);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn resolver() -> SymbolResolver {
        let catalog = SymbolCatalog::new(
            ["RELIANCE", "TCS", "INFY", "HDFC", "HDFCBANK", "SBIN"],
            [("RIL", "RELIANCE"), ("INFOSYS", "INFY"), ("STATEBANK", "SBIN")],
            [
                ("BANKING", vec!["HDFCBANK", "SBIN"]),
                ("IT", vec!["TCS", "INFY"]),
            ],
        )
        .unwrap();
        SymbolResolver::new(Arc::new(catalog))
    }

    #[test]
    fn test_exact_match() {
        let r = resolver();
        assert_eq!(r.resolve("TCS"), Some("TCS"));
        assert_eq!(r.resolve("  tcs "), Some("TCS"));
        // Exact beats substring: HDFC is also a prefix of HDFCBANK
        assert_eq!(r.resolve("hdfc"), Some("HDFC"));
    }

    #[test]
    fn test_alias_lookup() {
        let r = resolver();
        assert_eq!(r.resolve("ril"), Some("RELIANCE"));
        assert_eq!(r.resolve("Infosys"), Some("INFY"));
    }

    #[test]
    fn test_substring_fallback_in_catalog_order() {
        let r = resolver();
        // Query contained in an entry
        assert_eq!(r.resolve("BANK"), Some("HDFCBANK"));
        // Entry contained in the query
        assert_eq!(r.resolve("TCS LIMITED"), Some("TCS"));
        // Permissive: first entry with an I
        assert_eq!(r.resolve("I"), Some("RELIANCE"));
    }

    #[test]
    fn test_empty_query_guard() {
        let r = resolver();
        assert_eq!(r.resolve(""), None);
        assert_eq!(r.resolve("   "), None);
    }

    #[test]
    fn test_not_found() {
        assert_eq!(resolver().resolve("ZZZZ"), None);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let r = resolver();
        for query in ["ril", "bank", "TCS", "nothing"] {
            let first = r.resolve(query).map(str::to_string);
            let second = r.resolve(query).map(str::to_string);
            assert_eq!(first, second);
            if let Some(sym) = first {
                assert_eq!(r.resolve(&sym), Some(sym.as_str()));
            }
        }
    }

    #[test]
    fn test_search_min_length() {
        assert!(resolver().search("T").is_empty());
        assert!(resolver().search(" ").is_empty());
    }

    #[test]
    fn test_search_industry_keyword() {
        let results = resolver().search("banking");
        assert_eq!(results, vec!["HDFCBANK", "SBIN"]);
    }

    #[test]
    fn test_search_dedupes_symbol_and_industry_hits() {
        // "BANK" matches HDFCBANK directly and selects the BANKING group
        let results = resolver().search("bank");
        assert_eq!(results, vec!["HDFCBANK", "SBIN"]);
    }

    #[test]
    fn test_search_caps_results() {
        let symbols: Vec<String> = (0..30).map(|i| format!("ABC{i}")).collect();
        let catalog = SymbolCatalog::new(
            symbols.iter().map(String::as_str),
            std::iter::empty(),
            std::iter::empty(),
        )
        .unwrap();
        let results = SymbolResolver::new(Arc::new(catalog)).search("abc");
        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(results[0], "ABC0");
    }

    #[test]
    fn test_bundled_aliases() {
        let r = SymbolResolver::new(Arc::new(SymbolCatalog::indian_equities().unwrap()));
        assert_eq!(r.resolve("airtel"), Some("BHARTIARTL"));
        assert_eq!(r.resolve("HUL"), Some("HINDUNILVR"));

        for (alias, target) in data::STOCK_ALIASES {
            let expected = if data::SUPPORTED_STOCKS.contains(&alias.to_uppercase().as_str()) {
                alias.to_uppercase()
            } else {
                target.to_uppercase()
            };
            assert_eq!(r.resolve(alias), Some(expected.as_str()), "alias {alias}");
        }
    }

    #[test]
    fn test_every_bundled_ticker_resolves_to_itself() {
        let r = SymbolResolver::new(Arc::new(SymbolCatalog::indian_equities().unwrap()));
        for symbol in data::SUPPORTED_STOCKS {
            assert_eq!(r.resolve(symbol), Some(*symbol));
            assert_eq!(r.resolve(&symbol.to_lowercase()), Some(*symbol));
        }
    }
}
