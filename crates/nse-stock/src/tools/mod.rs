//! MCP tools over the Indian stock market API
//!
//! Every tool reports domain failures as `❌` text rather than as protocol
//! errors, so callers always receive a readable answer.

pub mod advanced;
pub mod discovery;
pub mod financials;
pub mod historical;
pub mod movers;
pub mod quote;
pub mod shareholding;

pub use advanced::AdvancedAnalysisTool;
pub use discovery::{MarketCapStocksTool, SearchStocksTool, SectorStocksTool, SupportedStocksTool};
pub use financials::{FinancialStatementTool, Statement};
pub use historical::HistoricalAnalysisTool;
pub use movers::{MoverDirection, TopMoversTool};
pub use quote::{MultipleStocksTool, StockDataTool};
pub use shareholding::{Frequency, ShareholdingTool};

use crate::api::MarketDataSource;
use crate::error::{Result, StockError};
use crate::format::parse_number;
use crate::resolver::SymbolResolver;
use nse_tools::ToolRegistry;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Appended to "not found" messages
pub(crate) const SYMBOL_HINT: &str = "Use get_supported_stocks to see available symbols.";

/// Shared dependencies of the stock tools
#[derive(Clone)]
pub struct ToolContext {
    pub source: Arc<dyn MarketDataSource>,
    pub resolver: Arc<SymbolResolver>,
}

impl ToolContext {
    /// Create a context from a data source and resolver
    pub fn new(source: Arc<dyn MarketDataSource>, resolver: Arc<SymbolResolver>) -> Self {
        Self { source, resolver }
    }

    /// Resolve a required `symbol` argument to a catalog ticker
    pub(crate) fn require_symbol(&self, raw: Option<&str>, hint: &str) -> Result<String> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StockError::InvalidInput("Symbol parameter is required".to_string()))?;

        self.resolver
            .resolve(raw)
            .map(str::to_string)
            .ok_or_else(|| StockError::NotFound(format!("Stock \"{raw}\" not found. {hint}")))
    }
}

/// Register all 17 stock tools in their listing order
pub fn register_all(registry: &ToolRegistry, ctx: &ToolContext) {
    registry.register(Arc::new(StockDataTool::new(ctx.clone())));
    registry.register(Arc::new(MultipleStocksTool::new(ctx.clone())));
    registry.register(Arc::new(SearchStocksTool::new(ctx.clone())));
    registry.register(Arc::new(TopMoversTool::new(ctx.clone(), MoverDirection::Gainers)));
    registry.register(Arc::new(TopMoversTool::new(ctx.clone(), MoverDirection::Losers)));
    registry.register(Arc::new(SectorStocksTool::new(ctx.clone())));
    registry.register(Arc::new(MarketCapStocksTool::new(ctx.clone())));
    registry.register(Arc::new(SupportedStocksTool::new(ctx.clone())));
    for statement in Statement::ALL {
        registry.register(Arc::new(FinancialStatementTool::new(ctx.clone(), statement)));
    }
    registry.register(Arc::new(ShareholdingTool::new(ctx.clone(), Frequency::Quarterly)));
    registry.register(Arc::new(ShareholdingTool::new(ctx.clone(), Frequency::Yearly)));
    registry.register(Arc::new(HistoricalAnalysisTool::new(ctx.clone())));
    registry.register(Arc::new(AdvancedAnalysisTool::new(ctx.clone())));
}

/// Arguments of the single-symbol tools
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SymbolParams {
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Deserialize tool arguments; `null` means "no arguments"
pub(crate) fn parse_params<T: DeserializeOwned + Default>(params: Value) -> Result<T> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|e| StockError::InvalidInput(format!("Invalid parameters: {e}")))
}

/// Input schema of the single-symbol tools
pub(crate) fn symbol_schema(example: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "symbol": {
                "type": "string",
                "description": format!("Stock symbol (e.g., {example})")
            }
        },
        "required": ["symbol"]
    })
}

/// Turn a failed tool run into its text payload
pub(crate) fn report_failure(tool: &str, context: &str, err: &StockError) -> String {
    if err.is_upstream() {
        warn!(tool, error = %err, "Upstream failure");
    } else {
        debug!(tool, error = %err, "Tool call rejected");
    }
    err.user_message(context)
}

/// Read-only view over a `/historical_stats` document
///
/// Documents map row names to `{period: value}` objects with periods in
/// chronological document order.
pub(crate) struct StatsTable<'a> {
    rows: &'a Map<String, Value>,
}

impl<'a> StatsTable<'a> {
    pub fn new(rows: &'a Map<String, Value>) -> Self {
        Self { rows }
    }

    pub fn value(&self, row: &str, period: &str) -> Option<&'a Value> {
        self.rows.get(row).and_then(|r| r.get(period))
    }

    pub fn num(&self, row: &str, period: &str) -> Option<f64> {
        self.value(row, period)
            .and_then(parse_number)
            .filter(|v| v.is_finite())
    }

    /// All period keys of a row, in document order
    pub fn periods(&self, row: &str) -> Vec<&'a str> {
        self.rows
            .get(row)
            .and_then(Value::as_object)
            .map(|r| r.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Last `n` items of a slice
pub(crate) fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// `⏰ **Updated**: ...` line shared by the list-style reports
pub(crate) fn updated_line() -> String {
    format!("⏰ **Updated**: {}\n", crate::format::ist_now())
}


#[cfg(test)]
mod tests {
    use super::test_support::offline_context;
    use super::*;

    #[test]
    fn test_register_all_order() {
        let registry = ToolRegistry::new();
        register_all(&registry, &offline_context());

        let names: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "get_stock_data",
                "get_multiple_stocks",
                "search_stocks",
                "get_top_gainers",
                "get_top_losers",
                "get_stocks_by_sector",
                "get_stocks_by_market_cap",
                "get_supported_stocks",
                "get_quarterly_results",
                "get_yearly_results",
                "get_balance_sheet",
                "get_cashflow_statement",
                "get_financial_ratios",
                "get_shareholding_quarterly",
                "get_shareholding_yearly",
                "get_historical_analysis",
                "get_advanced_stock_analysis",
            ]
        );
    }

    #[test]
    fn test_require_symbol() {
        let ctx = offline_context();
        assert_eq!(ctx.require_symbol(Some(" tcs "), SYMBOL_HINT).unwrap(), "TCS");
        assert_eq!(ctx.require_symbol(Some("ril"), SYMBOL_HINT).unwrap(), "RELIANCE");

        let err = ctx.require_symbol(Some("   "), SYMBOL_HINT).unwrap_err();
        assert_eq!(err.user_message("ctx"), "❌ Symbol parameter is required");

        let err = ctx.require_symbol(Some("ZZZZQQQ"), SYMBOL_HINT).unwrap_err();
        assert_eq!(
            err.user_message("ctx"),
            "❌ Stock \"ZZZZQQQ\" not found. Use get_supported_stocks to see available symbols."
        );
    }

    #[test]
    fn test_registry_dispatch_returns_text_failures() {
        let registry = ToolRegistry::new();
        register_all(&registry, &offline_context());

        let text = tokio_test::block_on(
            registry.call("get_balance_sheet", json!({"symbol": "NOPE-XYZ"})),
        )
        .unwrap();
        assert!(text.starts_with("❌ Stock \"NOPE-XYZ\" not found."));

        let err = tokio_test::block_on(registry.call("get_weather", Value::Null)).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: get_weather");
    }

    #[test]
    fn test_parse_params() {
        let params: SymbolParams = parse_params(Value::Null).unwrap();
        assert!(params.symbol.is_none());

        let params: SymbolParams = parse_params(json!({"symbol": "INFY"})).unwrap();
        assert_eq!(params.symbol.as_deref(), Some("INFY"));

        let err = parse_params::<SymbolParams>(json!({"symbol": 42})).unwrap_err();
        assert!(err.to_string().starts_with("Invalid parameters"));
    }
}
