//! Catalog browsing tools: search, sector, market cap and the full list
//!
//! None of these reach the upstream API.

use super::{ToolContext, parse_params, report_failure, updated_line};
use crate::catalog::{MarketCap, Sector};
use crate::error::{Result, StockError};
use crate::resolver::MIN_SEARCH_LEN;
use async_trait::async_trait;
use nse_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt::Write;

/// Default number of symbols listed by `get_supported_stocks`
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Most symbols listed for a market-cap category
pub const MAX_CATEGORY_LISTING: usize = 20;

const DETAIL_TIP: &str = "💡 **Use get_stock_data with any symbol above for detailed analysis**";

/// `search_stocks`: symbol and industry keyword search
pub struct SearchStocksTool {
    ctx: ToolContext,
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: Option<String>,
}

impl SearchStocksTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    fn run(&self, params: Value) -> Result<String> {
        let params: SearchParams = parse_params(params)?;
        let query = params.query.unwrap_or_default();
        let query = query.trim();

        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(format!(
                "🔍 **STOCK SEARCH**\n\n❌ Please provide a search query with at least {MIN_SEARCH_LEN} characters.\n\nExample: \"TATA\", \"Banking\", \"Pharma\", etc."
            ));
        }

        let matches = self.ctx.resolver.search(query);

        let mut out = format!("🔍 **STOCK SEARCH**: \"{query}\"\n");
        out.push_str(&updated_line());
        out.push('\n');

        if matches.is_empty() {
            write!(
                out,
                "❌ No stocks found matching \"{query}\".\n\n\
                 💡 **Try searching for:**\n\
                 • Company names: \"TATA\", \"RELIANCE\", \"HDFC\"\n\
                 • Sectors: \"BANKING\", \"IT\", \"PHARMA\", \"AUTO\"\n\
                 • Use get_supported_stocks to see all available symbols"
            )?;
        } else {
            writeln!(out, "📊 **Found {} matches:**\n", matches.len())?;
            for (i, symbol) in matches.iter().enumerate() {
                writeln!(out, "{}. **{symbol}**", i + 1)?;
            }
            write!(out, "\n{DETAIL_TIP}")?;
        }
        Ok(out)
    }
}

#[async_trait]
impl Tool for SearchStocksTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self
            .run(params)
            .unwrap_or_else(|e| report_failure(self.name(), "Error searching stocks", &e)))
    }

    fn name(&self) -> &str {
        "search_stocks"
    }

    fn description(&self) -> &str {
        "Search for stocks by name or symbol"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (company name or partial symbol)"
                }
            },
            "required": ["query"]
        })
    }
}

/// `get_stocks_by_sector`: curated sector constituents
pub struct SectorStocksTool {
    ctx: ToolContext,
}

#[derive(Debug, Default, Deserialize)]
struct SectorParams {
    #[serde(default)]
    sector: Option<String>,
}

impl SectorStocksTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    fn run(&self, params: Value) -> Result<String> {
        let params: SectorParams = parse_params(params)?;
        let query = params.sector.unwrap_or_default().trim().to_uppercase();
        if query.is_empty() {
            return Err(StockError::InvalidInput(
                "Sector parameter is required. Available sectors: BANKING, IT, PHARMA, AUTO, FMCG, ENERGY, METALS, TELECOM"
                    .to_string(),
            ));
        }

        let Some(sector) = Sector::matching(&query) else {
            let listing: Vec<String> = Sector::ALL
                .iter()
                .map(|s| format!("• {} - {}", s.key(), s.description()))
                .collect();
            return Err(StockError::NotFound(format!(
                "Sector \"{query}\" not found. Available sectors:\n{}",
                listing.join("\n")
            )));
        };

        let stocks = self.ctx.resolver.catalog().filter_members(sector.constituents());

        let mut out = format!("🏭 **{sector} SECTOR STOCKS**\n");
        out.push_str(&updated_line());
        writeln!(out, "📊 **Found**: {} stocks\n", stocks.len())?;

        if stocks.is_empty() {
            write!(
                out,
                "❌ **No stocks found in {sector} sector in current database**"
            )?;
            return Ok(out);
        }

        writeln!(out, "📋 **STOCKS IN {sector} SECTOR:**\n")?;
        for (i, symbol) in stocks.iter().enumerate() {
            writeln!(out, "{}. **{symbol}**", i + 1)?;
        }
        write!(
            out,
            "\n{DETAIL_TIP}\n💡 **Use get_historical_analysis for price trends and technical analysis**"
        )?;
        if let Some(insight) = sector.insight() {
            write!(out, "\n\n📈 **Sector Insights**: {insight}")?;
        }
        Ok(out)
    }
}

#[async_trait]
impl Tool for SectorStocksTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self
            .run(params)
            .unwrap_or_else(|e| report_failure(self.name(), "Error getting sector stocks", &e)))
    }

    fn name(&self) -> &str {
        "get_stocks_by_sector"
    }

    fn description(&self) -> &str {
        "Get stocks filtered by sector"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sector": {
                    "type": "string",
                    "description": "Sector name (e.g., IT, Banking, Pharma)"
                }
            },
            "required": ["sector"]
        })
    }
}

/// `get_stocks_by_market_cap`: curated market-cap buckets
pub struct MarketCapStocksTool {
    ctx: ToolContext,
}

#[derive(Debug, Default, Deserialize)]
struct MarketCapParams {
    #[serde(default)]
    category: Option<String>,
}

impl MarketCapStocksTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    fn run(&self, params: Value) -> Result<String> {
        let params: MarketCapParams = parse_params(params)?;
        let raw = params.category.unwrap_or_default().trim().to_lowercase();
        if raw.is_empty() {
            return Err(StockError::InvalidInput(
                "Category parameter is required. Available categories: large_cap, mid_cap, small_cap"
                    .to_string(),
            ));
        }
        let category = MarketCap::parse(&raw).ok_or_else(|| {
            StockError::InvalidInput(format!(
                "Invalid category \"{raw}\". Available categories: large_cap, mid_cap, small_cap"
            ))
        })?;

        let stocks = self
            .ctx
            .resolver
            .catalog()
            .filter_members(category.constituents());
        let label = category.label();

        let mut out = format!("💰 **{label} STOCKS**\n");
        out.push_str(&updated_line());
        writeln!(out, "📊 **Found**: {} stocks\n", stocks.len())?;

        if stocks.is_empty() {
            write!(
                out,
                "❌ **No stocks found in {} category in current database**",
                category.key()
            )?;
            return Ok(out);
        }

        writeln!(out, "📋 **{label} STOCKS:**\n")?;
        for (i, symbol) in stocks.iter().take(MAX_CATEGORY_LISTING).enumerate() {
            writeln!(out, "{}. **{symbol}**", i + 1)?;
        }
        if stocks.len() > MAX_CATEGORY_LISTING {
            write!(
                out,
                "\n... and {} more stocks!\n💡 Use search_stocks to find specific stocks in this category\n",
                stocks.len() - MAX_CATEGORY_LISTING
            )?;
        }
        write!(
            out,
            "\n{DETAIL_TIP}\n\n📈 **Investment Profile**: {}",
            category.profile()
        )?;
        Ok(out)
    }
}

#[async_trait]
impl Tool for MarketCapStocksTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self.run(params).unwrap_or_else(|e| {
            report_failure(self.name(), "Error getting market cap stocks", &e)
        }))
    }

    fn name(&self) -> &str {
        "get_stocks_by_market_cap"
    }

    fn description(&self) -> &str {
        "Get stocks filtered by market cap category"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Market cap category (large_cap, mid_cap, small_cap)"
                }
            },
            "required": ["category"]
        })
    }
}

/// `get_supported_stocks`: the catalog, first 50 by default
pub struct SupportedStocksTool {
    ctx: ToolContext,
}

#[derive(Debug, Default, Deserialize)]
struct SupportedParams {
    #[serde(default)]
    show_all: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

impl SupportedStocksTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    fn run(&self, params: Value) -> Result<String> {
        let params: SupportedParams = parse_params(params)?;
        let symbols = self.ctx.resolver.catalog().symbols();
        let total = symbols.len();

        let show_all = params
            .show_all
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("more"));
        let limit = if show_all {
            total
        } else {
            params
                .limit
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_LIST_LIMIT)
        };

        let mut out = format!("📋 **SUPPORTED STOCKS** ({total} symbols total)\n");
        out.push_str(&updated_line());
        writeln!(out, "\n🔥 **Showing first {} stocks:**\n", limit.min(total))?;
        for (i, symbol) in symbols.iter().take(limit).enumerate() {
            writeln!(out, "{}. {symbol}", i + 1)?;
        }

        if total > limit {
            write!(
                out,
                "\n... and {} more stocks!\n\
                 💡 Use search_stocks with industry keywords for targeted search:\n\
                 • \"BANKING\" - Banking sector stocks\n\
                 • \"IT\" - Technology stocks\n\
                 • \"PHARMA\" - Pharmaceutical stocks\n\
                 • \"AUTO\" - Automotive stocks\n\
                 • Or search by company name like \"TATA\", \"RELIANCE\"\n",
                total - limit
            )?;
        }
        write!(out, "\n{DETAIL_TIP}")?;
        Ok(out)
    }
}

#[async_trait]
impl Tool for SupportedStocksTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self.run(params).unwrap_or_else(|e| {
            report_failure(self.name(), "Error listing supported stocks", &e)
        }))
    }

    fn name(&self) -> &str {
        "get_supported_stocks"
    }

    fn description(&self) -> &str {
        "Get list of all supported stock symbols"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "show_all": {
                    "type": "string",
                    "description": "Set to \"more\" to see all stocks instead of just first 50"
                },
                "limit": {
                    "type": "integer",
                    "description": "Number of symbols to list (default: 50)"
                }
            }
        })
    }
}
