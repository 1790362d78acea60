//! Real-time quote tools

use super::{SymbolParams, ToolContext, parse_params, report_failure, symbol_schema, updated_line};
use crate::error::{Result, StockError};
use crate::format::{
    NA, display_or_na, format_currency, format_currency_value, ist_now, parse_number,
};
use crate::report::{
    FundamentalSection, Metadata, MetricValue, StructuredAnalysis, Summary, TechnicalSection,
};
use crate::signals::recommend;
use async_trait::async_trait;
use futures::future::join_all;
use nse_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// Most symbols `get_multiple_stocks` fetches per call
pub const MAX_MULTIPLE_SYMBOLS: usize = 5;

const STOCK_DATA_HINT: &str =
    "Use get_supported_stocks to see available symbols or try variations like company names.";

/// `get_stock_data`: structured real-time analysis of one stock
pub struct StockDataTool {
    ctx: ToolContext,
}

impl StockDataTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    async fn run(&self, params: Value) -> Result<String> {
        let params: SymbolParams = parse_params(params)?;
        let symbol = self
            .ctx
            .require_symbol(params.symbol.as_deref(), STOCK_DATA_HINT)?;

        let doc = self.ctx.source.stock(&symbol).await?;
        Ok(stock_analysis(&symbol, &doc)?.render())
    }
}

/// Build the real-time analysis from a `/stock` document
fn stock_analysis(symbol: &str, doc: &Value) -> Result<StructuredAnalysis> {
    if !doc.is_object() {
        return Err(StockError::NotFound(format!(
            "No data available for symbol: {symbol}"
        )));
    }
    let details = doc.get("stockDetailsReusableData");
    let field = |key: &str| details.and_then(|d| d.get(key));
    let num = |key: &str| {
        field(key)
            .and_then(parse_number)
            .filter(|v| v.is_finite())
    };

    let change_pct = num("percentChange").unwrap_or(0.0);
    let price = num("price").unwrap_or(0.0);
    let close = num("close").unwrap_or(price);
    let net_change = num("netChange")
        .filter(|v| *v != 0.0)
        .unwrap_or(price - close);

    // Session momentum alone never produces enough signals to leave HOLD
    let recommendation = recommend(change_pct, &[])?;

    let direction = if change_pct > 0.0 {
        "upward"
    } else if change_pct < 0.0 {
        "downward"
    } else {
        "sideways"
    };
    let gain_or_loss = if change_pct > 0.0 { "gain" } else { "loss" };
    let key_insights = vec![
        format!("Current price trending {direction}"),
        format!("{:.2}% {gain_or_loss} in current session", change_pct.abs()),
        format!("Market Cap: ₹{} crores", display_or_na(field("marketCap"))),
        format!(
            "Price range: {} - {}",
            format_currency(num("low").unwrap_or(0.0)),
            format_currency(num("high").unwrap_or(0.0))
        ),
    ];

    let day_high = num("high").filter(|v| *v != 0.0).unwrap_or(price);
    let of_high = price / day_high * 100.0;
    let of_high = if of_high.is_finite() {
        format!("{of_high:.1}")
    } else {
        NA.to_string()
    };

    let trend = if change_pct > 5.0 {
        "Strong Uptrend"
    } else if change_pct > 0.0 {
        "Positive"
    } else if change_pct > -5.0 {
        "Negative"
    } else {
        "Strong Downtrend"
    };

    let pe = field("pPerEBasicExcludingExtraordinaryItemsTTM");
    let valuation = if display_or_na(pe) == NA {
        NA
    } else {
        match pe.and_then(parse_number) {
            Some(v) if v > 25.0 => "Expensive",
            Some(v) if v > 15.0 => "Fair",
            _ => "Undervalued",
        }
    };

    let growth = if change_pct > 10.0 {
        "Strong growth momentum"
    } else if change_pct > 0.0 {
        "Positive outlook"
    } else {
        "Cautious outlook"
    };

    let company = match display_or_na(field("companyName")) {
        name if name == NA => symbol.to_string(),
        name => name,
    };

    let mut analysis = StructuredAnalysis {
        metadata: Metadata {
            symbol: symbol.to_string(),
            timestamp: ist_now(),
            analysis_type: "Real-time Stock Analysis".to_string(),
            data_source: "Indian Stock API".to_string(),
        },
        summary: Summary {
            recommendation: Some(recommendation),
            key_insights,
        },
        metrics: Vec::new(),
        technical: Some(TechnicalSection {
            trend: trend.to_string(),
            signals: vec![
                if change_pct > 0.0 {
                    "🟢 Positive momentum".to_string()
                } else {
                    "🔴 Negative momentum".to_string()
                },
                format!("📊 Trading at {of_high}% of day high"),
                format!(
                    "📈 YTD Performance: {}%",
                    display_or_na(field("priceYTDPricePercentChange"))
                ),
            ],
            support: None,
            resistance: None,
        }),
        fundamental: Some(FundamentalSection {
            valuation: valuation.to_string(),
            financial_health: "Data pending historical analysis".to_string(),
            growth_prospects: growth.to_string(),
        }),
    };

    let price_change = if net_change != 0.0 && net_change.is_finite() {
        MetricValue::Number(net_change)
    } else {
        MetricValue::from(NA)
    };
    analysis
        .metric("current_price", price)
        .metric("price_change", price_change)
        .metric(
            "percent_change",
            format!("{}%", display_or_na(field("percentChange"))),
        )
        .metric("day_high", MetricValue::or_na(field("high")))
        .metric("day_low", MetricValue::or_na(field("low")))
        .metric("volume", NA)
        .metric("company_name", company)
        .metric("market_cap", MetricValue::or_na(field("marketCap")))
        .metric("pe_ratio", MetricValue::or_na(pe));

    Ok(analysis)
}

#[async_trait]
impl Tool for StockDataTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self
            .run(params)
            .await
            .unwrap_or_else(|e| report_failure(self.name(), "Error getting stock data", &e)))
    }

    fn name(&self) -> &str {
        "get_stock_data"
    }

    fn description(&self) -> &str {
        "Get detailed information for a specific stock symbol"
    }

    fn input_schema(&self) -> Value {
        symbol_schema("RELIANCE, TCS, INFY")
    }
}

/// `symbols` given either as `"A,B,C"` or as `["A", "B", "C"]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SymbolList {
    Csv(String),
    List(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
struct MultipleParams {
    #[serde(default)]
    symbols: Option<SymbolList>,
}

/// `get_multiple_stocks`: one quote line per symbol
pub struct MultipleStocksTool {
    ctx: ToolContext,
}

impl MultipleStocksTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Resolved (or upper-cased raw) symbols, blanks dropped, capped
    fn symbols(&self, list: SymbolList) -> Vec<String> {
        let raw: Vec<String> = match list {
            SymbolList::Csv(csv) => csv.split(',').map(str::to_string).collect(),
            SymbolList::List(list) => list,
        };
        raw.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(MAX_MULTIPLE_SYMBOLS)
            .map(|s| {
                self.ctx
                    .resolver
                    .resolve(s)
                    .map_or_else(|| s.to_uppercase(), str::to_string)
            })
            .collect()
    }

    async fn run(&self, params: Value) -> Result<String> {
        let params: MultipleParams = parse_params(params)?;
        let symbols = params
            .symbols
            .map(|list| self.symbols(list))
            .unwrap_or_default();
        if symbols.is_empty() {
            return Err(StockError::InvalidInput(
                "Symbols parameter is required".to_string(),
            ));
        }

        let source = &self.ctx.source;
        let docs = join_all(symbols.iter().map(|s| source.stock(s))).await;

        let mut out = String::from("📈 **MULTIPLE STOCKS ANALYSIS**\n");
        out.push_str(&updated_line());
        out.push('\n');
        for (symbol, doc) in symbols.iter().zip(docs) {
            match doc {
                Ok(doc) => {
                    let details = doc.get("stockDetailsReusableData");
                    let field = |key: &str| details.and_then(|d| d.get(key));
                    out.push_str(&format!(
                        "🔹 **{symbol}**: {} ({}%)\n",
                        format_currency_value(field("price")),
                        display_or_na(field("percentChange"))
                    ));
                }
                Err(e) => {
                    debug!(symbol = %symbol, error = %e, "Quote unavailable");
                    out.push_str(&format!("🔹 **{symbol}**: Data not available\n"));
                }
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl Tool for MultipleStocksTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self.run(params).await.unwrap_or_else(|e| {
            report_failure(self.name(), "Error getting multiple stocks data", &e)
        }))
    }

    fn name(&self) -> &str {
        "get_multiple_stocks"
    }

    fn description(&self) -> &str {
        "Get data for multiple stock symbols at once"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbols": {
                    "type": "string",
                    "description": "Comma-separated stock symbols (e.g., \"RELIANCE,TCS,INFY\") or array of symbols"
                }
            },
            "required": ["symbols"]
        })
    }
}
