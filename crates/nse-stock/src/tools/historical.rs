//! Historical price and moving-average analysis over `/historical_data`

use super::{SYMBOL_HINT, ToolContext, parse_params, report_failure};
use crate::api::{HistoricalFilter, HistoricalPeriod};
use crate::error::Result;
use crate::format::{NA, format_currency, ist_now, parse_number, sign_prefix};
use crate::report::{
    FundamentalSection, Metadata, MetricValue, StructuredAnalysis, Summary, TechnicalSection,
};
use crate::signals::{recommend, technical_signals};
use async_trait::async_trait;
use nse_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
struct HistoricalParams {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    filter: Option<String>,
}

/// One `[date, value]` series from the `datasets` array
struct Series<'a> {
    points: &'a [Value],
}

impl<'a> Series<'a> {
    fn find(doc: &'a Value, metric: &str) -> Option<Self> {
        doc.get("datasets")?
            .as_array()?
            .iter()
            .find(|d| d.get("metric").and_then(Value::as_str) == Some(metric))
            .and_then(|d| d.get("values"))
            .and_then(Value::as_array)
            .map(|points| Series { points })
    }

    fn date(point: &Value) -> String {
        match point.get(0) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => NA.to_string(),
        }
    }

    fn value(point: &Value) -> Option<f64> {
        point.get(1).and_then(parse_number).filter(|v| v.is_finite())
    }

    fn last_value(&self) -> Option<f64> {
        self.points.last().and_then(Self::value)
    }
}

fn trend(percent: f64) -> &'static str {
    if percent > 10.0 {
        "Strong Uptrend"
    } else if percent > 0.0 {
        "Uptrend"
    } else if percent > -10.0 {
        "Downtrend"
    } else {
        "Strong Downtrend"
    }
}

fn valuation(percent: f64) -> &'static str {
    if percent > 20.0 {
        "Potentially Overvalued"
    } else if percent < -20.0 {
        "Potentially Undervalued"
    } else {
        "Fair Value Range"
    }
}

fn growth_prospects(percent: f64) -> &'static str {
    if percent > 15.0 {
        "Strong growth trajectory"
    } else if percent > 0.0 {
        "Positive momentum"
    } else if percent > -15.0 {
        "Challenging phase"
    } else {
        "Significant concerns"
    }
}

/// Build the historical analysis, or `None` when the price series is unusable
pub fn historical_analysis(
    symbol: &str,
    period: HistoricalPeriod,
    doc: &Value,
) -> Result<Option<StructuredAnalysis>> {
    let Some(prices) = Series::find(doc, "Price") else {
        return Ok(None);
    };
    let (Some(first), Some(last)) = (prices.points.first(), prices.points.last()) else {
        return Ok(None);
    };
    let (Some(old_price), Some(current)) = (Series::value(first), Series::value(last)) else {
        return Ok(None);
    };
    // A zero starting price has no percent change
    if old_price == 0.0 {
        return Ok(None);
    }

    let change = current - old_price;
    let percent = change / old_price * 100.0;
    let dma50 = Series::find(doc, "DMA50").and_then(|s| s.last_value());
    let dma200 = Series::find(doc, "DMA200").and_then(|s| s.last_value());

    let signals = technical_signals(current, dma50, dma200)?;
    let recommendation = recommend(percent, &signals)?;

    let range = format!("{} to {}", Series::date(first), Series::date(last));
    let setup = signals
        .first()
        .map_or_else(|| "Neutral".to_string(), |s| s.headline());
    let key_insights = vec![
        format!(
            "{period} performance: {}{percent:.2}% ({}{})",
            sign_prefix(percent),
            sign_prefix(change),
            format_currency(change)
        ),
        format!("Current trading at ₹{current:.2}"),
        format!("Price range: {range}"),
        format!("Technical setup: {setup}"),
    ];

    let average_volume = Series::find(doc, "Volume")
        .filter(|s| !s.points.is_empty())
        .map(|s| {
            let total: f64 = s.points.iter().filter_map(Series::value).sum();
            MetricValue::Number((total / s.points.len() as f64).round())
        })
        .unwrap_or_else(|| MetricValue::from(NA));
    let dma_metric = |v: Option<f64>| {
        v.filter(|v| *v != 0.0)
            .map_or_else(|| MetricValue::from(NA), MetricValue::Number)
    };

    let mut analysis = StructuredAnalysis {
        metadata: Metadata {
            symbol: symbol.to_string(),
            timestamp: ist_now(),
            analysis_type: format!("Historical Technical Analysis ({period})"),
            data_source: "Indian Stock API - Historical Data".to_string(),
        },
        summary: Summary {
            recommendation: Some(recommendation),
            key_insights,
        },
        metrics: Vec::new(),
        technical: Some(TechnicalSection {
            trend: trend(percent).to_string(),
            signals: signals.iter().map(|s| s.text.clone()).collect(),
            support: dma200,
            resistance: dma50.zip(dma200).map(|(a, b)| a.max(b)),
        }),
        fundamental: Some(FundamentalSection {
            valuation: valuation(percent).to_string(),
            financial_health: "Based on price performance - detailed analysis pending".to_string(),
            growth_prospects: growth_prospects(percent).to_string(),
        }),
    };
    analysis
        .metric("current_price", current)
        .metric("period_start_price", old_price)
        .metric("absolute_change", change)
        .metric("percent_change", format!("{percent:.2}%"))
        .metric("dma_50", dma_metric(dma50))
        .metric("dma_200", dma_metric(dma200))
        .metric("period_range", range)
        .metric("data_points", prices.points.len() as f64)
        .metric("average_volume", average_volume);

    Ok(Some(analysis))
}

/// `get_historical_analysis`
pub struct HistoricalAnalysisTool {
    ctx: ToolContext,
}

impl HistoricalAnalysisTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    async fn run(&self, params: Value) -> Result<String> {
        let params: HistoricalParams = parse_params(params)?;
        let symbol = self.ctx.require_symbol(params.symbol.as_deref(), SYMBOL_HINT)?;
        let period: HistoricalPeriod = match params.period.as_deref() {
            Some(p) if !p.trim().is_empty() => p.parse()?,
            _ => HistoricalPeriod::default(),
        };
        let filter: HistoricalFilter = match params.filter.as_deref() {
            Some(f) if !f.trim().is_empty() => f.parse()?,
            _ => HistoricalFilter::default(),
        };

        let doc = self.ctx.source.historical_data(&symbol, period, filter).await?;
        Ok(match historical_analysis(&symbol, period, &doc)? {
            Some(analysis) => analysis.render(),
            None => format!(
                "❌ **No historical data available for {symbol}**\nTry different period: {}",
                HistoricalPeriod::VALUES
            ),
        })
    }
}

#[async_trait]
impl Tool for HistoricalAnalysisTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self.run(params).await.unwrap_or_else(|e| {
            report_failure(self.name(), "**Error fetching historical analysis**", &e)
        }))
    }

    fn name(&self) -> &str {
        "get_historical_analysis"
    }

    fn description(&self) -> &str {
        "Get comprehensive historical price and technical analysis for a stock"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock symbol (e.g., RELIANCE, TCS)"
                },
                "period": {
                    "type": "string",
                    "description": format!("Time period: {} (default: 1yr)", HistoricalPeriod::VALUES)
                },
                "filter": {
                    "type": "string",
                    "description": format!("Data filter: {} (default: price)", HistoricalFilter::VALUES)
                }
            },
            "required": ["symbol"]
        })
    }
}
