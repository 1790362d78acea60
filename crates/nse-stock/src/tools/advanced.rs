//! Analyst prompt built around a raw `/stock` document

use super::{SYMBOL_HINT, SymbolParams, ToolContext, parse_params, report_failure, symbol_schema};
use crate::error::{Result, StockError};
use async_trait::async_trait;
use minijinja::{Environment, context};
use nse_tools::Tool;
use serde_json::Value;

const ANALYSIS_TEMPLATE: &str = r#"# 🎯 ADVANCED STOCK ANALYSIS: {{ symbol }}

## 📊 Raw Data for LLM Analysis

COMPREHENSIVE STOCK ANALYSIS FOR {{ symbol }}:

{{ data }}

FINANCIAL EXPERT ANALYSIS PROMPT:

You are a SENIOR INVESTMENT ANALYST with 20+ years of experience in Indian stock markets. Your expertise spans:
- Technical Analysis (Moving Averages, Support/Resistance, Chart Patterns)
- Fundamental Analysis (P/E, P/B, ROE, Debt-to-Equity, Cash Flow)
- Market Sentiment Analysis (Sector trends, Peer comparison, News impact)
- Risk Management (Stop-loss, Position sizing, Risk-reward ratios)

ANALYSIS FRAMEWORK - Apply ALL these steps systematically:
{% for section in framework %}
{{ section.title }}:
{%- for item in section.items %}
- {{ item }}
{%- endfor %}
{% endfor %}
PRESENTATION REQUIREMENTS:
- Use relevant emojis for visual clarity
- Provide specific price levels (not ranges)
- Include percentage calculations for all targets
- Add timeline expectations for each recommendation
- Structure as: Executive Summary → Detailed Analysis → Action Plan

CRITICAL: Base ALL recommendations on actual data provided. Avoid generic advice. Be specific with numbers, dates, and actionable steps.

---

**Note**: This prompt is meant to be handed to a financial LLM for the final analysis.

The prompt includes:
{%- for section in framework %}
- {{ section.summary }}
{%- endfor %}"#;

struct FrameworkSection {
    title: &'static str,
    summary: &'static str,
    items: &'static [&'static str],
}

const FRAMEWORK: [FrameworkSection; 6] = [
    FrameworkSection {
        title: "🎯 MARKET CONTEXT ANALYSIS",
        summary: "🎯 Market Context Analysis",
        items: &[
            "Extract overall market sentiment from the data",
            "Identify sector-specific trends affecting this stock",
            "Compare with peer performance and industry benchmarks",
            "Assess macroeconomic factors impacting the stock",
        ],
    },
    FrameworkSection {
        title: "📊 COMPREHENSIVE STOCK EVALUATION",
        summary: "📊 Comprehensive Stock Evaluation",
        items: &[
            "Current price vs 52-week high/low (position in range)",
            "Technical indicators: All moving averages (5,10,20,50,100,300 day)",
            "Volume analysis and price momentum",
            "Support and resistance levels identification",
        ],
    },
    FrameworkSection {
        title: "💰 FUNDAMENTAL STRENGTH ASSESSMENT",
        summary: "💰 Fundamental Strength Assessment",
        items: &[
            "Financial health: Revenue growth, profit margins, cash flow",
            "Valuation metrics: P/E ratio vs industry average, P/B ratio",
            "Balance sheet strength: Debt levels, working capital",
            "Management quality indicators from recent news/developments",
        ],
    },
    FrameworkSection {
        title: "📈 PRECISE ENTRY/EXIT STRATEGY",
        summary: "📈 Precise Entry/Exit Strategy",
        items: &[
            "Provide 3 specific entry points with rationale:\n  * Aggressive entry (current levels)\n  * Conservative entry (support levels)\n  * Deep value entry (major correction levels)",
            "Define 3 target levels with profit booking percentages",
            "Set strict stop-loss levels with risk percentages",
            "Specify timeline for each strategy (days/weeks/months)",
        ],
    },
    FrameworkSection {
        title: "⚠️ RISK ASSESSMENT",
        summary: "⚠️ Risk Assessment",
        items: &[
            "Identify top 3 risks (technical, fundamental, market)",
            "Calculate risk-reward ratios for each strategy",
            "Provide position sizing recommendations",
            "Include worst-case scenario planning",
        ],
    },
    FrameworkSection {
        title: "🔥 ACTIONABLE RECOMMENDATIONS",
        summary: "🔥 Actionable Recommendations",
        items: &[
            "Clear BUY/SELL/HOLD recommendation with confidence level",
            "Specific investment amount allocation strategy",
            "Daily/weekly monitoring checklist",
            "Key trigger points for strategy modification",
        ],
    },
];

/// Render the analyst prompt for a `/stock` document
pub fn render_analysis_prompt(symbol: &str, doc: &Value) -> Result<String> {
    let data = serde_json::to_string_pretty(doc)?;
    let framework: Vec<minijinja::Value> = FRAMEWORK
        .iter()
        .map(|s| {
            context! {
                title => s.title,
                summary => s.summary,
                items => s.items,
            }
        })
        .collect();

    let env = Environment::new();
    Ok(env.render_str(
        ANALYSIS_TEMPLATE,
        context! { symbol, data, framework },
    )?)
}

/// `get_advanced_stock_analysis`
pub struct AdvancedAnalysisTool {
    ctx: ToolContext,
}

impl AdvancedAnalysisTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    async fn run(&self, params: Value) -> Result<String> {
        let params: SymbolParams = parse_params(params)?;
        let symbol = self.ctx.require_symbol(params.symbol.as_deref(), SYMBOL_HINT)?;
        let doc = self.ctx.source.stock(&symbol).await?;
        if !doc.is_object() {
            return Err(StockError::NotFound(format!(
                "Unable to fetch data for {symbol}"
            )));
        }
        render_analysis_prompt(&symbol, &doc)
    }
}

#[async_trait]
impl Tool for AdvancedAnalysisTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self
            .run(params)
            .await
            .unwrap_or_else(|e| report_failure(self.name(), "Error in advanced analysis", &e)))
    }

    fn name(&self) -> &str {
        "get_advanced_stock_analysis"
    }

    fn description(&self) -> &str {
        "Get institutional-grade financial analysis using professional LLM framework - provides comprehensive investment insights, entry/exit strategies, and risk assessment"
    }

    fn input_schema(&self) -> Value {
        symbol_schema("RELIANCE, TCS, INFY")
    }
}
