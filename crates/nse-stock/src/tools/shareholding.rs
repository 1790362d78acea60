//! Shareholding pattern tools over `/historical_stats`

use super::{
    SYMBOL_HINT, StatsTable, SymbolParams, ToolContext, parse_params, report_failure, symbol_schema,
    tail, updated_line,
};
use crate::api::StatsCategory;
use crate::error::Result;
use crate::format::{NA, group_thousands, number, sign_prefix};
use async_trait::async_trait;
use nse_tools::Tool;
use serde_json::Value;
use std::fmt::{self, Write};

/// Reporting frequency of a shareholding pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn category(self) -> StatsCategory {
        match self {
            Frequency::Quarterly => StatsCategory::ShareholdingQuarterly,
            Frequency::Yearly => StatsCategory::ShareholdingYearly,
        }
    }

    /// Number of most recent periods shown
    pub fn window(self) -> usize {
        match self {
            Frequency::Quarterly => 6,
            Frequency::Yearly => 5,
        }
    }

    fn adjective(self) -> &'static str {
        match self {
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }
}

const HOLDERS: [(&str, &str, &str); 5] = [
    ("🏛️", "Promoters", "Promoters"),
    ("🌍", "FIIs", "FIIs"),
    ("🇮🇳", "DIIs", "DIIs"),
    ("🏛️", "Government", "Government"),
    ("👥", "Public", "Public"),
];

/// Change in a holder's share between two periods
fn shift(t: &StatsTable<'_>, row: &str, from: &str, to: &str) -> Option<f64> {
    Some(t.num(row, to)? - t.num(row, from)?)
}

fn signed(change: Option<f64>) -> String {
    change.map_or_else(
        || NA.to_string(),
        |c| format!("{}{c:.2}", sign_prefix(c)),
    )
}

/// Render a shareholding report for `symbol`
pub fn render_shareholding(frequency: Frequency, symbol: &str, doc: &Value) -> Result<String> {
    let mut out = match frequency {
        Frequency::Quarterly => format!("📊 **QUARTERLY SHAREHOLDING PATTERN: {symbol}**\n"),
        Frequency::Yearly => format!("📈 **YEARLY SHAREHOLDING PATTERN: {symbol}**\n"),
    };
    out.push_str(&updated_line());
    out.push('\n');

    let adjective = frequency.adjective();
    let Some(rows) = doc.as_object() else {
        write!(out, "❌ **No {adjective} shareholding data available for {symbol}**")?;
        return Ok(out);
    };
    let table = StatsTable::new(rows);
    let all_periods = table.periods("Promoters");
    let periods = tail(&all_periods, frequency.window());
    if periods.is_empty() {
        write!(out, "❌ **No {adjective} shareholding periods found for {symbol}**")?;
        return Ok(out);
    }

    let holders_label = match frequency {
        Frequency::Quarterly => "Total Shareholders",
        Frequency::Yearly => "Shareholders",
    };
    write_periods(&mut out, &table, periods, holders_label)?;

    if let [first, .., last] = periods {
        match frequency {
            Frequency::Quarterly => quarterly_changes(&mut out, &table, periods, last),
            Frequency::Yearly => yearly_trends(&mut out, &table, periods.len(), first, last),
        }?;
    }
    Ok(out)
}

fn write_periods(
    out: &mut String,
    t: &StatsTable<'_>,
    periods: &[&str],
    holders_label: &str,
) -> fmt::Result {
    for period in periods {
        writeln!(out, "📅 **{period}**")?;
        for (icon, label, row) in HOLDERS {
            writeln!(out, "{icon} **{label}**: {}%", number(t.num(row, period).unwrap_or(0.0)))?;
        }
        let holders = t.num("No. of Shareholders", period).unwrap_or(0.0);
        writeln!(out, "📊 **{holders_label}**: {}", group_thousands(holders))?;
        writeln!(out)?;
    }
    Ok(())
}

fn quarterly_changes(out: &mut String, t: &StatsTable<'_>, periods: &[&str], latest: &str) -> fmt::Result {
    let previous = periods[periods.len() - 2];
    writeln!(out, "📈 **QUARTERLY CHANGES**:")?;
    writeln!(out, "🔹 Promoter Change: {}%", signed(shift(t, "Promoters", previous, latest)))?;
    writeln!(out, "🔹 FII Change: {}%", signed(shift(t, "FIIs", previous, latest)))?;
    writeln!(out, "🔹 DII Change: {}%", signed(shift(t, "DIIs", previous, latest)))?;

    let strong = t.num("DIIs", latest).is_some_and(|d| d > 15.0)
        && t.num("Promoters", latest).is_some_and(|p| p > 45.0);
    let quality = if strong { "✅ Strong" } else { "⚠️ Monitor" };
    write!(out, "🔹 Current Shareholding Quality: {quality}")
}

fn yearly_trends(
    out: &mut String,
    t: &StatsTable<'_>,
    years: usize,
    first: &str,
    last: &str,
) -> fmt::Result {
    let promoter_trend = shift(t, "Promoters", first, last);
    writeln!(out, "📊 **LONG-TERM TRENDS** ({years} Years):")?;
    writeln!(out, "🔹 Promoter Trend: {}%", signed(promoter_trend))?;
    writeln!(out, "🔹 FII Trend: {}%", signed(shift(t, "FIIs", first, last)))?;
    writeln!(out, "🔹 DII Trend: {}%", signed(shift(t, "DIIs", first, last)))?;

    let stability = if promoter_trend.is_some_and(|p| p.abs() < 2.0) {
        "✅ Stable"
    } else {
        "⚠️ Changing"
    };
    write!(out, "🔹 Ownership Stability: {stability}")
}

/// `get_shareholding_quarterly` / `get_shareholding_yearly`
pub struct ShareholdingTool {
    ctx: ToolContext,
    frequency: Frequency,
}

impl ShareholdingTool {
    pub fn new(ctx: ToolContext, frequency: Frequency) -> Self {
        Self { ctx, frequency }
    }

    async fn run(&self, params: Value) -> Result<String> {
        let params: SymbolParams = parse_params(params)?;
        let symbol = self.ctx.require_symbol(params.symbol.as_deref(), SYMBOL_HINT)?;
        let doc = self
            .ctx
            .source
            .historical_stats(&symbol, self.frequency.category())
            .await?;
        render_shareholding(self.frequency, &symbol, &doc)
    }
}

#[async_trait]
impl Tool for ShareholdingTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        let context = match self.frequency {
            Frequency::Quarterly => "**Error fetching quarterly shareholding pattern**",
            Frequency::Yearly => "**Error fetching yearly shareholding pattern**",
        };
        Ok(self
            .run(params)
            .await
            .unwrap_or_else(|e| report_failure(self.name(), context, &e)))
    }

    fn name(&self) -> &str {
        match self.frequency {
            Frequency::Quarterly => "get_shareholding_quarterly",
            Frequency::Yearly => "get_shareholding_yearly",
        }
    }

    fn description(&self) -> &str {
        match self.frequency {
            Frequency::Quarterly => "Get quarterly shareholding pattern for a stock",
            Frequency::Yearly => "Get yearly shareholding pattern for a stock",
        }
    }

    fn input_schema(&self) -> Value {
        symbol_schema("RELIANCE, TCS")
    }
}
