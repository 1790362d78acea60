//! Financial statement tools over `/historical_stats`
//!
//! Upstream statements are objects of row name to `{period: value}` maps,
//! with periods in chronological document order.

use super::{
    SYMBOL_HINT, StatsTable, SymbolParams, ToolContext, parse_params, report_failure, symbol_schema,
    tail, updated_line,
};
use crate::api::StatsCategory;
use crate::error::Result;
use crate::format::{NA, display_or_na, format_currency, number, plain};
use async_trait::async_trait;
use nse_tools::Tool;
use serde_json::Value;
use std::fmt::{self, Write};

const CRORE: f64 = 10_000_000.0;

/// The five statement reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Quarterly,
    Yearly,
    BalanceSheet,
    CashFlow,
    Ratios,
}

impl Statement {
    /// All statements in listing order
    pub const ALL: [Statement; 5] = [
        Statement::Quarterly,
        Statement::Yearly,
        Statement::BalanceSheet,
        Statement::CashFlow,
        Statement::Ratios,
    ];

    pub fn category(self) -> StatsCategory {
        match self {
            Statement::Quarterly => StatsCategory::QuarterResults,
            Statement::Yearly => StatsCategory::YoyResults,
            Statement::BalanceSheet => StatsCategory::BalanceSheet,
            Statement::CashFlow => StatsCategory::CashFlow,
            Statement::Ratios => StatsCategory::Ratios,
        }
    }

    /// Number of most recent periods shown
    pub fn window(self) -> usize {
        match self {
            Statement::Quarterly => 8,
            Statement::Yearly => 6,
            Statement::BalanceSheet => 3,
            Statement::CashFlow | Statement::Ratios => 4,
        }
    }

    /// Row whose period keys drive the report
    fn anchor(self) -> &'static str {
        match self {
            Statement::Quarterly | Statement::Yearly => "Sales",
            Statement::BalanceSheet => "Total Assets",
            Statement::CashFlow => "Cash from Operating Activity",
            Statement::Ratios => "Debtor Days",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Statement::Quarterly => "📈 **QUARTERLY RESULTS",
            Statement::Yearly => "📊 **YEARLY RESULTS (YOY)",
            Statement::BalanceSheet => "💼 **BALANCE SHEET",
            Statement::CashFlow => "💰 **CASH FLOW STATEMENT",
            Statement::Ratios => "📊 **FINANCIAL RATIOS",
        }
    }

    /// Subject used in "no data" messages
    fn subject(self) -> &'static str {
        match self {
            Statement::Quarterly => "quarterly",
            Statement::Yearly => "yearly",
            Statement::BalanceSheet => "balance sheet",
            Statement::CashFlow => "cash flow",
            Statement::Ratios => "financial ratios",
        }
    }

    fn error_context(self) -> &'static str {
        match self {
            Statement::Quarterly => "**Error fetching quarterly results**",
            Statement::Yearly => "**Error fetching yearly results**",
            Statement::BalanceSheet => "**Error fetching balance sheet**",
            Statement::CashFlow => "**Error fetching cash flow statement**",
            Statement::Ratios => "**Error fetching financial ratios**",
        }
    }
}

/// Percent change with a positive base, to two decimals
fn growth(current: f64, previous: Option<f64>) -> String {
    match previous {
        Some(prev) if prev > 0.0 => format!("{:.2}", (current - prev) / prev * 100.0),
        _ => NA.to_string(),
    }
}

/// Finite ratio to the given precision
fn ratio(value: f64, precision: usize) -> String {
    if value.is_finite() {
        format!("{value:.precision$}")
    } else {
        NA.to_string()
    }
}

/// `₹12,34,00,000.00 (₹1234 Cr)` from a value in crores
fn crores_rounded(value: Option<f64>) -> String {
    let whole = value.map_or_else(|| NA.to_string(), |v| format!("{v:.0}"));
    format!("{} (₹{whole} Cr)", format_currency(value.unwrap_or(0.0) * CRORE))
}

/// Same as [`crores_rounded`] but with the raw crore figure
fn crores_raw(table: &StatsTable<'_>, row: &str, period: &str) -> String {
    let amount = table
        .num(row, period)
        .map_or_else(|| NA.to_string(), |v| format_currency(v * CRORE));
    format!("{amount} (₹{} Cr)", plain(table.value(row, period)))
}

/// Working-capital efficiency grade from the cash conversion cycle in days
pub fn efficiency_grade(cash_conversion_days: Option<f64>) -> &'static str {
    match cash_conversion_days {
        Some(days) if days < 0.0 => "✅ Excellent",
        Some(days) if days < 30.0 => "✅ Good",
        _ => "⚠️ Needs Improvement",
    }
}

/// Render a statement report for `symbol`
pub fn render_statement(statement: Statement, symbol: &str, doc: &Value) -> Result<String> {
    let mut out = format!("{}: {symbol}**\n", statement.heading());
    out.push_str(&updated_line());
    out.push('\n');

    let subject = statement.subject();
    let Some(rows) = doc.as_object() else {
        write!(out, "❌ **No {subject} data available for {symbol}**")?;
        return Ok(out);
    };
    let table = StatsTable::new(rows);
    let all_periods = table.periods(statement.anchor());
    let periods = tail(&all_periods, statement.window());

    if periods.is_empty() {
        match statement {
            Statement::Quarterly | Statement::BalanceSheet => {
                write!(out, "❌ **No {subject} data available for {symbol}**")
            }
            _ => write!(out, "❌ **No {subject} data periods found for {symbol}**"),
        }?;
        return Ok(out);
    }

    match statement {
        Statement::Quarterly => quarterly(&mut out, &table, periods),
        Statement::Yearly => yearly(&mut out, &table, &all_periods, periods),
        Statement::BalanceSheet => balance_sheet(&mut out, &table, periods),
        Statement::CashFlow => cash_flow(&mut out, &table, periods),
        Statement::Ratios => ratios(&mut out, &table, periods),
    }?;
    Ok(out)
}

fn quarterly(out: &mut String, t: &StatsTable<'_>, quarters: &[&str]) -> fmt::Result {
    for (i, q) in quarters.iter().enumerate() {
        writeln!(out, "📊 **{q}**")?;
        writeln!(out, "💰 **Revenue**: {}", crores_rounded(t.num("Sales", q)))?;
        writeln!(out, "💵 **Net Profit**: {}", crores_rounded(t.num("Net Profit", q)))?;
        writeln!(out, "📈 **EPS**: ₹{}", display_or_na(t.value("EPS in Rs", q)))?;
        writeln!(out, "📊 **OPM**: {}%", display_or_na(t.value("OPM %", q)))?;
        // Growth is only shown within the displayed window
        if i > 0 {
            let current = t.num("Sales", q).unwrap_or(0.0);
            let previous = Some(t.num("Sales", quarters[i - 1]).unwrap_or(0.0));
            writeln!(out, "🔄 **QoQ Growth**: {}%", growth(current, previous))?;
        }
        writeln!(out)?;
    }

    let latest = quarters[quarters.len() - 1];
    let whole = |row: &str| t.num(row, latest).map_or_else(|| NA.to_string(), |v| format!("{v:.0}"));
    writeln!(out, "📝 **Key Insights**:")?;
    writeln!(out, "• Latest Quarter Revenue: ₹{} Crores", whole("Sales"))?;
    writeln!(out, "• Latest Quarter Profit: ₹{} Crores", whole("Net Profit"))?;
    writeln!(out, "• Latest EPS: ₹{}", plain(t.value("EPS in Rs", latest)))?;
    write!(out, "• Showing {} quarters of financial performance", quarters.len())
}

fn yearly(out: &mut String, t: &StatsTable<'_>, all: &[&str], years: &[&str]) -> fmt::Result {
    let offset = all.len() - years.len();
    let or_zero = |row: &str, p: &str| t.num(row, p).unwrap_or(0.0);

    for (i, p) in years.iter().enumerate() {
        // Growth looks back past the window when earlier years exist
        let previous = (offset + i)
            .checked_sub(1)
            .map(|prev| or_zero("Sales", all[prev]));

        writeln!(out, "📈 **{p}**")?;
        writeln!(out, "💰 **Revenue**: {}", format_currency(or_zero("Sales", p)))?;
        writeln!(out, "💵 **Net Profit**: {}", format_currency(or_zero("Net Profit", p)))?;
        writeln!(out, "📈 **EPS**: ₹{}", number(or_zero("EPS in Rs", p)))?;
        writeln!(
            out,
            "📊 **Operating Profit**: {}",
            format_currency(or_zero("Operating Profit", p))
        )?;
        writeln!(out, "⚡ **OPM**: {}%", number(or_zero("OPM %", p)))?;
        writeln!(
            out,
            "📊 **YoY Revenue Growth**: {}%\n",
            growth(or_zero("Sales", p), previous)
        )?;
    }

    let latest = years[years.len() - 1];
    let recent_growth = match (t.num("Sales", latest), years.len().checked_sub(2)) {
        (Some(current), Some(prev)) => growth(current, Some(or_zero("Sales", years[prev]))),
        _ => NA.to_string(),
    };
    writeln!(out, "📝 **Key Insights**:")?;
    writeln!(out, "🔹 Latest Revenue Growth: {recent_growth}%")?;
    writeln!(out, "🔹 Current EPS: ₹{}", display_or_na(t.value("EPS in Rs", latest)))?;
    writeln!(out, "🔹 Operating Margin: {}%", display_or_na(t.value("OPM %", latest)))?;
    writeln!(out, "🔹 Years of Data: {}", years.len())
}

fn balance_sheet(out: &mut String, t: &StatsTable<'_>, periods: &[&str]) -> fmt::Result {
    let latest = periods[periods.len() - 1];
    let line = |row: &str| crores_raw(t, row, latest);

    writeln!(out, "🏦 **ASSETS ({latest})**")?;
    writeln!(out, "💰 **Total Assets**: {}", line("Total Assets"))?;
    writeln!(out, "🏭 **Fixed Assets**: {}", line("Fixed Assets"))?;
    writeln!(out, "📈 **Investments**: {}\n", line("Investments"))?;

    writeln!(out, "📋 **LIABILITIES & EQUITY**")?;
    writeln!(out, "💳 **Total Liabilities**: {}", line("Total Liabilities"))?;
    writeln!(out, "🏛️ **Equity Capital**: {}", line("Equity Capital"))?;
    writeln!(out, "📊 **Reserves**: {}", line("Reserves"))?;
    writeln!(out, "🏦 **Borrowings**: {}\n", line("Borrowings"))?;

    let assets = t.num("Total Assets", latest);
    let borrowings = t.num("Borrowings", latest);
    let equity = t.num("Equity Capital", latest).unwrap_or(0.0)
        + t.num("Reserves", latest).unwrap_or(0.0);

    let debt_to_equity = match borrowings {
        Some(b) if b != 0.0 && equity != 0.0 => ratio(b / equity, 2),
        _ => NA.to_string(),
    };
    let asset_growth = match (periods.len().checked_sub(2), assets) {
        (Some(prev), Some(current)) => t
            .num("Total Assets", periods[prev])
            .map_or_else(|| NA.to_string(), |p| ratio((current - p) / p * 100.0, 2)),
        _ => NA.to_string(),
    };
    let equity_ratio = match assets {
        Some(a) if a != 0.0 && equity != 0.0 => ratio(equity / a * 100.0, 2),
        _ => NA.to_string(),
    };

    writeln!(out, "📈 **KEY METRICS**")?;
    writeln!(out, "🎯 **Debt-to-Equity**: {debt_to_equity}")?;
    writeln!(out, "📈 **Asset Growth**: {asset_growth}% YoY")?;
    writeln!(out, "💪 **Equity Ratio**: {equity_ratio}%")?;
    writeln!(out, "📅 **Period**: {latest}\n")?;

    if periods.len() > 1 {
        let share = assets.map_or(f64::NAN, |a| equity / a * 100.0);
        writeln!(out, "📊 **TREND ANALYSIS**:")?;
        writeln!(
            out,
            "• Assets grew from ₹{} Cr to ₹{} Cr",
            plain(t.value("Total Assets", periods[0])),
            plain(t.value("Total Assets", latest))
        )?;
        writeln!(out, "• Borrowings: ₹{} Cr", plain(t.value("Borrowings", latest)))?;
        writeln!(out, "• Strong balance sheet with {}% equity ratio", ratio(share, 1))?;
    }

    let growing = asset_growth.parse::<f64>().is_ok_and(|g| g > 0.0);
    write!(
        out,
        "\n📝 **Analysis**: Balance sheet shows {} financial position and capital structure health.",
        if growing { "growing" } else { "stable" }
    )
}

fn cash_flow(out: &mut String, t: &StatsTable<'_>, periods: &[&str]) -> fmt::Result {
    const OPERATING: &str = "Cash from Operating Activity";
    const INVESTING: &str = "Cash from Investing Activity";
    const FINANCING: &str = "Cash from Financing Activity";
    const NET: &str = "Net Cash Flow";

    let amount = |row: &str, p: &str| format_currency(t.num(row, p).unwrap_or(0.0));
    for p in periods {
        writeln!(out, "📅 **{p}**")?;
        writeln!(out, "🏭 **Operating Cash Flow**: {}", amount(OPERATING, p))?;
        writeln!(out, "💸 **Investing Cash Flow**: {}", amount(INVESTING, p))?;
        writeln!(out, "🏦 **Financing Cash Flow**: {}", amount(FINANCING, p))?;
        writeln!(out, "💰 **Net Cash Flow**: {}\n", amount(NET, p))?;
    }

    let latest = periods[periods.len() - 1];
    let operating = t.num(OPERATING, latest);
    let investing = t.num(INVESTING, latest);
    let net = t.num(NET, latest);
    let free_cash = match (operating, investing) {
        (Some(o), Some(i)) => format_currency(o + i),
        _ => NA.to_string(),
    };

    writeln!(out, "📊 **KEY INSIGHTS**")?;
    writeln!(
        out,
        "🔹 Latest Operating Cash Flow: {}",
        operating.map_or_else(|| NA.to_string(), format_currency)
    )?;
    writeln!(out, "🔹 Free Cash Flow: {free_cash}")?;
    writeln!(
        out,
        "🔹 Cash Generation: {}",
        if operating.is_some_and(|o| o > 0.0) { "✅ Positive" } else { "❌ Negative" }
    )?;
    writeln!(
        out,
        "🔹 Investment Activity: {}",
        if investing.is_some_and(|i| i < 0.0) { "📈 Expanding" } else { "💰 Divesting" }
    )?;
    writeln!(
        out,
        "🔹 Overall Cash Position: {}",
        if net.is_some_and(|n| n > 0.0) { "📈 Improving" } else { "📉 Declining" }
    )
}

fn ratios(out: &mut String, t: &StatsTable<'_>, periods: &[&str]) -> fmt::Result {
    let or_zero = |row: &str, p: &str| number(t.num(row, p).unwrap_or(0.0));
    for p in periods {
        writeln!(out, "📅 **{p}**")?;
        writeln!(out, "📈 **ROCE**: {}%", or_zero("ROCE %", p))?;
        writeln!(out, "👥 **Debtor Days**: {}", or_zero("Debtor Days", p))?;
        writeln!(out, "📦 **Inventory Days**: {}", or_zero("Inventory Days", p))?;
        writeln!(out, "💳 **Payable Days**: {}", or_zero("Days Payable", p))?;
        writeln!(out, "🔄 **Cash Conversion Cycle**: {} days", or_zero("Cash Conversion Cycle", p))?;
        writeln!(out, "📊 **Working Capital Days**: {}\n", or_zero("Working Capital Days", p))?;
    }

    let latest = periods[periods.len() - 1];
    writeln!(out, "💡 **KEY INSIGHTS**:")?;
    writeln!(out, "🔹 Current ROCE: {}%", plain(t.value("ROCE %", latest)))?;
    writeln!(
        out,
        "🔹 Cash Conversion: {} days",
        plain(t.value("Cash Conversion Cycle", latest))
    )?;
    writeln!(
        out,
        "🔹 Collection Period: {} days",
        plain(t.value("Debtor Days", latest))
    )?;
    writeln!(
        out,
        "🔹 Efficiency: {}",
        efficiency_grade(t.num("Cash Conversion Cycle", latest))
    )
}

/// One of the five statement tools
pub struct FinancialStatementTool {
    ctx: ToolContext,
    statement: Statement,
}

impl FinancialStatementTool {
    pub fn new(ctx: ToolContext, statement: Statement) -> Self {
        Self { ctx, statement }
    }

    async fn run(&self, params: Value) -> Result<String> {
        let params: SymbolParams = parse_params(params)?;
        let symbol = self.ctx.require_symbol(params.symbol.as_deref(), SYMBOL_HINT)?;
        let doc = self
            .ctx
            .source
            .historical_stats(&symbol, self.statement.category())
            .await?;
        render_statement(self.statement, &symbol, &doc)
    }
}

#[async_trait]
impl Tool for FinancialStatementTool {
    async fn execute(&self, params: Value) -> nse_core::Result<String> {
        Ok(self.run(params).await.unwrap_or_else(|e| {
            report_failure(self.name(), self.statement.error_context(), &e)
        }))
    }

    fn name(&self) -> &str {
        match self.statement {
            Statement::Quarterly => "get_quarterly_results",
            Statement::Yearly => "get_yearly_results",
            Statement::BalanceSheet => "get_balance_sheet",
            Statement::CashFlow => "get_cashflow_statement",
            Statement::Ratios => "get_financial_ratios",
        }
    }

    fn description(&self) -> &str {
        match self.statement {
            Statement::Quarterly => "Get quarterly financial results for a stock",
            Statement::Yearly => "Get year-over-year financial results for a stock",
            Statement::BalanceSheet => "Get balance sheet data for a stock",
            Statement::CashFlow => "Get cash flow statement for a stock",
            Statement::Ratios => "Get financial ratios and metrics for a stock",
        }
    }

    fn input_schema(&self) -> Value {
        symbol_schema("RELIANCE, TCS")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataSource;
    use crate::error::StockError;
    use crate::tools::test_support::{context, offline_context};
    use serde_json::{Map, json};

    #[test]
    fn test_quarterly_report() {
        let doc = json!({
            "Sales": {"Jun 2025": 100.0, "Sep 2025": 110.0, "Dec 2025": 121.0},
            "Net Profit": {"Jun 2025": 20.0, "Sep 2025": 22.0, "Dec 2025": 25.4},
            "EPS in Rs": {"Jun 2025": 5.1, "Sep 2025": 5.6, "Dec 2025": 6.2},
            "OPM %": {"Jun 2025": 24, "Sep 2025": 25, "Dec 2025": 26}
        });
        let text = render_statement(Statement::Quarterly, "TCS", &doc).unwrap();

        assert!(text.starts_with("📈 **QUARTERLY RESULTS: TCS**\n⏰ **Updated**: "));
        let jun = text.find("📊 **Jun 2025**").unwrap();
        let dec = text.find("📊 **Dec 2025**").unwrap();
        assert!(jun < dec);
        assert!(text.contains("💰 **Revenue**: ₹1,00,00,00,000.00 (₹100 Cr)\n"));
        assert!(text.contains("📈 **EPS**: ₹6.2\n"));
        assert!(text.contains("📊 **OPM**: 26%\n"));
        assert!(text.contains("🔄 **QoQ Growth**: 10.00%\n"));
        assert_eq!(text.matches("QoQ Growth").count(), 2);
        assert!(text.contains("• Latest Quarter Revenue: ₹121 Crores\n"));
        assert!(text.contains("• Latest Quarter Profit: ₹25 Crores\n"));
        assert!(text.ends_with("• Showing 3 quarters of financial performance"));
    }

    #[test]
    fn test_quarterly_window_keeps_latest_eight() {
        let sales: Map<String, Value> = (1..=10).map(|i| (format!("Q{i:02}"), json!(i * 10))).collect();
        let doc = json!({ "Sales": sales });
        let text = render_statement(Statement::Quarterly, "INFY", &doc).unwrap();
        assert!(!text.contains("**Q01**"));
        assert!(!text.contains("**Q02**"));
        assert!(text.contains("**Q03**"));
        assert!(text.contains("**Q10**"));
    }

    #[test]
    fn test_yearly_growth_looks_past_window() {
        let sales: Map<String, Value> = (2018..=2025).map(|y| (format!("Mar {y}"), json!(100))).collect();
        let mut doc = json!({ "Sales": sales });
        doc["Sales"]["Mar 2025"] = json!(150);
        let text = render_statement(Statement::Yearly, "INFY", &doc).unwrap();

        assert!(!text.contains("**Mar 2019**"));
        // First shown year still has a predecessor
        assert_eq!(text.matches("**YoY Revenue Growth**: 0.00%").count(), 5);
        assert!(text.contains("**YoY Revenue Growth**: 50.00%"));
        assert!(text.contains("🔹 Latest Revenue Growth: 50.00%\n"));
        assert!(text.contains("🔹 Current EPS: ₹N/A\n"));
        assert!(text.contains("🔹 Years of Data: 6\n"));
    }

    #[test]
    fn test_balance_sheet_metrics() {
        let doc = json!({
            "Total Assets": {"Mar 2023": 800, "Mar 2024": 1000},
            "Total Liabilities": {"Mar 2024": 1000},
            "Equity Capital": {"Mar 2024": 100},
            "Reserves": {"Mar 2024": 400},
            "Borrowings": {"Mar 2024": 250},
            "Fixed Assets": {"Mar 2024": 300},
            "Investments": {"Mar 2024": 150}
        });
        let text = render_statement(Statement::BalanceSheet, "RELIANCE", &doc).unwrap();

        assert!(text.starts_with("💼 **BALANCE SHEET: RELIANCE**\n"));
        assert!(text.contains("🏦 **ASSETS (Mar 2024)**\n"));
        assert!(text.contains("💰 **Total Assets**: ₹10,00,00,00,000.00 (₹1000 Cr)\n"));
        assert!(text.contains("🎯 **Debt-to-Equity**: 0.50\n"));
        assert!(text.contains("📈 **Asset Growth**: 25.00% YoY\n"));
        assert!(text.contains("💪 **Equity Ratio**: 50.00%\n"));
        assert!(text.contains("• Assets grew from ₹800 Cr to ₹1000 Cr\n"));
        assert!(text.contains("• Strong balance sheet with 50.0% equity ratio\n"));
        assert!(text.ends_with("Balance sheet shows growing financial position and capital structure health."));
    }

    #[test]
    fn test_balance_sheet_single_period() {
        let doc = json!({"Total Assets": {"Mar 2024": 1000}});
        let text = render_statement(Statement::BalanceSheet, "RELIANCE", &doc).unwrap();
        assert!(text.contains("🎯 **Debt-to-Equity**: N/A\n"));
        assert!(text.contains("📈 **Asset Growth**: N/A% YoY\n"));
        assert!(text.contains("📊 **Reserves**: N/A (₹N/A Cr)\n"));
        assert!(!text.contains("TREND ANALYSIS"));
        assert!(text.contains("shows stable financial"));
    }

    #[test]
    fn test_cash_flow_insights() {
        let doc = json!({
            "Cash from Operating Activity": {"Mar 2024": 500, "Mar 2025": 600},
            "Cash from Investing Activity": {"Mar 2024": -200, "Mar 2025": -250},
            "Cash from Financing Activity": {"Mar 2024": -100, "Mar 2025": -300},
            "Net Cash Flow": {"Mar 2024": 200, "Mar 2025": 50}
        });
        let text = render_statement(Statement::CashFlow, "ITC", &doc).unwrap();

        assert!(text.starts_with("💰 **CASH FLOW STATEMENT: ITC**\n"));
        assert!(text.contains("🏭 **Operating Cash Flow**: ₹600.00\n"));
        assert!(text.contains("🔹 Free Cash Flow: ₹350.00\n"));
        assert!(text.contains("🔹 Cash Generation: ✅ Positive\n"));
        assert!(text.contains("🔹 Investment Activity: 📈 Expanding\n"));
        assert!(text.contains("🔹 Overall Cash Position: 📈 Improving\n"));
    }

    #[test]
    fn test_ratios_and_efficiency_grade() {
        assert_eq!(efficiency_grade(Some(-5.0)), "✅ Excellent");
        assert_eq!(efficiency_grade(Some(0.0)), "✅ Good");
        assert_eq!(efficiency_grade(Some(29.9)), "✅ Good");
        assert_eq!(efficiency_grade(Some(30.0)), "⚠️ Needs Improvement");
        assert_eq!(efficiency_grade(None), "⚠️ Needs Improvement");

        let doc = json!({
            "Debtor Days": {"Mar 2025": 62},
            "Cash Conversion Cycle": {"Mar 2025": 12},
            "ROCE %": {"Mar 2025": 64}
        });
        let text = render_statement(Statement::Ratios, "TCS", &doc).unwrap();
        assert!(text.contains("📈 **ROCE**: 64%\n"));
        assert!(text.contains("📦 **Inventory Days**: 0\n"));
        assert!(text.contains("🔹 Collection Period: 62 days\n"));
        assert!(text.contains("🔹 Efficiency: ✅ Good\n"));
    }

    #[test]
    fn test_no_data_messages() {
        let text = render_statement(Statement::Quarterly, "TCS", &json!([])).unwrap();
        assert!(text.ends_with("❌ **No quarterly data available for TCS**"));

        let text = render_statement(Statement::Yearly, "TCS", &json!({})).unwrap();
        assert!(text.ends_with("❌ **No yearly data periods found for TCS**"));

        let text = render_statement(Statement::Ratios, "TCS", &json!(null)).unwrap();
        assert!(text.ends_with("❌ **No financial ratios data available for TCS**"));
    }

    #[tokio::test]
    async fn test_tool_fetches_matching_category() {
        let mut mock = MockMarketDataSource::new();
        mock.expect_historical_stats()
            .withf(|symbol: &str, category: &StatsCategory| {
                symbol == "HDFCBANK" && *category == StatsCategory::BalanceSheet
            })
            .times(1)
            .returning(|_, _| Ok(json!({})));
        let tool = FinancialStatementTool::new(context(mock), Statement::BalanceSheet);

        let text = tool.execute(json!({"symbol": "hdfcbank"})).await.unwrap();
        assert!(text.ends_with("❌ **No balance sheet data available for HDFCBANK**"));
    }

    #[tokio::test]
    async fn test_tool_errors() {
        let tool = FinancialStatementTool::new(offline_context(), Statement::CashFlow);
        assert_eq!(
            tool.execute(json!({})).await.unwrap(),
            "❌ Symbol parameter is required"
        );

        let mut mock = MockMarketDataSource::new();
        mock.expect_historical_stats()
            .returning(|_, _| Err(StockError::Api("HTTP 404: Not Found".to_string())));
        let tool = FinancialStatementTool::new(context(mock), Statement::Quarterly);
        assert_eq!(
            tool.execute(json!({"symbol": "TCS"})).await.unwrap(),
            "❌ **Error fetching quarterly results**: API Error: HTTP 404: Not Found"
        );
    }
}
