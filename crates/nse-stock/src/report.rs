//! Structured analysis reports rendered as Markdown text

use crate::format::{display_or_na, format_currency, number, parse_number, title_case_key};
use crate::signals::Recommendation;
use std::fmt::Write;

/// Report metadata block
#[derive(Debug, Clone)]
pub struct Metadata {
    pub symbol: String,
    pub timestamp: String,
    pub analysis_type: String,
    pub data_source: String,
}

/// Executive summary block
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub recommendation: Option<Recommendation>,
    pub key_insights: Vec<String>,
}

/// Technical analysis block
#[derive(Debug, Clone, Default)]
pub struct TechnicalSection {
    pub trend: String,
    pub signals: Vec<String>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

/// Fundamental analysis block
#[derive(Debug, Clone, Default)]
pub struct FundamentalSection {
    pub valuation: String,
    pub financial_health: String,
    pub growth_prospects: String,
}

/// A single detailed metric value
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl MetricValue {
    /// Loosely typed upstream value, with missing, zero and empty values as `N/A`
    pub fn or_na(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(serde_json::Value::as_f64) {
            Some(n) if n != 0.0 && n.is_finite() => MetricValue::Number(n),
            _ => MetricValue::Text(display_or_na(value)),
        }
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

/// Full structured analysis
#[derive(Debug, Clone)]
pub struct StructuredAnalysis {
    pub metadata: Metadata,
    pub summary: Summary,
    /// Ordered `(snake_case key, value)` pairs
    pub metrics: Vec<(String, MetricValue)>,
    pub technical: Option<TechnicalSection>,
    pub fundamental: Option<FundamentalSection>,
}

impl StructuredAnalysis {
    /// Append a metric, keeping insertion order
    pub fn metric(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> &mut Self {
        self.metrics.push((key.into(), value.into()));
        self
    }

    /// Render the report
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        let meta = &self.metadata;
        writeln!(out, "# 📊 STOCK ANALYSIS: {}\n", meta.symbol)?;

        writeln!(out, "## 📋 Analysis Metadata")?;
        writeln!(out, "- **Symbol**: {}", meta.symbol)?;
        writeln!(out, "- **Timestamp**: {}", meta.timestamp)?;
        writeln!(out, "- **Analysis Type**: {}", meta.analysis_type)?;
        writeln!(out, "- **Data Source**: {}\n", meta.data_source)?;

        writeln!(out, "## 🎯 Executive Summary")?;
        if let Some(rec) = &self.summary.recommendation {
            writeln!(out, "- **Recommendation**: {}", rec.action)?;
            writeln!(out, "- **Confidence**: {}", rec.confidence)?;
            writeln!(out, "- **Risk Level**: {}", rec.risk)?;
        }
        if !self.summary.key_insights.is_empty() {
            writeln!(out, "- **Key Insights**:")?;
            for insight in &self.summary.key_insights {
                writeln!(out, "  • {insight}")?;
            }
        }
        writeln!(out)?;

        if let Some(tech) = &self.technical {
            writeln!(out, "## 📈 Technical Analysis")?;
            writeln!(out, "- **Trend**: {}", tech.trend)?;
            if let Some(support) = tech.support.filter(|v| *v != 0.0) {
                writeln!(out, "- **Support**: ₹{support:.2}")?;
            }
            if let Some(resistance) = tech.resistance.filter(|v| *v != 0.0) {
                writeln!(out, "- **Resistance**: ₹{resistance:.2}")?;
            }
            writeln!(out, "- **Signals**:")?;
            for signal in &tech.signals {
                writeln!(out, "  • {signal}")?;
            }
            writeln!(out)?;
        }

        if let Some(fund) = &self.fundamental {
            writeln!(out, "## 💼 Fundamental Analysis")?;
            writeln!(out, "- **Valuation**: {}", fund.valuation)?;
            writeln!(out, "- **Financial Health**: {}", fund.financial_health)?;
            writeln!(out, "- **Growth Prospects**: {}\n", fund.growth_prospects)?;
        }

        writeln!(out, "## 📊 Detailed Metrics")?;
        for (key, value) in &self.metrics {
            writeln!(out, "- **{}**: {}", title_case_key(key), render_metric(key, value))?;
        }

        Ok(())
    }
}

/// Price-keyed numbers and any value-keyed metric render as currency
fn render_metric(key: &str, value: &MetricValue) -> String {
    let key = key.to_lowercase();
    match value {
        MetricValue::Number(n) if key.contains("price") || key.contains("value") => {
            format_currency(*n)
        }
        MetricValue::Number(n) => number(*n),
        MetricValue::Text(text) if key.contains("value") => {
            parse_number(&serde_json::Value::String(text.clone()))
                .map_or_else(|| crate::format::NA.to_string(), format_currency)
        }
        MetricValue::Text(text) => text.clone(),
    }
}
