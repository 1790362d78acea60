//! Upstream market-data provider interface

pub mod client;

pub use client::IndianStockClient;

use crate::error::{Result, StockError};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Statistic sets served by `/historical_stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsCategory {
    QuarterResults,
    YoyResults,
    BalanceSheet,
    CashFlow,
    Ratios,
    ShareholdingQuarterly,
    ShareholdingYearly,
}

impl StatsCategory {
    /// Upstream `stats` parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            StatsCategory::QuarterResults => "quarter_results",
            StatsCategory::YoyResults => "yoy_results",
            StatsCategory::BalanceSheet => "balancesheet",
            StatsCategory::CashFlow => "cashflow",
            StatsCategory::Ratios => "ratios",
            StatsCategory::ShareholdingQuarterly => "shareholding_pattern_quarterly",
            StatsCategory::ShareholdingYearly => "shareholding_pattern_yearly",
        }
    }
}

impl fmt::Display for StatsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look-back window for `/historical_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoricalPeriod {
    OneMonth,
    SixMonths,
    #[default]
    OneYear,
    ThreeYears,
    FiveYears,
    TenYears,
    Max,
}

impl HistoricalPeriod {
    /// Accepted parameter values
    pub const VALUES: &'static str = "1m, 6m, 1yr, 3yr, 5yr, 10yr, max";

    pub fn as_str(self) -> &'static str {
        match self {
            HistoricalPeriod::OneMonth => "1m",
            HistoricalPeriod::SixMonths => "6m",
            HistoricalPeriod::OneYear => "1yr",
            HistoricalPeriod::ThreeYears => "3yr",
            HistoricalPeriod::FiveYears => "5yr",
            HistoricalPeriod::TenYears => "10yr",
            HistoricalPeriod::Max => "max",
        }
    }
}

impl FromStr for HistoricalPeriod {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(HistoricalPeriod::OneMonth),
            "6m" => Ok(HistoricalPeriod::SixMonths),
            "1yr" => Ok(HistoricalPeriod::OneYear),
            "3yr" => Ok(HistoricalPeriod::ThreeYears),
            "5yr" => Ok(HistoricalPeriod::FiveYears),
            "10yr" => Ok(HistoricalPeriod::TenYears),
            "max" => Ok(HistoricalPeriod::Max),
            other => Err(StockError::InvalidInput(format!(
                "Invalid period \"{other}\". Use one of: {}",
                Self::VALUES
            ))),
        }
    }
}

impl fmt::Display for HistoricalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dataset selector for `/historical_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoricalFilter {
    #[default]
    Price,
    Pe,
    Sm,
    EvEbitda,
    Ptb,
    Mcs,
}

impl HistoricalFilter {
    /// Accepted parameter values
    pub const VALUES: &'static str = "price, pe, sm, evebitda, ptb, mcs";

    pub fn as_str(self) -> &'static str {
        match self {
            HistoricalFilter::Price => "price",
            HistoricalFilter::Pe => "pe",
            HistoricalFilter::Sm => "sm",
            HistoricalFilter::EvEbitda => "evebitda",
            HistoricalFilter::Ptb => "ptb",
            HistoricalFilter::Mcs => "mcs",
        }
    }
}

impl FromStr for HistoricalFilter {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(HistoricalFilter::Price),
            "pe" => Ok(HistoricalFilter::Pe),
            "sm" => Ok(HistoricalFilter::Sm),
            "evebitda" => Ok(HistoricalFilter::EvEbitda),
            "ptb" => Ok(HistoricalFilter::Ptb),
            "mcs" => Ok(HistoricalFilter::Mcs),
            other => Err(StockError::InvalidInput(format!(
                "Invalid filter \"{other}\". Use one of: {}",
                Self::VALUES
            ))),
        }
    }
}

impl fmt::Display for HistoricalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of raw upstream JSON documents
///
/// Documents are returned untouched; every field is optional to callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// `GET /stock?name=SYM`
    async fn stock(&self, symbol: &str) -> Result<Value>;

    /// `GET /trending`
    async fn trending(&self) -> Result<Value>;

    /// `GET /historical_stats?stock_name=SYM&stats=CAT`
    async fn historical_stats(&self, symbol: &str, category: StatsCategory) -> Result<Value>;

    /// `GET /historical_data?stock_name=SYM&period=P&filter=F`
    async fn historical_data(
        &self,
        symbol: &str,
        period: HistoricalPeriod,
        filter: HistoricalFilter,
    ) -> Result<Value>;
}
