//! Top gainers and losers from `/trending`

use super::{ToolContext, report_failure, updated_line};
use crate::error::Result;
use crate::format::{format_currency_value, plain};
use async_trait::async_trait;
use nse_tools::Tool;
use serde_json::{Value, json};
use std::fmt::Write;

/// Most entries listed per direction
pub const MAX_MOVERS: usize = 10;

/// Which side of the trending list to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverDirection {
    Gainers,
    Losers,
}

impl MoverDirection {
    fn list_key(self) -> &'static str {
        match self {
            MoverDirection::Gainers => "top_gainers",
            MoverDirection::Losers => "top_losers",
        }
    }
}

/// `get_top_gainers` / `get_top_losers`
pub struct TopMoversTool {
    ctx: ToolContext,
    direction: MoverDirection,
}

impl TopMoversTool {
    pub fn new(ctx: ToolContext, direction: MoverDirection) -> Self {
        Self { ctx, direction }
    }

    async fn run(&self) -> Result<String> {
        let doc = self.ctx.source.trending().await?;
        self.render(&doc)
    }

    fn render(&self, doc: &Value) -> Result<String> {
        let entries = doc
            .get("trending_stocks")
            .and_then(|t| t.get(self.direction.list_key()))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let (icon, title) = match self.direction {
            MoverDirection::Gainers => ("📈", "TOP GAINERS"),
            MoverDirection::Losers => ("📉", "TOP LOSERS"),
        };

        let mut out = format!("{icon} **{title}**\n");
        out.push_str(&updated_line());
        out.push('\n');

        for (i, stock) in entries.iter().take(MAX_MOVERS).enumerate() {
            let price = format_currency_value(stock.get("price"));
            let change = plain(stock.get("percent_change"));
            let change = match self.direction {
                MoverDirection::Gainers => format!("✅ Change: +{change}%"),
                MoverDirection::Losers => format!("❌ Change: {change}%"),
            };
            write!(
                out,
                "{}. {icon} **{}**\n   💰 Price: {price} | {change}\n\n",
                i + 1,
                plain(stock.get("company_name"))
            )?;
        }
        Ok(out)
    }
}

#[async_trait]
impl Tool for TopMoversTool {
    async fn execute(&self, _params: Value) -> nse_core::Result<String> {
        let context = match self.direction {
            MoverDirection::Gainers => "Error getting top gainers",
            MoverDirection::Losers => "Error getting top losers",
        };
        Ok(self
            .run()
            .await
            .unwrap_or_else(|e| report_failure(self.name(), context, &e)))
    }

    fn name(&self) -> &str {
        match self.direction {
            MoverDirection::Gainers => "get_top_gainers",
            MoverDirection::Losers => "get_top_losers",
        }
    }

    fn description(&self) -> &str {
        match self.direction {
            MoverDirection::Gainers => "Get top gaining stocks for the day",
            MoverDirection::Losers => "Get top losing stocks for the day",
        }
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
}
