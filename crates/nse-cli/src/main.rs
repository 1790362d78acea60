//! Command-line interface for the Indian stock tools
//!
//! Lists and calls tools without an MCP client, and exercises symbol
//! resolution and the signal engine offline.

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use nse_stock::api::{HistoricalFilter, HistoricalPeriod, StatsCategory};
use nse_stock::signals::{recommend, technical_signals};
use nse_stock::{
    IndianStockClient, MarketDataSource, StockConfig, StockError, SymbolCatalog, SymbolResolver,
    ToolContext,
};
use nse_tools::ToolRegistry;
use nse_utils::LogFormat;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "nse-cli")]
#[command(about = "CLI for the Indian stock market tools", long_about = None)]
struct Cli {
    /// Log line format written to stderr
    #[arg(long, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered tools
    Tools,
    /// Call a tool against the upstream API
    Call {
        /// Tool name, e.g. get_stock_data
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Resolve a free-text query to a ticker
    Resolve {
        /// Ticker, alias or company fragment
        query: String,
    },
    /// Evaluate moving-average signals and the recommendation
    Signals {
        #[arg(long)]
        price: f64,
        #[arg(long)]
        dma50: Option<f64>,
        #[arg(long)]
        dma200: Option<f64>,
        /// Percent change over the period
        #[arg(long, default_value_t = 0.0)]
        change: f64,
    },
}

/// Data source for commands that must never reach the network
struct OfflineSource;

impl OfflineSource {
    fn unavailable() -> StockError {
        StockError::Config("no upstream configured for this command".to_string())
    }
}

#[async_trait]
impl MarketDataSource for OfflineSource {
    async fn stock(&self, _symbol: &str) -> nse_stock::Result<Value> {
        Err(Self::unavailable())
    }

    async fn trending(&self) -> nse_stock::Result<Value> {
        Err(Self::unavailable())
    }

    async fn historical_stats(
        &self,
        _symbol: &str,
        _category: StatsCategory,
    ) -> nse_stock::Result<Value> {
        Err(Self::unavailable())
    }

    async fn historical_data(
        &self,
        _symbol: &str,
        _period: HistoricalPeriod,
        _filter: HistoricalFilter,
    ) -> nse_stock::Result<Value> {
        Err(Self::unavailable())
    }
}

fn resolver() -> anyhow::Result<Arc<SymbolResolver>> {
    let catalog = SymbolCatalog::indian_equities()?;
    Ok(Arc::new(SymbolResolver::new(Arc::new(catalog))))
}

fn registry(source: Arc<dyn MarketDataSource>) -> anyhow::Result<ToolRegistry> {
    let registry = ToolRegistry::new();
    nse_stock::register_all(&registry, &ToolContext::new(source, resolver()?));
    Ok(registry)
}

fn tool_table(registry: &ToolRegistry) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Tool", "Description"]);
    for (i, tool) in registry.list_tools().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            tool.name().to_string(),
            tool.description().to_string(),
        ]);
    }
    table
}

async fn call(tool: &str, args: &str) -> anyhow::Result<String> {
    let params: Value = serde_json::from_str(args).context("--args must be a JSON object")?;
    let config = StockConfig::from_env().context("failed to load configuration")?;
    let client = IndianStockClient::new(&config)?;
    debug!(tool, base_url = %client.base_url(), "Calling tool");

    let registry = registry(Arc::new(client))?;
    Ok(registry.call(tool, params).await?)
}

fn signals_report(price: f64, dma50: Option<f64>, dma200: Option<f64>, change: f64) -> anyhow::Result<String> {
    let signals = technical_signals(price, dma50, dma200)?;
    let rec = recommend(change, &signals)?;

    let mut out = String::new();
    if signals.is_empty() {
        out.push_str("No signals (moving averages missing or zero)\n");
    }
    for signal in &signals {
        out.push_str(&format!("{signal}\n"));
    }
    out.push_str(&format!(
        "Recommendation: {} (confidence {}, risk {})",
        rec.action, rec.confidence, rec.risk
    ));
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nse_utils::load_dotenv();
    let cli = Cli::parse();
    nse_utils::init_tracing(cli.log_format);

    match cli.command {
        Commands::Tools => {
            let registry = registry(Arc::new(OfflineSource))?;
            println!("{}", tool_table(&registry));
        }
        Commands::Call { tool, args } => {
            println!("{}", call(&tool, &args).await?);
        }
        Commands::Resolve { query } => {
            let resolver = resolver()?;
            match resolver.resolve(&query) {
                Some(symbol) => println!("{symbol}"),
                None => {
                    let matches = resolver.search(&query);
                    anyhow::ensure!(!matches.is_empty(), "no symbol matches '{query}'");
                    println!("No exact match. Candidates: {}", matches.join(", "));
                }
            }
        }
        Commands::Signals {
            price,
            dma50,
            dma200,
            change,
        } => {
            println!("{}", signals_report(price, dma50, dma200, change)?);
        }
    }

    Ok(())
}
