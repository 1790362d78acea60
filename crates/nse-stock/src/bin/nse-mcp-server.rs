//! Indian stock market MCP server
//!
//! Serves the stock tools over newline-delimited JSON-RPC on stdio.
//!
//! # Usage
//!
//! ```bash
//! export INDIAN_STOCK_API_KEY="your-key"
//! cargo run --bin nse-mcp-server -p nse-stock -- --log-format json
//! ```

use anyhow::Context;
use clap::Parser;
use nse_mcp::McpServer;
use nse_stock::{IndianStockClient, StockConfig, SymbolCatalog, SymbolResolver, ToolContext};
use nse_tools::ToolRegistry;
use nse_utils::LogFormat;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

const SERVER_NAME: &str = "indian-stock-mcp-server";

const INSTRUCTIONS: &str = "Indian stock market data for NSE-listed equities. \
Symbols accept tickers, company names and common aliases (e.g. RIL, SBI). \
Call get_supported_stocks or search_stocks to discover symbols.";

#[derive(Parser, Debug)]
#[command(name = "nse-mcp-server")]
#[command(about = "MCP server for Indian stock market data", long_about = None)]
struct Args {
    /// Log line format written to stderr
    #[arg(long, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Override the upstream base URL
    #[arg(long)]
    base_url: Option<String>,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = StockConfig::from_env().context("failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
        config.validate()?;
    }

    let catalog = Arc::new(SymbolCatalog::indian_equities()?);
    let client = IndianStockClient::new(&config)?;
    info!(
        base_url = %client.base_url(),
        symbols = catalog.len(),
        "Upstream client ready"
    );

    let ctx = ToolContext::new(Arc::new(client), Arc::new(SymbolResolver::new(catalog)));
    let registry = Arc::new(ToolRegistry::new());
    nse_stock::register_all(&registry, &ctx);

    let server = Arc::new(
        McpServer::new(SERVER_NAME, env!("CARGO_PKG_VERSION"), registry)
            .with_instructions(INSTRUCTIONS),
    );

    tokio::select! {
        result = server.serve_stdio() => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    nse_utils::load_dotenv();
    let args = Args::parse();
    nse_utils::init_tracing(args.log_format);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to start server: {e:#}");
            ExitCode::FAILURE
        }
    }
}
