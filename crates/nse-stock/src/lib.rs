//! Indian equity market-data tools
//!
//! This crate turns an upstream Indian stock API into a set of MCP tools that
//! answer with formatted Markdown text. It includes:
//!
//! - A bundled symbol catalog with aliases, sectors and market-cap groups
//! - Free-text symbol resolution and search
//! - Heuristic moving-average signals and a rule-based recommendation
//! - A rate-limited, cached HTTP client for the upstream API
//! - Report builders for quotes, statements, shareholding and price history
//!
//! # Example
//!
//! ```rust,ignore
//! use nse_stock::{IndianStockClient, StockConfig, SymbolCatalog, SymbolResolver, ToolContext};
//! use nse_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! let config = StockConfig::from_env()?;
//! let catalog = Arc::new(SymbolCatalog::indian_equities()?);
//! let ctx = ToolContext::new(
//!     Arc::new(IndianStockClient::new(&config)?),
//!     Arc::new(SymbolResolver::new(catalog)),
//! );
//!
//! let registry = ToolRegistry::new();
//! nse_stock::register_all(&registry, &ctx);
//! let text = registry.call("get_stock_data", serde_json::json!({"symbol": "TCS"})).await?;
//! ```

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod report;
pub mod resolver;
pub mod signals;
pub mod tools;

pub use api::{IndianStockClient, MarketDataSource};
pub use catalog::SymbolCatalog;
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use resolver::SymbolResolver;
pub use tools::{ToolContext, register_all};
