//! Model Context Protocol (MCP) server for the Indian stock tool set
//!
//! This crate exposes a [`ToolRegistry`](nse_tools::ToolRegistry) over MCP:
//! - newline-delimited JSON-RPC 2.0 over stdio (or any async byte stream)
//! - `initialize`, `ping`, `tools/list` and `tools/call`
//! - requests handled concurrently, responses written by a single writer
//!
//! # Example
//!
//! ```no_run
//! use nse_mcp::McpServer;
//! use nse_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> nse_mcp::Result<()> {
//! let registry = Arc::new(ToolRegistry::new());
//! let server = Arc::new(McpServer::new("my-server", "0.1.0", registry));
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

// Re-export commonly used types
pub use error::McpError;
pub use protocol::{Content, JsonRpcRequest, JsonRpcResponse, ToolCallResult, ToolDefinition};
pub use server::McpServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;
