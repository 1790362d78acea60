//! Tool management and dispatch for the Indian stock MCP server
//!
//! This crate provides the `Tool` trait implemented by every market-data
//! endpoint and the `ToolRegistry` the protocol layer dispatches through.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
