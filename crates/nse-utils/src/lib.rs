//! Shared utilities for the Indian stock MCP server
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and typed environment configuration.

pub mod env;
pub mod logging;

pub use env::{EnvError, load_dotenv};
pub use logging::{LogFormat, init_tracing};
