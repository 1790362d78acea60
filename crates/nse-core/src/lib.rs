//! Core types for the Indian stock MCP tool server
//!
//! This crate defines the error type shared by the tool framework and the
//! protocol layer. Domain errors live in `nse-stock` and convert into it.

pub mod error;

pub use error::{Error, Result};
