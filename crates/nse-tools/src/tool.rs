//! Tool trait definition

use async_trait::async_trait;
use nse_core::Result;
use serde_json::Value;

/// Trait for tools exposed to MCP callers
///
/// Each tool provides a name, a description and a JSON schema for its input,
/// and produces a single block of human-readable text.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Loosely-typed tool arguments (should match input_schema)
    ///
    /// # Returns
    ///
    /// The formatted text report. Domain failures (bad input, unknown symbol,
    /// upstream outage) are reported inside the text; `Err` is reserved for
    /// failures the tool cannot describe to the caller.
    async fn execute(&self, params: Value) -> Result<String>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a symbol lookup tool:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "symbol": {
    ///             "type": "string",
    ///             "description": "Stock symbol (e.g., RELIANCE, TCS)"
    ///         }
    ///     },
    ///     "required": ["symbol"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}
