//! Error types for nse-core

use thiserror::Error;

/// Result type alias for nse-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool dispatch and execution
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// No tool is registered under the requested name
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Tool arguments could not be interpreted
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Tool execution failed in a way the tool could not report as text
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidParameters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ToolNotFound("get_weather".to_string());
        assert_eq!(err.to_string(), "Unknown tool: get_weather");

        let err = Error::ExecutionFailed("boom".to_string());
        assert_eq!(err.to_string(), "Tool execution failed: boom");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }
}
