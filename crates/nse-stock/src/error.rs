//! Error types for market-data operations

use thiserror::Error;

/// Market-data specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Caller supplied a missing or malformed argument
    #[error("{0}")]
    InvalidInput(String),

    /// Symbol could not be resolved or upstream returned no usable data
    #[error("{0}")]
    NotFound(String),

    /// Upstream answered with a non-success status
    #[error("API Error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("API Error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream body was not valid JSON
    #[error("API Error: invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing a report into its buffer failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type alias for market-data operations
pub type Result<T> = std::result::Result<T, StockError>;

impl StockError {
    /// True for failures caused by the upstream provider
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            StockError::Api(_) | StockError::Network(_) | StockError::Json(_)
        )
    }

    /// Text returned to the caller when a tool fails
    ///
    /// Input and lookup failures carry their own wording; everything else is
    /// prefixed with the tool-specific `context`.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            StockError::InvalidInput(msg) | StockError::NotFound(msg) => format!("❌ {msg}"),
            other => format!("❌ {context}: {other}"),
        }
    }
}

/// Convert StockError to nse_core::Error
impl From<StockError> for nse_core::Error {
    fn from(err: StockError) -> Self {
        nse_core::Error::ExecutionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::Api("HTTP 404: Not Found".to_string());
        assert_eq!(err.to_string(), "API Error: HTTP 404: Not Found");
        assert!(err.is_upstream());

        let err = StockError::Config("base url".to_string());
        assert_eq!(err.to_string(), "Configuration error: base url");
        assert!(!err.is_upstream());

        let err = StockError::from(std::fmt::Error);
        assert_eq!(err.to_string(), "Formatting error: an error occurred when formatting an argument");
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_user_message() {
        let err = StockError::InvalidInput("Symbol parameter is required".to_string());
        assert_eq!(
            err.user_message("Error getting stock data"),
            "❌ Symbol parameter is required"
        );

        let err = StockError::Api("HTTP 500: Internal Server Error".to_string());
        assert_eq!(
            err.user_message("Error getting stock data"),
            "❌ Error getting stock data: API Error: HTTP 500: Internal Server Error"
        );
    }

    #[test]
    fn test_error_conversion() {
        let core: nse_core::Error = StockError::Api("boom".to_string()).into();
        match core {
            nse_core::Error::ExecutionFailed(msg) => assert!(msg.contains("API Error")),
            _ => panic!("Expected ExecutionFailed variant"),
        }
    }
}
