//! Error types for MCP operations

use crate::protocol::{JsonRpcError, error_codes};
use thiserror::Error;

/// Errors that can occur while serving MCP requests
#[derive(Error, Debug)]
pub enum McpError {
    /// Incoming line was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Incoming JSON was not a valid JSON-RPC request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown method or unknown tool name
    #[error("{0}")]
    MethodNotFound(String),

    /// Method parameters could not be interpreted
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Internal error
    #[error("{0}")]
    InternalError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i64 {
        match self {
            McpError::ParseError(_) => error_codes::PARSE_ERROR,
            McpError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::JsonError(_) => error_codes::INVALID_PARAMS,
            McpError::InternalError(_) | McpError::IoError(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Convert into the JSON-RPC error object sent on the wire
    pub fn to_rpc_error(&self) -> JsonRpcError {
        JsonRpcError {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }
}

/// Convert tool framework errors into protocol errors
impl From<nse_core::Error> for McpError {
    fn from(err: nse_core::Error) -> Self {
        match err {
            nse_core::Error::ToolNotFound(_) => McpError::MethodNotFound(err.to_string()),
            nse_core::Error::InvalidParameters(msg) => McpError::InvalidParams(msg),
            nse_core::Error::ExecutionFailed(_) => McpError::InternalError(err.to_string()),
            nse_core::Error::Generic(msg) => {
                McpError::InternalError(format!("Tool execution failed: {msg}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_maps_to_method_not_found() {
        let err: McpError = nse_core::Error::ToolNotFound("get_weather".to_string()).into();
        assert_eq!(err.code(), -32601);
        assert_eq!(err.to_string(), "Unknown tool: get_weather");
    }

    #[test]
    fn test_generic_maps_to_internal() {
        let err: McpError = nse_core::Error::Generic("boom".to_string()).into();
        let rpc = err.to_rpc_error();
        assert_eq!(rpc.code, -32603);
        assert_eq!(rpc.message, "Tool execution failed: boom");
    }

    #[test]
    fn test_parse_error_code() {
        assert_eq!(McpError::ParseError("x".into()).code(), -32700);
        assert_eq!(McpError::InvalidRequest("x".into()).code(), -32600);
        assert_eq!(McpError::InvalidParams("x".into()).code(), -32602);
    }
}
