//! Stdio MCP server
//!
//! Reads newline-delimited JSON-RPC messages, dispatches them against a
//! [`ToolRegistry`] and writes one response line per request. Requests are
//! handled concurrently; responses are written as they complete.

use crate::error::McpError;
use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolCallResult, ToolDefinition, ToolsCapability, negotiate_protocol_version,
};
use crate::Result;
use nse_tools::ToolRegistry;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// MCP server exposing the tools of a registry
pub struct McpServer {
    info: ServerInfo,
    instructions: Option<String>,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new server
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        registry: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            instructions: None,
            registry,
        }
    }

    /// Attach usage instructions returned from initialize
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Server identity
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Tool definitions in registration order
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: Some(tool.description().to_string()),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Handle one raw input line
    ///
    /// Returns `None` for notifications and blank lines.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse incoming message: {e}");
                let err = McpError::ParseError(e.to_string());
                return Some(JsonRpcResponse::failure(Value::Null, err.to_rpc_error()));
            }
        };

        if !value.is_object() {
            let err = McpError::InvalidRequest("expected a JSON object".to_string());
            return Some(JsonRpcResponse::failure(Value::Null, err.to_rpc_error()));
        }

        let id_hint = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                let err = McpError::InvalidRequest(e.to_string());
                return Some(JsonRpcResponse::failure(id_hint, err.to_rpc_error()));
            }
        };

        let Some(method) = request.method.as_deref() else {
            if request.is_notification() {
                return None;
            }
            let err = McpError::InvalidRequest("missing method".to_string());
            return Some(JsonRpcResponse::failure(id_hint, err.to_rpc_error()));
        };

        if request.is_notification() {
            debug!(method, "Received notification");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        match self.dispatch(method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(err) => {
                debug!(method, code = err.code(), "Request failed: {err}");
                Some(JsonRpcResponse::failure(id, err.to_rpc_error()))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value> {
        match method {
            "initialize" => self.initialize(params.as_ref()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tool_definitions() })),
            "tools/call" => self.call_tool(params).await,
            other => Err(McpError::MethodNotFound(format!("Method not found: {other}"))),
        }
    }

    fn initialize(&self, params: Option<&Value>) -> Result<Value> {
        let requested = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str);

        let result = InitializeResult {
            protocol_version: negotiate_protocol_version(requested).to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
            instructions: self.instructions.clone(),
        };

        info!(
            protocol = %result.protocol_version,
            "Client initialized"
        );
        Ok(serde_json::to_value(result)?)
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params = params.ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let arguments = match call.arguments {
            None | Some(Value::Null) => json!({}),
            Some(args) => args,
        };

        debug!(tool = %call.name, "Calling tool");
        let text = self.registry.call(&call.name, arguments).await?;
        Ok(serde_json::to_value(ToolCallResult::text(text))?)
    }

    /// Serve requests from `reader`, writing responses to `writer`
    ///
    /// Returns once the reader reaches end of input and every in-flight
    /// request has been answered.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(response) = rx.recv().await {
                let mut line = match serde_json::to_string(&response) {
                    Ok(s) => s,
                    Err(e) => {
                        error!("Failed to serialize response: {e}");
                        continue;
                    }
                };
                line.push('\n');
                writer.write_all(line.as_bytes()).await?;
                writer.flush().await?;
            }
            writer.shutdown().await?;
            Ok::<(), std::io::Error>(())
        });

        let mut lines = BufReader::new(reader).lines();
        let mut in_flight = JoinSet::new();

        while let Some(line) = lines.next_line().await? {
            while let Some(done) = in_flight.try_join_next() {
                if let Err(e) = done {
                    error!("Request task failed: {e}");
                }
            }

            let server = Arc::clone(&self);
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    let _ = tx.send(response);
                }
            });
        }

        debug!("Input closed, draining in-flight requests");
        while let Some(done) = in_flight.join_next().await {
            if let Err(e) = done {
                error!("Request task failed: {e}");
            }
        }
        drop(tx);

        writer_task
            .await
            .map_err(|e| McpError::InternalError(format!("writer task failed: {e}")))??;
        Ok(())
    }

    /// Serve over the process's stdin and stdout
    pub async fn serve_stdio(self: Arc<Self>) -> Result<()> {
        info!(
            name = %self.info.name,
            version = %self.info.version,
            tools = self.registry.len(),
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nse_tools::Tool;
    use tokio::io::AsyncReadExt;

    struct UpperTool;

    #[async_trait]
    impl Tool for UpperTool {
        async fn execute(&self, params: Value) -> nse_core::Result<String> {
            let text = params
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or("empty");
            Ok(text.to_uppercase())
        }

        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercases text"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        async fn execute(&self, _params: Value) -> nse_core::Result<String> {
            Err(nse_core::Error::Generic("kaput".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    fn server() -> McpServer {
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(UpperTool));
        registry.register(Arc::new(FailingTool));
        McpServer::new("test-server", "1.0.0", registry)
    }

    fn to_json(response: Option<JsonRpcResponse>) -> Value {
        serde_json::to_value(response.expect("response expected")).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server().with_instructions("be nice");
        let resp = to_json(
            server
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
                )
                .await,
        );
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(resp["result"]["serverInfo"]["name"], "test-server");
        assert_eq!(resp["result"]["instructions"], "be nice");
        assert!(resp["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list_in_registration_order() {
        let resp = to_json(
            server()
                .handle_line(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#)
                .await,
        );
        let tools = resp["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "upper");
        assert_eq!(tools[1]["name"], "failing");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_returns_text_content() {
        let resp = to_json(
            server()
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"upper","arguments":{"text":"tcs"}}}"#,
                )
                .await,
        );
        assert_eq!(
            resp["result"],
            json!({"content": [{"type": "text", "text": "TCS"}]})
        );
    }

    #[tokio::test]
    async fn test_tools_call_null_arguments() {
        let resp = to_json(
            server()
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"upper","arguments":null}}"#,
                )
                .await,
        );
        assert_eq!(resp["result"]["content"][0]["text"], "EMPTY");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let resp = to_json(
            server()
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope"}}"#,
                )
                .await,
        );
        assert_eq!(resp["error"]["code"], -32601);
        assert_eq!(resp["error"]["message"], "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_tool_error_is_internal_error() {
        let resp = to_json(
            server()
                .handle_line(
                    r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"failing","arguments":{}}}"#,
                )
                .await,
        );
        assert_eq!(resp["error"]["code"], -32603);
        assert_eq!(resp["error"]["message"], "Tool execution failed: kaput");
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = server();

        let resp = to_json(server.handle_line("{not json").await);
        assert_eq!(resp["error"]["code"], -32700);
        assert_eq!(resp["id"], Value::Null);

        let resp = to_json(server.handle_line("[1,2]").await);
        assert_eq!(resp["error"]["code"], -32600);

        let resp = to_json(server.handle_line(r#"{"jsonrpc":"2.0","id":9}"#).await);
        assert_eq!(resp["error"]["code"], -32600);
        assert_eq!(resp["id"], 9);

        let resp = to_json(
            server
                .handle_line(r#"{"jsonrpc":"2.0","id":10,"method":"resources/list"}"#)
                .await,
        );
        assert_eq!(resp["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server();
        assert!(
            server
                .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .await
                .is_none()
        );
        assert!(server.handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_serve_over_duplex() {
        let server = Arc::new(server());
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let handle = tokio::spawn(server.serve(server_read, server_write));

        let (mut client_read, mut client_write) = tokio::io::split(client);
        client_write
            .write_all(
                concat!(
                    r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
                    "\n",
                    r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
                    "\n",
                    r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
                    "\n"
                )
                .as_bytes(),
            )
            .await
            .unwrap();
        client_write.shutdown().await.unwrap();
        drop(client_write);

        let mut output = String::new();
        client_read.read_to_string(&mut output).await.unwrap();
        handle.await.unwrap().unwrap();

        let mut ids: Vec<i64> = output
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].as_i64().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }
}
