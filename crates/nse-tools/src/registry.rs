//! Tool registry for managing available tools

use crate::Tool;
use nse_core::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Default)]
struct Entries {
    order: Vec<String>,
    tools: HashMap<String, Arc<dyn Tool>>,
}

/// Registry for managing tools
///
/// Tools are listed in registration order so `tools/list` is stable.
pub struct ToolRegistry {
    entries: RwLock<Entries>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// Re-registering a name replaces the tool but keeps its original position.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let name = tool.name().to_string();
        if !entries.tools.contains_key(&name) {
            entries.order.push(name.clone());
        }
        entries.tools.insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.tools.get(name).cloned()
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .order
            .iter()
            .filter_map(|name| entries.tools.get(name).cloned())
            .collect()
    }

    /// Dispatch a call to the named tool
    ///
    /// Unknown names fail with [`Error::ToolNotFound`].
    pub async fn call(&self, name: &str, params: Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))?;

        debug!(tool = name, "Dispatching tool call");
        tool.execute(params).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.order.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<String> {
            Ok(format!("{}:{}", self.name, params))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echoes its input"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "zeta" }));
        registry.register(Arc::new(EchoTool { name: "alpha" }));
        registry.register(Arc::new(EchoTool { name: "mid" }));

        let names: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_reregistration_keeps_position() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "a" }));
        registry.register(Arc::new(EchoTool { name: "b" }));
        registry.register(Arc::new(EchoTool { name: "a" }));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.list_tools()[0].name(), "a");
    }

    #[tokio::test]
    async fn test_call_dispatches_by_name() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));

        let out = registry.call("echo", json!({"x": 1})).await.unwrap();
        assert_eq!(out, r#"echo:{"x":1}"#);
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        let err = tokio_test::block_on(registry.call("missing", json!({}))).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(ref name) if name == "missing"));
    }
}
