//! Tool registry: the lookup table the pipeline queries by tool name.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::CrewError;
use crate::tools::{Tool, ToolDeclaration, ToolResult};

/// Maximum number of tools a registry holds.
const MAX_TOOLS: usize = 32;

/// Named tools available to a crew.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    ///
    /// Names must be non-empty, alphanumeric plus underscores, and unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), CrewError> {
        let name = tool.name().to_string();

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(CrewError::InvalidPipeline(format!(
                "tool name must be non-empty and contain only alphanumeric characters and underscores: {name:?}"
            )));
        }
        if self.tools.contains_key(&name) {
            return Err(CrewError::InvalidPipeline(format!(
                "tool already registered: {name}"
            )));
        }
        if self.tools.len() >= MAX_TOOLS {
            return Err(CrewError::InvalidPipeline(format!(
                "max tools reached ({MAX_TOOLS})"
            )));
        }

        tracing::debug!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Declarations for every registered tool, sorted by name.
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.values().map(|t| t.declaration()).collect()
    }

    /// Invoke a tool by name.
    pub async fn call(&self, name: &str, args: &serde_json::Value) -> Result<ToolResult, CrewError> {
        let tool = self
            .get(name)
            .ok_or_else(|| CrewError::UnknownTool(name.to_string()))?;
        tool.call(args).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
