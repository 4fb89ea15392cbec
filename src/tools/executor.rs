// Tool execution engine
//
// Dispatches tool uses requested by the model. Any tool failure
// propagates as an error and aborts the step; there is no per-operation
// retry and no rollback of earlier writes.

use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ToolContext, ToolDefinition, ToolResult, ToolUse};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

/// Tool executor - manages tool execution lifecycle
pub struct ToolExecutor {
    registry: ToolRegistry,
    context: ToolContext,
}

impl ToolExecutor {
    /// Create new tool executor rooted at a project directory
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self { registry, context }
    }

    /// Execute a single tool use
    #[instrument(skip(self, tool_use), fields(tool = %tool_use.name, id = %tool_use.id))]
    pub async fn execute_tool(&self, tool_use: &ToolUse) -> Result<ToolResult> {
        info!("Executing tool: {}", tool_use.name);

        let tool = self
            .registry
            .get(&tool_use.name)
            .context(format!("Tool '{}' not found", tool_use.name))?;

        let output = tool
            .execute(tool_use.input.clone(), &self.context)
            .await
            .with_context(|| format!("Tool '{}' failed", tool_use.name))?;

        debug!("Tool executed successfully");
        Ok(ToolResult::success(tool_use.id.clone(), output))
    }

    /// Execute multiple tool uses in sequence, stopping at the first failure
    #[instrument(skip(self, tool_uses))]
    pub async fn execute_tool_uses(&self, tool_uses: &[ToolUse]) -> Result<Vec<ToolResult>> {
        info!("Executing {} tool(s)", tool_uses.len());

        let mut results = Vec::new();
        for tool_use in tool_uses {
            let result = self.execute_tool(tool_use).await?;
            results.push(result);
        }

        Ok(results)
    }

    /// Tool definitions for the model request
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    /// Project root the tools operate in
    pub fn context(&self) -> &ToolContext {
        &self.context
    }
}
