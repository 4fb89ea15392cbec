// get_current_directory tool - reports the project root

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolInputSchema};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub struct CurrentDirectoryTool;

#[async_trait]
impl Tool for CurrentDirectoryTool {
    fn name(&self) -> &str {
        "get_current_directory"
    }

    fn description(&self) -> &str {
        "Returns the project root directory all file paths are resolved against."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty()
    }

    async fn execute(&self, _input: Value, context: &ToolContext) -> Result<String> {
        Ok(context.root.display().to_string())
    }
}
