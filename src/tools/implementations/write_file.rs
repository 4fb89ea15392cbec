// write_file tool - create or overwrite files in the project tree
//
// Returns a short summary:
//   Created src/foo.rs (42 lines)
//   Updated src/bar.rs (42 lines)

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolInputSchema};
use crate::tools::workspace::resolve_in_root;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fs;

pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Writes content to a file, creating it if it doesn't exist or overwriting it if it \
         does. Always provide the complete file content."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![
            ("path", "Path to the file, relative to the project root"),
            ("content", "The complete file content to write"),
        ])
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<String> {
        let rel_path = input["path"].as_str().context("Missing path parameter")?;
        let content = input["content"]
            .as_str()
            .context("Missing content parameter")?;

        let path = resolve_in_root(&context.root, rel_path)?;
        let is_new = !path.exists();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directories for: {}", rel_path))?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", rel_path))?;

        let line_count = content.lines().count();
        Ok(format!(
            "{} {} ({} line{})",
            if is_new { "Created" } else { "Updated" },
            rel_path,
            line_count,
            if line_count == 1 { "" } else { "s" }
        ))
    }
}
