// list_files tool - lists files under the project root

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolInputSchema};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use walkdir::WalkDir;

const MAX_LISTED_FILES: usize = 500;

pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List all files in the project, one relative path per line."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::empty()
    }

    async fn execute(&self, _input: Value, context: &ToolContext) -> Result<String> {
        let mut paths: Vec<String> = WalkDir::new(&context.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&context.root)
                    .ok()
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .filter(|p| !p.split('/').any(|seg| seg.starts_with('.')))
            .collect();

        paths.sort();

        if paths.is_empty() {
            return Ok("(no files)".to_string());
        }

        let shown = paths.len().min(MAX_LISTED_FILES);
        let mut listing = paths[..shown].join("\n");
        if paths.len() > shown {
            listing.push_str(&format!("\n[{} more files not shown]", paths.len() - shown));
        }
        Ok(listing)
    }
}
