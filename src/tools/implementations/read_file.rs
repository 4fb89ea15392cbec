// read_file tool - reads file contents from the project tree
//
// A missing file is reported as empty content rather than an error, so
// the model can ask about a file it is about to create.

use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolInputSchema};
use crate::tools::workspace::read_existing_content;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

const MAX_CONTENT_CHARS: usize = 50_000;

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file in the project. Returns empty content if the file \
         does not exist yet. Reads up to 50,000 characters."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![(
            "path",
            "Path to the file, relative to the project root",
        )])
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<String> {
        let path = input["path"].as_str().context("Missing path parameter")?;

        let contents = read_existing_content(&context.root, path)?;

        if contents.len() > MAX_CONTENT_CHARS {
            // Back off to a char boundary so the slice cannot panic.
            let mut cut = MAX_CONTENT_CHARS;
            while !contents.is_char_boundary(cut) {
                cut -= 1;
            }
            return Ok(format!(
                "{}\n\n[File truncated - showing first {} of {} total characters]",
                &contents[..cut],
                cut,
                contents.len()
            ));
        }
        Ok(contents)
    }
}
