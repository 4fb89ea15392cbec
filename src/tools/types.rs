// Core types for tool execution system
//
// Compatible with Claude API tool use format

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Context passed to tools during execution
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Project root all file operations are confined to
    pub root: PathBuf,
}

impl ToolContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Tool definition (Claude API-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// JSON Schema for tool input parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String, // Usually "object"
    pub properties: Value,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    /// Create a simple schema with required string parameters
    pub fn simple(params: Vec<(&str, &str)>) -> Self {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for (param_name, param_desc) in params.iter() {
            properties.insert(
                param_name.to_string(),
                serde_json::json!({
                    "type": "string",
                    "description": param_desc
                }),
            );
            required.push(param_name.to_string());
        }

        Self {
            schema_type: "object".to_string(),
            properties: Value::Object(properties),
            required,
        }
    }

    /// Schema with no parameters (tools like get_current_directory)
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Value::Object(serde_json::Map::new()),
            required: Vec::new(),
        }
    }
}

/// Tool use request (from the model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,   // Format: toolu_[random]
    pub name: String, // Tool name
    pub input: Value, // Tool parameters (JSON object)
}

impl ToolUse {
    /// Generate unique tool use ID
    pub fn generate_id() -> String {
        use rand::Rng;
        let random: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        format!("toolu_{}", random)
    }

    pub fn new(name: String, input: Value) -> Self {
        Self {
            id: Self::generate_id(),
            name,
            input,
        }
    }
}

/// Tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_use_id: String, content: String) -> Self {
        Self {
            tool_use_id,
            content,
            is_error: false,
        }
    }

    pub fn error(tool_use_id: String, error_message: String) -> Self {
        Self {
            tool_use_id,
            content: error_message,
            is_error: true,
        }
    }
}
