// Unified generator interface for the reasoning backend
//
// The pipeline stages only see this trait; the production implementation
// is ClaudeGenerator, tests supply scripted fakes.

use anyhow::Result;
use async_trait::async_trait;

use crate::claude::{ContentBlock, Message};
use crate::tools::types::{ToolDefinition, ToolUse};

pub mod claude;
pub mod structured;

pub use claude::ClaudeGenerator;
pub use structured::generate_structured;

/// Reasoning backend interface
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate one response for the given conversation
    async fn generate(
        &self,
        system: Option<&str>,
        messages: Vec<Message>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<GeneratorResponse>;

    /// Get generator name for logging
    fn name(&self) -> &str;
}

/// Unified response format
#[derive(Debug, Clone)]
pub struct GeneratorResponse {
    /// Primary text response
    pub text: String,

    /// Content blocks (for rich responses)
    pub content_blocks: Vec<ContentBlock>,

    /// Tool uses requested by generator
    pub tool_uses: Vec<ToolUse>,

    /// Why generation stopped, if the backend reported it
    pub stop_reason: Option<String>,
}

impl GeneratorResponse {
    /// Plain text response with no tool use
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            content_blocks: vec![ContentBlock::Text { text: text.clone() }],
            text,
            tool_uses: Vec::new(),
            stop_reason: Some("end_turn".to_string()),
        }
    }
}
