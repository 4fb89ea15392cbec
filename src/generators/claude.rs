// Claude generator implementation

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::claude::{ClaudeClient, ContentBlock, Message, MessageRequest};
use crate::tools::types::{ToolDefinition, ToolUse};

use super::{Generator, GeneratorResponse};

/// Claude API generator implementation
pub struct ClaudeGenerator {
    client: Arc<ClaudeClient>,
    model: String,
    max_tokens: u32,
}

impl ClaudeGenerator {
    pub fn new(client: Arc<ClaudeClient>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens,
        }
    }

    /// Convert Claude MessageResponse to unified GeneratorResponse
    fn convert_to_unified(&self, response: crate::claude::MessageResponse) -> GeneratorResponse {
        let text = response
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        let tool_uses = response
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolUse {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect();

        GeneratorResponse {
            text,
            content_blocks: response.content,
            tool_uses,
            stop_reason: response.stop_reason,
        }
    }
}

#[async_trait]
impl Generator for ClaudeGenerator {
    async fn generate(
        &self,
        system: Option<&str>,
        messages: Vec<Message>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<GeneratorResponse> {
        let mut request = MessageRequest::new(&self.model, self.max_tokens, messages);
        if let Some(system) = system {
            request = request.with_system(system);
        }
        if let Some(tools) = tools {
            request = request.with_tools(tools);
        }

        let response = self.client.send_message(&request).await?;
        Ok(self.convert_to_unified(response))
    }

    fn name(&self) -> &str {
        "Claude API"
    }
}
