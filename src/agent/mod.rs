// Tool-using coding agent
//
// Runs one implementation step: the model is given the four file tools
// and drives them until it replies with a turn containing no tool use.
// The dispatch loop is bounded — a step that burns through the operation
// ceiling without finishing aborts the pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use crate::claude::{ContentBlock, Message};
use crate::error::PipelineError;
use crate::generators::Generator;
use crate::tools::ToolExecutor;

/// Default ceiling on tool operations within one step.
pub const DEFAULT_MAX_TOOL_OPS: usize = 16;

/// What the agent did for one step.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// Number of tool operations executed
    pub ops_used: usize,
    /// The model's final text turn
    pub summary: String,
}

/// Drives the tool-dispatch loop for one implementation step.
pub struct CoderAgent {
    generator: Arc<dyn Generator>,
    executor: ToolExecutor,
    max_ops: usize,
}

impl CoderAgent {
    pub fn new(generator: Arc<dyn Generator>, executor: ToolExecutor, max_ops: usize) -> Self {
        Self {
            generator,
            executor,
            max_ops,
        }
    }

    /// Run the agent's turn for the step at `step_idx`.
    ///
    /// The loop terminates when the model answers without requesting a
    /// tool, or errors once `max_ops` operations have been spent.
    pub async fn run_step(
        &self,
        step_idx: usize,
        system: &str,
        instruction: String,
    ) -> Result<AgentOutcome, PipelineError> {
        let tool_defs = self.executor.definitions();
        let mut messages = vec![Message::user(instruction)];
        let mut ops_used = 0usize;

        loop {
            let response = self
                .generator
                .generate(Some(system), messages.clone(), Some(tool_defs.clone()))
                .await
                .map_err(|source| PipelineError::Backend {
                    stage: "coder",
                    source,
                })?;

            if response.tool_uses.is_empty() {
                info!(step_idx, ops_used, "Agent finished step");
                return Ok(AgentOutcome {
                    ops_used,
                    summary: response.text,
                });
            }

            if ops_used + response.tool_uses.len() > self.max_ops {
                return Err(PipelineError::ToolBudgetExceeded {
                    step_idx,
                    max_ops: self.max_ops,
                });
            }

            debug!(
                step_idx,
                requested = response.tool_uses.len(),
                "Agent requested tool operations"
            );

            // Echo the assistant turn back, then answer each tool_use
            // with its tool_result in a single user turn.
            messages.push(Message::assistant_blocks(response.content_blocks.clone()));

            let results = self
                .executor
                .execute_tool_uses(&response.tool_uses)
                .await
                .map_err(|source| PipelineError::ToolExecution { step_idx, source })?;

            ops_used += results.len();

            let result_blocks = results
                .into_iter()
                .map(|result| ContentBlock::ToolResult {
                    tool_use_id: result.tool_use_id,
                    content: result.content,
                    is_error: None,
                })
                .collect();
            messages.push(Message::user_blocks(result_blocks));
        }
    }

    /// Project root the agent's tools operate in
    pub fn executor(&self) -> &ToolExecutor {
        &self.executor
    }
}
