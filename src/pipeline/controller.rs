// Pipeline controller
//
// planner → architect → coder, with the coder re-entered until it sets
// the completion flag. The controller only sequences stages and merges
// their updates; it holds no business logic. A configurable ceiling
// bounds coder re-entries so a runaway step list cannot spin forever.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::agent::{CoderAgent, DEFAULT_MAX_TOOL_OPS};
use crate::error::PipelineError;
use crate::generators::Generator;
use crate::tools::ToolExecutor;

use super::architect::ArchitectStage;
use super::coder::CoderStage;
use super::planner::PlannerStage;
use super::types::PipelineState;

/// Default ceiling on coder loop re-entries.
pub const DEFAULT_MAX_ITERATIONS: usize = 64;

pub struct Pipeline {
    planner: PlannerStage,
    architect: ArchitectStage,
    coder: CoderStage,
    max_iterations: usize,
}

impl Pipeline {
    /// Wire the three stages to one generator and one tool executor.
    pub fn new(generator: Arc<dyn Generator>, executor: ToolExecutor) -> Self {
        Self::with_limits(generator, executor, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOOL_OPS)
    }

    pub fn with_limits(
        generator: Arc<dyn Generator>,
        executor: ToolExecutor,
        max_iterations: usize,
        max_tool_ops: usize,
    ) -> Self {
        let agent = CoderAgent::new(generator.clone(), executor, max_tool_ops);
        Self {
            planner: PlannerStage::new(generator.clone()),
            architect: ArchitectStage::new(generator),
            coder: CoderStage::new(agent),
            max_iterations,
        }
    }

    /// Run the full pipeline for one request and return the final merged
    /// state. Any stage failure aborts the run.
    #[instrument(skip(self, request))]
    pub async fn run(&self, request: impl Into<String>) -> Result<PipelineState, PipelineError> {
        let mut state = PipelineState::new(request);
        info!(request = %state.request, "Pipeline starting");

        let update = self.planner.run(&state).await?;
        state.apply(update);

        let update = self.architect.run(&state).await?;
        state.apply(update);

        let mut iterations = 0usize;
        while !state.done {
            if iterations >= self.max_iterations {
                let step_idx = state
                    .coder
                    .as_ref()
                    .map(|coder| coder.current_step_idx)
                    .unwrap_or(0);
                return Err(PipelineError::IterationLimit {
                    max_iterations: self.max_iterations,
                    step_idx,
                });
            }

            let update = self.coder.run(&state).await?;
            state.apply(update);
            iterations += 1;
        }

        info!(
            steps = state
                .coder
                .as_ref()
                .map(|coder| coder.current_step_idx)
                .unwrap_or(0),
            "Pipeline complete"
        );
        Ok(state)
    }
}
