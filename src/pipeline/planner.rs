// Planner stage
//
// One structured backend call: free-text request in, Plan out.

use std::sync::Arc;

use tracing::info;

use crate::error::PipelineError;
use crate::generators::{generate_structured, Generator};

use super::prompts::{planner_prompt, PLANNER_SYSTEM};
use super::types::{PipelineState, Plan, StageUpdate};

pub struct PlannerStage {
    generator: Arc<dyn Generator>,
}

impl PlannerStage {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Produce exactly one Plan from the user's request.
    pub async fn run(&self, state: &PipelineState) -> Result<StageUpdate, PipelineError> {
        if state.request.trim().is_empty() {
            return Err(PipelineError::MissingPrecondition {
                stage: "planner",
                key: "request",
            });
        }

        let plan: Plan = generate_structured(
            self.generator.as_ref(),
            "planner",
            PLANNER_SYSTEM,
            planner_prompt(&state.request),
        )
        .await?;

        info!(plan = %plan.name, "Planner produced a plan");
        Ok(StageUpdate::with_plan(plan))
    }
}
