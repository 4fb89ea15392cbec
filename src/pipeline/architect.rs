// Architect stage
//
// One structured backend call: Plan in, TaskPlan out. The Plan
// back-reference is stitched in locally; the backend's echo of it is
// never trusted.

use std::sync::Arc;

use tracing::info;

use crate::error::PipelineError;
use crate::generators::{generate_structured, Generator};

use super::prompts::{architect_prompt, plan_json, ARCHITECT_SYSTEM};
use super::types::{PipelineState, StageUpdate, TaskPlan};

pub struct ArchitectStage {
    generator: Arc<dyn Generator>,
}

impl ArchitectStage {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Derive a TaskPlan from the current Plan. A missing Plan is a
    /// wiring defect, not a recoverable condition.
    pub async fn run(&self, state: &PipelineState) -> Result<StageUpdate, PipelineError> {
        let plan = state
            .plan
            .as_ref()
            .ok_or(PipelineError::MissingPrecondition {
                stage: "architect",
                key: "plan",
            })?;

        let serialized = plan_json(plan).map_err(|source| PipelineError::Backend {
            stage: "architect",
            source: source.into(),
        })?;

        let mut task_plan: TaskPlan = generate_structured(
            self.generator.as_ref(),
            "architect",
            ARCHITECT_SYSTEM,
            architect_prompt(&serialized),
        )
        .await?;

        task_plan.plan = Some(plan.clone());

        // Diagnostic only: surface the assembled task plan for inspection.
        if let Ok(json) = serde_json::to_string(&task_plan) {
            info!(task_plan = %json, "Architect assembled task plan");
        }

        Ok(StageUpdate::with_task_plan(task_plan))
    }
}
