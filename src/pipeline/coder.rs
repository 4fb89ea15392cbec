// Coder stage
//
// Invoked repeatedly by the controller. Each invocation executes exactly
// one implementation step through the tool-using agent, then advances
// the cursor. Once the cursor reaches the end of the step list the stage
// only emits the completion flag; repeated invocations after that are
// no-ops.

use tracing::info;

use crate::agent::CoderAgent;
use crate::error::PipelineError;
use crate::tools::workspace::read_existing_content;

use super::prompts::{coder_step_prompt, CODER_SYSTEM};
use super::types::{CoderPhase, CoderState, PipelineState, StageUpdate};

pub struct CoderStage {
    agent: CoderAgent,
}

impl CoderStage {
    pub fn new(agent: CoderAgent) -> Self {
        Self { agent }
    }

    /// Run one coder invocation against the current pipeline state.
    ///
    /// The cursor advances by exactly one after the agent's turn,
    /// whether or not the agent actually wrote the step's file; no
    /// verification of the written path is performed.
    pub async fn run(&self, state: &PipelineState) -> Result<StageUpdate, PipelineError> {
        let mut coder = match &state.coder {
            Some(coder) => coder.clone(),
            None => {
                let task_plan =
                    state
                        .task_plan
                        .clone()
                        .ok_or(PipelineError::MissingPrecondition {
                            stage: "coder",
                            key: "task_plan",
                        })?;
                info!(
                    steps = task_plan.implementation_steps.len(),
                    "Coder starting"
                );
                CoderState::new(task_plan)
            }
        };

        if coder.phase() == CoderPhase::Done {
            info!("Coder complete");
            return Ok(StageUpdate::completed(coder));
        }

        let step_idx = coder.current_step_idx;
        let step = coder
            .current_step()
            .cloned()
            .ok_or(PipelineError::MissingPrecondition {
                stage: "coder",
                key: "current_step",
            })?;

        info!(step_idx, file = %step.filepath, "Executing step");

        let root = self.agent.executor().context().root.clone();
        let existing_content = read_existing_content(&root, &step.filepath)
            .map_err(|source| PipelineError::ToolExecution { step_idx, source })?;

        let instruction = coder_step_prompt(&step, &existing_content);
        self.agent
            .run_step(step_idx, CODER_SYSTEM, instruction)
            .await?;

        coder.advance();
        Ok(StageUpdate::with_coder(coder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::DEFAULT_MAX_TOOL_OPS;
    use crate::claude::Message;
    use crate::generators::{Generator, GeneratorResponse};
    use crate::pipeline::types::{ImplementationStep, TaskPlan};
    use crate::tools::implementations::coder_registry;
    use crate::tools::types::{ToolContext, ToolDefinition};
    use crate::tools::ToolExecutor;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Generator that finishes every step without tool use and counts
    /// how often it was called.
    struct CountingGenerator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Generator for CountingGenerator {
        async fn generate(
            &self,
            _system: Option<&str>,
            _messages: Vec<Message>,
            _tools: Option<Vec<ToolDefinition>>,
        ) -> Result<GeneratorResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeneratorResponse::from_text("done"))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn stage_with(temp: &tempfile::TempDir, calls: Arc<AtomicUsize>) -> CoderStage {
        let executor = ToolExecutor::new(coder_registry(), ToolContext::new(temp.path()));
        let agent = CoderAgent::new(
            Arc::new(CountingGenerator { calls }),
            executor,
            DEFAULT_MAX_TOOL_OPS,
        );
        CoderStage::new(agent)
    }

    fn task_plan(n: usize) -> TaskPlan {
        TaskPlan {
            implementation_steps: (0..n)
                .map(|i| ImplementationStep {
                    filepath: format!("file_{}.txt", i),
                    task_description: format!("step {}", i),
                })
                .collect(),
            plan: None,
        }
    }

    #[tokio::test]
    async fn test_missing_task_plan_is_wiring_defect() {
        let temp = tempfile::tempdir().unwrap();
        let stage = stage_with(&temp, Arc::new(AtomicUsize::new(0)));
        let state = PipelineState::new("r");

        let err = stage.run(&state).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingPrecondition {
                stage: "coder",
                key: "task_plan"
            }
        ));
    }

    #[tokio::test]
    async fn test_first_invocation_initializes_and_runs_step_zero() {
        let temp = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = stage_with(&temp, calls.clone());
        let mut state = PipelineState::new("r");
        state.task_plan = Some(task_plan(2));

        let update = stage.run(&state).await.unwrap();
        let coder = update.coder.unwrap();
        assert_eq!(coder.current_step_idx, 1);
        assert!(!update.done);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_plan_completes_without_agent_call() {
        let temp = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = stage_with(&temp, calls.clone());
        let mut state = PipelineState::new("r");
        state.task_plan = Some(task_plan(0));

        let update = stage.run(&state).await.unwrap();
        assert!(update.done);
        assert_eq!(update.coder.unwrap().current_step_idx, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_done_invocation_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = stage_with(&temp, calls.clone());
        let mut state = PipelineState::new("r");
        state.task_plan = Some(task_plan(1));
        let mut coder = CoderState::new(task_plan(1));
        coder.advance();
        state.coder = Some(coder);

        for _ in 0..3 {
            let update = stage.run(&state).await.unwrap();
            assert!(update.done);
            assert_eq!(update.coder.unwrap().current_step_idx, 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
