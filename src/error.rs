// Pipeline error taxonomy
//
// Every variant is fatal: a failed stage aborts the run and nothing
// attempts recovery or retry at this level. Transport-level retry lives
// inside the HTTP client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The backend's reply could not be parsed into the stage's schema.
    #[error("{stage} stage returned output that does not match its schema: {detail}")]
    SchemaValidation { stage: &'static str, detail: String },

    /// A stage was invoked without the state an upstream stage should
    /// have produced. Always a wiring defect, never a runtime condition.
    #[error("{stage} stage invoked without required state '{key}'")]
    MissingPrecondition {
        stage: &'static str,
        key: &'static str,
    },

    /// The reasoning backend call itself failed.
    #[error("{stage} stage backend request failed")]
    Backend {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// A tool operation failed while executing an implementation step.
    #[error("tool execution failed during step {step_idx}")]
    ToolExecution {
        step_idx: usize,
        #[source]
        source: anyhow::Error,
    },

    /// A single step spent its entire tool-operation budget without the
    /// model signalling completion.
    #[error("step {step_idx} exceeded the tool operation budget of {max_ops}")]
    ToolBudgetExceeded { step_idx: usize, max_ops: usize },

    /// The coder loop hit its invocation ceiling before the step list
    /// was exhausted.
    #[error("coder loop hit the iteration ceiling of {max_iterations} at step {step_idx}")]
    IterationLimit {
        max_iterations: usize,
        step_idx: usize,
    },
}

impl PipelineError {
    /// Stage responsible for the failure
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::SchemaValidation { stage, .. } => stage,
            PipelineError::MissingPrecondition { stage, .. } => stage,
            PipelineError::Backend { stage, .. } => stage,
            PipelineError::ToolExecution { .. } => "coder",
            PipelineError::ToolBudgetExceeded { .. } => "coder",
            PipelineError::IterationLimit { .. } => "coder",
        }
    }
}
