// Pipeline data model
//
// Plan and TaskPlan are the structured outputs of the two schema-
// constrained backend calls. CoderState is the cursor the coder stage
// carries across loop re-entries. PipelineState is the ambient state the
// controller threads through the stages; stages return a StageUpdate and
// the controller merges it additively.

use serde::{Deserialize, Serialize};

/// One file named by the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    /// Path relative to the project root
    pub path: String,
    /// What the file is for
    pub purpose: String,
}

/// High-level feature plan produced by the planner stage.
///
/// The controller never inspects these fields; it forwards the value and
/// serializes it into the architect prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Short feature name
    pub name: String,
    /// One-paragraph description of the feature
    pub description: String,
    /// Languages/frameworks the plan assumes
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Conceptual features the request breaks down into
    #[serde(default)]
    pub features: Vec<String>,
    /// Files the plan expects to touch
    #[serde(default)]
    pub files: Vec<PlanFile>,
}

/// One unit of coding work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationStep {
    /// File path relative to the project root
    pub filepath: String,
    /// Free-text description of the work
    pub task_description: String,
}

/// Ordered list of implementation steps derived from a Plan.
///
/// `plan` is stitched in by the architect stage after the backend call;
/// the backend's echo of it is never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub implementation_steps: Vec<ImplementationStep>,
    #[serde(default)]
    pub plan: Option<Plan>,
}

/// Coder stage phase derived from the cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoderPhase {
    /// current_step_idx < number of steps
    InProgress,
    /// current_step_idx == number of steps
    Done,
}

/// Mutable cursor over a TaskPlan's steps, carried across coder loop
/// re-entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CoderState {
    pub task_plan: TaskPlan,
    /// 0-based index of the next step to execute
    pub current_step_idx: usize,
}

impl CoderState {
    pub fn new(task_plan: TaskPlan) -> Self {
        Self {
            task_plan,
            current_step_idx: 0,
        }
    }

    /// Completion check, independent of step advancement
    pub fn phase(&self) -> CoderPhase {
        if self.current_step_idx >= self.task_plan.implementation_steps.len() {
            CoderPhase::Done
        } else {
            CoderPhase::InProgress
        }
    }

    /// The step the cursor points at, if any
    pub fn current_step(&self) -> Option<&ImplementationStep> {
        self.task_plan
            .implementation_steps
            .get(self.current_step_idx)
    }

    /// Advance the cursor by exactly one step. Saturates at the step
    /// count so repeated calls after completion cannot push the index
    /// past the invariant bound.
    pub fn advance(&mut self) {
        if self.current_step_idx < self.task_plan.implementation_steps.len() {
            self.current_step_idx += 1;
        }
    }
}

/// Ambient state threaded through every stage invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    /// The user's original request
    pub request: String,
    pub plan: Option<Plan>,
    pub task_plan: Option<TaskPlan>,
    pub coder: Option<CoderState>,
    /// Completion flag set when the coder stage reports DONE
    pub done: bool,
}

impl PipelineState {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            plan: None,
            task_plan: None,
            coder: None,
            done: false,
        }
    }

    /// Merge a stage's returned update into the ambient state. The merge
    /// is additive: absent fields leave the existing values untouched.
    pub fn apply(&mut self, update: StageUpdate) {
        if let Some(plan) = update.plan {
            self.plan = Some(plan);
        }
        if let Some(task_plan) = update.task_plan {
            self.task_plan = Some(task_plan);
        }
        if let Some(coder) = update.coder {
            self.coder = Some(coder);
        }
        if update.done {
            self.done = true;
        }
    }
}

/// Partial state returned by a stage. Each stage sets only the keys it
/// actually updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageUpdate {
    pub plan: Option<Plan>,
    pub task_plan: Option<TaskPlan>,
    pub coder: Option<CoderState>,
    pub done: bool,
}

impl StageUpdate {
    pub fn with_plan(plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn with_task_plan(task_plan: TaskPlan) -> Self {
        Self {
            task_plan: Some(task_plan),
            ..Self::default()
        }
    }

    pub fn with_coder(coder: CoderState) -> Self {
        Self {
            coder: Some(coder),
            ..Self::default()
        }
    }

    pub fn completed(coder: CoderState) -> Self {
        Self {
            coder: Some(coder),
            done: true,
            ..Self::default()
        }
    }
}
