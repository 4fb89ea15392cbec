// Planner → architect → coder pipeline
//
// The controller sequences three stages and re-enters the coder stage
// until its step cursor reaches the end of the task plan.

pub mod architect;
pub mod coder;
pub mod controller;
pub mod planner;
pub mod prompts;
pub mod types;

pub use architect::ArchitectStage;
pub use coder::CoderStage;
pub use controller::{Pipeline, DEFAULT_MAX_ITERATIONS};
pub use planner::PlannerStage;
pub use types::{
    CoderPhase, CoderState, ImplementationStep, PipelineState, Plan, PlanFile, StageUpdate,
    TaskPlan,
};
