// Prompt construction for the three backend call sites
//
// Pure functions: structured inputs in, text payloads out.

use super::types::{ImplementationStep, Plan};

pub const PLANNER_SYSTEM: &str = "\
You are a software planner. You turn a feature request into a concrete, minimal plan.
Respond with a single JSON object and nothing else. No markdown fences, no prose.";

pub const ARCHITECT_SYSTEM: &str = "\
You are a software architect. You break a plan into ordered, file-level implementation steps.
Respond with a single JSON object and nothing else. No markdown fences, no prose.";

pub const CODER_SYSTEM: &str = "\
You are an expert software engineer implementing one task in an existing project.
You have tools to read files, write files, list project files, and get the project directory.
Read what you need, then write complete file contents with write_file. When the task is
done, reply with a short summary and no further tool calls.";

/// Prompt for the planner's structured call.
pub fn planner_prompt(request: &str) -> String {
    format!(
        "Feature request:\n{request}\n\n\
         Produce a plan as a JSON object with this shape:\n\
         {{\n\
           \"name\": string,\n\
           \"description\": string,\n\
           \"tech_stack\": [string],\n\
           \"features\": [string],\n\
           \"files\": [{{\"path\": string, \"purpose\": string}}]\n\
         }}\n\
         Keep the scope tight: only what is necessary for this request."
    )
}

/// Prompt for the architect's structured call. Takes the serialized Plan.
pub fn architect_prompt(plan_json: &str) -> String {
    format!(
        "Plan:\n{plan_json}\n\n\
         Derive the ordered implementation steps as a JSON object with this shape:\n\
         {{\n\
           \"implementation_steps\": [\n\
             {{\"filepath\": string, \"task_description\": string}}\n\
           ]\n\
         }}\n\
         Order matters: steps are executed first to last, and each step names exactly \
         one file relative to the project root."
    )
}

/// Per-step instruction for the coding agent.
pub fn coder_step_prompt(step: &ImplementationStep, existing_content: &str) -> String {
    format!(
        "Task: {task}\n\
         File: {file}\n\
         Existing content:\n{existing}\n\
         Use write_file(path, content) to save your changes.",
        task = step.task_description,
        file = step.filepath,
        existing = existing_content,
    )
}

/// Serialize a Plan for embedding in the architect prompt.
pub fn plan_json(plan: &Plan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}
