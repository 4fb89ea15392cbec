// Integration tests for the full planner → architect → coder pipeline,
// driven by scripted generator responses against a tempdir project root.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use weaver::claude::{ContentBlock, Message};
use weaver::error::PipelineError;
use weaver::generators::{Generator, GeneratorResponse};
use weaver::pipeline::{Pipeline, PipelineState};
use weaver::tools::types::{ToolDefinition, ToolUse};
use weaver::tools::{coder_registry, ToolContext, ToolExecutor};

/// Replays a fixed sequence of responses and counts every call.
struct ScriptedGenerator {
    responses: Mutex<Vec<GeneratorResponse>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(mut responses: Vec<GeneratorResponse>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(
        &self,
        _system: Option<&str>,
        _messages: Vec<Message>,
        _tools: Option<Vec<ToolDefinition>>,
    ) -> Result<GeneratorResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn text(body: &str) -> GeneratorResponse {
    GeneratorResponse::from_text(body)
}

fn tool_use(name: &str, input: serde_json::Value) -> GeneratorResponse {
    let tool_use = ToolUse::new(name.to_string(), input);
    GeneratorResponse {
        text: String::new(),
        content_blocks: vec![ContentBlock::ToolUse {
            id: tool_use.id.clone(),
            name: tool_use.name.clone(),
            input: tool_use.input.clone(),
        }],
        tool_uses: vec![tool_use],
        stop_reason: Some("tool_use".to_string()),
    }
}

fn write_file(path: &str, content: &str) -> GeneratorResponse {
    tool_use(
        "write_file",
        serde_json::json!({"path": path, "content": content}),
    )
}

fn plan_response() -> GeneratorResponse {
    // Fenced, the way models actually answer.
    text(
        "```json\n\
         {\"name\": \"License file\",\n\
          \"description\": \"Add an MIT license to the project.\",\n\
          \"tech_stack\": [],\n\
          \"features\": [\"LICENSE file at the repo root\"],\n\
          \"files\": [{\"path\": \"LICENSE\", \"purpose\": \"MIT license text\"}]}\n\
         ```",
    )
}

fn steps_response(filepaths: &[&str]) -> GeneratorResponse {
    let steps: Vec<serde_json::Value> = filepaths
        .iter()
        .map(|path| {
            serde_json::json!({
                "filepath": path,
                "task_description": format!("Write {}", path),
            })
        })
        .collect();
    text(&serde_json::json!({ "implementation_steps": steps }).to_string())
}

fn pipeline_with(
    temp: &tempfile::TempDir,
    generator: Arc<ScriptedGenerator>,
    max_iterations: usize,
) -> Pipeline {
    let executor = ToolExecutor::new(coder_registry(), ToolContext::new(temp.path()));
    Pipeline::with_limits(generator, executor, max_iterations, 16)
}

async fn run(
    temp: &tempfile::TempDir,
    script: Vec<GeneratorResponse>,
    max_iterations: usize,
    request: &str,
) -> (Result<PipelineState, PipelineError>, usize) {
    let generator = Arc::new(ScriptedGenerator::new(script));
    let pipeline = pipeline_with(temp, generator.clone(), max_iterations);
    let result = pipeline.run(request).await;
    (result, generator.calls())
}

#[tokio::test]
async fn test_license_request_end_to_end() {
    let temp = tempfile::tempdir().unwrap();
    let script = vec![
        plan_response(),
        steps_response(&["LICENSE"]),
        // Step 0: one write, then a finishing turn.
        write_file("LICENSE", "MIT License\n\nCopyright (c) 2026\n"),
        text("Wrote the LICENSE file."),
    ];

    let (result, calls) = run(&temp, script, 64, "add an MIT license").await;
    let state = result.unwrap();

    assert!(state.done);
    assert_eq!(state.plan.as_ref().unwrap().name, "License file");
    let coder = state.coder.as_ref().unwrap();
    assert_eq!(coder.current_step_idx, 1);
    assert_eq!(
        std::fs::read_to_string(temp.path().join("LICENSE")).unwrap(),
        "MIT License\n\nCopyright (c) 2026\n"
    );
    // planner + architect + (write + finish) for the single step; the
    // completion invocation itself makes no backend call.
    assert_eq!(calls, 4);
}

#[tokio::test]
async fn test_three_steps_complete_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let files = ["a.txt", "b.txt", "c.txt"];
    let mut script = vec![plan_response(), steps_response(&files)];
    for file in &files {
        script.push(write_file(file, "content\n"));
        script.push(text("done"));
    }

    let (result, calls) = run(&temp, script, 64, "write three files").await;
    let state = result.unwrap();

    assert!(state.done);
    assert_eq!(state.coder.as_ref().unwrap().current_step_idx, 3);
    for file in &files {
        assert!(temp.path().join(file).exists(), "{} should exist", file);
    }
    assert_eq!(calls, 2 + 3 * 2);
}

#[tokio::test]
async fn test_empty_step_list_completes_without_agent_calls() {
    let temp = tempfile::tempdir().unwrap();
    let script = vec![plan_response(), steps_response(&[])];

    let (result, calls) = run(&temp, script, 64, "nothing to do").await;
    let state = result.unwrap();

    assert!(state.done);
    assert_eq!(state.coder.as_ref().unwrap().current_step_idx, 0);
    // Only the two structured calls; the coder never invoked the backend.
    assert_eq!(calls, 2);
}

#[tokio::test]
async fn test_task_plan_carries_plan_back_reference() {
    let temp = tempfile::tempdir().unwrap();
    let script = vec![plan_response(), steps_response(&[])];

    let (result, _) = run(&temp, script, 64, "nothing to do").await;
    let state = result.unwrap();

    let task_plan = state.task_plan.as_ref().unwrap();
    assert_eq!(task_plan.plan.as_ref(), state.plan.as_ref());
}

#[tokio::test]
async fn test_empty_request_rejected_before_any_backend_call() {
    let temp = tempfile::tempdir().unwrap();
    let (result, calls) = run(&temp, vec![], 64, "   ").await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::MissingPrecondition {
            stage: "planner",
            key: "request"
        }
    ));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_planner_schema_failure_stops_run() {
    let temp = tempfile::tempdir().unwrap();
    let script = vec![text("I would be happy to help with that!")];

    let (result, calls) = run(&temp, script, 64, "add a feature").await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::SchemaValidation {
            stage: "planner",
            ..
        }
    ));
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_architect_schema_failure_prevents_coder_invocation() {
    let temp = tempfile::tempdir().unwrap();
    let script = vec![plan_response(), text("no json here")];

    let (result, calls) = run(&temp, script, 64, "add a feature").await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::SchemaValidation {
            stage: "architect",
            ..
        }
    ));
    // The coder stage never ran: no third call, no files written.
    assert_eq!(calls, 2);
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_tool_failure_mid_plan_aborts_after_completed_steps() {
    let temp = tempfile::tempdir().unwrap();
    let script = vec![
        plan_response(),
        steps_response(&["first.txt", "second.txt", "third.txt"]),
        write_file("first.txt", "ok\n"),
        text("done"),
        // Step 1 tries to escape the project root and fails.
        write_file("../escape.txt", "nope"),
    ];

    let (result, _) = run(&temp, script, 64, "write three files").await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ToolExecution { step_idx: 1, .. }
    ));
    // Step 0's work survives; step 2 was never attempted.
    assert!(temp.path().join("first.txt").exists());
    assert!(!temp.path().join("third.txt").exists());
}

#[tokio::test]
async fn test_iteration_ceiling_bounds_coder_invocations() {
    let temp = tempfile::tempdir().unwrap();
    let files = ["a", "b", "c", "d", "e"];
    let mut script = vec![plan_response(), steps_response(&files)];
    for file in &files {
        script.push(write_file(file, "x\n"));
        script.push(text("done"));
    }

    let (result, calls) = run(&temp, script, 2, "write five files").await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::IterationLimit {
            max_iterations: 2,
            step_idx: 2
        }
    ));
    // Exactly two coder invocations ran before the ceiling tripped.
    assert_eq!(calls, 2 + 2 * 2);
    assert!(temp.path().join("a").exists());
    assert!(temp.path().join("b").exists());
    assert!(!temp.path().join("c").exists());
}

#[tokio::test]
async fn test_tool_budget_exceeded_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let mut script = vec![plan_response(), steps_response(&["loop.txt"])];
    // Model keeps requesting tools and never finishes the step.
    for i in 0..4 {
        script.push(write_file("loop.txt", &format!("attempt {}\n", i)));
    }

    let generator = Arc::new(ScriptedGenerator::new(script));
    let executor = ToolExecutor::new(coder_registry(), ToolContext::new(temp.path()));
    let pipeline = Pipeline::with_limits(generator, executor, 64, 3);

    let err = pipeline.run("spin on one file").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ToolBudgetExceeded {
            step_idx: 0,
            max_ops: 3
        }
    ));
}

#[tokio::test]
async fn test_backend_failure_surfaces_stage() {
    let temp = tempfile::tempdir().unwrap();
    // Empty script: the planner's first call errors with "script exhausted".
    let (result, _) = run(&temp, vec![], 64, "add a feature").await;

    assert!(matches!(
        result.unwrap_err(),
        PipelineError::Backend {
            stage: "planner",
            ..
        }
    ));
}
