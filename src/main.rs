// Weaver - request-to-code automation pipeline
// Main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use weaver::claude::ClaudeClient;
use weaver::config::load_config;
use weaver::generators::ClaudeGenerator;
use weaver::pipeline::Pipeline;
use weaver::tools::{coder_registry, ToolContext, ToolExecutor};

#[derive(Parser)]
#[command(name = "weaver")]
#[command(about = "Turn a feature request into a plan, task breakdown, and file edits")]
struct Args {
    /// The feature request to implement
    request: String,

    /// Project root the file tools operate in (defaults to config, then cwd)
    #[arg(long)]
    project_root: Option<PathBuf>,

    /// Model identifier override
    #[arg(long)]
    model: Option<String>,

    /// Ceiling on coder invocations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Ceiling on tool operations per implementation step
    #[arg(long)]
    max_tool_ops: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Load configuration, then apply CLI overrides
    let mut config = load_config()?;
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(max_tool_ops) = args.max_tool_ops {
        config.max_tool_ops = max_tool_ops;
    }
    if let Some(project_root) = args.project_root {
        config.project_root = Some(project_root);
    }
    config.validate()?;

    let project_root = match config.project_root.clone() {
        Some(root) => root,
        None => std::env::current_dir().context("Could not determine current directory")?,
    };
    let project_root = project_root.canonicalize().unwrap_or(project_root);

    // Create Claude client and generator
    let client = Arc::new(ClaudeClient::new(config.api_key.clone())?);
    let generator = Arc::new(ClaudeGenerator::new(
        client,
        config.model.clone(),
        config.max_tokens,
    ));

    // Wire the tool executor to the project root
    let executor = ToolExecutor::new(coder_registry(), ToolContext::new(project_root.clone()));

    let pipeline = Pipeline::with_limits(
        generator,
        executor,
        config.max_iterations,
        config.max_tool_ops,
    );

    let state = pipeline.run(args.request).await?;

    // Summarize the run
    if let Some(plan) = &state.plan {
        println!("Plan: {}", plan.name);
        println!("  {}", plan.description);
    }
    if let Some(task_plan) = &state.task_plan {
        println!("Steps completed: {}", task_plan.implementation_steps.len());
        for step in &task_plan.implementation_steps {
            println!("  • {} ({})", step.task_description, step.filepath);
        }
    }
    println!("Project root: {}", project_root.display());

    Ok(())
}
