// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::agent::DEFAULT_MAX_TOOL_OPS;
use crate::pipeline::DEFAULT_MAX_ITERATIONS;

/// Default Claude model used for all three stages
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default max tokens per generation request
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Anthropic API key (from config file or ANTHROPIC_API_KEY)
    pub api_key: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Max tokens per generation request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Ceiling on coder invocations per run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Ceiling on tool operations per implementation step
    #[serde(default = "default_max_tool_ops")]
    pub max_tool_ops: usize,

    /// Project root the file tools operate in (defaults to cwd)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_max_tool_ops() -> usize {
    DEFAULT_MAX_TOOL_OPS
}

impl Config {
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            model: default_model(),
            max_tokens: default_max_tokens(),
            max_iterations: default_max_iterations(),
            max_tool_ops: default_max_tool_ops(),
            project_root: None,
        }
    }

    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("API key is empty. Set it in ~/.weaver/config.toml or export ANTHROPIC_API_KEY");
        }

        if !self.api_key.starts_with("sk-ant-") {
            anyhow::bail!(
                "Claude API key has incorrect format (keys start with 'sk-ant-').\n\
                 Get a valid key from https://console.anthropic.com/"
            );
        }

        if self.max_iterations == 0 {
            anyhow::bail!("max_iterations must be greater than 0");
        }

        if self.max_tool_ops == 0 {
            anyhow::bail!("max_tool_ops must be greater than 0");
        }

        if let Some(ref root) = self.project_root {
            if !root.is_dir() {
                anyhow::bail!("project_root {:?} is not a directory", root);
            }
        }

        Ok(())
    }
}
