// Tool execution system for the coding agent
//
// The agent gets exactly four file operations, all confined to the
// project root: read_file, write_file, list_files, get_current_directory.

pub mod executor;
pub mod implementations;
pub mod registry;
pub mod types;
pub mod workspace;

pub use executor::ToolExecutor;
pub use implementations::coder_registry;
pub use registry::{Tool, ToolRegistry};
pub use types::{ToolContext, ToolDefinition, ToolInputSchema, ToolResult, ToolUse};
pub use workspace::resolve_in_root;
