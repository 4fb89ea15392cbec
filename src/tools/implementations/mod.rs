// The four file operations available to the coding agent

pub mod current_directory;
pub mod list_files;
pub mod read_file;
pub mod write_file;

pub use current_directory::CurrentDirectoryTool;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use write_file::WriteFileTool;

use crate::tools::ToolRegistry;

/// Build the registry the coding agent runs with.
pub fn coder_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ReadFileTool));
    registry.register(Box::new(WriteFileTool));
    registry.register(Box::new(ListFilesTool));
    registry.register(Box::new(CurrentDirectoryTool));
    registry
}
