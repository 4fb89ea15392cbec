// Project-root path resolution
//
// Every file operation the agent performs goes through here. Paths are
// relative to the project root and may not escape it.

use anyhow::{bail, Result};
use std::path::{Component, Path, PathBuf};

/// Resolve a model-supplied path against the project root.
///
/// Rejects absolute paths and any `..` component before touching the
/// filesystem, so the check holds for files that do not exist yet.
pub fn resolve_in_root(root: &Path, relative: &str) -> Result<PathBuf> {
    let rel = Path::new(relative);

    if rel.as_os_str().is_empty() {
        bail!("Empty path");
    }
    if rel.is_absolute() {
        bail!("Absolute paths are not allowed: {}", relative);
    }
    for component in rel.components() {
        match component {
            Component::ParentDir => {
                bail!("Path escapes the project root: {}", relative)
            }
            Component::Prefix(_) | Component::RootDir => {
                bail!("Absolute paths are not allowed: {}", relative)
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(root.join(rel))
}

/// Read a file's current contents, treating a missing file as empty
/// (the "new file" case).
pub fn read_existing_content(root: &Path, relative: &str) -> Result<String> {
    let path = resolve_in_root(root, relative)?;
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to read {}", relative))),
    }
}
