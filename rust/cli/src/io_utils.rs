//! Small filesystem helpers shared by commands that write files.

use std::path::Path;

/// Creates the parent directory of `path` if it does not exist yet.
///
/// # Example
///
/// ```rust,no_run
/// # use stablerace_cli::io_utils::ensure_parent_dir;
/// ensure_parent_dir(std::path::Path::new("out/runs/trace.jsonl")).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Writes `contents` to `path`, creating parent directories first.
pub fn write_text(path: &Path, contents: &str) -> Result<(), String> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}
