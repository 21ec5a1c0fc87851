use std::path::{Component, Path, PathBuf};

use crate::error::{DivergeError, Result};

/// Maximum allowed path length for security
const MAX_PATH_LENGTH: usize = 4096;

/// Validate a relative path before it is joined onto a compare root.
pub fn validate_relative_path(rel_path: &str) -> Result<()> {
    if rel_path.is_empty() {
        return Err(DivergeError::InvalidPath("Relative path is empty".to_string()));
    }

    if rel_path.len() > MAX_PATH_LENGTH {
        return Err(DivergeError::InvalidPath(format!(
            "Path too long (max {MAX_PATH_LENGTH} bytes)"
        )));
    }

    if rel_path.bytes().any(|b| b == 0) {
        return Err(DivergeError::InvalidPath("Path contains null bytes".to_string()));
    }

    let path = Path::new(rel_path);
    if path.is_absolute() || rel_path.starts_with('/') {
        return Err(DivergeError::InvalidPath(format!(
            "Expected a relative path: {rel_path}"
        )));
    }

    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(DivergeError::InvalidPath(format!(
            "Path traversal detected: {rel_path}"
        )));
    }

    Ok(())
}

/// Resolve where a merged file is written: the recorded right-side path when
/// one exists, otherwise the right root joined with the relative path.
pub fn resolve_target_path(right_path: &str, right_root: &str, rel_path: &str) -> Result<PathBuf> {
    if !right_path.is_empty() {
        return Ok(PathBuf::from(right_path));
    }

    validate_relative_path(rel_path)?;
    if right_root.is_empty() {
        return Err(DivergeError::InvalidPath(format!(
            "No right directory to place {rel_path}"
        )));
    }

    Ok(Path::new(right_root).join(rel_path))
}
