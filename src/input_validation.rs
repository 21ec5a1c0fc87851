//! Input validation for user-edited settings and CLI arguments
//!
//! Ignore-directory entries are matched as globs against directory names, so
//! they are validated the same way before they reach the scanner.

use anyhow::{bail, Result};

const MAX_IGNORE_DIRS: usize = 200;
const MAX_IGNORE_DIR_LENGTH: usize = 255;

/// Validate a single ignore-directory entry.
pub fn validate_ignore_dir(entry: &str) -> Result<()> {
    let trimmed = entry.trim();

    if trimmed.is_empty() {
        bail!("Ignore entry cannot be empty");
    }

    if trimmed.len() > MAX_IGNORE_DIR_LENGTH {
        bail!(
            "Ignore entry too long: '{}' ({} bytes, max: {})",
            trimmed.chars().take(20).collect::<String>(),
            trimmed.len(),
            MAX_IGNORE_DIR_LENGTH
        );
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        bail!("Ignore entry must be a directory name, not a path: '{}'", trimmed);
    }

    if trimmed.contains('\0') || trimmed.contains('\n') || trimmed.contains('\r') {
        bail!("Ignore entry contains control characters");
    }

    globset::Glob::new(trimmed)
        .map_err(|e| anyhow::anyhow!("Invalid glob pattern '{}': {}", trimmed, e))?;

    Ok(())
}

/// Validate the whole ignore list as loaded from config.
pub fn validate_ignore_dirs(entries: &[String]) -> Result<()> {
    if entries.len() > MAX_IGNORE_DIRS {
        bail!(
            "Too many ignore entries: {} (max: {})",
            entries.len(),
            MAX_IGNORE_DIRS
        );
    }

    for entry in entries {
        validate_ignore_dir(entry)?;
    }

    Ok(())
}

/// Validate a compare root given on the command line.
pub fn validate_path_argument(path: &str) -> Result<()> {
    if path.len() > 4096 {
        bail!("Path too long: {} bytes (max: 4096)", path.len());
    }

    if path.contains('\0') {
        bail!("Path contains null byte");
    }

    Ok(())
}
