//! Helpers over slash-delimited relative paths as reported by a comparison.

/// Folder key used for files that sit directly under the compared roots.
pub const ROOT_FOLDER: &str = ".";

/// Returns the part of `rel_path` before the last `/`, or [`ROOT_FOLDER`].
pub fn folder_for_path(rel_path: &str) -> &str {
    match rel_path.rfind('/') {
        Some(idx) => &rel_path[..idx],
        None => ROOT_FOLDER,
    }
}

/// Returns the part of `rel_path` after the last `/`.
pub fn file_name(rel_path: &str) -> &str {
    match rel_path.rfind('/') {
        Some(idx) => &rel_path[idx + 1..],
        None => rel_path,
    }
}
