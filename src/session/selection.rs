use std::collections::BTreeSet;

use crate::comparison::{ComparisonRecord, ComparisonResult, FileStatus};
use crate::path_utils::folder_for_path;

/// Which file is open, which files are checked for bulk apply, and which
/// folders are collapsed. Derived data (folders, folder membership) is
/// computed from the result passed in, never stored.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    selected_file: Option<String>,
    checked_files: BTreeSet<String>,
    collapsed_folders: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn checked_files(&self) -> &BTreeSet<String> {
        &self.checked_files
    }

    pub fn collapsed_folders(&self) -> &BTreeSet<String> {
        &self.collapsed_folders
    }

    pub fn is_checked(&self, rel_path: &str) -> bool {
        self.checked_files.contains(rel_path)
    }

    /// Not validated against the result; a stale selection resolves to no entry.
    pub fn select_file(&mut self, rel_path: Option<String>) {
        self.selected_file = rel_path;
    }

    pub fn selected_entry<'a>(
        &self,
        result: Option<&'a ComparisonResult>,
    ) -> Option<&'a ComparisonRecord> {
        let selected = self.selected_file.as_deref()?;
        result?.find(selected)
    }

    pub fn toggle_checked(&mut self, rel_path: &str) {
        if !self.checked_files.remove(rel_path) {
            self.checked_files.insert(rel_path.to_string());
        }
    }

    /// Unchecks every file in `folder` when all of them are checked, otherwise
    /// checks all of them.
    pub fn toggle_folder_checked(&mut self, folder: &str, result: Option<&ComparisonResult>) {
        let Some(result) = result else {
            return;
        };
        let files: Vec<&str> = result
            .records
            .iter()
            .map(|r| r.rel_path.as_str())
            .filter(|p| folder_for_path(p) == folder)
            .collect();

        let all_checked = files.iter().all(|f| self.checked_files.contains(*f));
        for file in files {
            if all_checked {
                self.checked_files.remove(file);
            } else {
                self.checked_files.insert(file.to_string());
            }
        }
    }

    /// Checks exactly the files whose raw status is `different`.
    pub fn check_all_different(&mut self, result: Option<&ComparisonResult>) {
        let Some(result) = result else {
            return;
        };
        self.checked_files = result
            .records
            .iter()
            .filter(|r| r.status == FileStatus::Different)
            .map(|r| r.rel_path.clone())
            .collect();
    }

    pub fn uncheck_all(&mut self) {
        self.checked_files.clear();
    }

    pub fn toggle_folder(&mut self, folder: &str) {
        if !self.collapsed_folders.remove(folder) {
            self.collapsed_folders.insert(folder.to_string());
        }
    }

    /// Expands everything when every known folder is collapsed, otherwise
    /// collapses every known folder.
    pub fn toggle_all_folders(&mut self, result: Option<&ComparisonResult>) {
        let folders = folders(result);
        let all_collapsed = folders.iter().all(|f| self.collapsed_folders.contains(f));
        if all_collapsed {
            self.collapsed_folders.clear();
        } else {
            self.collapsed_folders = folders.into_iter().collect();
        }
    }

    pub fn reset(&mut self) {
        self.selected_file = None;
        self.checked_files.clear();
        self.collapsed_folders.clear();
    }
}

/// Distinct folder keys of the result, sorted.
pub fn folders(result: Option<&ComparisonResult>) -> Vec<String> {
    let Some(result) = result else {
        return Vec::new();
    };
    result
        .records
        .iter()
        .map(|r| folder_for_path(&r.rel_path).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
