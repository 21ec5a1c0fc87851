//! Comparison session state
//!
//! Three independently owned containers (comparison result, selection,
//! modification overlay) composed by [`DiffSession`], which sequences the
//! resets that keep them consistent.

pub mod directories;
pub mod overlay;
pub mod selection;

use std::sync::Arc;

use crate::comparison::{
    CompareService, ComparisonRecord, ComparisonResult, EffectiveStatus, FileWriter,
};
use crate::error::Result;
use crate::logging::LogManager;

pub use directories::{CompareRequest, ComparisonSession};
pub use overlay::{ModificationOverlay, SaveFailure, SaveReport};
pub use selection::{folders, SelectionState};

pub struct DiffSession {
    compare_service: Arc<dyn CompareService>,
    writer: Arc<dyn FileWriter>,
    log_manager: Arc<LogManager>,
    directories: ComparisonSession,
    selection: SelectionState,
    overlay: ModificationOverlay,
}

impl DiffSession {
    pub fn new(
        compare_service: Arc<dyn CompareService>,
        writer: Arc<dyn FileWriter>,
        log_manager: Arc<LogManager>,
    ) -> Self {
        Self {
            compare_service,
            writer,
            overlay: ModificationOverlay::new(log_manager.clone()),
            log_manager,
            directories: ComparisonSession::new(),
            selection: SelectionState::new(),
        }
    }

    // Directories

    pub fn left_dir(&self) -> &str {
        self.directories.left_dir()
    }

    pub fn right_dir(&self) -> &str {
        self.directories.right_dir()
    }

    pub fn set_left_dir(&mut self, dir: impl Into<String>) {
        self.directories.set_left_dir(dir);
    }

    pub fn set_right_dir(&mut self, dir: impl Into<String>) {
        self.directories.set_right_dir(dir);
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        self.directories.result()
    }

    pub fn is_loading(&self) -> bool {
        self.directories.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.directories.error()
    }

    pub fn log_manager(&self) -> &Arc<LogManager> {
        &self.log_manager
    }

    // Selection

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_entry(&self) -> Option<&ComparisonRecord> {
        self.selection.selected_entry(self.directories.result())
    }

    pub fn folders(&self) -> Vec<String> {
        folders(self.directories.result())
    }

    pub fn select_file(&mut self, rel_path: Option<String>) {
        self.selection.select_file(rel_path);
    }

    pub fn toggle_checked(&mut self, rel_path: &str) {
        self.selection.toggle_checked(rel_path);
    }

    pub fn toggle_folder_checked(&mut self, folder: &str) {
        self.selection
            .toggle_folder_checked(folder, self.directories.result());
    }

    pub fn check_all_different(&mut self) {
        self.selection.check_all_different(self.directories.result());
    }

    pub fn uncheck_all(&mut self) {
        self.selection.uncheck_all();
    }

    pub fn toggle_folder(&mut self, folder: &str) {
        self.selection.toggle_folder(folder);
    }

    pub fn toggle_all_folders(&mut self) {
        self.selection.toggle_all_folders(self.directories.result());
    }

    // Modifications

    pub fn overlay(&self) -> &ModificationOverlay {
        &self.overlay
    }

    pub fn effective_status(&self, record: &ComparisonRecord) -> EffectiveStatus {
        self.overlay.effective_status(record)
    }

    pub fn update_modified_content(&mut self, rel_path: &str, content: impl Into<String>) {
        self.overlay.update_modified_content(rel_path, content);
    }

    pub fn apply_left_to_right(&mut self, rel_path: &str) {
        self.overlay
            .apply_left_to_right(rel_path, self.directories.result());
    }

    pub fn apply_all_to_right(&mut self) {
        self.overlay.apply_all_to_right(self.directories.result());
    }

    /// Applies the currently checked files.
    pub fn apply_selected_to_right(&mut self) {
        self.overlay.apply_selected_to_right(
            self.selection.checked_files(),
            self.directories.result(),
        );
    }

    pub async fn save_file(&self, rel_path: &str) -> Result<bool> {
        self.overlay
            .save_file(rel_path, &self.directories, self.writer.as_ref())
            .await
    }

    pub async fn save_all(&mut self) -> Result<SaveReport> {
        let left_root = self.directories.left_dir().to_string();
        self.overlay
            .save_all(
                &left_root,
                &mut self.directories,
                self.compare_service.as_ref(),
                self.writer.as_ref(),
            )
            .await
    }

    // Session-wide operations

    /// Re-compares the roots and resets selection and overlay together.
    /// Returns `false` when either root is unset; the resets happen either way.
    pub async fn compare(&mut self) -> bool {
        let ran = self
            .directories
            .compare(self.compare_service.as_ref())
            .await;
        self.selection.reset();
        self.overlay.reset();

        if !ran {
            return false;
        }
        match (self.directories.error(), self.directories.result()) {
            (Some(err), _) => self.log_manager.warn(&format!("Compare failed: {err}"), None),
            (None, Some(result)) => self.log_manager.info(&format!(
                "Compared {} file(s): {} different, {} only left, {} only right",
                result.total, result.different, result.only_left, result.only_right
            )),
            (None, None) => {}
        }
        true
    }

    /// Entry point for filesystem-change notifications.
    pub async fn refresh(&mut self) -> bool {
        self.compare().await
    }

    pub fn clear(&mut self) {
        self.directories.clear();
        self.selection.reset();
        self.overlay.reset();
    }
}
