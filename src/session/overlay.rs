use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use crate::comparison::{
    CompareService, ComparisonRecord, ComparisonResult, EffectiveStatus, FileStatus, FileWriter,
};
use crate::error::Result;
use crate::logging::LogManager;
use crate::path_validation::resolve_target_path;
use crate::session::directories::ComparisonSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveFailure {
    pub rel_path: String,
    pub message: String,
}

/// Outcome of a batch save: how many files were written and which failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub saved: usize,
    pub failures: Vec<SaveFailure>,
    /// Whether the baseline was re-compared and the overlay cleared.
    pub refreshed: bool,
}

/// Unsaved right-side edits keyed by relative path.
pub struct ModificationOverlay {
    contents: BTreeMap<String, String>,
    log_manager: Arc<LogManager>,
}

impl Default for ModificationOverlay {
    fn default() -> Self {
        Self::new(Arc::new(LogManager::default()))
    }
}

impl ModificationOverlay {
    pub fn new(log_manager: Arc<LogManager>) -> Self {
        Self {
            contents: BTreeMap::new(),
            log_manager,
        }
    }

    pub fn modified_content(&self, rel_path: &str) -> Option<&str> {
        self.contents.get(rel_path).map(String::as_str)
    }

    pub fn modified_paths(&self) -> impl Iterator<Item = &str> {
        self.contents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Derived per call from the current overlay; never cache the answer.
    pub fn effective_status(&self, record: &ComparisonRecord) -> EffectiveStatus {
        match self.contents.get(&record.rel_path) {
            Some(content) if *content == record.left_content => EffectiveStatus::Applied,
            Some(_) => EffectiveStatus::Different,
            None => record.status.into(),
        }
    }

    pub fn update_modified_content(&mut self, rel_path: &str, content: impl Into<String>) {
        self.contents.insert(rel_path.to_string(), content.into());
    }

    pub fn apply_left_to_right(&mut self, rel_path: &str, result: Option<&ComparisonResult>) {
        if let Some(record) = result.and_then(|r| r.find(rel_path)) {
            self.contents
                .insert(record.rel_path.clone(), record.left_content.clone());
        }
    }

    pub fn apply_all_to_right(&mut self, result: Option<&ComparisonResult>) {
        self.apply_where(result, |_| true);
    }

    pub fn apply_selected_to_right(
        &mut self,
        checked: &BTreeSet<String>,
        result: Option<&ComparisonResult>,
    ) {
        self.apply_where(result, |record| checked.contains(&record.rel_path));
    }

    fn apply_where(
        &mut self,
        result: Option<&ComparisonResult>,
        include: impl Fn(&ComparisonRecord) -> bool,
    ) {
        let Some(result) = result else {
            return;
        };
        for record in &result.records {
            if record.status == FileStatus::Different && include(record) {
                self.contents
                    .insert(record.rel_path.clone(), record.left_content.clone());
            }
        }
    }

    /// Writes one overlay entry to disk. Returns `Ok(false)` when there is
    /// nothing to write (no record or no overlay entry). The overlay is left
    /// as is either way.
    pub async fn save_file(
        &self,
        rel_path: &str,
        session: &ComparisonSession,
        writer: &dyn FileWriter,
    ) -> Result<bool> {
        let Some(record) = session.result().and_then(|r| r.find(rel_path)) else {
            return Ok(false);
        };
        let Some(content) = self.contents.get(rel_path) else {
            return Ok(false);
        };

        let target = resolve_target_path(&record.right_path, session.right_dir(), rel_path)?;
        writer.write_file(&target, content).await?;
        Ok(true)
    }

    /// Saves every overlay entry sequentially. Per-file failures are logged
    /// and collected without stopping the batch. When anything was written and
    /// both roots are known, the baseline is re-compared and the overlay is
    /// cleared; a failing re-compare is returned as an error and leaves the
    /// overlay in place.
    pub async fn save_all(
        &mut self,
        left_root: &str,
        session: &mut ComparisonSession,
        compare: &dyn CompareService,
        writer: &dyn FileWriter,
    ) -> Result<SaveReport> {
        let mut report = SaveReport::default();
        let paths: Vec<String> = self.contents.keys().cloned().collect();

        for rel_path in paths {
            match self.save_file(&rel_path, session, writer).await {
                Ok(true) => report.saved += 1,
                Ok(false) => {}
                Err(e) => {
                    self.log_manager.warn(
                        &format!("Failed to save {rel_path}: {e}"),
                        Some(rel_path.clone()),
                    );
                    report.failures.push(SaveFailure {
                        rel_path,
                        message: e.to_string(),
                    });
                }
            }
        }

        let right_root = session.right_dir().to_string();
        if report.saved > 0 && !left_root.is_empty() && !right_root.is_empty() {
            let refreshed = compare.compare(left_root, &right_root).await?;
            session.replace_result(refreshed);
            self.contents.clear();
            report.refreshed = true;
        }

        self.log_manager.info(&format!(
            "Saved {} file(s), {} failed",
            report.saved,
            report.failures.len()
        ));
        Ok(report)
    }

    pub fn reset(&mut self) {
        self.contents.clear();
    }
}
