use crate::comparison::{CompareService, ComparisonResult};
use crate::error::Result;

/// Owns the two compare roots and the latest comparison result.
///
/// Overlapping compares on one session are a caller error; nothing here
/// serializes them.
#[derive(Debug, Default)]
pub struct ComparisonSession {
    left_dir: String,
    right_dir: String,
    result: Option<ComparisonResult>,
    loading: bool,
    error: Option<String>,
}

/// Roots captured by [`ComparisonSession::begin_compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    pub left: String,
    pub right: String,
}

impl ComparisonSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dirs(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left_dir: left.into(),
            right_dir: right.into(),
            ..Self::default()
        }
    }

    pub fn left_dir(&self) -> &str {
        &self.left_dir
    }

    pub fn right_dir(&self) -> &str {
        &self.right_dir
    }

    pub fn set_left_dir(&mut self, dir: impl Into<String>) {
        self.left_dir = dir.into();
    }

    pub fn set_right_dir(&mut self, dir: impl Into<String>) {
        self.right_dir = dir.into();
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_both_dirs(&self) -> bool {
        !self.left_dir.is_empty() && !self.right_dir.is_empty()
    }

    /// Marks the session as loading and returns the roots to compare, or
    /// `None` when either root is unset.
    pub fn begin_compare(&mut self) -> Option<CompareRequest> {
        if !self.has_both_dirs() {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(CompareRequest {
            left: self.left_dir.clone(),
            right: self.right_dir.clone(),
        })
    }

    /// Applies a compare outcome. A failure keeps the previous result.
    pub fn finish_compare(&mut self, outcome: Result<ComparisonResult>) {
        match outcome {
            Ok(result) => self.result = Some(result),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Runs a full compare. Returns `false` when either root is unset.
    pub async fn compare(&mut self, service: &dyn CompareService) -> bool {
        let Some(request) = self.begin_compare() else {
            return false;
        };
        let outcome = service.compare(&request.left, &request.right).await;
        self.finish_compare(outcome);
        true
    }

    /// Installs a refreshed baseline without touching paths or error state.
    pub fn replace_result(&mut self, result: ComparisonResult) {
        self.result = Some(result);
    }

    pub fn clear(&mut self) {
        self.result = None;
        self.loading = false;
        self.error = None;
        self.left_dir.clear();
        self.right_dir.clear();
    }
}
