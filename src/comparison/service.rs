//! Boundaries to the two suspending collaborators: directory comparison and
//! file writes.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::comparison::types::ComparisonResult;
use crate::error::{DivergeError, Result};

#[async_trait]
pub trait CompareService: Send + Sync {
    async fn compare(&self, left_root: &str, right_root: &str) -> Result<ComparisonResult>;
}

#[async_trait]
pub trait FileWriter: Send + Sync {
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;
}

/// Writes straight to the local filesystem, creating parent directories so
/// left-only files can be placed on the right side.
#[derive(Debug, Default, Clone)]
pub struct FsFileWriter;

impl FsFileWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileWriter for FsFileWriter {
    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let write_error = |e: std::io::Error| DivergeError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        fs::write(path, content).await.map_err(write_error)
    }
}
