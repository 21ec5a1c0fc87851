//! Error types shared by the comparison services, the session and config.

use thiserror::Error;

use crate::error_codes;

#[derive(Debug, Error)]
pub enum DivergeError {
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Comparison failed: {0}")]
    Compare(String),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DivergeError {
    /// Stable code for front-end translation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotADirectory(_) => error_codes::ERR_NOT_A_DIRECTORY,
            Self::Compare(_) => error_codes::ERR_COMPARE_FAILED,
            Self::Write { .. } => error_codes::ERR_WRITE_FAILED,
            Self::InvalidPath(_) => error_codes::ERR_INVALID_PATH,
            Self::Config(_) => error_codes::ERR_CONFIG_FAILED,
            Self::Io(_) => error_codes::ERR_IO,
        }
    }
}

pub type Result<T> = std::result::Result<T, DivergeError>;
