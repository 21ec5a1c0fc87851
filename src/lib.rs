pub mod comparison;
pub mod config;
pub mod error;
pub mod error_codes;
pub mod input_validation;
pub mod logging;
pub mod outline;
pub mod path_utils;
pub mod path_validation;
pub mod session;
pub mod watcher;

#[cfg(test)]
mod lib_tests;

pub use comparison::{
    CompareService, ComparisonRecord, ComparisonResult, EffectiveStatus, FileStatus, FileWriter,
    FsCompareService, FsFileWriter,
};
pub use config::{AppConfig, ConfigStore, Settings, YamlConfigStore};
pub use error::{DivergeError, Result};
pub use logging::{LogEntry, LogManager};
pub use outline::{parse_structure, OutlineNode};
pub use session::{DiffSession, SaveReport};
pub use watcher::CompareWatcher;
