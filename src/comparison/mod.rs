pub mod engine;
pub mod service;
pub mod types;

pub use engine::FsCompareService;
pub use service::{CompareService, FileWriter, FsFileWriter};
pub use types::{ComparisonRecord, ComparisonResult, EffectiveStatus, FileStatus};
