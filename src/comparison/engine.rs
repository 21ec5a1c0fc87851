use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::comparison::service::CompareService;
use crate::comparison::types::{ComparisonRecord, ComparisonResult, FileStatus};
use crate::error::{DivergeError, Result};

/// Files larger than this are left out of a comparison.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// A scanned file: absolute path and text content.
type ScannedFile = (String, String);

/// Default compare service: walks both roots, skipping ignored directory
/// names, oversize files and files that are not valid UTF-8.
#[derive(Clone)]
pub struct FsCompareService {
    ignore_dirs: Vec<String>,
    ignore_set: GlobSet,
}

impl FsCompareService {
    pub fn new(ignore_dirs: Vec<String>) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for entry in &ignore_dirs {
            let glob = Glob::new(entry.trim()).map_err(|e| {
                DivergeError::Config(format!("Invalid ignore pattern '{entry}': {e}"))
            })?;
            builder.add(glob);
        }
        let ignore_set = builder
            .build()
            .map_err(|e| DivergeError::Config(format!("Invalid ignore patterns: {e}")))?;

        Ok(Self {
            ignore_dirs,
            ignore_set,
        })
    }

    pub fn ignore_dirs(&self) -> &[String] {
        &self.ignore_dirs
    }

    /// Synchronous comparison of two roots. A missing root scans as empty.
    pub fn compare_dirs(&self, left: &Path, right: &Path) -> ComparisonResult {
        let (left_files, mut ignored) = scan_dir(left, &self.ignore_set);
        let (right_files, right_ignored) = scan_dir(right, &self.ignore_set);
        ignored.extend(right_ignored);
        let ignored: Vec<String> = ignored
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let all_keys: BTreeSet<&String> = left_files.keys().chain(right_files.keys()).collect();

        let mut records = Vec::with_capacity(all_keys.len());
        for key in all_keys {
            let record = match (left_files.get(key), right_files.get(key)) {
                (Some((lp, lc)), Some((rp, rc))) => ComparisonRecord {
                    rel_path: key.clone(),
                    status: if lc == rc {
                        FileStatus::Identical
                    } else {
                        FileStatus::Different
                    },
                    left_content: lc.clone(),
                    right_content: rc.clone(),
                    left_path: lp.clone(),
                    right_path: rp.clone(),
                },
                (Some((lp, lc)), None) => ComparisonRecord {
                    rel_path: key.clone(),
                    status: FileStatus::OnlyLeft,
                    left_content: lc.clone(),
                    right_content: String::new(),
                    left_path: lp.clone(),
                    right_path: String::new(),
                },
                (None, Some((rp, rc))) => ComparisonRecord {
                    rel_path: key.clone(),
                    status: FileStatus::OnlyRight,
                    left_content: String::new(),
                    right_content: rc.clone(),
                    left_path: String::new(),
                    right_path: rp.clone(),
                },
                (None, None) => continue,
            };
            records.push(record);
        }

        ComparisonResult::from_records(records, ignored)
    }
}

#[async_trait]
impl CompareService for FsCompareService {
    async fn compare(&self, left_root: &str, right_root: &str) -> Result<ComparisonResult> {
        for root in [left_root, right_root] {
            if !Path::new(root).is_dir() {
                return Err(DivergeError::NotADirectory(root.to_string()));
            }
        }

        let scanner = self.clone();
        let left = left_root.to_string();
        let right = right_root.to_string();

        tokio::task::spawn_blocking(move || {
            scanner.compare_dirs(Path::new(&left), Path::new(&right))
        })
        .await
        .map_err(|e| DivergeError::Compare(format!("Scan task failed: {e}")))
    }
}

fn scan_dir(root: &Path, ignore_set: &GlobSet) -> (BTreeMap<String, ScannedFile>, Vec<String>) {
    let mut files = BTreeMap::new();
    let mut ignored = Vec::new();
    if !root.exists() {
        return (files, ignored);
    }

    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() == 0 || !ignore_set.is_match(e.file_name()) {
            return true;
        }
        if e.file_type().is_dir() {
            if let Ok(rel) = e.path().strip_prefix(root) {
                ignored.push(to_slash_path(rel));
            }
        }
        false
    });

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(meta) = entry.metadata() {
            if meta.len() > MAX_FILE_SIZE {
                continue;
            }
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };

        if let Ok(content) = fs::read_to_string(entry.path()) {
            files.insert(
                to_slash_path(rel),
                (entry.path().to_string_lossy().to_string(), content),
            );
        }
    }

    (files, ignored)
}

fn to_slash_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
