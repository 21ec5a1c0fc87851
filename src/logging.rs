use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Default maximum number of log lines to keep in memory
pub const DEFAULT_MAX_LOG_LINES: usize = 10000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    /// Relative path of the file the entry is about, if any.
    pub rel_path: Option<String>,
}

/// Bounded in-memory log shown by front ends; every entry is also forwarded
/// to the `log` facade.
pub struct LogManager {
    entries: Mutex<VecDeque<LogEntry>>,
    max_lines: usize,
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOG_LINES)
    }
}

impl LogManager {
    pub fn new(max_lines: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_lines.min(1024))),
            max_lines,
        }
    }

    pub fn log(&self, level: &str, message: &str, rel_path: Option<String>) {
        match level {
            "error" => log::error!("{message}"),
            "warning" | "warn" => log::warn!("{message}"),
            "debug" => log::debug!("{message}"),
            _ => log::info!("{message}"),
        }

        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: level.to_string(),
            message: message.to_string(),
            rel_path,
        };

        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push_back(entry);

        while entries.len() > self.max_lines {
            entries.pop_front();
        }
    }

    pub fn info(&self, message: &str) {
        self.log("info", message, None);
    }

    pub fn warn(&self, message: &str, rel_path: Option<String>) {
        self.log("warning", message, rel_path);
    }

    pub fn get_logs(&self, rel_path: Option<&str>) -> Vec<LogEntry> {
        let entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match rel_path {
            Some(path) => entries
                .iter()
                .filter(|e| e.rel_path.as_deref() == Some(path))
                .cloned()
                .collect(),
            None => entries.iter().cloned().collect(),
        }
    }

    pub fn get_logs_paginated(&self, offset: usize, limit: usize) -> Vec<LogEntry> {
        let entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.iter().skip(offset).take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_manager_log() {
        let manager = LogManager::new(10);

        manager.log("info", "test message", None);
        assert_eq!(manager.len(), 1);

        manager.warn("save failed", Some("a/b.txt".to_string()));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_log_manager_rotation() {
        let manager = LogManager::new(3);

        for i in 0..5 {
            manager.log("info", &format!("message {}", i), None);
        }

        let logs = manager.get_logs(None);
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "message 2");
        assert_eq!(logs[2].message, "message 4");
    }

    #[test]
    fn test_log_manager_filter_by_path() {
        let manager = LogManager::new(10);

        manager.info("compare finished");
        manager.warn("write failed", Some("x.txt".to_string()));
        manager.warn("write failed", Some("y.txt".to_string()));

        assert_eq!(manager.get_logs(None).len(), 3);
        assert_eq!(manager.get_logs(Some("x.txt")).len(), 1);
        assert!(manager.get_logs(Some("missing")).is_empty());
    }

    #[test]
    fn test_log_manager_pagination() {
        let manager = LogManager::new(100);

        for i in 0..20 {
            manager.log("info", &format!("message {}", i), None);
        }

        assert_eq!(manager.get_logs_paginated(0, 10).len(), 10);
        assert_eq!(manager.get_logs_paginated(10, 10).len(), 10);
        assert!(manager.get_logs_paginated(20, 10).is_empty());
    }

    #[test]
    fn test_default_max_log_lines() {
        assert_eq!(DEFAULT_MAX_LOG_LINES, 10000);
    }
}
