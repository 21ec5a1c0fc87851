use serde::{Deserialize, Serialize};

/// Raw classification reported by a compare service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Identical,
    Different,
    OnlyLeft,
    OnlyRight,
}

/// Status shown to the user once unsaved overlay edits are taken into account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Identical,
    Different,
    OnlyLeft,
    OnlyRight,
    Applied,
}

impl From<FileStatus> for EffectiveStatus {
    fn from(status: FileStatus) -> Self {
        match status {
            FileStatus::Identical => Self::Identical,
            FileStatus::Different => Self::Different,
            FileStatus::OnlyLeft => Self::OnlyLeft,
            FileStatus::OnlyRight => Self::OnlyRight,
        }
    }
}

impl EffectiveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Identical => "Identical",
            Self::Applied => "Applied (unsaved)",
            Self::Different => "Different",
            Self::OnlyLeft => "Only in left",
            Self::OnlyRight => "Only in right",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Identical | Self::Applied => "✓",
            Self::Different => "≠",
            Self::OnlyLeft => "←",
            Self::OnlyRight => "→",
        }
    }
}

/// One compared file. Paths on the missing side are empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonRecord {
    pub rel_path: String,
    pub status: FileStatus,
    pub left_content: String,
    pub right_content: String,
    pub left_path: String,
    pub right_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonResult {
    pub records: Vec<ComparisonRecord>,
    pub total: usize,
    pub identical: usize,
    pub different: usize,
    pub only_left: usize,
    pub only_right: usize,
    pub ignored_dirs: Vec<String>,
}

impl ComparisonResult {
    /// Builds a result whose aggregate counts always match `records`.
    pub fn from_records(records: Vec<ComparisonRecord>, ignored_dirs: Vec<String>) -> Self {
        let count = |status: FileStatus| records.iter().filter(|r| r.status == status).count();

        Self {
            total: records.len(),
            identical: count(FileStatus::Identical),
            different: count(FileStatus::Different),
            only_left: count(FileStatus::OnlyLeft),
            only_right: count(FileStatus::OnlyRight),
            ignored_dirs,
            records,
        }
    }

    pub fn find(&self, rel_path: &str) -> Option<&ComparisonRecord> {
        self.records.iter().find(|r| r.rel_path == rel_path)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    rel_path: &str,
    status: FileStatus,
    left: &str,
    right: &str,
) -> ComparisonRecord {
    let (left_path, right_path) = match status {
        FileStatus::OnlyLeft => (format!("/left/{rel_path}"), String::new()),
        FileStatus::OnlyRight => (String::new(), format!("/right/{rel_path}")),
        _ => (format!("/left/{rel_path}"), format!("/right/{rel_path}")),
    };
    ComparisonRecord {
        rel_path: rel_path.to_string(),
        status,
        left_content: left.to_string(),
        right_content: right.to_string(),
        left_path,
        right_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_statuses() {
        let result = ComparisonResult::from_records(
            vec![
                record("same.txt", FileStatus::Identical, "a", "a"),
                record("diff.txt", FileStatus::Different, "l", "r"),
                record("sub/diff.txt", FileStatus::Different, "l", "r"),
                record("left.txt", FileStatus::OnlyLeft, "x", ""),
                record("right.txt", FileStatus::OnlyRight, "", "x"),
            ],
            vec!["node_modules".to_string()],
        );

        assert_eq!(result.total, 5);
        assert_eq!(result.identical, 1);
        assert_eq!(result.different, 2);
        assert_eq!(result.only_left, 1);
        assert_eq!(result.only_right, 1);
        assert_eq!(
            result.identical + result.different + result.only_left + result.only_right,
            result.total
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&FileStatus::OnlyLeft).unwrap();
        assert_eq!(json, "\"only_left\"");
        let parsed: EffectiveStatus = serde_json::from_str("\"applied\"").unwrap();
        assert_eq!(parsed, EffectiveStatus::Applied);
    }

    #[test]
    fn test_find_by_relative_path() {
        let result = ComparisonResult::from_records(
            vec![record("a/b.txt", FileStatus::Different, "1", "2")],
            Vec::new(),
        );
        assert!(result.find("a/b.txt").is_some());
        assert!(result.find("missing.txt").is_none());
    }

    #[test]
    fn test_effective_status_labels() {
        assert_eq!(EffectiveStatus::Applied.label(), "Applied (unsaved)");
        assert_eq!(EffectiveStatus::from(FileStatus::OnlyRight).icon(), "→");
    }
}
