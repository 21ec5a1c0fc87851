#[cfg(test)]
mod integration_tests {
    use crate::comparison::{EffectiveStatus, FileStatus, FsCompareService, FsFileWriter};
    use crate::logging::LogManager;
    use crate::outline::{language_for_file, parse_structure, OutlineNavigator};
    use crate::path_utils::folder_for_path;
    use crate::session::DiffSession;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_session(ignore: &[&str]) -> (DiffSession, Arc<LogManager>) {
        let log_manager = Arc::new(LogManager::new(100));
        let service =
            FsCompareService::new(ignore.iter().map(|s| s.to_string()).collect()).unwrap();
        let session = DiffSession::new(
            Arc::new(service),
            Arc::new(FsFileWriter::new()),
            log_manager.clone(),
        );
        (session, log_manager)
    }

    fn fixture() -> (TempDir, TempDir) {
        let left = TempDir::new().unwrap();
        let right = TempDir::new().unwrap();

        write(left.path(), "readme.md", "hello");
        write(right.path(), "readme.md", "hello");
        write(left.path(), "src/lib.rs", "pub fn left() {}\n");
        write(right.path(), "src/lib.rs", "pub fn right() {}\n");
        write(left.path(), "src/util/io.rs", "fn read() {}\n");
        write(right.path(), "src/util/io.rs", "fn write() {}\n");
        write(left.path(), "docs/new.md", "only left");
        write(right.path(), "old.txt", "only right");
        write(left.path(), "node_modules/pkg/index.js", "ignored");

        (left, right)
    }

    fn dir_str(dir: &TempDir) -> String {
        dir.path().to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_compare_populates_result() {
        let (left, right) = fixture();
        let (mut session, log_manager) = build_session(&["node_modules"]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));

        assert!(session.compare().await);

        let result = session.result().unwrap();
        assert_eq!(result.total, 5);
        assert_eq!(result.identical, 1);
        assert_eq!(result.different, 2);
        assert_eq!(result.only_left, 1);
        assert_eq!(result.only_right, 1);
        assert_eq!(result.ignored_dirs, vec!["node_modules".to_string()]);
        assert!(result.find("node_modules/pkg/index.js").is_none());
        assert!(session.error().is_none());
        assert!(!session.is_loading());
        assert!(!log_manager.is_empty());
    }

    #[tokio::test]
    async fn test_compare_without_both_dirs_still_resets() {
        let (mut session, _) = build_session(&[]);
        session.set_left_dir("/tmp");
        session.select_file(Some("a.txt".to_string()));
        session.toggle_checked("a.txt");
        session.update_modified_content("a.txt", "edited");

        assert!(!session.compare().await);
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(session.selection().selected_file().is_none());
        assert!(session.selection().checked_files().is_empty());
        assert!(session.overlay().is_empty());
    }

    #[tokio::test]
    async fn test_compare_error_keeps_previous_result() {
        let (left, right) = fixture();
        let (mut session, _) = build_session(&[]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));
        session.compare().await;
        let before = session.result().cloned();

        session.set_right_dir("/nonexistent/diverge/right");
        assert!(session.compare().await);

        assert!(session.error().is_some());
        assert_eq!(session.result().cloned(), before);
    }

    #[tokio::test]
    async fn test_compare_resets_selection_and_overlay() {
        let (left, right) = fixture();
        let (mut session, _) = build_session(&[]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));
        session.compare().await;

        session.select_file(Some("src/lib.rs".to_string()));
        session.check_all_different();
        session.toggle_folder("src");
        session.apply_selected_to_right();
        assert!(!session.overlay().is_empty());

        session.refresh().await;

        assert!(session.selection().selected_file().is_none());
        assert!(session.selection().checked_files().is_empty());
        assert!(session.selection().collapsed_folders().is_empty());
        assert!(session.overlay().is_empty());
    }

    #[tokio::test]
    async fn test_apply_selected_then_save_all_round_trip() -> anyhow::Result<()> {
        let (left, right) = fixture();
        let (mut session, _) = build_session(&["node_modules"]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));
        session.compare().await;

        session.check_all_different();
        session.toggle_checked("src/util/io.rs");
        session.apply_selected_to_right();

        let record = session.result().unwrap().find("src/lib.rs").unwrap().clone();
        assert_eq!(session.effective_status(&record), EffectiveStatus::Applied);
        let untouched = session.result().unwrap().find("src/util/io.rs").unwrap().clone();
        assert_eq!(session.effective_status(&untouched), EffectiveStatus::Different);

        let report = session.save_all().await?;

        assert_eq!(report.saved, 1);
        assert!(report.failures.is_empty());
        assert!(report.refreshed);
        assert!(session.overlay().is_empty());
        assert_eq!(
            fs::read_to_string(right.path().join("src/lib.rs"))?,
            "pub fn left() {}\n"
        );

        let refreshed = session.result().unwrap();
        assert_eq!(
            refreshed.find("src/lib.rs").unwrap().status,
            FileStatus::Identical
        );
        assert_eq!(refreshed.different, 1);
        // saving refreshes the baseline but keeps what the user had checked
        assert!(session.selection().is_checked("src/lib.rs"));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_file_creates_left_only_file_on_right() -> anyhow::Result<()> {
        let (left, right) = fixture();
        let (mut session, _) = build_session(&[]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));
        session.compare().await;

        session.update_modified_content("docs/new.md", "only left");
        assert!(session.save_file("docs/new.md").await?);

        assert_eq!(
            fs::read_to_string(right.path().join("docs/new.md"))?,
            "only left"
        );
        // single saves leave the overlay for the caller to clear
        assert_eq!(session.overlay().modified_content("docs/new.md"), Some("only left"));
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let (left, right) = fixture();
        let (mut session, _) = build_session(&[]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));
        session.compare().await;
        session.apply_all_to_right();
        session.toggle_all_folders();

        session.clear();

        assert!(session.left_dir().is_empty());
        assert!(session.right_dir().is_empty());
        assert!(session.result().is_none());
        assert!(session.overlay().is_empty());
        assert!(session.selection().collapsed_folders().is_empty());
        assert!(session.folders().is_empty());
    }

    #[tokio::test]
    async fn test_folder_tri_state_through_session() {
        let (left, right) = fixture();
        let (mut session, _) = build_session(&[]);
        session.set_left_dir(dir_str(&left));
        session.set_right_dir(dir_str(&right));
        session.compare().await;

        assert_eq!(session.folders(), vec![".", "docs", "src", "src/util"]);

        session.toggle_folder_checked("src");
        assert!(session.selection().is_checked("src/lib.rs"));
        session.toggle_folder_checked("src");
        assert!(session.selection().checked_files().is_empty());
    }

    #[test]
    fn test_folder_for_path_examples() {
        assert_eq!(folder_for_path("src/utils/foo.ts"), "src/utils");
        assert_eq!(folder_for_path("readme.md"), ".");
    }

    #[test]
    fn test_outline_for_detected_language() {
        let yaml = "server:\n  host: localhost\n  port: 8080\ndatabase:\n  connection: pg";
        let nodes = parse_structure(yaml, language_for_file("config/app.yaml"));
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children.len(), 2);

        let code = "export async function fetchData() {}";
        let nodes = parse_structure(code, language_for_file("src/api.ts"));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].key, "fetchData");
        assert_eq!(nodes[0].line, 1);
    }

    #[test]
    fn test_outline_navigation_over_parsed_yaml() {
        let yaml = "server:\n  host: localhost\n  port: 8080\ndatabase:\n  connection: pg";
        let nodes = parse_structure(yaml, "yaml");
        let mut nav = OutlineNavigator::new(&nodes);

        nav.set_query("o");
        let visible: Vec<&str> = nav.visible().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(visible, vec!["host", "port", "connection"]);

        nav.move_up();
        assert_eq!(nav.selected_line(), Some(5));
    }
}
