/// Language tag for a file, by well-known file name first, then extension.
pub fn language_for_file(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);

    match file_name {
        "Dockerfile" => return "dockerfile",
        "Makefile" => return "makefile",
        "Jenkinsfile" => return "groovy",
        _ => {}
    }

    let Some(dot) = file_name.rfind('.') else {
        return "plaintext";
    };

    match file_name[dot..].to_ascii_lowercase().as_str() {
        ".yaml" | ".yml" => "yaml",
        ".json" => "json",
        ".toml" => "toml",
        ".md" => "markdown",
        ".ts" | ".tsx" => "typescript",
        ".js" | ".jsx" => "javascript",
        ".py" => "python",
        ".rs" => "rust",
        ".go" => "go",
        ".java" => "java",
        ".c" | ".h" => "c",
        ".cpp" | ".hpp" => "cpp",
        ".sh" | ".bash" => "shell",
        ".css" => "css",
        ".scss" => "scss",
        ".html" => "html",
        ".xml" => "xml",
        ".sql" => "sql",
        ".tf" | ".hcl" => "hcl",
        ".dockerfile" => "dockerfile",
        ".rb" => "ruby",
        ".php" => "php",
        ".swift" => "swift",
        ".kt" => "kotlin",
        _ => "plaintext",
    }
}
