//! [`TestRoot`] builder for `.ai/` configuration roots.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary project directory with a `.ai/` configuration root and helper
/// methods for writing fixtures into it.
///
/// # Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use versa_test_utils::TestRoot;
///
/// let root = TestRoot::new()
///     .context(json!({"version": "1.0", "rules": ["rules/style.md"]}))
///     .rule("rules/style.md", "# Style\n");
/// root.assert_file_exists("rules/style.md");
/// ```
pub struct TestRoot {
    temp_dir: TempDir,
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoot {
    /// Create a project directory with an empty `.ai/` inside it.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".ai")).unwrap();
        Self { temp_dir }
    }

    /// Create a project directory without any `.ai/`.
    pub fn bare() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The project directory (parent of `.ai/`).
    pub fn project(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The `.ai/` configuration root.
    pub fn ai(&self) -> PathBuf {
        self.project().join(".ai")
    }

    /// Write `.ai/context.json`.
    pub fn context(self, value: Value) -> Self {
        self.json("context.json", value)
    }

    /// Write `.ai/profiles/<name>.json`.
    pub fn profile(self, name: &str, value: Value) -> Self {
        self.json(&format!("profiles/{name}.json"), value)
    }

    /// Write `.ai/agents/<name>.json`.
    pub fn agent(self, name: &str, value: Value) -> Self {
        self.json(&format!("agents/{name}.json"), value)
    }

    /// Write a markdown rule or prompt at `path`, relative to `.ai/`.
    pub fn rule(self, path: &str, content: &str) -> Self {
        self.file(path, content)
    }

    /// Write pretty-printed JSON at `path`, relative to `.ai/`.
    pub fn json(self, path: &str, value: Value) -> Self {
        let content = serde_json::to_string_pretty(&value).unwrap();
        self.file(path, &content)
    }

    /// Write raw text at `path`, relative to `.ai/`, creating parents.
    pub fn file(self, path: &str, content: &str) -> Self {
        write_with_parents(&self.ai().join(path), content);
        self
    }

    /// Write raw text at `path`, relative to the project directory.
    pub fn project_file(self, path: &str, content: &str) -> Self {
        write_with_parents(&self.project().join(path), content);
        self
    }

    /// Assert that `path` (relative to `.ai/`) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.ai().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to `.ai/`) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.ai().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("TestRoot: failed to create {}: {e}", parent.display()));
    }
    fs::write(path, content)
        .unwrap_or_else(|e| panic!("TestRoot: failed to write {}: {e}", path.display()));
}
