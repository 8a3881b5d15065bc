//! Locating the `.ai/` configuration root for a working directory
//!
//! Search order:
//! 1. the start directory and each parent, stopping after the first
//!    directory that contains `.git` (the repository boundary)
//! 2. `<home>/.ai` as a user-wide fallback

use std::path::{Path, PathBuf};

use versa_fs::AiPath;

/// Finds configuration roots.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Override for the home directory (used for testing).
    /// When `None`, `dirs::home_dir()` is used.
    home_override: Option<PathBuf>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a discovery that falls back to `home` instead of the user's
    /// real home directory.
    pub fn with_home_dir(home: impl Into<PathBuf>) -> Self {
        Self {
            home_override: Some(home.into()),
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        if let Some(home) = &self.home_override {
            return Some(home.clone());
        }
        dirs::home_dir()
    }

    /// Find the `.ai/` directory governing `start`.
    ///
    /// Returns `None` when neither the ancestors (up to the repository
    /// boundary) nor the home directory have one.
    pub fn find(&self, start: &Path) -> Option<PathBuf> {
        let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

        for dir in start.ancestors() {
            let candidate = dir.join(AiPath::AiDir);
            if candidate.is_dir() {
                tracing::debug!(root = %candidate.display(), "found configuration root");
                return Some(candidate);
            }
            if dir.join(AiPath::GitDir).exists() {
                tracing::debug!(boundary = %dir.display(), "stopped at repository boundary");
                break;
            }
        }

        let home_root = self.home_dir()?.join(AiPath::AiDir);
        if home_root.is_dir() {
            tracing::debug!(root = %home_root.display(), "using home configuration root");
            return Some(home_root);
        }
        None
    }
}

/// Whether `dir` has a `.ai/` directory with a `context.json` inside.
pub fn has_ai_folder(dir: &Path) -> bool {
    let ai = dir.join(AiPath::AiDir);
    ai.is_dir() && ai.join(AiPath::ContextFile).is_file()
}

/// The project directory a configuration root belongs to.
pub fn project_root(ai_root: &Path) -> PathBuf {
    ai_root
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ai_root.to_path_buf())
}
