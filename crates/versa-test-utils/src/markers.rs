//! Directory markers that bound root discovery.

use std::fs;
use std::path::Path;

/// Creates a minimal `.git` directory so discovery treats `path` as a
/// repository boundary. No git object store is created.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Creates a `.ai/context.json` holding only the supported version under
/// `path`, the smallest tree discovery accepts.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn minimal_ai_dir(path: &Path) {
    fs::create_dir_all(path.join(".ai"))
        .unwrap_or_else(|e| panic!("minimal_ai_dir: failed to create .ai: {e}"));
    fs::write(path.join(".ai/context.json"), "{\"version\": \"1.0\"}\n")
        .unwrap_or_else(|e| panic!("minimal_ai_dir: failed to write context.json: {e}"));
}
