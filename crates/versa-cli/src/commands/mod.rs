//! Command implementations for versa-cli

pub mod context;
pub mod init;
pub mod lint;
pub mod print;

pub use context::run_context;
pub use init::run_init;
pub use lint::run_lint;
pub use print::run_print;

use std::path::{Path, PathBuf};

use versa_core::Discovery;
use versa_fs::AiPath;

use crate::error::{CliError, Result};

/// Find the `.ai/` root for a command.
///
/// An explicit directory must contain `.ai/` itself; otherwise the root is
/// discovered upward from `cwd`.
pub fn locate_root(dir: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(dir) = dir {
        let root = dir.join(AiPath::AiDir);
        if !root.is_dir() {
            return Err(CliError::user(format!(
                "No {}/ folder found in {}",
                AiPath::AiDir,
                dir.display()
            )));
        }
        return Ok(root);
    }

    Discovery::new().find(cwd).ok_or_else(|| {
        versa_core::Error::RootNotFound {
            start: cwd.to_path_buf(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use versa_test_utils::TestRoot;

    #[test]
    fn test_explicit_dir() {
        let root = TestRoot::new();
        let found = locate_root(Some(root.project()), Path::new("/")).unwrap();
        assert_eq!(found, root.ai());
    }

    #[test]
    fn test_discovers_from_subdirectory() {
        let root = TestRoot::new().project_file("src/lib.rs", "\n");
        std::fs::create_dir(root.project().join(".git")).unwrap();

        let found = locate_root(None, &root.project().join("src")).unwrap();
        assert_eq!(found.canonicalize().unwrap(), root.ai().canonicalize().unwrap());
    }

    #[test]
    fn test_explicit_dir_without_root() {
        let root = TestRoot::bare();
        let err = locate_root(Some(root.project()), Path::new("/")).unwrap_err();
        assert!(err.to_string().starts_with("No .ai/ folder found in"));
    }
}
