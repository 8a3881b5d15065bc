//! Scaffolding a new `.ai/` configuration root

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use versa_fs::{AiPath, ConfigStore, NormalizedPath, io};
use versa_meta::{Context, Profile, Settings};

use crate::{Error, Result};

const STYLE_RULE: &str = "---
ai:meta
  priority: medium
  attach: always
  scope: global
---

# Code Style

- Prefer small, focused functions
- Name things for what they do
- Comment the non-obvious, not the obvious
- Keep formatting consistent with the surrounding code
";

/// What to write when scaffolding.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Only write `context.json` with a version
    pub minimal: bool,
    /// Also write `profiles/<name>.json`
    pub profile: Option<String>,
}

/// Files created by [`scaffold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// The new `.ai/` directory
    pub root: PathBuf,
    /// Root-relative paths of the files written, in order
    pub created: Vec<String>,
}

/// Create `.ai/` inside `project_dir`.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if `.ai/` already exists; nothing
/// is written in that case.
pub fn scaffold(project_dir: &Path, options: &ScaffoldOptions) -> Result<ScaffoldReport> {
    let root = project_dir.join(AiPath::AiDir);
    if root.exists() {
        return Err(Error::AlreadyInitialized { path: root });
    }

    for dir in [AiPath::RulesDir, AiPath::ProfilesDir] {
        fs::create_dir_all(root.join(dir))?;
    }

    let store = ConfigStore::new();
    let ai = NormalizedPath::new(&root);
    let mut created = Vec::new();

    let context = if options.minimal {
        Context::minimal()
    } else {
        default_context()
    };
    store.save(&ai.join(AiPath::ContextFile.as_str()), &context)?;
    created.push(AiPath::ContextFile.to_string());

    if !options.minimal {
        let relative = format!("{}/style.md", AiPath::RulesDir);
        io::write_text(&ai.join(&relative), STYLE_RULE)?;
        created.push(relative);
    }

    if let Some(name) = &options.profile {
        let relative = format!("{}/{}.json", AiPath::ProfilesDir, name);
        store.save(&ai.join(&relative), &sample_profile(name))?;
        created.push(relative);
    }

    tracing::debug!(root = %root.display(), files = created.len(), "scaffolded configuration root");
    Ok(ScaffoldReport { root, created })
}

fn default_context() -> Context {
    let metadata = json!({
        "name": "My Project",
        "description": "VERSA configuration for my project",
        "author": "",
        "created": chrono::Local::now().format("%Y-%m-%d").to_string(),
    });

    Context {
        metadata: metadata.as_object().cloned(),
        rules: Some(vec![format!("{}/style.md", AiPath::RulesDir)]),
        settings: Some(Settings {
            model: Some("claude-sonnet-4".to_string()),
            temperature: Some(0.7),
            ..Default::default()
        }),
        ..Context::minimal()
    }
}

fn sample_profile(name: &str) -> Profile {
    let mut profile = Profile::new("deep")
        .with_field(
            "metadata",
            json!({
                "name": format!("{name} Profile"),
                "description": format!("Settings layered on the base configuration for {name}"),
            }),
        )
        .with_field("settings", json!({"temperature": 0.3}));
    profile.version = Some(versa_meta::SUPPORTED_VERSION.to_string());
    profile
}
