//! Context assembly: the payload handed to an agent
//!
//! Takes an already resolved configuration, loads and filters its rule
//! documents, and expands its `context` globs against the project root
//! (the directory containing `.ai/`). Individual failures are downgraded to
//! warnings so one bad rule or pattern never loses the rest of the payload.

use std::path::Path;

use chrono::{DateTime, Utc};
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use versa_fs::NormalizedPath;
use versa_meta::{Context, Priority};

use crate::loader::{ConfigLoader, RuleDocument};

/// Filters and labels for one assembly.
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Profile the configuration was resolved with, recorded in metadata
    pub profile: Option<String>,
    /// Agent the configuration was resolved with, recorded in metadata
    pub agent: Option<String>,
    /// Drop rules whose priority is below this
    pub min_priority: Option<Priority>,
    /// Drop rules whose `applies_to` shares no tag with this set
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyMetadata {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// The resolved configuration with its rules and context files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledContext {
    pub config: Context,
    pub rules: Vec<RuleDocument>,
    /// Project-relative, forward-slash paths in pattern order, not deduplicated
    pub context_files: Vec<String>,
    pub metadata: AssemblyMetadata,
    /// Rules and patterns that were skipped because they failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Assemble the payload for the `.ai/` root at `root`.
pub fn assemble_context(
    root: impl Into<NormalizedPath>,
    config: Context,
    options: &AssemblyOptions,
) -> AssembledContext {
    assemble_with(&ConfigLoader::new(root), config, options)
}

/// Assemble the payload using an existing loader.
pub fn assemble_with(
    loader: &ConfigLoader,
    config: Context,
    options: &AssemblyOptions,
) -> AssembledContext {
    let mut warnings = Vec::new();

    let mut rules = Vec::new();
    for path in config.rules.iter().flatten() {
        match loader.load_rule(path) {
            Ok(rule) if keep_rule(&rule, options) => rules.push(rule),
            Ok(_) => tracing::debug!(rule = %path, "rule filtered out"),
            Err(e) => {
                let warning = format!("Could not load rule {path}: {e}");
                tracing::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    let project_root = project_dir(loader.root());

    let mut context_files = Vec::new();
    for pattern in config.context.iter().flatten() {
        match expand_pattern(&project_root, pattern) {
            Ok(expansion) => {
                context_files.extend(expansion.files);
                warnings.extend(expansion.warnings);
            }
            Err(e) => {
                let warning = format!("Could not expand pattern {pattern}: {e}");
                tracing::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    tracing::debug!(
        rules = rules.len(),
        files = context_files.len(),
        "assembled context"
    );

    AssembledContext {
        config,
        rules,
        context_files,
        metadata: AssemblyMetadata {
            timestamp: Utc::now(),
            profile: options.profile.clone(),
            agent: options.agent.clone(),
        },
        warnings,
    }
}

/// Rules without metadata, or without the filtered field, always pass.
fn keep_rule(rule: &RuleDocument, options: &AssemblyOptions) -> bool {
    let Some(meta) = &rule.meta else {
        return true;
    };
    if let Some(min) = options.min_priority
        && !meta.meets_priority(min)
    {
        return false;
    }
    if let Some(tags) = &options.tags
        && !meta.matches_tags(tags)
    {
        return false;
    }
    true
}

/// Files matched by one `context` pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Project-relative, forward-slash paths in glob order
    pub files: Vec<String>,
    /// Entries that could not be read or placed under the project root
    pub warnings: Vec<String>,
}

/// The directory containing the configuration root.
///
/// The root is canonicalized first, so relative roots such as `.ai` or
/// `./.ai` resolve to their real parent. A root that cannot be
/// canonicalized falls back to its lexical parent, or `.` when it has none.
pub fn project_dir(root: &NormalizedPath) -> NormalizedPath {
    let native = root.to_native();
    let resolved = dunce::canonicalize(&native).unwrap_or(native);
    match resolved.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => NormalizedPath::new(parent),
        _ => NormalizedPath::new("."),
    }
}

/// Expand one glob against `project_root`, keeping regular files only.
///
/// Hidden entries match only when the pattern names the leading dot.
/// Unreadable directories met during traversal become warnings.
pub fn expand_pattern(
    project_root: &NormalizedPath,
    pattern: &str,
) -> Result<Expansion, glob::PatternError> {
    let base = project_root.as_str().trim_end_matches('/');
    let relative_pattern = pattern.trim_start_matches("./");
    let full_pattern = if base == "." {
        relative_pattern.to_string()
    } else {
        format!("{}/{}", Pattern::escape(base), relative_pattern)
    };

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut expansion = Expansion::default();
    for entry in glob::glob_with(&full_pattern, options)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                let warning = format!(
                    "Could not read {} while expanding {pattern}: {}",
                    e.path().display(),
                    e.error()
                );
                tracing::warn!("{warning}");
                expansion.warnings.push(warning);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        match relative_to(&path, project_root) {
            Some(relative) => expansion.files.push(relative),
            None => {
                let warning = format!(
                    "Skipped {} from pattern {pattern}: not under {project_root}",
                    path.display()
                );
                tracing::warn!("{warning}");
                expansion.warnings.push(warning);
            }
        }
    }
    Ok(expansion)
}

/// `glob` drops a leading `./` from its matches, so both sides lose it.
fn relative_to(path: &Path, base: &NormalizedPath) -> Option<String> {
    let path = NormalizedPath::new(path);
    let path = path.as_str().trim_start_matches("./");
    let base = base.as_str().trim_start_matches("./");
    if base == "." {
        return Some(path.to_string());
    }
    NormalizedPath::new(path).strip_prefix(&NormalizedPath::new(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use versa_meta::RuleMeta;

    fn rule(meta: Option<serde_json::Value>) -> RuleDocument {
        RuleDocument {
            path: "rules/r.md".into(),
            meta: meta.map(|m| serde_json::from_value::<RuleMeta>(m).unwrap()),
            content: String::new(),
        }
    }

    #[test]
    fn test_keep_rule_priority() {
        let options = AssemblyOptions {
            min_priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(keep_rule(&rule(None), &options));
        assert!(keep_rule(&rule(Some(json!({"scope": "global"}))), &options));
        assert!(keep_rule(&rule(Some(json!({"priority": "critical"}))), &options));
        assert!(!keep_rule(&rule(Some(json!({"priority": "medium"}))), &options));
    }

    #[test]
    fn test_keep_rule_tags() {
        let options = AssemblyOptions {
            tags: Some(vec!["rust".into()]),
            ..Default::default()
        };
        assert!(keep_rule(&rule(Some(json!({"applies_to": ["rust"]}))), &options));
        assert!(!keep_rule(&rule(Some(json!({"applies_to": ["go"]}))), &options));
        assert!(keep_rule(&rule(Some(json!({"priority": "low"}))), &options));
    }

    #[test]
    fn test_project_dir_of_bare_relative_root() {
        let bare = project_dir(&NormalizedPath::new("no-such-project/.ai"));
        assert_eq!(bare.as_str(), "no-such-project");

        let dotted = project_dir(&NormalizedPath::new("./no-such-project/.ai"));
        assert_eq!(dotted.as_str(), "./no-such-project");
    }

    #[test]
    fn test_relative_to_dotted_base() {
        let base = NormalizedPath::new("./proj");
        assert_eq!(
            relative_to(Path::new("proj/notes.txt"), &base).as_deref(),
            Some("notes.txt")
        );
    }

    #[test]
    fn test_relative_to_current_dir() {
        let base = NormalizedPath::new(".");
        assert_eq!(
            relative_to(Path::new("notes.txt"), &base).as_deref(),
            Some("notes.txt")
        );
        assert_eq!(
            relative_to(Path::new("./src/a.rs"), &base).as_deref(),
            Some("src/a.rs")
        );
    }

    #[test]
    fn test_relative_to_outside_base() {
        let base = NormalizedPath::new("/work/project");
        assert_eq!(relative_to(Path::new("/work/other/a.rs"), &base), None);
        assert_eq!(
            relative_to(Path::new("/work/project/src/a.rs"), &base).as_deref(),
            Some("src/a.rs")
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let root = NormalizedPath::new("/tmp");
        assert!(expand_pattern(&root, "src/[").is_err());
    }
}
