//! Context assembly against real directory trees

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use versa_core::{AssemblyOptions, ConfigLoader, assemble_context, assemble_with, resolve};
use versa_meta::{Context, Priority};
use versa_test_utils::TestRoot;

const HIGH_RUST: &str = "---\nai:meta\n  priority: high\n  applies_to: [rust]\n---\n\n# High\n";
const LOW_DOCS: &str = "---\nai:meta\n  priority: low\n  applies_to: [docs]\n---\n\n# Low\n";
const PLAIN: &str = "# Plain rule without metadata\n";

fn fixture() -> TestRoot {
    TestRoot::new()
        .context(json!({
            "version": "1.0",
            "rules": ["rules/high.md", "rules/low.md", "rules/plain.md"],
            "context": ["src/**/*.rs", "*.md"]
        }))
        .rule("rules/high.md", HIGH_RUST)
        .rule("rules/low.md", LOW_DOCS)
        .rule("rules/plain.md", PLAIN)
        .project_file("src/main.rs", "fn main() {}\n")
        .project_file("src/cli/args.rs", "\n")
        .project_file("src/notes.txt", "\n")
        .project_file("README.md", "# Demo\n")
        .project_file(".hidden.md", "\n")
}

fn rule_paths(options: &AssemblyOptions) -> Vec<String> {
    let root = fixture();
    let loader = ConfigLoader::new(root.ai());
    let config = loader.load_context().unwrap();
    assemble_with(&loader, config, options)
        .rules
        .into_iter()
        .map(|rule| rule.path)
        .collect()
}

#[test]
fn test_assembles_rules_and_files() {
    let root = fixture();
    let loader = ConfigLoader::new(root.ai());
    let config = loader.load_context().unwrap();

    let assembled = assemble_with(&loader, config.clone(), &AssemblyOptions::default());

    assert_eq!(assembled.config, config);
    assert_eq!(assembled.rules.len(), 3);
    assert_eq!(assembled.rules[0].content, HIGH_RUST);
    assert_eq!(
        assembled.rules[0].meta.as_ref().and_then(|m| m.priority),
        Some(Priority::High)
    );
    assert!(assembled.rules[2].meta.is_none());
    assert_eq!(
        assembled.context_files,
        vec!["src/cli/args.rs", "src/main.rs", "README.md"]
    );
    assert!(assembled.warnings.is_empty());
}

#[test]
fn test_priority_filter_keeps_untagged_rules() {
    let options = AssemblyOptions {
        min_priority: Some(Priority::Medium),
        ..Default::default()
    };
    assert_eq!(rule_paths(&options), vec!["rules/high.md", "rules/plain.md"]);
}

#[test]
fn test_tag_filter() {
    let options = AssemblyOptions {
        tags: Some(vec!["docs".into(), "python".into()]),
        ..Default::default()
    };
    assert_eq!(rule_paths(&options), vec!["rules/low.md", "rules/plain.md"]);
}

#[test]
fn test_missing_rule_becomes_warning() {
    let root = TestRoot::new().rule("rules/ok.md", PLAIN);
    let config: Context = serde_json::from_value(json!({
        "version": "1.0",
        "rules": ["rules/gone.md", "rules/ok.md"]
    }))
    .unwrap();

    let assembled = assemble_context(root.ai(), config, &AssemblyOptions::default());

    assert_eq!(assembled.rules.len(), 1);
    assert_eq!(assembled.rules[0].path, "rules/ok.md");
    assert_eq!(assembled.warnings.len(), 1);
    assert!(assembled.warnings[0].contains("rules/gone.md"));
}

#[test]
fn test_invalid_metadata_is_dropped_not_fatal() {
    let root = TestRoot::new().rule("rules/bad.md", "---\nai:meta\n  priority: ultra\n---\n\nbody\n");
    let config: Context =
        serde_json::from_value(json!({"version": "1.0", "rules": ["rules/bad.md"]})).unwrap();

    let assembled = assemble_context(
        root.ai(),
        config,
        &AssemblyOptions {
            min_priority: Some(Priority::Critical),
            ..Default::default()
        },
    );

    assert_eq!(assembled.rules.len(), 1);
    assert!(assembled.rules[0].meta.is_none());
}

#[test]
fn test_patterns_concatenate_without_dedup() {
    let root = TestRoot::new().project_file("a.md", "\n");
    let config: Context = serde_json::from_value(json!({
        "version": "1.0",
        "context": ["*.md", "a.md", "[bad"]
    }))
    .unwrap();

    let assembled = assemble_context(root.ai(), config, &AssemblyOptions::default());

    assert_eq!(assembled.context_files, vec!["a.md", "a.md"]);
    assert_eq!(assembled.warnings.len(), 1);
    assert!(assembled.warnings[0].contains("[bad"));
}

#[test]
fn test_serialized_shape() {
    let root = fixture().agent(
        "reviewer",
        json!({"version": "1.0", "name": "Reviewer", "temperature": 0.1, "rules": ["rules/low.md"]}),
    );
    let loader = ConfigLoader::new(root.ai());
    let config = resolve(&loader, None, Some("reviewer")).unwrap();

    let assembled = assemble_with(
        &loader,
        config,
        &AssemblyOptions {
            agent: Some("reviewer".into()),
            ..Default::default()
        },
    );
    let value = serde_json::to_value(&assembled).unwrap();

    assert_eq!(value["metadata"]["agent"], "reviewer");
    assert!(value["metadata"].get("profile").is_none());
    assert!(value["metadata"]["timestamp"].is_string());
    assert_eq!(value["config"]["settings"]["temperature"], 0.1);
    assert_eq!(value["rules"].as_array().unwrap().len(), 4);
    assert_eq!(value["rules"][2]["meta"], serde_json::Value::Null);
    assert!(value["contextFiles"].is_array());
    assert!(value.get("warnings").is_none());
}

/// A project created under the crate directory so it can be named by a
/// path relative to the test's working directory.
fn relative_project() -> TempDir {
    let project = TempDir::new_in(".").unwrap();
    fs::create_dir_all(project.path().join(".ai")).unwrap();
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(project.path().join("notes.txt"), "notes\n").unwrap();
    fs::write(project.path().join("src/a.rs"), "\n").unwrap();
    project
}

#[test]
fn test_relative_roots_expand_against_project() {
    let project = relative_project();
    let name = project.path().file_name().unwrap();
    let config: Context = serde_json::from_value(json!({
        "version": "1.0",
        "context": ["*.txt", "src/*.rs"]
    }))
    .unwrap();

    for root in [
        Path::new(name).join(".ai"),
        Path::new(".").join(name).join(".ai"),
    ] {
        let assembled = assemble_context(root.as_path(), config.clone(), &AssemblyOptions::default());

        assert_eq!(
            assembled.context_files,
            vec!["notes.txt", "src/a.rs"],
            "root {}",
            root.display()
        );
        assert!(assembled.warnings.is_empty(), "{:?}", assembled.warnings);
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_becomes_warning() {
    use std::os::unix::fs::PermissionsExt;

    let root = TestRoot::new()
        .project_file("src/ok.rs", "\n")
        .project_file("src/locked/hidden.rs", "\n");
    let locked = root.project().join("src/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through the mode bits; nothing to observe then
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let config: Context =
        serde_json::from_value(json!({"version": "1.0", "context": ["src/**/*.rs"]})).unwrap();
    let assembled = assemble_context(root.ai(), config, &AssemblyOptions::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(assembled.context_files, vec!["src/ok.rs"]);
    assert_eq!(assembled.warnings.len(), 1, "{:?}", assembled.warnings);
    assert!(assembled.warnings[0].contains("src/**/*.rs"));
    assert!(assembled.warnings[0].contains("locked"));
}
