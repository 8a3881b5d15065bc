//! Whole-root validation
//!
//! [`validate_root`] never fails: every problem it finds, from a missing
//! root to a single bad reference, is collected as an [`Issue`]. The root is
//! valid when no issue has [`IssueLevel::Error`].

pub mod cycles;
pub mod references;

use serde::Serialize;
use versa_fs::{AiPath, NormalizedPath, io};

use crate::loader::ConfigLoader;

pub use cycles::{AgentGraph, cycle_message, find_cycle};
pub use references::{ReferenceKind, ReferenceSource, check_memory, check_references, check_resources};

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub level: IssueLevel,
    /// Root-relative file (or directory) the finding is about
    pub file: String,
    pub message: String,
}

impl Issue {
    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn warning(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

/// Result of validating a configuration root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            valid: !issues.iter().any(Issue::is_error),
            issues,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }
}

/// Validate the `.ai/` directory at `root` with the built-in schemas.
pub fn validate_root(root: impl Into<NormalizedPath>) -> ValidationReport {
    validate(&ConfigLoader::new(root))
}

/// Validate the root a loader points at.
pub fn validate(loader: &ConfigLoader) -> ValidationReport {
    let root = loader.root();
    let context_file = AiPath::ContextFile.as_str();

    if !root.is_dir() {
        return ValidationReport::from_issues(vec![Issue::error(
            root.as_str(),
            ".ai/ folder not found",
        )]);
    }

    if !loader.resolve(context_file).is_file() {
        return ValidationReport::from_issues(vec![Issue::error(
            context_file,
            "Required file context.json not found",
        )]);
    }

    let context = match loader.load_context() {
        Ok(context) => context,
        Err(e) => {
            return ValidationReport::from_issues(vec![Issue::error(context_file, e.to_string())]);
        }
    };

    let mut issues = Vec::new();
    issues.extend(check_references(&context, context_file, loader));
    issues.extend(check_resources(&context, loader));
    issues.extend(check_agent_cycles(loader));
    issues.extend(check_profiles(loader));
    issues.extend(check_memory(loader));

    let report = ValidationReport::from_issues(issues);
    tracing::debug!(
        root = %root,
        valid = report.valid,
        issues = report.issues.len(),
        "validated configuration root"
    );
    report
}

fn check_agent_cycles(loader: &ConfigLoader) -> Vec<Issue> {
    let agents_dir = loader.resolve(AiPath::AgentsDir.as_str());
    if !agents_dir.is_dir() {
        return Vec::new();
    }

    match AgentGraph::from_dir(&agents_dir) {
        Ok(graph) => {
            let cycle = graph.find_cycle();
            if cycle.is_empty() {
                Vec::new()
            } else {
                vec![Issue::error(
                    format!("{}/", AiPath::AgentsDir),
                    cycle_message(&cycle),
                )]
            }
        }
        Err(e) => vec![Issue::warning(
            format!("{}/", AiPath::AgentsDir),
            format!("Could not read agents directory: {e}"),
        )],
    }
}

fn check_profiles(loader: &ConfigLoader) -> Vec<Issue> {
    let profiles_dir = loader.resolve(AiPath::ProfilesDir.as_str());
    if !profiles_dir.is_dir() {
        return Vec::new();
    }

    let files = match io::list_files(&profiles_dir, "json") {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(dir = %profiles_dir, error = %e, "could not read profiles directory");
            return vec![Issue::warning(
                format!("{}/", AiPath::ProfilesDir),
                format!("Could not read profiles directory: {e}"),
            )];
        }
    };

    let mut issues = Vec::new();
    for file in files {
        let label = format!("{}/{}", AiPath::ProfilesDir, file);
        let name = file.strip_suffix(".json").unwrap_or(&file);
        match loader.load_profile(name) {
            Ok(profile) => {
                issues.extend(check_references(&profile, &label, loader));
                issues.extend(check_resources(&profile, loader));
            }
            Err(e) => issues.push(Issue::error(label, e.to_string())),
        }
    }
    issues
}
