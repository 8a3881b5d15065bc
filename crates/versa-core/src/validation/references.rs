//! File-reference and sub-resource checks

use serde_json::Value;
use versa_fs::{AiPath, io};
use versa_meta::{Context, Profile, SchemaKind};

use super::Issue;
use crate::frontmatter;
use crate::loader::ConfigLoader;

/// The reference lists a configuration can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Rule,
    Agent,
    Prompt,
    Tool,
    Knowledge,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        Self::Rule,
        Self::Agent,
        Self::Prompt,
        Self::Tool,
        Self::Knowledge,
    ];

    /// Configuration key holding this list.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Rule => "rules",
            Self::Agent => "agents",
            Self::Prompt => "prompts",
            Self::Tool => "tools",
            Self::Knowledge => "knowledge",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Self::Rule => "Rule",
            Self::Agent => "Agent",
            Self::Prompt => "Prompt",
            Self::Tool => "Tool",
            Self::Knowledge => "Knowledge",
        }
    }

    /// Schema for JSON resources; `None` for markdown documents.
    pub fn schema(&self) -> Option<SchemaKind> {
        match self {
            Self::Agent => Some(SchemaKind::Agent),
            Self::Tool => Some(SchemaKind::Tool),
            Self::Knowledge => Some(SchemaKind::Knowledge),
            Self::Rule | Self::Prompt => None,
        }
    }
}

/// Anything that carries reference lists: the base configuration or a profile.
pub trait ReferenceSource {
    fn references(&self, kind: ReferenceKind) -> Vec<String>;
}

impl ReferenceSource for Context {
    fn references(&self, kind: ReferenceKind) -> Vec<String> {
        let list = match kind {
            ReferenceKind::Rule => &self.rules,
            ReferenceKind::Agent => &self.agents,
            ReferenceKind::Prompt => &self.prompts,
            ReferenceKind::Tool => &self.tools,
            ReferenceKind::Knowledge => &self.knowledge,
        };
        list.clone().unwrap_or_default()
    }
}

impl ReferenceSource for Profile {
    fn references(&self, kind: ReferenceKind) -> Vec<String> {
        self.string_list(kind.field())
    }
}

/// One error per referenced path that does not exist under the root.
pub fn check_references(
    source: &dyn ReferenceSource,
    source_file: &str,
    loader: &ConfigLoader,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for kind in ReferenceKind::ALL {
        for path in source.references(kind) {
            if !loader.file_exists(&path) {
                issues.push(Issue::error(
                    source_file,
                    format!("{} file not found: {}", kind.noun(), path),
                ));
            }
        }
    }
    issues
}

/// Shape checks for every referenced resource that exists: JSON resources
/// against their schema, markdown documents for their metadata block.
pub fn check_resources(source: &dyn ReferenceSource, loader: &ConfigLoader) -> Vec<Issue> {
    let mut issues = Vec::new();

    for kind in [ReferenceKind::Agent, ReferenceKind::Tool, ReferenceKind::Knowledge] {
        let Some(schema) = kind.schema() else {
            continue;
        };
        for path in source.references(kind) {
            issues.extend(check_json_resource(loader, &path, schema));
        }
    }

    for kind in [ReferenceKind::Rule, ReferenceKind::Prompt] {
        for path in source.references(kind) {
            issues.extend(check_markdown_meta(loader, &path));
        }
    }

    issues
}

/// Validate every `*.json` under `memory/` against the memory schema.
pub fn check_memory(loader: &ConfigLoader) -> Vec<Issue> {
    let memory_dir = loader.resolve(AiPath::MemoryDir.as_str());
    if !memory_dir.is_dir() {
        return Vec::new();
    }

    match io::list_files(&memory_dir, "json") {
        Ok(files) => files
            .iter()
            .filter_map(|file| {
                let relative = format!("{}/{}", AiPath::MemoryDir, file);
                check_json_resource(loader, &relative, SchemaKind::Memory)
            })
            .collect(),
        Err(e) => {
            tracing::warn!(dir = %memory_dir, error = %e, "could not read memory directory");
            vec![Issue::warning(
                format!("{}/", AiPath::MemoryDir),
                format!("Could not read memory directory: {e}"),
            )]
        }
    }
}

fn check_json_resource(loader: &ConfigLoader, relative: &str, schema: SchemaKind) -> Option<Issue> {
    let path = loader.resolve(relative);
    if !path.is_file() {
        return None;
    }

    let label = schema.label();
    let content = match io::read_text(&path) {
        Ok(content) => content,
        Err(e) => return Some(Issue::error(relative, format!("Failed to read {label}: {e}"))),
    };

    let data: Value = match serde_json::from_str(&content) {
        Ok(data) => data,
        Err(e) => {
            return Some(Issue::error(
                relative,
                format!("Failed to parse {label} JSON: {e}"),
            ));
        }
    };

    let report = loader.validator().validate(schema, &data);
    if report.is_valid() {
        None
    } else {
        Some(Issue::error(
            relative,
            format!("Invalid {label}: {}", report.joined()),
        ))
    }
}

fn check_markdown_meta(loader: &ConfigLoader, relative: &str) -> Option<Issue> {
    let path = loader.resolve(relative);
    if !path.is_file() {
        return None;
    }

    let content = match io::read_text(&path) {
        Ok(content) => content,
        Err(e) => {
            return Some(Issue::error(
                relative,
                format!("Failed to read markdown file: {e}"),
            ));
        }
    };

    frontmatter::inspect(&content, loader.validator())
        .issue_message()
        .map(|message| Issue::error(relative, message))
}
