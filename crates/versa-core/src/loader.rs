//! Schema-checked loading of files from a configuration root
//!
//! Every structured file is decoded to an untyped value first, checked
//! against its schema, and only then converted to the typed record, so a
//! malformed file reports all of its problems at once.

use serde::Serialize;
use serde::de::DeserializeOwned;
use versa_fs::{AiPath, ConfigStore, NormalizedPath, io};
use versa_meta::{
    AgentDefinition, BuiltinSchemas, Context, Profile, RuleMeta, SchemaKind, SchemaValidator,
};

use crate::frontmatter;
use crate::{Error, Result};

/// A markdown rule document as referenced from a configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDocument {
    /// Reference path exactly as written in the configuration
    pub path: String,
    /// Parsed metadata block, `None` when absent or unusable
    pub meta: Option<RuleMeta>,
    /// Full file content, metadata block included
    pub content: String,
}

/// Normalize a reference to an agent definition.
///
/// Backslashes become forward slashes, a leading `./` is dropped, bare names
/// are placed under `agents/`, and `.json` is appended when the reference has
/// no extension.
pub fn normalize_agent_ref(reference: &str) -> String {
    let mut normalized = reference.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    if !normalized.contains('/') {
        normalized = format!("{}/{}", AiPath::AgentsDir, normalized);
    }
    if NormalizedPath::new(&normalized).extension().is_none() {
        normalized.push_str(".json");
    }
    normalized
}

/// Loads configuration files from one `.ai/` root.
pub struct ConfigLoader {
    root: NormalizedPath,
    store: ConfigStore,
    validator: Box<dyn SchemaValidator>,
}

impl ConfigLoader {
    /// Create a loader for `root` (the `.ai/` directory) using the built-in schemas.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self::with_validator(root, Box::new(BuiltinSchemas::new()))
    }

    /// Create a loader that checks shapes with a custom validator.
    pub fn with_validator(
        root: impl Into<NormalizedPath>,
        validator: Box<dyn SchemaValidator>,
    ) -> Self {
        Self {
            root: root.into(),
            store: ConfigStore::new(),
            validator,
        }
    }

    /// The configuration root this loader reads from.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn validator(&self) -> &dyn SchemaValidator {
        self.validator.as_ref()
    }

    /// Resolve a root-relative reference to a full path.
    pub fn resolve(&self, relative: &str) -> NormalizedPath {
        self.root.join(relative)
    }

    /// Whether a root-relative reference names an existing file or directory.
    pub fn file_exists(&self, relative: &str) -> bool {
        self.resolve(relative).exists()
    }

    /// Load and check `context.json`.
    pub fn load_context(&self) -> Result<Context> {
        let path = self.resolve(AiPath::ContextFile.as_str());
        if !path.is_file() {
            return Err(Error::ContextNotFound {
                path: path.to_native(),
            });
        }
        tracing::debug!(path = %path, "loading context");
        self.load_checked(&path, AiPath::ContextFile.as_str(), SchemaKind::Context)
    }

    /// Load and check `profiles/<name>.json`.
    pub fn load_profile(&self, name: &str) -> Result<Profile> {
        let relative = format!("{}/{}.json", AiPath::ProfilesDir, name);
        let path = self.resolve(&relative);
        if !path.is_file() {
            return Err(Error::ProfileNotFound {
                name: name.to_string(),
                path: path.to_native(),
            });
        }
        tracing::debug!(profile = name, path = %path, "loading profile");
        self.load_checked(&path, &relative, SchemaKind::Profile)
    }

    /// Load and check an agent definition by bare name or root-relative path.
    pub fn load_agent(&self, name: &str) -> Result<AgentDefinition> {
        let relative = normalize_agent_ref(name);
        let path = self.resolve(&relative);
        if !path.is_file() {
            return Err(Error::AgentNotFound {
                name: name.to_string(),
                path: path.to_native(),
            });
        }
        tracing::debug!(agent = name, path = %path, "loading agent");
        self.load_checked(&path, &relative, SchemaKind::Agent)
    }

    /// Load a rule document.
    ///
    /// A metadata block that fails to decode or validate is dropped with a
    /// warning; the reference validator reports it as an issue separately.
    pub fn load_rule(&self, relative: &str) -> Result<RuleDocument> {
        let path = self.resolve(relative);
        if !path.is_file() {
            return Err(Error::RuleNotFound {
                path: relative.to_string(),
            });
        }

        let content = io::read_text(&path)?;
        let meta = frontmatter::parse_meta(relative, &content, self.validator())
            .unwrap_or_else(|e| {
                tracing::warn!("{e}");
                None
            });

        Ok(RuleDocument {
            path: relative.to_string(),
            meta,
            content,
        })
    }

    /// Decode `path`, check it against `kind`, then convert to `T`.
    pub fn load_checked<T: DeserializeOwned>(
        &self,
        path: &NormalizedPath,
        label: &str,
        kind: SchemaKind,
    ) -> Result<T> {
        let value = self.store.load_value(path).map_err(|e| match e {
            versa_fs::Error::ConfigParse { message, .. } => Error::Parse {
                file: label.to_string(),
                message,
            },
            other => Error::Fs(other),
        })?;

        let report = self.validator.validate(kind, &value);
        if !report.is_valid() {
            return Err(Error::Schema {
                file: label.to_string(),
                details: report.joined(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
