//! Base configuration schema - loaded from `.ai/context.json`
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "metadata": { "name": "My Project" },
//!   "rules": ["rules/style.md"],
//!   "context": ["src/**/*.rs"],
//!   "settings": { "model": "claude-sonnet-4", "temperature": 0.7 },
//!   "permissions": { "files": { "deny": [".env"] } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only configuration version this engine understands.
pub const SUPPORTED_VERSION: &str = "1.0";

fn default_version() -> String {
    SUPPORTED_VERSION.to_string()
}

/// Base configuration, and the shape of every resolved configuration.
///
/// Absent optional fields are omitted when serialized, so a round trip
/// through JSON never introduces keys the author did not write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// JSON Schema URI the author points editors at
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Configuration schema version
    #[serde(default = "default_version")]
    pub version: String,

    /// Free-form descriptive record (name, description, author, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    /// Rule documents, relative to the configuration root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,

    /// Glob patterns relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<String>>,

    /// Agent definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,

    /// Prompt documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Vec<String>>,

    /// Tool configurations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,

    /// Knowledge source configurations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<Vec<String>>,

    /// Model settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,

    /// File access permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

impl Default for Context {
    fn default() -> Self {
        Self::minimal()
    }
}

impl Context {
    /// A configuration carrying nothing but the supported version.
    pub fn minimal() -> Self {
        Self {
            schema: None,
            version: default_version(),
            metadata: None,
            rules: None,
            context: None,
            agents: None,
            prompts: None,
            tools: None,
            knowledge: None,
            settings: None,
            permissions: None,
        }
    }

    /// Whether `version` is the one this engine understands.
    pub fn has_supported_version(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }

    /// Look up a string entry in `metadata`.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }
}

/// Model settings.
///
/// The three recognized keys are typed; anything else (nested provider
/// options and the like) is carried through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(
        default,
        rename = "maxTokens",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_tokens: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Access permissions granted to the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilePermissions>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// File pattern lists controlling read, write and deny access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilePermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}
