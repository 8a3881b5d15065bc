//! Well-known names inside a `.ai/` configuration root.

use std::path::Path;

/// Standard entries of a project's `.ai/` configuration root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiPath {
    /// The `.ai` directory itself (configuration root)
    AiDir,
    /// The required `context.json` base configuration
    ContextFile,
    /// Named override layers: `profiles/<name>.json`
    ProfilesDir,
    /// Agent definitions: `agents/<name>.json`
    AgentsDir,
    /// Markdown rule documents
    RulesDir,
    /// Markdown prompt documents
    PromptsDir,
    /// Tool configurations
    ToolsDir,
    /// Knowledge source configurations
    KnowledgeDir,
    /// Memory policies (validated even when unreferenced)
    MemoryDir,
    /// The `.git` directory, where discovery stops climbing
    GitDir,
}

impl AiPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiDir => ".ai",
            Self::ContextFile => "context.json",
            Self::ProfilesDir => "profiles",
            Self::AgentsDir => "agents",
            Self::RulesDir => "rules",
            Self::PromptsDir => "prompts",
            Self::ToolsDir => "tools",
            Self::KnowledgeDir => "knowledge",
            Self::MemoryDir => "memory",
            Self::GitDir => ".git",
        }
    }
}

impl AsRef<Path> for AiPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for AiPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for AiPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
