//! Error types for versa-core

use std::path::PathBuf;

/// Result type for versa-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration root has no `context.json`
    #[error("Context file not found: {path}")]
    ContextNotFound { path: PathBuf },

    #[error("Profile not found: {name} (expected {path})")]
    ProfileNotFound { name: String, path: PathBuf },

    #[error("Agent not found: {name} (expected {path})")]
    AgentNotFound { name: String, path: PathBuf },

    #[error("Rule file not found: {path}")]
    RuleNotFound { path: String },

    /// A structured file could not be decoded
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// A metadata block could not be decoded
    #[error("Invalid ai:meta front matter in {file}: {message}")]
    FrontMatter { file: String, message: String },

    /// A decoded file does not match its schema; `details` joins every violation
    #[error("Invalid {file}: {details}")]
    Schema { file: String, details: String },

    /// A profile names a merge strategy outside the closed set
    #[error("Unknown merge strategy: {strategy}")]
    MergeStrategy { strategy: String },

    /// Scaffolding refused to overwrite an existing root
    #[error("Configuration root already exists at {path}")]
    AlreadyInitialized { path: PathBuf },

    /// No configuration root was found from the starting directory
    #[error("No .ai/ folder found from {start}")]
    RootNotFound { start: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from versa-fs
    #[error(transparent)]
    Fs(#[from] versa_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
