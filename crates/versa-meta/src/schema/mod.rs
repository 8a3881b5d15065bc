//! Typed records for the files of a `.ai/` configuration root
//!
//! - `context.json` - [`Context`]
//! - `profiles/*.json` - [`Profile`]
//! - `agents/*.json` - [`AgentDefinition`]
//! - `ai:meta` blocks in rules and prompts - [`RuleMeta`]

pub mod agent;
pub mod context;
pub mod profile;
pub mod rule;

pub use agent::AgentDefinition;
pub use context::{Context, FilePermissions, Permissions, SUPPORTED_VERSION, Settings};
pub use profile::{MergeStrategy, Profile};
pub use rule::{AttachMode, Priority, RuleMeta};
