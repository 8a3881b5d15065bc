//! Configuration resolution engine for VERSA `.ai/` roots
//!
//! This crate turns a directory of configuration files into one effective
//! configuration and an agent-ready payload:
//!
//! - **Loading**: schema-checked reads of context, profiles, agents and rules
//! - **Merging**: the `deep`, `shallow` and `replace` profile strategies
//! - **Validation**: reference checks, sub-resource shape checks, agent cycles
//! - **Assembly**: filtered rule documents plus expanded context globs
//!
//! # Architecture
//!
//! ```text
//!                    versa-cli
//!                        |
//!                   versa-core
//!                        |
//!              +---------+---------+
//!              |                   |
//!          versa-fs            versa-meta
//! ```
//!
//! # Example
//!
//! ```no_run
//! use versa_core::{AssemblyOptions, ConfigLoader, assemble_with, resolve};
//!
//! fn example() -> versa_core::Result<()> {
//!     let loader = ConfigLoader::new("project/.ai");
//!     let config = resolve(&loader, Some("ci"), None)?;
//!     let payload = assemble_with(&loader, config, &AssemblyOptions::default());
//!     println!("{} rules", payload.rules.len());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod assembly;
pub mod discovery;
pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod merge;
pub mod resolve;
pub mod scaffold;
pub mod validation;

pub use agent::apply_agent;
pub use assembly::{
    AssembledContext, AssemblyMetadata, AssemblyOptions, assemble_context, assemble_with,
};
pub use discovery::{Discovery, has_ai_folder, project_root};
pub use error::{Error, Result};
pub use loader::{ConfigLoader, RuleDocument, normalize_agent_ref};
pub use merge::{FieldPatch, merge_configs};
pub use resolve::resolve;
pub use scaffold::{ScaffoldOptions, ScaffoldReport, scaffold};
pub use validation::{Issue, IssueLevel, ValidationReport, validate, validate_root};
