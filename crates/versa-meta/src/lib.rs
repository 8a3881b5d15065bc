//! Schema records and shape validation for VERSA configuration files.
//!
//! The typed records in [`schema`] describe what the resolution engine works
//! with once a file is known to be well-formed. The [`validation`] module
//! decides whether arbitrary decoded data is well-formed in the first place,
//! reporting every violation with a JSON-pointer location.

pub mod error;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use schema::{
    AgentDefinition, AttachMode, Context, FilePermissions, MergeStrategy, Permissions, Priority,
    Profile, RuleMeta, SUPPORTED_VERSION, Settings,
};
pub use validation::{BuiltinSchemas, SchemaError, SchemaKind, SchemaReport, SchemaValidator};
