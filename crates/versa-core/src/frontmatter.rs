//! `ai:meta` blocks at the top of rule and prompt documents
//!
//! ```text
//! ---
//! ai:meta
//!   priority: high
//!   applies_to: [rust, cli]
//! ---
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use versa_meta::{RuleMeta, SchemaKind, SchemaValidator};

use crate::{Error, Result};

static META_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*\nai:meta\s*\n([\s\S]*?)\n---\s*\n").unwrap());

/// What was found at the top of a markdown document.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaBlock {
    /// No `ai:meta` block
    Absent,
    /// Block parsed and matched the rule metadata schema
    Valid(RuleMeta),
    /// Block present but unusable, with the reason
    Invalid(String),
}

impl MetaBlock {
    /// The reason phrased for an issue report, if the block is invalid.
    pub fn issue_message(&self) -> Option<String> {
        match self {
            Self::Invalid(reason) => Some(format!("Invalid ai:meta front matter: {reason}")),
            Self::Absent | Self::Valid(_) => None,
        }
    }
}

/// The raw text between the `ai:meta` line and the closing delimiter.
pub fn extract(content: &str) -> Option<&str> {
    META_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Strip the smallest leading-space indent shared by every non-blank line.
pub fn normalize_indent(block: &str) -> String {
    let min_indent = block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    if min_indent == 0 {
        return block.to_string();
    }

    block
        .split('\n')
        .map(|line| {
            // Blank lines may be shorter than the indent
            let cut = min_indent.min(line.len() - line.trim_start_matches(' ').len());
            &line[cut..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode a metadata block as YAML into a JSON value.
pub fn parse_block(block: &str) -> std::result::Result<Value, String> {
    serde_yaml::from_str(&normalize_indent(block)).map_err(|e| e.to_string())
}

/// Locate, decode and schema-check the metadata block of `content`.
pub fn inspect(content: &str, validator: &dyn SchemaValidator) -> MetaBlock {
    let Some(block) = extract(content) else {
        return MetaBlock::Absent;
    };

    let value = match parse_block(block) {
        Ok(value) => value,
        Err(message) => return MetaBlock::Invalid(message),
    };

    let report = validator.validate(SchemaKind::RuleMeta, &value);
    if !report.is_valid() {
        return MetaBlock::Invalid(report.joined());
    }

    match serde_json::from_value(value) {
        Ok(meta) => MetaBlock::Valid(meta),
        Err(e) => MetaBlock::Invalid(e.to_string()),
    }
}

/// Metadata of the document `file`, failing on an invalid block.
pub fn parse_meta(
    file: &str,
    content: &str,
    validator: &dyn SchemaValidator,
) -> Result<Option<RuleMeta>> {
    match inspect(content, validator) {
        MetaBlock::Absent => Ok(None),
        MetaBlock::Valid(meta) => Ok(Some(meta)),
        MetaBlock::Invalid(message) => Err(Error::FrontMatter {
            file: file.to_string(),
            message,
        }),
    }
}
