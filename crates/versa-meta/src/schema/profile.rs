//! Override layer schema - loaded from `.ai/profiles/<name>.json`
//!
//! A profile has the shape of a [`Context`](super::Context) plus a `merge`
//! discriminant. Every other key is kept as raw JSON so the merge engine can
//! tell a key that is absent from one that is explicitly `null`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// How a profile combines with the base configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Recursive record merge with array concatenation
    Deep,
    /// Top-level keys replaced wholesale
    Shallow,
    /// Base discarded entirely
    Replace,
}

impl MergeStrategy {
    pub const ALL: [MergeStrategy; 3] = [Self::Deep, Self::Shallow, Self::Replace];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deep => "deep",
            Self::Shallow => "shallow",
            Self::Replace => "replace",
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = Error;

    /// Exact, case-sensitive match. There is no fallback strategy.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "deep" => Ok(Self::Deep),
            "shallow" => Ok(Self::Shallow),
            "replace" => Ok(Self::Replace),
            _ => Err(Error::UnknownMergeStrategy {
                strategy: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named override layer.
///
/// `merge` is kept as the raw string found in the file; it is only turned
/// into a [`MergeStrategy`] when the merge is dispatched, so an unknown value
/// surfaces as a strategy error naming exactly what was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Merge discriminant as written
    pub merge: String,

    /// Optional version; `replace` substitutes the default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Every other top-level key, explicit `null`s included
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Profile {
    /// A profile with the given strategy and no fields.
    pub fn new(merge: impl Into<String>) -> Self {
        Self {
            merge: merge.into(),
            version: None,
            fields: Map::new(),
        }
    }

    /// Builder-style setter for a top-level field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Parse the merge discriminant.
    pub fn strategy(&self) -> std::result::Result<MergeStrategy, Error> {
        self.merge.parse()
    }

    /// String entries of a reference list field, ignoring `null` and non-strings.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}
