//! Agent definition schema - loaded from `.ai/agents/<name>.json`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named agent with its own model settings and optional dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub version: String,

    /// Display name
    pub name: String,

    pub temperature: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(
        default,
        rename = "maxTokens",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_tokens: Option<u64>,

    /// Extra rule documents appended when this agent is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,

    /// Extra tool configurations appended when this agent is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,

    /// Other agents this one depends on, by path or bare name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
