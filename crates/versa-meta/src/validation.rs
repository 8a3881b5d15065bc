//! Structural validation of decoded configuration data
//!
//! Each [`SchemaKind`] names one file shape. [`BuiltinSchemas`] checks a
//! decoded [`Value`] against that shape and reports every violation, not just
//! the first, each located by a JSON pointer into the document.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::Error;
use crate::schema::{MergeStrategy, Priority, SUPPORTED_VERSION};

/// The named schemas a document can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Context,
    Profile,
    Agent,
    Tool,
    Knowledge,
    Memory,
    RuleMeta,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Profile => "profile",
            Self::Agent => "agent",
            Self::Tool => "tool",
            Self::Knowledge => "knowledge",
            Self::Memory => "memory",
            Self::RuleMeta => "rule-meta",
        }
    }

    /// Human label used in validation messages ("Invalid tool configuration: ...").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Profile => "profile",
            Self::Agent => "agent",
            Self::Tool => "tool configuration",
            Self::Knowledge => "knowledge configuration",
            Self::Memory => "memory policy",
            Self::RuleMeta => "ai:meta front matter",
        }
    }
}

impl FromStr for SchemaKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "context" => Ok(Self::Context),
            "profile" => Ok(Self::Profile),
            "agent" => Ok(Self::Agent),
            "tool" => Ok(Self::Tool),
            "knowledge" => Ok(Self::Knowledge),
            "memory" => Ok(Self::Memory),
            "rule-meta" => Ok(Self::RuleMeta),
            _ => Err(Error::UnknownSchema { name: s.to_string() }),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// JSON pointer to the offending value; empty for the document itself
    pub location: String,
    pub message: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.location.is_empty() {
            "/"
        } else {
            &self.location
        };
        write!(f, "{}: {}", location, self.message)
    }
}

/// Outcome of checking one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub errors: Vec<SchemaError>,
}

impl SchemaReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors as `location: message; location: message`.
    pub fn joined(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checks decoded data against a named schema.
pub trait SchemaValidator {
    fn validate(&self, kind: SchemaKind, data: &Value) -> SchemaReport;
}

/// The schemas shipped with the engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSchemas;

impl BuiltinSchemas {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaValidator for BuiltinSchemas {
    fn validate(&self, kind: SchemaKind, data: &Value) -> SchemaReport {
        let mut check = Check::default();
        match kind {
            SchemaKind::Context => check.configuration(data, false),
            SchemaKind::Profile => check.configuration(data, true),
            SchemaKind::Agent => check.agent(data),
            SchemaKind::Tool => check.tool(data),
            SchemaKind::Knowledge => check.knowledge(data),
            SchemaKind::Memory => check.memory(data),
            SchemaKind::RuleMeta => check.rule_meta(data),
        }
        tracing::trace!(schema = %kind, errors = check.errors.len(), "schema check");
        SchemaReport {
            errors: check.errors,
        }
    }
}

const REFERENCE_LISTS: [&str; 6] = ["rules", "context", "agents", "prompts", "tools", "knowledge"];

fn pointer(parent: &str, key: &str) -> String {
    let escaped = key.replace('~', "~0").replace('/', "~1");
    format!("{parent}/{escaped}")
}

/// Error accumulator shared by the individual schema walkers.
#[derive(Default)]
struct Check {
    errors: Vec<SchemaError>,
}

impl Check {
    fn fail(&mut self, location: &str, message: impl Into<String>) {
        self.errors.push(SchemaError {
            location: location.to_string(),
            message: message.into(),
        });
    }

    fn object<'a>(&mut self, location: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        let map = value.as_object();
        if map.is_none() {
            self.fail(location, "must be object");
        }
        map
    }

    fn required<'a>(
        &mut self,
        location: &str,
        map: &'a Map<String, Value>,
        key: &str,
    ) -> Option<&'a Value> {
        let value = map.get(key);
        if value.is_none() {
            self.fail(location, format!("must have required property '{key}'"));
        }
        value
    }

    fn string(&mut self, location: &str, value: &Value) -> bool {
        let ok = value.is_string();
        if !ok {
            self.fail(location, "must be string");
        }
        ok
    }

    fn non_empty_string(&mut self, location: &str, value: &Value) {
        if self.string(location, value) && value.as_str().is_some_and(str::is_empty) {
            self.fail(location, "must NOT have fewer than 1 characters");
        }
    }

    fn string_array(&mut self, location: &str, value: &Value) {
        match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.string(&pointer(location, &index.to_string()), item);
                }
            }
            None => self.fail(location, "must be array"),
        }
    }

    fn one_of(&mut self, location: &str, value: &Value, allowed: &[&str]) {
        if !self.string(location, value) {
            return;
        }
        if !value.as_str().is_some_and(|s| allowed.contains(&s)) {
            self.fail(location, "must be equal to one of the allowed values");
        }
    }

    fn number_between(&mut self, location: &str, value: &Value, min: f64, max: f64) {
        match value.as_f64() {
            Some(n) if n < min => self.fail(location, format!("must be >= {min}")),
            Some(n) if n > max => self.fail(location, format!("must be <= {max}")),
            Some(_) => {}
            None => self.fail(location, "must be number"),
        }
    }

    fn positive_integer(&mut self, location: &str, value: &Value) {
        if value.as_u64().is_some_and(|n| n >= 1) {
            return;
        }
        if value.is_i64() || value.is_u64() {
            self.fail(location, "must be >= 1");
        } else {
            self.fail(location, "must be integer");
        }
    }

    fn version(&mut self, location: &str, value: &Value) {
        if self.string(location, value) && value.as_str() != Some(SUPPORTED_VERSION) {
            self.fail(location, "must be equal to constant");
        }
    }

    /// Base configuration or profile. Profiles add `merge` and allow `null`
    /// for any optional field.
    fn configuration(&mut self, data: &Value, profile: bool) {
        let Some(map) = self.object("", data) else {
            return;
        };

        if profile {
            if let Some(merge) = self.required("", map, "merge") {
                let allowed = MergeStrategy::ALL.map(|s| s.as_str());
                self.one_of("/merge", merge, &allowed);
            }
        } else {
            self.required("", map, "version");
        }

        for (key, value) in map {
            let location = pointer("", key);
            if key == "merge" && profile {
                continue;
            }
            if profile && value.is_null() {
                continue;
            }
            match key.as_str() {
                "version" => self.version(&location, value),
                "$schema" => {
                    self.string(&location, value);
                }
                "metadata" => {
                    self.object(&location, value);
                }
                "settings" => self.settings(&location, value),
                "permissions" => self.permissions(&location, value),
                list if REFERENCE_LISTS.contains(&list) => self.string_array(&location, value),
                _ => self.fail(
                    "",
                    format!("must NOT have additional properties ('{key}')"),
                ),
            }
        }
    }

    fn settings(&mut self, location: &str, value: &Value) {
        let Some(map) = self.object(location, value) else {
            return;
        };
        if let Some(model) = map.get("model") {
            self.string(&pointer(location, "model"), model);
        }
        if let Some(temperature) = map.get("temperature") {
            self.number_between(&pointer(location, "temperature"), temperature, 0.0, 2.0);
        }
        if let Some(max_tokens) = map.get("maxTokens") {
            self.positive_integer(&pointer(location, "maxTokens"), max_tokens);
        }
    }

    fn permissions(&mut self, location: &str, value: &Value) {
        let Some(map) = self.object(location, value) else {
            return;
        };
        let Some(files) = map.get("files") else {
            return;
        };
        let files_location = pointer(location, "files");
        let Some(files) = self.object(&files_location, files) else {
            return;
        };
        for (key, patterns) in files {
            match key.as_str() {
                "read" | "write" | "deny" => {
                    self.string_array(&pointer(&files_location, key), patterns)
                }
                _ => self.fail(
                    &files_location,
                    format!("must NOT have additional properties ('{key}')"),
                ),
            }
        }
    }

    fn agent(&mut self, data: &Value) {
        let Some(map) = self.object("", data) else {
            return;
        };
        if let Some(version) = self.required("", map, "version") {
            self.string("/version", version);
        }
        if let Some(name) = self.required("", map, "name") {
            self.non_empty_string("/name", name);
        }
        if let Some(temperature) = self.required("", map, "temperature") {
            self.number_between("/temperature", temperature, 0.0, 2.0);
        }
        if let Some(model) = map.get("model") {
            self.string("/model", model);
        }
        if let Some(max_tokens) = map.get("maxTokens") {
            self.positive_integer("/maxTokens", max_tokens);
        }
        for key in ["rules", "tools", "agents"] {
            if let Some(list) = map.get(key) {
                self.string_array(&pointer("", key), list);
            }
        }
    }

    fn tool(&mut self, data: &Value) {
        let Some(map) = self.object("", data) else {
            return;
        };
        if let Some(version) = self.required("", map, "version") {
            self.string("/version", version);
        }
        let Some(servers) = self.required("", map, "servers") else {
            return;
        };
        let Some(servers) = self.object("/servers", servers) else {
            return;
        };
        for (name, server) in servers {
            let location = pointer("/servers", name);
            let Some(server) = self.object(&location, server) else {
                continue;
            };
            if let Some(command) = server.get("command") {
                self.string(&pointer(&location, "command"), command);
            }
            if let Some(args) = server.get("args") {
                self.string_array(&pointer(&location, "args"), args);
            }
        }
    }

    fn knowledge(&mut self, data: &Value) {
        let Some(map) = self.object("", data) else {
            return;
        };
        if let Some(version) = self.required("", map, "version") {
            self.string("/version", version);
        }
        let Some(sources) = self.required("", map, "sources") else {
            return;
        };
        let Some(sources) = sources.as_array() else {
            self.fail("/sources", "must be array");
            return;
        };
        for (index, source) in sources.iter().enumerate() {
            let location = pointer("/sources", &index.to_string());
            if let Some(source) = self.object(&location, source)
                && let Some(kind) = self.required(&location, source, "type")
            {
                self.string(&pointer(&location, "type"), kind);
            }
        }
    }

    fn memory(&mut self, data: &Value) {
        let Some(map) = self.object("", data) else {
            return;
        };
        if let Some(version) = self.required("", map, "version") {
            self.string("/version", version);
        }
        if let Some(retention) = map.get("retention") {
            self.object("/retention", retention);
        }
    }

    fn rule_meta(&mut self, data: &Value) {
        let Some(map) = self.object("", data) else {
            return;
        };
        if let Some(priority) = map.get("priority") {
            let allowed = Priority::ALL.map(|p| p.as_str());
            self.one_of("/priority", priority, &allowed);
        }
        if let Some(attach) = map.get("attach") {
            self.one_of("/attach", attach, &["always", "auto", "manual"]);
        }
        if let Some(scope) = map.get("scope") {
            self.string("/scope", scope);
        }
        if let Some(applies_to) = map.get("applies_to") {
            self.string_array("/applies_to", applies_to);
        }
    }
}
