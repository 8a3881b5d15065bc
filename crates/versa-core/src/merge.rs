//! Merge engine: combine a base configuration with one profile
//!
//! Three strategies, selected by the profile's `merge` field:
//!
//! | strategy  | records             | arrays                 | `null`      |
//! |-----------|---------------------|------------------------|-------------|
//! | `deep`    | merged recursively  | base then profile      | removes key |
//! | `shallow` | replaced wholesale  | replaced wholesale     | removes key |
//! | `replace` | base discarded      | base discarded         | field dropped |
//!
//! Profile keys are read as a three-state [`FieldPatch`] so "absent" and
//! "explicitly null" never collapse into one case.

use serde_json::{Map, Value};
use versa_meta::{Context, MergeStrategy, Profile, SUPPORTED_VERSION};

use crate::{Error, Result};

/// One key of an override layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldPatch<'a> {
    /// Key not present: keep the base value
    Absent,
    /// Explicit `null`: delete the key from the result
    Remove,
    /// Any other value
    Set(&'a Value),
}

impl<'a> From<Option<&'a Value>> for FieldPatch<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Remove,
            Some(value) => Self::Set(value),
        }
    }
}

/// Merge `profile` onto `base` using the profile's declared strategy.
///
/// # Errors
///
/// Returns [`Error::MergeStrategy`] when `merge` is not one of
/// `deep`, `shallow` or `replace`. There is no fallback strategy.
pub fn merge_configs(base: &Context, profile: &Profile) -> Result<Context> {
    let strategy = profile.strategy().map_err(|_| Error::MergeStrategy {
        strategy: profile.merge.clone(),
    })?;
    tracing::debug!(%strategy, "merging profile");

    match strategy {
        MergeStrategy::Deep => merge_deep(base, profile),
        MergeStrategy::Shallow => merge_shallow(base, profile),
        MergeStrategy::Replace => merge_replace(profile),
    }
}

/// Recursive merge. Base keys the profile does not mention are kept.
pub fn merge_deep(base: &Context, profile: &Profile) -> Result<Context> {
    let mut merged = to_map(base)?;
    deep_merge_maps(&mut merged, &profile.fields);
    from_map(merged)
}

/// Top-level merge. Every key the profile sets replaces the base value.
pub fn merge_shallow(base: &Context, profile: &Profile) -> Result<Context> {
    let mut merged = to_map(base)?;
    for key in profile.fields.keys() {
        apply_shallow(&mut merged, key, FieldPatch::from(profile.fields.get(key)));
    }
    from_map(merged)
}

/// Discard the base. The result is the profile minus `merge`, with `null`
/// fields dropped and `version` defaulted.
pub fn merge_replace(profile: &Profile) -> Result<Context> {
    let mut merged: Map<String, Value> = profile
        .fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let version = profile
        .version
        .clone()
        .unwrap_or_else(|| SUPPORTED_VERSION.to_string());
    merged.insert("version".to_string(), Value::String(version));

    from_map(merged)
}

/// Deep-merge `overlay` into `target` at unbounded depth.
///
/// Arrays concatenate base-first without deduplication; records recurse;
/// `null` deletes; anything else overwrites.
pub fn deep_merge_maps(target: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for key in overlay.keys() {
        match FieldPatch::from(overlay.get(key)) {
            FieldPatch::Absent => {}
            FieldPatch::Remove => {
                target.remove(key);
            }
            FieldPatch::Set(value) => {
                if let Some(existing) = target.get_mut(key) {
                    match (existing, value) {
                        (Value::Array(existing), Value::Array(extra)) => {
                            existing.extend(extra.iter().cloned());
                            continue;
                        }
                        (Value::Object(existing), Value::Object(extra)) => {
                            deep_merge_maps(existing, extra);
                            continue;
                        }
                        _ => {}
                    }
                }
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn apply_shallow(target: &mut Map<String, Value>, key: &str, patch: FieldPatch<'_>) {
    match patch {
        FieldPatch::Absent => {}
        FieldPatch::Remove => {
            target.remove(key);
        }
        FieldPatch::Set(value) => {
            target.insert(key.to_string(), value.clone());
        }
    }
}

fn to_map(context: &Context) -> Result<Map<String, Value>> {
    match serde_json::to_value(context)? {
        Value::Object(map) => Ok(map),
        // A struct always serializes to an object
        _ => Ok(Map::new()),
    }
}

fn from_map(map: Map<String, Value>) -> Result<Context> {
    Ok(serde_json::from_value(Value::Object(map))?)
}
