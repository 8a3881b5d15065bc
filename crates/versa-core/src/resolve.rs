//! Layered resolution: base, then profile, then agent

use versa_meta::Context;

use crate::Result;
use crate::agent::apply_agent;
use crate::loader::ConfigLoader;
use crate::merge::merge_configs;

/// Resolve the effective configuration of a root.
///
/// Layers, each optional after the first:
/// 1. `context.json`
/// 2. `profiles/<profile>.json`, merged with its declared strategy
/// 3. `agents/<agent>.json`, applied as an overlay
///
/// A requested layer that is missing or malformed is an error.
pub fn resolve(loader: &ConfigLoader, profile: Option<&str>, agent: Option<&str>) -> Result<Context> {
    let mut config = loader.load_context()?;

    if let Some(name) = profile {
        let layer = loader.load_profile(name)?;
        config = merge_configs(&config, &layer)?;
    }

    if let Some(name) = agent {
        let definition = loader.load_agent(name)?;
        config = apply_agent(config, &definition);
    }

    Ok(config)
}
