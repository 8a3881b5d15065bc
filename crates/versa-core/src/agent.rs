//! Agent overlay, applied after any profile merge

use versa_meta::{AgentDefinition, Context};

/// Fold an agent's settings and extra references into `config`.
///
/// `model`, `temperature` and `maxTokens` overwrite the matching settings
/// when the agent sets them. The agent's `rules` and `tools` are appended
/// after the configuration's own entries.
pub fn apply_agent(mut config: Context, agent: &AgentDefinition) -> Context {
    let settings = config.settings.get_or_insert_with(Default::default);
    if let Some(model) = &agent.model {
        settings.model = Some(model.clone());
    }
    settings.temperature = Some(agent.temperature);
    if let Some(max_tokens) = agent.max_tokens {
        settings.max_tokens = Some(max_tokens);
    }

    if let Some(rules) = &agent.rules {
        config
            .rules
            .get_or_insert_with(Vec::new)
            .extend(rules.iter().cloned());
    }
    if let Some(tools) = &agent.tools {
        config
            .tools
            .get_or_insert_with(Vec::new)
            .extend(tools.iter().cloned());
    }

    tracing::debug!(agent = %agent.name, "applied agent overlay");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_apply_agent() {
        let config: Context = serde_json::from_value(json!({
            "version": "1.0",
            "rules": ["rules/base.md"],
            "settings": {"model": "m1", "temperature": 0.7, "maxTokens": 1000}
        }))
        .unwrap();
        let agent: AgentDefinition = serde_json::from_value(json!({
            "version": "1.0",
            "name": "Reviewer",
            "temperature": 0.1,
            "rules": ["rules/review.md"],
            "tools": ["tools/git.json"]
        }))
        .unwrap();

        let resolved = apply_agent(config, &agent);

        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({
                "version": "1.0",
                "rules": ["rules/base.md", "rules/review.md"],
                "tools": ["tools/git.json"],
                "settings": {"model": "m1", "temperature": 0.1, "maxTokens": 1000}
            })
        );
    }

    #[test]
    fn test_apply_agent_creates_settings() {
        let agent: AgentDefinition = serde_json::from_value(json!({
            "version": "1.0",
            "name": "Fast",
            "temperature": 0.0,
            "model": "m-small",
            "maxTokens": 256
        }))
        .unwrap();

        let resolved = apply_agent(Context::minimal(), &agent);
        let settings = resolved.settings.unwrap();

        assert_eq!(settings.model.as_deref(), Some("m-small"));
        assert_eq!(settings.temperature, Some(0.0));
        assert_eq!(settings.max_tokens, Some(256));
        assert!(resolved.rules.is_none());
    }
}
