//! Rendering configurations and payloads for stdout

use serde::Serialize;
use versa_meta::Context;

use crate::error::Result;

/// Render as JSON, indented by two spaces when `pretty`.
pub fn json<T: Serialize>(data: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };
    Ok(rendered)
}

/// Render as a YAML document.
pub fn yaml<T: Serialize>(data: &T) -> Result<String> {
    let rendered = serde_yaml::to_string(data)?;
    Ok(rendered.trim_end().to_string())
}

/// Render a human-readable summary of a configuration.
pub fn text(config: &Context) -> String {
    let mut lines = vec![
        "VERSA Configuration".to_string(),
        "===================".to_string(),
        String::new(),
        format!("Version: {}", config.version),
    ];

    if config.metadata.is_some() {
        lines.push(String::new());
        lines.push("Metadata:".to_string());
        for (key, label) in [
            ("name", "Name"),
            ("description", "Description"),
            ("author", "Author"),
        ] {
            if let Some(value) = config.metadata_str(key).filter(|v| !v.is_empty()) {
                lines.push(format!("  {label}: {value}"));
            }
        }
    }

    for (label, items) in [
        ("Rules", &config.rules),
        ("Context Patterns", &config.context),
        ("Agents", &config.agents),
    ] {
        let Some(items) = items.as_ref().filter(|items| !items.is_empty()) else {
            continue;
        };
        lines.push(String::new());
        lines.push(format!("{label} ({}):", items.len()));
        lines.extend(items.iter().map(|item| format!("  - {item}")));
    }

    if let Some(settings) = &config.settings {
        lines.push(String::new());
        lines.push("Settings:".to_string());
        if let Some(model) = &settings.model {
            lines.push(format!("  Model: {model}"));
        }
        if let Some(temperature) = settings.temperature {
            lines.push(format!("  Temperature: {temperature}"));
        }
        if let Some(max_tokens) = settings.max_tokens.filter(|n| *n > 0) {
            lines.push(format!("  Max Tokens: {max_tokens}"));
        }
    }

    if let Some(permissions) = &config.permissions {
        lines.push(String::new());
        lines.push("Permissions:".to_string());
        if let Some(files) = &permissions.files {
            lines.push("  Files:".to_string());
            for (label, patterns) in [
                ("Read", &files.read),
                ("Write", &files.write),
                ("Deny", &files.deny),
            ] {
                if let Some(patterns) = patterns {
                    lines.push(format!("    {label}: {} patterns", patterns.len()));
                }
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: serde_json::Value) -> Context {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_json_pretty_and_compact() {
        let data = config(json!({"version": "1.0", "rules": ["a.md"]}));
        assert_eq!(
            json(&data, true).unwrap(),
            "{\n  \"version\": \"1.0\",\n  \"rules\": [\n    \"a.md\"\n  ]\n}"
        );
        assert_eq!(
            json(&data, false).unwrap(),
            r#"{"version":"1.0","rules":["a.md"]}"#
        );
    }

    #[test]
    fn test_yaml() {
        let data = config(json!({"version": "1.0", "rules": ["a.md"]}));
        assert_eq!(yaml(&data).unwrap(), "version: '1.0'\nrules:\n- a.md");
    }

    #[test]
    fn test_text_minimal() {
        assert_eq!(
            text(&Context::minimal()),
            "VERSA Configuration\n===================\n\nVersion: 1.0"
        );
    }

    #[test]
    fn test_text_full() {
        let rendered = text(&config(json!({
            "version": "1.0",
            "metadata": {"name": "Demo", "author": ""},
            "rules": ["rules/a.md", "rules/b.md"],
            "context": [],
            "settings": {"model": "m1", "temperature": 0.5, "maxTokens": 2048},
            "permissions": {"files": {"read": ["src/**", "docs/**"], "deny": [".env"]}}
        })));

        assert!(rendered.contains("Metadata:\n  Name: Demo\n\n"));
        assert!(!rendered.contains("Author"));
        assert!(rendered.contains("Rules (2):\n  - rules/a.md\n  - rules/b.md"));
        assert!(!rendered.contains("Context Patterns"));
        assert!(rendered.contains("  Model: m1\n  Temperature: 0.5\n  Max Tokens: 2048"));
        assert!(rendered.ends_with("  Files:\n    Read: 2 patterns\n    Deny: 1 patterns"));
    }
}
