//! Context command implementation
//!
//! Resolves the configuration and assembles the full payload: rule
//! documents, matched context files and assembly metadata.

use std::path::Path;

use versa_core::{AssemblyOptions, ConfigLoader, assemble_with, resolve};

use crate::cli::PayloadFormat;
use crate::error::Result;
use crate::format;

/// Run the context command
pub fn run_context(root: &Path, output: PayloadFormat, options: AssemblyOptions) -> Result<()> {
    println!("{}", render(root, output, options)?);
    Ok(())
}

/// Assemble and render without printing the result.
pub fn render(root: &Path, output: PayloadFormat, options: AssemblyOptions) -> Result<String> {
    let loader = ConfigLoader::new(root);
    let config = resolve(
        &loader,
        options.profile.as_deref(),
        options.agent.as_deref(),
    )?;
    let assembled = assemble_with(&loader, config, &options);

    match output {
        PayloadFormat::Json => format::json(&assembled, true),
        PayloadFormat::Yaml => format::yaml(&assembled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use versa_meta::Priority;
    use versa_test_utils::TestRoot;

    #[test]
    fn test_payload_with_agent_and_filter() {
        let root = TestRoot::new()
            .context(json!({
                "version": "1.0",
                "rules": ["rules/low.md"],
                "context": ["*.txt"]
            }))
            .rule("rules/low.md", "---\nai:meta\n  priority: low\n---\n\nLow\n")
            .rule("rules/high.md", "---\nai:meta\n  priority: high\n---\n\nHigh\n")
            .agent(
                "lead",
                json!({"version": "1.0", "name": "Lead", "temperature": 0.2, "rules": ["rules/high.md"]}),
            )
            .project_file("notes.txt", "notes\n");

        let rendered = render(
            &root.ai(),
            PayloadFormat::Json,
            AssemblyOptions {
                agent: Some("lead".into()),
                min_priority: Some(Priority::High),
                ..Default::default()
            },
        )
        .unwrap();
        let payload: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(payload["rules"].as_array().unwrap().len(), 1);
        assert_eq!(payload["rules"][0]["path"], "rules/high.md");
        assert_eq!(payload["contextFiles"], json!(["notes.txt"]));
        assert_eq!(payload["metadata"]["agent"], "lead");
    }

    #[test]
    fn test_missing_agent_is_error() {
        let root = TestRoot::new().context(json!({"version": "1.0"}));
        let options = AssemblyOptions {
            agent: Some("ghost".into()),
            ..Default::default()
        };
        assert!(render(&root.ai(), PayloadFormat::Yaml, options).is_err());
    }
}
