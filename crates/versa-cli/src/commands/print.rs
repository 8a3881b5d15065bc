//! Print command implementation
//!
//! Prints `context.json` merged with an optional profile.

use std::path::Path;

use colored::Colorize;
use versa_core::{ConfigLoader, merge_configs};
use versa_fs::AiPath;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::format;

/// Options for [`run_print`]
#[derive(Debug, Clone, Default)]
pub struct PrintOptions<'a> {
    pub profile: Option<&'a str>,
    pub compact: bool,
    pub show_merges: bool,
}

/// Run the print command
pub fn run_print(root: &Path, output: OutputFormat, options: &PrintOptions<'_>) -> Result<()> {
    println!("{}", render(root, output, options)?);
    Ok(())
}

/// Resolve and render without printing the result.
///
/// Merge details go to stderr so the rendered output stays clean.
pub fn render(root: &Path, output: OutputFormat, options: &PrintOptions<'_>) -> Result<String> {
    let loader = ConfigLoader::new(root);
    let mut config = loader.load_context()?;

    if options.show_merges {
        eprintln!("{} Base: {}", "=>".blue().bold(), AiPath::ContextFile);
    }

    if let Some(name) = options.profile {
        let profile = loader.load_profile(name)?;
        if options.show_merges {
            eprintln!(
                "{} Profile: {}/{}.json ({} merge)",
                "=>".blue().bold(),
                AiPath::ProfilesDir,
                name,
                profile.merge.cyan()
            );
        }
        config = merge_configs(&config, &profile)?;
    }

    match output {
        OutputFormat::Json => format::json(&config, !options.compact),
        OutputFormat::Yaml => format::yaml(&config),
        OutputFormat::Text => Ok(format::text(&config)),
    }
}
