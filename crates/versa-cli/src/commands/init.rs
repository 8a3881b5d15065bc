//! Init command implementation

use std::path::Path;

use colored::Colorize;
use versa_core::{ScaffoldOptions, scaffold};

use crate::error::Result;

/// Run the init command
///
/// Creates `dir` if needed, then scaffolds `.ai/` inside it.
pub fn run_init(dir: &Path, minimal: bool, profile: Option<&str>) -> Result<()> {
    println!(
        "{} Initializing .ai/ in {}...",
        "=>".blue().bold(),
        dir.display().to_string().cyan()
    );

    std::fs::create_dir_all(dir)?;
    let report = scaffold(
        dir,
        &ScaffoldOptions {
            minimal,
            profile: profile.map(str::to_string),
        },
    )?;

    for file in &report.created {
        println!("   {} {}", "+".green(), file);
    }
    println!("{} Created {}", "OK".green().bold(), report.root.display());
    Ok(())
}
