//! VERSA CLI
//!
//! Scaffolds, validates, resolves and assembles `.ai/` configuration roots.

mod cli;
mod commands;
mod error;
mod format;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use versa_core::AssemblyOptions;

use cli::{Cli, Commands};
use commands::print::PrintOptions;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(command = ?cli.command, "starting");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;

    match cmd {
        Commands::Init {
            dir,
            minimal,
            profile,
        } => {
            let dir = dir.unwrap_or_else(|| cwd.clone());
            commands::run_init(&dir, minimal, profile.as_deref())
        }
        Commands::Lint { dir, json } => {
            let root = commands::locate_root(dir.as_deref(), &cwd)
                .unwrap_or_else(|_| fallback_root(dir, &cwd));
            commands::run_lint(&root, json)
        }
        Commands::Print {
            dir,
            profile,
            format,
            compact,
            show_merges,
        } => {
            let root = commands::locate_root(dir.as_deref(), &cwd)?;
            commands::run_print(
                &root,
                format,
                &PrintOptions {
                    profile: profile.as_deref(),
                    compact,
                    show_merges,
                },
            )
        }
        Commands::Context {
            dir,
            profile,
            agent,
            min_priority,
            tags,
            format,
        } => {
            let root = commands::locate_root(dir.as_deref(), &cwd)?;
            let options = AssemblyOptions {
                profile,
                agent,
                min_priority,
                tags: (!tags.is_empty()).then_some(tags),
            };
            commands::run_context(&root, format, options)
        }
    }
}

/// Where lint looks when no root can be located, so the report names it.
fn fallback_root(dir: Option<PathBuf>, cwd: &std::path::Path) -> PathBuf {
    dir.unwrap_or_else(|| cwd.to_path_buf())
        .join(versa_fs::AiPath::AiDir)
}
