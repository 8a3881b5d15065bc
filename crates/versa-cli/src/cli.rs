//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use versa_meta::Priority;

/// VERSA - resolve, validate and assemble `.ai/` agent configuration
#[derive(Parser, Debug)]
#[command(name = "versa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Initialize a new .ai/ folder
    ///
    /// Examples:
    ///   versa init                   # Scaffold in the current directory
    ///   versa init --minimal         # Only context.json
    ///   versa init -p review         # Also write profiles/review.json
    Init {
        /// Project directory to create .ai/ in
        #[arg(env = "VERSA_DIR")]
        dir: Option<PathBuf>,

        /// Create a minimal configuration
        #[arg(short, long)]
        minimal: bool,

        /// Also create a sample profile with this name
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Validate .ai/ folder configuration
    Lint {
        /// Directory containing the .ai/ folder
        #[arg(env = "VERSA_DIR")]
        dir: Option<PathBuf>,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the merged configuration
    Print {
        /// Directory containing the .ai/ folder
        #[arg(env = "VERSA_DIR")]
        dir: Option<PathBuf>,

        /// Profile to merge over context.json
        #[arg(long, env = "VERSA_PROFILE")]
        profile: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = "VERSA_FORMAT")]
        format: OutputFormat,

        /// Disable pretty printing of JSON
        #[arg(long)]
        compact: bool,

        /// Show which layers were merged, on stderr
        #[arg(long)]
        show_merges: bool,
    },

    /// Assemble the complete context payload
    Context {
        /// Directory containing the .ai/ folder
        #[arg(env = "VERSA_DIR")]
        dir: Option<PathBuf>,

        /// Profile to merge over context.json
        #[arg(long, env = "VERSA_PROFILE")]
        profile: Option<String>,

        /// Agent to apply after the profile
        #[arg(long)]
        agent: Option<String>,

        /// Minimum rule priority (low, medium, high, critical)
        #[arg(long, alias = "priority")]
        min_priority: Option<Priority>,

        /// Keep only rules that apply to one of these tags
        #[arg(long = "tag", alias = "tags", value_delimiter = ',')]
        tags: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = PayloadFormat::Json)]
        format: PayloadFormat,
    },
}

/// Output formats for `print`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Output formats for `context`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}
