//! Lint command implementation
//!
//! Validates a `.ai/` root and reports every issue found.

use std::path::Path;

use colored::Colorize;
use versa_core::{IssueLevel, ValidationReport, validate_root};

use crate::error::{CliError, Result};
use crate::format;

/// Run the lint command
///
/// A missing root is reported like any other issue. Fails when the report
/// has errors so the process exits non-zero.
pub fn run_lint(root: &Path, json: bool) -> Result<()> {
    let report = validate_root(root);

    if json {
        println!("{}", format::json(&report, true)?);
    } else {
        print_report(root, &report);
    }

    if report.valid {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Validation failed with {} error(s)",
            report.errors().count()
        )))
    }
}

fn print_report(root: &Path, report: &ValidationReport) {
    println!(
        "{} Validating {}...",
        "=>".blue().bold(),
        root.display().to_string().cyan()
    );

    for issue in &report.issues {
        let marker = match issue.level {
            IssueLevel::Error => "x".red().bold(),
            IssueLevel::Warning => "!".yellow().bold(),
        };
        println!("   {} {}: {}", marker, issue.file, issue.message);
    }

    let warnings = report.warnings().count();
    if report.valid {
        if warnings > 0 {
            println!(
                "{} Configuration is valid ({} warning(s))",
                "OK".green().bold(),
                warnings
            );
        } else {
            println!("{} Configuration is valid", "OK".green().bold());
        }
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            "FAIL".red().bold(),
            report.errors().count(),
            warnings
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use versa_test_utils::TestRoot;

    #[test]
    fn test_valid_root() {
        let root = TestRoot::new().context(json!({"version": "1.0"}));
        assert!(run_lint(&root.ai(), false).is_ok());
    }

    #[test]
    fn test_invalid_root_fails() {
        let root = TestRoot::new().context(json!({"version": "1.0", "rules": ["rules/x.md"]}));

        let err = run_lint(&root.ai(), true).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed with 1 error(s)");
    }

    #[test]
    fn test_missing_root_fails() {
        let root = TestRoot::bare();
        assert!(run_lint(&root.ai(), false).is_err());
    }
}
