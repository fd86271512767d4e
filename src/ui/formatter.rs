//! Formatting functions for terminal output.
//!
//! Colours come from `console`, which drops them when the stream is not a terminal.

use std::path::PathBuf;

use console::style;

use crate::tree::StagedFile;
use crate::warning::SetupWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a setup warning to stderr.
pub fn display_setup_warning(warning: &SetupWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a text report returned by a read-only operation as-is.
///
/// The reports carry their own glyphs, which hook scripts grep for.
pub fn display_report(report: &str) {
    println!("{}", report.trim_end());
}

/// List files written by an export.
pub fn display_exported(paths: &[PathBuf]) {
    if paths.is_empty() {
        display_status("Nothing to write");
        return;
    }
    for path in paths {
        display_success(&format!("Wrote {}", path.display()));
    }
}

/// List files that would be written, without writing them.
pub fn display_dry_run(staged: &[&StagedFile]) {
    println!("{}", style("Dry run - files that would be written:").bold());
    for file in staged {
        match file.mode {
            Some(mode) => println!("  {} (mode {:o})", style(&file.path).cyan(), mode),
            None => println!("  {}", style(&file.path).cyan()),
        }
    }
}
