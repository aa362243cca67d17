//! Console output helpers.
//!
//! Provides consistent formatting for progress lines while a plan is
//! being applied: section headers per stage and ✓/→/✗ status markers.

use colored::Colorize;

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", "═".repeat(70).bright_black());
    println!("{}", title.cyan().bold());
    println!("{}", "═".repeat(70).bright_black());
    println!();
}

/// Print a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an informational message (skips, existing resources).
pub fn info(message: &str) {
    println!("{} {}", "→".cyan(), message);
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print a warning message.
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}
