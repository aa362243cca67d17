//! CLI argument definitions for Groundwork.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Groundwork - seed GitHub repositories with project scaffolding.
///
/// Runs `gh` under the hood; authenticate with `gh auth login` first.
/// With no subcommand, applies the full plan.
#[derive(Parser, Debug)]
#[command(name = "gw")]
#[command(author, version, about = "Seed GitHub repositories with labels, milestones, epics, and tasks", long_about = None)]
pub struct Cli {
    /// Target repository as OWNER/NAME. Defaults to the repo of the
    /// current directory. Can also be set via GW_REPO.
    #[arg(short = 'R', long = "repo", global = true, env = "GW_REPO")]
    pub repo: Option<String>,

    /// Plan file (TOML). Defaults to the builtin UI-redesign plan.
    /// Can also be set via GW_PLAN.
    #[arg(long = "plan", global = true, env = "GW_PLAN")]
    pub plan: Option<PathBuf>,

    /// Attempts per remote operation before giving up
    #[arg(long, global = true, default_value_t = 3, env = "GW_RETRIES")]
    pub retries: u32,

    /// Hard timeout per gh invocation, in seconds
    #[arg(long = "timeout-secs", global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Pacing delay between remote writes, in milliseconds
    #[arg(long = "pace-ms", global = true, default_value_t = 1000, env = "GW_PACE_MS")]
    pub pace_ms: u64,

    /// Emit the run report as JSON instead of a human summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the full plan: labels, milestones, epics, then tasks
    Apply {
        /// Print the operations without invoking gh
        #[arg(long)]
        dry_run: bool,
    },

    /// Ensure only the plan's labels exist
    Labels,

    /// Ensure only the plan's milestones exist
    Milestones,

    /// Print the resolved plan
    Plan,
}
