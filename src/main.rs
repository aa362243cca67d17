//! Groundwork CLI - seed GitHub repositories with project scaffolding.

use clap::Parser;
use groundwork::cli::{Cli, Commands};
use groundwork::commands::{self, RunOptions};
use groundwork::Error;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status for a user interrupt, distinct from ordinary failure.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();

    // Ctrl-C flips a flag the reconciler polls between operations; the
    // batch stops promptly without rolling back in-flight creations.
    let interrupt = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupt.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        }) {
            eprintln!("Warning: failed to install interrupt handler: {}", e);
        }
    }

    let opts = RunOptions {
        repo: cli.repo,
        plan: cli.plan,
        retries: cli.retries,
        timeout_secs: cli.timeout_secs,
        pace_ms: cli.pace_ms,
        json: cli.json,
        interrupt,
    };

    // No subcommand runs the full batch.
    let result = match cli.command {
        Some(Commands::Apply { dry_run }) => commands::apply(&opts, dry_run),
        Some(Commands::Labels) => commands::labels(&opts),
        Some(Commands::Milestones) => commands::milestones(&opts),
        Some(Commands::Plan) => commands::show_plan(&opts).map(|()| true),
        None => commands::apply(&opts, false),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(Error::Interrupted) => {
            eprintln!("Interrupted");
            process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
