//! Command implementations for the Groundwork CLI.
//!
//! Each command resolves the plan, builds a reconciler over the real `gh`
//! transport, runs the requested stages, and prints a summary. Commands
//! return whether the run was clean; per-resource failures are tallied,
//! not raised.

use crate::gh::{Executor, GhCli};
use crate::models::ResourceKind;
use crate::plan;
use crate::reconcile::{Disposition, Reconciler, RunReport};
use crate::{ui, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Options shared by every command, resolved from CLI flags.
pub struct RunOptions {
    pub repo: Option<String>,
    pub plan: Option<PathBuf>,
    pub retries: u32,
    pub timeout_secs: u64,
    pub pace_ms: u64,
    pub json: bool,
    pub interrupt: Arc<AtomicBool>,
}

fn reconciler(opts: &RunOptions) -> Reconciler<GhCli> {
    let runner = GhCli::new(Duration::from_secs(opts.timeout_secs));
    let exec = Executor::new(runner, opts.retries);
    Reconciler::new(exec)
        .with_repo(opts.repo.clone())
        .with_pace(Duration::from_millis(opts.pace_ms))
        .with_interrupt(opts.interrupt.clone())
}

/// Apply the full plan. Returns true when nothing failed or was skipped.
pub fn apply(opts: &RunOptions, dry_run: bool) -> Result<bool> {
    let plan = plan::resolve(opts.plan.as_deref())?;

    if dry_run {
        print_dry_run(&plan);
        return Ok(true);
    }

    let report = reconciler(opts).apply(&plan)?;
    finish(opts, &report)
}

/// Ensure only the plan's labels exist.
pub fn labels(opts: &RunOptions) -> Result<bool> {
    let plan = plan::resolve(opts.plan.as_deref())?;
    plan.validate()?;

    let rec = reconciler(opts);
    let mut report = RunReport::default();
    ui::section("Creating Labels");
    rec.apply_labels(&plan, &mut report)?;
    finish(opts, &report)
}

/// Ensure only the plan's milestones exist.
pub fn milestones(opts: &RunOptions) -> Result<bool> {
    let plan = plan::resolve(opts.plan.as_deref())?;
    plan.validate()?;

    let rec = reconciler(opts);
    let mut report = RunReport::default();
    ui::section("Creating Milestones");
    rec.apply_milestones(&plan, &mut report)?;
    finish(opts, &report)
}

/// Print the resolved plan without touching the remote.
pub fn show_plan(opts: &RunOptions) -> Result<()> {
    let plan = plan::resolve(opts.plan.as_deref())?;
    plan.validate()?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    ui::section(&format!("Plan: {}", plan.project));
    println!(
        "{} labels, {} milestones, {} issues ({} epics)",
        plan.labels.len(),
        plan.milestones.len(),
        plan.issue_count(),
        plan.epics.len()
    );
    println!();
    for milestone in &plan.milestones {
        println!("{} {}", "Milestone:".bold(), milestone.title);
        for epic in plan.epics.iter().filter(|e| e.milestone == milestone.title) {
            println!("  {} {}", "Epic:".bold(), epic.title);
            for task in &epic.tasks {
                println!("    {}", task.title);
            }
        }
    }
    Ok(())
}

fn print_dry_run(plan: &crate::models::Plan) {
    ui::section(&format!("Dry run: {}", plan.project));
    for label in &plan.labels {
        ui::info(&format!("would ensure label: {}", label.name));
    }
    for milestone in &plan.milestones {
        ui::info(&format!("would ensure milestone: {}", milestone.title));
    }
    for epic in &plan.epics {
        ui::info(&format!(
            "would ensure epic: {} (milestone: {})",
            epic.title, epic.milestone
        ));
        for task in &epic.tasks {
            ui::info(&format!("  would ensure task: {}", task.title));
        }
    }
}

/// Print the summary (or JSON report) and convert the report into the
/// command's exit disposition.
fn finish(opts: &RunOptions, report: &RunReport) -> Result<bool> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_summary(report);
    }
    Ok(report.is_clean())
}

fn print_summary(report: &RunReport) {
    ui::section("Summary");

    for kind in [
        ResourceKind::Label,
        ResourceKind::Milestone,
        ResourceKind::Epic,
        ResourceKind::Task,
    ] {
        let total: usize = report.outcomes.iter().filter(|o| o.kind == kind).count();
        if total == 0 {
            continue;
        }
        println!(
            "{:<11} {} created, {} existing, {} failed, {} skipped",
            format!("{}s:", kind),
            report.count_kind(kind, Disposition::Created),
            report.count_kind(kind, Disposition::Existing),
            report.count_kind(kind, Disposition::Failed),
            report.count_kind(kind, Disposition::Skipped),
        );
    }

    let failures: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| matches!(o.disposition, Disposition::Failed | Disposition::Skipped))
        .collect();
    if !failures.is_empty() {
        println!();
        for outcome in failures {
            let reason = outcome.reason.as_deref().unwrap_or("unknown");
            ui::error(&format!(
                "{} '{}': {} ({})",
                outcome.kind,
                outcome.key,
                match outcome.disposition {
                    Disposition::Failed => "failed",
                    _ => "skipped",
                },
                reason
            ));
        }
    }

    if !report.milestones.is_empty() || !report.epics.is_empty() {
        println!();
        for (title, number) in &report.milestones {
            ui::info(&format!("milestone #{}: {}", number, title));
        }
        for (title, number) in &report.epics {
            ui::info(&format!("epic #{}: {}", number, title));
        }
    }

    println!();
    if report.is_clean() {
        ui::success("All resources reconciled");
    } else {
        ui::warning("Run completed with failures; re-run after fixing to converge");
    }
}
