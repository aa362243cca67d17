//! Idempotent reconciliation of a [`Plan`](crate::models::Plan) against a
//! GitHub repository.
//!
//! The reconciler converges remote state toward the plan by creating only
//! what is missing. Titles are the idempotency keys: labels are created
//! with `--force` (naturally idempotent), milestones resolve an
//! `already_exists` rejection back to the existing number, and issues are
//! looked up by exact title before any create is submitted. The whole
//! sequence is strictly additive and safe to re-run after a partial
//! failure.

use crate::gh::{Executor, GhRunner};
use crate::models::{EpicSpec, LabelSpec, MilestoneSpec, Plan, RemoteHandle, ResourceKind};
use crate::{ui, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What happened to one resource during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// One remote write was performed.
    Created,
    /// Found by lookup; zero writes performed.
    Existing,
    /// Creation failed after retries.
    Failed,
    /// Not submitted because a dependency's handle never resolved.
    Skipped,
}

/// One line of the run report.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceOutcome {
    pub kind: ResourceKind,
    pub key: String,
    pub disposition: Disposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregated result of a run: per-resource outcomes plus the
/// title→number maps dependents cross-link against.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<ResourceOutcome>,
    pub milestones: HashMap<String, u64>,
    pub epics: HashMap<String, u64>,
}

impl RunReport {
    pub fn count(&self, disposition: Disposition) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.disposition == disposition)
            .count()
    }

    pub fn count_kind(&self, kind: ResourceKind, disposition: Disposition) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.kind == kind && o.disposition == disposition)
            .count()
    }

    /// True when nothing failed and nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.count(Disposition::Failed) == 0 && self.count(Disposition::Skipped) == 0
    }

    /// [`RemoteHandle`] view of everything that resolved to a number.
    pub fn handles(&self) -> Vec<RemoteHandle> {
        self.outcomes
            .iter()
            .filter_map(|o| {
                o.number.map(|number| RemoteHandle {
                    kind: o.kind,
                    key: o.key.clone(),
                    number,
                })
            })
            .collect()
    }

    fn record(
        &mut self,
        kind: ResourceKind,
        key: &str,
        disposition: Disposition,
        number: Option<u64>,
        reason: Option<String>,
    ) {
        self.outcomes.push(ResourceOutcome {
            kind,
            key: key.to_string(),
            disposition,
            number,
            reason,
        });
    }
}

/// Issue fields as returned by `gh issue list --json number,title`.
#[derive(Debug, Deserialize)]
struct IssueRow {
    number: u64,
    title: String,
}

/// Milestone fields as returned by the milestones API.
#[derive(Debug, Deserialize)]
struct MilestoneRow {
    number: u64,
    title: String,
}

/// Reconciler over an injected transport.
pub struct Reconciler<R: GhRunner> {
    exec: Executor<R>,
    /// `OWNER/NAME` forwarded to gh; `None` targets the current repo.
    repo: Option<String>,
    /// Fixed pacing delay between remote writes (rate-limit avoidance).
    pace: Duration,
    interrupted: Arc<AtomicBool>,
}

impl<R: GhRunner> Reconciler<R> {
    pub fn new(exec: Executor<R>) -> Self {
        Self {
            exec,
            repo: None,
            pace: Duration::ZERO,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_repo(mut self, repo: Option<String>) -> Self {
        self.repo = repo;
        self
    }

    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Share an interrupt flag (flipped by the Ctrl-C handler). The batch
    /// stops promptly between operations; in-flight operations are not
    /// rolled back.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Borrow the transport (tests inspect recorded calls).
    pub fn executor(&self) -> &Executor<R> {
        &self.exec
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    fn pace(&self) {
        if !self.pace.is_zero() {
            std::thread::sleep(self.pace);
        }
    }

    /// Trailing `--repo OWNER/NAME` for issue/label subcommands.
    fn repo_flag(&self, args: &mut Vec<String>) {
        if let Some(repo) = &self.repo {
            args.push("--repo".to_string());
            args.push(repo.clone());
        }
    }

    /// REST path for the milestones API. Without an explicit repo, gh
    /// fills the `{owner}/{repo}` placeholders from the current repo.
    fn milestones_path(&self) -> String {
        match &self.repo {
            Some(repo) => format!("repos/{}/milestones", repo),
            None => "repos/{owner}/{repo}/milestones".to_string(),
        }
    }

    /// Ensure a label exists. `--force` overwrites color/description on
    /// rerun, so repeated creation is naturally idempotent.
    pub fn ensure_label(&self, label: &LabelSpec) -> Option<()> {
        let mut args = vec![
            "label".to_string(),
            "create".to_string(),
            label.name.clone(),
            "--color".to_string(),
            label.color.clone(),
            "--description".to_string(),
            label.description.clone(),
            "--force".to_string(),
        ];
        self.repo_flag(&mut args);
        self.exec.run(&args).map(|_| ())
    }

    /// Ensure a milestone exists and return its number.
    ///
    /// GitHub rejects duplicate milestone titles, so a failed create falls
    /// back to listing milestones and resolving the number by exact title.
    pub fn ensure_milestone(&self, milestone: &MilestoneSpec) -> Option<(u64, Disposition)> {
        let args = vec![
            "api".to_string(),
            self.milestones_path(),
            "-f".to_string(),
            format!("title={}", milestone.title),
            "-f".to_string(),
            format!("description={}", milestone.description),
            "-f".to_string(),
            format!("state={}", milestone.state),
        ];

        if let Some(out) = self.exec.run(&args) {
            if let Ok(row) = serde_json::from_str::<MilestoneRow>(&out) {
                return Some((row.number, Disposition::Created));
            }
            // Response was not the expected shape; fall through to lookup.
        }

        self.find_milestone_number(&milestone.title)
            .map(|number| (number, Disposition::Existing))
    }

    /// Look up an existing milestone by exact title across all states.
    fn find_milestone_number(&self, title: &str) -> Option<u64> {
        let args = vec![
            "api".to_string(),
            format!("{}?state=all", self.milestones_path()),
        ];
        let out = self.exec.run(&args)?;
        let rows: Vec<MilestoneRow> = serde_json::from_str(&out).ok()?;
        rows.into_iter()
            .find(|row| row.title.trim() == title.trim())
            .map(|row| row.number)
    }

    /// Find an existing issue by exact title, or `None`.
    ///
    /// The remote search is a substring pre-filter across all states;
    /// equality of trimmed titles is the authority. A malformed response
    /// is treated as "not found" rather than an error.
    pub fn find_issue_number(&self, title: &str) -> Option<u64> {
        let query = format!("\"{}\" in:title", title.replace('"', "\\\""));
        let mut args = vec![
            "issue".to_string(),
            "list".to_string(),
            "--search".to_string(),
            query,
            "--state".to_string(),
            "all".to_string(),
            "--json".to_string(),
            "number,title".to_string(),
            "--limit".to_string(),
            "100".to_string(),
        ];
        self.repo_flag(&mut args);

        let out = self.exec.run(&args)?;
        let rows: Vec<IssueRow> = serde_json::from_str(&out).ok()?;
        rows.into_iter()
            .find(|row| row.title.trim() == title.trim())
            .map(|row| row.number)
    }

    /// The idempotent upsert for one issue: lookup first, create on miss.
    ///
    /// Returns the issue number and whether a write happened. A found
    /// issue performs zero writes; existing resources are never mutated.
    pub fn ensure_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
        milestone_title: &str,
    ) -> Option<(u64, Disposition)> {
        if let Some(number) = self.find_issue_number(title) {
            return Some((number, Disposition::Existing));
        }

        let mut args = vec![
            "issue".to_string(),
            "create".to_string(),
            "--title".to_string(),
            title.to_string(),
            "--body".to_string(),
            body.to_string(),
            "--label".to_string(),
            labels.join(","),
            "--milestone".to_string(),
            milestone_title.to_string(),
        ];
        self.repo_flag(&mut args);

        let out = self.exec.run(&args)?;
        // gh prints the new issue URL; the trailing path segment is the number.
        let number = out.rsplit('/').next().and_then(|s| s.trim().parse().ok());
        match number {
            Some(number) => Some((number, Disposition::Created)),
            None => {
                ui::error(&format!("Unparseable create response for '{}': {}", title, out));
                None
            }
        }
    }

    /// Stage 1: labels.
    pub fn apply_labels(&self, plan: &Plan, report: &mut RunReport) -> Result<()> {
        for label in &plan.labels {
            self.check_interrupt()?;
            match self.ensure_label(label) {
                Some(()) => {
                    ui::success(&format!("Label: {}", label.name));
                    report.record(ResourceKind::Label, &label.name, Disposition::Created, None, None);
                }
                None => {
                    report.record(
                        ResourceKind::Label,
                        &label.name,
                        Disposition::Failed,
                        None,
                        Some("create failed after retries".to_string()),
                    );
                }
            }
            self.pace();
        }
        Ok(())
    }

    /// Stage 2: milestones. Populates the title→number map epics resolve
    /// against.
    pub fn apply_milestones(&self, plan: &Plan, report: &mut RunReport) -> Result<()> {
        for milestone in &plan.milestones {
            self.check_interrupt()?;
            match self.ensure_milestone(milestone) {
                Some((number, disposition)) => {
                    match disposition {
                        Disposition::Created => {
                            ui::success(&format!("Milestone: {} (#{})", milestone.title, number))
                        }
                        _ => ui::info(&format!(
                            "Milestone exists: {} (#{})",
                            milestone.title, number
                        )),
                    }
                    report.milestones.insert(milestone.title.clone(), number);
                    report.record(
                        ResourceKind::Milestone,
                        &milestone.title,
                        disposition,
                        Some(number),
                        None,
                    );
                }
                None => {
                    report.record(
                        ResourceKind::Milestone,
                        &milestone.title,
                        Disposition::Failed,
                        None,
                        Some("create failed after retries".to_string()),
                    );
                }
            }
            self.pace();
        }
        Ok(())
    }

    /// Stage 3: epics, then each epic's tasks.
    ///
    /// Dependency order is a strict prerequisite: an epic whose milestone
    /// handle never resolved is skipped (never created with a blank
    /// reference), and a skipped or failed epic skips all of its tasks.
    pub fn apply_issues(&self, plan: &Plan, report: &mut RunReport) -> Result<()> {
        for epic in &plan.epics {
            self.check_interrupt()?;

            if !report.milestones.contains_key(&epic.milestone) {
                ui::warning(&format!(
                    "Skipping epic '{}': milestone '{}' was not created",
                    epic.title, epic.milestone
                ));
                let reason = format!("milestone '{}' unresolved", epic.milestone);
                report.record(
                    ResourceKind::Epic,
                    &epic.title,
                    Disposition::Skipped,
                    None,
                    Some(reason.clone()),
                );
                self.skip_tasks(epic, &reason, report);
                continue;
            }

            match self.ensure_issue(&epic.title, &epic.body(), &epic.labels, &epic.milestone) {
                Some((number, disposition)) => {
                    match disposition {
                        Disposition::Created => {
                            ui::success(&format!("Epic: {} (#{})", epic.title, number))
                        }
                        _ => ui::info(&format!("Epic exists: {} (#{})", epic.title, number)),
                    }
                    report.epics.insert(epic.title.clone(), number);
                    report.record(
                        ResourceKind::Epic,
                        &epic.title,
                        disposition,
                        Some(number),
                        None,
                    );
                    self.pace();
                    self.apply_tasks(plan, epic, number, report)?;
                }
                None => {
                    let reason = "create failed after retries".to_string();
                    report.record(
                        ResourceKind::Epic,
                        &epic.title,
                        Disposition::Failed,
                        None,
                        Some(reason),
                    );
                    self.skip_tasks(epic, "epic unresolved", report);
                    self.pace();
                }
            }
        }
        Ok(())
    }

    fn apply_tasks(
        &self,
        plan: &Plan,
        epic: &EpicSpec,
        epic_number: u64,
        report: &mut RunReport,
    ) -> Result<()> {
        for task in &epic.tasks {
            self.check_interrupt()?;
            let body = task.body(epic_number, &epic.title, &plan.slug);
            match self.ensure_issue(&task.title, &body, &task.labels, &epic.milestone) {
                Some((number, disposition)) => {
                    match disposition {
                        Disposition::Created => {
                            ui::success(&format!("  Task: {} (#{})", task.title, number))
                        }
                        _ => ui::info(&format!("  Task exists: {} (#{})", task.title, number)),
                    }
                    report.record(
                        ResourceKind::Task,
                        &task.title,
                        disposition,
                        Some(number),
                        None,
                    );
                }
                None => {
                    report.record(
                        ResourceKind::Task,
                        &task.title,
                        Disposition::Failed,
                        None,
                        Some("create failed after retries".to_string()),
                    );
                }
            }
            self.pace();
        }
        Ok(())
    }

    fn skip_tasks(&self, epic: &EpicSpec, reason: &str, report: &mut RunReport) {
        for task in &epic.tasks {
            report.record(
                ResourceKind::Task,
                &task.title,
                Disposition::Skipped,
                None,
                Some(reason.to_string()),
            );
        }
    }

    /// Run the full batch in dependency order and assemble the report.
    pub fn apply(&self, plan: &Plan) -> Result<RunReport> {
        plan.validate()?;
        let mut report = RunReport::default();

        ui::section("Step 1: Creating Labels");
        self.apply_labels(plan, &mut report)?;

        ui::section("Step 2: Creating Milestones");
        self.apply_milestones(plan, &mut report)?;

        ui::section("Step 3: Creating Epics and Tasks");
        self.apply_issues(plan, &mut report)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gh::testing::FakeRunner;
    use crate::gh::{Executor, RunOutcome};
    use crate::models::{LabelSpec, MilestoneSpec, TaskSpec};

    fn ok(s: &str) -> RunOutcome {
        RunOutcome::Output(s.to_string())
    }

    fn failed() -> RunOutcome {
        RunOutcome::Failed("boom".to_string())
    }

    fn reconciler(outcomes: Vec<RunOutcome>) -> Reconciler<FakeRunner> {
        let exec = Executor::new(FakeRunner::new(outcomes), 3)
            .with_backoff(Duration::ZERO);
        Reconciler::new(exec)
    }

    fn sample_plan() -> Plan {
        Plan {
            project: "Test Project".to_string(),
            slug: "test".to_string(),
            labels: vec![LabelSpec::new("epic", "7057ff", "Epic issue")],
            milestones: vec![MilestoneSpec {
                title: "Phase 1".to_string(),
                description: "First phase".to_string(),
                state: "open".to_string(),
            }],
            epics: vec![EpicSpec {
                title: "Epic 1".to_string(),
                overview: "Overview".to_string(),
                as_a: "user".to_string(),
                i_want: "things".to_string(),
                so_that: "they work".to_string(),
                acceptance_criteria: "- [ ] done".to_string(),
                success_metrics: "shipped".to_string(),
                dependencies: String::new(),
                milestone: "Phase 1".to_string(),
                labels: vec!["epic".to_string()],
                tasks: vec![TaskSpec {
                    title: "Epic1-Task1".to_string(),
                    background: "bg".to_string(),
                    acceptance_criteria: "- [ ] done".to_string(),
                    files: String::new(),
                    steps: String::new(),
                    estimated_time: "1 hour".to_string(),
                    code: String::new(),
                    testing: String::new(),
                    priority: "P0".to_string(),
                    size: "size-small".to_string(),
                    blocked_by: None,
                    blocks: None,
                    branch: "feat/t1".to_string(),
                    commit: "feat: t1".to_string(),
                    labels: vec!["feature".to_string()],
                }],
            }],
        }
    }

    #[test]
    fn test_find_issue_exact_match_only() {
        // Remote issues "Foo" and "Foo Bar": lookup for "Foo" must return
        // only the exact match.
        let rec = reconciler(vec![ok(
            r#"[{"number": 2, "title": "Foo Bar"}, {"number": 1, "title": "Foo"}]"#,
        )]);
        assert_eq!(rec.find_issue_number("Foo"), Some(1));
    }

    #[test]
    fn test_find_issue_trims_titles() {
        let rec = reconciler(vec![ok(r#"[{"number": 5, "title": "  Foo  "}]"#)]);
        assert_eq!(rec.find_issue_number("Foo"), Some(5));
    }

    #[test]
    fn test_find_issue_no_match() {
        let rec = reconciler(vec![ok(r#"[{"number": 2, "title": "Foo Bar"}]"#)]);
        assert_eq!(rec.find_issue_number("Foo"), None);
    }

    #[test]
    fn test_find_issue_malformed_json_is_not_found() {
        let rec = reconciler(vec![ok("this is not json")]);
        assert_eq!(rec.find_issue_number("Foo"), None);
    }

    #[test]
    fn test_find_issue_escapes_quotes_in_query() {
        let rec = reconciler(vec![ok("[]")]);
        assert_eq!(rec.find_issue_number(r#"Add "neon" colors"#), None);
        let calls = rec.executor().runner().calls();
        let search = &calls[0][3];
        assert_eq!(search, "\"Add \\\"neon\\\" colors\" in:title");
    }

    #[test]
    fn test_ensure_issue_skips_create_when_found() {
        let rec = reconciler(vec![ok(r#"[{"number": 9, "title": "Epic 1"}]"#)]);
        let result = rec.ensure_issue("Epic 1", "body", &["epic".to_string()], "Phase 1");
        assert_eq!(result, Some((9, Disposition::Existing)));
        // Exactly one remote call: the lookup, zero writes.
        assert_eq!(rec.executor().runner().call_count(), 1);
    }

    #[test]
    fn test_ensure_issue_creates_on_miss_and_parses_url() {
        let rec = reconciler(vec![
            ok("[]"),
            ok("https://github.com/owner/repo/issues/42"),
        ]);
        let result = rec.ensure_issue("Epic 1", "body", &["epic".to_string()], "Phase 1");
        assert_eq!(result, Some((42, Disposition::Created)));

        let calls = rec.executor().runner().calls();
        assert_eq!(calls[1][0], "issue");
        assert_eq!(calls[1][1], "create");
        // Labels are comma-joined into a single argument.
        let label_idx = calls[1].iter().position(|a| a == "--label").unwrap();
        assert_eq!(calls[1][label_idx + 1], "epic");
    }

    #[test]
    fn test_ensure_issue_unparseable_url_is_failure() {
        let rec = reconciler(vec![ok("[]"), ok("created, but no url here")]);
        let result = rec.ensure_issue("Epic 1", "body", &[], "Phase 1");
        assert_eq!(result, None);
    }

    #[test]
    fn test_ensure_milestone_parses_number() {
        let rec = reconciler(vec![ok(r#"{"number": 3, "title": "Phase 1"}"#)]);
        let milestone = MilestoneSpec {
            title: "Phase 1".to_string(),
            description: String::new(),
            state: "open".to_string(),
        };
        assert_eq!(rec.ensure_milestone(&milestone), Some((3, Disposition::Created)));
    }

    #[test]
    fn test_ensure_milestone_resolves_existing_on_reject() {
        // Create fails three times (422 already_exists), then the listing
        // resolves the number by exact title.
        let rec = reconciler(vec![
            failed(),
            failed(),
            failed(),
            ok(r#"[{"number": 7, "title": "Phase 1"}, {"number": 8, "title": "Phase 2"}]"#),
        ]);
        let milestone = MilestoneSpec {
            title: "Phase 1".to_string(),
            description: String::new(),
            state: "open".to_string(),
        };
        assert_eq!(rec.ensure_milestone(&milestone), Some((7, Disposition::Existing)));
    }

    #[test]
    fn test_apply_first_run_order_and_report() {
        // Label create, milestone create, epic lookup+create, task
        // lookup+create.
        let rec = reconciler(vec![
            ok(""),                                            // label create
            ok(r#"{"number": 1, "title": "Phase 1"}"#),        // milestone create
            ok("[]"),                                          // epic lookup: miss
            ok("https://github.com/o/r/issues/10"),            // epic create
            ok("[]"),                                          // task lookup: miss
            ok("https://github.com/o/r/issues/11"),            // task create
        ]);
        let report = rec.apply(&sample_plan()).unwrap();

        assert_eq!(report.count(Disposition::Created), 4);
        assert_eq!(report.count(Disposition::Failed), 0);
        assert_eq!(report.milestones.get("Phase 1"), Some(&1));
        assert_eq!(report.epics.get("Epic 1"), Some(&10));

        // Dependency order: label, milestone, then issues.
        let calls = rec.executor().runner().calls();
        assert_eq!(calls[0][0], "label");
        assert_eq!(calls[1][0], "api");
        assert_eq!(calls[2][..2], ["issue".to_string(), "list".to_string()]);
        assert_eq!(calls[3][..2], ["issue".to_string(), "create".to_string()]);

        // The task body embeds the resolved epic number.
        let task_create = &calls[5];
        let body_idx = task_create.iter().position(|a| a == "--body").unwrap();
        assert!(task_create[body_idx + 1].contains("Closes #10"));
    }

    #[test]
    fn test_apply_rerun_is_idempotent() {
        // Everything pre-exists: label --force succeeds, milestone create
        // rejects then resolves from the listing, both issue lookups hit.
        let rec = reconciler(vec![
            ok(""),                                         // label create (force)
            failed(),
            failed(),
            failed(),                                       // milestone create rejected
            ok(r#"[{"number": 1, "title": "Phase 1"}]"#),   // milestone listing
            ok(r#"[{"number": 10, "title": "Epic 1"}]"#),   // epic lookup: hit
            ok(r#"[{"number": 11, "title": "Epic1-Task1"}]"#), // task lookup: hit
        ]);
        let report = rec.apply(&sample_plan()).unwrap();

        // Zero issue creates on rerun.
        let calls = rec.executor().runner().calls();
        assert!(!calls
            .iter()
            .any(|c| c.first().map(String::as_str) == Some("issue") && c[1] == "create"));

        assert_eq!(report.count_kind(ResourceKind::Epic, Disposition::Existing), 1);
        assert_eq!(report.count_kind(ResourceKind::Task, Disposition::Existing), 1);
        assert_eq!(report.epics.get("Epic 1"), Some(&10));
    }

    #[test]
    fn test_failed_milestone_skips_dependents() {
        // Milestone create fails and the listing is empty, so the epic and
        // its task must be skipped, never created with a blank reference.
        let rec = reconciler(vec![
            ok(""),     // label
            failed(),
            failed(),
            failed(),   // milestone create
            ok("[]"),   // milestone listing: no match
        ]);
        let report = rec.apply(&sample_plan()).unwrap();

        assert_eq!(report.count_kind(ResourceKind::Milestone, Disposition::Failed), 1);
        assert_eq!(report.count_kind(ResourceKind::Epic, Disposition::Skipped), 1);
        assert_eq!(report.count_kind(ResourceKind::Task, Disposition::Skipped), 1);
        assert!(!report.is_clean());

        // No issue operation of any kind was submitted.
        let calls = rec.executor().runner().calls();
        assert!(!calls.iter().any(|c| c.first().map(String::as_str) == Some("issue")));
    }

    #[test]
    fn test_failed_epic_skips_its_tasks() {
        let rec = reconciler(vec![
            ok(""),                                     // label
            ok(r#"{"number": 1, "title": "Phase 1"}"#), // milestone
            ok("[]"),                                   // epic lookup: miss
            failed(),
            failed(),
            failed(),                                   // epic create exhausted
        ]);
        let report = rec.apply(&sample_plan()).unwrap();

        assert_eq!(report.count_kind(ResourceKind::Epic, Disposition::Failed), 1);
        assert_eq!(report.count_kind(ResourceKind::Task, Disposition::Skipped), 1);
        assert!(report.epics.is_empty());
    }

    #[test]
    fn test_interrupt_stops_batch() {
        let flag = Arc::new(AtomicBool::new(true));
        let exec = Executor::new(FakeRunner::new(vec![]), 3).with_backoff(Duration::ZERO);
        let rec = Reconciler::new(exec).with_interrupt(flag);
        match rec.apply(&sample_plan()) {
            Err(Error::Interrupted) => {}
            other => panic!("expected Interrupted, got {:?}", other.map(|_| ())),
        }
        assert_eq!(rec.executor().runner().call_count(), 0);
    }

    #[test]
    fn test_repo_flag_forwarded() {
        let exec = Executor::new(FakeRunner::new(vec![ok("[]")]), 3)
            .with_backoff(Duration::ZERO);
        let rec = Reconciler::new(exec).with_repo(Some("octo/site".to_string()));
        rec.find_issue_number("Foo");
        let calls = rec.executor().runner().calls();
        let repo_idx = calls[0].iter().position(|a| a == "--repo").unwrap();
        assert_eq!(calls[0][repo_idx + 1], "octo/site");
    }

    #[test]
    fn test_handles_view() {
        let mut report = RunReport::default();
        report.record(ResourceKind::Epic, "Epic 1", Disposition::Created, Some(10), None);
        report.record(ResourceKind::Task, "T1", Disposition::Failed, None, None);
        let handles = report.handles();
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].number, 10);
        assert_eq!(handles[0].key, "Epic 1");
    }
}
