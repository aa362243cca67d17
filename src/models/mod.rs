//! Domain types for plans and remote resources.
//!
//! A [`Plan`] is the declarative desired state: labels, milestones, and
//! epics with their tasks. The reconciler converges the remote repository
//! toward the plan, producing a [`RemoteHandle`] for each resource it
//! creates or finds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a remote resource, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Label,
    Milestone,
    Epic,
    Task,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Label => write!(f, "label"),
            ResourceKind::Milestone => write!(f, "milestone"),
            ResourceKind::Epic => write!(f, "epic"),
            ResourceKind::Task => write!(f, "task"),
        }
    }
}

/// A label to ensure exists. The name is the idempotency key; creation
/// uses `--force` so reruns are naturally idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSpec {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

impl LabelSpec {
    pub fn new(name: &str, color: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        }
    }
}

/// A milestone to ensure exists. The title is the idempotency key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneSpec {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_milestone_state")]
    pub state: String,
}

fn default_milestone_state() -> String {
    "open".to_string()
}

/// An epic issue plus the task issues that belong to it.
///
/// The epic's title is its idempotency key. Tasks reference the epic by
/// containment; their bodies embed `Closes #<epic>` once the epic's
/// number is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicSpec {
    pub title: String,
    pub overview: String,
    pub as_a: String,
    pub i_want: String,
    pub so_that: String,
    pub acceptance_criteria: String,
    #[serde(default)]
    pub success_metrics: String,
    #[serde(default)]
    pub dependencies: String,
    /// Title of the milestone this epic belongs to.
    pub milestone: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

/// A task issue under an epic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub title: String,
    pub background: String,
    pub acceptance_criteria: String,
    #[serde(default)]
    pub files: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub testing: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub blocked_by: Option<String>,
    #[serde(default)]
    pub blocks: Option<String>,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// The full desired state for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Project name, used in headers and worktree snippets.
    pub project: String,
    /// Short slug used for worktree directory names in task bodies.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub labels: Vec<LabelSpec>,
    #[serde(default)]
    pub milestones: Vec<MilestoneSpec>,
    #[serde(default)]
    pub epics: Vec<EpicSpec>,
}

impl Plan {
    /// Validate internal consistency: unique keys per kind and resolvable
    /// milestone references. Dependency order relies on these holding.
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen = std::collections::HashSet::new();
        for label in &self.labels {
            if !seen.insert(format!("label:{}", label.name)) {
                return Err(crate::Error::InvalidPlan(format!(
                    "duplicate label name: {}",
                    label.name
                )));
            }
        }
        for milestone in &self.milestones {
            if !seen.insert(format!("milestone:{}", milestone.title)) {
                return Err(crate::Error::InvalidPlan(format!(
                    "duplicate milestone title: {}",
                    milestone.title
                )));
            }
        }
        for epic in &self.epics {
            if !seen.insert(format!("issue:{}", epic.title)) {
                return Err(crate::Error::InvalidPlan(format!(
                    "duplicate issue title: {}",
                    epic.title
                )));
            }
            if !self.milestones.iter().any(|m| m.title == epic.milestone) {
                return Err(crate::Error::InvalidPlan(format!(
                    "epic '{}' references unknown milestone '{}'",
                    epic.title, epic.milestone
                )));
            }
            for task in &epic.tasks {
                if !seen.insert(format!("issue:{}", task.title)) {
                    return Err(crate::Error::InvalidPlan(format!(
                        "duplicate issue title: {}",
                        task.title
                    )));
                }
            }
        }
        Ok(())
    }

    /// Total number of issues (epics + tasks) in the plan.
    pub fn issue_count(&self) -> usize {
        self.epics.len() + self.epics.iter().map(|e| e.tasks.len()).sum::<usize>()
    }
}

/// The remote identifier for a resource that was created or found.
///
/// Handles live only for the duration of a run; the remote system is the
/// durable store and a rerun rediscovers them by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteHandle {
    pub kind: ResourceKind,
    pub key: String,
    pub number: u64,
}

impl EpicSpec {
    /// Render the epic issue body from its fields.
    ///
    /// Building the markdown from discrete fields (rather than splicing
    /// caller-supplied strings into a shell command) keeps titles and
    /// bodies from ever being interpreted by argument parsing.
    pub fn body(&self) -> String {
        let mut tasks_list = String::new();
        for (i, task) in self.tasks.iter().enumerate() {
            let time = if task.estimated_time.is_empty() {
                String::new()
            } else {
                format!(" ({})", task.estimated_time)
            };
            tasks_list.push_str(&format!("{}. {}{}\n", i + 1, short_title(&task.title), time));
        }

        let dependencies = if self.dependencies.is_empty() {
            "None"
        } else {
            &self.dependencies
        };

        format!(
            "## Epic Overview\n\n{overview}\n\n\
             ## User Story\n\n\
             **As a** {as_a}\n\
             **I want** {i_want}\n\
             **So that** {so_that}\n\n\
             ## Acceptance Criteria\n\n{criteria}\n\n\
             ## Tasks Breakdown\n\n\
             This epic contains {count} tasks:\n\n{tasks}\n\
             ## Success Metrics\n\n{metrics}\n\n\
             ## Dependencies\n\n{dependencies}\n\n\
             ---\n\
             *This is an Epic issue. Individual tasks will be created as separate issues and linked to this epic.*",
            overview = self.overview,
            as_a = self.as_a,
            i_want = self.i_want,
            so_that = self.so_that,
            criteria = self.acceptance_criteria,
            count = self.tasks.len(),
            tasks = tasks_list,
            metrics = self.success_metrics,
            dependencies = dependencies,
        )
    }
}

impl TaskSpec {
    /// Render the task issue body. Requires the owning epic's resolved
    /// number and title so the body can cross-link it.
    pub fn body(&self, epic_number: u64, epic_title: &str, slug: &str) -> String {
        let blocked_by = self.blocked_by.as_deref().unwrap_or("None");
        let blocks = self.blocks.as_deref().unwrap_or("None");
        let code = if self.code.is_empty() {
            "// Implementation details"
        } else {
            &self.code
        };

        format!(
            "## Background\n\n{background}\n\n\
             ## Acceptance Criteria\n\n{criteria}\n\n\
             ## Implementation Plan\n\n\
             **Files to Modify:**\n{files}\n\n\
             **Implementation Steps:**\n{steps}\n\n\
             **Estimated Time:** {time}\n\n\
             ## Core Logic\n\n```\n{code}\n```\n\n\
             ## Testing Requirements\n\n{testing}\n\n\
             ## Dependencies\n\n\
             - **Priority:** {priority}\n\
             - **Size:** {size}\n\
             - **Blocked by:** {blocked_by}\n\
             - **Blocks:** {blocks}\n\n\
             ## Git Worktree\n\n```bash\n\
             # Create worktree for this task\n\
             git worktree add ../{slug}-{branch} -b {branch}\n\
             cd ../{slug}-{branch}\n\n\
             # After completion\n\
             git add .\n\
             git commit -m \"{commit}\"\n\
             git push -u origin {branch}\n\n\
             # Create PR\n\
             gh pr create --title \"{title}\" --body \"Closes #{epic_number}\"\n\
             ```\n\n\
             ## Related\n\n\
             - Epic: #{epic_number} {epic_title}",
            background = self.background,
            criteria = self.acceptance_criteria,
            files = self.files,
            steps = self.steps,
            time = self.estimated_time,
            code = code,
            testing = self.testing,
            priority = self.priority,
            size = self.size,
            blocked_by = blocked_by,
            blocks = blocks,
            slug = slug,
            branch = self.branch,
            commit = self.commit,
            title = self.title,
            epic_number = epic_number,
            epic_title = epic_title,
        )
    }
}

/// Strip a `[Epic N-Task M]` style prefix for use in breakdown lists.
fn short_title(title: &str) -> &str {
    match title.find("] ") {
        Some(idx) if title.starts_with('[') => &title[idx + 2..],
        _ => title,
    }
}
