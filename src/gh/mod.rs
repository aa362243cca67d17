//! The `gh` CLI transport.
//!
//! Every remote operation is one invocation of the `gh` binary with a
//! discrete argument vector. [`GhRunner`] is the seam between the
//! reconciler and the outside world; tests inject a recording fake.
//! [`Executor`] wraps a runner with bounded retries and fixed backoff.

use crate::ui;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default number of attempts per operation.
pub const DEFAULT_RETRIES: u32 = 3;
/// Default hard wall-clock timeout per invocation, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Fixed backoff between retry attempts.
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Outcome of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited zero. Carries trimmed stdout.
    Output(String),
    /// Exited non-zero. Carries stderr detail.
    Failed(String),
    /// Exceeded the hard timeout and was killed.
    TimedOut,
}

/// Transport seam for remote operations.
pub trait GhRunner {
    fn run(&self, args: &[String]) -> RunOutcome;
}

/// Real runner that shells out to `gh`.
///
/// Interactive prompts and update notices are disabled via environment
/// flags so the subprocess never blocks on a TTY.
pub struct GhCli {
    timeout: Duration,
}

impl GhCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl GhRunner for GhCli {
    fn run(&self, args: &[String]) -> RunOutcome {
        let mut child = match Command::new("gh")
            .args(args)
            .env("GH_PROMPT_DISABLED", "1")
            .env("GH_NO_UPDATE_NOTIFIER", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return RunOutcome::Failed(format!("failed to spawn gh: {}", e)),
        };

        // Drain both pipes on threads so the child can't block on a full
        // pipe buffer while we wait on it.
        let mut stdout_pipe = child.stdout.take().expect("stdout was piped");
        let mut stderr_pipe = child.stderr.take().expect("stderr was piped");
        let stdout_thread = thread::spawn(move || {
            let mut buf = String::new();
            let _ = stdout_pipe.read_to_string(&mut buf);
            buf
        });
        let stderr_thread = thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr_pipe.read_to_string(&mut buf);
            buf
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return RunOutcome::TimedOut;
            }
            Err(e) => return RunOutcome::Failed(format!("failed to wait for gh: {}", e)),
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();

        if status.success() {
            RunOutcome::Output(stdout.trim().to_string())
        } else {
            RunOutcome::Failed(stderr.trim().to_string())
        }
    }
}

/// Retry wrapper around a [`GhRunner`].
///
/// Masks a bounded number of transient failures. A timeout is assumed
/// non-transient within the run and fails immediately without consuming
/// retries. This is the only place failure handling exists; callers treat
/// `None` as "skip and report, do not crash the run."
pub struct Executor<R: GhRunner> {
    runner: R,
    retries: u32,
    backoff: Duration,
}

impl<R: GhRunner> Executor<R> {
    pub fn new(runner: R, retries: u32) -> Self {
        Self {
            runner,
            retries: retries.max(1),
            backoff: RETRY_BACKOFF,
        }
    }

    /// Override the retry backoff (tests use zero).
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Run one operation, retrying transient failures.
    ///
    /// Returns the trimmed stdout on success, or `None` once retries are
    /// exhausted or the operation timed out. Failures are logged with the
    /// original error detail.
    pub fn run(&self, args: &[String]) -> Option<String> {
        for attempt in 1..=self.retries {
            match self.runner.run(args) {
                RunOutcome::Output(out) => return Some(out),
                RunOutcome::TimedOut => {
                    ui::error(&format!("Command timed out: gh {}", args.join(" ")));
                    return None;
                }
                RunOutcome::Failed(detail) => {
                    if attempt < self.retries {
                        thread::sleep(self.backoff);
                        continue;
                    }
                    ui::error(&format!("Command failed: gh {}", args.join(" ")));
                    ui::error(&format!("Error: {}", detail));
                }
            }
        }
        None
    }

    /// Borrow the underlying runner (tests inspect recorded calls).
    pub fn runner(&self) -> &R {
        &self.runner
    }
}

/// Build an owned argument vector from string slices.
pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
