//! Common test utilities for groundwork integration tests.
//!
//! Provides `TestEnv`, which places a stub `gh` executable on PATH and
//! gives it a private state directory plus a call log, so tests can drive
//! the real binary without a network or a GitHub account.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
pub use tempfile::TempDir;

/// Stub `gh` used by integration tests.
///
/// It records every invocation (one line per call) to `$GH_STUB_LOG` and
/// keeps created milestones/issues in `$GH_STUB_STATE` so reruns see
/// them. A `fail_next` countdown file injects transient failures.
const GH_STUB: &str = r##"#!/usr/bin/env bash
set -u
state="$GH_STUB_STATE"
# One line per call; newlines inside arguments (issue bodies) are folded.
args="$*"
printf '%s\n' "${args//$'\n'/ }" >> "$GH_STUB_LOG"

# Injected transient failures: fail_next holds a countdown.
if [ -f "$state/fail_next" ]; then
  n=$(cat "$state/fail_next")
  if [ "$n" -gt 0 ]; then
    echo $((n - 1)) > "$state/fail_next"
    echo "stub: injected failure" >&2
    exit 1
  fi
fi

cmd="${1-}"; sub="${2-}"

next_number() {
  n=$(( $(cat "$state/counter" 2>/dev/null || echo 0) + 1 ))
  echo "$n" > "$state/counter"
  echo "$n"
}

# Emit rows of a "number<TAB>title" file as a JSON array. An optional
# second argument pre-filters on substring, like the remote search does.
emit_rows() {
  file="$1"; filter="${2-}"
  out="["
  first=1
  if [ -f "$file" ]; then
    while IFS=$'\t' read -r num title; do
      if [ -n "$filter" ]; then
        case "$title" in *"$filter"*) ;; *) continue ;; esac
      fi
      [ "$first" -eq 1 ] || out="$out, "
      out="$out{\"number\": $num, \"title\": \"$title\"}"
      first=0
    done < "$file"
  fi
  printf '%s]\n' "$out"
}

case "$cmd" in
  label)
    exit 0
    ;;
  api)
    case "$sub" in
      *"?state=all"*)
        emit_rows "$state/milestones.tsv"
        exit 0
        ;;
      repos/*)
        title=""
        for a in "$@"; do
          case "$a" in title=*) title="${a#title=}" ;; esac
        done
        if [ -f "$state/milestones.tsv" ] && cut -f2 "$state/milestones.tsv" | grep -Fxq "$title"; then
          echo '{"message": "Validation Failed", "errors": [{"code": "already_exists"}]}' >&2
          exit 1
        fi
        num=$(next_number)
        printf '%s\t%s\n' "$num" "$title" >> "$state/milestones.tsv"
        printf '{"number": %s, "title": "%s"}\n' "$num" "$title"
        exit 0
        ;;
    esac
    ;;
  issue)
    case "$sub" in
      list)
        q=""; prev=""
        for a in "$@"; do
          if [ "$prev" = "--search" ]; then q="$a"; fi
          prev="$a"
        done
        t="${q%\" in:title}"; t="${t#\"}"
        emit_rows "$state/issues.tsv" "$t"
        exit 0
        ;;
      create)
        title=""; prev=""
        for a in "$@"; do
          if [ "$prev" = "--title" ]; then title="$a"; fi
          prev="$a"
        done
        num=$(next_number)
        printf '%s\t%s\n' "$num" "$title" >> "$state/issues.tsv"
        echo "https://github.com/stub/repo/issues/$num"
        exit 0
        ;;
    esac
    ;;
esac

echo "stub: unhandled: $*" >&2
exit 1
"##;

/// A small plan used by most apply tests: one label, one milestone, one
/// epic with one task.
pub const MINI_PLAN: &str = r#"
project = "Mini"
slug = "mini"

[[labels]]
name = "epic"
color = "7057ff"
description = "Epic issue"

[[milestones]]
title = "Phase 1"
description = "First phase"

[[epics]]
title = "Epic 1"
overview = "Overview"
as_a = "user"
i_want = "things"
so_that = "they work"
acceptance_criteria = "- [ ] done"
milestone = "Phase 1"
labels = ["epic"]

[[epics.tasks]]
title = "Epic1-Task1"
background = "bg"
acceptance_criteria = "- [ ] done"
branch = "feat/t1"
commit = "feat: t1"
labels = ["feature"]
"#;

/// A test environment with the stub `gh` on PATH.
pub struct TestEnv {
    /// Directory holding the stub gh executable.
    pub bin_dir: TempDir,
    /// Stub state: counters, created resources, and the call log.
    pub state_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let bin_dir = TempDir::new().unwrap();
        let state_dir = TempDir::new().unwrap();

        let gh_path = bin_dir.path().join("gh");
        fs::write(&gh_path, GH_STUB).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&gh_path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self { bin_dir, state_dir }
    }

    /// Get a Command for the gw binary with the stub on PATH and pacing
    /// disabled. Per-command env keeps tests parallel-safe.
    pub fn gw(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gw"));
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.env(
            "PATH",
            format!("{}:{}", self.bin_dir.path().display(), path),
        );
        cmd.env("GH_STUB_LOG", self.log_path());
        cmd.env("GH_STUB_STATE", self.state_dir.path());
        cmd.env_remove("GW_REPO");
        cmd.env_remove("GW_PLAN");
        cmd.args(["--pace-ms", "0"]);
        cmd
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.path().join("calls.log")
    }

    /// All stub invocations so far, one argv line per call.
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.log_path()) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Truncate the call log (between runs of a rerun test).
    pub fn clear_log(&self) {
        let _ = fs::write(self.log_path(), "");
    }

    /// Make the next `n` stub invocations fail.
    pub fn fail_next(&self, n: u32) {
        fs::write(self.state_dir.path().join("fail_next"), n.to_string()).unwrap();
    }

    /// Write a plan file into the state dir and return its path.
    pub fn write_plan(&self, toml: &str) -> PathBuf {
        let path = self.state_dir.path().join("plan.toml");
        fs::write(&path, toml).unwrap();
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
