//! Tests for `gw plan`: printing the resolved plan from the builtin
//! dataset or a TOML file.

mod common;

use common::{TestEnv, MINI_PLAN};
use predicates::prelude::*;

#[test]
fn test_plan_prints_builtin_structure() {
    let env = TestEnv::new();
    env.gw()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("UI/UX Cyberpunk Upgrade"))
        .stdout(predicate::str::contains("Phase 1: Visual Style Refactoring"))
        .stdout(predicate::str::contains("[Epic 1] Cyberpunk Visual Style"))
        .stdout(predicate::str::contains("[Epic 5] Kanban Musume Character"))
        .stdout(predicate::str::contains("19 labels, 2 milestones"));
}

#[test]
fn test_plan_json_is_parseable() {
    let env = TestEnv::new();
    let output = env.gw().args(["plan", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["project"], "UI/UX Cyberpunk Upgrade");
    assert_eq!(value["labels"].as_array().unwrap().len(), 19);
}

#[test]
fn test_plan_from_file() {
    let env = TestEnv::new();
    let path = env.write_plan(MINI_PLAN);
    env.gw()
        .args(["plan", "--plan"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini"))
        .stdout(predicate::str::contains("Epic 1"))
        .stdout(predicate::str::contains("Epic1-Task1"));
}

#[test]
fn test_plan_rejects_unknown_milestone_reference() {
    let env = TestEnv::new();
    let path = env.write_plan(
        r#"
project = "Bad"

[[epics]]
title = "Epic 1"
overview = "o"
as_a = "a"
i_want = "b"
so_that = "c"
acceptance_criteria = "d"
milestone = "Nope"
"#,
    );
    env.gw()
        .args(["plan", "--plan"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown milestone"));
}

#[test]
fn test_plan_makes_no_gh_calls() {
    let env = TestEnv::new();
    env.gw().arg("plan").assert().success();
    assert!(env.calls().is_empty());
}
