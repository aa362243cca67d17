//! Groundwork - seed GitHub repositories with project scaffolding.
//!
//! This library provides the core functionality for the `gw` CLI tool:
//! a declarative plan of labels, milestones, epics, and tasks, and a
//! reconciler that converges the remote repository toward that plan by
//! creating only what is missing, via the `gh` CLI.

pub mod cli;
pub mod commands;
pub mod gh;
pub mod models;
pub mod plan;
pub mod reconcile;
pub mod ui;

/// Library-level error type for Groundwork operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Plan parse error: {0}")]
    PlanParse(#[from] toml::de::Error),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Groundwork operations.
pub type Result<T> = std::result::Result<T, Error>;
