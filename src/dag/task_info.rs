// src/dag/task_info.rs

//! Per-run task states and the scheduled-task type handed to executors.

use std::path::PathBuf;

use crate::dag::graph::TaskId;
use crate::task::{Resources, TaskSpec};

/// Per-run state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for producers to finish.
    Pending,
    /// Dispatched to the executor.
    Running,
    /// Command executed and exited zero.
    Succeeded,
    /// Skipped: outputs already newer than (or as new as) all inputs.
    UpToDate,
    /// Command failed, or an input was missing when the task became eligible.
    Failed,
    /// Not started because an upstream task failed.
    Cancelled,
}

impl RunState {
    /// Terminal states never change for the rest of the run.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Pending | RunState::Running)
    }

    /// Whether this state satisfies a consumer's dependency.
    pub fn satisfies_dependents(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::UpToDate)
    }
}

/// Everything the executor needs to run one task: the resolved command, the
/// resource hints for admission, and the outputs (for logging only — the
/// command itself writes them).
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub name: String,
    pub command: String,
    pub resources: Resources,
    pub outputs: Vec<PathBuf>,
}

impl ScheduledTask {
    pub fn from_spec(id: TaskId, spec: &TaskSpec) -> Self {
        Self {
            id,
            name: spec.name().to_string(),
            command: spec.command().to_string(),
            resources: spec.resources().clone(),
            outputs: spec.outputs().to_vec(),
        }
    }
}
