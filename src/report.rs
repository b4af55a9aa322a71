// src/report.rs

//! Partial-failure reporting: which tasks ran, which were skipped as up to
//! date, which failed, and which were cancelled by an upstream failure.

use std::fmt;

/// Final status of one task after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Executed and exited zero.
    Succeeded,
    /// Skipped; outputs were already up to date.
    UpToDate,
    /// Failed, with the recorded reason (exit code, diagnostics, or a
    /// missing input).
    Failed(String),
    /// Never started because an upstream task failed.
    Cancelled,
    /// Run ended (e.g. shutdown) before this task reached a terminal state.
    NotRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: String,
    pub status: TaskStatus,
}

/// Per-task outcome of a whole pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub tasks: Vec<TaskReport>,
}

impl RunReport {
    /// A run succeeded when every task either executed successfully or was
    /// already up to date.
    pub fn is_success(&self) -> bool {
        self.tasks
            .iter()
            .all(|t| matches!(t.status, TaskStatus::Succeeded | TaskStatus::UpToDate))
    }

    pub fn status_of(&self, name: &str) -> Option<&TaskStatus> {
        self.tasks.iter().find(|t| t.name == name).map(|t| &t.status)
    }

    /// Number of tasks that actually executed.
    pub fn executed(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Succeeded))
    }

    /// Number of tasks skipped as up to date.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::UpToDate))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Failed(_)))
    }

    pub fn cancelled(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Cancelled))
    }

    fn count(&self, pred: impl Fn(&TaskStatus) -> bool) -> usize {
        self.tasks.iter().filter(|t| pred(&t.status)).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} executed, {} up to date, {} failed, {} cancelled",
            self.executed(),
            self.skipped(),
            self.failed(),
            self.cancelled()
        )
    }
}
