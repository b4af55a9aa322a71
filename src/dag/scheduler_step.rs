// src/dag/scheduler_step.rs

//! Result type returned by each scheduler step.

use crate::dag::graph::TaskId;
use crate::dag::task_info::ScheduledTask;

/// What changed during one scheduler step.
#[derive(Debug, Default)]
pub struct SchedulerStep {
    /// Tasks that became ready and are stale; send these to the executor.
    pub dispatch: Vec<ScheduledTask>,
    /// Tasks skipped because their outputs are up to date.
    pub skipped: Vec<TaskId>,
    /// Tasks newly failed (missing input or execution failure).
    pub failed: Vec<TaskId>,
    /// Tasks cancelled because a producer failed.
    pub cancelled: Vec<TaskId>,
    /// True if this step drove the run to completion (all tasks terminal).
    pub run_finished: bool,
}
