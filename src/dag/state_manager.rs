// src/dag/state_manager.rs

//! Per-run state transitions: readiness, staleness-driven skipping, and
//! failure propagation.

use tracing::{debug, info, warn};

use crate::dag::graph::{PipelineGraph, TaskId};
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::task_info::{RunState, ScheduledTask};
use crate::errors::GenopipeError;
use crate::fs::FileSystem;
use crate::stale::{self, Freshness};

/// Mutable view over the scheduler's per-run state for one step.
pub struct StateManager<'a> {
    graph: &'a PipelineGraph,
    states: &'a mut [RunState],
    failures: &'a mut [Option<String>],
    fs: &'a dyn FileSystem,
}

impl<'a> StateManager<'a> {
    pub fn new(
        graph: &'a PipelineGraph,
        states: &'a mut [RunState],
        failures: &'a mut [Option<String>],
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            graph,
            states,
            failures,
            fs,
        }
    }

    /// Record a new state for a task (used for successful completions).
    pub fn set_state(&mut self, id: TaskId, state: RunState) {
        self.states[id.0] = state;
    }

    /// Whether every producer of `id` has reached a satisfying terminal state.
    pub fn deps_satisfied(&self, id: TaskId) -> bool {
        self.graph
            .dependencies_of(id)
            .iter()
            .all(|dep| self.states[dep.0].satisfies_dependents())
    }

    /// Drive eligible tasks to a fixpoint.
    ///
    /// Each pass finds `Pending` tasks whose producers are satisfied and
    /// evaluates their staleness:
    /// - up to date  -> mark `UpToDate` (this may unblock dependents, so
    ///   another pass runs);
    /// - stale       -> mark `Running` and emit a [`ScheduledTask`];
    /// - missing input -> mark `Failed` and cancel the dependent subgraph.
    pub fn collect_ready(&mut self, step: &mut SchedulerStep) {
        loop {
            let eligible: Vec<TaskId> = self
                .graph
                .ids()
                .filter(|&id| self.states[id.0] == RunState::Pending && self.deps_satisfied(id))
                .collect();

            let mut changed = false;
            for id in eligible {
                match stale::evaluate(self.graph.spec(id), self.fs) {
                    Ok(Freshness::UpToDate) => {
                        info!(task = %self.graph.name(id), "outputs up to date; skipping");
                        self.states[id.0] = RunState::UpToDate;
                        step.skipped.push(id);
                        changed = true;
                    }
                    Ok(Freshness::Stale(reason)) => {
                        debug!(
                            task = %self.graph.name(id),
                            ?reason,
                            "stale; dispatching to executor"
                        );
                        self.states[id.0] = RunState::Running;
                        step.dispatch
                            .push(ScheduledTask::from_spec(id, self.graph.spec(id)));
                    }
                    Err(err @ GenopipeError::MissingInput { .. }) => {
                        self.fail_task(id, err.to_string(), step);
                        changed = true;
                    }
                    Err(err) => {
                        // Filesystem error while evaluating; treat like a
                        // task-scoped failure rather than aborting the run.
                        warn!(task = %self.graph.name(id), error = %err, "staleness evaluation failed");
                        self.fail_task(id, err.to_string(), step);
                        changed = true;
                    }
                }
            }

            if !changed {
                break;
            }
        }
    }

    /// Mark `id` failed with a reason and cancel its transitive dependents.
    /// Independent branches are untouched.
    pub fn fail_task(&mut self, id: TaskId, reason: String, step: &mut SchedulerStep) {
        warn!(task = %self.graph.name(id), %reason, "task failed");
        self.states[id.0] = RunState::Failed;
        self.failures[id.0] = Some(reason);
        step.failed.push(id);
        self.cancel_dependents(id, step);
    }

    fn cancel_dependents(&mut self, failed: TaskId, step: &mut SchedulerStep) {
        let mut stack: Vec<TaskId> = self.graph.dependents_of(failed).to_vec();

        while let Some(id) = stack.pop() {
            // A dependent can only be Pending here: it cannot run (or finish)
            // before its producer reached a terminal state.
            if self.states[id.0] == RunState::Pending {
                debug!(
                    task = %self.graph.name(id),
                    upstream = %self.graph.name(failed),
                    "cancelled by upstream failure"
                );
                self.states[id.0] = RunState::Cancelled;
                step.cancelled.push(id);
                stack.extend(self.graph.dependents_of(id));
            }
        }
    }

    /// True when no task can make further progress.
    pub fn all_terminal(&self) -> bool {
        self.states.iter().all(|s| s.is_terminal())
    }
}
