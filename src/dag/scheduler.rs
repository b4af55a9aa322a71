use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dag::graph::{PipelineGraph, TaskId};
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::state_manager::StateManager;
use crate::dag::task_info::RunState;
use crate::engine::TaskOutcome;
use crate::errors::GenopipeError;
use crate::fs::FileSystem;
use crate::report::{RunReport, TaskReport, TaskStatus};

/// Scheduler holds the immutable task graph plus mutable per-run state.
///
/// It is responsible for:
/// - deciding when a task is eligible (all producers satisfied)
/// - skipping tasks whose outputs are already up to date
/// - dispatching stale tasks to the executor
/// - failing a task's transitive dependents when it fails, while leaving
///   independent branches running
#[derive(Debug)]
pub struct Scheduler {
    graph: PipelineGraph,
    fs: Arc<dyn FileSystem>,
    states: Vec<RunState>,
    failures: Vec<Option<String>>,
}

impl Scheduler {
    pub fn new(graph: PipelineGraph, fs: Arc<dyn FileSystem>) -> Self {
        let states = vec![RunState::Pending; graph.len()];
        let failures = vec![None; graph.len()];
        Self {
            graph,
            fs,
            states,
            failures,
        }
    }

    pub fn graph(&self) -> &PipelineGraph {
        &self.graph
    }

    pub fn state_of(&self, id: TaskId) -> RunState {
        self.states[id.0]
    }

    /// True when every task is terminal.
    pub fn is_finished(&self) -> bool {
        self.states.iter().all(|s| s.is_terminal())
    }

    /// Begin a run: every task becomes `Pending`, then roots (and anything
    /// already up to date behind them) are resolved to a fixpoint.
    pub fn start_run(&mut self) -> SchedulerStep {
        info!(tasks = self.graph.len(), "starting pipeline run");

        for state in self.states.iter_mut() {
            *state = RunState::Pending;
        }
        self.failures.iter_mut().for_each(|f| *f = None);

        let mut step = SchedulerStep::default();
        let mut manager = StateManager::new(
            &self.graph,
            &mut self.states,
            &mut self.failures,
            self.fs.as_ref(),
        );
        manager.collect_ready(&mut step);
        step.run_finished = manager.all_terminal();

        if step.run_finished {
            info!("all tasks terminal; run finished");
        }
        step
    }

    /// Handle completion of a dispatched task.
    pub fn handle_completion(&mut self, id: TaskId, outcome: TaskOutcome) -> SchedulerStep {
        if id.0 >= self.graph.len() {
            warn!(?id, "completion for unknown task; ignoring");
            return SchedulerStep::default();
        }
        if self.states[id.0] != RunState::Running {
            warn!(
                task = %self.graph.name(id),
                state = ?self.states[id.0],
                "completion for task that is not running; ignoring"
            );
            return SchedulerStep::default();
        }

        let mut step = SchedulerStep::default();
        let mut manager = StateManager::new(
            &self.graph,
            &mut self.states,
            &mut self.failures,
            self.fs.as_ref(),
        );

        match outcome {
            TaskOutcome::Success => {
                debug!(task = %self.graph.name(id), "task completed successfully");
                manager.set_state(id, RunState::Succeeded);
            }
            TaskOutcome::Failed { code, diagnostics } => {
                let err = GenopipeError::Execution {
                    task: self.graph.name(id).to_string(),
                    code,
                };
                let reason = if diagnostics.is_empty() {
                    err.to_string()
                } else {
                    format!("{err}: {diagnostics}")
                };
                manager.fail_task(id, reason, &mut step);
            }
        }

        manager.collect_ready(&mut step);
        step.run_finished = manager.all_terminal();

        if step.run_finished {
            info!("all tasks terminal; run finished");
        }
        step
    }

    /// Per-task final statuses for reporting.
    pub fn report(&self) -> RunReport {
        let tasks = self
            .graph
            .ids()
            .map(|id| TaskReport {
                name: self.graph.name(id).to_string(),
                status: match self.states[id.0] {
                    RunState::Succeeded => TaskStatus::Succeeded,
                    RunState::UpToDate => TaskStatus::UpToDate,
                    RunState::Failed => {
                        TaskStatus::Failed(self.failures[id.0].clone().unwrap_or_default())
                    }
                    RunState::Cancelled => TaskStatus::Cancelled,
                    RunState::Pending | RunState::Running => TaskStatus::NotRun,
                },
            })
            .collect();

        RunReport { tasks }
    }
}
