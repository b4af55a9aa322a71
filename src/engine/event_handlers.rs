// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use crate::dag::{Scheduler, ScheduledTask, SchedulerStep, TaskId};
use crate::engine::TaskOutcome;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Send these tasks to the executor.
    DispatchTasks(Vec<ScheduledTask>),
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

/// Seed the run: eligible roots are evaluated and stale ones dispatched.
/// If everything was already up to date, the run is over before any event
/// arrives.
pub fn handle_run_start(scheduler: &mut Scheduler) -> CoreStep {
    let step = scheduler.start_run();
    step_to_core(step)
}

/// Handle completion of a dispatched task.
pub fn handle_task_completion(
    scheduler: &mut Scheduler,
    task: TaskId,
    outcome: TaskOutcome,
) -> CoreStep {
    let step = scheduler.handle_completion(task, outcome);
    step_to_core(step)
}

fn step_to_core(step: SchedulerStep) -> CoreStep {
    let mut commands = Vec::new();
    if !step.dispatch.is_empty() {
        commands.push(CoreCommand::DispatchTasks(step.dispatch));
    }

    CoreStep {
        commands,
        keep_running: !step.run_finished,
    }
}
