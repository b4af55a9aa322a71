// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! A synchronous, deterministic core that consumes [`RuntimeEvent`]s and
//! produces a list of commands describing what the IO shell should do next.
//! The async shell (`engine::runtime::Runtime`) reads events from channels
//! and forwards scheduled tasks to the executor; everything that decides
//! *what* runs lives here and is testable without Tokio or processes.

use crate::dag::Scheduler;
use crate::engine::event_handlers::{handle_run_start, handle_task_completion, CoreStep};
use crate::engine::RuntimeEvent;
use crate::report::RunReport;

/// Pure core runtime state: the scheduler and nothing else.
#[derive(Debug)]
pub struct CoreRuntime {
    scheduler: Scheduler,
}

impl CoreRuntime {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    /// Begin the run. May already finish it (fully up-to-date pipeline).
    pub fn start(&mut self) -> CoreStep {
        handle_run_start(&mut self.scheduler)
    }

    /// Handle a single runtime event.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::TaskCompleted { task, outcome } => {
                handle_task_completion(&mut self.scheduler, task, outcome)
            }
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }

    /// Expose run completion (for tests).
    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    /// Final per-task statuses.
    pub fn report(&self) -> RunReport {
        self.scheduler.report()
    }
}
