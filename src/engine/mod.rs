// src/engine/mod.rs

//! Orchestration engine.
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`]. The core consumes [`RuntimeEvent`]s and
//! produces commands for the shell, so the entire scheduling semantics can
//! be unit tested without Tokio, channels, or processes.

use crate::dag::TaskId;

/// Outcome of a task process for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed {
        code: i32,
        /// Tail of the process's stderr, kept for the run report.
        diagnostics: String,
    },
}

/// Events flowing into the runtime from the executor and signal handling.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A task process exited with a concrete outcome.
    TaskCompleted { task: TaskId, outcome: TaskOutcome },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
