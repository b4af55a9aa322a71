// src/exec/mod.rs

//! Process execution layer.
//!
//! This module actually runs the shell commands carried by scheduled tasks,
//! using `tokio::process::Command`, and reports back to the orchestration
//! runtime via `RuntimeEvent`s.
//!
//! - [`backend`] provides the `ExecutorBackend` trait and the concrete
//!   `RealExecutorBackend` used in production; tests swap in a fake.
//! - [`command`] owns the executor loop and core-count admission.
//! - [`task_runner`] handles individual task process execution.

use std::num::NonZeroUsize;

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use command::spawn_executor;

/// Aggregate resource ceiling of the executing environment.
///
/// Tasks are admitted so that the sum of their declared `cores` in flight
/// never exceeds this. Memory and walltime are passed through to logs but
/// not enforced locally.
#[derive(Debug, Clone, Copy)]
pub struct Capacity {
    pub cores: u32,
}

impl Capacity {
    pub fn new(cores: u32) -> Self {
        Self { cores: cores.max(1) }
    }

    /// Capacity of the local machine.
    pub fn detect() -> Self {
        let cores = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1) as u32;
        Self::new(cores)
    }
}
