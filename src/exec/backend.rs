// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runtime talks to an `ExecutorBackend` instead of a raw mpsc sender.
//! This makes it easy to swap in a fake executor in tests while keeping the
//! production executor implementation in [`command`](super::command).

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::dag::ScheduledTask;
use crate::engine::RuntimeEvent;
use crate::errors::{Error, Result};
use crate::exec::Capacity;

use super::command::spawn_executor;

/// Trait abstracting how scheduled tasks are executed.
///
/// Production code uses [`RealExecutorBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send {
    /// Dispatch the given tasks for execution.
    ///
    /// The implementation is free to:
    /// - spawn OS processes (production)
    /// - simulate completion and emit `RuntimeEvent`s (tests)
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real executor backend used in production.
///
/// Wraps the executor loop in [`spawn_executor`]; `spawn_ready_tasks`
/// forwards tasks to it over an mpsc channel.
pub struct RealExecutorBackend {
    tx: mpsc::Sender<ScheduledTask>,
}

impl RealExecutorBackend {
    /// Create a new real executor backend, wiring it to the given runtime
    /// event sender. This spawns the background executor loop immediately.
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, capacity: Capacity) -> Self {
        let tx = spawn_executor(runtime_tx, capacity);
        Self { tx }
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            for task in tasks {
                tx.send(task).await.map_err(Error::from)?;
            }
            Ok(())
        })
    }
}
