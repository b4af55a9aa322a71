// src/exec/command.rs

//! Executor loop with core-count admission.
//!
//! Independent tasks run concurrently, but the sum of their declared
//! `resources.cores` never exceeds the configured [`Capacity`]: each task
//! acquires that many semaphore permits before its process is spawned and
//! releases them when it exits. Tasks declaring more cores than the machine
//! has are clamped (they run alone rather than never).

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use crate::dag::ScheduledTask;
use crate::engine::RuntimeEvent;
use crate::exec::task_runner::run_task;
use crate::exec::Capacity;

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<ScheduledTask>` is what the runtime (or
/// `RealExecutorBackend`) uses to hand over work. Each scheduled task is
/// executed in its own Tokio task once it has been admitted.
pub fn spawn_executor(
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    capacity: Capacity,
) -> mpsc::Sender<ScheduledTask> {
    let (tx, mut rx) = mpsc::channel::<ScheduledTask>(32);

    tokio::spawn(async move {
        info!(cores = capacity.cores, "executor loop started");

        let semaphore = Arc::new(Semaphore::new(capacity.cores as usize));

        while let Some(task) = rx.recv().await {
            let permits = admitted_cores(&task, capacity);
            let semaphore = Arc::clone(&semaphore);
            let runtime_tx = runtime_tx.clone();

            tokio::spawn(async move {
                // Closed only when the executor loop is torn down.
                let Ok(_permits) = semaphore.acquire_many(permits).await else {
                    return;
                };
                run_task(task, runtime_tx).await;
            });
        }

        info!("executor loop finished (channel closed)");
    });

    tx
}

fn admitted_cores(task: &ScheduledTask, capacity: Capacity) -> u32 {
    let wanted = task.resources.cores;
    if wanted > capacity.cores {
        warn!(
            task = %task.name,
            wanted,
            available = capacity.cores,
            "task declares more cores than available; clamping"
        );
    }
    wanted.clamp(1, capacity.cores)
}
