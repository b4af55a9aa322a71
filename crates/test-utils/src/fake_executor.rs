use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use genopipe::dag::ScheduledTask;
use genopipe::engine::{RuntimeEvent, TaskOutcome};
use genopipe::errors::Result;
use genopipe::exec::ExecutorBackend;
use genopipe::fs::mock::MockFileSystem;

/// A fake executor that:
/// - records which tasks were "run"
/// - touches each task's declared outputs in a shared [`MockFileSystem`]
///   (with strictly increasing mtimes), so downstream staleness evaluation
///   sees what a real command would have left behind
/// - reports `TaskCompleted` with Success, or a failure for task names
///   registered via [`fail_task`](FakeExecutor::fail_task).
pub struct FakeExecutor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    executed: Arc<Mutex<Vec<String>>>,
    fs: Arc<MockFileSystem>,
    failing: HashSet<String>,
}

impl FakeExecutor {
    pub fn new(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        executed: Arc<Mutex<Vec<String>>>,
        fs: Arc<MockFileSystem>,
    ) -> Self {
        Self {
            runtime_tx,
            executed,
            fs,
            failing: HashSet::new(),
        }
    }

    /// Make the executor report a non-zero exit for this task name.
    pub fn fail_task(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let executed = Arc::clone(&self.executed);
        let fs = Arc::clone(&self.fs);
        let failing = self.failing.clone();

        Box::pin(async move {
            for t in tasks {
                {
                    let mut guard = executed.lock().unwrap();
                    guard.push(t.name.clone());
                }

                let outcome = if failing.contains(&t.name) {
                    TaskOutcome::Failed {
                        code: 1,
                        diagnostics: "injected failure".to_string(),
                    }
                } else {
                    for output in &t.outputs {
                        fs.touch(output);
                    }
                    TaskOutcome::Success
                };

                tx.send(RuntimeEvent::TaskCompleted {
                    task: t.id,
                    outcome,
                })
                .await
                .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
