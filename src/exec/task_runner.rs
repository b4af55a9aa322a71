// src/exec/task_runner.rs

//! Individual task process runner.

use std::collections::VecDeque;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::dag::ScheduledTask;
use crate::engine::{RuntimeEvent, TaskOutcome};

/// How many trailing stderr lines to keep as failure diagnostics.
const STDERR_TAIL_LINES: usize = 20;

/// Run a single task process and emit a `TaskCompleted` event with its
/// outcome. A failure to spawn or wait is reported as a failed outcome so
/// the scheduler can cancel dependents.
pub async fn run_task(task: ScheduledTask, runtime_tx: mpsc::Sender<RuntimeEvent>) {
    let id = task.id;
    let name = task.name.clone();

    let outcome = match run_task_inner(task).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(task = %name, error = %err, "task execution error");
            TaskOutcome::Failed {
                code: -1,
                diagnostics: err.to_string(),
            }
        }
    };

    let _ = runtime_tx
        .send(RuntimeEvent::TaskCompleted { task: id, outcome })
        .await;
}

async fn run_task_inner(task: ScheduledTask) -> Result<TaskOutcome> {
    info!(
        task = %task.name,
        cores = task.resources.cores,
        memory = %task.resources.memory,
        walltime = %task.resources.walltime,
        cmd = %task.command,
        "starting task process"
    );

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(&task.command)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for task '{}'", task.name))?;

    // Consume stdout so buffers don't fill; log at debug.
    if let Some(stdout) = child.stdout.take() {
        let task_name = task.name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(task = %task_name, "stdout: {}", line);
            }
        });
    }

    // Keep the tail of stderr as diagnostics for the run report.
    let stderr_tail = match child.stderr.take() {
        Some(stderr) => {
            let task_name = task.name.clone();
            tokio::spawn(async move {
                let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(task = %task_name, "stderr: {}", line);
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
                tail.into_iter().collect::<Vec<_>>().join("\n")
            })
        }
        None => tokio::spawn(async { String::new() }),
    };

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{}'", task.name))?;

    let diagnostics = stderr_tail.await.unwrap_or_default();
    let code = status.code().unwrap_or(-1);

    info!(
        task = %task.name,
        exit_code = code,
        success = status.success(),
        "task process exited"
    );

    if status.success() {
        Ok(TaskOutcome::Success)
    } else {
        Ok(TaskOutcome::Failed { code, diagnostics })
    }
}
