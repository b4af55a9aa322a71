// src/task.rs

//! The task descriptor: the unit of work handed to the graph builder and,
//! eventually, to an executor backend.
//!
//! A [`TaskSpec`] is immutable once built. The builder validates everything
//! that can be validated without touching the filesystem, so malformed
//! descriptors surface as [`GenopipeError::Definition`] during pipeline
//! assembly rather than mid-run.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{GenopipeError, Result};

/// `<number><unit suffix>`, e.g. "16g" or "512mb".
static MEMORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)[0-9]+[kmgt]b?$").expect("memory regex"));

/// `H+:MM:SS`, e.g. "1:00:00" or "120:00:00".
static WALLTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+:[0-5][0-9]:[0-5][0-9]$").expect("walltime regex"));

/// Resource requirements declared by a task.
///
/// These are hints for the executing environment's admission decisions; the
/// core validates their shape but never interprets unit suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub cores: u32,
    pub memory: String,
    pub walltime: String,
}

impl Resources {
    pub fn new(cores: u32, memory: &str, walltime: &str) -> Self {
        Self {
            cores,
            memory: memory.to_string(),
            walltime: walltime.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cores == 0 {
            return Err(GenopipeError::Definition(
                "resources.cores must be >= 1 (got 0)".to_string(),
            ));
        }
        if !MEMORY_RE.is_match(&self.memory) {
            return Err(GenopipeError::Definition(format!(
                "resources.memory '{}' does not match <number><unit suffix> (e.g. \"16g\")",
                self.memory
            )));
        }
        if !WALLTIME_RE.is_match(&self.walltime) {
            return Err(GenopipeError::Definition(format!(
                "resources.walltime '{}' does not match H+:MM:SS (e.g. \"48:00:00\")",
                self.walltime
            )));
        }
        Ok(())
    }
}

/// Immutable descriptor of one pipeline step.
///
/// Fields are private on purpose: once a `TaskSpec` exists it is a valid,
/// fully resolved descriptor, and nothing downstream can invalidate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    name: String,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    resources: Resources,
    command: String,
}

impl TaskSpec {
    pub fn builder(name: impl Into<String>) -> TaskSpecBuilder {
        TaskSpecBuilder {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            resources: None,
            command: None,
        }
    }

    /// Human-readable label used in logs and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Paths this task reads, in declaration order.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Paths this task produces, in declaration order. Never empty.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// The fully resolved shell command. No templating happens downstream.
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Builder for [`TaskSpec`]; `build` performs all Definition-Error checks.
#[derive(Debug)]
pub struct TaskSpecBuilder {
    name: String,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    resources: Option<Resources>,
    command: Option<String>,
}

impl TaskSpecBuilder {
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(path.as_ref().to_path_buf());
        self
    }

    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.inputs
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.outputs.push(path.as_ref().to_path_buf());
        self
    }

    pub fn resources(mut self, resources: Resources) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn build(self) -> Result<TaskSpec> {
        if self.name.trim().is_empty() {
            return Err(GenopipeError::Definition(
                "task name must not be empty".to_string(),
            ));
        }
        if self.outputs.is_empty() {
            return Err(GenopipeError::Definition(format!(
                "task '{}' declares no outputs and can never be satisfied",
                self.name
            )));
        }
        let resources = self.resources.ok_or_else(|| {
            GenopipeError::Definition(format!("task '{}' has no resource record", self.name))
        })?;
        resources.validate()?;

        let command = match self.command {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => {
                return Err(GenopipeError::Definition(format!(
                    "task '{}' has no command",
                    self.name
                )));
            }
        };

        Ok(TaskSpec {
            name: self.name,
            inputs: self.inputs,
            outputs: self.outputs,
            resources,
            command,
        })
    }
}
