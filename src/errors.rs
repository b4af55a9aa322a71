// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Structural errors (`Definition`, `DuplicateOutput`, `Cycle`) are raised
//! while the task set is being planned, before anything executes. Runtime
//! errors (`MissingInput`, `Execution`) are scoped to a task and its
//! dependents; independent branches keep running.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenopipeError {
    #[error("Definition error: {0}")]
    Definition(String),

    #[error("Definition error: output '{path}' is declared by both '{first}' and '{second}'")]
    DuplicateOutput {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Cycle detected in task graph: {0}")]
    Cycle(String),

    #[error("Missing input for task '{task}': '{path}' does not exist")]
    MissingInput { task: String, path: PathBuf },

    #[error("Task '{task}' exited with code {code}")]
    Execution { task: String, code: i32 },

    #[error("Sample sheet error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GenopipeError>;
