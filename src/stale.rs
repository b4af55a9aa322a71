// src/stale.rs

//! Staleness evaluation: may a task's execution be skipped?
//!
//! Policy: a task is up to date when every declared output exists and no
//! input is *strictly* newer than any output. Equal timestamps count as up
//! to date, so coarse filesystem clocks don't force spurious re-runs.
//!
//! Evaluation happens when a task becomes eligible, after all its producers
//! have finished. Fresh upstream outputs therefore re-evaluate downstream
//! tasks transitively without any extra bookkeeping.

use std::time::SystemTime;

use crate::errors::{GenopipeError, Result};
use crate::fs::FileSystem;
use crate::task::TaskSpec;

/// Result of evaluating one task against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Stale(StaleReason),
}

/// Why a task must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// A declared output does not exist.
    MissingOutput(std::path::PathBuf),
    /// An input is strictly newer than the oldest output.
    InputNewer {
        input: std::path::PathBuf,
        output: std::path::PathBuf,
    },
}

/// Evaluate a task's staleness.
///
/// Errors with [`GenopipeError::MissingInput`] if any input path does not
/// exist; by the time a task is eligible its produced inputs must be on
/// disk, so a missing path means a missing external input (or a producer
/// that lied about its outputs).
pub fn evaluate(spec: &TaskSpec, fs: &dyn FileSystem) -> Result<Freshness> {
    let mut newest_input: Option<(SystemTime, &std::path::Path)> = None;
    for input in spec.inputs() {
        if !fs.exists(input) {
            return Err(GenopipeError::MissingInput {
                task: spec.name().to_string(),
                path: input.clone(),
            });
        }
        let mtime = fs.modified(input)?;
        if newest_input.is_none_or(|(t, _)| mtime > t) {
            newest_input = Some((mtime, input));
        }
    }

    let mut oldest_output: Option<(SystemTime, &std::path::Path)> = None;
    for output in spec.outputs() {
        if !fs.exists(output) {
            return Ok(Freshness::Stale(StaleReason::MissingOutput(output.clone())));
        }
        let mtime = fs.modified(output)?;
        if oldest_output.is_none_or(|(t, _)| mtime < t) {
            oldest_output = Some((mtime, output));
        }
    }

    match (newest_input, oldest_output) {
        (Some((in_time, input)), Some((out_time, output))) if in_time > out_time => {
            Ok(Freshness::Stale(StaleReason::InputNewer {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }))
        }
        // No inputs, or nothing newer than the outputs: skip.
        _ => Ok(Freshness::UpToDate),
    }
}
