// src/fs/mod.rs

//! Filesystem abstraction used by staleness evaluation.
//!
//! The scheduler only ever asks two questions about a path: does it exist,
//! and when was it last modified. Keeping that behind a trait lets tests
//! drive the scheduler with fully deterministic timestamps.

use std::fmt::Debug;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;

    /// Modification time of a path. Errors if the path does not exist.
    fn modified(&self, path: &Path) -> Result<SystemTime>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        let metadata = fs::metadata(path).with_context(|| format!("stat {:?}", path))?;
        metadata
            .modified()
            .with_context(|| format!("modification time of {:?}", path))
    }
}
