// src/fs/mock.rs

//! In-memory [`FileSystem`] with settable modification times, for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use anyhow::{anyhow, Result};

use super::FileSystem;

/// Fake filesystem backed by a path -> mtime map plus a monotonic clock.
///
/// `touch` stamps a path with the next clock tick, so a sequence of touches
/// always has strictly increasing mtimes; `set_mtime` places a path at an
/// exact instant (useful for timestamp-tie cases).
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, SystemTime>>,
    clock: Mutex<u64>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a tick count into a concrete instant.
    pub fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    /// Create or update `path` with the next clock tick.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let mut clock = self.clock.lock().unwrap();
        *clock += 1;
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), Self::at(*clock));
    }

    /// Create or update `path` at an exact mtime.
    pub fn set_mtime(&self, path: impl AsRef<Path>, mtime: SystemTime) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), mtime);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.files.lock().unwrap().remove(path.as_ref());
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .ok_or_else(|| anyhow!("no such file in mock fs: {:?}", path))
    }
}
