// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawSampleSheet, SampleSheet};
use crate::errors::Result;

/// Load a sample sheet from a given path and return the raw model.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSampleSheet> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let sheet: RawSampleSheet = toml::from_str(&contents)?;

    Ok(sheet)
}

/// Load a sample sheet from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
/// reads TOML, applies defaults, and checks for a non-empty sample set,
/// a reference path and at least one genotyping interval.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<SampleSheet> {
    let raw = load_from_path(&path)?;
    let sheet = SampleSheet::try_from(raw)?;
    Ok(sheet)
}

/// Default sample sheet location: `Genopipe.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Genopipe.toml")
}
