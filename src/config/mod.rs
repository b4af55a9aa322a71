// src/config/mod.rs

//! Sample sheet loading and validation.
//!
//! - [`model`] mirrors the TOML sample sheet.
//! - [`loader`] reads and deserializes it.
//! - [`validate`] turns the raw model into a validated [`model::SampleSheet`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CohortSection, OutputSection, RawSampleSheet, ReferenceSection, SampleConfig, SampleSheet};
