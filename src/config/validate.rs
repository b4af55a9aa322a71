// src/config/validate.rs

use crate::config::model::{RawSampleSheet, SampleSheet};
use crate::errors::{GenopipeError, Result};

impl TryFrom<RawSampleSheet> for SampleSheet {
    type Error = GenopipeError;

    fn try_from(raw: RawSampleSheet) -> std::result::Result<Self, Self::Error> {
        validate_raw_sheet(&raw)?;
        Ok(SampleSheet::new_unchecked(
            raw.reference,
            raw.output,
            raw.cohort,
            raw.sample,
        ))
    }
}

fn validate_raw_sheet(raw: &RawSampleSheet) -> Result<()> {
    ensure_has_samples(raw)?;
    validate_reference(raw)?;
    validate_cohort(raw)?;
    validate_samples(raw)?;
    Ok(())
}

fn ensure_has_samples(raw: &RawSampleSheet) -> Result<()> {
    if raw.sample.is_empty() {
        return Err(GenopipeError::Config(
            "sample sheet must contain at least one [sample.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_reference(raw: &RawSampleSheet) -> Result<()> {
    if raw.reference.fasta.as_os_str().is_empty() {
        return Err(GenopipeError::Config(
            "[reference].fasta must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_cohort(raw: &RawSampleSheet) -> Result<()> {
    if raw.cohort.intervals.is_empty() {
        return Err(GenopipeError::Config(
            "[cohort].intervals must list at least one genomic interval".to_string(),
        ));
    }
    for interval in &raw.cohort.intervals {
        if interval.trim().is_empty() {
            return Err(GenopipeError::Config(
                "[cohort].intervals must not contain empty entries".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_samples(raw: &RawSampleSheet) -> Result<()> {
    for (name, sample) in raw.sample.iter() {
        if name.trim().is_empty() {
            return Err(GenopipeError::Config(
                "sample names must not be empty".to_string(),
            ));
        }
        if sample.fastq1.as_os_str().is_empty() || sample.fastq2.as_os_str().is_empty() {
            return Err(GenopipeError::Config(format!(
                "sample '{}' must declare both fastq1 and fastq2",
                name
            )));
        }
    }
    Ok(())
}
