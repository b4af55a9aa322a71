// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level sample sheet as read from a TOML file.
///
/// ```toml
/// [reference]
/// fasta = "ref/genome.fa"
///
/// [output]
/// dir = "results"
///
/// [cohort]
/// intervals = ["chr1", "chr2"]
///
/// [sample.A]
/// fastq1 = "reads/A_1.fq"
/// fastq2 = "reads/A_2.fq"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawSampleSheet {
    /// `[reference]` section.
    pub reference: ReferenceSection,

    /// `[output]` section; defaults to `results/`.
    #[serde(default)]
    pub output: OutputSection,

    /// `[cohort]` section: joint-genotyping intervals and output.
    pub cohort: CohortSection,

    /// All samples from `[sample.<name>]`. Keys are the sample names.
    #[serde(default)]
    pub sample: BTreeMap<String, SampleConfig>,
}

/// `[reference]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSection {
    /// The reference genome FASTA. Index artifacts, the `.fai` index and
    /// the sequence dictionary are derived from this path.
    pub fasta: PathBuf,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Directory all intermediate and final outputs are placed under.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// `[cohort]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CohortSection {
    /// Genomic intervals passed to GenomicsDBImport (`-L` flags).
    pub intervals: Vec<String>,

    /// Cohort-level variant file; defaults to `<output.dir>/cohort.vcf.gz`.
    #[serde(default)]
    pub vcf: Option<PathBuf>,
}

/// `[sample.<name>]` section: one pair of FASTQ files per sample.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleConfig {
    pub fastq1: PathBuf,
    pub fastq2: PathBuf,
}

/// A sample sheet that passed validation (at least one sample, non-empty
/// reference path, non-empty interval list).
///
/// Construct via `SampleSheet::try_from(raw)`; `new_unchecked` exists for
/// the validation module and test builders.
#[derive(Debug, Clone)]
pub struct SampleSheet {
    pub reference: ReferenceSection,
    pub output: OutputSection,
    pub cohort: CohortSection,
    pub sample: BTreeMap<String, SampleConfig>,
}

impl SampleSheet {
    pub fn new_unchecked(
        reference: ReferenceSection,
        output: OutputSection,
        cohort: CohortSection,
        sample: BTreeMap<String, SampleConfig>,
    ) -> Self {
        Self {
            reference,
            output,
            cohort,
            sample,
        }
    }
}
