#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use genopipe::config::{
    CohortSection, OutputSection, RawSampleSheet, ReferenceSection, SampleConfig, SampleSheet,
};
use genopipe::task::{Resources, TaskSpec};

/// Build a synthetic task descriptor for graph/scheduler tests.
///
/// Commands default to a no-op; tests that execute for real override them.
pub struct TaskSpecBuilder {
    name: String,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    resources: Resources,
    command: String,
}

impl TaskSpecBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            resources: Resources::new(1, "1g", "0:10:00"),
            command: "true".to_string(),
        }
    }

    pub fn input(mut self, path: &str) -> Self {
        self.inputs.push(PathBuf::from(path));
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.outputs.push(PathBuf::from(path));
        self
    }

    pub fn command(mut self, cmd: &str) -> Self {
        self.command = cmd.to_string();
        self
    }

    pub fn resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn build(self) -> TaskSpec {
        let mut builder = TaskSpec::builder(self.name);
        for input in &self.inputs {
            builder = builder.input(input);
        }
        for output in &self.outputs {
            builder = builder.output(output);
        }
        builder
            .resources(self.resources)
            .command(self.command)
            .build()
            .expect("Failed to build valid task spec from builder")
    }
}

/// Builder for a validated `SampleSheet`.
pub struct SampleSheetBuilder {
    fasta: PathBuf,
    dir: PathBuf,
    intervals: Vec<String>,
    vcf: Option<PathBuf>,
    samples: BTreeMap<String, SampleConfig>,
}

impl SampleSheetBuilder {
    pub fn new(fasta: &str) -> Self {
        Self {
            fasta: PathBuf::from(fasta),
            dir: PathBuf::from("results"),
            intervals: vec!["chr1".to_string()],
            vcf: None,
            samples: BTreeMap::new(),
        }
    }

    pub fn output_dir(mut self, dir: &str) -> Self {
        self.dir = PathBuf::from(dir);
        self
    }

    pub fn interval(mut self, interval: &str) -> Self {
        self.intervals.push(interval.to_string());
        self
    }

    pub fn cohort_vcf(mut self, vcf: &str) -> Self {
        self.vcf = Some(PathBuf::from(vcf));
        self
    }

    pub fn sample(mut self, name: &str, fastq1: &str, fastq2: &str) -> Self {
        self.samples.insert(
            name.to_string(),
            SampleConfig {
                fastq1: PathBuf::from(fastq1),
                fastq2: PathBuf::from(fastq2),
            },
        );
        self
    }

    pub fn build(self) -> SampleSheet {
        let raw = RawSampleSheet {
            reference: ReferenceSection { fasta: self.fasta },
            output: OutputSection { dir: self.dir },
            cohort: CohortSection {
                intervals: self.intervals,
                vcf: self.vcf,
            },
            sample: self.samples,
        };
        SampleSheet::try_from(raw).expect("Failed to build valid sample sheet from builder")
    }
}

impl Default for SampleSheetBuilder {
    fn default() -> Self {
        Self::new("ref.fa")
    }
}
