// src/pipeline.rs

//! Pipeline assembly: turn a validated sample sheet into the full set of
//! task descriptors.
//!
//! Reference preparation (index, dictionary, faidx) is declared once; the
//! alignment-to-gvcf chain is declared per sample; the manifest, the
//! GenomicsDB import and the joint genotyping close the cohort. Assembly is
//! pure: no filesystem access, and the same sheet always yields the same
//! descriptor set in the same order.

use std::path::PathBuf;

use crate::config::SampleSheet;
use crate::errors::Result;
use crate::stages;
use crate::task::TaskSpec;

/// Per-sample intermediate and final paths under the output directory.
#[derive(Debug, Clone)]
pub struct SamplePaths {
    pub bam: PathBuf,
    pub rgroup: PathBuf,
    pub sorted: PathBuf,
    pub dedup: PathBuf,
    pub metrics: PathBuf,
    pub gvcf: PathBuf,
}

impl SamplePaths {
    pub fn new(dir: &std::path::Path, sample: &str) -> Self {
        Self {
            bam: dir.join(format!("{sample}.bam")),
            rgroup: dir.join(format!("{sample}.rg.bam")),
            sorted: dir.join(format!("{sample}.sorted.bam")),
            dedup: dir.join(format!("{sample}.dedup.bam")),
            metrics: dir.join(format!("{sample}.dedup_metrics.txt")),
            gvcf: dir.join(format!("{sample}.g.vcf.gz")),
        }
    }
}

/// Cohort-level paths.
pub fn manifest_path(sheet: &SampleSheet) -> PathBuf {
    sheet.output.dir.join("sample_map.tsv")
}

pub fn workspace_path(sheet: &SampleSheet) -> PathBuf {
    sheet.output.dir.join("genomicsdb")
}

pub fn cohort_vcf_path(sheet: &SampleSheet) -> PathBuf {
    sheet
        .cohort
        .vcf
        .clone()
        .unwrap_or_else(|| sheet.output.dir.join("cohort.vcf.gz"))
}

/// Emit the complete descriptor set for a sample sheet.
pub fn assemble(sheet: &SampleSheet) -> Result<Vec<TaskSpec>> {
    let fa = &sheet.reference.fasta;
    let dir = &sheet.output.dir;

    let mut specs = vec![
        stages::bwa_index(fa)?,
        stages::picard_dict(fa)?,
        stages::samtools_faidx(fa)?,
    ];

    let mut gvcf_entries: Vec<(String, PathBuf)> = Vec::new();

    for (name, sample) in sheet.sample.iter() {
        let paths = SamplePaths::new(dir, name);

        specs.push(stages::bwa_map(
            fa,
            &sample.fastq1,
            &sample.fastq2,
            &paths.bam,
        )?);
        specs.push(stages::picard_read_groups(
            &paths.bam,
            fa,
            &paths.rgroup,
            name,
        )?);
        specs.push(stages::picard_sort(&paths.rgroup, &paths.sorted)?);
        specs.push(stages::picard_mark_duplicates(
            &paths.sorted,
            &paths.dedup,
            &paths.metrics,
        )?);
        specs.push(stages::gatk_haplotype_caller(fa, &paths.dedup, &paths.gvcf)?);

        gvcf_entries.push((name.clone(), paths.gvcf));
    }

    let manifest = manifest_path(sheet);
    let workspace = workspace_path(sheet);

    specs.push(stages::gvcf_list(&gvcf_entries, &manifest)?);
    specs.push(stages::gatk_genomicsdb_import(
        &manifest,
        &workspace,
        &sheet.cohort.intervals,
    )?);
    specs.push(stages::gatk_genotype_gvcfs(
        fa,
        &workspace,
        &cohort_vcf_path(sheet),
    )?);

    Ok(specs)
}
