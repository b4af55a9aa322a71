// src/stages.rs

//! Descriptor factories, one per pipeline stage.
//!
//! Each factory is a pure function from concrete file paths (and a few
//! parameters) to a [`TaskSpec`]. No filesystem or process IO happens here;
//! calling a factory twice with the same arguments yields the same
//! descriptor.
//!
//! The on-disk artifact conventions (`.amb`/`.ann`/`.bwt`/`.pac`/`.sa`
//! siblings for a bwa index, `.fai` for faidx, `.dict` for the sequence
//! dictionary, `.tbi` for a gvcf index) are derived here so that implicit
//! tool dependencies become explicit entries in the input lists.

use std::path::{Path, PathBuf};

use crate::errors::{GenopipeError, Result};
use crate::task::{Resources, TaskSpec};

/// Suffixes of the five sibling files `bwa index` writes next to the FASTA.
const BWA_INDEX_SUFFIXES: [&str; 5] = ["amb", "ann", "bwt", "pac", "sa"];

/// Append `.suffix` to a path without replacing its existing extension
/// (`ref.fa` -> `ref.fa.amb`).
fn with_appended_suffix(path: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", path.display(), suffix))
}

/// The five index artifacts `bwa index` produces for a reference FASTA.
pub fn index_artifacts(fa: &Path) -> [PathBuf; 5] {
    BWA_INDEX_SUFFIXES.map(|s| with_appended_suffix(fa, s))
}

/// `.fai` index path for a reference FASTA (`ref.fa` -> `ref.fa.fai`).
pub fn fai_path(fa: &Path) -> PathBuf {
    with_appended_suffix(fa, "fai")
}

/// Sequence dictionary path for a reference FASTA (`ref.fa` -> `ref.dict`,
/// the picard convention).
pub fn dict_path(fa: &Path) -> PathBuf {
    fa.with_extension("dict")
}

/// Label a stage instance by its primary output file, e.g. `bwa_map:A.bam`.
fn label(stage: &str, primary_output: &Path) -> String {
    match primary_output.file_name() {
        Some(name) => format!("{}:{}", stage, name.to_string_lossy()),
        None => stage.to_string(),
    }
}

/// Genome indexing. Single producer for all five sibling index files.
pub fn bwa_index(fa: &Path) -> Result<TaskSpec> {
    let mut builder = TaskSpec::builder(label("bwa_index", fa)).input(fa);
    for artifact in index_artifacts(fa) {
        builder = builder.output(artifact);
    }
    builder
        .resources(Resources::new(8, "16g", "48:00:00"))
        .command(format!("bwa index {}", fa.display()))
        .build()
}

/// Sequence dictionary for the reference. HaplotypeCaller needs this file.
pub fn picard_dict(fa: &Path) -> Result<TaskSpec> {
    let dict = dict_path(fa);
    TaskSpec::builder(label("picard_dict", &dict))
        .input(fa)
        .output(&dict)
        .resources(Resources::new(4, "8g", "12:00:00"))
        .command(format!(
            "java -jar ./libexec/picard/picard.jar CreateSequenceDictionary R={} O={}",
            fa.display(),
            dict.display()
        ))
        .build()
}

/// FASTA index for the reference. HaplotypeCaller needs this file.
pub fn samtools_faidx(fa: &Path) -> Result<TaskSpec> {
    let fai = fai_path(fa);
    TaskSpec::builder(label("samtools_faidx", &fai))
        .input(fa)
        .output(&fai)
        .resources(Resources::new(4, "8g", "12:00:00"))
        .command(format!("samtools faidx {}", fa.display()))
        .build()
}

/// Map paired short reads against the reference.
///
/// The command only names the FASTA, but `bwa mem` reads the five on-disk
/// index artifacts next to it; those are declared as first-class inputs so
/// the graph sees the dependency on [`bwa_index`].
pub fn bwa_map(fa: &Path, fq1: &Path, fq2: &Path, bam: &Path) -> Result<TaskSpec> {
    TaskSpec::builder(label("bwa_map", bam))
        .input(fa)
        .inputs(index_artifacts(fa))
        .input(fq1)
        .input(fq2)
        .output(bam)
        .resources(Resources::new(12, "16g", "96:00:00"))
        .command(format!(
            "bwa mem {} {} {} | samtools view -Sb > {}",
            fa.display(),
            fq1.display(),
            fq2.display(),
            bam.display()
        ))
        .build()
}

/// Tag an alignment with read-group metadata for `sample`.
///
/// The sample name is not a file; it travels in the task label and command
/// rather than in the input list, so the Missing-Input check only ever sees
/// real paths.
pub fn picard_read_groups(
    mapped: &Path,
    fa: &Path,
    rgroup: &Path,
    sample: &str,
) -> Result<TaskSpec> {
    if sample.trim().is_empty() {
        return Err(GenopipeError::Definition(
            "picard_read_groups requires a non-empty sample name".to_string(),
        ));
    }
    TaskSpec::builder(label("picard_read_groups", rgroup))
        .input(mapped)
        .input(fa)
        .output(rgroup)
        .resources(Resources::new(8, "8g", "24:00:00"))
        .command(format!(
            "java -jar ./libexec/picard/picard.jar AddOrReplaceReadGroups \
             I={} O={} RGLB=lib1 RGPL=illumina RGPU=unit1 RGSM={} R={} CREATE_INDEX=true",
            mapped.display(),
            rgroup.display(),
            sample,
            fa.display()
        ))
        .build()
}

/// Coordinate-sort an alignment.
pub fn picard_sort(rgroup: &Path, sorted: &Path) -> Result<TaskSpec> {
    TaskSpec::builder(label("picard_sort", sorted))
        .input(rgroup)
        .output(sorted)
        .resources(Resources::new(8, "64g", "24:00:00"))
        .command(format!(
            "java -jar ./libexec/picard/picard.jar SortSam I={} O={} SORT_ORDER=coordinate",
            rgroup.display(),
            sorted.display()
        ))
        .build()
}

/// Mark duplicate reads. One task, two outputs (deduplicated alignment plus
/// a metrics report).
pub fn picard_mark_duplicates(sorted: &Path, dedup: &Path, metrics: &Path) -> Result<TaskSpec> {
    TaskSpec::builder(label("picard_mark_duplicates", dedup))
        .input(sorted)
        .output(dedup)
        .output(metrics)
        .resources(Resources::new(8, "32g", "24:00:00"))
        .command(format!(
            "java -jar ./libexec/picard/picard.jar MarkDuplicates I={} O={} M={}",
            sorted.display(),
            dedup.display(),
            metrics.display()
        ))
        .build()
}

/// Per-sample variant calling; emits a gvcf plus its `.tbi` index.
///
/// The `.fai` and `.dict` sidecars of the reference are declared as inputs
/// because HaplotypeCaller refuses to run without them.
pub fn gatk_haplotype_caller(fa: &Path, bam: &Path, gvcf: &Path) -> Result<TaskSpec> {
    let tbi = with_appended_suffix(gvcf, "tbi");
    TaskSpec::builder(label("gatk_haplotype_caller", gvcf))
        .input(fa)
        .input(fai_path(fa))
        .input(dict_path(fa))
        .input(bam)
        .output(gvcf)
        .output(&tbi)
        .resources(Resources::new(16, "16g", "120:00:00"))
        .command(format!(
            "gatk --java-options '-Xmx16g' HaplotypeCaller -R {} -I {} -O {} -ERC GVCF",
            fa.display(),
            bam.display(),
            gvcf.display()
        ))
        .build()
}

/// Write the cohort manifest: one `sample<TAB>gvcf-path` line per entry, in
/// entry order. Accepts zero or more entries; every gvcf is a distinct
/// dependency edge.
///
/// The manifest is written with plain `printf` redirection, so its content
/// is a pure function of the factory arguments.
pub fn gvcf_list(entries: &[(String, PathBuf)], tsv: &Path) -> Result<TaskSpec> {
    let mut builder = TaskSpec::builder(label("gvcf_list", tsv));
    // Truncate first so zero entries still yield a (empty) manifest.
    let mut parts = vec![format!(": > {}", tsv.display())];

    for (sample, gvcf) in entries {
        if sample.trim().is_empty() {
            return Err(GenopipeError::Definition(format!(
                "gvcf_list entry for '{}' has an empty sample name",
                gvcf.display()
            )));
        }
        builder = builder.input(gvcf);
        parts.push(format!(
            "printf '%s\\t%s\\n' '{}' '{}' >> {}",
            sample,
            gvcf.display(),
            tsv.display()
        ));
    }

    builder
        .output(tsv)
        .resources(Resources::new(2, "4g", "1:00:00"))
        .command(parts.join(" && "))
        .build()
}

/// Combine per-sample gvcfs into a GenomicsDB workspace.
///
/// Consumes the manifest, not the gvcfs it lists; staleness of an individual
/// gvcf reaches this task through the manifest's mtime, because [`gvcf_list`]
/// declares every gvcf as an input.
pub fn gatk_genomicsdb_import(tsv: &Path, workspace: &Path, intervals: &[String]) -> Result<TaskSpec> {
    if intervals.is_empty() {
        return Err(GenopipeError::Definition(
            "gatk_genomicsdb_import requires at least one genomic interval".to_string(),
        ));
    }
    let interval_flags = intervals
        .iter()
        .map(|i| format!("-L {i}"))
        .collect::<Vec<_>>()
        .join(" ");

    TaskSpec::builder(label("gatk_genomicsdb_import", workspace))
        .input(tsv)
        .output(workspace)
        .resources(Resources::new(16, "16g", "120:00:00"))
        .command(format!(
            "gatk --java-options '-Xmx16g -Xms16g' GenomicsDBImport \
             --sample-name-map {} --genomicsdb-workspace-path {} {}",
            tsv.display(),
            workspace.display(),
            interval_flags
        ))
        .build()
}

/// Joint genotyping across the cohort; the final stage.
pub fn gatk_genotype_gvcfs(fa: &Path, workspace: &Path, vcf: &Path) -> Result<TaskSpec> {
    TaskSpec::builder(label("gatk_genotype_gvcfs", vcf))
        .input(fa)
        .input(workspace)
        .output(vcf)
        .resources(Resources::new(16, "16g", "120:00:00"))
        .command(format!(
            "gatk --java-options '-Xmx16g' GenotypeGVCFs -R {} -V gendb://{} -O {}",
            fa.display(),
            workspace.display(),
            vcf.display()
        ))
        .build()
}
