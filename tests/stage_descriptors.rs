// tests/stage_descriptors.rs

use std::path::{Path, PathBuf};

use genopipe::errors::GenopipeError;
use genopipe::stages;
use genopipe::task::{Resources, TaskSpec};

fn fa() -> PathBuf {
    PathBuf::from("ref/genome.fa")
}

#[test]
fn bwa_index_produces_five_sibling_artifacts() {
    let spec = stages::bwa_index(&fa()).unwrap();

    assert_eq!(spec.inputs(), &[fa()]);
    assert_eq!(
        spec.outputs(),
        &[
            PathBuf::from("ref/genome.fa.amb"),
            PathBuf::from("ref/genome.fa.ann"),
            PathBuf::from("ref/genome.fa.bwt"),
            PathBuf::from("ref/genome.fa.pac"),
            PathBuf::from("ref/genome.fa.sa"),
        ]
    );
    assert_eq!(spec.resources().cores, 8);
    assert_eq!(spec.resources().memory, "16g");
    assert_eq!(spec.resources().walltime, "48:00:00");
    assert_eq!(spec.command(), "bwa index ref/genome.fa");
}

#[test]
fn factories_are_referentially_transparent() {
    assert_eq!(
        stages::bwa_index(&fa()).unwrap(),
        stages::bwa_index(&fa()).unwrap()
    );
    assert_eq!(
        stages::gatk_haplotype_caller(&fa(), Path::new("a.bam"), Path::new("a.g.vcf.gz")).unwrap(),
        stages::gatk_haplotype_caller(&fa(), Path::new("a.bam"), Path::new("a.g.vcf.gz")).unwrap(),
    );
}

#[test]
fn bwa_map_declares_index_artifacts_as_inputs() {
    let spec = stages::bwa_map(
        &fa(),
        Path::new("reads/a_1.fq"),
        Path::new("reads/a_2.fq"),
        Path::new("out/a.bam"),
    )
    .unwrap();

    // fasta + 5 index artifacts + two fastqs.
    assert_eq!(spec.inputs().len(), 8);
    for artifact in stages::index_artifacts(&fa()) {
        assert!(spec.inputs().contains(&artifact), "missing {artifact:?}");
    }
    assert!(spec.inputs().contains(&PathBuf::from("reads/a_1.fq")));
    assert!(spec.inputs().contains(&PathBuf::from("reads/a_2.fq")));

    // The command never names the artifacts; the dependency is on-disk only.
    assert!(!spec.command().contains(".amb"));
    assert_eq!(spec.outputs(), &[PathBuf::from("out/a.bam")]);
}

#[test]
fn mark_duplicates_declares_both_outputs() {
    let spec = stages::picard_mark_duplicates(
        Path::new("a.sorted.bam"),
        Path::new("a.dedup.bam"),
        Path::new("a.metrics.txt"),
    )
    .unwrap();

    assert_eq!(
        spec.outputs(),
        &[PathBuf::from("a.dedup.bam"), PathBuf::from("a.metrics.txt")]
    );
}

#[test]
fn haplotype_caller_depends_on_reference_sidecars() {
    let spec =
        stages::gatk_haplotype_caller(&fa(), Path::new("a.dedup.bam"), Path::new("a.g.vcf.gz"))
            .unwrap();

    assert_eq!(
        spec.inputs(),
        &[
            fa(),
            PathBuf::from("ref/genome.fa.fai"),
            PathBuf::from("ref/genome.dict"),
            PathBuf::from("a.dedup.bam"),
        ]
    );
    assert_eq!(
        spec.outputs(),
        &[PathBuf::from("a.g.vcf.gz"), PathBuf::from("a.g.vcf.gz.tbi")]
    );
}

#[test]
fn read_groups_carries_sample_in_command_not_inputs() {
    let spec =
        stages::picard_read_groups(Path::new("a.bam"), &fa(), Path::new("a.rg.bam"), "sampleA")
            .unwrap();

    assert!(spec.command().contains("RGSM=sampleA"));
    // Only real paths in the input list.
    assert_eq!(spec.inputs(), &[PathBuf::from("a.bam"), fa()]);
}

#[test]
fn read_groups_rejects_empty_sample_name() {
    let err = stages::picard_read_groups(Path::new("a.bam"), &fa(), Path::new("a.rg.bam"), "  ")
        .unwrap_err();
    assert!(matches!(err, GenopipeError::Definition(_)), "{err}");
}

#[test]
fn gvcf_list_accepts_zero_entries() {
    let spec = stages::gvcf_list(&[], Path::new("out/sample_map.tsv")).unwrap();

    assert!(spec.inputs().is_empty());
    assert_eq!(spec.outputs(), &[PathBuf::from("out/sample_map.tsv")]);
    // Still truncates/creates the manifest.
    assert_eq!(spec.command(), ": > out/sample_map.tsv");
}

#[test]
fn gvcf_list_preserves_entry_order() {
    let entries = vec![
        ("beta".to_string(), PathBuf::from("out/beta.g.vcf.gz")),
        ("alpha".to_string(), PathBuf::from("out/alpha.g.vcf.gz")),
        ("gamma".to_string(), PathBuf::from("out/gamma.g.vcf.gz")),
    ];
    let spec = stages::gvcf_list(&entries, Path::new("out/sample_map.tsv")).unwrap();

    let expected_inputs: Vec<PathBuf> = entries.iter().map(|(_, p)| p.clone()).collect();
    assert_eq!(spec.inputs(), expected_inputs.as_slice());

    // One manifest line per entry, in entry order.
    let cmd = spec.command();
    let beta = cmd.find("'beta'").unwrap();
    let alpha = cmd.find("'alpha'").unwrap();
    let gamma = cmd.find("'gamma'").unwrap();
    assert!(beta < alpha && alpha < gamma);
}

#[test]
fn gvcf_list_rejects_empty_sample_name() {
    let entries = vec![("".to_string(), PathBuf::from("a.g.vcf.gz"))];
    let err = stages::gvcf_list(&entries, Path::new("sample_map.tsv")).unwrap_err();
    assert!(matches!(err, GenopipeError::Definition(_)), "{err}");
}

#[test]
fn genomicsdb_import_requires_intervals() {
    let err =
        stages::gatk_genomicsdb_import(Path::new("sample_map.tsv"), Path::new("db"), &[])
            .unwrap_err();
    assert!(matches!(err, GenopipeError::Definition(_)), "{err}");

    let intervals = vec!["chr1".to_string(), "chr2".to_string()];
    let spec =
        stages::gatk_genomicsdb_import(Path::new("sample_map.tsv"), Path::new("db"), &intervals)
            .unwrap();
    assert!(spec.command().contains("-L chr1 -L chr2"));
    // Consumes the manifest, not the gvcfs it lists.
    assert_eq!(spec.inputs(), &[PathBuf::from("sample_map.tsv")]);
    assert_eq!(spec.outputs(), &[PathBuf::from("db")]);
}

#[test]
fn task_spec_requires_outputs() {
    let err = TaskSpec::builder("no_outputs")
        .input("in.txt")
        .resources(Resources::new(1, "1g", "0:10:00"))
        .command("true")
        .build()
        .unwrap_err();
    assert!(matches!(err, GenopipeError::Definition(_)), "{err}");
}

#[test]
fn task_spec_validates_resources() {
    let base = || {
        TaskSpec::builder("t")
            .output("out.txt")
            .command("true")
    };

    assert!(base()
        .resources(Resources::new(0, "1g", "0:10:00"))
        .build()
        .is_err());
    assert!(base()
        .resources(Resources::new(1, "sixteen gigs", "0:10:00"))
        .build()
        .is_err());
    assert!(base()
        .resources(Resources::new(1, "1g", "soon"))
        .build()
        .is_err());
    assert!(base()
        .resources(Resources::new(1, "16g", "120:00:00"))
        .build()
        .is_ok());
}
