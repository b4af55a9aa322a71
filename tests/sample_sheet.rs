// tests/sample_sheet.rs

use std::error::Error;
use std::path::PathBuf;

use tempfile::TempDir;

use genopipe::config::{load_and_validate, load_from_path, SampleSheet};
use genopipe::errors::GenopipeError;

type TestResult = Result<(), Box<dyn Error>>;

const FULL_SHEET: &str = r#"
[reference]
fasta = "ref/genome.fa"

[output]
dir = "out"

[cohort]
intervals = ["chr1", "chr2"]
vcf = "out/joint.vcf.gz"

[sample.A]
fastq1 = "reads/A_1.fq"
fastq2 = "reads/A_2.fq"

[sample.B]
fastq1 = "reads/B_1.fq"
fastq2 = "reads/B_2.fq"
"#;

fn write_sheet(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("Genopipe.toml");
    std::fs::write(&path, contents).expect("write sample sheet");
    path
}

#[test]
fn full_sheet_round_trips() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_sheet(&dir, FULL_SHEET);

    let sheet = load_and_validate(&path)?;

    assert_eq!(sheet.reference.fasta, PathBuf::from("ref/genome.fa"));
    assert_eq!(sheet.output.dir, PathBuf::from("out"));
    assert_eq!(sheet.cohort.intervals, vec!["chr1", "chr2"]);
    assert_eq!(sheet.cohort.vcf, Some(PathBuf::from("out/joint.vcf.gz")));
    assert_eq!(
        sheet.sample.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["A", "B"],
        "samples iterate in name order"
    );
    assert_eq!(sheet.sample["A"].fastq1, PathBuf::from("reads/A_1.fq"));
    Ok(())
}

#[test]
fn output_dir_defaults_to_results() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_sheet(
        &dir,
        r#"
[reference]
fasta = "ref.fa"

[cohort]
intervals = ["chr1"]

[sample.A]
fastq1 = "a_1.fq"
fastq2 = "a_2.fq"
"#,
    );

    let sheet = load_and_validate(&path)?;
    assert_eq!(sheet.output.dir, PathBuf::from("results"));
    assert_eq!(sheet.cohort.vcf, None);
    Ok(())
}

#[test]
fn sheet_without_samples_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_sheet(
        &dir,
        r#"
[reference]
fasta = "ref.fa"

[cohort]
intervals = ["chr1"]
"#,
    );

    // Deserialization succeeds; validation is what rejects it.
    let raw = load_from_path(&path)?;
    match SampleSheet::try_from(raw) {
        Err(GenopipeError::Config(msg)) => assert!(msg.contains("at least one"), "{msg}"),
        other => panic!("expected Config error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn empty_interval_list_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_sheet(
        &dir,
        r#"
[reference]
fasta = "ref.fa"

[cohort]
intervals = []

[sample.A]
fastq1 = "a_1.fq"
fastq2 = "a_2.fq"
"#,
    );

    match load_and_validate(&path) {
        Err(GenopipeError::Config(msg)) => assert!(msg.contains("interval"), "{msg}"),
        other => panic!("expected Config error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn blank_interval_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_sheet(
        &dir,
        r#"
[reference]
fasta = "ref.fa"

[cohort]
intervals = ["chr1", "  "]

[sample.A]
fastq1 = "a_1.fq"
fastq2 = "a_2.fq"
"#,
    );

    assert!(matches!(
        load_and_validate(&path),
        Err(GenopipeError::Config(_))
    ));
    Ok(())
}

#[test]
fn malformed_toml_is_a_parse_error() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_sheet(&dir, "[reference\nfasta = ");

    assert!(matches!(
        load_from_path(&path),
        Err(GenopipeError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_from_path("/nonexistent/Genopipe.toml"),
        Err(GenopipeError::IoError(_))
    ));
}
