// tests/runtime_fake_executor.rs

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use genopipe::dag::{PipelineGraph, Scheduler};
use genopipe::engine::{CoreRuntime, Runtime};
use genopipe::fs::mock::MockFileSystem;
use genopipe::fs::FileSystem;
use genopipe::pipeline;
use genopipe::report::{RunReport, TaskStatus};
use genopipe::task::TaskSpec;
use genopipe_test_utils::builders::{SampleSheetBuilder, TaskSpecBuilder};
use genopipe_test_utils::fake_executor::FakeExecutor;
use genopipe_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

/// Run the full event loop once over a mock filesystem, with the given task
/// names reporting a non-zero exit. Returns the report plus the execution
/// order the fake executor saw.
async fn run_once(
    specs: Vec<TaskSpec>,
    fs: Arc<MockFileSystem>,
    failing: &[&str],
) -> Result<(RunReport, Vec<String>), Box<dyn Error>> {
    let graph = PipelineGraph::build(specs)?;
    let fs_handle: Arc<dyn FileSystem> = fs.clone();
    let scheduler = Scheduler::new(graph, fs_handle);

    let (tx, rx) = mpsc::channel(64);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(tx, Arc::clone(&executed), Arc::clone(&fs));
    for name in failing {
        executor = executor.fail_task(name);
    }

    let runtime = Runtime::new(CoreRuntime::new(scheduler), rx, executor);
    let report = runtime.run().await?;

    let order = executed.lock().unwrap().clone();
    Ok((report, order))
}

fn chain_specs() -> Vec<TaskSpec> {
    vec![
        TaskSpecBuilder::new("root")
            .input("seed.txt")
            .output("a.txt")
            .build(),
        TaskSpecBuilder::new("mid")
            .input("a.txt")
            .output("b.txt")
            .build(),
        TaskSpecBuilder::new("leaf")
            .input("b.txt")
            .output("c.txt")
            .build(),
    ]
}

#[tokio::test]
async fn chain_executes_in_dependency_order() -> TestResult {
    init_tracing();
    with_timeout(async {
        let fs = Arc::new(MockFileSystem::new());
        fs.touch("seed.txt");

        let (report, order) = run_once(chain_specs(), Arc::clone(&fs), &[]).await?;

        assert_eq!(order, vec!["root", "mid", "leaf"]);
        assert!(report.is_success());
        assert_eq!(report.executed(), 3);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn second_run_skips_everything() -> TestResult {
    init_tracing();
    with_timeout(async {
        let fs = Arc::new(MockFileSystem::new());
        fs.touch("seed.txt");

        let (first, _) = run_once(chain_specs(), Arc::clone(&fs), &[]).await?;
        assert_eq!(first.executed(), 3);

        let (second, order) = run_once(chain_specs(), Arc::clone(&fs), &[]).await?;
        assert!(order.is_empty(), "re-run executed {order:?}");
        assert!(second.is_success());
        assert_eq!(second.skipped(), 3);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn failure_cancels_dependents_but_not_siblings() -> TestResult {
    init_tracing();
    with_timeout(async {
        let mut specs = chain_specs();
        specs.push(TaskSpecBuilder::new("bystander").output("d.txt").build());

        let fs = Arc::new(MockFileSystem::new());
        fs.touch("seed.txt");

        let (report, order) = run_once(specs, Arc::clone(&fs), &["mid"]).await?;

        assert_eq!(report.status_of("root"), Some(&TaskStatus::Succeeded));
        assert!(matches!(
            report.status_of("mid"),
            Some(TaskStatus::Failed(reason)) if reason.contains("exited with code 1")
        ));
        assert_eq!(report.status_of("leaf"), Some(&TaskStatus::Cancelled));
        assert_eq!(report.status_of("bystander"), Some(&TaskStatus::Succeeded));

        assert!(!order.contains(&"leaf".to_string()));
        assert!(!report.is_success());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_external_input_fails_its_subgraph_only() -> TestResult {
    init_tracing();
    with_timeout(async {
        let mut specs = chain_specs();
        specs.push(TaskSpecBuilder::new("bystander").output("d.txt").build());

        // seed.txt deliberately absent.
        let fs = Arc::new(MockFileSystem::new());

        let (report, order) = run_once(specs, Arc::clone(&fs), &[]).await?;

        assert!(matches!(
            report.status_of("root"),
            Some(TaskStatus::Failed(reason)) if reason.contains("seed.txt")
        ));
        assert_eq!(report.status_of("mid"), Some(&TaskStatus::Cancelled));
        assert_eq!(report.status_of("leaf"), Some(&TaskStatus::Cancelled));
        assert_eq!(report.status_of("bystander"), Some(&TaskStatus::Succeeded));

        assert_eq!(order, vec!["bystander"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn deleted_index_artifact_reruns_only_its_subgraph() -> TestResult {
    init_tracing();
    with_timeout(async {
        let sheet = SampleSheetBuilder::new("ref.fa")
            .output_dir("out")
            .sample("A", "reads/A_1.fq", "reads/A_2.fq")
            .build();

        let fs = Arc::new(MockFileSystem::new());
        fs.touch("ref.fa");
        fs.touch("reads/A_1.fq");
        fs.touch("reads/A_2.fq");

        let (first, _) = run_once(pipeline::assemble(&sheet)?, Arc::clone(&fs), &[]).await?;
        assert!(first.is_success());
        assert_eq!(first.executed(), 11);

        // Losing one bwa artifact makes bwa_index stale; the fresh artifacts
        // then ripple through the alignment chain, the manifest and the
        // cohort stages. The other two reference stages stay untouched.
        fs.remove("ref.fa.amb");
        let (second, order) = run_once(pipeline::assemble(&sheet)?, Arc::clone(&fs), &[]).await?;

        assert!(second.is_success());
        assert_eq!(second.executed(), 9, "executed: {order:?}");
        assert_eq!(
            second.status_of("picard_dict:ref.dict"),
            Some(&TaskStatus::UpToDate)
        );
        assert_eq!(
            second.status_of("samtools_faidx:ref.fa.fai"),
            Some(&TaskStatus::UpToDate)
        );
        assert_eq!(order[0], "bwa_index:ref.fa");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn fully_up_to_date_pipeline_finishes_without_events() -> TestResult {
    init_tracing();
    with_timeout(async {
        let fs = Arc::new(MockFileSystem::new());
        fs.touch("seed.txt");
        fs.touch("a.txt");
        fs.touch("b.txt");
        fs.touch("c.txt");

        let (report, order) = run_once(chain_specs(), Arc::clone(&fs), &[]).await?;

        assert!(order.is_empty());
        assert!(report.is_success());
        assert_eq!(report.skipped(), 3);
        Ok(())
    })
    .await
}
