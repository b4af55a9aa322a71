// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod stages;
pub mod stale;
pub mod task;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::dag::{PipelineGraph, Scheduler};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::exec::{Capacity, RealExecutorBackend};
use crate::fs::{FileSystem, RealFileSystem};
use crate::report::RunReport;
use crate::stale::Freshness;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - sample sheet loading
/// - pipeline assembly and graph construction
/// - scheduler / core runtime
/// - executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<RunReport> {
    let config_path = PathBuf::from(&args.config);
    let sheet = load_and_validate(&config_path)?;

    let specs = pipeline::assemble(&sheet)?;
    let graph = PipelineGraph::build(specs)?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    if args.dry_run {
        print_dry_run(&graph, fs.as_ref());
        return Ok(RunReport::default());
    }

    let scheduler = Scheduler::new(graph, fs);

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let capacity = match args.cores {
        Some(cores) => Capacity::new(cores),
        None => Capacity::detect(),
    };

    // Process executor backend (real implementation in production).
    let executor = RealExecutorBackend::new(rt_tx.clone(), capacity);

    // Ctrl-C -> graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // Construct the pure core runtime (single source of truth for semantics)
    // and the async IO shell around it.
    let core = CoreRuntime::new(scheduler);
    let runtime = Runtime::new(core, rt_rx, executor);

    let report = runtime.run().await?;
    info!(%report, "pipeline run complete");
    Ok(report)
}

/// Dry-run output: topological order, dependencies, external inputs,
/// resources, staleness, and the command each task would run.
fn print_dry_run(graph: &PipelineGraph, fs: &dyn FileSystem) {
    println!("genopipe dry-run");
    println!("tasks ({}), in a valid execution order:", graph.len());

    for &id in graph.topo_order() {
        let spec = graph.spec(id);
        let freshness = match stale::evaluate(spec, fs) {
            Ok(Freshness::UpToDate) => "up to date".to_string(),
            Ok(Freshness::Stale(_)) => "stale".to_string(),
            Err(e) => format!("blocked ({e})"),
        };

        println!("  - {} [{}]", spec.name(), freshness);
        println!(
            "      resources: {} cores, {} memory, {} walltime",
            spec.resources().cores,
            spec.resources().memory,
            spec.resources().walltime
        );

        let deps = graph.dependencies_of(id);
        if !deps.is_empty() {
            let names: Vec<_> = deps.iter().map(|&d| graph.name(d)).collect();
            println!("      after: {names:?}");
        }

        let external = graph.external_inputs_of(id);
        if !external.is_empty() {
            println!("      external inputs: {external:?}");
        }

        println!("      cmd: {}", spec.command());
    }
}
