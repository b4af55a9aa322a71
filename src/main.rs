// src/main.rs

use genopipe::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(report) if report.is_success() => {}
        Ok(report) => {
            eprintln!("genopipe: pipeline finished with failures ({report})");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("genopipe error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<genopipe::report::RunReport> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    Ok(run(args).await?)
}
