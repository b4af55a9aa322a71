//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `genopipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "genopipe",
    version,
    about = "Run a variant-calling pipeline as a file-dependency task graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the sample sheet (TOML).
    ///
    /// Default: `Genopipe.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Genopipe.toml")]
    pub config: String,

    /// Core-count ceiling for concurrently running tasks.
    ///
    /// If omitted, the machine's available parallelism is used.
    #[arg(long, value_name = "N")]
    pub cores: Option<u32>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GENOPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the task graph and per-task staleness, but
    /// don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
