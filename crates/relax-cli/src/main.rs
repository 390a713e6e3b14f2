//! relaxbench CLI
//!
//! Times stencil backends and STREAM kernels across problem sizes, checks
//! that backends agree, and writes one example result field.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relax_harness::HarnessConfig;
use std::path::PathBuf;
use tracing::error;

mod commands;

use commands::{
    BackendsCommand, SnapshotCommand, StencilCommand, StreamCommand, ValidateCommand,
};

#[derive(Parser)]
#[command(name = "relaxbench")]
#[command(about = "Benchmark and cross-validate Jacobi stencil and STREAM backends")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<String>,

    /// Expose the host-emulated accelerator
    #[arg(long, global = true)]
    accelerator: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time chained relaxation sweeps per backend and size
    Stencil(StencilCommand),

    /// Measure STREAM bandwidth per buffer kind and size
    Stream(StreamCommand),

    /// Check every backend against the scalar reference
    Validate(ValidateCommand),

    /// Relax a field and store it under /<backend>/x
    Snapshot(SnapshotCommand),

    /// List registered backends
    Backends(BackendsCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_configuration(&cli)?;
    setup_logging(&config, cli.log_level.as_deref(), cli.log_format.as_deref());
    if cli.accelerator {
        config.accelerator.enabled = true;
    }

    let result = match cli.command {
        Commands::Stencil(cmd) => cmd.execute(&config),
        Commands::Stream(cmd) => cmd.execute(&config),
        Commands::Validate(cmd) => cmd.execute(&config),
        Commands::Snapshot(cmd) => cmd.execute(&config),
        Commands::Backends(cmd) => cmd.execute(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        let mut source = e.source();
        while let Some(err) = source {
            error!("  Caused by: {}", err);
            source = err.source();
        }
        std::process::exit(1);
    }

    Ok(())
}

fn load_configuration(cli: &Cli) -> Result<HarnessConfig> {
    match &cli.config {
        Some(path) => HarnessConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(HarnessConfig::default()),
    }
}

fn setup_logging(config: &HarnessConfig, level: Option<&str>, format: Option<&str>) {
    let level = level.unwrap_or(&config.logging.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format.unwrap_or(&config.logging.format) {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}
