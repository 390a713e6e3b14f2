//! `relaxbench stencil`

use anyhow::{Context, Result};
use clap::Args;
use relax_harness::config::OutputFormat;
use relax_harness::{
    measure_stencil, resolve_backends, timing_series, FieldInit, HarnessConfig, LegacyTable,
};
use std::path::PathBuf;
use tracing::{error, info};

use super::{open_sink, parse_format};

#[derive(Args, Debug)]
pub struct StencilCommand {
    /// Problem sizes (field side N)
    #[arg(long, value_delimiter = ',', value_name = "N,...")]
    pub sizes: Option<Vec<usize>>,

    /// Chained sweeps per backend and size
    #[arg(long, value_name = "N")]
    pub iterations: Option<usize>,

    /// Backends to time, by registration name
    #[arg(long, value_delimiter = ',', value_name = "NAME,...")]
    pub backends: Option<Vec<String>>,

    /// Seed for the random starting fields
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Starting field (random, ones, zeros)
    #[arg(long, default_value = "random", value_name = "INIT")]
    pub init: String,

    /// Append the archived accelerator timings to the output
    #[arg(long)]
    pub include_legacy: bool,

    /// Output file for results
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (json, csv)
    #[arg(long, value_parser = parse_format, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl StencilCommand {
    pub fn execute(&self, config: &HarnessConfig) -> Result<()> {
        let sizes = self.sizes.clone().unwrap_or_else(|| config.stencil.sizes.clone());
        let iterations = self.iterations.unwrap_or(config.stencil.iterations);
        let names = self
            .backends
            .clone()
            .unwrap_or_else(|| config.stencil.backends.clone());
        let seed = self.seed.or(config.stencil.seed);
        let init = match self.init.as_str() {
            "random" => FieldInit::Random { seed },
            "ones" => FieldInit::Ones,
            "zeros" => FieldInit::Zeros,
            other => anyhow::bail!("Invalid init: {other}. Must be one of: random, ones, zeros"),
        };

        // Accelerator availability is checked here, before any timing
        let backends = resolve_backends(&names, &config.accelerator)
            .context("Failed to set up backends")?;

        let mut samples = measure_stencil(&backends, &sizes, iterations, init)?;

        if self.include_legacy {
            let table = match &config.stencil.legacy_table {
                Some(path) => LegacyTable::from_file(path).with_context(|| {
                    format!("Failed to load legacy table from {}", path.display())
                })?,
                None => LegacyTable::builtin(),
            };
            samples.extend(table.samples());
        }

        for series in timing_series(&samples) {
            info!(backend = %series.label, points = ?series.points, "runtime [s] by size");
        }

        let written = open_sink(config, "stencil", self.output.as_deref(), self.format)
            .and_then(|mut sink| Ok(sink.write_timings(&samples)?));
        if let Err(e) = written {
            // Keep the samples even when the requested sink fails
            error!("Failed to write results: {e:#}");
            println!("{}", serde_json::to_string_pretty(&samples)?);
            return Err(e);
        }
        Ok(())
    }
}
