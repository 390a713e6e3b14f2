//! `relaxbench stream`

use anyhow::{Context, Result};
use clap::Args;
use relax_core::BufferKind;
use relax_harness::config::OutputFormat;
use relax_harness::{bandwidth_series, measure_stream, HarnessConfig};
use std::path::PathBuf;
use tracing::{error, info};

use super::{open_sink, parse_format};

#[derive(Args, Debug)]
pub struct StreamCommand {
    /// Buffer lengths
    #[arg(long, value_delimiter = ',', value_name = "M,...")]
    pub sizes: Option<Vec<usize>>,

    /// Buffer representations (vec, ndarray)
    #[arg(long, value_delimiter = ',', value_name = "KIND,...")]
    pub kinds: Option<Vec<String>>,

    /// Multiplier for Scale and Triad
    #[arg(long, value_name = "S")]
    pub scalar: Option<f64>,

    /// Output file for results
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (json, csv)
    #[arg(long, value_parser = parse_format, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl StreamCommand {
    pub fn execute(&self, config: &HarnessConfig) -> Result<()> {
        let sizes = self.sizes.clone().unwrap_or_else(|| config.stream.sizes.clone());
        let kinds: Vec<BufferKind> = match &self.kinds {
            Some(names) => names
                .iter()
                .map(|n| n.parse())
                .collect::<relax_core::Result<_>>()
                .context("Invalid buffer kind")?,
            None => config.stream.buffer_kinds.clone(),
        };
        let scalar = self.scalar.unwrap_or(config.stream.scalar);

        let samples = measure_stream(&kinds, &sizes, scalar)?;

        for series in bandwidth_series(&samples) {
            info!(series = %series.label, points = ?series.points, "bandwidth [GB/s] by size");
        }

        let written = open_sink(config, "stream", self.output.as_deref(), self.format)
            .and_then(|mut sink| Ok(sink.write_bandwidth(&samples)?));
        if let Err(e) = written {
            error!("Failed to write results: {e:#}");
            println!("{}", serde_json::to_string_pretty(&samples)?);
            return Err(e);
        }
        Ok(())
    }
}
