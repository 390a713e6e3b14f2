//! Subcommand implementations

mod backends;
mod snapshot;
mod stencil;
mod stream;
mod validate;

pub use backends::BackendsCommand;
pub use snapshot::SnapshotCommand;
pub use stencil::StencilCommand;
pub use stream::StreamCommand;
pub use validate::ValidateCommand;

use anyhow::{Context, Result};
use relax_harness::config::OutputFormat;
use relax_harness::{CsvSink, HarnessConfig, JsonSink, ResultSink};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sink writing to `output`, else `<output.dir>/<stem>.<ext>`, else stdout.
pub(crate) fn open_sink(
    config: &HarnessConfig,
    stem: &str,
    output: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<Box<dyn ResultSink>> {
    let format = format.unwrap_or(config.output.format);
    let ext = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };

    let path: Option<PathBuf> = output
        .map(Path::to_path_buf)
        .or_else(|| config.output.dir.as_ref().map(|d| d.join(format!("{stem}.{ext}"))));

    let writer: Box<dyn Write> = match &path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = std::fs::File::create(p)
                .with_context(|| format!("Failed to create {}", p.display()))?;
            Box::new(std::io::BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonSink::new(writer)),
        OutputFormat::Csv => Box::new(CsvSink::new(writer)),
    })
}

pub(crate) fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s {
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        other => Err(format!("invalid format '{other}', expected json or csv")),
    }
}
