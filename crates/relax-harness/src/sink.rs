//! Result export: sample tables, plot series and field snapshots
//!
//! Rendering plots is left to external tools; this module produces the data
//! they consume.

use relax_core::{BandwidthSample, Field, RelaxError, Result, TimingSample};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Consumer of finished measurements.
pub trait ResultSink {
    fn write_timings(&mut self, samples: &[TimingSample]) -> Result<()>;

    fn write_bandwidth(&mut self, samples: &[BandwidthSample]) -> Result<()>;
}

/// Writes samples as a pretty-printed JSON array.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)
            .map_err(|e| RelaxError::Serialization(e.to_string()))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn write_timings(&mut self, samples: &[TimingSample]) -> Result<()> {
        self.write_json(&samples)
    }

    fn write_bandwidth(&mut self, samples: &[BandwidthSample]) -> Result<()> {
        self.write_json(&samples)
    }
}

/// Writes samples as CSV with a header row.
pub struct CsvSink<W: Write> {
    out: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write_timings(&mut self, samples: &[TimingSample]) -> Result<()> {
        writeln!(self.out, "backend,size,elapsed_seconds")?;
        for s in samples {
            writeln!(self.out, "{},{},{:e}", s.backend, s.size, s.elapsed_seconds)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_bandwidth(&mut self, samples: &[BandwidthSample]) -> Result<()> {
        writeln!(
            self.out,
            "op,buffer_kind,size,bytes_per_iteration,elapsed_seconds,bandwidth_gb_s"
        )?;
        for s in samples {
            writeln!(
                self.out,
                "{},{},{},{},{:e},{}",
                s.op,
                s.buffer_kind,
                s.size,
                s.bytes_per_iteration,
                s.elapsed_seconds,
                s.gigabytes_per_second()
                    .map(|g| format!("{g:.3}"))
                    .unwrap_or_default()
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// One plot series: `(size, value)` points for a single label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(usize, f64)>,
}

/// Group timings into one series per backend, in first-seen order.
pub fn timing_series(samples: &[TimingSample]) -> Vec<Series> {
    group_series(
        samples
            .iter()
            .map(|s| (s.backend.clone(), s.size, s.elapsed_seconds)),
    )
}

/// Group bandwidths (GB/s) into one series per `kind/op`.
///
/// Samples without a measurable elapsed time are skipped; a log-scale axis
/// has no place for them.
pub fn bandwidth_series(samples: &[BandwidthSample]) -> Vec<Series> {
    group_series(samples.iter().filter_map(|s| {
        s.gigabytes_per_second()
            .map(|g| (format!("{}/{}", s.buffer_kind, s.op), s.size, g))
    }))
}

fn group_series(items: impl Iterator<Item = (String, usize, f64)>) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for (label, size, value) in items {
        match series.iter_mut().find(|s| s.label == label) {
            Some(s) => s.points.push((size, value)),
            None => series.push(Series {
                label,
                points: vec![(size, value)],
            }),
        }
    }
    series
}

/// Fields stored under hierarchical dataset keys such as `/scalar/x`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStore {
    datasets: BTreeMap<String, Field>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dataset key for a backend's result field
    pub fn key_for(backend: &str) -> String {
        format!("/{backend}/x")
    }

    /// Store `field` under `/<backend>/x`, returning the key.
    pub fn insert(&mut self, backend: &str, field: Field) -> String {
        let key = Self::key_for(backend);
        self.datasets.insert(key.clone(), field);
        key
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.datasets.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| RelaxError::Serialization(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| RelaxError::Serialization(e.to_string()))
    }
}
