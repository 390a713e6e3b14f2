//! Archived accelerator timings shown next to fresh measurements.
//!
//! These numbers come from an earlier run of 1000 chained sweeps on a GPU
//! and cannot be recomputed here. They are merged into plots as-is.

use relax_core::{RelaxError, Result, TimingSample};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One archived backend: total seconds per problem size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRow {
    pub backend: String,
    pub seconds: Vec<f64>,
}

/// Archived timings, rows = backend, columns = problem size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTable {
    pub sizes: Vec<usize>,
    pub rows: Vec<LegacyRow>,
}

impl LegacyTable {
    /// The table recorded with the original accelerator runs.
    pub fn builtin() -> Self {
        Self {
            sizes: vec![3, 10, 100, 1000],
            rows: vec![
                LegacyRow {
                    backend: "torch_gauss_seidel".to_string(),
                    seconds: vec![
                        0.004567292000018597,
                        0.10005591799998115,
                        10.13182396900001,
                        1077.561042582,
                    ],
                },
                LegacyRow {
                    backend: "cupy_gauss_seidel".to_string(),
                    seconds: vec![
                        0.045910001999999395,
                        0.048963942000000316,
                        0.08176970499999925,
                        6.6680153939998945,
                    ],
                },
            ],
        }
    }

    /// Load a table from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let table: LegacyTable =
            toml::from_str(&text).map_err(|e| RelaxError::Serialization(e.to_string()))?;
        table.check()?;
        Ok(table)
    }

    fn check(&self) -> Result<()> {
        for row in &self.rows {
            if row.seconds.len() != self.sizes.len() {
                return Err(RelaxError::InvalidArgument(format!(
                    "legacy row '{}' has {} timings for {} sizes",
                    row.backend,
                    row.seconds.len(),
                    self.sizes.len()
                )));
            }
        }
        Ok(())
    }

    /// Flatten into timing samples, row by row.
    pub fn samples(&self) -> Vec<TimingSample> {
        self.rows
            .iter()
            .flat_map(|row| {
                self.sizes
                    .iter()
                    .zip(row.seconds.iter())
                    .map(move |(&size, &secs)| TimingSample::new(row.backend.clone(), size, secs))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_shape() {
        let table = LegacyTable::builtin();
        assert!(table.check().is_ok());
        let samples = table.samples();
        assert_eq!(samples.len(), 8);
        assert_eq!(samples[0].backend, "torch_gauss_seidel");
        assert_eq!(samples[4].backend, "cupy_gauss_seidel");
        assert_eq!(samples[7].size, 1000);
    }

    #[test]
    fn test_from_file_rejects_ragged_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sizes = [3, 10]\n[[rows]]\nbackend = \"old\"\nseconds = [1.0]"
        )
        .unwrap();
        assert!(matches!(
            LegacyTable::from_file(file.path()),
            Err(RelaxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sizes = [3, 10]\n[[rows]]\nbackend = \"old\"\nseconds = [1.0, 2.5]"
        )
        .unwrap();
        let table = LegacyTable::from_file(file.path()).unwrap();
        assert_eq!(table.samples()[1], TimingSample::new("old", 10, 2.5));
    }
}
