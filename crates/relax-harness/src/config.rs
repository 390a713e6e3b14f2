//! Harness configuration loaded from TOML

use relax_accel::AcceleratorConfig;
use relax_core::{BufferKind, RelaxError, Result, StencilKind, STREAM_SCALAR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration file.
///
/// Every section is optional; missing values fall back to the sizes and
/// counts used for the archived comparison runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub stencil: StencilConfig,
    pub stream: StreamConfig,
    pub accelerator: AcceleratorConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilConfig {
    pub sizes: Vec<usize>,
    /// Chained sweeps per (backend, size)
    pub iterations: usize,
    /// Registration names, e.g. "scalar", "slice", "accelerator"
    pub backends: Vec<String>,
    /// Seed for the random starting fields; unseeded when absent
    pub seed: Option<u64>,
    /// Archived accelerator timings; the built-in table when absent
    pub legacy_table: Option<PathBuf>,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            sizes: vec![3, 10, 100, 1000],
            iterations: 1000,
            backends: [
                StencilKind::Scalar,
                StencilKind::VectorizedSlice,
                StencilKind::CircularShift,
                StencilKind::CompiledUntyped,
                StencilKind::CompiledTyped,
                StencilKind::CompiledTypedShift,
            ]
            .iter()
            .map(|k| k.as_str().to_string())
            .collect(),
            seed: None,
            legacy_table: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub sizes: Vec<usize>,
    pub buffer_kinds: Vec<BufferKind>,
    pub scalar: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10, 100, 10_000],
            buffer_kinds: BufferKind::ALL.to_vec(),
            scalar: STREAM_SCALAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// pretty, compact, json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for result files; stdout when absent
    pub dir: Option<PathBuf>,
    pub format: OutputFormat,
}

impl HarnessConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: HarnessConfig =
            toml::from_str(text).map_err(|e| RelaxError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject plans the harness would refuse anyway, before any timing.
    pub fn validate(&self) -> Result<()> {
        if self.stencil.iterations == 0 {
            return Err(RelaxError::InvalidArgument(
                "stencil.iterations must be at least 1".into(),
            ));
        }
        if let Some(&side) = self.stencil.sizes.iter().find(|&&n| n < 2) {
            return Err(RelaxError::NoInterior { side });
        }
        for name in &self.stencil.backends {
            name.parse::<StencilKind>()?;
        }
        if self.stream.sizes.contains(&0) {
            return Err(RelaxError::EmptyBuffer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_archived_runs() {
        let config = HarnessConfig::default();
        assert_eq!(config.stencil.sizes, vec![3, 10, 100, 1000]);
        assert_eq!(config.stencil.iterations, 1000);
        assert_eq!(config.stream.sizes, vec![10, 100, 10_000]);
        assert_eq!(config.stream.scalar, 3.0);
        assert!(!config.accelerator.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config = HarnessConfig::from_toml_str(
            r#"
            [stencil]
            sizes = [4, 8]
            backends = ["scalar", "accelerator"]

            [stream]
            buffer_kinds = ["nd-array"]

            [accelerator]
            enabled = true

            [output]
            format = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.stencil.sizes, vec![4, 8]);
        assert_eq!(config.stencil.iterations, 1000);
        assert_eq!(config.stream.buffer_kinds, vec![BufferKind::NdArray]);
        assert!(config.accelerator.enabled);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_plans_rejected() {
        assert!(matches!(
            HarnessConfig::from_toml_str("[stencil]\nsizes = [1]"),
            Err(RelaxError::NoInterior { side: 1 })
        ));
        assert!(matches!(
            HarnessConfig::from_toml_str("[stencil]\nbackends = [\"jacobi\"]"),
            Err(RelaxError::UnknownBackend(_))
        ));
        assert!(matches!(
            HarnessConfig::from_toml_str("[stream]\nsizes = [0]"),
            Err(RelaxError::EmptyBuffer)
        ));
        assert!(matches!(
            HarnessConfig::from_toml_str("[stencil]\niterations = \"many\""),
            Err(RelaxError::Serialization(_))
        ));
    }
}
