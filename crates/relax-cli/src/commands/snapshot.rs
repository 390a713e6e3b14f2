//! `relaxbench snapshot`

use anyhow::{Context, Result};
use clap::Args;
use relax_harness::{resolve_backends, FieldInit, HarnessConfig, SnapshotStore};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct SnapshotCommand {
    /// Field side N
    #[arg(long, default_value = "10", value_name = "N")]
    pub size: usize,

    /// Chained sweeps before storing
    #[arg(long, default_value = "1000", value_name = "N")]
    pub iterations: usize,

    /// Backend producing the field
    #[arg(long, default_value = "slice", value_name = "NAME")]
    pub backend: String,

    /// Seed for the random starting field
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Snapshot file
    #[arg(short, long, default_value = "relax_output.json", value_name = "PATH")]
    pub output: PathBuf,
}

impl SnapshotCommand {
    pub fn execute(&self, config: &HarnessConfig) -> Result<()> {
        let backends = resolve_backends(&[self.backend.as_str()], &config.accelerator)?;
        let backend = &backends[0];

        let mut x = FieldInit::Random {
            seed: self.seed.or(config.stencil.seed),
        }
        .build(self.size)?;
        for _ in 0..self.iterations {
            x = backend.relax(&x)?;
        }

        let mut store = SnapshotStore::new();
        let key = store.insert(backend.name(), x);
        store
            .save(&self.output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        info!(dataset = %key, path = %self.output.display(), "snapshot written");
        Ok(())
    }
}
