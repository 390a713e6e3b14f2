//! `relaxbench validate`

use anyhow::{Context, Result};
use clap::Args;
use relax_accel::AcceleratorBackend;
use relax_core::StencilBackend;
use relax_cpu::{all_cpu_backends, cpu_backends, ScalarBackend};
use relax_harness::{validate_backends, FieldInit, HarnessConfig};
use tracing::warn;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Field side N
    #[arg(long, default_value = "32", value_name = "N")]
    pub size: usize,

    /// Seed for the random field
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Largest allowed interior difference from the scalar backend
    #[arg(long, default_value = "1e-10", value_name = "TOL")]
    pub tolerance: f64,

    /// Also check the historical shift variant with unzeroed boundaries
    #[arg(long)]
    pub include_unzeroed: bool,
}

impl ValidateCommand {
    pub fn execute(&self, config: &HarnessConfig) -> Result<()> {
        let field = FieldInit::Random {
            seed: self.seed.or(config.stencil.seed),
        }
        .build(self.size)?;

        let mut candidates: Vec<Box<dyn StencilBackend>> = if self.include_unzeroed {
            all_cpu_backends()
        } else {
            cpu_backends()
        };
        if AcceleratorBackend::is_available(&config.accelerator) {
            candidates.push(Box::new(AcceleratorBackend::new(&config.accelerator)?));
        } else {
            warn!("no accelerator available; skipping accelerator backend");
        }

        let report = validate_backends(&ScalarBackend, &candidates, &field, self.tolerance)
            .context("Backend validation failed")?;

        for r in report.nonconformant() {
            warn!(backend = %r.backend, "output boundary is not zero");
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
