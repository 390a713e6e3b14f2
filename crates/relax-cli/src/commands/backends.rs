//! `relaxbench backends`

use anyhow::Result;
use clap::Args;
use relax_accel::{available_devices, AcceleratorBackend};
use relax_core::StencilKind;
use relax_cpu::cpu_backend;
use relax_harness::HarnessConfig;

#[derive(Args, Debug)]
pub struct BackendsCommand {}

impl BackendsCommand {
    pub fn execute(&self, config: &HarnessConfig) -> Result<()> {
        println!("{:<16} {:<11} {}", "NAME", "CONFORMANT", "AVAILABLE");
        for kind in StencilKind::ALL {
            let (conformant, available) = match cpu_backend(kind) {
                Some(b) => (b.is_conformant(), true),
                None => (true, AcceleratorBackend::is_available(&config.accelerator)),
            };
            println!(
                "{:<16} {:<11} {}",
                kind.as_str(),
                if conformant { "yes" } else { "no" },
                if available { "yes" } else { "no" }
            );
        }
        for device in available_devices(&config.accelerator) {
            println!("  {device}");
        }
        Ok(())
    }
}
