//! Accelerator-resident backend for relaxbench
//!
//! Runs the circular-shift sweep with the grid held in device memory. Every
//! call uploads the field, launches the kernel and downloads the result, so
//! the host/device transfer sits inside whatever interval the caller times.
//!
//! No vendor GPU runtime is linked. When enabled in configuration the crate
//! exposes a host-emulated device whose memory lives in host RAM and whose
//! kernel rows run on the rayon pool; with the accelerator disabled, device
//! selection fails with [`RelaxError::NoAcceleratorAvailable`].

mod context;
mod device;
mod memory;

pub use context::{DeviceContext, TransferStats};
pub use device::{DeviceId, DeviceInfo};
pub use memory::DeviceBuffer;

use relax_core::{Field, RelaxError, Result, StencilBackend, StencilKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Accelerator selection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceleratorConfig {
    /// Expose the host-emulated device.
    pub enabled: bool,
    /// Device index to open.
    pub device: u32,
}

impl AcceleratorConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            device: 0,
        }
    }
}

/// List the devices visible under `config`.
#[must_use]
pub fn available_devices(config: &AcceleratorConfig) -> Vec<DeviceInfo> {
    let mut devices = Vec::new();
    if config.enabled {
        devices.push(DeviceInfo::host_emulated(DeviceId(0)));
    }
    devices
}

/// Open device `id`.
///
/// # Errors
///
/// `NoAcceleratorAvailable` when nothing is visible, `InvalidDevice` when
/// `id` is out of range.
pub fn select_device(config: &AcceleratorConfig, id: DeviceId) -> Result<DeviceContext> {
    let devices = available_devices(config);
    if devices.is_empty() {
        return Err(RelaxError::NoAcceleratorAvailable);
    }
    let info = devices
        .into_iter()
        .find(|d| d.id == id)
        .ok_or(RelaxError::InvalidDevice(id.0))?;
    tracing::info!(device = %info, "opened accelerator");
    Ok(DeviceContext::new(info))
}

/// Open the device named in `config`.
pub fn default_device(config: &AcceleratorConfig) -> Result<DeviceContext> {
    select_device(config, DeviceId(config.device))
}

/// Stencil backend executing on an accelerator.
pub struct AcceleratorBackend {
    ctx: Arc<DeviceContext>,
}

impl AcceleratorBackend {
    /// Open the configured device; fails up front when none is available.
    pub fn new(config: &AcceleratorConfig) -> Result<Self> {
        Ok(Self::with_context(Arc::new(default_device(config)?)))
    }

    pub fn with_context(ctx: Arc<DeviceContext>) -> Self {
        Self { ctx }
    }

    pub fn is_available(config: &AcceleratorConfig) -> bool {
        !available_devices(config).is_empty()
    }

    pub fn context(&self) -> &DeviceContext {
        &self.ctx
    }
}

impl StencilBackend for AcceleratorBackend {
    fn name(&self) -> &'static str {
        StencilKind::AcceleratorResident.as_str()
    }

    fn kind(&self) -> StencilKind {
        StencilKind::AcceleratorResident
    }

    fn relax(&self, field: &Field) -> Result<Field> {
        let input = self.ctx.upload(field)?;
        let output = self.ctx.launch_relax(&input)?;
        self.ctx.download(&output)
    }
}
