//! Accelerator device enumeration and information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a device in enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "accel:{}", self.0)
    }
}

/// Properties of one compute device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: DeviceId,

    /// Human-readable device name.
    pub name: String,

    /// Total device memory in bytes.
    pub memory_total: u64,

    /// Number of independent compute units (rows are spread across these).
    pub compute_units: usize,

    /// True when device memory is emulated in host RAM.
    pub emulated: bool,
}

impl DeviceInfo {
    /// Device whose memory lives in host RAM and whose kernels run on the
    /// global rayon pool.
    #[must_use]
    pub fn host_emulated(id: DeviceId) -> Self {
        Self {
            id,
            name: "Host-emulated accelerator".to_string(),
            memory_total: 4 << 30,
            compute_units: rayon::current_num_threads(),
            emulated: true,
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} MB, {} compute units)",
            self.id,
            self.name,
            self.memory_total / 1024 / 1024,
            self.compute_units
        )
    }
}
