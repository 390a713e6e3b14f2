//! Device-resident buffers.
//!
//! A [`DeviceBuffer`] can only be read back through
//! [`DeviceContext::download`](crate::DeviceContext::download), so every
//! host access pays the transfer the harness is meant to measure.

use crate::device::DeviceId;

/// A square grid resident in device memory.
#[derive(Debug)]
pub struct DeviceBuffer {
    pub(crate) data: Vec<f64>,
    pub(crate) side: usize,
    pub(crate) device: DeviceId,
}

impl DeviceBuffer {
    pub(crate) fn new(data: Vec<f64>, side: usize, device: DeviceId) -> Self {
        Self { data, side, device }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Size of the allocation in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }
}
