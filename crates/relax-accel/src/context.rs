//! Device context: memory accounting, transfers and kernel launch.

use crate::device::{DeviceId, DeviceInfo};
use crate::memory::DeviceBuffer;
use rayon::prelude::*;
use relax_core::{Field, RelaxError, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// An open device with transfer counters.
#[derive(Debug)]
pub struct DeviceContext {
    info: DeviceInfo,
    bytes_to_device: AtomicU64,
    bytes_to_host: AtomicU64,
    launches: AtomicU64,
}

/// Snapshot of a context's transfer counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferStats {
    pub bytes_to_device: u64,
    pub bytes_to_host: u64,
    pub launches: u64,
}

impl DeviceContext {
    pub(crate) fn new(info: DeviceInfo) -> Self {
        Self {
            info,
            bytes_to_device: AtomicU64::new(0),
            bytes_to_host: AtomicU64::new(0),
            launches: AtomicU64::new(0),
        }
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn id(&self) -> DeviceId {
        self.info.id
    }

    /// Each allocation must fit in device memory on its own.
    fn alloc(&self, side: usize) -> Result<Vec<f64>> {
        let bytes = (side * side * std::mem::size_of::<f64>()) as u64;
        if bytes > self.info.memory_total {
            return Err(RelaxError::DeviceOutOfMemory {
                requested: bytes,
                available: self.info.memory_total,
            });
        }
        Ok(vec![0.0; side * side])
    }

    /// Copy a field into device memory.
    pub fn upload(&self, field: &Field) -> Result<DeviceBuffer> {
        let side = field.side();
        let mut data = self.alloc(side)?;
        let host = field.to_vec();
        if host.len() != data.len() {
            return Err(RelaxError::DataLength {
                len: host.len(),
                side,
            });
        }
        data.copy_from_slice(&host);
        let buf = DeviceBuffer::new(data, side, self.id());
        self.bytes_to_device
            .fetch_add(buf.size_bytes() as u64, Ordering::Relaxed);
        Ok(buf)
    }

    /// Copy a device buffer back into a host field.
    pub fn download(&self, buf: &DeviceBuffer) -> Result<Field> {
        self.check_owner(buf)?;
        let field = Field::from_vec(buf.side, buf.data.clone())?;
        self.bytes_to_host
            .fetch_add(buf.size_bytes() as u64, Ordering::Relaxed);
        Ok(field)
    }

    fn check_owner(&self, buf: &DeviceBuffer) -> Result<()> {
        if buf.device != self.id() {
            return Err(RelaxError::InvalidDevice(buf.device.0));
        }
        Ok(())
    }

    /// Launch one relaxation sweep on a device-resident grid.
    ///
    /// Zeroes the input boundary, sums the four wrap-around neighbours one
    /// row per work item, then zeroes the output boundary. The input buffer
    /// is left as it was.
    pub fn launch_relax(&self, input: &DeviceBuffer) -> Result<DeviceBuffer> {
        self.check_owner(input)?;
        let n = input.side;

        let mut src = self.alloc(n)?;
        src.copy_from_slice(&input.data);
        zero_ring(&mut src, n);

        let mut dst = self.alloc(n)?;
        dst.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
            let up = (i + n - 1) % n;
            let down = (i + 1) % n;
            for (j, cell) in row.iter_mut().enumerate() {
                let left = (j + n - 1) % n;
                let right = (j + 1) % n;
                *cell = 0.25
                    * (src[up * n + j]
                        + src[down * n + j]
                        + src[i * n + left]
                        + src[i * n + right]);
            }
        });
        zero_ring(&mut dst, n);

        self.launches.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(device = %self.id(), side = n, "relax kernel launched");
        Ok(DeviceBuffer::new(dst, n, self.id()))
    }

    pub fn stats(&self) -> TransferStats {
        TransferStats {
            bytes_to_device: self.bytes_to_device.load(Ordering::Relaxed),
            bytes_to_host: self.bytes_to_host.load(Ordering::Relaxed),
            launches: self.launches.load(Ordering::Relaxed),
        }
    }
}

/// Zero the outer ring of a row-major `n x n` grid.
fn zero_ring(data: &mut [f64], n: usize) {
    if n == 0 {
        return;
    }
    data[..n].fill(0.0);
    data[(n - 1) * n..].fill(0.0);
    for row in data.chunks_mut(n) {
        row[0] = 0.0;
        row[n - 1] = 0.0;
    }
}
