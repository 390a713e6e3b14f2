//! Measurement records produced by the harness

use crate::buffer::BufferKind;
use crate::error::{RelaxError, Result};
use crate::stream::StreamOp;
use serde::{Deserialize, Serialize};

/// Total wall time of one backend at one problem size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub backend: String,
    pub size: usize,
    pub elapsed_seconds: f64,
}

impl TimingSample {
    pub fn new(backend: impl Into<String>, size: usize, elapsed_seconds: f64) -> Self {
        Self {
            backend: backend.into(),
            size,
            elapsed_seconds,
        }
    }
}

/// Wall time of one STREAM kernel over buffers of length `size`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandwidthSample {
    pub op: StreamOp,
    pub buffer_kind: BufferKind,
    pub size: usize,
    pub bytes_per_iteration: u64,
    pub elapsed_seconds: f64,
}

impl BandwidthSample {
    /// Achieved bandwidth in bytes per second.
    ///
    /// `None` when the elapsed time is not positive, which happens for tiny
    /// buffers below the clock resolution.
    pub fn bandwidth(&self) -> Option<f64> {
        if self.elapsed_seconds > 0.0 && self.elapsed_seconds.is_finite() {
            Some(self.bytes_per_iteration as f64 / self.elapsed_seconds)
        } else {
            None
        }
    }

    pub fn gigabytes_per_second(&self) -> Option<f64> {
        self.bandwidth().map(|b| b / 1e9)
    }
}

/// Bytes moved by one pass of `op` over buffers of length `len`.
pub fn bytes_per_iteration(op: StreamOp, kind: BufferKind, len: usize) -> Result<u64> {
    if len == 0 {
        return Err(RelaxError::EmptyBuffer);
    }
    Ok((op.buffers_touched() * kind.element_size() * len) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_iteration() {
        assert_eq!(
            bytes_per_iteration(StreamOp::Copy, BufferKind::NdArray, 10).unwrap(),
            160
        );
        assert_eq!(
            bytes_per_iteration(StreamOp::Triad, BufferKind::TypedVec, 10).unwrap(),
            240
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            bytes_per_iteration(StreamOp::Add, BufferKind::TypedVec, 0),
            Err(RelaxError::EmptyBuffer)
        ));
    }

    #[test]
    fn test_bandwidth_zero_elapsed() {
        let sample = BandwidthSample {
            op: StreamOp::Copy,
            buffer_kind: BufferKind::TypedVec,
            size: 4,
            bytes_per_iteration: 64,
            elapsed_seconds: 0.0,
        };
        assert_eq!(sample.bandwidth(), None);

        let sample = BandwidthSample {
            elapsed_seconds: 2.0,
            ..sample
        };
        assert_eq!(sample.bandwidth(), Some(32.0));
    }
}
