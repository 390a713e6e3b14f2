//! STREAM operations and the buffer trait that backends implement

use crate::buffer::BufferKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar multiplier for Scale and Triad
pub const STREAM_SCALAR: f64 = 3.0;

/// The four STREAM kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamOp {
    /// `c = a`
    Copy,
    /// `b = scalar * c`
    Scale,
    /// `c = a + b`
    Add,
    /// `a = b + scalar * c`
    Triad,
}

impl StreamOp {
    /// Execution order within one STREAM run
    pub const ALL: [StreamOp; 4] = [
        StreamOp::Copy,
        StreamOp::Scale,
        StreamOp::Add,
        StreamOp::Triad,
    ];

    /// Number of buffers read or written by one pass
    pub fn buffers_touched(&self) -> usize {
        match self {
            StreamOp::Copy | StreamOp::Scale => 2,
            StreamOp::Add | StreamOp::Triad => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamOp::Copy => "Copy",
            StreamOp::Scale => "Scale",
            StreamOp::Add => "Add",
            StreamOp::Triad => "Triad",
        }
    }
}

impl fmt::Display for StreamOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three equal-length buffers `a`, `b`, `c` and the kernels over them.
///
/// Each kernel processes the full length and fully overwrites its target.
pub trait StreamBuffers {
    fn kind(&self) -> BufferKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn copy(&mut self);

    fn scale(&mut self, scalar: f64);

    fn add(&mut self);

    fn triad(&mut self, scalar: f64);

    fn a(&self) -> &[f64];
    fn b(&self) -> &[f64];
    fn c(&self) -> &[f64];

    /// Dispatch a single kernel
    fn run(&mut self, op: StreamOp, scalar: f64) {
        match op {
            StreamOp::Copy => self.copy(),
            StreamOp::Scale => self.scale(scalar),
            StreamOp::Add => self.add(),
            StreamOp::Triad => self.triad(scalar),
        }
    }
}
