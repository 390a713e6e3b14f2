//! relaxbench core - backend traits and common types
//!
//! This crate defines the interface every stencil and STREAM backend
//! implements, so the harness can drive CPU and accelerator backends
//! through one API.

pub mod backend;
pub mod boundary;
pub mod buffer;
pub mod error;
pub mod field;
pub mod sample;
pub mod stream;

pub use backend::{StencilBackend, StencilKind};
pub use boundary::{apply_dirichlet, BoundaryPolicy};
pub use buffer::BufferKind;
pub use error::{ErrorCategory, RelaxError, Result};
pub use field::Field;
pub use sample::{bytes_per_iteration, BandwidthSample, TimingSample};
pub use stream::{StreamBuffers, StreamOp, STREAM_SCALAR};
