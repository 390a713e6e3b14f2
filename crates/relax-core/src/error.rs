//! Error types for relaxbench

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelaxError {
    #[error("Field must be square, got shape {0:?}")]
    NotSquare(Vec<usize>),

    #[error("Field side {side} has no interior (side must be at least 2)")]
    NoInterior { side: usize },

    #[error("Buffer length must be positive")]
    EmptyBuffer,

    #[error("Buffer lengths differ: a={a}, b={b}, c={c}")]
    BufferLengthMismatch { a: usize, b: usize, c: usize },

    #[error("Data length {len} doesn't match a {side}x{side} field")]
    DataLength { len: usize, side: usize },

    #[error(
        "Backend {backend} disagrees with {reference} at ({row}, {col}): got {got}, expected {expected} (tolerance {tolerance:e})"
    )]
    BackendMismatch {
        backend: String,
        reference: String,
        row: usize,
        col: usize,
        got: f64,
        expected: f64,
        tolerance: f64,
    },

    #[error("No compute accelerator available")]
    NoAcceleratorAvailable,

    #[error("Invalid accelerator device: {0}")]
    InvalidDevice(u32),

    #[error("Device out of memory: requested {requested} bytes, {available} available")]
    DeviceOutOfMemory { requested: u64, available: u64 },

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Measurement failed for backend {backend} at size {size}: {source}")]
    Measurement {
        backend: String,
        size: usize,
        #[source]
        source: Box<RelaxError>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse error classes reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Field not square, no interior, or empty buffer.
    Shape,
    /// A backend's output differs from the reference beyond tolerance.
    BackendMismatch,
    /// A required compute device is missing.
    Resource,
    Other,
}

impl RelaxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RelaxError::NotSquare(_)
            | RelaxError::NoInterior { .. }
            | RelaxError::EmptyBuffer
            | RelaxError::BufferLengthMismatch { .. }
            | RelaxError::DataLength { .. } => ErrorCategory::Shape,
            RelaxError::BackendMismatch { .. } => ErrorCategory::BackendMismatch,
            RelaxError::NoAcceleratorAvailable
            | RelaxError::InvalidDevice(_)
            | RelaxError::DeviceOutOfMemory { .. } => ErrorCategory::Resource,
            RelaxError::Measurement { source, .. } => source.category(),
            _ => ErrorCategory::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_inherits_category() {
        let err = RelaxError::Measurement {
            backend: "accelerator".into(),
            size: 10,
            source: Box::new(RelaxError::NoAcceleratorAvailable),
        };
        assert_eq!(err.category(), ErrorCategory::Resource);
        assert!(err.to_string().contains("accelerator"));
        assert!(err.to_string().contains("size 10"));
    }

    #[test]
    fn test_shape_category() {
        assert_eq!(RelaxError::EmptyBuffer.category(), ErrorCategory::Shape);
        assert_eq!(
            RelaxError::NotSquare(vec![2, 3]).category(),
            ErrorCategory::Shape
        );
    }
}
