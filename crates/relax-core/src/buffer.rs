//! Buffer representations used by the STREAM kernels

use crate::error::{RelaxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage backing the `a`, `b`, `c` STREAM buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BufferKind {
    /// Resizable `Vec<f64>` walked with index loops
    TypedVec,
    /// `ndarray::Array1<f64>` updated with bulk array expressions
    NdArray,
}

impl BufferKind {
    pub const ALL: [BufferKind; 2] = [BufferKind::TypedVec, BufferKind::NdArray];

    /// Size of one element in bytes
    pub fn element_size(&self) -> usize {
        std::mem::size_of::<f64>()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BufferKind::TypedVec => "vec",
            BufferKind::NdArray => "ndarray",
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BufferKind {
    type Err = RelaxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vec" | "typed-vec" => Ok(BufferKind::TypedVec),
            "ndarray" | "nd-array" => Ok(BufferKind::NdArray),
            other => Err(RelaxError::InvalidArgument(format!(
                "unknown buffer kind '{other}' (expected vec or ndarray)"
            ))),
        }
    }
}
