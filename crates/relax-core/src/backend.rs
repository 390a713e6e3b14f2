//! Backend traits shared by every stencil implementation

use crate::error::{RelaxError, Result};
use crate::field::Field;
use std::fmt;
use std::str::FromStr;

/// The closed set of stencil execution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilKind {
    Scalar,
    VectorizedSlice,
    CircularShift,
    /// Historical shift variant that zeroes only before the shift-sum.
    CircularShiftUnzeroed,
    CompiledUntyped,
    CompiledTyped,
    CompiledTypedShift,
    AcceleratorResident,
}

impl StencilKind {
    pub const ALL: [StencilKind; 8] = [
        StencilKind::Scalar,
        StencilKind::VectorizedSlice,
        StencilKind::CircularShift,
        StencilKind::CircularShiftUnzeroed,
        StencilKind::CompiledUntyped,
        StencilKind::CompiledTyped,
        StencilKind::CompiledTypedShift,
        StencilKind::AcceleratorResident,
    ];

    /// Registration name used by configuration files and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            StencilKind::Scalar => "scalar",
            StencilKind::VectorizedSlice => "slice",
            StencilKind::CircularShift => "shift",
            StencilKind::CircularShiftUnzeroed => "shift-unzeroed",
            StencilKind::CompiledUntyped => "untyped",
            StencilKind::CompiledTyped => "typed",
            StencilKind::CompiledTypedShift => "typed-shift",
            StencilKind::AcceleratorResident => "accelerator",
        }
    }

    pub fn is_accelerator(&self) -> bool {
        matches!(self, StencilKind::AcceleratorResident)
    }
}

impl fmt::Display for StencilKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StencilKind {
    type Err = RelaxError;

    fn from_str(s: &str) -> Result<Self> {
        StencilKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| RelaxError::UnknownBackend(s.to_string()))
    }
}

/// One sweep of the five-point Jacobi relaxation.
///
/// Every implementation zeroes the boundary of a working copy, then writes
/// `0.25 * (n + s + e + w)` of the pre-sweep values into each interior cell.
/// The caller's field is never modified.
pub trait StencilBackend: Send + Sync {
    /// Backend name for identification in samples and logs
    fn name(&self) -> &'static str;

    fn kind(&self) -> StencilKind;

    fn relax(&self, field: &Field) -> Result<Field>;

    /// Whether output boundaries are guaranteed to be zero
    fn is_conformant(&self) -> bool {
        true
    }
}

impl<T: StencilBackend + ?Sized> StencilBackend for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn kind(&self) -> StencilKind {
        (**self).kind()
    }

    fn relax(&self, field: &Field) -> Result<Field> {
        (**self).relax(field)
    }

    fn is_conformant(&self) -> bool {
        (**self).is_conformant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in StencilKind::ALL {
            assert_eq!(kind.as_str().parse::<StencilKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            "gauss".parse::<StencilKind>(),
            Err(RelaxError::UnknownBackend(ref s)) if s == "gauss"
        ));
    }
}
