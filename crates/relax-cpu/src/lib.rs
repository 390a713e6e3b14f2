//! CPU backends for relaxbench
//!
//! Every stencil strategy here computes the same Jacobi sweep; they differ
//! only in how the interior update is expressed (index loops, ndarray
//! slices, circular shifts, dynamic vs. flat typed storage).

mod compiled;
mod random;
mod scalar;
mod shift;
mod slice;
mod stream;

pub use compiled::{TypedBackend, TypedShiftBackend, UntypedBackend};
pub use random::{random_field, seed};
pub use scalar::ScalarBackend;
pub use shift::{roll, ShiftBackend, UnzeroedShiftBackend};
pub use slice::SliceBackend;
pub use stream::{new_buffers, NdBuffers, VecBuffers};

use relax_core::{StencilBackend, StencilKind};

/// Every CPU backend that keeps output boundaries at zero.
pub fn cpu_backends() -> Vec<Box<dyn StencilBackend>> {
    vec![
        Box::new(ScalarBackend),
        Box::new(SliceBackend),
        Box::new(ShiftBackend),
        Box::new(UntypedBackend),
        Box::new(TypedBackend),
        Box::new(TypedShiftBackend),
    ]
}

/// [`cpu_backends`] plus the historical shift variant with unzeroed output.
pub fn all_cpu_backends() -> Vec<Box<dyn StencilBackend>> {
    let mut backends = cpu_backends();
    backends.push(Box::new(UnzeroedShiftBackend));
    backends
}

/// Look up a CPU backend by kind.
///
/// Returns `None` for kinds that are not CPU-resident.
pub fn cpu_backend(kind: StencilKind) -> Option<Box<dyn StencilBackend>> {
    let backend: Box<dyn StencilBackend> = match kind {
        StencilKind::Scalar => Box::new(ScalarBackend),
        StencilKind::VectorizedSlice => Box::new(SliceBackend),
        StencilKind::CircularShift => Box::new(ShiftBackend),
        StencilKind::CircularShiftUnzeroed => Box::new(UnzeroedShiftBackend),
        StencilKind::CompiledUntyped => Box::new(UntypedBackend),
        StencilKind::CompiledTyped => Box::new(TypedBackend),
        StencilKind::CompiledTypedShift => Box::new(TypedShiftBackend),
        StencilKind::AcceleratorResident => return None,
    };
    Some(backend)
}
