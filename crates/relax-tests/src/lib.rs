//! Shared test suite for relaxbench backends
//!
//! Every stencil backend is checked against the scalar reference on the same
//! inputs; STREAM buffers are checked kernel by kernel across both storage
//! representations.

pub mod boundary;
pub mod equivalence;
pub mod harness;
pub mod properties;
pub mod scenarios;
pub mod stream;

/// Test utilities
pub mod utils {
    use relax_accel::{AcceleratorBackend, AcceleratorConfig};
    use relax_core::{Field, StencilBackend};
    use relax_cpu::cpu_backends;

    /// Check if two f64 values are approximately equal
    pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() && b.is_nan() {
            return true;
        }
        if a.is_infinite() && b.is_infinite() {
            return a.signum() == b.signum();
        }
        (a - b).abs() < tol
    }

    /// Check if two fields agree cell by cell
    pub fn fields_approx_eq(a: &Field, b: &Field, tol: f64) -> bool {
        if a.side() != b.side() {
            return false;
        }
        a.as_array()
            .iter()
            .zip(b.as_array().iter())
            .all(|(&x, &y)| approx_eq(x, y, tol))
    }

    /// Every conformant backend, the host-emulated accelerator included
    pub fn conformant_backends() -> Vec<Box<dyn StencilBackend>> {
        let mut backends = cpu_backends();
        let accel = AcceleratorBackend::new(&AcceleratorConfig::enabled())
            .expect("host-emulated accelerator is always available when enabled");
        backends.push(Box::new(accel));
        backends
    }

    /// Apply `backend` `n` times, feeding each output into the next sweep
    pub fn relax_n(backend: &dyn StencilBackend, field: &Field, n: usize) -> Field {
        let mut x = field.clone();
        for _ in 0..n {
            x = backend.relax(&x).unwrap();
        }
        x
    }

    /// Default tolerance for cross-backend comparisons
    pub const DEFAULT_TOL: f64 = 1e-10;

    /// Tolerance for backends that sum neighbors in a different order
    pub const STRICT_TOL: f64 = 1e-12;
}
