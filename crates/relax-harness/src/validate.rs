//! Cross-backend validation against a reference backend

use relax_core::{Field, RelaxError, Result, StencilBackend};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome for one candidate backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendReport {
    pub backend: String,
    /// Largest interior difference from the reference output.
    pub max_interior_error: f64,
    pub boundary_zero: bool,
    pub conformant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub reference: String,
    pub size: usize,
    pub tolerance: f64,
    pub backends: Vec<BackendReport>,
}

impl ValidationReport {
    /// Backends whose output boundary was not zero.
    pub fn nonconformant(&self) -> impl Iterator<Item = &BackendReport> {
        self.backends.iter().filter(|r| !r.boundary_zero)
    }
}

/// Relax `field` with the reference and every candidate and compare.
///
/// Interior cells must agree within `tolerance`. Boundary cells must be zero
/// for backends that claim conformance; backends that declare themselves
/// non-conformant are only reported. The first disagreement is returned as
/// [`RelaxError::BackendMismatch`].
pub fn validate_backends(
    reference: &dyn StencilBackend,
    candidates: &[Box<dyn StencilBackend>],
    field: &Field,
    tolerance: f64,
) -> Result<ValidationReport> {
    let expected = reference.relax(field)?;
    if let Some((row, col, got)) = expected.boundary_violation() {
        return Err(mismatch(reference, reference, row, col, got, 0.0, tolerance));
    }

    let mut reports = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let out = candidate.relax(field)?;

        let max_interior_error = match out.max_interior_diff(&expected) {
            Some((row, col, diff)) => {
                if diff > tolerance {
                    return Err(mismatch(
                        &**candidate,
                        reference,
                        row,
                        col,
                        out.get(row, col),
                        expected.get(row, col),
                        tolerance,
                    ));
                }
                diff
            }
            None => 0.0,
        };

        let violation = out.boundary_violation();
        match violation {
            Some((row, col, got)) if candidate.is_conformant() => {
                return Err(mismatch(&**candidate, reference, row, col, got, 0.0, tolerance));
            }
            Some((row, col, got)) => {
                warn!(
                    backend = candidate.name(),
                    row, col, value = got, "non-conformant boundary"
                );
            }
            None => {}
        }

        reports.push(BackendReport {
            backend: candidate.name().to_string(),
            max_interior_error,
            boundary_zero: violation.is_none(),
            conformant: candidate.is_conformant(),
        });
    }

    info!(
        reference = reference.name(),
        size = field.side(),
        checked = reports.len(),
        "backends agree"
    );

    Ok(ValidationReport {
        reference: reference.name().to_string(),
        size: field.side(),
        tolerance,
        backends: reports,
    })
}

fn mismatch(
    backend: &dyn StencilBackend,
    reference: &dyn StencilBackend,
    row: usize,
    col: usize,
    got: f64,
    expected: f64,
    tolerance: f64,
) -> RelaxError {
    RelaxError::BackendMismatch {
        backend: backend.name().to_string(),
        reference: reference.name().to_string(),
        row,
        col,
        got,
        expected,
        tolerance,
    }
}
