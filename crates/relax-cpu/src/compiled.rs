//! Loop backends over dynamic and flat typed storage
//!
//! `UntypedBackend` indexes through a dynamic-dimension array, paying a
//! shape lookup and bounds check on every access. The typed backends work on
//! a flat row-major `Vec<f64>` with explicit stride arithmetic.

use ndarray::{ArrayD, Ix2, IxDyn};
use relax_core::{BoundaryPolicy, Field, RelaxError, Result, StencilBackend, StencilKind};

pub struct UntypedBackend;

impl StencilBackend for UntypedBackend {
    fn name(&self) -> &'static str {
        StencilKind::CompiledUntyped.as_str()
    }

    fn kind(&self) -> StencilKind {
        StencilKind::CompiledUntyped
    }

    fn relax(&self, field: &Field) -> Result<Field> {
        let mut work = field.clone();
        BoundaryPolicy::Dirichlet.apply(&mut work);

        let src: ArrayD<f64> = work.into_array().into_dyn();
        let mut dst = src.clone();
        let shape = src.shape().to_vec();

        for i in 1..shape[0] - 1 {
            for j in 1..shape[1] - 1 {
                dst[IxDyn(&[i, j])] = 0.25
                    * (src[IxDyn(&[i, j + 1])]
                        + src[IxDyn(&[i, j - 1])]
                        + src[IxDyn(&[i + 1, j])]
                        + src[IxDyn(&[i - 1, j])]);
            }
        }

        let dst = dst
            .into_dimensionality::<Ix2>()
            .map_err(|e| RelaxError::InvalidArgument(e.to_string()))?;
        Field::new(dst)
    }
}

pub struct TypedBackend;

impl StencilBackend for TypedBackend {
    fn name(&self) -> &'static str {
        StencilKind::CompiledTyped.as_str()
    }

    fn kind(&self) -> StencilKind {
        StencilKind::CompiledTyped
    }

    fn relax(&self, field: &Field) -> Result<Field> {
        let mut work = field.clone();
        BoundaryPolicy::Dirichlet.apply(&mut work);

        let n = work.side();
        let src: Vec<f64> = work.to_vec();
        let mut dst = src.clone();

        for i in 1..n - 1 {
            let row = i * n;
            for j in 1..n - 1 {
                let k = row + j;
                dst[k] = 0.25 * (src[k + 1] + src[k - 1] + src[k + n] + src[k - n]);
            }
        }

        Field::from_vec(n, dst)
    }
}

/// Flat-buffer version of the circular-shift update.
pub struct TypedShiftBackend;

impl StencilBackend for TypedShiftBackend {
    fn name(&self) -> &'static str {
        StencilKind::CompiledTypedShift.as_str()
    }

    fn kind(&self) -> StencilKind {
        StencilKind::CompiledTypedShift
    }

    fn relax(&self, field: &Field) -> Result<Field> {
        let mut work = field.clone();
        BoundaryPolicy::Dirichlet.apply(&mut work);

        let n = work.side();
        let src: Vec<f64> = work.to_vec();
        let mut dst = vec![0.0; n * n];

        for i in 0..n {
            let up = (i + n - 1) % n;
            let down = (i + 1) % n;
            for j in 0..n {
                let left = (j + n - 1) % n;
                let right = (j + 1) % n;
                dst[i * n + j] = 0.25
                    * (src[up * n + j]
                        + src[down * n + j]
                        + src[i * n + left]
                        + src[i * n + right]);
            }
        }

        let mut out = Field::from_vec(n, dst)?;
        BoundaryPolicy::Dirichlet.apply(&mut out);
        Ok(out)
    }
}
