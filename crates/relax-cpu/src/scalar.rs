//! Reference backend: nested index loops

use relax_core::{BoundaryPolicy, Field, Result, StencilBackend, StencilKind};

/// Baseline used to validate every other backend.
pub struct ScalarBackend;

impl StencilBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        StencilKind::Scalar.as_str()
    }

    fn kind(&self) -> StencilKind {
        StencilKind::Scalar
    }

    fn relax(&self, field: &Field) -> Result<Field> {
        let mut before = field.clone();
        BoundaryPolicy::Dirichlet.apply(&mut before);

        let n = before.side();
        let mut after = before.clone();
        let src = before.as_array();
        let mut dst = after.as_array_mut();

        for i in 1..n - 1 {
            for j in 1..n - 1 {
                dst[[i, j]] = 0.25
                    * (src[[i, j + 1]] + src[[i, j - 1]] + src[[i + 1, j]] + src[[i - 1, j]]);
            }
        }

        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_pre_sweep_values() {
        // Sequential Gauss-Seidel would see the updated (1,1) when computing (1,2)
        let mut f = Field::zeros(4).unwrap();
        f.as_array_mut()[[1, 1]] = 4.0;
        let out = ScalarBackend.relax(&f).unwrap();

        assert_eq!(out.get(1, 1), 0.0);
        assert_eq!(out.get(1, 2), 1.0);
        assert_eq!(out.get(2, 1), 1.0);
        assert_eq!(out.get(2, 2), 0.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let f = Field::ones(5).unwrap();
        let _ = ScalarBackend.relax(&f).unwrap();
        assert!(f.to_vec().iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_five_by_five_ones() {
        let out = ScalarBackend.relax(&Field::ones(5).unwrap()).unwrap();
        assert!(out.has_zero_boundary());
        // Corner-adjacent interior cells see two zeroed neighbours
        assert_eq!(out.get(1, 1), 0.5);
        assert_eq!(out.get(1, 2), 0.75);
        assert_eq!(out.get(2, 2), 1.0);
    }
}
