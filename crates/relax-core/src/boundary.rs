//! Homogeneous Dirichlet boundary enforcement

use crate::field::Field;
use ndarray::{s, ArrayViewMut2};

/// Boundary handling applied before (and, for shift backends, after) a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Zero-valued boundary rows and columns.
    #[default]
    Dirichlet,
}

impl BoundaryPolicy {
    pub fn apply(self, field: &mut Field) {
        match self {
            BoundaryPolicy::Dirichlet => apply_dirichlet(field.as_array_mut()),
        }
    }
}

/// Zero rows 0 and n-1 and columns 0 and n-1 in place.
///
/// Interior cells are left untouched. Empty views are a no-op; callers
/// reject sides below 2 before reaching here.
pub fn apply_dirichlet(mut grid: ArrayViewMut2<'_, f64>) {
    if grid.is_empty() {
        return;
    }
    grid.row_mut(0).fill(0.0);
    grid.slice_mut(s![-1, ..]).fill(0.0);
    grid.column_mut(0).fill(0.0);
    grid.slice_mut(s![.., -1]).fill(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirichlet_zeroes_ring_only() {
        let mut f = Field::ones(4).unwrap();
        BoundaryPolicy::Dirichlet.apply(&mut f);
        assert!(f.has_zero_boundary());
        assert!(f.interior().iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_dirichlet_side_two_clears_everything() {
        let mut f = Field::ones(2).unwrap();
        BoundaryPolicy::Dirichlet.apply(&mut f);
        assert!(f.to_vec().iter().all(|&x| x == 0.0));
    }
}
