//! Square 2D field relaxed by the stencil backends

use crate::error::{RelaxError, Result};
use ndarray::{s, Array2, ArrayView2, ArrayViewMut2};
use serde::{Deserialize, Serialize};

/// A square `side x side` grid of `f64` values.
///
/// The side is always at least 2; construction rejects anything else so
/// backends never see a field without a boundary ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FieldRepr", into = "FieldRepr")]
pub struct Field {
    data: Array2<f64>,
}

/// Row-major on-disk form of a [`Field`].
#[derive(Serialize, Deserialize)]
struct FieldRepr {
    side: usize,
    data: Vec<f64>,
}

impl Field {
    /// Wrap an ndarray, validating that it is square with side >= 2.
    pub fn new(data: Array2<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(RelaxError::NotSquare(vec![rows, cols]));
        }
        Self::check_side(rows)?;
        Ok(Self { data })
    }

    pub fn zeros(side: usize) -> Result<Self> {
        Self::full(side, 0.0)
    }

    pub fn ones(side: usize) -> Result<Self> {
        Self::full(side, 1.0)
    }

    pub fn full(side: usize, value: f64) -> Result<Self> {
        Self::check_side(side)?;
        Ok(Self {
            data: Array2::from_elem((side, side), value),
        })
    }

    /// Create from row-major data
    pub fn from_vec(side: usize, data: Vec<f64>) -> Result<Self> {
        Self::check_side(side)?;
        if data.len() != side * side {
            return Err(RelaxError::DataLength {
                len: data.len(),
                side,
            });
        }
        let arr = Array2::from_shape_vec((side, side), data)
            .map_err(|e| RelaxError::InvalidArgument(e.to_string()))?;
        Ok(Self { data: arr })
    }

    fn check_side(side: usize) -> Result<()> {
        if side < 2 {
            return Err(RelaxError::NoInterior { side });
        }
        Ok(())
    }

    pub fn side(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Mutable view for backends; values change, the shape does not.
    pub fn as_array_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.data.view_mut()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// View of the interior block, rows and columns `1..side-1`.
    pub fn interior(&self) -> ArrayView2<'_, f64> {
        self.data.slice(s![1..-1, 1..-1])
    }

    /// Row-major copy of all values
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// True when every cell of the outer ring is exactly 0.0.
    pub fn has_zero_boundary(&self) -> bool {
        self.boundary_violation().is_none()
    }

    /// First boundary cell that is not 0.0, as `(row, col, value)`.
    pub fn boundary_violation(&self) -> Option<(usize, usize, f64)> {
        let n = self.side();
        let last = n - 1;
        (0..n)
            .flat_map(|k| [(0, k), (last, k), (k, 0), (k, last)])
            .map(|(i, j)| (i, j, self.data[[i, j]]))
            .find(|&(_, _, v)| v != 0.0)
    }

    /// Largest absolute difference over all cells.
    ///
    /// Fields of different sides compare as `f64::INFINITY`.
    pub fn max_abs_diff(&self, other: &Field) -> f64 {
        if self.side() != other.side() {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Worst interior cell as `(row, col, difference)`.
    ///
    /// Returns `None` when the sides differ or the field has no interior
    /// cells (side 2).
    pub fn max_interior_diff(&self, other: &Field) -> Option<(usize, usize, f64)> {
        if self.side() != other.side() {
            return None;
        }
        let mut worst: Option<(usize, usize, f64)> = None;
        for ((i, j), &a) in self.interior().indexed_iter() {
            let diff = (a - other.data[[i + 1, j + 1]]).abs();
            // NaN never compares, so count it as the worst possible cell
            let diff = if diff.is_nan() { f64::INFINITY } else { diff };
            if worst.map_or(true, |(_, _, w)| diff > w) {
                worst = Some((i + 1, j + 1, diff));
            }
        }
        worst
    }
}

impl TryFrom<FieldRepr> for Field {
    type Error = RelaxError;

    fn try_from(repr: FieldRepr) -> Result<Self> {
        Field::from_vec(repr.side, repr.data)
    }
}

impl From<Field> for FieldRepr {
    fn from(field: Field) -> Self {
        FieldRepr {
            side: field.side(),
            data: field.to_vec(),
        }
    }
}
