//! Matrix type for 2D numeric data.

use crate::error::{ClimfError, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix of floating-point values (row-major storage).
///
/// Factor matrices are stored as one flat buffer addressed by row index so
/// the training loop can mutate a single row in place.
///
/// # Examples
///
/// ```
/// use aprender_climf::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(ClimfError::DimensionMismatch {
                expected: format!("{rows}x{cols} ({} values)", rows * cols),
                actual: format!("{} values", data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Returns a row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx` is out of bounds.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns a row as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx` is out of bounds.
    pub fn row_mut(&mut self, row_idx: usize) -> &mut [T] {
        let start = row_idx * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Iterates over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics; a zero-width matrix has no addressable rows.
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Checks that the buffer length matches the shape, which deserialized
    /// values do not guarantee.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len() != rows * cols`.
    pub fn check_len(&self) -> Result<()> {
        if self.data.len() != self.rows * self.cols {
            return Err(ClimfError::DimensionMismatch {
                expected: format!("{}x{} ({} values)", self.rows, self.cols, self.rows * self.cols),
                actual: format!("{} values", self.data.len()),
            });
        }
        Ok(())
    }
}

impl Matrix<f32> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Builds a matrix by calling `f` once per element in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut() -> f32) -> Self {
        let data = (0..rows * cols).map(|_| f()).collect();
        Self { data, rows, cols }
    }

    /// Returns true if every element is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}

/// Dot product of two equally sized slices.
#[inline]
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `y += scale * x`, elementwise.
#[inline]
pub fn axpy(scale: f32, x: &[f32], y: &mut [f32]) {
    debug_assert_eq!(x.len(), y.len());
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += scale * xi;
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
