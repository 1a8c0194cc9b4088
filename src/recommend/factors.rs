//! Latent factor storage.
//!
//! Two dense row-major arenas: `U` (users × K) and `V` (items × K). The
//! trainer mutates them one row at a time; the finished store is moved into
//! an immutable [`CLiMFModel`](super::CLiMFModel).

use crate::error::{ClimfError, Result};
use crate::primitives::Matrix;
use rand::Rng;

/// Upper (exclusive) bound of the initial factor values.
pub const INIT_SCALE: f32 = 0.01;

/// User and item factor matrices sharing one latent dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorStore {
    user_factors: Matrix<f32>,
    item_factors: Matrix<f32>,
}

impl FactorStore {
    /// Draws `U` and `V` independently from `U[0, 0.01)`.
    ///
    /// `U` is filled first, then `V`, both in row-major order, so a given
    /// RNG state always yields the same store.
    ///
    /// # Errors
    ///
    /// Returns an error if any of `num_users`, `num_items`, `n_factors` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use aprender_climf::recommend::FactorStore;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let store = FactorStore::initialize(3, 4, 2, &mut rng).expect("non-zero shape");
    /// assert_eq!(store.user_factors().shape(), (3, 2));
    /// assert_eq!(store.item_factors().shape(), (4, 2));
    /// ```
    pub fn initialize<R: Rng + ?Sized>(
        num_users: usize,
        num_items: usize,
        n_factors: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if n_factors == 0 {
            return Err(ClimfError::invalid_hyperparameter("n_factors", 0, ">= 1"));
        }
        if num_users == 0 {
            return Err(ClimfError::empty_input("num_users must be >= 1"));
        }
        if num_items == 0 {
            return Err(ClimfError::empty_input("num_items must be >= 1"));
        }

        let user_factors = Matrix::from_fn(num_users, n_factors, || rng.gen_range(0.0..INIT_SCALE));
        let item_factors = Matrix::from_fn(num_items, n_factors, || rng.gen_range(0.0..INIT_SCALE));
        Ok(Self {
            user_factors,
            item_factors,
        })
    }

    /// Wraps existing matrices.
    ///
    /// # Errors
    ///
    /// Returns an error if the column counts differ or are zero, either
    /// matrix has no rows, or a matrix buffer disagrees with its shape.
    pub fn from_matrices(user_factors: Matrix<f32>, item_factors: Matrix<f32>) -> Result<Self> {
        user_factors.check_len()?;
        item_factors.check_len()?;
        if user_factors.n_rows() == 0 {
            return Err(ClimfError::empty_input("num_users must be >= 1"));
        }
        if item_factors.n_rows() == 0 {
            return Err(ClimfError::empty_input("num_items must be >= 1"));
        }
        if user_factors.n_cols() != item_factors.n_cols() {
            return Err(ClimfError::dimension_mismatch(
                "item_factors.cols",
                user_factors.n_cols(),
                item_factors.n_cols(),
            ));
        }
        if user_factors.n_cols() == 0 {
            return Err(ClimfError::invalid_hyperparameter("n_factors", 0, ">= 1"));
        }
        Ok(Self {
            user_factors,
            item_factors,
        })
    }

    /// `(num_users, num_items)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.user_factors.n_rows(), self.item_factors.n_rows())
    }

    /// Latent dimensionality K.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.user_factors.n_cols()
    }

    /// User factor matrix `U`.
    #[must_use]
    pub fn user_factors(&self) -> &Matrix<f32> {
        &self.user_factors
    }

    /// Item factor matrix `V`.
    #[must_use]
    pub fn item_factors(&self) -> &Matrix<f32> {
        &self.item_factors
    }

    /// Mutable access to both arenas at once, for the SGD inner loop.
    pub(crate) fn split_mut(&mut self) -> (&mut Matrix<f32>, &mut Matrix<f32>) {
        (&mut self.user_factors, &mut self.item_factors)
    }

    /// Consumes the store, returning `(U, V)`.
    #[must_use]
    pub fn into_parts(self) -> (Matrix<f32>, Matrix<f32>) {
        (self.user_factors, self.item_factors)
    }
}
