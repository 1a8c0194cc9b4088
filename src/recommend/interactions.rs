//! Implicit-feedback interaction table.
//!
//! An [`Interactions`] value is the immutable training input: an ordered list
//! of `(user, item)` pairs, the `(num_users, num_items)` shape bounding them,
//! and the `(user_column, item_column)` order that maps tabular rows onto
//! pairs. A CSR index over users is built once at construction so the trainer
//! can fetch a user's items without rescanning the table.

use crate::error::{ClimfError, Result};
use crate::primitives::Matrix;

/// Column mapping `(user_column, item_column)` for tabular input.
pub type ColumnOrder = (usize, usize);

/// Default column mapping: users in column 0, items in column 1.
pub const DEFAULT_ORDER: ColumnOrder = (0, 1);

/// Observed positive interactions plus the shape they live in.
///
/// # Examples
///
/// ```
/// use aprender_climf::recommend::Interactions;
///
/// let data = Interactions::new(vec![(0, 1), (0, 2), (1, 0), (2, 3)], (3, 4))
///     .expect("all indices inside the shape");
/// assert_eq!(data.items_of(0), &[1, 2]);
/// assert_eq!(data.items_of(2), &[3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interactions {
    pairs: Vec<(usize, usize)>,
    shape: (usize, usize),
    order: ColumnOrder,
    /// CSR row pointers, `num_users + 1` entries.
    indptr: Vec<usize>,
    /// Item indices grouped by user, input order preserved within a user.
    indices: Vec<usize>,
}

impl Interactions {
    /// Builds the table from zero-based `(user, item)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if either shape component is zero or a pair falls
    /// outside `shape`.
    pub fn new(pairs: Vec<(usize, usize)>, shape: (usize, usize)) -> Result<Self> {
        let (num_users, num_items) = shape;
        if num_users == 0 {
            return Err(ClimfError::empty_input("num_users must be >= 1"));
        }
        if num_items == 0 {
            return Err(ClimfError::empty_input("num_items must be >= 1"));
        }

        for &(user, item) in &pairs {
            if user >= num_users {
                return Err(ClimfError::IndexOutOfRange {
                    what: "user",
                    index: user,
                    bound: num_users,
                });
            }
            if item >= num_items {
                return Err(ClimfError::IndexOutOfRange {
                    what: "item",
                    index: item,
                    bound: num_items,
                });
            }
        }

        let (indptr, indices) = build_csr(&pairs, num_users);
        Ok(Self {
            pairs,
            shape,
            order: DEFAULT_ORDER,
            indptr,
            indices,
        })
    }

    /// Converts a numeric table into interactions, inferring the shape as
    /// `(max_user + 1, max_item + 1)`.
    ///
    /// Each row is one interaction; `order` names the user and item columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, a column in `order` is out of
    /// range, or a cell is not a non-negative integer.
    pub fn from_table(table: &Matrix<f32>, order: ColumnOrder) -> Result<Self> {
        let pairs = table_pairs(table, order)?;
        let num_users = inferred_len(pairs.iter().map(|&(u, _)| u))?;
        let num_items = inferred_len(pairs.iter().map(|&(_, i)| i))?;
        Ok(Self::new(pairs, (num_users, num_items))?.with_order(order))
    }

    /// Like [`Interactions::from_table`] but with an explicit shape, for
    /// datasets whose trailing users or items have no interactions.
    ///
    /// # Errors
    ///
    /// Same as [`Interactions::from_table`], plus out-of-shape indices.
    pub fn from_table_with_shape(
        table: &Matrix<f32>,
        order: ColumnOrder,
        shape: (usize, usize),
    ) -> Result<Self> {
        let pairs = table_pairs(table, order)?;
        Ok(Self::new(pairs, shape)?.with_order(order))
    }

    /// Records the tabular column order carried into the trained model.
    #[must_use]
    pub fn with_order(mut self, order: ColumnOrder) -> Self {
        self.order = order;
        self
    }

    /// `(num_users, num_items)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of users in the shape (not only those with interactions).
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.shape.0
    }

    /// Number of items in the shape.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.shape.1
    }

    /// Column order `(user_column, item_column)`.
    #[must_use]
    pub fn order(&self) -> ColumnOrder {
        self.order
    }

    /// Number of interactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no interactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The raw pairs in input order.
    #[must_use]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Items user `user` interacted with, in input order.
    ///
    /// # Panics
    ///
    /// Panics if `user >= n_users()`.
    #[must_use]
    pub fn items_of(&self, user: usize) -> &[usize] {
        &self.indices[self.indptr[user]..self.indptr[user + 1]]
    }

    /// Users with at least one interaction, ascending.
    pub fn active_users(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_users()).filter(|&u| self.indptr[u + 1] > self.indptr[u])
    }

    /// Relevant item lists for a batch of users, aligned with `users`.
    ///
    /// # Panics
    ///
    /// Panics if any user is out of range.
    #[must_use]
    pub fn relevant_items(&self, users: &[usize]) -> Vec<Vec<usize>> {
        users.iter().map(|&u| self.items_of(u).to_vec()).collect()
    }
}

/// Stable counting sort of pairs by user into CSR arrays.
fn build_csr(pairs: &[(usize, usize)], num_users: usize) -> (Vec<usize>, Vec<usize>) {
    let mut indptr = vec![0usize; num_users + 1];
    for &(user, _) in pairs {
        indptr[user + 1] += 1;
    }
    for u in 0..num_users {
        indptr[u + 1] += indptr[u];
    }

    let mut cursor = indptr.clone();
    let mut indices = vec![0usize; pairs.len()];
    for &(user, item) in pairs {
        indices[cursor[user]] = item;
        cursor[user] += 1;
    }
    (indptr, indices)
}

fn table_pairs(table: &Matrix<f32>, order: ColumnOrder) -> Result<Vec<(usize, usize)>> {
    if table.n_rows() == 0 {
        return Err(ClimfError::empty_input("interaction table has no rows"));
    }
    let (user_col, item_col) = order;
    check_column(table, user_col, "user")?;
    check_column(table, item_col, "item")?;

    table
        .rows()
        .map(|row| Ok((cell_to_index(row[user_col])?, cell_to_index(row[item_col])?)))
        .collect()
}

pub(crate) fn check_column(table: &Matrix<f32>, column: usize, what: &str) -> Result<()> {
    if column >= table.n_cols() {
        return Err(ClimfError::InvalidInput(format!(
            "{what} column {column} out of range for table with {} columns",
            table.n_cols()
        )));
    }
    Ok(())
}

/// `max + 1` over indices, 0 when there are none.
fn inferred_len(indices: impl Iterator<Item = usize>) -> Result<usize> {
    match indices.max() {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            ClimfError::InvalidInput(format!("index {max} leaves no room for a shape"))
        }),
    }
}

/// Largest index an `f32` cell holds exactly (2^24).
const MAX_CELL_INDEX: f32 = 16_777_216.0;

/// Interprets a table cell as a zero-based index.
pub(crate) fn cell_to_index(value: f32) -> Result<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(ClimfError::InvalidInput(format!(
            "expected a non-negative integer index, got {value}"
        )));
    }
    if value > MAX_CELL_INDEX {
        return Err(ClimfError::InvalidInput(format!(
            "index {value} exceeds the exactly representable limit {MAX_CELL_INDEX}"
        )));
    }
    Ok(value as usize)
}

#[cfg(test)]
#[path = "interactions_tests.rs"]
mod tests;
