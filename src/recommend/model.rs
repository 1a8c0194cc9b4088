//! Trained CLiMF model and the prediction path.

use std::fs;
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::batch::UserBatch;
use super::factors::FactorStore;
use super::interactions::{ColumnOrder, Interactions};
use crate::error::{ClimfError, Result};
use crate::metrics::ranking::mean_reciprocal_rank;
use crate::primitives::{dot, Matrix};
use crate::traits::Recommender;

/// Immutable snapshot of learned factors: `(U, V, order)`.
///
/// A model is read-only after training and can serve any number of
/// concurrent prediction calls.
///
/// # Examples
///
/// ```
/// use aprender_climf::prelude::*;
///
/// let data = Interactions::new(vec![(0, 1), (0, 2), (1, 0), (2, 3)], (3, 4)).unwrap();
/// let model = CLiMF::new().with_steps(10).with_random_state(42).fit(&data).unwrap();
///
/// let ranked = model.predict(&[0, 99], None);
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked[0].len(), 4); // every item, best first
/// assert_eq!(ranked[1].len(), 4); // unknown user 99 falls back to a random known user
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CLiMFModel {
    user_factors: Matrix<f32>,
    item_factors: Matrix<f32>,
    order: ColumnOrder,
}

impl CLiMFModel {
    /// Display name of the algorithm.
    pub const NAME: &'static str = "CLiMF";

    /// Wraps a finished factor store.
    #[must_use]
    pub fn new(factors: FactorStore, order: ColumnOrder) -> Self {
        let (user_factors, item_factors) = factors.into_parts();
        Self {
            user_factors,
            item_factors,
            order,
        }
    }

    /// Builds a model from raw factor matrices.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrices disagree on K or K is zero.
    pub fn from_factors(
        user_factors: Matrix<f32>,
        item_factors: Matrix<f32>,
        order: ColumnOrder,
    ) -> Result<Self> {
        Ok(Self::new(
            FactorStore::from_matrices(user_factors, item_factors)?,
            order,
        ))
    }

    /// Algorithm name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        Self::NAME
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

    /// Column order `(user_column, item_column)` of the training table.
    #[must_use]
    pub fn order(&self) -> ColumnOrder {
        self.order
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

    /// Raw scores `U[user] · V^T`, one per item.
    ///
    /// # Panics
    ///
    /// Panics if `user >= num_users`.
    #[must_use]
    pub fn predict_scores(&self, user: usize) -> Vec<f32> {
        score_items(self.user_factors.row(user), &self.item_factors)
    }

    /// Ranked items for each user, best first, truncated to `top_k` when given.
    ///
    /// Users outside `[0, num_users)` are replaced by a uniformly random
    /// known user, so the call never fails. Output order follows `users`.
    #[must_use]
    pub fn predict(&self, users: &[usize], top_k: Option<usize>) -> Vec<Vec<usize>> {
        self.predict_with_rng(users, top_k, &mut StdRng::from_entropy())
    }

    /// [`CLiMFModel::predict`] drawing substitutes from `rng`.
    #[must_use]
    pub fn predict_with_rng<R: Rng + ?Sized>(
        &self,
        users: &[usize],
        top_k: Option<usize>,
        rng: &mut R,
    ) -> Vec<Vec<usize>> {
        let resolved = self.resolve_users(users, rng);

        #[cfg(feature = "parallel")]
        let rankings = resolved
            .par_iter()
            .map(|&user| self.rank_user(user, top_k))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rankings = resolved
            .iter()
            .map(|&user| self.rank_user(user, top_k))
            .collect();

        rankings
    }

    /// Ranked items for a single user (same substitution policy).
    #[must_use]
    pub fn recommend(&self, user: usize, top_k: Option<usize>) -> Vec<usize> {
        let resolved = self.resolve_users(&[user], &mut StdRng::from_entropy());
        self.rank_user(resolved[0], top_k)
    }

    /// Predicts for a boundary batch (indices, tabular rows, or JSON).
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be converted to user indices.
    pub fn predict_batch(&self, batch: UserBatch, top_k: Option<usize>) -> Result<Vec<Vec<usize>>> {
        let users = batch.into_user_indices(self.order.0)?;
        Ok(self.predict(&users, top_k))
    }

    /// MRR of full rankings against held-out interactions.
    ///
    /// Only users that have at least one held-out item are scored; returns
    /// 0.0 when there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if `held_out` has a different shape than the model.
    pub fn evaluate_mrr(&self, held_out: &Interactions) -> Result<f32> {
        if held_out.shape() != self.shape() {
            return Err(ClimfError::DimensionMismatch {
                expected: format!("{:?}", self.shape()),
                actual: format!("{:?}", held_out.shape()),
            });
        }
        let users: Vec<usize> = held_out.active_users().collect();
        let rankings: Vec<Vec<usize>> = users.iter().map(|&u| self.rank_user(u, None)).collect();
        Ok(mean_reciprocal_rank(
            &rankings,
            &held_out.relevant_items(&users),
        ))
    }

    /// Saves the model to a binary file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        fs::write(path.as_ref(), bytes)?;
        debug!("saved CLiMF model {:?} to {}", self.shape(), path.as_ref().display());
        Ok(())
    }

    /// Loads a model from a binary file.
    ///
    /// # Errors
    ///
    /// Returns an error if file reading or deserialization fails, or the
    /// stored factor matrices are inconsistent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        let model: Self = bincode::deserialize(&bytes)?;
        let Self {
            user_factors,
            item_factors,
            order,
        } = model;
        let model = Self::from_factors(user_factors, item_factors, order)?;
        debug!("loaded CLiMF model {:?} from {}", model.shape(), path.as_ref().display());
        Ok(model)
    }

    fn resolve_users<R: Rng + ?Sized>(&self, users: &[usize], rng: &mut R) -> Vec<usize> {
        let num_users = self.user_factors.n_rows();
        users
            .iter()
            .map(|&u| if u < num_users { u } else { rng.gen_range(0..num_users) })
            .collect()
    }

    fn rank_user(&self, user: usize, top_k: Option<usize>) -> Vec<usize> {
        let mut ranking = rank_by_score(&self.predict_scores(user));
        if let Some(k) = top_k {
            ranking.truncate(k);
        }
        ranking
    }
}

impl Recommender for CLiMFModel {
    fn n_users(&self) -> usize {
        self.shape().0
    }

    fn n_items(&self) -> usize {
        self.shape().1
    }

    fn predict(&self, users: &[usize], top_k: Option<usize>) -> Vec<Vec<usize>> {
        CLiMFModel::predict(self, users, top_k)
    }

    fn recommend(&self, user: usize, top_k: Option<usize>) -> Vec<usize> {
        CLiMFModel::recommend(self, user, top_k)
    }
}

/// Scores every item row of `item_factors` against one user row.
pub(crate) fn score_items(user_row: &[f32], item_factors: &Matrix<f32>) -> Vec<f32> {
    item_factors.rows().map(|v| dot(user_row, v)).collect()
}

/// Item indices sorted by descending score; equal scores keep index order.
pub(crate) fn rank_by_score(scores: &[f32]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    indices
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
