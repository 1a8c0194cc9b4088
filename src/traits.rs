//! Core traits for recommendation learners and models.
//!
//! A [`Learner`] turns an interaction table into a trained model; a
//! [`Recommender`] ranks items for users. Learners are configuration only,
//! models are immutable, so one learner can produce many independent models.

use crate::error::Result;
use crate::recommend::Interactions;

/// Trainable recommendation algorithm.
///
/// # Examples
///
/// ```
/// use aprender_climf::prelude::*;
///
/// fn train_any<L: Learner>(learner: &L, data: &Interactions) -> L::Model {
///     learner.fit(data).expect("training succeeds")
/// }
///
/// let data = Interactions::new(vec![(0, 0), (1, 1)], (2, 2)).unwrap();
/// let model = train_any(&CLiMF::new().with_steps(5).with_random_state(0), &data);
/// assert_eq!(model.n_items(), 2);
/// ```
pub trait Learner {
    /// The trained model type.
    type Model: Recommender;

    /// Fits a model to the interactions.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (invalid hyperparameters, empty data, etc.).
    fn fit(&self, data: &Interactions) -> Result<Self::Model>;

    /// Human-readable algorithm name.
    fn name(&self) -> &'static str;
}

/// Trained model that ranks items for users.
pub trait Recommender {
    /// Number of users known to the model.
    fn n_users(&self) -> usize;

    /// Number of items the model can rank.
    fn n_items(&self) -> usize;

    /// Ranked item lists (best first), one per requested user, each truncated
    /// to `top_k` when given. Must not fail for unknown users.
    fn predict(&self, users: &[usize], top_k: Option<usize>) -> Vec<Vec<usize>>;

    /// Ranked items for one user.
    fn recommend(&self, user: usize, top_k: Option<usize>) -> Vec<usize> {
        self.predict(&[user], top_k).into_iter().next().unwrap_or_default()
    }
}
