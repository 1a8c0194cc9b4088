//! Evaluation metrics for recommendation models.
//!
//! Ranking metrics (reciprocal rank, MRR) used both for training
//! diagnostics and for held-out evaluation.

pub mod ranking;

pub use ranking::{mean_reciprocal_rank, reciprocal_rank};
