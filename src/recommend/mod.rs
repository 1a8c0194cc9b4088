//! Recommendation systems.
//!
//! This module provides CLiMF (Collaborative Less-is-More Filtering), a
//! matrix-factorization recommender for implicit feedback that optimizes
//! Mean Reciprocal Rank, so the first few recommended items are the ones
//! that matter.
//!
//! # Components
//!
//! - [`Interactions`]: observed `(user, item)` pairs with their shape
//! - [`FactorStore`]: user and item factor matrices and their initialization
//! - [`Trainer`]: the SGD loop over users and their items
//! - [`CLiMF`]: learner configuration and `fit`
//! - [`CLiMFModel`]: immutable trained model and prediction
//! - [`UserBatch`]: conversion of serving payloads into user indices
//!
//! # Quick Start
//!
//! ```
//! use aprender_climf::recommend::{CLiMF, Interactions};
//!
//! let data = Interactions::new(vec![(0, 1), (0, 2), (1, 0), (2, 3)], (3, 4))
//!     .expect("indices inside the shape");
//! let model = CLiMF::new()
//!     .with_steps(50)
//!     .with_alpha(0.01)
//!     .with_beta(0.01)
//!     .with_random_state(7)
//!     .fit(&data)
//!     .expect("valid config");
//!
//! let ranked = model.predict(&[0], None);
//! let mut sorted = ranked[0].clone();
//! sorted.sort_unstable();
//! assert_eq!(sorted, vec![0, 1, 2, 3]);
//! ```

pub mod batch;
pub mod climf;
pub mod factors;
pub mod interactions;
pub mod model;
pub mod trainer;

pub use batch::UserBatch;
pub use climf::{ClimfConfig, CLiMF};
pub use factors::FactorStore;
pub use interactions::{ColumnOrder, Interactions, DEFAULT_ORDER};
pub use model::CLiMFModel;
pub use trainer::{EpochStats, TrainOutcome, Trainer};
