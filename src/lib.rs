//! Aprender CLiMF: Collaborative Less-is-More Filtering in pure Rust.
//!
//! CLiMF learns user and item latent factors from implicit feedback
//! (binary "user interacted with item" data) by maximizing a smooth lower
//! bound of the Mean Reciprocal Rank, so the top of each user's ranking is
//! what gets optimized.
//!
//! # Quick Start
//!
//! ```
//! use aprender_climf::prelude::*;
//!
//! // Three users, four items
//! let data = Interactions::new(vec![(0, 1), (0, 2), (1, 0), (2, 3)], (3, 4)).unwrap();
//!
//! let model = CLiMF::new()
//!     .with_n_factors(2)
//!     .with_steps(100)
//!     .with_alpha(0.01)
//!     .with_beta(0.01)
//!     .with_random_state(42)
//!     .fit(&data)
//!     .unwrap();
//!
//! // Top-2 items for users 0 and 1
//! let top = model.predict(&[0, 1], Some(2));
//! assert_eq!(top.len(), 2);
//! assert!(top.iter().all(|items| items.len() == 2));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major `Matrix` storage and vector kernels
//! - [`activation`]: Numerically stable logistic sigmoid
//! - [`metrics`]: Ranking metrics (reciprocal rank, MRR)
//! - [`recommend`]: Interactions, the CLiMF learner, trainer and model
//! - [`traits`]: `Learner` / `Recommender` abstractions
//! - [`error`]: Error type shared by every fallible operation
//!
//! # Features
//!
//! - `parallel` (default): batch prediction scores users with rayon.

pub mod activation;
pub mod error;
pub mod metrics;
pub mod prelude;
pub mod primitives;
pub mod recommend;
pub mod traits;

pub use error::{ClimfError, Result};
pub use primitives::Matrix;
pub use recommend::{CLiMF, CLiMFModel, ClimfConfig, Interactions};
pub use traits::{Learner, Recommender};
