//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_climf::prelude::*;
//! ```

pub use crate::error::{ClimfError, Result};
pub use crate::metrics::{mean_reciprocal_rank, reciprocal_rank};
pub use crate::primitives::Matrix;
pub use crate::recommend::{CLiMF, CLiMFModel, ClimfConfig, Interactions, UserBatch};
pub use crate::traits::{Learner, Recommender};
