//! Core compute primitives (Matrix).
//!
//! Dense row-major storage shared by the factor store, the trainer and
//! the predictor.

mod matrix;

pub use matrix::{axpy, dot, Matrix};
