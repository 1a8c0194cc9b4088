//! Error types for CLiMF operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for CLiMF operations.
///
/// Covers invalid hyperparameters, malformed interaction data, unsupported
/// inputs at the prediction boundary, and persistence failures.
///
/// # Examples
///
/// ```
/// use aprender_climf::error::ClimfError;
///
/// let err = ClimfError::InvalidHyperparameter {
///     param: "n_factors".to_string(),
///     value: "0".to_string(),
///     constraint: ">= 1".to_string(),
/// };
/// assert!(err.to_string().contains("n_factors"));
/// ```
#[derive(Debug, Error)]
pub enum ClimfError {
    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Matrix dimensions don't match for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// An interaction refers to a user or item outside the declared shape.
    #[error("{what} index {index} out of range (bound={bound})")]
    IndexOutOfRange {
        /// Which axis was violated ("user" or "item")
        what: &'static str,
        /// Offending index
        index: usize,
        /// Exclusive upper bound
        bound: usize,
    },

    /// Training data is empty along some axis.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Input values that cannot be interpreted as indices.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognized input kind at the prediction boundary.
    #[error("Unrecognized argument (instance of '{type_name}')")]
    UnsupportedInput {
        /// Name of the rejected input type
        type_name: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ClimfError {
    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }
}

impl From<bincode::Error> for ClimfError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ClimfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ClimfError>;
