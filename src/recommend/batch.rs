//! Prediction-boundary adapter.
//!
//! The predictor core only accepts a slice of user indices. [`UserBatch`]
//! converts the formats a serving layer hands over into that form.

use serde_json::Value;

use super::interactions::{cell_to_index, check_column};
use crate::error::{ClimfError, Result};
use crate::primitives::Matrix;

/// A batch of user references in one of the accepted external formats.
///
/// # Examples
///
/// ```
/// use aprender_climf::recommend::UserBatch;
///
/// let batch = UserBatch::try_from(&serde_json::json!([0, 2, 7])).unwrap();
/// assert_eq!(batch.into_user_indices(0).unwrap(), vec![0, 2, 7]);
///
/// let rows = UserBatch::try_from(&serde_json::json!([[3, 1], [4, 0]])).unwrap();
/// assert_eq!(rows.into_user_indices(1).unwrap(), vec![1, 0]);
///
/// assert!(UserBatch::try_from(&serde_json::json!("user-1")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum UserBatch {
    /// Raw zero-based user indices.
    Indices(Vec<usize>),
    /// Tabular rows; users are read from the model's user column.
    Table(Matrix<f32>),
}

impl UserBatch {
    /// Extracts user indices, reading column `user_column` for tables.
    ///
    /// Indices are not range-checked here; the predictor substitutes
    /// unknown users.
    ///
    /// # Errors
    ///
    /// Returns an error if the user column does not exist or a cell is not a
    /// non-negative integer.
    pub fn into_user_indices(self, user_column: usize) -> Result<Vec<usize>> {
        match self {
            Self::Indices(users) => Ok(users),
            Self::Table(table) => {
                check_column(&table, user_column, "user")?;
                table.rows().map(|row| cell_to_index(row[user_column])).collect()
            }
        }
    }
}

impl From<Vec<usize>> for UserBatch {
    fn from(users: Vec<usize>) -> Self {
        Self::Indices(users)
    }
}

impl From<&[usize]> for UserBatch {
    fn from(users: &[usize]) -> Self {
        Self::Indices(users.to_vec())
    }
}

impl From<Matrix<f32>> for UserBatch {
    fn from(table: Matrix<f32>) -> Self {
        Self::Table(table)
    }
}

impl TryFrom<&Value> for UserBatch {
    type Error = ClimfError;

    /// Accepts an array of integers (indices) or an array of equally long
    /// numeric arrays (tabular rows). Anything else is rejected with the
    /// JSON type named in the error.
    fn try_from(value: &Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(unsupported(value));
        };

        match items.first() {
            None => Ok(Self::Indices(Vec::new())),
            Some(Value::Array(_)) => json_table(items).map(Self::Table),
            Some(Value::Number(_)) => items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => json_index(n),
                    other => Err(unsupported(other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Indices),
            Some(other) => Err(unsupported(other)),
        }
    }
}

fn json_table(rows: &[Value]) -> Result<Matrix<f32>> {
    let width = match rows.first() {
        Some(Value::Array(first)) => first.len(),
        _ => 0,
    };
    let mut data = Vec::with_capacity(rows.len() * width);
    for row in rows {
        let Value::Array(cells) = row else {
            return Err(unsupported(row));
        };
        if cells.len() != width {
            return Err(ClimfError::dimension_mismatch("row width", width, cells.len()));
        }
        for cell in cells {
            match cell {
                Value::Number(n) => data.push(n.as_f64().unwrap_or(f64::NAN) as f32),
                other => return Err(unsupported(other)),
            }
        }
    }
    Matrix::from_vec(rows.len(), width, data)
}

fn json_index(n: &serde_json::Number) -> Result<usize> {
    n.as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| ClimfError::InvalidInput(format!("expected a non-negative integer index, got {n}")))
}

fn unsupported(value: &Value) -> ClimfError {
    let type_name = match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    ClimfError::UnsupportedInput {
        type_name: type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_indices_pass_through() {
        let batch = UserBatch::from(vec![5, 0, 5]);
        assert_eq!(batch.into_user_indices(3).unwrap(), vec![5, 0, 5]);
    }

    #[test]
    fn test_table_reads_user_column() {
        let table = Matrix::from_vec(2, 3, vec![9.0, 1.0, 0.0, 9.0, 4.0, 2.0]).unwrap();
        assert_eq!(UserBatch::from(table).into_user_indices(1).unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_table_missing_column() {
        let table = Matrix::from_vec(1, 2, vec![0.0, 1.0]).unwrap();
        let err = UserBatch::from(table).into_user_indices(2).unwrap_err();
        assert!(matches!(err, ClimfError::InvalidInput(_)));
    }

    #[test]
    fn test_table_rejects_fractional_user() {
        let table = Matrix::from_vec(1, 1, vec![1.5]).unwrap();
        assert!(UserBatch::from(table).into_user_indices(0).is_err());
    }

    #[test]
    fn test_json_indices() {
        let batch = UserBatch::try_from(&json!([3, 1])).unwrap();
        assert_eq!(batch, UserBatch::Indices(vec![3, 1]));
    }

    #[test]
    fn test_json_empty_array() {
        let batch = UserBatch::try_from(&json!([])).unwrap();
        assert_eq!(batch, UserBatch::Indices(vec![]));
    }

    #[test]
    fn test_json_rows() {
        let batch = UserBatch::try_from(&json!([[0, 1], [2, 3]])).unwrap();
        let UserBatch::Table(table) = batch else {
            panic!("expected a table");
        };
        assert_eq!(table.shape(), (2, 2));
        assert!((table.get(1, 0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_ragged_rows() {
        let err = UserBatch::try_from(&json!([[0, 1], [2]])).unwrap_err();
        assert!(matches!(err, ClimfError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_json_negative_index() {
        let err = UserBatch::try_from(&json!([-1])).unwrap_err();
        assert!(matches!(err, ClimfError::InvalidInput(_)));
    }

    #[test]
    fn test_json_unrecognized_types_are_named() {
        for (value, name) in [
            (json!("users"), "string"),
            (json!({"user": 1}), "object"),
            (json!(null), "null"),
            (json!(3), "number"),
            (json!(["a"]), "string"),
            (json!([1, true]), "bool"),
        ] {
            match UserBatch::try_from(&value) {
                Err(ClimfError::UnsupportedInput { type_name }) => assert_eq!(type_name, name),
                other => panic!("expected UnsupportedInput for {value}, got {other:?}"),
            }
        }
    }
}
