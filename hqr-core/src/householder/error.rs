//! Errors raised by the Householder reducer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("Invalid dimensions {rows} x {cols}: need 1 <= cols <= rows")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Shape mismatch in {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Reflection vector for column {column} has zero norm (rank-deficient input)")]
    ZeroNorm { column: usize },
}

/// Check the `1 <= cols <= rows` contract and that `rows * cols` fits.
pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), QrError> {
    if rows == 0 || cols == 0 || cols > rows || rows.checked_mul(cols).is_none() {
        return Err(QrError::InvalidDimension { rows, cols });
    }
    Ok(())
}
