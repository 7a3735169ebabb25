//! Numerical self-check of a finished factorization.
//!
//! Measures how far the result is from the guarantees of Householder QR:
//! unit reflection vectors, Q R = A, Q'Q = I and a zero lower triangle.
//! Q is rebuilt column by column for the orthogonality check only.

use hqr_linalg::dense::DenseMatrix;
use hqr_linalg::vector::dot;
use serde::{Deserialize, Serialize};

use crate::householder::{apply_q, QrError, ReflectorSet};

/// Deviations measured by [`check_factorization`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorizationCheck {
    /// Euclidean norm of every reflection vector.
    pub reflector_norms: Vec<f64>,
    /// max_i | ||v_i|| - 1 |
    pub max_norm_deviation: f64,
    /// max |Q R - A| over all entries.
    pub reconstruction_error: f64,
    /// max |Q'Q - I| over the first n columns of Q.
    pub orthogonality_error: f64,
    /// Largest absolute entry of R strictly below the diagonal.
    pub max_below_diagonal: f64,
}

impl FactorizationCheck {
    /// True when every deviation is within `tol`.
    pub fn passes(&self, tol: f64) -> bool {
        self.max_norm_deviation <= tol
            && self.reconstruction_error <= tol
            && self.orthogonality_error <= tol
            && self.max_below_diagonal <= tol
    }
}

/// Compare `r` and `reflectors` against the matrix they were computed from.
pub fn check_factorization(
    original: &DenseMatrix,
    r: &DenseMatrix,
    reflectors: &ReflectorSet,
) -> Result<FactorizationCheck, QrError> {
    let m = original.nrows();
    let n = original.ncols();
    if r.nrows() != m || reflectors.rows() != m {
        return Err(QrError::ShapeMismatch {
            what: "factor rows",
            expected: m,
            got: if r.nrows() != m { r.nrows() } else { reflectors.rows() },
        });
    }
    if r.ncols() != n || reflectors.len() != n {
        return Err(QrError::ShapeMismatch {
            what: "factor columns",
            expected: n,
            got: if r.ncols() != n { r.ncols() } else { reflectors.len() },
        });
    }

    let reflector_norms: Vec<f64> = reflectors
        .iter()
        .map(|v| dot(v, v, v.len()).sqrt())
        .collect();
    let max_norm_deviation = reflector_norms
        .iter()
        .fold(0.0_f64, |acc, nv| acc.max((nv - 1.0).abs()));

    let mut reconstruction_error = 0.0_f64;
    let mut x = vec![0.0; m];
    for j in 0..n {
        x.copy_from_slice(r.col(j));
        apply_q(reflectors, &mut x);
        for (qr, a) in x.iter().zip(original.col(j)) {
            reconstruction_error = reconstruction_error.max((qr - a).abs());
        }
    }

    let q_cols: Vec<Vec<f64>> = (0..n)
        .map(|k| {
            let mut e = vec![0.0; m];
            e[k] = 1.0;
            apply_q(reflectors, &mut e);
            e
        })
        .collect();
    let mut orthogonality_error = 0.0_f64;
    for k in 0..n {
        for l in k..n {
            let expected = if k == l { 1.0 } else { 0.0 };
            let g = dot(&q_cols[k], &q_cols[l], m);
            orthogonality_error = orthogonality_error.max((g - expected).abs());
        }
    }

    let mut max_below_diagonal = 0.0_f64;
    for j in 0..n {
        for &rij in &r.col(j)[j + 1..] {
            max_below_diagonal = max_below_diagonal.max(rij.abs());
        }
    }

    Ok(FactorizationCheck {
        reflector_norms,
        max_norm_deviation,
        reconstruction_error,
        orthogonality_error,
        max_below_diagonal,
    })
}
