//! In-place Householder QR reduction.
//!
//! For each column i the active tail A[i..m, i] is turned into a unit
//! reflection vector v_i, and H_i = I - 2 v_i v_i' is applied to the
//! tails of columns i..n. Afterwards A holds R and the reflection vectors
//! represent Q implicitly. Roughly 2mn^2 - 2n^3/3 flops, and no scratch
//! memory beyond A and the caller's reflector storage.

use hqr_linalg::dense::DenseMatrix;
use hqr_linalg::vector::{
    partial_copy, partial_dot, partial_scaled_sub, scalar_div_in_place, sub_dot,
};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use super::apply::{apply_q, apply_qt};
use super::error::{check_dimensions, QrError};
use super::reflectors::ReflectorSet;

/// Configuration for the Householder reducer.
#[derive(Debug, Clone)]
pub struct HouseholderConfig {
    /// Force the entries strictly below the diagonal of R to exact zero.
    /// When false they keep whatever rounding residue the reflections left.
    pub zero_below_diagonal: bool,
    /// Reflect the trailing columns of each step on the rayon pool.
    pub parallel: bool,
    /// Minimum number of trailing columns before a step goes parallel.
    pub parallel_min_cols: usize,
}

impl Default for HouseholderConfig {
    fn default() -> Self {
        Self {
            zero_below_diagonal: false,
            parallel: false,
            parallel_min_cols: 64,
        }
    }
}

/// Result of [`reduce_copy`]: R together with the reflection vectors.
#[derive(Debug, Clone)]
pub struct Factorization {
    /// Upper-triangular factor, same shape as the input.
    pub r: DenseMatrix,
    /// Reflection vectors v_0, ..., v_{n-1}.
    pub reflectors: ReflectorSet,
}

impl Factorization {
    /// Overwrite `x` with Q' x.
    pub fn apply_qt(&self, x: &mut [f64]) {
        apply_qt(&self.reflectors, x);
    }

    /// Overwrite `x` with Q x.
    pub fn apply_q(&self, x: &mut [f64]) {
        apply_q(&self.reflectors, x);
    }
}

fn check_shape(a: &DenseMatrix, v: &ReflectorSet) -> Result<(), QrError> {
    check_dimensions(a.nrows(), a.ncols())?;
    if v.len() != a.ncols() {
        return Err(QrError::ShapeMismatch {
            what: "reflection vector count",
            expected: a.ncols(),
            got: v.len(),
        });
    }
    if v.rows() != a.nrows() {
        return Err(QrError::ShapeMismatch {
            what: "reflection vector rows",
            expected: a.nrows(),
            got: v.rows(),
        });
    }
    Ok(())
}

// col[i..m) -= 2 (v . col[i..m)) v
fn reflect_column(v: &[f64], col: &mut [f64], i: usize) {
    let coef = 2.0 * sub_dot(col, v, v.len(), i);
    partial_scaled_sub(v, coef, i, col);
}

/// Factorize `a` in place.
///
/// On success `a` holds R and `v` holds the unit reflection vectors.
/// On error both are left partially updated and must not be used.
pub fn reduce(
    a: &mut DenseMatrix,
    v: &mut ReflectorSet,
    config: &HouseholderConfig,
) -> Result<(), QrError> {
    check_shape(a, v)?;
    let m = a.nrows();
    let n = a.ncols();
    debug!("Householder reduction of {} x {} matrix", m, n);

    // Each step reads the trailing columns left behind by the previous one,
    // so this loop is strictly sequential.
    for i in 0..n {
        let len = m - i;
        let vi = v.get_mut(i);
        partial_copy(a.col(i), vi, len, i);

        // ||v||^2 without the head; unchanged by the head update below
        let tail_norm_sq = partial_dot(vi, vi, len, 1);

        let head = vi[0];
        let sign = if head < 0.0 { -1.0 } else { 1.0 };
        vi[0] = head + sign * (head * head + tail_norm_sq).sqrt();

        let norm = (vi[0] * vi[0] + tail_norm_sq).sqrt();
        if norm == 0.0 {
            warn!("Zero active sub-column at column {}", i);
            return Err(QrError::ZeroNorm { column: i });
        }
        scalar_div_in_place(vi, norm, len);
        trace!("Column {}: reflector norm before scaling {:.6e}", i, norm);

        let vi: &[f64] = vi;
        let trailing = n - i;
        if config.parallel && trailing >= config.parallel_min_cols {
            a.trailing_mut(i)
                .par_chunks_exact_mut(m)
                .for_each(|col| reflect_column(vi, col, i));
        } else {
            a.columns_mut(i).for_each(|col| reflect_column(vi, col, i));
        }

        if config.zero_below_diagonal {
            a.col_mut(i)[i + 1..].fill(0.0);
        }
    }

    debug!("Householder reduction complete");
    Ok(())
}

/// Factorize a copy of `a`, leaving the original untouched.
pub fn reduce_copy(a: &DenseMatrix, config: &HouseholderConfig) -> Result<Factorization, QrError> {
    let mut reflectors = ReflectorSet::for_shape(a.nrows(), a.ncols())?;
    let mut r = a.clone();
    reduce(&mut r, &mut reflectors, config)?;
    Ok(Factorization { r, reflectors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(a: &DenseMatrix) -> Factorization {
        reduce_copy(a, &HouseholderConfig::default()).unwrap()
    }

    #[test]
    fn test_single_entry() {
        let a = DenseMatrix::from_col_major(1, 1, vec![5.0]);
        let f = factor(&a);
        assert_eq!(f.reflectors.get(0), &[1.0]);
        assert_eq!(f.r.get(0, 0), -5.0);
    }

    #[test]
    fn test_negative_head_keeps_sign() {
        // head < 0: v = [-3 - 5, 4] / ||.||, R[0,0] = +5
        let a = DenseMatrix::from_col_major(2, 1, vec![-3.0, 4.0]);
        let f = factor(&a);
        assert!((f.r.get(0, 0) - 5.0).abs() < 1e-12);
        assert!(f.r.get(1, 0).abs() < 1e-12);
        assert!(f.reflectors.get(0)[0] < 0.0);
    }

    #[test]
    fn test_zero_head_treated_as_positive() {
        let a = DenseMatrix::from_col_major(2, 1, vec![0.0, 2.0]);
        let f = factor(&a);
        assert!((f.r.get(0, 0) + 2.0).abs() < 1e-12);
        assert!(f.reflectors.get(0)[0] > 0.0);
    }

    #[test]
    fn test_reflectors_are_unit() {
        let a = DenseMatrix::from_row_major(3, 2, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        let f = factor(&a);
        for v in f.reflectors.iter() {
            let norm_sq: f64 = v.iter().map(|x| x * x).sum();
            assert!((norm_sq - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_column_errors_before_touching_later_columns() {
        let mut a = DenseMatrix::from_row_major(3, 2, &[0.0, 4.0, 0.0, 5.0, 0.0, 6.0]);
        let mut v = ReflectorSet::for_shape(3, 2).unwrap();
        let err = reduce(&mut a, &mut v, &HouseholderConfig::default()).unwrap_err();
        assert_eq!(err, QrError::ZeroNorm { column: 0 });
        assert_eq!(a.col(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_dependent_column_errors_at_its_step() {
        // second column is a multiple of the first, so its tail vanishes
        let a = DenseMatrix::from_row_major(3, 2, &[1.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        let err = reduce_copy(&a, &HouseholderConfig::default()).unwrap_err();
        assert_eq!(err, QrError::ZeroNorm { column: 1 });
    }

    #[test]
    fn test_shape_mismatch() {
        let mut a = DenseMatrix::zeros(3, 2);
        let mut v = ReflectorSet::for_shape(4, 2).unwrap();
        let err = reduce(&mut a, &mut v, &HouseholderConfig::default()).unwrap_err();
        assert!(matches!(err, QrError::ShapeMismatch { .. }));

        let mut v = ReflectorSet::for_shape(3, 1).unwrap();
        let err = reduce(&mut a, &mut v, &HouseholderConfig::default()).unwrap_err();
        assert!(matches!(err, QrError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_wide_matrix_rejected() {
        let a = DenseMatrix::zeros(2, 3);
        let err = reduce_copy(&a, &HouseholderConfig::default()).unwrap_err();
        assert_eq!(err, QrError::InvalidDimension { rows: 2, cols: 3 });
    }

    #[test]
    fn test_zero_below_diagonal() {
        let a = DenseMatrix::from_row_major(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0]);
        let config = HouseholderConfig {
            zero_below_diagonal: true,
            ..Default::default()
        };
        let f = reduce_copy(&a, &config).unwrap();
        for j in 0..2 {
            for i in (j + 1)..4 {
                assert_eq!(f.r.get(i, j), 0.0);
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = DenseMatrix::from_row_major(
            4,
            3,
            &[2.0, -1.0, 0.5, 1.0, 3.0, -2.0, 0.0, 1.0, 4.0, 1.5, 0.0, 1.0],
        );
        let seq = factor(&a);
        let par = reduce_copy(
            &a,
            &HouseholderConfig {
                parallel: true,
                parallel_min_cols: 1,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(seq.r, par.r);
        assert_eq!(seq.reflectors, par.reflectors);
    }

    #[test]
    fn test_qt_maps_columns_onto_r() {
        let a = DenseMatrix::from_row_major(3, 2, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        let f = factor(&a);
        for j in 0..2 {
            let mut x = a.col(j).to_vec();
            f.apply_qt(&mut x);
            for i in 0..3 {
                assert!((x[i] - f.r.get(i, j)).abs() < 1e-10);
            }
        }
    }
}
