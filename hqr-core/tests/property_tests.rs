//! Property-based tests using proptest.
//!
//! These tests check the guarantees of the Householder reduction over
//! random shapes and seeds rather than fixed numbers:
//!   - every reflection vector has unit norm
//!   - Q R reconstructs the input
//!   - Q'Q is the identity
//!   - R is upper triangular
//!   - a zero pivot column always fails with ZeroNorm

use proptest::prelude::*;

use hqr_core::householder::{reduce, reduce_copy, HouseholderConfig, QrError, ReflectorSet};
use hqr_core::util::fill::{build_matrix, FillPattern};
use hqr_core::verify::check_factorization;

const TOL: f64 = 1e-10;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// (m, n) with 1 <= n <= m <= 12.
fn tall_shape() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=12).prop_flat_map(|m| (Just(m), 1usize..=m))
}

// ---------------------------------------------------------------------------
// 1. Reflection vectors are unit vectors
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_reflectors_have_unit_norm(
        (m, n) in tall_shape(),
        seed in 0u64..10_000,
    ) {
        let a = build_matrix(m, n, FillPattern::Random { seed });
        let f = reduce_copy(&a, &HouseholderConfig::default()).unwrap();

        for (i, v) in f.reflectors.iter().enumerate() {
            prop_assert_eq!(v.len(), m - i);
            let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            prop_assert!((norm - 1.0).abs() < TOL, "||v_{}|| = {}", i, norm);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Round trip and orthogonality
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_qr_reconstructs_and_q_is_orthogonal(
        (m, n) in tall_shape(),
        seed in 0u64..10_000,
    ) {
        let a = build_matrix(m, n, FillPattern::Random { seed });
        let f = reduce_copy(&a, &HouseholderConfig::default()).unwrap();
        let check = check_factorization(&a, &f.r, &f.reflectors).unwrap();

        prop_assert!(check.reconstruction_error < TOL, "|QR - A| = {}", check.reconstruction_error);
        prop_assert!(check.orthogonality_error < TOL, "|Q'Q - I| = {}", check.orthogonality_error);
    }
}

// ---------------------------------------------------------------------------
// 3. R is upper triangular
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_r_is_upper_triangular(
        (m, n) in tall_shape(),
        seed in 0u64..10_000,
        zero_below_diagonal in any::<bool>(),
    ) {
        let a = build_matrix(m, n, FillPattern::Random { seed });
        let config = HouseholderConfig { zero_below_diagonal, ..Default::default() };
        let f = reduce_copy(&a, &config).unwrap();

        for j in 0..n {
            for i in (j + 1)..m {
                let rij = f.r.get(i, j);
                if zero_below_diagonal {
                    prop_assert_eq!(rij, 0.0);
                } else {
                    prop_assert!(rij.abs() < TOL, "R[{},{}] = {}", i, j, rij);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Zero pivot column always raises ZeroNorm
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_zero_first_column_is_rejected(
        (m, n) in tall_shape(),
        seed in 0u64..10_000,
    ) {
        let mut a = build_matrix(m, n, FillPattern::Random { seed });
        a.col_mut(0).fill(0.0);
        let untouched: Vec<Vec<f64>> = (1..n).map(|j| a.col(j).to_vec()).collect();

        let mut v = ReflectorSet::for_shape(m, n).unwrap();
        let err = reduce(&mut a, &mut v, &HouseholderConfig::default()).unwrap_err();

        prop_assert_eq!(err, QrError::ZeroNorm { column: 0 });
        for (k, col) in untouched.iter().enumerate() {
            prop_assert_eq!(a.col(k + 1), col.as_slice());
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Q' Q x = x for arbitrary vectors
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_q_inverts_qt(
        (m, n) in tall_shape(),
        seed in 0u64..10_000,
        x in prop::collection::vec(-10.0f64..10.0, 12),
    ) {
        let a = build_matrix(m, n, FillPattern::Random { seed });
        let f = reduce_copy(&a, &HouseholderConfig::default()).unwrap();

        let original = x[..m].to_vec();
        let mut y = original.clone();
        f.apply_qt(&mut y);
        f.apply_q(&mut y);
        for (yi, xi) in y.iter().zip(original.iter()) {
            prop_assert!((yi - xi).abs() < 1e-9);
        }
    }
}
