//! Applying the implicit orthogonal factor to vectors.
//!
//! Q is never materialized. With H_i = I - 2 v_i v_i' acting on rows
//! `i..m`, Q' = H_{n-1} ... H_0 and Q = H_0 ... H_{n-1}.

use hqr_linalg::vector::{partial_scaled_sub, sub_dot};

use super::reflectors::ReflectorSet;

// x[i..m) -= 2 (v . x[i..m)) v
fn reflect(v: &[f64], x: &mut [f64], i: usize) {
    let coef = 2.0 * sub_dot(x, v, v.len(), i);
    partial_scaled_sub(v, coef, i, x);
}

/// Overwrite `x` (length m) with Q' x.
pub fn apply_qt(reflectors: &ReflectorSet, x: &mut [f64]) {
    assert_eq!(x.len(), reflectors.rows());
    for (i, v) in reflectors.iter().enumerate() {
        reflect(v, x, i);
    }
}

/// Overwrite `x` (length m) with Q x.
pub fn apply_q(reflectors: &ReflectorSet, x: &mut [f64]) {
    assert_eq!(x.len(), reflectors.rows());
    for i in (0..reflectors.len()).rev() {
        reflect(reflectors.get(i), x, i);
    }
}
