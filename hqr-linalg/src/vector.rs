//! Vector primitives over contiguous ranges.
//!
//! Every routine works on plain slices with an explicit length and offset,
//! performs a single pass and never allocates. Ranges that fall outside the
//! slices panic the same way ordinary slice indexing does.

/// Copy `src[offset..offset + len]` into `dst[..len]`.
pub fn partial_copy(src: &[f64], dst: &mut [f64], len: usize, offset: usize) {
    dst[..len].copy_from_slice(&src[offset..offset + len]);
}

/// Sum of `u[k] * w[k]` for `k` in `skip..len`.
pub fn partial_dot(u: &[f64], w: &[f64], len: usize, skip: usize) -> f64 {
    if skip >= len {
        return 0.0;
    }
    u[skip..len]
        .iter()
        .zip(w[skip..len].iter())
        .map(|(a, b)| a * b)
        .sum()
}

/// Sum of `u[offset + k] * v[k]` for `k` in `0..len`.
pub fn sub_dot(u: &[f64], v: &[f64], len: usize, offset: usize) -> f64 {
    u[offset..offset + len]
        .iter()
        .zip(v[..len].iter())
        .map(|(a, b)| a * b)
        .sum()
}

/// `out[k] = v[k] / scalar` for `k` in `0..len`.
pub fn scalar_div(v: &[f64], scalar: f64, len: usize, out: &mut [f64]) {
    out[..len]
        .iter_mut()
        .zip(v[..len].iter())
        .for_each(|(o, x)| *o = x / scalar);
}

/// `v[k] /= scalar` for `k` in `0..len`.
pub fn scalar_div_in_place(v: &mut [f64], scalar: f64, len: usize) {
    v[..len].iter_mut().for_each(|x| *x /= scalar);
}

/// `inout[offset + k] -= coef * v[k]` for every `k` in `0..v.len()`.
pub fn partial_scaled_sub(v: &[f64], coef: f64, offset: usize, inout: &mut [f64]) {
    if coef == 0.0 {
        return;
    }
    inout[offset..offset + v.len()]
        .iter_mut()
        .zip(v.iter())
        .for_each(|(y, x)| *y -= coef * x);
}

/// Inner product of the first `len` entries.
pub fn dot(u: &[f64], v: &[f64], len: usize) -> f64 {
    partial_dot(u, v, len, 0)
}
