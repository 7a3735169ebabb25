//! Deterministic test matrices.

use hqr_linalg::dense::DenseMatrix;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Rule used to populate an `m x n` test matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillPattern {
    /// Zero above the diagonal, `row - col + 1` on and below it.
    Staircase,
    /// Uniform entries in [-1, 1) from a seeded ChaCha8 stream.
    Random { seed: u64 },
    /// `1 / (row + col + 1)`; full rank but badly conditioned.
    Hilbert,
}

impl std::fmt::Display for FillPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillPattern::Staircase => write!(f, "staircase"),
            FillPattern::Random { seed } => write!(f, "random (seed {})", seed),
            FillPattern::Hilbert => write!(f, "hilbert"),
        }
    }
}

/// Build an `m x n` matrix following `pattern`.
pub fn build_matrix(m: usize, n: usize, pattern: FillPattern) -> DenseMatrix {
    let mut a = DenseMatrix::zeros(m, n);
    match pattern {
        FillPattern::Staircase => {
            for j in 0..n {
                for i in j..m {
                    a.set(i, j, (i - j + 1) as f64);
                }
            }
        }
        FillPattern::Random { seed } => {
            let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
            for j in 0..n {
                for i in 0..m {
                    a.set(i, j, rng.gen_range(-1.0..1.0));
                }
            }
        }
        FillPattern::Hilbert => {
            for j in 0..n {
                for i in 0..m {
                    a.set(i, j, 1.0 / (i + j + 1) as f64);
                }
            }
        }
    }
    a
}
