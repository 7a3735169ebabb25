//! hqr-core: Householder QR factorization
//!
//! Implements the in-place Householder reduction of a tall or square
//! matrix to upper-triangular R, the ragged storage of the reflection
//! vectors that represent Q, application of Q and Q' to vectors, a
//! numerical self-check, deterministic test matrices and JSON reports.

pub mod householder;
pub mod report;
pub mod util;
pub mod verify;

pub use householder::{reduce, reduce_copy, Factorization, HouseholderConfig, QrError, ReflectorSet};
