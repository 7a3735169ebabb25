//! Householder QR factorization.

pub mod apply;
pub mod error;
pub mod reducer;
pub mod reflectors;

pub use apply::{apply_q, apply_qt};
pub use error::QrError;
pub use reducer::{reduce, reduce_copy, Factorization, HouseholderConfig};
pub use reflectors::ReflectorSet;
