//! hqr-linalg: Linear algebra building blocks for Householder QR
//!
//! Provides the column-major dense matrix used throughout the workspace
//! and the allocation-free vector primitives the reducer is written in.

pub mod dense;
pub mod vector;

pub use dense::DenseMatrix;
