//! Utility functions.

pub mod fill;
