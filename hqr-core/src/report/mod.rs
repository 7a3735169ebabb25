//! Factorization reports and their on-disk form.

pub mod factorization;
pub mod serialization;

pub use factorization::FactorizationReport;
