//! FactorizationReport: everything the driver prints, in serializable form.

use hqr_linalg::dense::DenseMatrix;
use serde::{Deserialize, Serialize};

use crate::householder::error::check_dimensions;
use crate::householder::{Factorization, HouseholderConfig, QrError, ReflectorSet};
use crate::util::fill::FillPattern;
use crate::verify::FactorizationCheck;

/// A finished factorization together with its input and self-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorizationReport {
    /// Format tag for validation.
    pub format: String,
    /// Version number for forward compatibility.
    pub version: u32,
    /// Number of rows m.
    pub rows: usize,
    /// Number of columns n.
    pub cols: usize,
    /// How the input matrix was generated.
    pub fill: FillPattern,
    /// Whether the lower triangle of R was forced to zero.
    pub zero_below_diagonal: bool,
    /// Input matrix as flat col-major vector (m x n).
    pub input_flat: Vec<f64>,
    /// R as flat col-major vector (m x n).
    pub r_flat: Vec<f64>,
    /// Reflection vectors; entry i has m - i values.
    pub reflectors: Vec<Vec<f64>>,
    /// Numerical self-check.
    pub check: FactorizationCheck,
}

impl FactorizationReport {
    pub const FORMAT: &'static str = "hqr-report";
    pub const VERSION: u32 = 1;

    pub fn new(
        input: &DenseMatrix,
        factorization: &Factorization,
        fill: FillPattern,
        config: &HouseholderConfig,
        check: FactorizationCheck,
    ) -> Self {
        Self {
            format: Self::FORMAT.to_string(),
            version: Self::VERSION,
            rows: input.nrows(),
            cols: input.ncols(),
            fill,
            zero_below_diagonal: config.zero_below_diagonal,
            input_flat: input.as_slice().to_vec(),
            r_flat: factorization.r.as_slice().to_vec(),
            reflectors: factorization.reflectors.to_vecs(),
            check,
        }
    }

    /// Check that the stored shape and every stored buffer agree.
    pub fn validate(&self) -> Result<(), QrError> {
        check_dimensions(self.rows, self.cols)?;
        let entries = self.rows * self.cols;
        for (what, len) in [
            ("stored input entries", self.input_flat.len()),
            ("stored R entries", self.r_flat.len()),
        ] {
            if len != entries {
                return Err(QrError::ShapeMismatch {
                    what,
                    expected: entries,
                    got: len,
                });
            }
        }
        if self.reflectors.len() != self.cols {
            return Err(QrError::ShapeMismatch {
                what: "stored reflection vector count",
                expected: self.cols,
                got: self.reflectors.len(),
            });
        }
        Ok(())
    }

    /// The input matrix.
    pub fn input(&self) -> Result<DenseMatrix, QrError> {
        self.validate()?;
        Ok(DenseMatrix::from_col_major(
            self.rows,
            self.cols,
            self.input_flat.clone(),
        ))
    }

    /// Rebuild R and the reflectors.
    pub fn factorization(&self) -> Result<Factorization, QrError> {
        self.validate()?;
        Ok(Factorization {
            r: DenseMatrix::from_col_major(self.rows, self.cols, self.r_flat.clone()),
            reflectors: ReflectorSet::from_vectors(self.rows, &self.reflectors)?,
        })
    }
}
