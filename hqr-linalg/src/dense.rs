#![allow(clippy::needless_range_loop)]
//! Dense column-major matrix storage.
//!
//! Columns are stored contiguously so the Householder reducer can borrow
//! the active tail of any column as a plain slice. faer is used for
//! products and for handing matrices to faer-based code.

use faer::Mat;

/// A dense matrix stored column by column in a single `Vec<f64>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

impl DenseMatrix {
    /// Create a new dense matrix filled with zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an identity matrix of size n x n.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Create a dense matrix from a flat vec (column-major order).
    pub fn from_col_major(nrows: usize, ncols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), nrows * ncols);
        Self { data, nrows, ncols }
    }

    /// Create a dense matrix from a 2D slice (row-major input).
    pub fn from_row_major(nrows: usize, ncols: usize, data: &[f64]) -> Self {
        assert_eq!(data.len(), nrows * ncols);
        let mut m = Self::zeros(nrows, ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                m.set(i, j, data[i * ncols + j]);
            }
        }
        m
    }

    /// Create a matrix from a list of equally long columns.
    pub fn from_columns(columns: &[Vec<f64>]) -> Self {
        let ncols = columns.len();
        let nrows = columns.first().map_or(0, |c| c.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for c in columns {
            assert_eq!(c.len(), nrows, "all columns must have the same length");
            data.extend_from_slice(c);
        }
        Self { data, nrows, ncols }
    }

    /// Copy a faer matrix into column-major storage.
    pub fn from_faer(mat: &Mat<f64>) -> Self {
        let (nrows, ncols) = (mat.nrows(), mat.ncols());
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(mat.read(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Copy into a faer matrix.
    pub fn to_faer(&self) -> Mat<f64> {
        Mat::from_fn(self.nrows, self.ncols, |i, j| self.get(i, j))
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[col * self.nrows + row]
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[col * self.nrows + row] = value;
    }

    /// Borrow column `j`.
    pub fn col(&self, j: usize) -> &[f64] {
        let start = j * self.nrows;
        &self.data[start..start + self.nrows]
    }

    /// Mutably borrow column `j`.
    pub fn col_mut(&mut self, j: usize) -> &mut [f64] {
        let start = j * self.nrows;
        &mut self.data[start..start + self.nrows]
    }

    /// Contiguous storage of columns `from..ncols`.
    pub fn trailing_mut(&mut self, from: usize) -> &mut [f64] {
        let start = from.min(self.ncols) * self.nrows;
        &mut self.data[start..]
    }

    /// Mutable slices of columns `from..ncols`, one per column.
    pub fn columns_mut(&mut self, from: usize) -> std::slice::ChunksExactMut<'_, f64> {
        // chunks_exact_mut rejects a zero chunk size
        let chunk = self.nrows.max(1);
        self.trailing_mut(from).chunks_exact_mut(chunk)
    }

    /// The raw column-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Matrix-matrix product: self * other.
    pub fn mat_mul(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.ncols, other.nrows);
        let product = &self.to_faer() * &other.to_faer();
        Self::from_faer(&product)
    }

    /// Matrix-vector product: self * v.
    pub fn mat_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.ncols, v.len());
        let mut result = vec![0.0; self.nrows];
        for (j, &vj) in v.iter().enumerate() {
            for (r, a) in result.iter_mut().zip(self.col(j)) {
                *r += a * vj;
            }
        }
        result
    }

    /// Transpose.
    pub fn transpose(&self) -> DenseMatrix {
        let mut t = DenseMatrix::zeros(self.ncols, self.nrows);
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                t.set(j, i, self.get(i, j));
            }
        }
        t
    }

    /// Element-wise subtraction: self - other.
    pub fn sub(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.nrows, other.nrows);
        assert_eq!(self.ncols, other.ncols);
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        DenseMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Largest absolute entry, 0 for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Diagonal entries (min(nrows, ncols) of them).
    pub fn diag(&self) -> Vec<f64> {
        (0..self.nrows.min(self.ncols))
            .map(|i| self.get(i, i))
            .collect()
    }
}

impl std::fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>10.6}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
