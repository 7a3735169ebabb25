//! Ragged storage for Householder reflection vectors.
//!
//! Vector `i` of an `m x n` factorization has `m - i` entries. All `n`
//! vectors live back to back in one buffer of `n*m - n(n-1)/2` values.

use super::error::{check_dimensions, QrError};

/// The reflection vectors v_0, ..., v_{n-1} of a Householder QR.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectorSet {
    data: Vec<f64>,
    rows: usize,
    count: usize,
}

impl ReflectorSet {
    /// Allocate zeroed storage for an `rows x cols` factorization.
    pub fn for_shape(rows: usize, cols: usize) -> Result<Self, QrError> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            data: vec![0.0; Self::offset_of(rows, cols)],
            rows,
            count: cols,
        })
    }

    /// Build from explicit vectors; vector `i` must have `rows - i` entries.
    pub fn from_vectors(rows: usize, vectors: &[Vec<f64>]) -> Result<Self, QrError> {
        let mut set = Self::for_shape(rows, vectors.len())?;
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != rows - i {
                return Err(QrError::ShapeMismatch {
                    what: "reflection vector length",
                    expected: rows - i,
                    got: v.len(),
                });
            }
            set.get_mut(i).copy_from_slice(v);
        }
        Ok(set)
    }

    // start of vector i in the flat buffer
    fn offset_of(rows: usize, i: usize) -> usize {
        i * rows - i * i.saturating_sub(1) / 2
    }

    /// Number of rows of the factorized matrix (length of v_0).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of reflection vectors.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when there are no reflection vectors.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reflection vector `i`, of length `rows - i`.
    pub fn get(&self, i: usize) -> &[f64] {
        assert!(i < self.count, "reflector index {} out of range", i);
        let start = Self::offset_of(self.rows, i);
        &self.data[start..start + self.rows - i]
    }

    /// Mutable reflection vector `i`.
    pub fn get_mut(&mut self, i: usize) -> &mut [f64] {
        assert!(i < self.count, "reflector index {} out of range", i);
        let start = Self::offset_of(self.rows, i);
        &mut self.data[start..start + self.rows - i]
    }

    /// Iterate over v_0, v_1, ... in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[f64]> + '_ {
        (0..self.count).map(move |i| self.get(i))
    }

    /// Copy every vector out, e.g. for serialization.
    pub fn to_vecs(&self) -> Vec<Vec<f64>> {
        self.iter().map(|v| v.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_decrease() {
        let set = ReflectorSet::for_shape(5, 3).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0).len(), 5);
        assert_eq!(set.get(1).len(), 4);
        assert_eq!(set.get(2).len(), 3);
        assert_eq!(set.data.len(), 12);
    }

    #[test]
    fn test_square_last_vector_is_scalar() {
        let set = ReflectorSet::for_shape(4, 4).unwrap();
        assert_eq!(set.get(3).len(), 1);
        assert_eq!(set.data.len(), 10);
    }

    #[test]
    fn test_vectors_do_not_overlap() {
        let mut set = ReflectorSet::for_shape(3, 3).unwrap();
        for i in 0..3 {
            set.get_mut(i).fill(i as f64 + 1.0);
        }
        assert_eq!(set.get(0), &[1.0, 1.0, 1.0]);
        assert_eq!(set.get(1), &[2.0, 2.0]);
        assert_eq!(set.get(2), &[3.0]);
    }

    #[test]
    fn test_from_vectors() {
        let set = ReflectorSet::from_vectors(2, &[vec![1.0, 0.0], vec![1.0]]).unwrap();
        assert_eq!(set.to_vecs(), vec![vec![1.0, 0.0], vec![1.0]]);

        let bad = ReflectorSet::from_vectors(2, &[vec![1.0]]);
        assert!(matches!(bad, Err(QrError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_rejects_wide_shape() {
        assert!(ReflectorSet::for_shape(2, 3).is_err());
    }
}
