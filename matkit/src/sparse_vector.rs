//! Sparse vector representation
//!
//! Stores only the components that have been written, as parallel
//! index/value arrays sorted by index (the compressed state). Writes that
//! touch new positions land in an accumulation buffer first; the buffer
//! merges into the sorted arrays on the next compression. Reads consult
//! the buffer before the arrays, so observable values always equal the
//! canonical compressed form regardless of state.

use hashbrown::HashMap;
use matkit_core::{check_dimensionality, check_index, within_tolerance, Result, VectorBase};

use crate::dense_vector::DenseVector;

/// A sparse 1-D container of `f64` components
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseVector {
    dimensionality: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
    edits: HashMap<usize, f64>,
}

impl SparseVector {
    /// Create an empty (all-zero) vector of the given dimensionality
    pub fn zeros(dimensionality: usize) -> Self {
        Self {
            dimensionality,
            indices: Vec::new(),
            values: Vec::new(),
            edits: HashMap::new(),
        }
    }

    /// Create a vector from `(index, value)` pairs in any order
    ///
    /// Later pairs at a duplicate index win. Fails with `OutOfRange` if
    /// any index is outside the dimensionality.
    pub fn from_entries(dimensionality: usize, entries: &[(usize, f64)]) -> Result<Self> {
        let mut result = Self::zeros(dimensionality);
        for &(index, value) in entries {
            result.set(index, value)?;
        }
        result.compress();
        Ok(result)
    }

    /// Whether the accumulation buffer is empty
    pub fn is_compressed(&self) -> bool {
        self.edits.is_empty()
    }

    /// Merge the accumulation buffer into the sorted backing arrays
    ///
    /// Idempotent; callers needing deterministic iteration order can force
    /// the transition here instead of waiting for the next mutation.
    pub fn compress(&mut self) {
        if self.edits.is_empty() {
            return;
        }
        let mut merged: Vec<(usize, f64)> = self
            .indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .filter(|(index, _)| !self.edits.contains_key(index))
            .collect();
        merged.extend(self.edits.drain());
        merged.sort_unstable_by_key(|&(index, _)| index);
        self.indices = merged.iter().map(|&(index, _)| index).collect();
        self.values = merged.iter().map(|&(_, value)| value).collect();
    }

    /// Canonical `(index, value)` pairs, sorted by index
    ///
    /// Works in either state; explicit stored zeros are included.
    pub fn entries(&self) -> Vec<(usize, f64)> {
        if self.edits.is_empty() {
            return self
                .indices
                .iter()
                .copied()
                .zip(self.values.iter().copied())
                .collect();
        }
        let mut merged: Vec<(usize, f64)> = self
            .indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .filter(|(index, _)| !self.edits.contains_key(index))
            .collect();
        merged.extend(self.edits.iter().map(|(&index, &value)| (index, value)));
        merged.sort_unstable_by_key(|&(index, _)| index);
        merged
    }

    /// Read a component without a bounds check
    fn lookup(&self, index: usize) -> f64 {
        if let Some(&value) = self.edits.get(&index) {
            return value;
        }
        match self.indices.binary_search(&index) {
            Ok(position) => self.values[position],
            Err(_) => 0.0,
        }
    }

    /// Add `delta` to the component at `index`
    fn add_to(&mut self, index: usize, delta: f64) {
        if let Some(value) = self.edits.get_mut(&index) {
            *value += delta;
            return;
        }
        match self.indices.binary_search(&index) {
            Ok(position) => self.values[position] += delta,
            Err(_) => {
                self.edits.insert(index, delta);
            }
        }
    }

    /// In-place addition of a dense operand
    pub fn plus_equals_dense(&mut self, other: &DenseVector) -> Result<()> {
        self.scaled_plus_equals_dense(other, 1.0)
    }

    /// In-place addition of a sparse operand
    pub fn plus_equals_sparse(&mut self, other: &SparseVector) -> Result<()> {
        self.scaled_plus_equals_sparse(other, 1.0)
    }

    /// In-place subtraction of a dense operand
    pub fn minus_equals_dense(&mut self, other: &DenseVector) -> Result<()> {
        self.scaled_plus_equals_dense(other, -1.0)
    }

    /// In-place subtraction of a sparse operand
    pub fn minus_equals_sparse(&mut self, other: &SparseVector) -> Result<()> {
        self.scaled_plus_equals_sparse(other, -1.0)
    }

    /// In-place `self += other * scale` against a dense operand
    ///
    /// The receiver stays sparse-typed but may end up storing an entry for
    /// every nonzero component of the operand.
    pub fn scaled_plus_equals_dense(&mut self, other: &DenseVector, scale: f64) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality)?;
        for (index, &value) in other.values().iter().enumerate() {
            if value != 0.0 {
                self.add_to(index, value * scale);
            }
        }
        self.compress();
        Ok(())
    }

    /// In-place `self += other * scale` against a sparse operand
    pub fn scaled_plus_equals_sparse(&mut self, other: &SparseVector, scale: f64) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality)?;
        for (index, value) in other.entries() {
            if value != 0.0 {
                self.add_to(index, value * scale);
            }
        }
        self.compress();
        Ok(())
    }

    /// In-place component-wise product with a dense operand
    pub fn dot_times_equals_dense(&mut self, other: &DenseVector) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality)?;
        self.compress();
        for (position, &index) in self.indices.iter().enumerate() {
            self.values[position] *= other.values()[index];
        }
        Ok(())
    }

    /// In-place component-wise product with a sparse operand
    pub fn dot_times_equals_sparse(&mut self, other: &SparseVector) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality)?;
        self.compress();
        for (position, &index) in self.indices.iter().enumerate() {
            self.values[position] *= other.lookup(index);
        }
        Ok(())
    }

    /// Inner product with a dense operand, touching only stored entries
    pub fn dot_dense(&self, other: &DenseVector) -> Result<f64> {
        check_dimensionality(other.dimensionality(), self.dimensionality)?;
        Ok(self
            .entries()
            .into_iter()
            .map(|(index, value)| value * other.values()[index])
            .sum())
    }

    /// Inner product with a sparse operand
    pub fn dot_sparse(&self, other: &SparseVector) -> Result<f64> {
        check_dimensionality(other.dimensionality(), self.dimensionality)?;
        Ok(self
            .entries()
            .into_iter()
            .map(|(index, value)| value * other.lookup(index))
            .sum())
    }

    /// Scale every stored component in place
    pub fn scale_equals(&mut self, scale: f64) {
        for value in &mut self.values {
            *value *= scale;
        }
        for value in self.edits.values_mut() {
            *value *= scale;
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> SparseVector {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Squared Euclidean norm
    pub fn norm2_squared(&self) -> f64 {
        self.entries().into_iter().map(|(_, v)| v * v).sum()
    }

    /// Euclidean norm
    pub fn norm2(&self) -> f64 {
        self.norm2_squared().sqrt()
    }

    /// Sum of all components
    pub fn sum(&self) -> f64 {
        self.entries().into_iter().map(|(_, v)| v).sum()
    }

    /// Whether every component is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        self.entries()
            .into_iter()
            .all(|(_, v)| v.abs() <= effective_zero)
    }

    /// Absolute-tolerance equality against another sparse vector
    pub fn equals_with_tolerance(&self, other: &SparseVector, tolerance: f64) -> bool {
        if self.dimensionality != other.dimensionality {
            return false;
        }
        self.entries()
            .into_iter()
            .all(|(index, value)| within_tolerance(value, other.lookup(index), tolerance))
            && other
                .entries()
                .into_iter()
                .all(|(index, value)| within_tolerance(value, self.lookup(index), tolerance))
    }

    /// Expand into a dense vector
    pub fn to_dense(&self) -> DenseVector {
        let mut result = DenseVector::zeros(self.dimensionality);
        for (index, value) in self.entries() {
            result.values_mut()[index] = value;
        }
        result
    }
}

impl PartialEq for SparseVector {
    /// Structural state (compressed or not, explicit zeros) is ignored;
    /// two sparse vectors are equal when their canonical values are.
    fn eq(&self, other: &Self) -> bool {
        if self.dimensionality != other.dimensionality {
            return false;
        }
        self.entries()
            .into_iter()
            .all(|(index, value)| value == other.lookup(index))
            && other
                .entries()
                .into_iter()
                .all(|(index, value)| value == self.lookup(index))
    }
}

impl VectorBase for SparseVector {
    fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.dimensionality)?;
        Ok(self.lookup(index))
    }

    fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.dimensionality)?;
        // An in-place overwrite of an already-stored entry keeps the
        // compressed state; anything else reverts to accumulation.
        if self.edits.is_empty() {
            if let Ok(position) = self.indices.binary_search(&index) {
                self.values[position] = value;
                return Ok(());
            }
        }
        self.edits.insert(index, value);
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries().len()
    }

    fn is_sparse(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matkit_core::MatrixError;

    #[test]
    fn test_lazy_compression_observability() {
        let mut v = SparseVector::zeros(5);
        // Unsorted insertion order with a duplicate index
        v.set(3, 1.0).unwrap();
        v.set(1, 2.0).unwrap();
        v.set(3, 4.0).unwrap();
        assert!(!v.is_compressed());
        // Reads observe canonical values before compression
        assert_eq!(v.get(3), Ok(4.0));
        assert_eq!(v.get(1), Ok(2.0));
        assert_eq!(v.get(0), Ok(0.0));

        v.compress();
        assert!(v.is_compressed());
        assert_eq!(v.entries(), vec![(1, 2.0), (3, 4.0)]);
        // Compression is idempotent
        v.compress();
        assert_eq!(v.entries(), vec![(1, 2.0), (3, 4.0)]);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut v = SparseVector::zeros(2);
        assert_eq!(v.set(2, 1.0), Err(MatrixError::OutOfRange));
    }

    #[test]
    fn test_sparse_plus_sparse() {
        let a = SparseVector::from_entries(4, &[(0, 1.0), (2, 3.0)]).unwrap();
        let mut b = SparseVector::from_entries(4, &[(2, 2.0), (3, 5.0)]).unwrap();
        b.plus_equals_sparse(&a).unwrap();
        assert_eq!(b.get(0), Ok(1.0));
        assert_eq!(b.get(2), Ok(5.0));
        assert_eq!(b.get(3), Ok(5.0));
    }

    #[test]
    fn test_dot_products_agree() {
        let s = SparseVector::from_entries(4, &[(1, 2.0), (3, -1.0)]).unwrap();
        let d = DenseVector::from_slice(&[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(s.dot_dense(&d), Ok(3.0));
        assert_eq!(d.dot_sparse(&s), Ok(3.0));
    }

    #[test]
    fn test_equality_ignores_state() {
        let mut a = SparseVector::zeros(3);
        a.set(1, 2.0).unwrap();
        let mut b = SparseVector::zeros(3);
        b.set(1, 2.0).unwrap();
        b.compress();
        // Explicit zero in one of them
        b.set(2, 0.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_dense_round_trip() {
        let s = SparseVector::from_entries(4, &[(0, 1.5), (3, -2.5)]).unwrap();
        let d = s.to_dense();
        assert_eq!(d.values(), &[1.5, 0.0, 0.0, -2.5]);
    }
}
