//! Representation-erased vector
//!
//! `Vector` wraps the concrete vector representations behind one enum so
//! callers can mix dense and sparse operands freely. Each operation
//! matches on the (receiver, operand) variant pair and forwards to the
//! typed overload on the concrete type, which is where the per-pair
//! traversal strategy lives.

use matkit_core::{Result, VectorBase};

use crate::dense_vector::DenseVector;
use crate::sparse_vector::SparseVector;

/// A vector of any representation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vector {
    /// One stored value per component
    Dense(DenseVector),
    /// Stored nonzeros only
    Sparse(SparseVector),
}

impl Vector {
    /// In-place addition: `self += other`
    pub fn plus_equals(&mut self, other: &Vector) -> Result<()> {
        self.scaled_plus_equals(other, 1.0)
    }

    /// In-place subtraction: `self -= other`
    pub fn minus_equals(&mut self, other: &Vector) -> Result<()> {
        self.scaled_plus_equals(other, -1.0)
    }

    /// In-place scaled addition: `self += other * scale`
    pub fn scaled_plus_equals(&mut self, other: &Vector, scale: f64) -> Result<()> {
        match (self, other) {
            (Vector::Dense(a), Vector::Dense(b)) => a.scaled_plus_equals_dense(b, scale),
            (Vector::Dense(a), Vector::Sparse(b)) => a.scaled_plus_equals_sparse(b, scale),
            (Vector::Sparse(a), Vector::Dense(b)) => a.scaled_plus_equals_dense(b, scale),
            (Vector::Sparse(a), Vector::Sparse(b)) => a.scaled_plus_equals_sparse(b, scale),
        }
    }

    /// In-place component-wise product: `self[i] *= other[i]`
    pub fn dot_times_equals(&mut self, other: &Vector) -> Result<()> {
        match (self, other) {
            (Vector::Dense(a), Vector::Dense(b)) => a.dot_times_equals_dense(b),
            (Vector::Dense(a), Vector::Sparse(b)) => a.dot_times_equals_sparse(b),
            (Vector::Sparse(a), Vector::Dense(b)) => a.dot_times_equals_dense(b),
            (Vector::Sparse(a), Vector::Sparse(b)) => a.dot_times_equals_sparse(b),
        }
    }

    /// Addition into a fresh vector
    pub fn plus(&self, other: &Vector) -> Result<Vector> {
        let mut result = self.clone();
        result.plus_equals(other)?;
        Ok(result)
    }

    /// Subtraction into a fresh vector
    pub fn minus(&self, other: &Vector) -> Result<Vector> {
        let mut result = self.clone();
        result.minus_equals(other)?;
        Ok(result)
    }

    /// Scaled addition into a fresh vector
    pub fn scaled_plus(&self, other: &Vector, scale: f64) -> Result<Vector> {
        let mut result = self.clone();
        result.scaled_plus_equals(other, scale)?;
        Ok(result)
    }

    /// Component-wise product into a fresh vector
    pub fn dot_times(&self, other: &Vector) -> Result<Vector> {
        let mut result = self.clone();
        result.dot_times_equals(other)?;
        Ok(result)
    }

    /// Inner product
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        match (self, other) {
            (Vector::Dense(a), Vector::Dense(b)) => a.dot_dense(b),
            (Vector::Dense(a), Vector::Sparse(b)) => a.dot_sparse(b),
            (Vector::Sparse(a), Vector::Dense(b)) => a.dot_dense(b),
            (Vector::Sparse(a), Vector::Sparse(b)) => a.dot_sparse(b),
        }
    }

    /// Scale every component in place
    pub fn scale_equals(&mut self, scale: f64) {
        match self {
            Vector::Dense(v) => v.scale_equals(scale),
            Vector::Sparse(v) => v.scale_equals(scale),
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> Vector {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Squared Euclidean norm
    pub fn norm2_squared(&self) -> f64 {
        match self {
            Vector::Dense(v) => v.norm2_squared(),
            Vector::Sparse(v) => v.norm2_squared(),
        }
    }

    /// Euclidean norm
    pub fn norm2(&self) -> f64 {
        self.norm2_squared().sqrt()
    }

    /// Sum of all components
    pub fn sum(&self) -> f64 {
        match self {
            Vector::Dense(v) => v.sum(),
            Vector::Sparse(v) => v.sum(),
        }
    }

    /// Whether every component is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        match self {
            Vector::Dense(v) => v.is_zero(effective_zero),
            Vector::Sparse(v) => v.is_zero(effective_zero),
        }
    }

    /// Absolute-tolerance equality across representations
    ///
    /// Equality is defined on observed component values, so a dense
    /// vector and a sparse vector holding the same values compare equal.
    pub fn equals_with_tolerance(&self, other: &Vector, tolerance: f64) -> bool {
        match (self, other) {
            (Vector::Dense(a), Vector::Dense(b)) => a.equals_with_tolerance(b, tolerance),
            (Vector::Sparse(a), Vector::Sparse(b)) => a.equals_with_tolerance(b, tolerance),
            (Vector::Dense(a), Vector::Sparse(b)) => a.equals_with_tolerance(&b.to_dense(), tolerance),
            (Vector::Sparse(a), Vector::Dense(b)) => a.to_dense().equals_with_tolerance(b, tolerance),
        }
    }

    /// Expand into a dense vector
    pub fn to_dense(&self) -> DenseVector {
        match self {
            Vector::Dense(v) => v.clone(),
            Vector::Sparse(v) => v.to_dense(),
        }
    }

    /// Canonicalize any buffered sparse edits; dense vectors are always
    /// canonical so this is a no-op for them
    pub fn compress(&mut self) {
        if let Vector::Sparse(v) = self {
            v.compress();
        }
    }
}

impl VectorBase for Vector {
    fn dimensionality(&self) -> usize {
        match self {
            Vector::Dense(v) => v.dimensionality(),
            Vector::Sparse(v) => v.dimensionality(),
        }
    }

    fn get(&self, index: usize) -> Result<f64> {
        match self {
            Vector::Dense(v) => v.get(index),
            Vector::Sparse(v) => v.get(index),
        }
    }

    fn set(&mut self, index: usize, value: f64) -> Result<()> {
        match self {
            Vector::Dense(v) => v.set(index, value),
            Vector::Sparse(v) => v.set(index, value),
        }
    }

    fn entry_count(&self) -> usize {
        match self {
            Vector::Dense(v) => v.entry_count(),
            Vector::Sparse(v) => v.entry_count(),
        }
    }

    fn is_sparse(&self) -> bool {
        match self {
            Vector::Dense(v) => v.is_sparse(),
            Vector::Sparse(v) => v.is_sparse(),
        }
    }
}

impl From<DenseVector> for Vector {
    fn from(vector: DenseVector) -> Self {
        Vector::Dense(vector)
    }
}

impl From<SparseVector> for Vector {
    fn from(vector: SparseVector) -> Self {
        Vector::Sparse(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_plus_equals() {
        let mut dense = Vector::Dense(DenseVector::from_slice(&[1.0, 2.0, 3.0]));
        let sparse = Vector::Sparse(SparseVector::from_entries(3, &[(1, 10.0)]).unwrap());
        dense.plus_equals(&sparse).unwrap();
        assert_eq!(dense.get(0), Ok(1.0));
        assert_eq!(dense.get(1), Ok(12.0));

        let mut sparse_receiver = Vector::Sparse(SparseVector::from_entries(3, &[(0, 1.0)]).unwrap());
        let dense_operand = Vector::Dense(DenseVector::from_slice(&[1.0, 1.0, 1.0]));
        sparse_receiver.minus_equals(&dense_operand).unwrap();
        assert_eq!(sparse_receiver.get(0), Ok(0.0));
        assert_eq!(sparse_receiver.get(2), Ok(-1.0));
    }

    #[test]
    fn test_cross_representation_equality() {
        let dense = Vector::Dense(DenseVector::from_slice(&[0.0, 5.0, 0.0]));
        let sparse = Vector::Sparse(SparseVector::from_entries(3, &[(1, 5.0)]).unwrap());
        assert!(dense.equals_with_tolerance(&sparse, 1e-12));
        assert!(sparse.equals_with_tolerance(&dense, 1e-12));
    }

    #[test]
    fn test_copy_family_leaves_receiver_unchanged() {
        let dense = Vector::Dense(DenseVector::from_slice(&[1.0, 2.0]));
        let sparse = Vector::Sparse(SparseVector::from_entries(2, &[(0, 3.0)]).unwrap());
        let sum = dense.plus(&sparse).unwrap();
        assert_eq!(sum.get(0), Ok(4.0));
        assert_eq!(dense.get(0), Ok(1.0));

        let product = dense.dot_times(&sparse).unwrap();
        assert_eq!(product.get(0), Ok(3.0));
        assert_eq!(product.get(1), Ok(0.0));
    }

    #[test]
    fn test_dot_dispatch() {
        let dense = Vector::Dense(DenseVector::from_slice(&[1.0, 2.0, 3.0]));
        let sparse = Vector::Sparse(SparseVector::from_entries(3, &[(0, 2.0), (2, 1.0)]).unwrap());
        assert_eq!(dense.dot(&sparse), Ok(5.0));
        assert_eq!(sparse.dot(&dense), Ok(5.0));
        assert_eq!(dense.dot(&dense), Ok(14.0));
    }
}
