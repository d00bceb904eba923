//! Dense vector representation
//!
//! One stored value per component. This is the reference vector
//! implementation: every operation is always correct and never
//! short-circuited by sparsity.

use matkit_core::{
    check_dimensionality, check_index, within_tolerance, Result, VectorBase,
};

use crate::sparse_vector::SparseVector;

/// A dense 1-D container of `f64` components
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseVector {
    values: Vec<f64>,
}

impl DenseVector {
    /// Create a zero vector of the given dimensionality
    pub fn zeros(dimensionality: usize) -> Self {
        Self {
            values: vec![0.0; dimensionality],
        }
    }

    /// Create a vector owning the given components
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Create a vector copying the given components
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }

    /// Borrow the backing components
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutably borrow the backing components
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// In-place addition of a dense operand
    pub fn plus_equals_dense(&mut self, other: &DenseVector) -> Result<()> {
        self.scaled_plus_equals_dense(other, 1.0)
    }

    /// In-place addition of a sparse operand, touching only its nonzeros
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
    pub fn scaled_plus_equals_dense(&mut self, other: &DenseVector, scale: f64) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality())?;
        for (target, source) in self.values.iter_mut().zip(other.values.iter()) {
            *target += source * scale;
        }
        Ok(())
    }

    /// In-place `self += other * scale` against a sparse operand
    pub fn scaled_plus_equals_sparse(&mut self, other: &SparseVector, scale: f64) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality())?;
        for (index, value) in other.entries() {
            self.values[index] += value * scale;
        }
        Ok(())
    }

    /// In-place component-wise product with a dense operand
    pub fn dot_times_equals_dense(&mut self, other: &DenseVector) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality())?;
        for (target, source) in self.values.iter_mut().zip(other.values.iter()) {
            *target *= source;
        }
        Ok(())
    }

    /// In-place component-wise product with a sparse operand
    ///
    /// Components the operand does not store are zero, so the result only
    /// keeps values at the operand's stored positions.
    pub fn dot_times_equals_sparse(&mut self, other: &SparseVector) -> Result<()> {
        check_dimensionality(other.dimensionality(), self.dimensionality())?;
        let mut result = vec![0.0; self.values.len()];
        for (index, value) in other.entries() {
            result[index] = self.values[index] * value;
        }
        self.values = result;
        Ok(())
    }

    /// Inner product with a dense operand
    pub fn dot_dense(&self, other: &DenseVector) -> Result<f64> {
        check_dimensionality(other.dimensionality(), self.dimensionality())?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Inner product with a sparse operand, touching only its nonzeros
    pub fn dot_sparse(&self, other: &SparseVector) -> Result<f64> {
        check_dimensionality(other.dimensionality(), self.dimensionality())?;
        Ok(other
            .entries()
            .into_iter()
            .map(|(index, value)| self.values[index] * value)
            .sum())
    }

    /// Scale every component in place
    pub fn scale_equals(&mut self, scale: f64) {
        for value in &mut self.values {
            *value *= scale;
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> DenseVector {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Squared Euclidean norm
    pub fn norm2_squared(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Euclidean norm
    pub fn norm2(&self) -> f64 {
        self.norm2_squared().sqrt()
    }

    /// Sum of all components
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Whether every component is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        self.values.iter().all(|v| v.abs() <= effective_zero)
    }

    /// Absolute-tolerance equality against another dense vector
    pub fn equals_with_tolerance(&self, other: &DenseVector, tolerance: f64) -> bool {
        self.dimensionality() == other.dimensionality()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| within_tolerance(*a, *b, tolerance))
    }
}

impl VectorBase for DenseVector {
    fn dimensionality(&self) -> usize {
        self.values.len()
    }

    fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.values.len())?;
        Ok(self.values[index])
    }

    fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.values.len())?;
        self.values[index] = value;
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.values.len()
    }

    fn is_sparse(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matkit_core::MatrixError;

    #[test]
    fn test_get_set_bounds() {
        let mut v = DenseVector::zeros(3);
        assert_eq!(v.set(1, 2.5), Ok(()));
        assert_eq!(v.get(1), Ok(2.5));
        assert_eq!(v.get(3), Err(MatrixError::OutOfRange));
        assert_eq!(v.set(3, 1.0), Err(MatrixError::OutOfRange));
    }

    #[test]
    fn test_scaled_plus_equals_dense() {
        let mut a = DenseVector::from_slice(&[1.0, 2.0, 3.0]);
        let b = DenseVector::from_slice(&[1.0, 1.0, 1.0]);
        a.scaled_plus_equals_dense(&b, 2.0).unwrap();
        assert_eq!(a.values(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut a = DenseVector::zeros(3);
        let b = DenseVector::zeros(4);
        assert_eq!(
            a.plus_equals_dense(&b),
            Err(MatrixError::DimensionMismatch)
        );
    }

    #[test]
    fn test_dot_times_equals_sparse_zeroes_unstored() {
        let mut a = DenseVector::from_slice(&[1.0, 2.0, 3.0]);
        let mut b = SparseVector::zeros(3);
        b.set(1, 4.0).unwrap();
        a.dot_times_equals_sparse(&b).unwrap();
        assert_eq!(a.values(), &[0.0, 8.0, 0.0]);
    }

    #[test]
    fn test_norms() {
        let v = DenseVector::from_slice(&[3.0, 4.0]);
        assert_eq!(v.norm2_squared(), 25.0);
        assert_eq!(v.norm2(), 5.0);
        assert_eq!(v.sum(), 7.0);
    }
}
