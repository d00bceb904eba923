//! Diagonal matrix representation
//!
//! A single length-`n` value sequence backing an implicit `n x n` matrix
//! whose off-diagonal cells are definitionally zero. Diagonal matrices
//! admit very fast products, inverses, and solves, but the type can never
//! promote itself to a denser shape: any attempt to introduce a nonzero
//! off-diagonal value is rejected. Binary operations against denser
//! operands therefore verify the operand's off-diagonal cells are zero
//! before combining; that full scan is the cost of staying diagonal-typed.

use matkit_core::{
    check_dimensionality, check_effective_zero, check_element_index, check_index,
    check_multiplication_dimensions, check_same_dimensions, check_solve_dimensions,
    check_submatrix_range, within_tolerance, ComplexNumber, MatrixBase, MatrixError, Result,
    VectorBase,
};

use crate::dense_matrix::DenseMatrix;
use crate::dense_vector::DenseVector;
use crate::matrix::Matrix;
use crate::sparse_matrix::SparseMatrix;
use crate::sparse_vector::SparseVector;
use crate::vector::Vector;

/// A square matrix storing only its main diagonal
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagonalMatrix {
    diagonal: Vec<f64>,
}

impl DiagonalMatrix {
    /// Create a square `n x n` diagonal matrix initialized to zero
    pub fn zeros(n: usize) -> Self {
        Self {
            diagonal: vec![0.0; n],
        }
    }

    /// Create a diagonal matrix owning the given diagonal entries
    ///
    /// The length of the input implicitly defines the matrix size.
    pub fn from_diagonal(diagonal: Vec<f64>) -> Self {
        Self { diagonal }
    }

    /// Create a diagonal matrix as a validated copy of a general matrix
    ///
    /// Fails with `DimensionMismatch` for a non-square source, or
    /// `InvalidAssignment` if any off-diagonal source cell is nonzero;
    /// the full scan is what keeps the copy lossless.
    pub fn from_matrix(source: &Matrix) -> Result<Self> {
        if !source.is_square() {
            return Err(MatrixError::DimensionMismatch);
        }
        match source {
            Matrix::Diagonal(diagonal) => Ok(diagonal.clone()),
            Matrix::Dense(dense) => {
                let n = dense.num_rows();
                for row in 0..n {
                    for (column, &value) in dense.row(row).iter().enumerate() {
                        if row != column && value != 0.0 {
                            return Err(MatrixError::InvalidAssignment);
                        }
                    }
                }
                let diagonal = (0..n).map(|i| dense.row(i)[i]).collect();
                Ok(Self { diagonal })
            }
            Matrix::Sparse(sparse) => {
                let n = sparse.num_rows();
                let mut diagonal = vec![0.0; n];
                for (row, column, value) in sparse.entries() {
                    if row == column {
                        diagonal[row] = value;
                    } else if value != 0.0 {
                        return Err(MatrixError::InvalidAssignment);
                    }
                }
                Ok(Self { diagonal })
            }
        }
    }

    /// Borrow the diagonal entries
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Mutably borrow the diagonal entries
    pub fn diagonal_mut(&mut self) -> &mut [f64] {
        &mut self.diagonal
    }

    /// Matrix size (rows and columns are always equal)
    pub fn dimension(&self) -> usize {
        self.diagonal.len()
    }

    /// In-place addition of a dense operand
    ///
    /// Fails with `InvalidAssignment` if the operand has any nonzero
    /// off-diagonal cell; the receiver is left untouched on failure.
    pub fn plus_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        self.scaled_plus_equals_dense(other, 1.0)
    }

    /// In-place addition of a sparse operand
    pub fn plus_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        self.scaled_plus_equals_sparse(other, 1.0)
    }

    /// In-place addition of a diagonal operand
    pub fn plus_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        self.scaled_plus_equals_diagonal(other, 1.0)
    }

    /// In-place subtraction of a dense operand
    pub fn minus_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        self.scaled_plus_equals_dense(other, -1.0)
    }

    /// In-place subtraction of a sparse operand
    pub fn minus_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        self.scaled_plus_equals_sparse(other, -1.0)
    }

    /// In-place subtraction of a diagonal operand
    pub fn minus_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        self.scaled_plus_equals_diagonal(other, -1.0)
    }

    /// In-place `self += other * scale` against a dense operand
    ///
    /// Every off-diagonal cell of the operand must be zero; the scan runs
    /// before any mutation so a failed combine leaves the receiver
    /// unchanged.
    pub fn scaled_plus_equals_dense(&mut self, other: &DenseMatrix, scale: f64) -> Result<()> {
        let n = self.diagonal.len();
        check_same_dimensions(n, n, other.num_rows(), other.num_columns())?;
        for row in 0..n {
            for (column, &value) in other.row(row).iter().enumerate() {
                if row != column && value != 0.0 {
                    return Err(MatrixError::InvalidAssignment);
                }
            }
        }
        for (i, target) in self.diagonal.iter_mut().enumerate() {
            *target += other.row(i)[i] * scale;
        }
        Ok(())
    }

    /// In-place `self += other * scale` against a sparse operand,
    /// scanning only its stored entries
    pub fn scaled_plus_equals_sparse(&mut self, other: &SparseMatrix, scale: f64) -> Result<()> {
        let n = self.diagonal.len();
        check_same_dimensions(n, n, other.num_rows(), other.num_columns())?;
        let entries = other.entries();
        for &(row, column, value) in &entries {
            if row != column && value != 0.0 {
                return Err(MatrixError::InvalidAssignment);
            }
        }
        for (row, column, value) in entries {
            if row == column {
                self.diagonal[row] += value * scale;
            }
        }
        Ok(())
    }

    /// In-place `self += other * scale` against a diagonal operand
    pub fn scaled_plus_equals_diagonal(
        &mut self,
        other: &DiagonalMatrix,
        scale: f64,
    ) -> Result<()> {
        let n = self.diagonal.len();
        check_same_dimensions(n, n, other.dimension(), other.dimension())?;
        for (target, source) in self.diagonal.iter_mut().zip(other.diagonal.iter()) {
            *target += source * scale;
        }
        Ok(())
    }

    /// In-place element-wise product with a dense operand
    ///
    /// Off-diagonal products are zero by construction, so no scan is
    /// needed; only the operand's diagonal matters.
    pub fn dot_times_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        let n = self.diagonal.len();
        check_same_dimensions(n, n, other.num_rows(), other.num_columns())?;
        for (i, target) in self.diagonal.iter_mut().enumerate() {
            *target *= other.row(i)[i];
        }
        Ok(())
    }

    /// In-place element-wise product with a sparse operand
    pub fn dot_times_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        let n = self.diagonal.len();
        check_same_dimensions(n, n, other.num_rows(), other.num_columns())?;
        for (i, target) in self.diagonal.iter_mut().enumerate() {
            *target *= other.lookup(i, i);
        }
        Ok(())
    }

    /// In-place element-wise product with a diagonal operand
    pub fn dot_times_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        let n = self.diagonal.len();
        check_same_dimensions(n, n, other.dimension(), other.dimension())?;
        for (target, source) in self.diagonal.iter_mut().zip(other.diagonal.iter()) {
            *target *= source;
        }
        Ok(())
    }

    /// Matrix product against a dense operand: row `i` of the operand
    /// scaled by the `i`-th diagonal entry
    ///
    /// This is O(rows * columns) rather than a full cubic product.
    pub fn times_dense(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        check_multiplication_dimensions(self.diagonal.len(), other.num_rows())?;
        let mut result = other.clone();
        let width = other.num_columns();
        for (i, &scale) in self.diagonal.iter().enumerate() {
            for value in &mut result.values_mut()[i * width..(i + 1) * width] {
                *value *= scale;
            }
        }
        Ok(result)
    }

    /// Matrix product against a sparse operand
    ///
    /// Delegates to the operand's own pre-multiplication so the product
    /// runs in the operand's preferred traversal order.
    pub fn times_sparse(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        other.pre_times_diagonal(self)
    }

    /// Matrix product against a diagonal operand
    pub fn times_diagonal(&self, other: &DiagonalMatrix) -> Result<DiagonalMatrix> {
        check_multiplication_dimensions(self.diagonal.len(), other.dimension())?;
        let mut result = self.clone();
        for (target, source) in result.diagonal.iter_mut().zip(other.diagonal.iter()) {
            *target *= source;
        }
        Ok(result)
    }

    /// Matrix-vector product against a dense operand
    pub fn times_dense_vector(&self, vector: &DenseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.diagonal.len())?;
        let mut result = vector.clone();
        for (target, scale) in result.values_mut().iter_mut().zip(self.diagonal.iter()) {
            *target *= scale;
        }
        Ok(result)
    }

    /// Matrix-vector product against a sparse operand; only its stored
    /// entries are touched and the result stays sparse
    pub fn times_sparse_vector(&self, vector: &SparseVector) -> Result<SparseVector> {
        check_dimensionality(vector.dimensionality(), self.diagonal.len())?;
        let pairs: Vec<(usize, f64)> = vector
            .entries()
            .into_iter()
            .map(|(index, value)| (index, value * self.diagonal[index]))
            .collect();
        SparseVector::from_entries(self.diagonal.len(), &pairs)
    }

    /// Vector-matrix product for a dense operand
    ///
    /// Pre- and post-multiplication coincide for a diagonal (or any
    /// symmetric) operand.
    pub fn pre_times_dense_vector(&self, vector: &DenseVector) -> Result<DenseVector> {
        self.times_dense_vector(vector)
    }

    /// Vector-matrix product for a sparse operand
    pub fn pre_times_sparse_vector(&self, vector: &SparseVector) -> Result<SparseVector> {
        self.times_sparse_vector(vector)
    }

    /// Solve `self * x = b` for a dense right-hand side
    ///
    /// O(n) elementwise division. A zero pivot paired with a nonzero
    /// right-hand-side component fails with `SingularMatrix`; a zero
    /// pivot paired with a zero component yields zero for that component
    /// (an under-determined but consistent system).
    pub fn solve_dense_vector(&self, rhs: &DenseVector) -> Result<DenseVector> {
        check_solve_dimensions(self.diagonal.len(), rhs.dimensionality())?;
        let mut result = rhs.clone();
        for (component, &pivot) in result.values_mut().iter_mut().zip(self.diagonal.iter()) {
            if pivot == 0.0 {
                if *component != 0.0 {
                    return Err(MatrixError::SingularMatrix);
                }
            } else {
                *component /= pivot;
            }
        }
        Ok(result)
    }

    /// Solve `self * x = b` for a sparse right-hand side; components the
    /// right-hand side does not store are zero and stay zero
    pub fn solve_sparse_vector(&self, rhs: &SparseVector) -> Result<SparseVector> {
        check_solve_dimensions(self.diagonal.len(), rhs.dimensionality())?;
        let mut pairs = Vec::new();
        for (index, value) in rhs.entries() {
            let pivot = self.diagonal[index];
            if pivot == 0.0 {
                if value != 0.0 {
                    return Err(MatrixError::SingularMatrix);
                }
                pairs.push((index, 0.0));
            } else {
                pairs.push((index, value / pivot));
            }
        }
        SparseVector::from_entries(self.diagonal.len(), &pairs)
    }

    /// Solve `self * X = B` for a dense matrix right-hand side
    pub fn solve_dense_matrix(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        check_solve_dimensions(self.diagonal.len(), rhs.num_rows())?;
        let mut result = rhs.clone();
        let width = rhs.num_columns();
        for (i, &pivot) in self.diagonal.iter().enumerate() {
            let row = &mut result.values_mut()[i * width..(i + 1) * width];
            if pivot == 0.0 {
                if row.iter().any(|&value| value != 0.0) {
                    return Err(MatrixError::SingularMatrix);
                }
            } else {
                for value in row {
                    *value /= pivot;
                }
            }
        }
        Ok(result)
    }

    /// Solve `self * X = B` for a sparse matrix right-hand side
    pub fn solve_sparse_matrix(&self, rhs: &SparseMatrix) -> Result<SparseMatrix> {
        check_solve_dimensions(self.diagonal.len(), rhs.num_rows())?;
        let mut triples = Vec::new();
        for (row, column, value) in rhs.entries() {
            let pivot = self.diagonal[row];
            if pivot == 0.0 {
                if value != 0.0 {
                    return Err(MatrixError::SingularMatrix);
                }
                triples.push((row, column, 0.0));
            } else {
                triples.push((row, column, value / pivot));
            }
        }
        SparseMatrix::from_triplets(rhs.num_rows(), rhs.num_columns(), &triples)
    }

    /// Solve `self * X = B` for a diagonal right-hand side
    pub fn solve_diagonal_matrix(&self, rhs: &DiagonalMatrix) -> Result<DiagonalMatrix> {
        check_solve_dimensions(self.diagonal.len(), rhs.dimension())?;
        let mut result = rhs.clone();
        for (component, &pivot) in result.diagonal.iter_mut().zip(self.diagonal.iter()) {
            if pivot == 0.0 {
                if *component != 0.0 {
                    return Err(MatrixError::SingularMatrix);
                }
            } else {
                *component /= pivot;
            }
        }
        Ok(result)
    }

    /// Invert the matrix in O(n)
    ///
    /// Fails with `SingularMatrix` if any diagonal entry is exactly zero.
    pub fn inverse(&self) -> Result<DiagonalMatrix> {
        let mut result = DiagonalMatrix::zeros(self.diagonal.len());
        for (target, &pivot) in result.diagonal.iter_mut().zip(self.diagonal.iter()) {
            if pivot == 0.0 {
                return Err(MatrixError::SingularMatrix);
            }
            *target = 1.0 / pivot;
        }
        Ok(result)
    }

    /// Tolerance-gated inverse: entries with magnitude at or below
    /// `effective_zero` contribute zero instead of failing
    pub fn pseudo_inverse(&self, effective_zero: f64) -> Result<DiagonalMatrix> {
        check_effective_zero(effective_zero)?;
        let mut result = DiagonalMatrix::zeros(self.diagonal.len());
        for (target, &pivot) in result.diagonal.iter_mut().zip(self.diagonal.iter()) {
            *target = if pivot.abs() > effective_zero {
                1.0 / pivot
            } else {
                0.0
            };
        }
        Ok(result)
    }

    /// Count of diagonal entries with magnitude strictly above
    /// `effective_zero`
    pub fn rank(&self, effective_zero: f64) -> Result<usize> {
        check_effective_zero(effective_zero)?;
        Ok(self
            .diagonal
            .iter()
            .filter(|pivot| pivot.abs() > effective_zero)
            .count())
    }

    /// Log-determinant of the diagonal
    ///
    /// The determinant of a triangular matrix is the product of its
    /// diagonal entries, so the log-determinant is the sum of their
    /// logarithms; an odd count of negative entries flips the sign,
    /// encoded as an imaginary part of `PI`.
    pub fn log_determinant(&self) -> ComplexNumber {
        let mut negative = false;
        let mut log_sum = 0.0;
        for &entry in &self.diagonal {
            if entry < 0.0 {
                negative = !negative;
                log_sum += (-entry).ln();
            } else {
                log_sum += entry.ln();
            }
        }
        ComplexNumber::new(
            log_sum,
            if negative { core::f64::consts::PI } else { 0.0 },
        )
    }

    /// Return the transposed matrix (a copy of self)
    pub fn transpose(&self) -> DiagonalMatrix {
        self.clone()
    }

    /// A diagonal matrix is always symmetric
    pub fn is_symmetric(&self, effective_zero: f64) -> Result<bool> {
        check_effective_zero(effective_zero)?;
        Ok(true)
    }

    /// Squared Frobenius norm over the diagonal
    pub fn norm_frobenius_squared(&self) -> f64 {
        self.diagonal.iter().map(|v| v * v).sum()
    }

    /// Frobenius norm
    pub fn norm_frobenius(&self) -> f64 {
        self.norm_frobenius_squared().sqrt()
    }

    /// Copy an inclusive sub-range into a sparse matrix
    ///
    /// The extraction reflects the source's sparsity instead of
    /// densifying: the result carries at most one entry per extracted
    /// row.
    pub fn get_sub_matrix(
        &self,
        min_row: usize,
        max_row: usize,
        min_column: usize,
        max_column: usize,
    ) -> Result<SparseMatrix> {
        let n = self.diagonal.len();
        check_submatrix_range(min_row, max_row, min_column, max_column, n, n)?;
        let mut triples = Vec::new();
        for row in min_row..=max_row {
            // Only diagonal cells can be nonzero; keep the ones that fall
            // inside the column extent as well
            if row >= min_column && row <= max_column {
                triples.push((row - min_row, row - min_column, self.diagonal[row]));
            }
        }
        SparseMatrix::from_triplets(max_row - min_row + 1, max_column - min_column + 1, &triples)
    }

    /// Copy one row into a sparse vector carrying at most one nonzero
    pub fn get_row(&self, row: usize) -> Result<SparseVector> {
        check_index(row, self.diagonal.len())?;
        SparseVector::from_entries(self.diagonal.len(), &[(row, self.diagonal[row])])
    }

    /// Copy one column into a sparse vector carrying at most one nonzero
    pub fn get_column(&self, column: usize) -> Result<SparseVector> {
        check_index(column, self.diagonal.len())?;
        SparseVector::from_entries(self.diagonal.len(), &[(column, self.diagonal[column])])
    }

    /// Overwrite with the identity pattern
    pub fn identity(&mut self) {
        self.diagonal.fill(1.0);
    }

    /// Scale every diagonal entry in place
    pub fn scale_equals(&mut self, scale: f64) {
        for value in &mut self.diagonal {
            *value *= scale;
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> DiagonalMatrix {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Whether every diagonal entry is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        self.diagonal.iter().all(|v| v.abs() <= effective_zero)
    }

    /// Absolute-tolerance equality against another diagonal matrix
    pub fn equals_with_tolerance(&self, other: &DiagonalMatrix, tolerance: f64) -> bool {
        self.diagonal.len() == other.diagonal.len()
            && self
                .diagonal
                .iter()
                .zip(other.diagonal.iter())
                .all(|(a, b)| within_tolerance(*a, *b, tolerance))
    }

    /// Expand into a dense matrix
    pub fn to_dense(&self) -> Result<DenseMatrix> {
        let n = self.diagonal.len();
        let mut result = DenseMatrix::zeros(n, n)?;
        for (i, &value) in self.diagonal.iter().enumerate() {
            result.values_mut()[i * n + i] = value;
        }
        Ok(result)
    }
}

impl MatrixBase for DiagonalMatrix {
    type Vector = Vector;

    fn num_rows(&self) -> usize {
        self.diagonal.len()
    }

    fn num_columns(&self) -> usize {
        self.diagonal.len()
    }

    fn is_square(&self) -> bool {
        true
    }

    /// Bounds-checked read; off-diagonal reads are valid and return zero
    fn get(&self, row: usize, column: usize) -> Result<f64> {
        let n = self.diagonal.len();
        check_element_index(row, column, n, n)?;
        if row == column {
            Ok(self.diagonal[row])
        } else {
            Ok(0.0)
        }
    }

    /// Bounds-checked write
    ///
    /// Writing a nonzero value off the main diagonal fails with
    /// `InvalidAssignment`; writing zero there is a no-op.
    fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        let n = self.diagonal.len();
        check_element_index(row, column, n, n)?;
        if row == column {
            self.diagonal[row] = value;
        } else if value != 0.0 {
            return Err(MatrixError::InvalidAssignment);
        }
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.diagonal.len()
    }

    fn is_sparse(&self) -> bool {
        true
    }

    fn convert_to_vector(&self) -> Vector {
        let n = self.diagonal.len();
        let mut result = SparseVector::zeros(n * n);
        for (i, &value) in self.diagonal.iter().enumerate() {
            // The row-major offset of a diagonal cell is i * (n + 1)
            let _ = result.set(i * n + i, value);
        }
        result.compress();
        Vector::Sparse(result)
    }

    fn convert_from_vector(&mut self, parameters: &Vector) -> Result<()> {
        let n = self.diagonal.len();
        check_dimensionality(parameters.dimensionality(), n * n)?;
        // Validate before applying so a failed conversion leaves the
        // receiver unchanged
        match parameters {
            Vector::Dense(dense) => {
                for (index, &value) in dense.values().iter().enumerate() {
                    if index / n != index % n && value != 0.0 {
                        return Err(MatrixError::InvalidAssignment);
                    }
                }
                for i in 0..n {
                    self.diagonal[i] = dense.values()[i * n + i];
                }
            }
            Vector::Sparse(sparse) => {
                let entries = sparse.entries();
                for &(index, value) in &entries {
                    if index / n != index % n && value != 0.0 {
                        return Err(MatrixError::InvalidAssignment);
                    }
                }
                self.diagonal.fill(0.0);
                for (index, value) in entries {
                    if index / n == index % n {
                        self.diagonal[index / n] = value;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_diagonal_write_rejected() {
        let mut d = DiagonalMatrix::zeros(3);
        assert_eq!(d.set(0, 1, 5.0), Err(MatrixError::InvalidAssignment));
        assert_eq!(d.set(1, 1, 5.0), Ok(()));
        assert_eq!(d.get(1, 1), Ok(5.0));
        // Writing an off-diagonal zero is a no-op, not an error
        assert_eq!(d.set(0, 2, 0.0), Ok(()));
        assert_eq!(d.get(0, 2), Ok(0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, 4.0, -0.5]);
        let inverse = d.inverse().unwrap();
        let product = d.times_diagonal(&inverse).unwrap();
        let mut identity = DiagonalMatrix::zeros(3);
        identity.identity();
        assert!(product.equals_with_tolerance(&identity, 1e-12));
        assert_eq!(d.transpose(), d);
    }

    #[test]
    fn test_inverse_singular() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, 0.0]);
        assert_eq!(d.inverse(), Err(MatrixError::SingularMatrix));
        // The pseudo-inverse tolerates the zero entry
        let pinv = d.pseudo_inverse(1e-10).unwrap();
        assert_eq!(pinv.diagonal(), &[0.5, 0.0]);
    }

    #[test]
    fn test_solve_consistent_underdetermined() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, 0.0]);
        let consistent = DenseVector::from_slice(&[4.0, 0.0]);
        let solved = d.solve_dense_vector(&consistent).unwrap();
        assert_eq!(solved.values(), &[2.0, 0.0]);

        let inconsistent = DenseVector::from_slice(&[4.0, 3.0]);
        assert_eq!(
            d.solve_dense_vector(&inconsistent),
            Err(MatrixError::SingularMatrix)
        );
    }

    #[test]
    fn test_solve_matrix_per_component() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, 0.0]);
        let consistent =
            DenseMatrix::from_row_major(2, 2, vec![4.0, 6.0, 0.0, 0.0]).unwrap();
        let solved = d.solve_dense_matrix(&consistent).unwrap();
        assert_eq!(solved.values(), &[2.0, 3.0, 0.0, 0.0]);

        let inconsistent =
            DenseMatrix::from_row_major(2, 2, vec![4.0, 6.0, 0.0, 1.0]).unwrap();
        assert_eq!(
            d.solve_dense_matrix(&inconsistent),
            Err(MatrixError::SingularMatrix)
        );
    }

    #[test]
    fn test_log_determinant_sign_encoding() {
        let odd = DiagonalMatrix::from_diagonal(vec![-2.0, 3.0]);
        let log_det = odd.log_determinant();
        assert!((log_det.real - (2.0_f64.ln() + 3.0_f64.ln())).abs() < 1e-12);
        assert_eq!(log_det.imaginary, core::f64::consts::PI);

        let even = DiagonalMatrix::from_diagonal(vec![-2.0, -3.0]);
        assert_eq!(even.log_determinant().imaginary, 0.0);
    }

    #[test]
    fn test_rank_counts_magnitudes() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, -1e-12, 0.0, -5.0]);
        assert_eq!(d.rank(1e-10), Ok(2));
        assert_eq!(d.rank(0.0), Ok(3));
        assert_eq!(d.rank(-1.0), Err(MatrixError::OutOfRange));
    }

    #[test]
    fn test_times_dense_scales_rows() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, 3.0]);
        let dense = DenseMatrix::from_row_major(2, 2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        let product = d.times_dense(&dense).unwrap();
        assert_eq!(product.values(), &[2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_plus_equals_dense_verifies_before_combining() {
        let mut d = DiagonalMatrix::from_diagonal(vec![1.0, 2.0]);
        let offender = DenseMatrix::from_row_major(2, 2, vec![1.0, 5.0, 0.0, 1.0]).unwrap();
        assert_eq!(
            d.plus_equals_dense(&offender),
            Err(MatrixError::InvalidAssignment)
        );
        // Receiver untouched after the rejected combine
        assert_eq!(d.diagonal(), &[1.0, 2.0]);

        let diagonal_shaped = DenseMatrix::from_row_major(2, 2, vec![3.0, 0.0, 0.0, 4.0]).unwrap();
        d.plus_equals_dense(&diagonal_shaped).unwrap();
        assert_eq!(d.diagonal(), &[4.0, 6.0]);
    }

    #[test]
    fn test_plus_equals_sparse_rejects_off_diagonal() {
        let mut d = DiagonalMatrix::zeros(3);
        let offender = SparseMatrix::from_triplets(3, 3, &[(0, 0, 1.0), (1, 2, 4.0)]).unwrap();
        assert_eq!(
            d.plus_equals_sparse(&offender),
            Err(MatrixError::InvalidAssignment)
        );

        // Explicit off-diagonal zeros are tolerated
        let benign =
            SparseMatrix::from_triplets(3, 3, &[(0, 0, 1.0), (1, 2, 0.0), (2, 2, 3.0)]).unwrap();
        d.plus_equals_sparse(&benign).unwrap();
        assert_eq!(d.diagonal(), &[1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_pre_times_equals_times() {
        let d = DiagonalMatrix::from_diagonal(vec![2.0, 3.0, 4.0]);
        let v = DenseVector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(
            d.times_dense_vector(&v).unwrap(),
            d.pre_times_dense_vector(&v).unwrap()
        );

        let s = SparseVector::from_entries(3, &[(1, 5.0)]).unwrap();
        assert_eq!(
            d.times_sparse_vector(&s).unwrap(),
            d.pre_times_sparse_vector(&s).unwrap()
        );
        assert_eq!(d.times_sparse_vector(&s).unwrap().get(1), Ok(15.0));
    }

    #[test]
    fn test_sub_matrix_stays_sparse() {
        let d = DiagonalMatrix::from_diagonal(vec![1.0, 2.0, 3.0]);
        let sub = d.get_sub_matrix(0, 1, 1, 2).unwrap();
        // Only the (1,1) diagonal cell of the source falls in the extent
        assert_eq!(sub.get(1, 0), Ok(2.0));
        assert_eq!(sub.entry_count(), 1);
    }

    #[test]
    fn test_row_and_column_extraction() {
        let d = DiagonalMatrix::from_diagonal(vec![1.0, 2.0, 3.0]);
        let row = d.get_row(1).unwrap();
        assert_eq!(row.entries(), vec![(1, 2.0)]);
        let column = d.get_column(2).unwrap();
        assert_eq!(column.entries(), vec![(2, 3.0)]);
    }

    #[test]
    fn test_convert_vector_rejects_off_diagonal() {
        let mut d = DiagonalMatrix::from_diagonal(vec![1.0, 2.0]);
        // Row-major position 1 maps to (0, 1): off the diagonal
        let bad = Vector::Dense(DenseVector::from_slice(&[1.0, 9.0, 0.0, 2.0]));
        assert_eq!(
            d.convert_from_vector(&bad),
            Err(MatrixError::InvalidAssignment)
        );
        assert_eq!(d.diagonal(), &[1.0, 2.0]);

        let good = Vector::Dense(DenseVector::from_slice(&[3.0, 0.0, 0.0, 4.0]));
        d.convert_from_vector(&good).unwrap();
        assert_eq!(d.diagonal(), &[3.0, 4.0]);
    }

    #[test]
    fn test_convert_to_vector_round_trip() {
        let mut d = DiagonalMatrix::from_diagonal(vec![5.0, 6.0]);
        let flattened = d.convert_to_vector();
        d.convert_from_vector(&flattened).unwrap();
        assert_eq!(d.diagonal(), &[5.0, 6.0]);
    }

    #[test]
    fn test_from_matrix_validation() {
        let dense = DenseMatrix::from_row_major(2, 2, vec![1.0, 0.0, 0.0, 2.0]).unwrap();
        let d = DiagonalMatrix::from_matrix(&Matrix::Dense(dense)).unwrap();
        assert_eq!(d.diagonal(), &[1.0, 2.0]);

        let offender = DenseMatrix::from_row_major(2, 2, vec![1.0, 3.0, 0.0, 2.0]).unwrap();
        assert_eq!(
            DiagonalMatrix::from_matrix(&Matrix::Dense(offender)),
            Err(MatrixError::InvalidAssignment)
        );

        let non_square = DenseMatrix::zeros(2, 3).unwrap();
        assert_eq!(
            DiagonalMatrix::from_matrix(&Matrix::Dense(non_square)),
            Err(MatrixError::DimensionMismatch)
        );
    }
}
