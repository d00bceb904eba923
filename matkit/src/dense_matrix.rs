//! Dense matrix representation
//!
//! A complete row-major `rows x columns` grid. These are the reference
//! implementations of the arithmetic contract: always correct, never
//! short-circuited by sparsity. The decompositional operations (solve,
//! inverse, pseudo-inverse, rank, log-determinant) live here and the other
//! representations densify and delegate when they have no cheaper route.

use matkit_core::{
    check_dimensionality, check_effective_zero, check_element_index, check_index,
    check_multiplication_dimensions, check_same_dimensions, check_solve_dimensions,
    check_submatrix_range, checked_cell_count, within_tolerance, ComplexNumber, MatrixBase,
    MatrixError, Result, VectorBase,
};

use crate::dense_vector::DenseVector;
use crate::diagonal_matrix::DiagonalMatrix;
use crate::sparse_matrix::SparseMatrix;
use crate::sparse_vector::SparseVector;
use crate::vector::Vector;

/// Convergence threshold for the one-sided Jacobi sweeps
const JACOBI_EPSILON: f64 = 1e-14;

/// Sweep cap; Jacobi converges in a handful of sweeps for any
/// well-conditioned input, so hitting this means the values left are noise
const JACOBI_MAX_SWEEPS: usize = 60;

/// A dense 2-D grid of `f64` values in row-major order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseMatrix {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
}

impl DenseMatrix {
    /// Create a zero matrix
    ///
    /// Fails with `Overflow` if `rows * columns` overflows the
    /// addressable cell count.
    pub fn zeros(rows: usize, columns: usize) -> Result<Self> {
        let cells = checked_cell_count(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            values: vec![0.0; cells],
        })
    }

    /// Create a matrix owning the given row-major cell values
    pub fn from_row_major(rows: usize, columns: usize, values: Vec<f64>) -> Result<Self> {
        let cells = checked_cell_count(rows, columns)?;
        if values.len() != cells {
            return Err(MatrixError::DimensionMismatch);
        }
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Create a matrix copying the given rows
    ///
    /// Every row must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            if row.len() != columns {
                return Err(MatrixError::DimensionMismatch);
            }
            values.extend_from_slice(row);
        }
        Self::from_row_major(rows.len(), columns, values)
    }

    #[inline]
    fn at(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.columns + column]
    }

    #[inline]
    fn at_mut(&mut self, row: usize, column: usize) -> &mut f64 {
        &mut self.values[row * self.columns + column]
    }

    /// Borrow one row as a slice
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.columns..(row + 1) * self.columns]
    }

    /// Borrow the row-major backing storage
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutably borrow the row-major backing storage
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// In-place addition of a dense operand
    pub fn plus_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        self.scaled_plus_equals_dense(other, 1.0)
    }

    /// In-place addition of a sparse operand, touching only its entries
    pub fn plus_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        self.scaled_plus_equals_sparse(other, 1.0)
    }

    /// In-place addition of a diagonal operand along the diagonal only
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
    pub fn scaled_plus_equals_dense(&mut self, other: &DenseMatrix, scale: f64) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.rows, other.columns)?;
        for (target, source) in self.values.iter_mut().zip(other.values.iter()) {
            *target += source * scale;
        }
        Ok(())
    }

    /// In-place `self += other * scale` against a sparse operand
    pub fn scaled_plus_equals_sparse(&mut self, other: &SparseMatrix, scale: f64) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        for (row, column, value) in other.entries() {
            *self.at_mut(row, column) += value * scale;
        }
        Ok(())
    }

    /// In-place `self += other * scale` against a diagonal operand
    pub fn scaled_plus_equals_diagonal(
        &mut self,
        other: &DiagonalMatrix,
        scale: f64,
    ) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        for (i, value) in other.diagonal().iter().enumerate() {
            *self.at_mut(i, i) += value * scale;
        }
        Ok(())
    }

    /// In-place element-wise product with a dense operand
    pub fn dot_times_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.rows, other.columns)?;
        for (target, source) in self.values.iter_mut().zip(other.values.iter()) {
            *target *= source;
        }
        Ok(())
    }

    /// In-place element-wise product with a sparse operand
    ///
    /// Cells the operand does not store are zero, so the result only keeps
    /// values at the operand's stored positions.
    pub fn dot_times_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        let mut result = vec![0.0; self.values.len()];
        for (row, column, value) in other.entries() {
            result[row * self.columns + column] = self.at(row, column) * value;
        }
        self.values = result;
        Ok(())
    }

    /// In-place element-wise product with a diagonal operand
    ///
    /// Every off-diagonal cell of the operand is zero, so only the
    /// receiver's diagonal survives.
    pub fn dot_times_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        for row in 0..self.rows {
            for column in 0..self.columns {
                if row == column {
                    *self.at_mut(row, column) *= other.diagonal()[row];
                } else {
                    *self.at_mut(row, column) = 0.0;
                }
            }
        }
        Ok(())
    }

    /// Matrix product against a dense operand
    pub fn times_dense(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        check_multiplication_dimensions(self.columns, other.rows)?;
        let mut result = DenseMatrix::zeros(self.rows, other.columns)?;
        for i in 0..self.rows {
            for k in 0..self.columns {
                let a = self.at(i, k);
                if a == 0.0 {
                    continue;
                }
                let source = other.row(k);
                let target =
                    &mut result.values[i * other.columns..(i + 1) * other.columns];
                for (t, s) in target.iter_mut().zip(source.iter()) {
                    *t += a * s;
                }
            }
        }
        Ok(result)
    }

    /// Matrix product against a sparse operand, driven by its entries
    pub fn times_sparse(&self, other: &SparseMatrix) -> Result<DenseMatrix> {
        check_multiplication_dimensions(self.columns, other.num_rows())?;
        let mut result = DenseMatrix::zeros(self.rows, other.num_columns())?;
        for (k, j, value) in other.entries() {
            if value == 0.0 {
                continue;
            }
            for i in 0..self.rows {
                *result.at_mut(i, j) += self.at(i, k) * value;
            }
        }
        Ok(result)
    }

    /// Matrix product against a diagonal operand: column `j` scaled by
    /// the operand's `j`-th diagonal entry
    pub fn times_diagonal(&self, other: &DiagonalMatrix) -> Result<DenseMatrix> {
        check_multiplication_dimensions(self.columns, other.num_rows())?;
        let mut result = self.clone();
        for row in 0..result.rows {
            for column in 0..result.columns {
                *result.at_mut(row, column) *= other.diagonal()[column];
            }
        }
        Ok(result)
    }

    /// Matrix-vector product against a dense operand
    pub fn times_dense_vector(&self, vector: &DenseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.columns)?;
        let mut result = DenseVector::zeros(self.rows);
        for i in 0..self.rows {
            result.values_mut()[i] = self
                .row(i)
                .iter()
                .zip(vector.values().iter())
                .map(|(a, x)| a * x)
                .sum();
        }
        Ok(result)
    }

    /// Matrix-vector product against a sparse operand, touching only its
    /// nonzero components
    pub fn times_sparse_vector(&self, vector: &SparseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.columns)?;
        let mut result = DenseVector::zeros(self.rows);
        for (index, value) in vector.entries() {
            if value == 0.0 {
                continue;
            }
            for i in 0..self.rows {
                result.values_mut()[i] += self.at(i, index) * value;
            }
        }
        Ok(result)
    }

    /// Vector-matrix product `v^T * self` for a dense operand
    pub fn pre_times_dense_vector(&self, vector: &DenseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.rows)?;
        let mut result = DenseVector::zeros(self.columns);
        for (i, &v) in vector.values().iter().enumerate() {
            if v == 0.0 {
                continue;
            }
            for (t, a) in result.values_mut().iter_mut().zip(self.row(i).iter()) {
                *t += v * a;
            }
        }
        Ok(result)
    }

    /// Vector-matrix product `v^T * self` for a sparse operand
    pub fn pre_times_sparse_vector(&self, vector: &SparseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.rows)?;
        let mut result = DenseVector::zeros(self.columns);
        for (index, value) in vector.entries() {
            if value == 0.0 {
                continue;
            }
            for (t, a) in result.values_mut().iter_mut().zip(self.row(index).iter()) {
                *t += value * a;
            }
        }
        Ok(result)
    }

    /// Solve `self * X = B` by Gaussian elimination with partial pivoting
    ///
    /// Requires a square receiver. An exact-zero pivot fails with
    /// `SingularMatrix`.
    pub fn solve_matrix(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        if !self.is_square() {
            return Err(MatrixError::DimensionMismatch);
        }
        check_solve_dimensions(self.rows, rhs.rows)?;

        let n = self.rows;
        let width = rhs.columns;
        let mut a = self.clone();
        let mut x = rhs.clone();

        // Forward elimination
        for k in 0..n {
            let mut pivot_row = k;
            let mut pivot_magnitude = a.at(k, k).abs();
            for i in (k + 1)..n {
                let magnitude = a.at(i, k).abs();
                if magnitude > pivot_magnitude {
                    pivot_row = i;
                    pivot_magnitude = magnitude;
                }
            }
            if a.at(pivot_row, k) == 0.0 {
                return Err(MatrixError::SingularMatrix);
            }
            if pivot_row != k {
                a.swap_rows(k, pivot_row);
                x.swap_rows(k, pivot_row);
            }
            let pivot = a.at(k, k);
            for i in (k + 1)..n {
                let factor = a.at(i, k) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in k..n {
                    *a.at_mut(i, j) -= factor * a.at(k, j);
                }
                for j in 0..width {
                    *x.at_mut(i, j) -= factor * x.at(k, j);
                }
            }
        }

        // Back substitution
        for k in (0..n).rev() {
            for j in 0..width {
                let mut accumulated = x.at(k, j);
                for i in (k + 1)..n {
                    accumulated -= a.at(k, i) * x.at(i, j);
                }
                *x.at_mut(k, j) = accumulated / a.at(k, k);
            }
        }
        Ok(x)
    }

    /// Solve `self * x = b` for a vector right-hand side
    pub fn solve_vector(&self, rhs: &DenseVector) -> Result<DenseVector> {
        let column =
            DenseMatrix::from_row_major(rhs.dimensionality(), 1, rhs.values().to_vec())?;
        let solved = self.solve_matrix(&column)?;
        Ok(DenseVector::from_vec(solved.values))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.columns {
            self.values.swap(a * self.columns + j, b * self.columns + j);
        }
    }

    /// Invert the matrix
    ///
    /// Fails with `SingularMatrix` when the matrix does not span its
    /// column space.
    pub fn inverse(&self) -> Result<DenseMatrix> {
        if !self.is_square() {
            return Err(MatrixError::DimensionMismatch);
        }
        let mut identity = DenseMatrix::zeros(self.rows, self.rows)?;
        identity.identity();
        self.solve_matrix(&identity)
    }

    /// Tolerance-gated pseudo-inverse via the singular value decomposition
    ///
    /// Singular values at or below `effective_zero` contribute zero to the
    /// result instead of failing.
    pub fn pseudo_inverse(&self, effective_zero: f64) -> Result<DenseMatrix> {
        check_effective_zero(effective_zero)?;
        if self.rows >= self.columns {
            let (u, sigma, v) = self.jacobi_svd();
            let mut result = DenseMatrix::zeros(self.columns, self.rows)?;
            for k in 0..sigma.len() {
                if sigma[k].abs() <= effective_zero {
                    continue;
                }
                let reciprocal = 1.0 / sigma[k];
                for i in 0..self.columns {
                    for j in 0..self.rows {
                        *result.at_mut(i, j) += v.at(i, k) * reciprocal * u.at(j, k);
                    }
                }
            }
            Ok(result)
        } else {
            Ok(self.transpose().pseudo_inverse(effective_zero)?.transpose())
        }
    }

    /// Count of singular values with magnitude strictly above
    /// `effective_zero`
    pub fn rank(&self, effective_zero: f64) -> Result<usize> {
        check_effective_zero(effective_zero)?;
        Ok(self
            .singular_values()
            .into_iter()
            .filter(|sigma| sigma.abs() > effective_zero)
            .count())
    }

    /// Singular values, unordered
    pub fn singular_values(&self) -> Vec<f64> {
        if self.rows >= self.columns {
            self.jacobi_svd().1
        } else {
            self.transpose().jacobi_svd().1
        }
    }

    /// One-sided Jacobi SVD for `rows >= columns`
    ///
    /// Returns `(U, sigma, V)` with `U` of shape `rows x columns`, `sigma`
    /// of length `columns`, and `V` square, satisfying
    /// `self = U * diag(sigma) * V^T`. Columns with a zero singular value
    /// get a zero `U` column.
    fn jacobi_svd(&self) -> (DenseMatrix, Vec<f64>, DenseMatrix) {
        debug_assert!(self.rows >= self.columns);
        let m = self.rows;
        let n = self.columns;
        let mut b = self.clone();
        // n <= m, so n * n cannot exceed the already-allocated cell count
        let mut v = DenseMatrix {
            rows: n,
            columns: n,
            values: vec![0.0; n * n],
        };
        v.identity();

        for _ in 0..JACOBI_MAX_SWEEPS {
            let mut rotated = false;
            for p in 0..n {
                for q in (p + 1)..n {
                    let mut alpha = 0.0;
                    let mut beta = 0.0;
                    let mut gamma = 0.0;
                    for i in 0..m {
                        let bp = b.at(i, p);
                        let bq = b.at(i, q);
                        alpha += bp * bp;
                        beta += bq * bq;
                        gamma += bp * bq;
                    }
                    if gamma == 0.0 || gamma.abs() <= JACOBI_EPSILON * (alpha * beta).sqrt() {
                        continue;
                    }
                    rotated = true;
                    let zeta = (beta - alpha) / (2.0 * gamma);
                    let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = c * t;
                    for i in 0..m {
                        let bp = b.at(i, p);
                        let bq = b.at(i, q);
                        *b.at_mut(i, p) = c * bp - s * bq;
                        *b.at_mut(i, q) = s * bp + c * bq;
                    }
                    for i in 0..n {
                        let vp = v.at(i, p);
                        let vq = v.at(i, q);
                        *v.at_mut(i, p) = c * vp - s * vq;
                        *v.at_mut(i, q) = s * vp + c * vq;
                    }
                }
            }
            if !rotated {
                break;
            }
        }

        let mut sigma = vec![0.0; n];
        let mut u = DenseMatrix {
            rows: m,
            columns: n,
            values: vec![0.0; m * n],
        };
        for j in 0..n {
            let mut norm_squared = 0.0;
            for i in 0..m {
                norm_squared += b.at(i, j) * b.at(i, j);
            }
            let norm = norm_squared.sqrt();
            sigma[j] = norm;
            if norm > 0.0 {
                for i in 0..m {
                    *u.at_mut(i, j) = b.at(i, j) / norm;
                }
            }
        }
        (u, sigma, v)
    }

    /// Log-determinant via LU decomposition with partial pivoting
    ///
    /// The real part is `log|det|`; the imaginary part is `PI` when the
    /// determinant is negative, `0.0` otherwise. A zero pivot yields a
    /// real part of negative infinity.
    pub fn log_determinant(&self) -> Result<ComplexNumber> {
        if !self.is_square() {
            return Err(MatrixError::DimensionMismatch);
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut negative = false;
        let mut log_sum = 0.0;

        for k in 0..n {
            let mut pivot_row = k;
            let mut pivot_magnitude = a.at(k, k).abs();
            for i in (k + 1)..n {
                let magnitude = a.at(i, k).abs();
                if magnitude > pivot_magnitude {
                    pivot_row = i;
                    pivot_magnitude = magnitude;
                }
            }
            let pivot = a.at(pivot_row, k);
            if pivot == 0.0 {
                return Ok(ComplexNumber::new(f64::NEG_INFINITY, 0.0));
            }
            if pivot_row != k {
                a.swap_rows(k, pivot_row);
                negative = !negative;
            }
            if pivot < 0.0 {
                negative = !negative;
                log_sum += (-pivot).ln();
            } else {
                log_sum += pivot.ln();
            }
            for i in (k + 1)..n {
                let factor = a.at(i, k) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in k..n {
                    *a.at_mut(i, j) -= factor * a.at(k, j);
                }
            }
        }
        Ok(ComplexNumber::new(
            log_sum,
            if negative { core::f64::consts::PI } else { 0.0 },
        ))
    }

    /// Return the transposed matrix
    pub fn transpose(&self) -> DenseMatrix {
        let mut result = DenseMatrix {
            rows: self.columns,
            columns: self.rows,
            values: vec![0.0; self.values.len()],
        };
        for row in 0..self.rows {
            for column in 0..self.columns {
                *result.at_mut(column, row) = self.at(row, column);
            }
        }
        result
    }

    /// Squared Frobenius norm
    pub fn norm_frobenius_squared(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Frobenius norm
    pub fn norm_frobenius(&self) -> f64 {
        self.norm_frobenius_squared().sqrt()
    }

    /// Whether the matrix equals its transpose within an absolute
    /// tolerance
    pub fn is_symmetric(&self, effective_zero: f64) -> Result<bool> {
        check_effective_zero(effective_zero)?;
        if !self.is_square() {
            return Ok(false);
        }
        for row in 0..self.rows {
            for column in (row + 1)..self.columns {
                if !within_tolerance(self.at(row, column), self.at(column, row), effective_zero) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Copy an inclusive sub-range into a fresh dense matrix
    pub fn get_sub_matrix(
        &self,
        min_row: usize,
        max_row: usize,
        min_column: usize,
        max_column: usize,
    ) -> Result<DenseMatrix> {
        check_submatrix_range(min_row, max_row, min_column, max_column, self.rows, self.columns)?;
        let mut result = DenseMatrix::zeros(max_row - min_row + 1, max_column - min_column + 1)?;
        for row in min_row..=max_row {
            for column in min_column..=max_column {
                *result.at_mut(row - min_row, column - min_column) = self.at(row, column);
            }
        }
        Ok(result)
    }

    /// Copy one row into a fresh dense vector
    pub fn get_row(&self, row: usize) -> Result<DenseVector> {
        check_index(row, self.rows)?;
        Ok(DenseVector::from_slice(self.row(row)))
    }

    /// Copy one column into a fresh dense vector
    pub fn get_column(&self, column: usize) -> Result<DenseVector> {
        check_index(column, self.columns)?;
        let mut result = DenseVector::zeros(self.rows);
        for row in 0..self.rows {
            result.values_mut()[row] = self.at(row, column);
        }
        Ok(result)
    }

    /// Overwrite with the identity pattern (ones down the main diagonal)
    pub fn identity(&mut self) {
        self.values.fill(0.0);
        for i in 0..self.rows.min(self.columns) {
            *self.at_mut(i, i) = 1.0;
        }
    }

    /// Scale every cell in place
    pub fn scale_equals(&mut self, scale: f64) {
        for value in &mut self.values {
            *value *= scale;
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> DenseMatrix {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Whether every cell is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        self.values.iter().all(|v| v.abs() <= effective_zero)
    }

    /// Absolute-tolerance equality against another dense matrix
    pub fn equals_with_tolerance(&self, other: &DenseMatrix, tolerance: f64) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| within_tolerance(*a, *b, tolerance))
    }
}

impl MatrixBase for DenseMatrix {
    type Vector = Vector;

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, column: usize) -> Result<f64> {
        check_element_index(row, column, self.rows, self.columns)?;
        Ok(self.at(row, column))
    }

    fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        check_element_index(row, column, self.rows, self.columns)?;
        *self.at_mut(row, column) = value;
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.values.len()
    }

    fn is_sparse(&self) -> bool {
        false
    }

    fn convert_to_vector(&self) -> Vector {
        Vector::Dense(DenseVector::from_slice(&self.values))
    }

    fn convert_from_vector(&mut self, parameters: &Vector) -> Result<()> {
        check_dimensionality(parameters.dimensionality(), self.values.len())?;
        match parameters {
            Vector::Dense(dense) => self.values.copy_from_slice(dense.values()),
            Vector::Sparse(sparse) => {
                self.values.fill(0.0);
                for (index, value) in sparse.entries() {
                    self.values[index] = value;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_2x2(a: f64, b: f64, c: f64, d: f64) -> DenseMatrix {
        DenseMatrix::from_row_major(2, 2, vec![a, b, c, d]).unwrap()
    }

    #[test]
    fn test_creation_overflow() {
        assert_eq!(
            DenseMatrix::zeros(usize::MAX, 2).unwrap_err(),
            MatrixError::Overflow
        );
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = DenseMatrix::zeros(2, 3).unwrap();
        assert_eq!(m.set(1, 2, 5.0), Ok(()));
        assert_eq!(m.get(1, 2), Ok(5.0));
        assert_eq!(m.get(2, 0), Err(MatrixError::OutOfRange));
        assert_eq!(m.get(0, 3), Err(MatrixError::OutOfRange));
    }

    #[test]
    fn test_times_dense() {
        let a = matrix_2x2(1.0, 2.0, 3.0, 4.0);
        let b = matrix_2x2(5.0, 6.0, 7.0, 8.0);
        let product = a.times_dense(&b).unwrap();
        assert_eq!(product.values(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_solve_and_inverse() {
        let a = matrix_2x2(4.0, 7.0, 2.0, 6.0);
        let b = DenseVector::from_slice(&[1.0, 1.0]);
        let x = a.solve_vector(&b).unwrap();
        // 4x + 7y = 1, 2x + 6y = 1 => x = -0.1, y = 0.2
        assert!((x.values()[0] + 0.1).abs() < 1e-12);
        assert!((x.values()[1] - 0.2).abs() < 1e-12);

        let inverse = a.inverse().unwrap();
        let product = a.times_dense(&inverse).unwrap();
        let mut identity = DenseMatrix::zeros(2, 2).unwrap();
        identity.identity();
        assert!(product.equals_with_tolerance(&identity, 1e-12));
    }

    #[test]
    fn test_singular_solve_fails() {
        let a = matrix_2x2(1.0, 2.0, 2.0, 4.0);
        let b = DenseVector::from_slice(&[1.0, 1.0]);
        assert_eq!(a.solve_vector(&b), Err(MatrixError::SingularMatrix));
        assert_eq!(a.inverse(), Err(MatrixError::SingularMatrix));
    }

    #[test]
    fn test_rank_via_singular_values() {
        let full = matrix_2x2(2.0, 0.0, 1.0, 3.0);
        assert_eq!(full.rank(1e-10), Ok(2));

        let deficient = matrix_2x2(1.0, 2.0, 2.0, 4.0);
        assert_eq!(deficient.rank(1e-10), Ok(1));

        // Rank is invariant under transposition
        assert_eq!(deficient.transpose().rank(1e-10), Ok(1));
    }

    #[test]
    fn test_rank_rejects_negative_tolerance() {
        let m = matrix_2x2(1.0, 0.0, 0.0, 1.0);
        assert_eq!(m.rank(-1.0), Err(MatrixError::OutOfRange));
    }

    #[test]
    fn test_pseudo_inverse_recovers_inverse() {
        let a = matrix_2x2(4.0, 0.0, 0.0, 2.0);
        let pinv = a.pseudo_inverse(1e-10).unwrap();
        let expected = matrix_2x2(0.25, 0.0, 0.0, 0.5);
        assert!(pinv.equals_with_tolerance(&expected, 1e-10));
    }

    #[test]
    fn test_pseudo_inverse_tolerates_deficiency() {
        // Rank-1 matrix: the pseudo-inverse must not fail
        let a = matrix_2x2(1.0, 2.0, 2.0, 4.0);
        let pinv = a.pseudo_inverse(1e-10).unwrap();
        // A * A+ * A == A for a valid pseudo-inverse
        let reconstructed = a.times_dense(&pinv).unwrap().times_dense(&a).unwrap();
        assert!(reconstructed.equals_with_tolerance(&a, 1e-10));
    }

    #[test]
    fn test_log_determinant_sign() {
        let positive = matrix_2x2(2.0, 0.0, 0.0, 3.0);
        let log_det = positive.log_determinant().unwrap();
        assert!((log_det.real - 6.0_f64.ln()).abs() < 1e-12);
        assert_eq!(log_det.imaginary, 0.0);

        let negative = matrix_2x2(0.0, 1.0, 1.0, 0.0);
        let log_det = negative.log_determinant().unwrap();
        assert!((log_det.real - 0.0).abs() < 1e-12);
        assert_eq!(log_det.imaginary, core::f64::consts::PI);
    }

    #[test]
    fn test_transpose_and_symmetry() {
        let m = DenseMatrix::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = m.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.get(0, 1), Ok(4.0));
        assert_eq!(m.is_symmetric(0.0), Ok(false));

        let s = matrix_2x2(1.0, 2.0, 2.0, 5.0);
        assert_eq!(s.is_symmetric(0.0), Ok(true));
    }

    #[test]
    fn test_sub_matrix_and_extraction() {
        let m = DenseMatrix::from_row_major(3, 3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ])
        .unwrap();
        let sub = m.get_sub_matrix(1, 2, 0, 1).unwrap();
        assert_eq!(sub.values(), &[4.0, 5.0, 7.0, 8.0]);
        assert_eq!(
            m.get_sub_matrix(2, 1, 0, 1),
            Err(MatrixError::OutOfRange)
        );

        assert_eq!(m.get_row(1).unwrap().values(), &[4.0, 5.0, 6.0]);
        assert_eq!(m.get_column(2).unwrap().values(), &[3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_convert_vector_round_trip() {
        let mut m = matrix_2x2(1.0, 2.0, 3.0, 4.0);
        let flattened = m.convert_to_vector();
        m.convert_from_vector(&flattened).unwrap();
        assert_eq!(m, matrix_2x2(1.0, 2.0, 3.0, 4.0));
    }
}
