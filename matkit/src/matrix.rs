//! Representation-erased matrix
//!
//! `Matrix` wraps the concrete matrix representations behind one enum.
//! Every binary operation matches on the (receiver, operand) variant pair
//! and forwards to the typed overload on the concrete type, so each of
//! the nine pairings runs the traversal best suited to both shapes.
//! Result representations follow the operands: products and extractions
//! of sparse-family inputs stay sparse wherever the math allows it.

use matkit_core::{within_tolerance, ComplexNumber, MatrixBase, Result};

use crate::dense_matrix::DenseMatrix;
use crate::dense_vector::DenseVector;
use crate::diagonal_matrix::DiagonalMatrix;
use crate::sparse_matrix::SparseMatrix;
use crate::vector::Vector;

/// A matrix of any representation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Matrix {
    /// Row-major dense storage
    Dense(DenseMatrix),
    /// Compressed sparse rows with buffered edits
    Sparse(SparseMatrix),
    /// Diagonal-only storage
    Diagonal(DiagonalMatrix),
}

impl Matrix {
    /// In-place addition: `self += other`
    pub fn plus_equals(&mut self, other: &Matrix) -> Result<()> {
        self.scaled_plus_equals(other, 1.0)
    }

    /// In-place subtraction: `self -= other`
    pub fn minus_equals(&mut self, other: &Matrix) -> Result<()> {
        self.scaled_plus_equals(other, -1.0)
    }

    /// In-place scaled addition: `self += other * scale`
    ///
    /// A diagonal receiver fails with `InvalidAssignment` when the
    /// operand carries a nonzero off-diagonal cell, and is untouched on
    /// failure.
    pub fn scaled_plus_equals(&mut self, other: &Matrix, scale: f64) -> Result<()> {
        match (self, other) {
            (Matrix::Dense(a), Matrix::Dense(b)) => a.scaled_plus_equals_dense(b, scale),
            (Matrix::Dense(a), Matrix::Sparse(b)) => a.scaled_plus_equals_sparse(b, scale),
            (Matrix::Dense(a), Matrix::Diagonal(b)) => a.scaled_plus_equals_diagonal(b, scale),
            (Matrix::Sparse(a), Matrix::Dense(b)) => a.scaled_plus_equals_dense(b, scale),
            (Matrix::Sparse(a), Matrix::Sparse(b)) => a.scaled_plus_equals_sparse(b, scale),
            (Matrix::Sparse(a), Matrix::Diagonal(b)) => a.scaled_plus_equals_diagonal(b, scale),
            (Matrix::Diagonal(a), Matrix::Dense(b)) => a.scaled_plus_equals_dense(b, scale),
            (Matrix::Diagonal(a), Matrix::Sparse(b)) => a.scaled_plus_equals_sparse(b, scale),
            (Matrix::Diagonal(a), Matrix::Diagonal(b)) => a.scaled_plus_equals_diagonal(b, scale),
        }
    }

    /// In-place element-wise product: `self[i][j] *= other[i][j]`
    pub fn dot_times_equals(&mut self, other: &Matrix) -> Result<()> {
        match (self, other) {
            (Matrix::Dense(a), Matrix::Dense(b)) => a.dot_times_equals_dense(b),
            (Matrix::Dense(a), Matrix::Sparse(b)) => a.dot_times_equals_sparse(b),
            (Matrix::Dense(a), Matrix::Diagonal(b)) => a.dot_times_equals_diagonal(b),
            (Matrix::Sparse(a), Matrix::Dense(b)) => a.dot_times_equals_dense(b),
            (Matrix::Sparse(a), Matrix::Sparse(b)) => a.dot_times_equals_sparse(b),
            (Matrix::Sparse(a), Matrix::Diagonal(b)) => a.dot_times_equals_diagonal(b),
            (Matrix::Diagonal(a), Matrix::Dense(b)) => a.dot_times_equals_dense(b),
            (Matrix::Diagonal(a), Matrix::Sparse(b)) => a.dot_times_equals_sparse(b),
            (Matrix::Diagonal(a), Matrix::Diagonal(b)) => a.dot_times_equals_diagonal(b),
        }
    }

    /// Addition into a fresh matrix
    pub fn plus(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        result.plus_equals(other)?;
        Ok(result)
    }

    /// Subtraction into a fresh matrix
    pub fn minus(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        result.minus_equals(other)?;
        Ok(result)
    }

    /// Scaled addition into a fresh matrix
    pub fn scaled_plus(&self, other: &Matrix, scale: f64) -> Result<Matrix> {
        let mut result = self.clone();
        result.scaled_plus_equals(other, scale)?;
        Ok(result)
    }

    /// Element-wise product into a fresh matrix
    pub fn dot_times(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        result.dot_times_equals(other)?;
        Ok(result)
    }

    /// Matrix product
    ///
    /// The result representation follows the operands: a dense operand on
    /// either side yields a dense product (except when the other side is
    /// diagonal on the left, which merely scales rows and keeps the
    /// result dense too), sparse-by-sparse stays sparse, and
    /// diagonal-by-diagonal stays diagonal.
    pub fn times(&self, other: &Matrix) -> Result<Matrix> {
        match (self, other) {
            (Matrix::Dense(a), Matrix::Dense(b)) => Ok(Matrix::Dense(a.times_dense(b)?)),
            (Matrix::Dense(a), Matrix::Sparse(b)) => Ok(Matrix::Dense(a.times_sparse(b)?)),
            (Matrix::Dense(a), Matrix::Diagonal(b)) => Ok(Matrix::Dense(a.times_diagonal(b)?)),
            (Matrix::Sparse(a), Matrix::Dense(b)) => Ok(Matrix::Dense(a.times_dense(b)?)),
            (Matrix::Sparse(a), Matrix::Sparse(b)) => Ok(Matrix::Sparse(a.times_sparse(b)?)),
            (Matrix::Sparse(a), Matrix::Diagonal(b)) => Ok(Matrix::Sparse(a.times_diagonal(b)?)),
            (Matrix::Diagonal(a), Matrix::Dense(b)) => Ok(Matrix::Dense(a.times_dense(b)?)),
            (Matrix::Diagonal(a), Matrix::Sparse(b)) => Ok(Matrix::Sparse(a.times_sparse(b)?)),
            (Matrix::Diagonal(a), Matrix::Diagonal(b)) => {
                Ok(Matrix::Diagonal(a.times_diagonal(b)?))
            }
        }
    }

    /// Matrix-vector product `self * vector`
    ///
    /// A sparse-family receiver applied to a sparse vector yields a
    /// sparse result; every other pairing densifies.
    pub fn times_vector(&self, vector: &Vector) -> Result<Vector> {
        match (self, vector) {
            (Matrix::Dense(a), Vector::Dense(v)) => Ok(Vector::Dense(a.times_dense_vector(v)?)),
            (Matrix::Dense(a), Vector::Sparse(v)) => Ok(Vector::Dense(a.times_sparse_vector(v)?)),
            (Matrix::Sparse(a), Vector::Dense(v)) => Ok(Vector::Dense(a.times_dense_vector(v)?)),
            (Matrix::Sparse(a), Vector::Sparse(v)) => {
                Ok(Vector::Sparse(a.times_sparse_vector(v)?))
            }
            (Matrix::Diagonal(a), Vector::Dense(v)) => {
                Ok(Vector::Dense(a.times_dense_vector(v)?))
            }
            (Matrix::Diagonal(a), Vector::Sparse(v)) => {
                Ok(Vector::Sparse(a.times_sparse_vector(v)?))
            }
        }
    }

    /// Vector-matrix product `vector * self`
    pub fn pre_times_vector(&self, vector: &Vector) -> Result<Vector> {
        match (self, vector) {
            (Matrix::Dense(a), Vector::Dense(v)) => {
                Ok(Vector::Dense(a.pre_times_dense_vector(v)?))
            }
            (Matrix::Dense(a), Vector::Sparse(v)) => {
                Ok(Vector::Dense(a.pre_times_sparse_vector(v)?))
            }
            (Matrix::Sparse(a), Vector::Dense(v)) => {
                Ok(Vector::Dense(a.pre_times_dense_vector(v)?))
            }
            (Matrix::Sparse(a), Vector::Sparse(v)) => {
                Ok(Vector::Sparse(a.pre_times_sparse_vector(v)?))
            }
            (Matrix::Diagonal(a), Vector::Dense(v)) => {
                Ok(Vector::Dense(a.pre_times_dense_vector(v)?))
            }
            (Matrix::Diagonal(a), Vector::Sparse(v)) => {
                Ok(Vector::Sparse(a.pre_times_sparse_vector(v)?))
            }
        }
    }

    /// Solve `self * X = B` for a matrix right-hand side
    ///
    /// Dense and sparse receivers run Gaussian elimination over a dense
    /// working copy and return a dense solution. A diagonal receiver
    /// solves per component and preserves the right-hand side's
    /// representation.
    pub fn solve_matrix(&self, rhs: &Matrix) -> Result<Matrix> {
        match (self, rhs) {
            (Matrix::Dense(a), rhs) => Ok(Matrix::Dense(a.solve_matrix(&rhs.to_dense()?)?)),
            (Matrix::Sparse(a), rhs) => Ok(Matrix::Dense(a.solve_matrix(&rhs.to_dense()?)?)),
            (Matrix::Diagonal(a), Matrix::Dense(b)) => {
                Ok(Matrix::Dense(a.solve_dense_matrix(b)?))
            }
            (Matrix::Diagonal(a), Matrix::Sparse(b)) => {
                Ok(Matrix::Sparse(a.solve_sparse_matrix(b)?))
            }
            (Matrix::Diagonal(a), Matrix::Diagonal(b)) => {
                Ok(Matrix::Diagonal(a.solve_diagonal_matrix(b)?))
            }
        }
    }

    /// Solve `self * x = b` for a vector right-hand side
    pub fn solve_vector(&self, rhs: &Vector) -> Result<Vector> {
        match (self, rhs) {
            (Matrix::Dense(a), rhs) => Ok(Vector::Dense(a.solve_vector(&rhs.to_dense())?)),
            (Matrix::Sparse(a), rhs) => Ok(Vector::Dense(a.solve_vector(&rhs.to_dense())?)),
            (Matrix::Diagonal(a), Vector::Dense(b)) => {
                Ok(Vector::Dense(a.solve_dense_vector(b)?))
            }
            (Matrix::Diagonal(a), Vector::Sparse(b)) => {
                Ok(Vector::Sparse(a.solve_sparse_vector(b)?))
            }
        }
    }

    /// Invert the matrix
    ///
    /// Diagonal inverses stay diagonal; everything else densifies.
    pub fn inverse(&self) -> Result<Matrix> {
        match self {
            Matrix::Dense(a) => Ok(Matrix::Dense(a.inverse()?)),
            Matrix::Sparse(a) => Ok(Matrix::Dense(a.inverse()?)),
            Matrix::Diagonal(a) => Ok(Matrix::Diagonal(a.inverse()?)),
        }
    }

    /// Tolerance-gated Moore-Penrose pseudo-inverse
    pub fn pseudo_inverse(&self, effective_zero: f64) -> Result<Matrix> {
        match self {
            Matrix::Dense(a) => Ok(Matrix::Dense(a.pseudo_inverse(effective_zero)?)),
            Matrix::Sparse(a) => Ok(Matrix::Dense(a.pseudo_inverse(effective_zero)?)),
            Matrix::Diagonal(a) => Ok(Matrix::Diagonal(a.pseudo_inverse(effective_zero)?)),
        }
    }

    /// Numerical rank at the given tolerance
    pub fn rank(&self, effective_zero: f64) -> Result<usize> {
        match self {
            Matrix::Dense(a) => a.rank(effective_zero),
            Matrix::Sparse(a) => a.rank(effective_zero),
            Matrix::Diagonal(a) => a.rank(effective_zero),
        }
    }

    /// Natural log of the determinant, with sign carried in the
    /// imaginary part
    pub fn log_determinant(&self) -> Result<ComplexNumber> {
        match self {
            Matrix::Dense(a) => a.log_determinant(),
            Matrix::Sparse(a) => a.log_determinant(),
            Matrix::Diagonal(a) => Ok(a.log_determinant()),
        }
    }

    /// Transposed copy, preserving the representation
    pub fn transpose(&self) -> Matrix {
        match self {
            Matrix::Dense(a) => Matrix::Dense(a.transpose()),
            Matrix::Sparse(a) => Matrix::Sparse(a.transpose()),
            Matrix::Diagonal(a) => Matrix::Diagonal(a.transpose()),
        }
    }

    /// Whether the matrix equals its transpose at the given tolerance
    pub fn is_symmetric(&self, effective_zero: f64) -> Result<bool> {
        match self {
            Matrix::Dense(a) => a.is_symmetric(effective_zero),
            Matrix::Sparse(a) => a.is_symmetric(effective_zero),
            Matrix::Diagonal(a) => a.is_symmetric(effective_zero),
        }
    }

    /// Copy an inclusive sub-range
    ///
    /// Sparse-family sources keep a sparse extraction; dense sources
    /// stay dense.
    pub fn get_sub_matrix(
        &self,
        min_row: usize,
        max_row: usize,
        min_column: usize,
        max_column: usize,
    ) -> Result<Matrix> {
        match self {
            Matrix::Dense(a) => Ok(Matrix::Dense(
                a.get_sub_matrix(min_row, max_row, min_column, max_column)?,
            )),
            Matrix::Sparse(a) => Ok(Matrix::Sparse(
                a.get_sub_matrix(min_row, max_row, min_column, max_column)?,
            )),
            Matrix::Diagonal(a) => Ok(Matrix::Sparse(
                a.get_sub_matrix(min_row, max_row, min_column, max_column)?,
            )),
        }
    }

    /// Copy one row, preserving sparsity
    pub fn get_row(&self, row: usize) -> Result<Vector> {
        match self {
            Matrix::Dense(a) => Ok(Vector::Dense(a.get_row(row)?)),
            Matrix::Sparse(a) => Ok(Vector::Sparse(a.get_row(row)?)),
            Matrix::Diagonal(a) => Ok(Vector::Sparse(a.get_row(row)?)),
        }
    }

    /// Copy one column, preserving sparsity
    pub fn get_column(&self, column: usize) -> Result<Vector> {
        match self {
            Matrix::Dense(a) => Ok(Vector::Dense(a.get_column(column)?)),
            Matrix::Sparse(a) => Ok(Vector::Sparse(a.get_column(column)?)),
            Matrix::Diagonal(a) => Ok(Vector::Sparse(a.get_column(column)?)),
        }
    }

    /// Overwrite with the identity pattern
    pub fn identity(&mut self) {
        match self {
            Matrix::Dense(a) => a.identity(),
            Matrix::Sparse(a) => a.identity(),
            Matrix::Diagonal(a) => a.identity(),
        }
    }

    /// Scale every stored value in place
    pub fn scale_equals(&mut self, scale: f64) {
        match self {
            Matrix::Dense(a) => a.scale_equals(scale),
            Matrix::Sparse(a) => a.scale_equals(scale),
            Matrix::Diagonal(a) => a.scale_equals(scale),
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> Matrix {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Whether every cell is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        match self {
            Matrix::Dense(a) => a.is_zero(effective_zero),
            Matrix::Sparse(a) => a.is_zero(effective_zero),
            Matrix::Diagonal(a) => a.is_zero(effective_zero),
        }
    }

    /// Squared Frobenius norm
    pub fn norm_frobenius_squared(&self) -> f64 {
        match self {
            Matrix::Dense(a) => a.norm_frobenius_squared(),
            Matrix::Sparse(a) => a.norm_frobenius_squared(),
            Matrix::Diagonal(a) => a.norm_frobenius_squared(),
        }
    }

    /// Frobenius norm
    pub fn norm_frobenius(&self) -> f64 {
        self.norm_frobenius_squared().sqrt()
    }

    /// Absolute-tolerance equality across representations
    ///
    /// Equality is defined on observed cell values, so a diagonal matrix
    /// and a dense matrix holding the same values compare equal.
    pub fn equals_with_tolerance(&self, other: &Matrix, tolerance: f64) -> bool {
        match (self, other) {
            (Matrix::Dense(a), Matrix::Dense(b)) => a.equals_with_tolerance(b, tolerance),
            (Matrix::Sparse(a), Matrix::Sparse(b)) => a.equals_with_tolerance(b, tolerance),
            (Matrix::Diagonal(a), Matrix::Diagonal(b)) => a.equals_with_tolerance(b, tolerance),
            _ => self.equals_by_cells(other, tolerance),
        }
    }

    fn equals_by_cells(&self, other: &Matrix, tolerance: f64) -> bool {
        if self.num_rows() != other.num_rows() || self.num_columns() != other.num_columns() {
            return false;
        }
        for row in 0..self.num_rows() {
            for column in 0..self.num_columns() {
                match (self.get(row, column), other.get(row, column)) {
                    (Ok(a), Ok(b)) if within_tolerance(a, b, tolerance) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Expand into a dense matrix
    pub fn to_dense(&self) -> Result<DenseMatrix> {
        match self {
            Matrix::Dense(a) => Ok(a.clone()),
            Matrix::Sparse(a) => a.to_dense(),
            Matrix::Diagonal(a) => a.to_dense(),
        }
    }

    /// Canonicalize any buffered sparse edits; the other representations
    /// are always canonical so this is a no-op for them
    pub fn compress(&mut self) {
        if let Matrix::Sparse(a) = self {
            a.compress();
        }
    }
}

impl MatrixBase for Matrix {
    type Vector = Vector;

    fn num_rows(&self) -> usize {
        match self {
            Matrix::Dense(a) => a.num_rows(),
            Matrix::Sparse(a) => a.num_rows(),
            Matrix::Diagonal(a) => a.num_rows(),
        }
    }

    fn num_columns(&self) -> usize {
        match self {
            Matrix::Dense(a) => a.num_columns(),
            Matrix::Sparse(a) => a.num_columns(),
            Matrix::Diagonal(a) => a.num_columns(),
        }
    }

    fn get(&self, row: usize, column: usize) -> Result<f64> {
        match self {
            Matrix::Dense(a) => a.get(row, column),
            Matrix::Sparse(a) => a.get(row, column),
            Matrix::Diagonal(a) => a.get(row, column),
        }
    }

    fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        match self {
            Matrix::Dense(a) => a.set(row, column, value),
            Matrix::Sparse(a) => a.set(row, column, value),
            Matrix::Diagonal(a) => a.set(row, column, value),
        }
    }

    fn entry_count(&self) -> usize {
        match self {
            Matrix::Dense(a) => a.entry_count(),
            Matrix::Sparse(a) => a.entry_count(),
            Matrix::Diagonal(a) => a.entry_count(),
        }
    }

    fn is_sparse(&self) -> bool {
        match self {
            Matrix::Dense(a) => a.is_sparse(),
            Matrix::Sparse(a) => a.is_sparse(),
            Matrix::Diagonal(a) => a.is_sparse(),
        }
    }

    fn convert_to_vector(&self) -> Vector {
        match self {
            Matrix::Dense(a) => a.convert_to_vector(),
            Matrix::Sparse(a) => a.convert_to_vector(),
            Matrix::Diagonal(a) => a.convert_to_vector(),
        }
    }

    fn convert_from_vector(&mut self, parameters: &Vector) -> Result<()> {
        match self {
            Matrix::Dense(a) => a.convert_from_vector(parameters),
            Matrix::Sparse(a) => a.convert_from_vector(parameters),
            Matrix::Diagonal(a) => a.convert_from_vector(parameters),
        }
    }
}

impl From<DenseMatrix> for Matrix {
    fn from(matrix: DenseMatrix) -> Self {
        Matrix::Dense(matrix)
    }
}

impl From<SparseMatrix> for Matrix {
    fn from(matrix: SparseMatrix) -> Self {
        Matrix::Sparse(matrix)
    }
}

impl From<DiagonalMatrix> for Matrix {
    fn from(matrix: DiagonalMatrix) -> Self {
        Matrix::Diagonal(matrix)
    }
}
