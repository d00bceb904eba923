//! Representation-selecting factories
//!
//! Callers that want to stay generic over storage pick a factory once and
//! build every matrix or vector through it. The factory decides the
//! representation; the values are identical either way.

use matkit_core::{MatrixBase, MatrixError, Result, VectorBase};

use crate::dense_matrix::DenseMatrix;
use crate::dense_vector::DenseVector;
use crate::diagonal_matrix::DiagonalMatrix;
use crate::matrix::Matrix;
use crate::sparse_matrix::SparseMatrix;
use crate::sparse_vector::SparseVector;
use crate::vector::Vector;

/// Chooses which matrix representation gets built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixFactory {
    /// Row-major dense matrices
    #[default]
    Dense,
    /// Compressed sparse row matrices
    Sparse,
    /// Diagonal matrices (always square)
    Diagonal,
}

impl MatrixFactory {
    /// Create a zero matrix of the given shape
    ///
    /// The diagonal factory requires `rows == columns` and fails with
    /// `DimensionMismatch` otherwise.
    pub fn create(&self, rows: usize, columns: usize) -> Result<Matrix> {
        match self {
            MatrixFactory::Dense => Ok(Matrix::Dense(DenseMatrix::zeros(rows, columns)?)),
            MatrixFactory::Sparse => Ok(Matrix::Sparse(SparseMatrix::zeros(rows, columns)?)),
            MatrixFactory::Diagonal => {
                if rows != columns {
                    return Err(MatrixError::DimensionMismatch);
                }
                Ok(Matrix::Diagonal(DiagonalMatrix::zeros(rows)))
            }
        }
    }

    /// Create an `n x n` identity matrix
    pub fn create_identity(&self, n: usize) -> Result<Matrix> {
        let mut result = self.create(n, n)?;
        result.identity();
        Ok(result)
    }

    /// Copy an arbitrary matrix into this factory's representation
    ///
    /// The diagonal factory validates the source the way
    /// `DiagonalMatrix::from_matrix` does.
    pub fn copy_matrix(&self, source: &Matrix) -> Result<Matrix> {
        match self {
            MatrixFactory::Dense => Ok(Matrix::Dense(source.to_dense()?)),
            MatrixFactory::Sparse => {
                let mut result = SparseMatrix::zeros(source.num_rows(), source.num_columns())?;
                for row in 0..source.num_rows() {
                    for column in 0..source.num_columns() {
                        let value = source.get(row, column)?;
                        if value != 0.0 {
                            result.set(row, column, value)?;
                        }
                    }
                }
                result.compress();
                Ok(Matrix::Sparse(result))
            }
            MatrixFactory::Diagonal => Ok(Matrix::Diagonal(DiagonalMatrix::from_matrix(source)?)),
        }
    }
}

/// Chooses which vector representation gets built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorFactory {
    /// One stored value per component
    #[default]
    Dense,
    /// Stored nonzeros only
    Sparse,
}

impl VectorFactory {
    /// Create a zero vector of the given dimensionality
    pub fn create(&self, dimensionality: usize) -> Vector {
        match self {
            VectorFactory::Dense => Vector::Dense(DenseVector::zeros(dimensionality)),
            VectorFactory::Sparse => Vector::Sparse(SparseVector::zeros(dimensionality)),
        }
    }

    /// Copy an arbitrary vector into this factory's representation
    pub fn copy_vector(&self, source: &Vector) -> Result<Vector> {
        match self {
            VectorFactory::Dense => Ok(Vector::Dense(source.to_dense())),
            VectorFactory::Sparse => {
                let mut result = SparseVector::zeros(source.dimensionality());
                for index in 0..source.dimensionality() {
                    let value = source.get(index)?;
                    if value != 0.0 {
                        result.set(index, value)?;
                    }
                }
                result.compress();
                Ok(Vector::Sparse(result))
            }
        }
    }
}
