//! Core matrix abstraction trait
//!
//! This is the narrow interface collaborating subsystems (distributions,
//! estimators, serialization plumbing) program against: dimensionality
//! queries, bounds-checked element access, and the flat parameter-vector
//! mapping. The full arithmetic vocabulary lives on the concrete
//! representations and their dispatch layer.

use crate::error::Result;

/// Shared read/write contract every matrix representation satisfies
pub trait MatrixBase {
    /// The vector representation produced by parameter-vector conversion
    type Vector;

    /// Number of rows in the logical grid
    fn num_rows(&self) -> usize;

    /// Number of columns in the logical grid
    fn num_columns(&self) -> usize;

    /// Whether the matrix is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_columns()
    }

    /// Bounds-checked element read
    ///
    /// Fails with `OutOfRange` if either index is outside its dimension.
    fn get(&self, row: usize, column: usize) -> Result<f64>;

    /// Bounds-checked element write
    ///
    /// Fails with `OutOfRange` on a bad index, or `InvalidAssignment` if
    /// the representation structurally forbids a nonzero value at the
    /// target location.
    fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()>;

    /// Number of entries the backing storage actually holds
    ///
    /// `rows * columns` for a dense grid, the stored-entry count for a
    /// sparse one, and the diagonal length for a diagonal matrix.
    fn entry_count(&self) -> usize;

    /// Whether the backing storage exploits sparsity
    fn is_sparse(&self) -> bool;

    /// Flatten the `rows * columns` cells into a parameter vector in
    /// row-major order
    fn convert_to_vector(&self) -> Self::Vector;

    /// Load the matrix's cells from a row-major parameter vector
    ///
    /// Fails with `DimensionMismatch` if the vector does not carry
    /// exactly `rows * columns` components, or `InvalidAssignment` if a
    /// nonzero component maps to a structurally forbidden cell.
    fn convert_from_vector(&mut self, parameters: &Self::Vector) -> Result<()>;
}
