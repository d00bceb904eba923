//! Dimension-compatibility validation
//!
//! Pure shape checks reused by every binary operation: element-wise
//! combination, multiplication, solving, and parameter-vector conversion.

use crate::MatrixError;

/// Validate that two matrices share the same shape
pub const fn check_same_dimensions(
    a_rows: usize,
    a_columns: usize,
    b_rows: usize,
    b_columns: usize,
) -> Result<(), MatrixError> {
    if a_rows != b_rows || a_columns != b_columns {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Validate the inner dimensions of a matrix product
///
/// For `A (m x n)` times `B (p x q)` the product exists only when `n == p`.
pub const fn check_multiplication_dimensions(
    a_columns: usize,
    b_rows: usize,
) -> Result<(), MatrixError> {
    if a_columns != b_rows {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Validate a right-hand side for `A x = B`
///
/// The right-hand side must have as many rows (or components, for a
/// vector) as `A` has rows.
pub const fn check_solve_dimensions(a_rows: usize, rhs_rows: usize) -> Result<(), MatrixError> {
    if a_rows != rhs_rows {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Validate a vector's dimensionality against an expected value
pub const fn check_dimensionality(actual: usize, expected: usize) -> Result<(), MatrixError> {
    if actual != expected {
        return Err(MatrixError::DimensionMismatch);
    }
    Ok(())
}

/// Compute `rows * columns` with overflow protection
///
/// Creation of any representation sized by a cell count must route
/// through this so oversized requests fail instead of silently wrapping.
pub const fn checked_cell_count(rows: usize, columns: usize) -> Result<usize, MatrixError> {
    match rows.checked_mul(columns) {
        Some(count) => Ok(count),
        None => Err(MatrixError::Overflow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_same_dimensions() {
        assert_eq!(check_same_dimensions(2, 3, 2, 3), Ok(()));
        assert_eq!(
            check_same_dimensions(2, 3, 3, 2),
            Err(MatrixError::DimensionMismatch)
        );
    }

    #[test]
    fn test_check_multiplication_dimensions() {
        assert_eq!(check_multiplication_dimensions(3, 3), Ok(()));
        assert_eq!(
            check_multiplication_dimensions(3, 2),
            Err(MatrixError::DimensionMismatch)
        );
    }

    #[test]
    fn test_check_solve_dimensions() {
        assert_eq!(check_solve_dimensions(4, 4), Ok(()));
        assert_eq!(check_solve_dimensions(4, 3), Err(MatrixError::DimensionMismatch));
    }

    #[test]
    fn test_checked_cell_count() {
        assert_eq!(checked_cell_count(3, 4), Ok(12));
        assert_eq!(checked_cell_count(0, 4), Ok(0));
        assert_eq!(
            checked_cell_count(usize::MAX, 2),
            Err(MatrixError::Overflow)
        );
    }
}
