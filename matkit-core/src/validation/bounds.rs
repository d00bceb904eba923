//! Index-range and tolerance validation
//!
//! Pure functions shared by every representation. Indices are `usize`, so
//! the negative half of the classic `[0, dimension)` contract is
//! unrepresentable; only the upper bound is checked at runtime.

use crate::MatrixError;

/// Validate a single index against a dimension
pub const fn check_index(index: usize, dimension: usize) -> Result<(), MatrixError> {
    if index >= dimension {
        return Err(MatrixError::OutOfRange);
    }
    Ok(())
}

/// Validate a (row, column) pair against a matrix's dimensions
pub const fn check_element_index(
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
) -> Result<(), MatrixError> {
    if row >= rows || column >= columns {
        return Err(MatrixError::OutOfRange);
    }
    Ok(())
}

/// Validate an inclusive sub-matrix extent against a matrix's dimensions
///
/// Bounds are inclusive on both ends, so `min_row == max_row` selects a
/// single row.
pub const fn check_submatrix_range(
    min_row: usize,
    max_row: usize,
    min_column: usize,
    max_column: usize,
    rows: usize,
    columns: usize,
) -> Result<(), MatrixError> {
    if min_row > max_row || min_column > max_column {
        return Err(MatrixError::OutOfRange);
    }
    if max_row >= rows || max_column >= columns {
        return Err(MatrixError::OutOfRange);
    }
    Ok(())
}

/// Validate a caller-supplied `effective_zero` tolerance
///
/// Tolerances are absolute magnitudes and must be non-negative. NaN is
/// rejected as well since every comparison against it would be vacuous.
pub fn check_effective_zero(effective_zero: f64) -> Result<(), MatrixError> {
    if effective_zero.is_nan() || effective_zero < 0.0 {
        return Err(MatrixError::OutOfRange);
    }
    Ok(())
}

/// Absolute-tolerance equality for scalar values
///
/// This is deliberately an absolute comparison, never a relative one: the
/// `effective_zero`-gated algorithms (rank, pseudo-inverse) depend on a
/// plain magnitude threshold.
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
