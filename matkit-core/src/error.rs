//! Error types for matrix kernel operations

/// Errors that can occur during matrix and vector operations
///
/// Every error is raised synchronously at the point of violation and is
/// never retried internally; callers should treat each one as a contract
/// violation to surface, not a transient condition to mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Index (or caller-supplied tolerance) outside its valid range
    OutOfRange,
    /// Operand shapes incompatible for the requested operation
    DimensionMismatch,
    /// Nonzero value bound for a structurally forbidden location
    InvalidAssignment,
    /// Inverse or solve requested against a matrix that does not span
    /// the needed space
    SingularMatrix,
    /// Requested dimensions overflow the addressable cell count
    Overflow,
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MatrixError::OutOfRange => "Index out of range",
            MatrixError::DimensionMismatch => "Operand dimensions do not match",
            MatrixError::InvalidAssignment => {
                "Nonzero value assigned to a structurally forbidden location"
            }
            MatrixError::SingularMatrix => "Matrix does not span the required space",
            MatrixError::Overflow => "Requested dimensions overflow the cell count",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for MatrixError {}

/// Result type for matrix kernel operations
pub type Result<T> = core::result::Result<T, MatrixError>;
