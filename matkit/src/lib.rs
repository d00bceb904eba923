//! matkit - Multi-Representation Matrix Kernel
//!
//! This library provides dense, compressed-sparse-row, and diagonal
//! matrix representations (plus dense and sparse vectors) behind one
//! arithmetic contract, with per-pair dispatch so every operation runs
//! the traversal best suited to both operand shapes.
//!
//! ## Architecture
//!
//! matkit follows a clean contracts/implementation separation:
//!
//! - **matkit-core**: Error taxonomy, `MatrixBase`/`VectorBase` traits,
//!   and pure bounds/shape validation (no storage)
//! - **matkit**: Concrete representations, dispatch, and factories
//!
//! ## Quick Start
//!
//! ```rust
//! use matkit::{DiagonalMatrix, Matrix, MatrixBase, MatrixFactory};
//!
//! fn example() -> matkit::Result<()> {
//!     // Scale the rows of an identity matrix with a diagonal product
//!     let scales = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![2.0, 3.0]));
//!     let identity = MatrixFactory::Dense.create_identity(2)?;
//!     let product = scales.times(&identity)?;
//!     assert_eq!(product.get(0, 0)?, 2.0);
//!     assert_eq!(product.get(1, 1)?, 3.0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Representations
//!
//! - **Dense**: row-major storage, the reference implementation and the
//!   home of the decompositional kernels (solve, inverse, SVD)
//! - **Sparse**: compressed rows with a buffered-edit overlay, so random
//!   writes stay cheap and reads are always canonical
//! - **Diagonal**: a single value sequence; O(n) products, inverses, and
//!   solves, with strict off-diagonal write rejection

// Re-export the shared contracts
pub use matkit_core::{
    // Core traits
    MatrixBase, VectorBase,
    // Error handling
    MatrixError, Result,
    // Value types
    ComplexNumber,
};

// Representation modules
pub mod dense_matrix;
pub mod dense_vector;
pub mod diagonal_matrix;
pub mod factory;
pub mod matrix;
pub mod sparse_matrix;
pub mod sparse_vector;
pub mod vector;

// Public exports
pub use dense_matrix::DenseMatrix;
pub use dense_vector::DenseVector;
pub use diagonal_matrix::DiagonalMatrix;
pub use factory::{MatrixFactory, VectorFactory};
pub use matrix::Matrix;
pub use sparse_matrix::SparseMatrix;
pub use sparse_vector::SparseVector;
pub use vector::Vector;
