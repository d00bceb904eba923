//! matkit-core - Matrix Kernel Contracts
//!
//! This crate provides the shared contracts for the matkit matrix kernel:
//! the error taxonomy, the `MatrixBase`/`VectorBase` traits, the
//! complex-number value type used by log-determinants, and the pure
//! bounds/shape validation functions every representation reuses.
//!
//! No concrete representation lives here; those are in the `matkit` crate.

pub mod complex;
pub mod error;
pub mod traits;
pub mod validation;

pub use complex::*;
pub use error::*;
pub use traits::*;
pub use validation::*;
