//! Abstract interfaces for the matrix kernel
//!
//! This module defines the trait contracts external collaborators depend
//! on. Traits are pure interfaces - the concrete representations live in
//! the `matkit` crate.

pub mod matrix;
pub mod vector;

pub use matrix::MatrixBase;
pub use vector::VectorBase;
