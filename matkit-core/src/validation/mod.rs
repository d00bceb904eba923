//! Shape and bounds validation for the matrix kernel
//!
//! This module contains pure validation functions with no representation
//! dependencies. Every concrete matrix and vector type funnels its
//! dimension-compatibility and index-range checks through these helpers.

pub mod bounds;
pub mod shape;

pub use bounds::{
    check_effective_zero, check_element_index, check_index, check_submatrix_range,
    within_tolerance,
};
pub use shape::{
    check_dimensionality, check_multiplication_dimensions, check_same_dimensions,
    check_solve_dimensions, checked_cell_count,
};
