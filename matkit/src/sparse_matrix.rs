//! Sparse matrix representation
//!
//! Compressed-row storage: parallel value/column-index arrays plus a
//! `rows + 1` row-offset array, valid while the matrix is in its
//! compressed state. Writes that cannot be satisfied in place land in an
//! accumulation buffer (the uncompressed state); the buffer merges into
//! the arrays on the next compression, sorted by column within row with
//! duplicates resolved last-write-wins. Reads consult the buffer before
//! the arrays, so observable values always equal the canonical compressed
//! form regardless of state. Explicit stored zeros are permitted and
//! treated as present-with-zero-value.

use hashbrown::HashMap;
use matkit_core::{
    check_dimensionality, check_effective_zero, check_element_index, check_index,
    check_multiplication_dimensions, check_same_dimensions, check_submatrix_range,
    checked_cell_count, within_tolerance, ComplexNumber, MatrixBase, Result, VectorBase,
};

use crate::dense_matrix::DenseMatrix;
use crate::dense_vector::DenseVector;
use crate::diagonal_matrix::DiagonalMatrix;
use crate::sparse_vector::SparseVector;
use crate::vector::Vector;

/// A sparse 2-D grid of `f64` values in compressed-row storage
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseMatrix {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
    column_indices: Vec<usize>,
    row_offsets: Vec<usize>,
    edits: HashMap<(usize, usize), f64>,
}

impl SparseMatrix {
    /// Create an empty (all-zero) matrix
    ///
    /// The backing storage holds no entries, but the creation contract is
    /// uniform across representations: `rows * columns` must not overflow
    /// the addressable cell count.
    pub fn zeros(rows: usize, columns: usize) -> Result<Self> {
        checked_cell_count(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            values: Vec::new(),
            column_indices: Vec::new(),
            row_offsets: vec![0; rows + 1],
            edits: HashMap::new(),
        })
    }

    /// Create a matrix from `(row, column, value)` triples in any order
    ///
    /// Later triples at a duplicate position win. Fails with `OutOfRange`
    /// if any position is outside the dimensions.
    pub fn from_triplets(
        rows: usize,
        columns: usize,
        triples: &[(usize, usize, f64)],
    ) -> Result<Self> {
        let mut result = Self::zeros(rows, columns)?;
        for &(row, column, value) in triples {
            result.set(row, column, value)?;
        }
        result.compress();
        Ok(result)
    }

    /// Whether the accumulation buffer is empty
    pub fn is_compressed(&self) -> bool {
        self.edits.is_empty()
    }

    /// Merge the accumulation buffer into the compressed-row arrays
    ///
    /// Idempotent; callers needing deterministic iteration order can force
    /// the transition here instead of waiting for the next arithmetic
    /// operation on the receiver.
    pub fn compress(&mut self) {
        if self.edits.is_empty() {
            return;
        }
        let mut triples: Vec<(usize, usize, f64)> = self
            .base_triples()
            .filter(|&(row, column, _)| !self.edits.contains_key(&(row, column)))
            .collect();
        triples.extend(
            self.edits
                .drain()
                .map(|((row, column), value)| (row, column, value)),
        );
        self.rebuild(triples);
    }

    /// Canonical `(row, column, value)` triples, sorted by row then column
    ///
    /// Works in either state; explicit stored zeros are included.
    pub fn entries(&self) -> Vec<(usize, usize, f64)> {
        if self.edits.is_empty() {
            return self.base_triples().collect();
        }
        let mut triples: Vec<(usize, usize, f64)> = self
            .base_triples()
            .filter(|&(row, column, _)| !self.edits.contains_key(&(row, column)))
            .collect();
        triples.extend(
            self.edits
                .iter()
                .map(|(&(row, column), &value)| (row, column, value)),
        );
        triples.sort_unstable_by_key(|&(row, column, _)| (row, column));
        triples
    }

    /// Iterate the compressed-row arrays as triples
    fn base_triples(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (self.row_offsets[row]..self.row_offsets[row + 1]).map(move |position| {
                (row, self.column_indices[position], self.values[position])
            })
        })
    }

    /// Replace the compressed-row arrays with the given triples
    fn rebuild(&mut self, mut triples: Vec<(usize, usize, f64)>) {
        triples.sort_unstable_by_key(|&(row, column, _)| (row, column));
        self.values.clear();
        self.column_indices.clear();
        self.row_offsets.clear();
        self.row_offsets.resize(self.rows + 1, 0);
        for &(row, _, _) in &triples {
            self.row_offsets[row + 1] += 1;
        }
        for row in 0..self.rows {
            self.row_offsets[row + 1] += self.row_offsets[row];
        }
        self.values.reserve(triples.len());
        self.column_indices.reserve(triples.len());
        for (_, column, value) in triples {
            self.column_indices.push(column);
            self.values.push(value);
        }
    }

    /// Position of `(row, column)` in the compressed arrays, if stored
    fn base_position(&self, row: usize, column: usize) -> Option<usize> {
        let slice = &self.column_indices[self.row_offsets[row]..self.row_offsets[row + 1]];
        slice
            .binary_search(&column)
            .ok()
            .map(|offset| self.row_offsets[row] + offset)
    }

    /// Read a cell without a bounds check
    pub(crate) fn lookup(&self, row: usize, column: usize) -> f64 {
        if let Some(&value) = self.edits.get(&(row, column)) {
            return value;
        }
        match self.base_position(row, column) {
            Some(position) => self.values[position],
            None => 0.0,
        }
    }

    /// Add `delta` to the cell at `(row, column)`
    fn add_to(&mut self, row: usize, column: usize, delta: f64) {
        if let Some(value) = self.edits.get_mut(&(row, column)) {
            *value += delta;
            return;
        }
        match self.base_position(row, column) {
            Some(position) => self.values[position] += delta,
            None => {
                self.edits.insert((row, column), delta);
            }
        }
    }

    /// In-place addition of a dense operand
    pub fn plus_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        self.scaled_plus_equals_dense(other, 1.0)
    }

    /// In-place addition of a sparse operand
    pub fn plus_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        self.scaled_plus_equals_sparse(other, 1.0)
    }

    /// In-place addition of a diagonal operand
    pub fn plus_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        self.scaled_plus_equals_diagonal(other, 1.0)
    }

    /// In-place subtraction of a dense operand
    pub fn minus_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        self.scaled_plus_equals_dense(other, -1.0)
    }

    /// In-place subtraction of a sparse operand
    pub fn minus_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        self.scaled_plus_equals_sparse(other, -1.0)
    }

    /// In-place subtraction of a diagonal operand
    pub fn minus_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        self.scaled_plus_equals_diagonal(other, -1.0)
    }

    /// In-place `self += other * scale` against a dense operand
    ///
    /// The receiver stays sparse-typed but may end up storing an entry for
    /// every nonzero cell of the operand.
    pub fn scaled_plus_equals_dense(&mut self, other: &DenseMatrix, scale: f64) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        self.compress();
        for row in 0..self.rows {
            for (column, &value) in other.row(row).iter().enumerate() {
                if value != 0.0 {
                    self.add_to(row, column, value * scale);
                }
            }
        }
        self.compress();
        Ok(())
    }

    /// In-place `self += other * scale` against a sparse operand
    pub fn scaled_plus_equals_sparse(&mut self, other: &SparseMatrix, scale: f64) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.rows, other.columns)?;
        self.compress();
        for (row, column, value) in other.entries() {
            if value != 0.0 {
                self.add_to(row, column, value * scale);
            }
        }
        self.compress();
        Ok(())
    }

    /// In-place `self += other * scale` against a diagonal operand
    pub fn scaled_plus_equals_diagonal(
        &mut self,
        other: &DiagonalMatrix,
        scale: f64,
    ) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        self.compress();
        for (i, &value) in other.diagonal().iter().enumerate() {
            if value != 0.0 {
                self.add_to(i, i, value * scale);
            }
        }
        self.compress();
        Ok(())
    }

    /// In-place element-wise product with a dense operand
    pub fn dot_times_equals_dense(&mut self, other: &DenseMatrix) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        self.compress();
        for row in 0..self.rows {
            let source = other.row(row);
            for position in self.row_offsets[row]..self.row_offsets[row + 1] {
                self.values[position] *= source[self.column_indices[position]];
            }
        }
        Ok(())
    }

    /// In-place element-wise product with a sparse operand
    pub fn dot_times_equals_sparse(&mut self, other: &SparseMatrix) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.rows, other.columns)?;
        self.compress();
        for row in 0..self.rows {
            for position in self.row_offsets[row]..self.row_offsets[row + 1] {
                self.values[position] *= other.lookup(row, self.column_indices[position]);
            }
        }
        Ok(())
    }

    /// In-place element-wise product with a diagonal operand
    ///
    /// Every off-diagonal cell of the operand is zero, so only stored
    /// entries on the main diagonal survive.
    pub fn dot_times_equals_diagonal(&mut self, other: &DiagonalMatrix) -> Result<()> {
        check_same_dimensions(self.rows, self.columns, other.num_rows(), other.num_columns())?;
        self.compress();
        for row in 0..self.rows {
            for position in self.row_offsets[row]..self.row_offsets[row + 1] {
                if self.column_indices[position] == row {
                    self.values[position] *= other.diagonal()[row];
                } else {
                    self.values[position] = 0.0;
                }
            }
        }
        Ok(())
    }

    /// Matrix product against a dense operand, driven by this matrix's
    /// entries
    pub fn times_dense(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        check_multiplication_dimensions(self.columns, other.num_rows())?;
        let width = other.num_columns();
        let mut result = DenseMatrix::zeros(self.rows, width)?;
        for (row, k, value) in self.entries() {
            if value == 0.0 {
                continue;
            }
            let source = other.row(k);
            let target = &mut result.values_mut()[row * width..(row + 1) * width];
            for (t, s) in target.iter_mut().zip(source.iter()) {
                *t += value * s;
            }
        }
        Ok(result)
    }

    /// Matrix product against a sparse operand (sparse-sparse row merge)
    pub fn times_sparse(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        check_multiplication_dimensions(self.columns, other.rows)?;
        let mut other_rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); other.rows];
        for (row, column, value) in other.entries() {
            other_rows[row].push((column, value));
        }

        let mut result = SparseMatrix::zeros(self.rows, other.columns)?;
        let mut triples = Vec::new();
        let mut scratch = vec![0.0; other.columns];
        let mut occupied = vec![false; other.columns];
        let mut touched = Vec::new();

        let entries = self.entries();
        let mut position = 0;
        for row in 0..self.rows {
            while position < entries.len() && entries[position].0 == row {
                let (_, k, value) = entries[position];
                position += 1;
                if value == 0.0 {
                    continue;
                }
                for &(column, weight) in &other_rows[k] {
                    if !occupied[column] {
                        occupied[column] = true;
                        touched.push(column);
                    }
                    scratch[column] += value * weight;
                }
            }
            touched.sort_unstable();
            for &column in &touched {
                triples.push((row, column, scratch[column]));
                scratch[column] = 0.0;
                occupied[column] = false;
            }
            touched.clear();
        }
        result.rebuild(triples);
        Ok(result)
    }

    /// Matrix product against a diagonal operand: every entry in column
    /// `c` scaled by the operand's `c`-th diagonal entry
    pub fn times_diagonal(&self, other: &DiagonalMatrix) -> Result<SparseMatrix> {
        check_multiplication_dimensions(self.columns, other.num_rows())?;
        let mut result = SparseMatrix::zeros(self.rows, self.columns)?;
        let triples = self
            .entries()
            .into_iter()
            .map(|(row, column, value)| (row, column, value * other.diagonal()[column]))
            .collect();
        result.rebuild(triples);
        Ok(result)
    }

    /// Pre-multiplication by a diagonal operand: every entry in row `r`
    /// scaled by the operand's `r`-th diagonal entry
    ///
    /// This is `other * self` computed in this matrix's preferred
    /// traversal order; the diagonal representation delegates its
    /// sparse-operand product here.
    pub fn pre_times_diagonal(&self, other: &DiagonalMatrix) -> Result<SparseMatrix> {
        check_multiplication_dimensions(other.num_columns(), self.rows)?;
        let mut result = SparseMatrix::zeros(self.rows, self.columns)?;
        let triples = self
            .entries()
            .into_iter()
            .map(|(row, column, value)| (row, column, value * other.diagonal()[row]))
            .collect();
        result.rebuild(triples);
        Ok(result)
    }

    /// Matrix-vector product against a dense operand
    pub fn times_dense_vector(&self, vector: &DenseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.columns)?;
        let mut result = DenseVector::zeros(self.rows);
        for (row, column, value) in self.entries() {
            result.values_mut()[row] += value * vector.values()[column];
        }
        Ok(result)
    }

    /// Matrix-vector product against a sparse operand; the result stays
    /// sparse
    pub fn times_sparse_vector(&self, vector: &SparseVector) -> Result<SparseVector> {
        check_dimensionality(vector.dimensionality(), self.columns)?;
        let operand = vector.to_dense();
        let mut accumulator: HashMap<usize, f64> = HashMap::new();
        for (row, column, value) in self.entries() {
            let contribution = value * operand.values()[column];
            if contribution != 0.0 {
                *accumulator.entry(row).or_insert(0.0) += contribution;
            }
        }
        let pairs: Vec<(usize, f64)> = accumulator.into_iter().collect();
        SparseVector::from_entries(self.rows, &pairs)
    }

    /// Vector-matrix product `v^T * self` for a dense operand
    pub fn pre_times_dense_vector(&self, vector: &DenseVector) -> Result<DenseVector> {
        check_dimensionality(vector.dimensionality(), self.rows)?;
        let mut result = DenseVector::zeros(self.columns);
        for (row, column, value) in self.entries() {
            result.values_mut()[column] += value * vector.values()[row];
        }
        Ok(result)
    }

    /// Vector-matrix product `v^T * self` for a sparse operand; the
    /// result stays sparse
    pub fn pre_times_sparse_vector(&self, vector: &SparseVector) -> Result<SparseVector> {
        check_dimensionality(vector.dimensionality(), self.rows)?;
        let operand = vector.to_dense();
        let mut accumulator: HashMap<usize, f64> = HashMap::new();
        for (row, column, value) in self.entries() {
            let contribution = value * operand.values()[row];
            if contribution != 0.0 {
                *accumulator.entry(column).or_insert(0.0) += contribution;
            }
        }
        let pairs: Vec<(usize, f64)> = accumulator.into_iter().collect();
        SparseVector::from_entries(self.columns, &pairs)
    }

    /// Expand into a dense matrix
    pub fn to_dense(&self) -> Result<DenseMatrix> {
        let mut result = DenseMatrix::zeros(self.rows, self.columns)?;
        for (row, column, value) in self.entries() {
            result.values_mut()[row * self.columns + column] = value;
        }
        Ok(result)
    }

    /// Solve `self * X = B`; densifies and delegates to the dense
    /// elimination kernel
    pub fn solve_matrix(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        self.to_dense()?.solve_matrix(rhs)
    }

    /// Solve `self * x = b` for a vector right-hand side
    pub fn solve_vector(&self, rhs: &DenseVector) -> Result<DenseVector> {
        self.to_dense()?.solve_vector(rhs)
    }

    /// Invert via the dense kernel
    pub fn inverse(&self) -> Result<DenseMatrix> {
        self.to_dense()?.inverse()
    }

    /// Tolerance-gated pseudo-inverse via the dense kernel
    pub fn pseudo_inverse(&self, effective_zero: f64) -> Result<DenseMatrix> {
        check_effective_zero(effective_zero)?;
        self.to_dense()?.pseudo_inverse(effective_zero)
    }

    /// Count of singular values with magnitude strictly above
    /// `effective_zero`
    pub fn rank(&self, effective_zero: f64) -> Result<usize> {
        check_effective_zero(effective_zero)?;
        self.to_dense()?.rank(effective_zero)
    }

    /// Log-determinant via the dense kernel
    pub fn log_determinant(&self) -> Result<ComplexNumber> {
        self.to_dense()?.log_determinant()
    }

    /// Return the transposed matrix
    pub fn transpose(&self) -> SparseMatrix {
        let mut result = SparseMatrix {
            rows: self.columns,
            columns: self.rows,
            values: Vec::new(),
            column_indices: Vec::new(),
            row_offsets: vec![0; self.columns + 1],
            edits: HashMap::new(),
        };
        let triples = self
            .entries()
            .into_iter()
            .map(|(row, column, value)| (column, row, value))
            .collect();
        result.rebuild(triples);
        result
    }

    /// Squared Frobenius norm over stored entries
    pub fn norm_frobenius_squared(&self) -> f64 {
        self.entries().into_iter().map(|(_, _, v)| v * v).sum()
    }

    /// Frobenius norm
    pub fn norm_frobenius(&self) -> f64 {
        self.norm_frobenius_squared().sqrt()
    }

    /// Whether the matrix equals its transpose within an absolute
    /// tolerance
    pub fn is_symmetric(&self, effective_zero: f64) -> Result<bool> {
        check_effective_zero(effective_zero)?;
        if self.rows != self.columns {
            return Ok(false);
        }
        for (row, column, value) in self.entries() {
            if !within_tolerance(value, self.lookup(column, row), effective_zero) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Copy an inclusive sub-range into a fresh sparse matrix
    pub fn get_sub_matrix(
        &self,
        min_row: usize,
        max_row: usize,
        min_column: usize,
        max_column: usize,
    ) -> Result<SparseMatrix> {
        check_submatrix_range(min_row, max_row, min_column, max_column, self.rows, self.columns)?;
        let mut result = SparseMatrix::zeros(max_row - min_row + 1, max_column - min_column + 1)?;
        let triples = self
            .entries()
            .into_iter()
            .filter(|&(row, column, _)| {
                row >= min_row && row <= max_row && column >= min_column && column <= max_column
            })
            .map(|(row, column, value)| (row - min_row, column - min_column, value))
            .collect();
        result.rebuild(triples);
        Ok(result)
    }

    /// Copy one row into a fresh sparse vector
    pub fn get_row(&self, row: usize) -> Result<SparseVector> {
        check_index(row, self.rows)?;
        let pairs: Vec<(usize, f64)> = self
            .entries()
            .into_iter()
            .filter(|&(r, _, _)| r == row)
            .map(|(_, column, value)| (column, value))
            .collect();
        SparseVector::from_entries(self.columns, &pairs)
    }

    /// Copy one column into a fresh sparse vector
    pub fn get_column(&self, column: usize) -> Result<SparseVector> {
        check_index(column, self.columns)?;
        let pairs: Vec<(usize, f64)> = self
            .entries()
            .into_iter()
            .filter(|&(_, c, _)| c == column)
            .map(|(row, _, value)| (row, value))
            .collect();
        SparseVector::from_entries(self.rows, &pairs)
    }

    /// Overwrite with the identity pattern
    pub fn identity(&mut self) {
        self.edits.clear();
        let triples = (0..self.rows.min(self.columns))
            .map(|i| (i, i, 1.0))
            .collect();
        self.rebuild(triples);
    }

    /// Scale every stored entry in place
    pub fn scale_equals(&mut self, scale: f64) {
        for value in &mut self.values {
            *value *= scale;
        }
        for value in self.edits.values_mut() {
            *value *= scale;
        }
    }

    /// Return a scaled copy
    pub fn scale(&self, scale: f64) -> SparseMatrix {
        let mut result = self.clone();
        result.scale_equals(scale);
        result
    }

    /// Whether every cell is within `effective_zero` of zero
    pub fn is_zero(&self, effective_zero: f64) -> bool {
        self.entries()
            .into_iter()
            .all(|(_, _, v)| v.abs() <= effective_zero)
    }

    /// Absolute-tolerance equality against another sparse matrix
    pub fn equals_with_tolerance(&self, other: &SparseMatrix, tolerance: f64) -> bool {
        if self.rows != other.rows || self.columns != other.columns {
            return false;
        }
        self.entries()
            .into_iter()
            .all(|(row, column, value)| {
                within_tolerance(value, other.lookup(row, column), tolerance)
            })
            && other.entries().into_iter().all(|(row, column, value)| {
                within_tolerance(value, self.lookup(row, column), tolerance)
            })
    }
}

impl PartialEq for SparseMatrix {
    /// Structural state (compressed or not, explicit zeros) is ignored;
    /// two sparse matrices are equal when their canonical values are.
    fn eq(&self, other: &Self) -> bool {
        if self.rows != other.rows || self.columns != other.columns {
            return false;
        }
        self.entries()
            .into_iter()
            .all(|(row, column, value)| value == other.lookup(row, column))
            && other
                .entries()
                .into_iter()
                .all(|(row, column, value)| value == self.lookup(row, column))
    }
}

impl MatrixBase for SparseMatrix {
    type Vector = Vector;

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, column: usize) -> Result<f64> {
        check_element_index(row, column, self.rows, self.columns)?;
        Ok(self.lookup(row, column))
    }

    fn set(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        check_element_index(row, column, self.rows, self.columns)?;
        // An in-place overwrite of an already-stored entry keeps the
        // compressed state; anything else reverts to accumulation.
        if self.edits.is_empty() {
            if let Some(position) = self.base_position(row, column) {
                self.values[position] = value;
                return Ok(());
            }
        }
        self.edits.insert((row, column), value);
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries().len()
    }

    fn is_sparse(&self) -> bool {
        true
    }

    fn convert_to_vector(&self) -> Vector {
        let mut result = SparseVector::zeros(self.rows * self.columns);
        for (row, column, value) in self.entries() {
            // Positions were bounds-checked at insertion; the row-major
            // offset cannot exceed the checked cell count.
            let _ = result.set(row * self.columns + column, value);
        }
        result.compress();
        Vector::Sparse(result)
    }

    fn convert_from_vector(&mut self, parameters: &Vector) -> Result<()> {
        check_dimensionality(
            parameters.dimensionality(),
            checked_cell_count(self.rows, self.columns)?,
        )?;
        self.edits.clear();
        let mut triples = Vec::new();
        match parameters {
            Vector::Dense(dense) => {
                for (index, &value) in dense.values().iter().enumerate() {
                    if value != 0.0 {
                        triples.push((index / self.columns, index % self.columns, value));
                    }
                }
            }
            Vector::Sparse(sparse) => {
                for (index, value) in sparse.entries() {
                    if value != 0.0 {
                        triples.push((index / self.columns, index % self.columns, value));
                    }
                }
            }
        }
        self.rebuild(triples);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matkit_core::MatrixError;

    fn sample() -> SparseMatrix {
        SparseMatrix::from_triplets(3, 3, &[(0, 0, 1.0), (0, 2, 2.0), (1, 1, 3.0), (2, 0, 4.0)])
            .unwrap()
    }

    #[test]
    fn test_lazy_compression_observability() {
        let mut m = SparseMatrix::zeros(3, 3).unwrap();
        // Arbitrary insertion order with a duplicate position
        m.set(2, 1, 7.0).unwrap();
        m.set(0, 0, 1.0).unwrap();
        m.set(2, 1, 5.0).unwrap();
        assert!(!m.is_compressed());
        assert_eq!(m.get(2, 1), Ok(5.0));
        assert_eq!(m.get(0, 0), Ok(1.0));
        assert_eq!(m.get(1, 1), Ok(0.0));

        m.compress();
        assert!(m.is_compressed());
        assert_eq!(m.entries(), vec![(0, 0, 1.0), (2, 1, 5.0)]);
        m.compress();
        assert_eq!(m.entries(), vec![(0, 0, 1.0), (2, 1, 5.0)]);
    }

    #[test]
    fn test_creation_overflow() {
        assert_eq!(
            SparseMatrix::zeros(usize::MAX, 2).unwrap_err(),
            MatrixError::Overflow
        );
    }

    #[test]
    fn test_times_sparse() {
        let a = sample();
        let identity = SparseMatrix::from_triplets(3, 3, &[(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)])
            .unwrap();
        let product = a.times_sparse(&identity).unwrap();
        assert_eq!(product, a);

        let b = SparseMatrix::from_triplets(3, 2, &[(0, 0, 1.0), (2, 1, 2.0)]).unwrap();
        let product = a.times_sparse(&b).unwrap();
        // Row 0 of a is [1, 0, 2]: 1*b[0] + 2*b[2] = [1, 4]
        assert_eq!(product.get(0, 0), Ok(1.0));
        assert_eq!(product.get(0, 1), Ok(4.0));
        assert_eq!(product.get(1, 0), Ok(0.0));
        assert_eq!(product.get(2, 0), Ok(4.0));
    }

    #[test]
    fn test_times_dense_matches_densified() {
        let a = sample();
        let b = DenseMatrix::from_row_major(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let sparse_product = a.times_dense(&b).unwrap();
        let dense_product = a.to_dense().unwrap().times_dense(&b).unwrap();
        assert!(sparse_product.equals_with_tolerance(&dense_product, 1e-12));
    }

    #[test]
    fn test_transpose() {
        let a = sample();
        let t = a.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.get(2, 0), Ok(2.0));
        assert_eq!(t.get(0, 2), Ok(4.0));
        // Double transposition is the identity
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_sub_matrix_stays_sparse() {
        let a = sample();
        let sub = a.get_sub_matrix(0, 1, 1, 2).unwrap();
        assert_eq!(sub.num_rows(), 2);
        assert_eq!(sub.num_columns(), 2);
        assert_eq!(sub.get(0, 1), Ok(2.0));
        assert_eq!(sub.get(1, 0), Ok(3.0));
    }

    #[test]
    fn test_row_and_column_extraction() {
        let a = sample();
        let row = a.get_row(0).unwrap();
        assert_eq!(row.entries(), vec![(0, 1.0), (2, 2.0)]);
        let column = a.get_column(0).unwrap();
        assert_eq!(column.entries(), vec![(0, 1.0), (2, 4.0)]);
    }

    #[test]
    fn test_solve_via_densification() {
        let a = SparseMatrix::from_triplets(2, 2, &[(0, 0, 2.0), (1, 1, 4.0)]).unwrap();
        let b = DenseVector::from_slice(&[2.0, 2.0]);
        let x = a.solve_vector(&b).unwrap();
        assert!((x.values()[0] - 1.0).abs() < 1e-12);
        assert!((x.values()[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_convert_vector_round_trip() {
        let mut a = sample();
        let flattened = a.convert_to_vector();
        let before = a.clone();
        a.convert_from_vector(&flattened).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn test_is_symmetric() {
        let symmetric =
            SparseMatrix::from_triplets(2, 2, &[(0, 1, 3.0), (1, 0, 3.0)]).unwrap();
        assert_eq!(symmetric.is_symmetric(0.0), Ok(true));
        let asymmetric = SparseMatrix::from_triplets(2, 2, &[(0, 1, 3.0)]).unwrap();
        assert_eq!(asymmetric.is_symmetric(0.0), Ok(false));
    }
}
