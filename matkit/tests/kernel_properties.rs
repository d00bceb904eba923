//! Cross-representation behavior of the matrix kernel
//!
//! These tests exercise the public enum surface the way a caller would:
//! mixing representations freely and checking that every pairing agrees
//! on values, errors, and result representations.

use matkit::{
    DenseMatrix, DenseVector, DiagonalMatrix, Matrix, MatrixBase, MatrixError, MatrixFactory,
    SparseMatrix, SparseVector, Vector, VectorBase, VectorFactory,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOLERANCE: f64 = 1e-9;

fn random_dense(rng: &mut StdRng, rows: usize, columns: usize) -> DenseMatrix {
    let values = (0..rows * columns).map(|_| rng.gen_range(-1.0..1.0)).collect();
    DenseMatrix::from_row_major(rows, columns, values).unwrap()
}

fn random_sparse(rng: &mut StdRng, rows: usize, columns: usize, entries: usize) -> SparseMatrix {
    let triples: Vec<(usize, usize, f64)> = (0..entries)
        .map(|_| {
            (
                rng.gen_range(0..rows),
                rng.gen_range(0..columns),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();
    SparseMatrix::from_triplets(rows, columns, &triples).unwrap()
}

#[test]
fn diagonal_inverse_times_self_is_identity() {
    let d = DiagonalMatrix::from_diagonal(vec![2.0, -3.0, 0.5, 10.0]);
    let matrix = Matrix::Diagonal(d);
    let product = matrix.inverse().unwrap().times(&matrix).unwrap();
    let identity = MatrixFactory::Diagonal.create_identity(4).unwrap();
    assert!(product.equals_with_tolerance(&identity, TOLERANCE));
}

#[test]
fn diagonal_times_dense_scales_rows() {
    let d = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![2.0, 3.0]));
    let ones = Matrix::Dense(DenseMatrix::from_row_major(2, 2, vec![1.0; 4]).unwrap());
    let product = d.times(&ones).unwrap();
    let expected =
        Matrix::Dense(DenseMatrix::from_row_major(2, 2, vec![2.0, 2.0, 3.0, 3.0]).unwrap());
    assert!(product.equals_with_tolerance(&expected, TOLERANCE));
}

#[test]
fn rank_is_invariant_across_representations() {
    // The same rank-2 values in all three representations
    let diagonal = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![4.0, 0.0, -1.0]));
    let dense = Matrix::Dense(diagonal.to_dense().unwrap());
    let sparse = MatrixFactory::Sparse.copy_matrix(&diagonal).unwrap();

    assert_eq!(diagonal.rank(1e-10), Ok(2));
    assert_eq!(dense.rank(1e-10), Ok(2));
    assert_eq!(sparse.rank(1e-10), Ok(2));
}

#[test]
fn solve_agrees_between_dense_and_diagonal() {
    let entries = vec![3.0, -2.0, 0.25];
    let diagonal = Matrix::Diagonal(DiagonalMatrix::from_diagonal(entries));
    let dense = Matrix::Dense(diagonal.to_dense().unwrap());
    let rhs = Vector::Dense(DenseVector::from_slice(&[6.0, 4.0, 1.0]));

    let from_diagonal = diagonal.solve_vector(&rhs).unwrap();
    let from_dense = dense.solve_vector(&rhs).unwrap();
    assert!(from_diagonal.equals_with_tolerance(&from_dense, TOLERANCE));
    assert_eq!(from_diagonal.get(0), Ok(2.0));
}

#[test]
fn singular_diagonal_solve_distinguishes_consistency() {
    let d = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![2.0, 0.0]));

    let consistent = Vector::Dense(DenseVector::from_slice(&[4.0, 0.0]));
    let solution = d.solve_vector(&consistent).unwrap();
    assert_eq!(solution.get(0), Ok(2.0));
    assert_eq!(solution.get(1), Ok(0.0));

    let inconsistent = Vector::Dense(DenseVector::from_slice(&[4.0, 3.0]));
    assert_eq!(
        d.solve_vector(&inconsistent),
        Err(MatrixError::SingularMatrix)
    );
}

#[test]
fn log_determinant_sign_is_carried_in_imaginary_part() {
    let odd_negatives = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![-2.0, 3.0]));
    let log_det = odd_negatives.log_determinant().unwrap();
    assert!((log_det.real - 6.0_f64.ln()).abs() < TOLERANCE);
    assert!((log_det.imaginary - core::f64::consts::PI).abs() < TOLERANCE);

    let even_negatives = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![-2.0, -3.0]));
    let log_det = even_negatives.log_determinant().unwrap();
    assert!((log_det.real - 6.0_f64.ln()).abs() < TOLERANCE);
    assert_eq!(log_det.imaginary, 0.0);

    // The dense elimination path agrees with the closed form
    let dense = Matrix::Dense(odd_negatives.to_dense().unwrap());
    let dense_log_det = dense.log_determinant().unwrap();
    assert!((dense_log_det.real - 6.0_f64.ln()).abs() < TOLERANCE);
    assert!((dense_log_det.imaginary - core::f64::consts::PI).abs() < TOLERANCE);
}

#[test]
fn diagonal_rejects_off_diagonal_writes_everywhere() {
    let mut matrix = MatrixFactory::Diagonal.create(3, 3).unwrap();
    assert_eq!(matrix.set(0, 2, 1.0), Err(MatrixError::InvalidAssignment));
    assert_eq!(matrix.set(2, 2, 5.0), Ok(()));

    // The same rule guards additive combines
    let mut spoiler = SparseMatrix::zeros(3, 3).unwrap();
    spoiler.set(0, 1, 1.0).unwrap();
    assert_eq!(
        matrix.plus_equals(&Matrix::Sparse(spoiler)),
        Err(MatrixError::InvalidAssignment)
    );
    // Receiver is untouched by the failed combine
    assert_eq!(matrix.get(2, 2), Ok(5.0));
}

#[test]
fn convert_vector_round_trips_all_representations() {
    let mut rng = StdRng::seed_from_u64(7);

    let mut dense = Matrix::Dense(random_dense(&mut rng, 3, 4));
    let flattened = dense.convert_to_vector();
    assert_eq!(flattened.dimensionality(), 12);
    let original = dense.clone();
    dense.convert_from_vector(&flattened).unwrap();
    assert!(dense.equals_with_tolerance(&original, TOLERANCE));

    let mut sparse = Matrix::Sparse(random_sparse(&mut rng, 4, 4, 6));
    let flattened = sparse.convert_to_vector();
    let original = sparse.clone();
    sparse.convert_from_vector(&flattened).unwrap();
    assert!(sparse.equals_with_tolerance(&original, TOLERANCE));

    let mut diagonal = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![1.5, 0.0, -2.5]));
    let flattened = diagonal.convert_to_vector();
    assert!(flattened.is_sparse());
    let original = diagonal.clone();
    diagonal.convert_from_vector(&flattened).unwrap();
    assert!(diagonal.equals_with_tolerance(&original, TOLERANCE));
}

#[test]
fn sparse_reads_are_identical_before_and_after_compression() {
    let mut sparse = SparseMatrix::zeros(3, 3).unwrap();
    sparse.set(0, 0, 1.0).unwrap();
    sparse.set(2, 1, -4.0).unwrap();
    sparse.set(0, 0, 2.5).unwrap();
    assert!(!sparse.is_compressed());

    let before: Vec<Vec<f64>> = (0..3)
        .map(|r| (0..3).map(|c| sparse.get(r, c).unwrap()).collect())
        .collect();
    sparse.compress();
    assert!(sparse.is_compressed());
    let after: Vec<Vec<f64>> = (0..3)
        .map(|r| (0..3).map(|c| sparse.get(r, c).unwrap()).collect())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn randomized_products_agree_across_representations() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let sparse = random_sparse(&mut rng, 5, 6, 12);
        let dense_copy = sparse.to_dense().unwrap();
        let other = random_dense(&mut rng, 6, 4);

        let from_sparse = Matrix::Sparse(sparse.clone())
            .times(&Matrix::Dense(other.clone()))
            .unwrap();
        let from_dense = Matrix::Dense(dense_copy)
            .times(&Matrix::Dense(other))
            .unwrap();
        assert!(from_sparse.equals_with_tolerance(&from_dense, TOLERANCE));

        // Sparse-by-sparse agrees with its densified counterpart too
        let rhs = random_sparse(&mut rng, 6, 3, 9);
        let sparse_product = Matrix::Sparse(sparse.clone())
            .times(&Matrix::Sparse(rhs.clone()))
            .unwrap();
        let dense_product = Matrix::Dense(sparse.to_dense().unwrap())
            .times(&Matrix::Dense(rhs.to_dense().unwrap()))
            .unwrap();
        assert!(sparse_product.equals_with_tolerance(&dense_product, TOLERANCE));
    }
}

#[test]
fn randomized_solve_reconstructs_rhs() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10 {
        // Diagonally dominant, so the system is comfortably non-singular
        let n = 5;
        let mut a = random_dense(&mut rng, n, n);
        for i in 0..n {
            let boosted = a.get(i, i).unwrap() + 10.0;
            a.set(i, i, boosted).unwrap();
        }
        let a = Matrix::Dense(a);
        let b = Vector::Dense(DenseVector::from_vec(
            (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect(),
        ));

        let x = a.solve_vector(&b).unwrap();
        let reconstructed = a.times_vector(&x).unwrap();
        assert!(reconstructed.equals_with_tolerance(&b, TOLERANCE));
    }
}

#[test]
fn randomized_rank_is_invariant_under_transpose() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..10 {
        let matrix = Matrix::Dense(random_dense(&mut rng, 4, 6));
        let rank = matrix.rank(1e-10).unwrap();
        assert_eq!(matrix.transpose().rank(1e-10).unwrap(), rank);
        assert!(rank <= 4);
    }
}

#[test]
fn randomized_diagonal_inverse_round_trip() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..10 {
        // Entries bounded away from zero so the inverse exists
        let entries: Vec<f64> = (0..6)
            .map(|_| {
                let magnitude = rng.gen_range(0.5..4.0);
                if rng.gen_bool(0.5) {
                    magnitude
                } else {
                    -magnitude
                }
            })
            .collect();
        let d = Matrix::Diagonal(DiagonalMatrix::from_diagonal(entries));
        let product = d.times(&d.inverse().unwrap()).unwrap();
        let identity = MatrixFactory::Diagonal.create_identity(6).unwrap();
        assert!(product.equals_with_tolerance(&identity, TOLERANCE));
    }
}

#[test]
fn pseudo_inverse_agrees_between_diagonal_and_dense() {
    let diagonal = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![4.0, 0.0, 0.5]));
    let dense = Matrix::Dense(diagonal.to_dense().unwrap());

    let from_diagonal = diagonal.pseudo_inverse(1e-10).unwrap();
    let from_dense = dense.pseudo_inverse(1e-10).unwrap();
    assert!(from_diagonal.equals_with_tolerance(&from_dense, 1e-6));

    // A * A+ * A = A holds even though A is singular
    let reconstructed = diagonal
        .times(&from_diagonal)
        .unwrap()
        .times(&diagonal)
        .unwrap();
    assert!(reconstructed.equals_with_tolerance(&diagonal, 1e-6));
}

#[test]
fn mixed_addition_matches_densified_addition() {
    let mut rng = StdRng::seed_from_u64(3);
    let dense = random_dense(&mut rng, 4, 4);
    let sparse = random_sparse(&mut rng, 4, 4, 7);

    let mut mixed = Matrix::Dense(dense.clone());
    mixed.plus_equals(&Matrix::Sparse(sparse.clone())).unwrap();

    let mut densified = Matrix::Dense(dense);
    densified
        .plus_equals(&Matrix::Dense(sparse.to_dense().unwrap()))
        .unwrap();

    assert!(mixed.equals_with_tolerance(&densified, TOLERANCE));
}

#[test]
fn negative_tolerance_is_rejected_uniformly() {
    let matrix = MatrixFactory::Dense.create_identity(2).unwrap();
    assert_eq!(matrix.rank(-1.0), Err(MatrixError::OutOfRange));
    assert_eq!(matrix.is_symmetric(f64::NAN), Err(MatrixError::OutOfRange));
    assert_eq!(
        matrix.pseudo_inverse(-0.5).err(),
        Some(MatrixError::OutOfRange)
    );
}

#[test]
fn factories_build_equivalent_values() {
    let mut rng = StdRng::seed_from_u64(11);
    let source = Matrix::Dense(random_dense(&mut rng, 3, 3));
    let sparse_copy = MatrixFactory::Sparse.copy_matrix(&source).unwrap();
    assert!(sparse_copy.is_sparse());
    assert!(sparse_copy.equals_with_tolerance(&source, TOLERANCE));

    let dense_vector = VectorFactory::Dense.create(4);
    let sparse_vector = VectorFactory::Sparse.copy_vector(&dense_vector).unwrap();
    assert_eq!(sparse_vector.entry_count(), 0);
    assert!(sparse_vector.equals_with_tolerance(&dense_vector, TOLERANCE));
}

#[test]
fn sparse_vector_products_stay_sparse() {
    let sparse = Matrix::Sparse(
        SparseMatrix::from_triplets(3, 3, &[(0, 0, 2.0), (1, 2, 3.0)]).unwrap(),
    );
    let v = Vector::Sparse(SparseVector::from_entries(3, &[(2, 4.0)]).unwrap());
    let product = sparse.times_vector(&v).unwrap();
    assert!(product.is_sparse());
    assert_eq!(product.get(1), Ok(12.0));
    assert_eq!(product.get(0), Ok(0.0));
}

#[cfg(feature = "serde")]
mod serde_round_trips {
    use super::*;

    #[test]
    fn matrix_serializes_through_json() {
        let original = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![1.0, -2.5, 0.0]));
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: Matrix = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.equals_with_tolerance(&original, 0.0));

        // Compressed form only: buffered edits use tuple keys, which JSON
        // maps cannot represent
        let sparse = SparseMatrix::from_triplets(2, 2, &[(0, 1, 3.5)]).unwrap();
        let original = Matrix::Sparse(sparse);
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: Matrix = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.equals_with_tolerance(&original, 0.0));
    }

    #[test]
    fn vector_serializes_through_json() {
        let original = Vector::Sparse(SparseVector::from_entries(4, &[(1, 2.0)]).unwrap());
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: Vector = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.equals_with_tolerance(&original, 0.0));
    }
}
