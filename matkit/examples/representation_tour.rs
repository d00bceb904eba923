//! Tour of the three matrix representations and their mixed arithmetic

use matkit::{
    DenseMatrix, DenseVector, DiagonalMatrix, Matrix, MatrixBase, SparseMatrix, Vector,
    VectorBase,
};
use std::time::Instant;

fn main() -> matkit::Result<()> {
    println!("Building one matrix in three representations...");

    let dense = Matrix::Dense(DenseMatrix::from_row_major(
        3,
        3,
        vec![2.0, 0.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0, 0.5],
    )?);
    let sparse = Matrix::Sparse(SparseMatrix::from_triplets(
        3,
        3,
        &[(0, 0, 2.0), (1, 1, -3.0), (2, 2, 0.5)],
    )?);
    let diagonal = Matrix::Diagonal(DiagonalMatrix::from_diagonal(vec![2.0, -3.0, 0.5]));

    println!(
        "   dense stores {} values, sparse stores {}, diagonal stores {}",
        dense.entry_count(),
        sparse.entry_count(),
        diagonal.entry_count()
    );
    println!(
        "   all three compare equal: {}",
        dense.equals_with_tolerance(&sparse, 1e-12)
            && sparse.equals_with_tolerance(&diagonal, 1e-12)
    );

    // Structure-aware products: the diagonal path only touches n values
    println!("\nTiming the product against a dense operand:");
    let operand = Matrix::Dense(DenseMatrix::from_row_major(
        3,
        3,
        (0..9).map(|i| i as f64).collect(),
    )?);

    let start = Instant::now();
    let via_dense = dense.times(&operand)?;
    println!("   dense x dense    in {:?}", start.elapsed());

    let start = Instant::now();
    let via_diagonal = diagonal.times(&operand)?;
    println!("   diagonal x dense in {:?}", start.elapsed());
    println!(
        "   products agree: {}",
        via_dense.equals_with_tolerance(&via_diagonal, 1e-12)
    );

    // Solving: the diagonal solve is O(n) and preserves sparsity
    println!("\nSolving A * x = b:");
    let b = Vector::Dense(DenseVector::from_slice(&[4.0, -9.0, 1.0]));
    let x = diagonal.solve_vector(&b)?;
    println!(
        "   x = [{}, {}, {}]",
        x.get(0)?,
        x.get(1)?,
        x.get(2)?
    );

    // Inverses stay in the cheapest representation that can hold them
    let inverse = diagonal.inverse()?;
    println!(
        "   inverse is diagonal: {}",
        matches!(inverse, Matrix::Diagonal(_))
    );

    // Log-determinant carries the sign in the imaginary part
    let log_det = diagonal.log_determinant()?;
    println!(
        "\nlog|det A| = {:.4}, negative determinant: {}",
        log_det.real,
        log_det.imaginary != 0.0
    );

    // The diagonal type refuses to become non-diagonal
    let mut guarded = diagonal.clone();
    match guarded.set(0, 2, 1.0) {
        Err(error) => println!("Off-diagonal write rejected: {error}"),
        Ok(()) => unreachable!(),
    }

    Ok(())
}
