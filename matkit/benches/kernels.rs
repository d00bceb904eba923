//! Benchmarks for the hot kernel paths: structure-aware products, sparse
//! compression, and dense elimination.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matkit::{DenseMatrix, DenseVector, DiagonalMatrix, MatrixBase, SparseMatrix};

fn build_dense(n: usize) -> DenseMatrix {
    let values = (0..n * n).map(|i| ((i % 17) as f64) - 8.0).collect();
    DenseMatrix::from_row_major(n, n, values).unwrap()
}

fn build_sparse(n: usize, stride: usize) -> SparseMatrix {
    let mut triples = Vec::new();
    for row in 0..n {
        for column in (row % stride..n).step_by(stride) {
            triples.push((row, column, 1.0 + (row + column) as f64 / n as f64));
        }
    }
    SparseMatrix::from_triplets(n, n, &triples).unwrap()
}

fn bench_diagonal_times_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagonal_times_dense");
    for n in [64, 256] {
        let diagonal = DiagonalMatrix::from_diagonal((0..n).map(|i| i as f64 + 1.0).collect());
        let dense = build_dense(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| diagonal.times_dense(black_box(&dense)).unwrap())
        });
    }
    group.finish();
}

fn bench_sparse_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_compress");
    for n in [64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut matrix = SparseMatrix::zeros(n, n).unwrap();
                for i in 0..n {
                    matrix.set(i, (i * 7) % n, i as f64).unwrap();
                    matrix.set((i * 3) % n, i, -(i as f64)).unwrap();
                }
                matrix.compress();
                black_box(matrix)
            })
        });
    }
    group.finish();
}

fn bench_sparse_times_dense_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_times_dense_vector");
    for n in [64, 256] {
        let sparse = build_sparse(n, 8);
        let vector = DenseVector::from_vec((0..n).map(|i| (i as f64).sin()).collect());
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sparse.times_dense_vector(black_box(&vector)).unwrap())
        });
    }
    group.finish();
}

fn bench_dense_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_solve");
    for n in [32, 64] {
        // Diagonally dominant so elimination never pivots on zero
        let mut matrix = build_dense(n);
        for i in 0..n {
            let boosted = matrix.get(i, i).unwrap() + 32.0;
            matrix.set(i, i, boosted).unwrap();
        }
        let rhs = DenseVector::from_vec(vec![1.0; n]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| matrix.solve_vector(black_box(&rhs)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_diagonal_times_dense,
    bench_sparse_compression,
    bench_sparse_times_dense_vector,
    bench_dense_solve
);
criterion_main!(benches);
