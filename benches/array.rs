#![allow(dead_code)]
use criterion::{black_box, Criterion};
use gf_arrays::{Dtype, FieldArray, GaloisField, Seed};
use ndarray::{ArrayD, IxDyn};

fn gf(p: u32, m: u32) -> GaloisField {
    GaloisField::new(p, m, None).expect("valid field")
}

pub mod constructors {
    use super::*;
    const SHAPE: [usize; 2] = [64, 64];

    pub fn test_zeros(c: &mut Criterion) {
        let field = gf(2, 8);
        c.bench_function("test_zeros", |b| {
            b.iter(|| FieldArray::zeros(black_box(&field), black_box(&SHAPE), None))
        });
    }
    pub fn test_ones(c: &mut Criterion) {
        let field = gf(2, 8);
        c.bench_function("test_ones", |b| {
            b.iter(|| FieldArray::ones(black_box(&field), black_box(&SHAPE), Some(Dtype::U64)))
        });
    }
    pub fn test_identity(c: &mut Criterion) {
        let field = gf(3191, 1);
        c.bench_function("test_identity", |b| {
            b.iter(|| FieldArray::identity(black_box(&field), black_box(64), None))
        });
    }
    pub fn test_random_word_sized(c: &mut Criterion) {
        let field = gf(2147483647, 1);
        c.bench_function("test_random_word_sized", |b| {
            b.iter(|| FieldArray::random(&field, black_box(&SHAPE), None, Some(Seed::new(42))))
        });
    }
    pub fn test_random_arbitrary_precision(c: &mut Criterion) {
        let field = gf(2, 100);
        c.bench_function("test_random_arbitrary_precision", |b| {
            b.iter(|| FieldArray::random(&field, black_box(&SHAPE), None, Some(Seed::new(42))))
        });
    }
}

pub mod vector {
    use super::*;

    pub fn test_vector_decode(c: &mut Criterion) {
        let field = gf(109987, 4);
        let coefficients = ArrayD::from_shape_fn(IxDyn(&[256, 4]), |ix| (ix[0] * 4 + ix[1]) as u64);
        c.bench_function("test_vector_decode", |b| {
            b.iter(|| FieldArray::vector(&field, black_box(coefficients.view()), None))
        });
    }
    pub fn test_vector_encode(c: &mut Criterion) {
        let field = gf(109987, 4);
        let a = FieldArray::random(&field, &[256], None, Some(Seed::new(7))).expect("random");
        c.bench_function("test_vector_encode", |b| {
            b.iter(|| black_box(&a).to_vector(None))
        });
    }
}
