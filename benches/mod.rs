use criterion::{criterion_group, criterion_main};

mod array;
use array::constructors::*;
use array::vector::*;

criterion_group!(
    constructor_benches,
    test_zeros,
    test_ones,
    test_identity,
    test_random_word_sized,
    test_random_arbitrary_precision
);
criterion_group!(vector_benches, test_vector_decode, test_vector_encode);

criterion_main!(constructor_benches, vector_benches);
