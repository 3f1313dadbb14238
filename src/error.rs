use crate::fields::dtype::Dtype;
use num_bigint::BigUint;
use thiserror::Error;

/// Everything that can go wrong while building a field descriptor or a field array.
///
/// Errors are raised at the boundary of the call that would otherwise produce an
/// inconsistent array, so a caller never observes a partially constructed container.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid dtype {dtype} for field of order {order}, valid dtypes are {allowed:?}")]
    InvalidDtype {
        dtype: Dtype,
        order: BigUint,
        allowed: Vec<Dtype>,
    },

    #[error("invalid seed: {0}, expected a non-negative integer or nothing")]
    InvalidSeed(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("malformed coefficient vector: {0}")]
    MalformedVector(String),

    #[error("invalid field element: {0}")]
    InvalidValue(String),

    #[error("field mismatch: expected {expected}, found {found}")]
    FieldMismatch { expected: String, found: String },

    #[error("invalid field parameters: {0}")]
    InvalidField(String),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
