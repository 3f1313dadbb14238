//! The codec between an element of GF(p^m) and its coefficient vector over GF(p).
//!
//! An element is stored as a single integer. Reading that integer in base `p`, most
//! significant digit first, gives the `m` coefficients of the element's polynomial
//! representation:
//!
//! ```text
//! value = v[0] p^(m-1) + v[1] p^(m-2) + ... + v[m-1]
//! ```
//!
//! Every vector in `{0, ..., p-1}^m` maps to exactly one value in `{0, ..., p^m - 1}` and
//! back, and for prime fields the codec is the identity.

use crate::arrays::array::FieldArray;
use crate::arrays::element::Element;
use crate::arrays::storage::{for_each_storage, Storage, Values};
use crate::error::{Error, Result};
use crate::fields::dtype::Dtype;
use crate::fields::field::GaloisField;
use ndarray::ArrayViewD;
use num_bigint::BigUint;
use num_traits::Zero;

/// Folds a most-significant-first coefficient vector into its integer encoding.
pub fn coefficients_to_integer(characteristic: &BigUint, coefficients: &[BigUint]) -> BigUint {
    coefficients
        .iter()
        .fold(BigUint::zero(), |acc, c| acc * characteristic + c)
}

/// Expands an integer encoding into its `degree` coefficients, most significant first. Values
/// at or above `p^degree` lose their excess digits, callers pass field elements only.
pub fn integer_to_coefficients(
    characteristic: &BigUint,
    degree: u32,
    value: &BigUint,
) -> Vec<BigUint> {
    let mut coefficients = vec![BigUint::zero(); degree as usize];
    let mut rest = value.clone();
    for slot in coefficients.iter_mut().rev() {
        *slot = &rest % characteristic;
        rest /= characteristic;
    }
    coefficients
}

/// Decodes coefficient vectors into elements of `field`.
///
/// The innermost dimension of `vector` must equal the degree of `field` and every entry must
/// lie in `[0, p)`; the remaining dimensions become the shape of the result. Both conditions
/// are checked over the whole input before any storage is allocated.
pub(crate) fn decode<T: Element>(
    field: &GaloisField,
    vector: ArrayViewD<'_, T>,
    dtype: Dtype,
) -> Result<FieldArray> {
    let degree = field.degree() as usize;
    let Some((&innermost, leading)) = vector.shape().split_last() else {
        return Err(Error::MalformedVector(format!(
            "a scalar cannot hold the {degree} coefficients of an element of {field}"
        )));
    };
    if innermost != degree {
        return Err(Error::MalformedVector(format!(
            "innermost dimension is {innermost} but {field} has degree {degree}"
        )));
    }

    let p = field.characteristic();
    let coefficients = vector
        .iter()
        .map(|c| match c.to_value() {
            Some(v) if v < *p => Ok(v),
            _ => Err(Error::MalformedVector(format!(
                "coefficient {c:?} is not an element of GF({p})"
            ))),
        })
        .collect::<Result<Vec<BigUint>>>()?;

    let values = coefficients
        .chunks(degree)
        .map(|chunk| coefficients_to_integer(p, chunk))
        .collect();
    tracing::debug!(%field, ?leading, %dtype, "vector::decode");
    let storage = Storage::build(dtype, leading, &Values::Big(values))?;
    Ok(FieldArray::from_parts(field.clone(), storage))
}

/// Decodes a prime-subfield array whose innermost dimension holds coefficient vectors.
pub(crate) fn decode_array(
    field: &GaloisField,
    vector: &FieldArray,
    dtype: Dtype,
) -> Result<FieldArray> {
    field.prime_subfield().ensure_same(vector.field())?;
    for_each_storage!(vector.storage(), array => decode(field, array.view(), dtype))
}

/// Encodes every element of `array` as its coefficient vector, appending a dimension of
/// length `m`. The result lives in the prime subfield and is stored as `dtype`.
pub(crate) fn encode(array: &FieldArray, dtype: Dtype) -> Result<FieldArray> {
    let field = array.field();
    let subfield = field.prime_subfield();
    let p = field.characteristic();
    let mut shape = array.shape().to_vec();
    shape.push(field.degree() as usize);

    let coefficients = array
        .to_biguint_vec()
        .iter()
        .flat_map(|v| integer_to_coefficients(p, field.degree(), v))
        .collect();
    tracing::debug!(%field, ?shape, %dtype, "vector::encode");
    let storage = Storage::build(dtype, &shape, &Values::Big(coefficients))?;
    Ok(FieldArray::from_parts(subfield, storage))
}
