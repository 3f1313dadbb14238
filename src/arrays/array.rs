//! The field array: a shaped, homogeneous container of field elements that is tagged with
//! exactly one field for its whole lifetime. Arrays are never re-tagged or re-typed in place;
//! [`FieldArray::astype`] and [`FieldArray::from_array`] are explicit conversions that build a
//! new container and check the element invariant on the way in.

use crate::arrays::element::Element;
use crate::arrays::storage::{Storage, Values};
use crate::error::{Error, Result};
use crate::fields::dtype::Dtype;
use crate::fields::field::GaloisField;
use ndarray::ArrayViewD;
use num_bigint::BigUint;
use std::fmt;

/// A shaped array of elements of one Galois field.
///
/// Every stored value `v` satisfies `0 <= v < order`, and the storage type is always one of
/// the field's [`GaloisField::dtypes`].
#[derive(Clone, Debug)]
pub struct FieldArray {
    field: GaloisField,
    storage: Storage,
}

impl FieldArray {
    /// Pairs a field with storage whose values and dtype have already been checked.
    pub(crate) fn from_parts(field: GaloisField, storage: Storage) -> Self {
        debug_assert!(field.is_valid_dtype(storage.dtype()));
        Self { field, storage }
    }

    /// Builds an array from caller integers, checking each one is an element of `field`.
    ///
    /// # Returns
    /// * `Err(Error::InvalidDtype)` - `dtype` is not valid for `field`
    /// * `Err(Error::InvalidValue)` - some value is negative or at least the field order
    ///
    /// # Examples
    /// ```
    /// use gf_arrays::{Dtype, FieldArray, GaloisField};
    /// use ndarray::array;
    ///
    /// let gf7 = GaloisField::prime(7u32).unwrap();
    /// let a = FieldArray::from_array(&gf7, array![[1i64, 2], [3, 6]].into_dyn().view(), None).unwrap();
    /// assert_eq!(a.dtype(), Dtype::U8);
    /// assert!(FieldArray::from_array(&gf7, array![7i64].into_dyn().view(), None).is_err());
    /// ```
    pub fn from_array<T: Element>(
        field: &GaloisField,
        values: ArrayViewD<'_, T>,
        dtype: Option<Dtype>,
    ) -> Result<Self> {
        let dtype = field.validate_dtype(dtype)?;
        let elements = values
            .iter()
            .map(|v| match v.to_value() {
                Some(value) if field.is_element(&value) => Ok(value),
                _ => Err(Error::InvalidValue(format!(
                    "{v:?} is not an element of {field}"
                ))),
            })
            .collect::<Result<Vec<BigUint>>>()?;
        let storage = Storage::build(dtype, values.shape(), &Values::Big(elements))?;
        Ok(Self::from_parts(field.clone(), storage))
    }

    /// Copies the array into a new container stored as `dtype`.
    pub fn astype(&self, dtype: Dtype) -> Result<Self> {
        let dtype = self.field.validate_dtype(Some(dtype))?;
        let values = match self.storage.to_words() {
            Some(words) => Values::Words(words),
            None => Values::Big(self.storage.to_values()),
        };
        let storage = Storage::build(dtype, self.shape(), &values)?;
        Ok(Self::from_parts(self.field.clone(), storage))
    }

    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    pub fn dtype(&self) -> Dtype {
        self.storage.dtype()
    }

    pub fn shape(&self) -> &[usize] {
        self.storage.shape()
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements; 1 for a scalar.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn into_storage(self) -> Storage {
        self.storage
    }

    /// The element at `index`, or `None` when the index is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<BigUint> {
        self.storage.get(index)
    }

    /// All elements in row-major order.
    pub fn to_biguint_vec(&self) -> Vec<BigUint> {
        self.storage.to_values()
    }

    /// Fails with [`Error::FieldMismatch`] unless both arrays are over the same field. Arrays
    /// over distinct but equal descriptors are compatible.
    pub fn ensure_same_field(&self, other: &FieldArray) -> Result<()> {
        self.field.ensure_same(&other.field)
    }
}

/// Arrays are equal when they are over the same field, have the same shape and hold the same
/// values, whatever storage type each of them uses.
impl PartialEq for FieldArray {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.shape() == other.shape()
            && (self.storage == other.storage || self.to_biguint_vec() == other.to_biguint_vec())
    }
}

impl fmt::Display for FieldArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self
            .to_biguint_vec()
            .iter()
            .map(|v| v.to_string())
            .collect();
        write!(
            f,
            "{}([{}], shape={:?}, dtype={})",
            self.field,
            values.join(", "),
            self.shape(),
            self.dtype()
        )
    }
}
