//! The structured constructors of field arrays: zero-filled, one-filled, identity matrix,
//! uniformly random, and decoded from coefficient vectors.
//!
//! Every constructor resolves its requested dtype against the field before it computes a
//! single element, so an invalid dtype fails fast with the same [`Error::InvalidDtype`]
//! whichever constructor was called. Shapes are row-major, and the empty shape `&[]` is a
//! scalar.
//!
//! [`Error::InvalidDtype`]: crate::Error::InvalidDtype

use crate::arrays::array::FieldArray;
use crate::arrays::element::Element;
use crate::arrays::random::{FieldRng, Seed};
use crate::arrays::storage::{Fill, Storage};
use crate::arrays::vector;
use crate::error::Result;
use crate::fields::dtype::Dtype;
use crate::fields::field::GaloisField;
use crate::utils::element_count;
use ndarray::{Array2, ArrayD, ArrayViewD, IxDyn};

/// Fills every element with the additive or multiplicative identity.
enum Constant {
    Zero,
    One,
}

impl Fill for Constant {
    fn fill<T: Element>(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        let value = match self {
            Constant::Zero => T::zero(),
            Constant::One => T::one(),
        };
        Ok(ArrayD::from_elem(IxDyn(shape), value))
    }
}

/// The `n x n` identity matrix; the shape handed to `fill` is always `[n, n]`.
struct Identity(usize);

impl Fill for Identity {
    fn fill<T: Element>(&self, _shape: &[usize]) -> Result<ArrayD<T>> {
        Ok(Array2::<T>::eye(self.0).into_dyn())
    }
}

impl FieldArray {
    /// An array of the given shape with every element equal to 0.
    ///
    /// # Examples
    /// ```
    /// use gf_arrays::{Dtype, FieldArray, GaloisField};
    ///
    /// let gf256 = GaloisField::new(2u32, 8, None).unwrap();
    /// let a = FieldArray::zeros(&gf256, &[4, 4], None).unwrap();
    /// assert_eq!(a.shape(), &[4, 4]);
    /// assert_eq!(a.dtype(), Dtype::U16);
    /// assert!(FieldArray::zeros(&gf256, &[4], Some(Dtype::U8)).is_err());
    /// ```
    pub fn zeros(field: &GaloisField, shape: &[usize], dtype: Option<Dtype>) -> Result<Self> {
        Self::constant(field, shape, dtype, Constant::Zero)
    }

    /// An array of the given shape with every element equal to 1.
    pub fn ones(field: &GaloisField, shape: &[usize], dtype: Option<Dtype>) -> Result<Self> {
        Self::constant(field, shape, dtype, Constant::One)
    }

    fn constant(
        field: &GaloisField,
        shape: &[usize],
        dtype: Option<Dtype>,
        constant: Constant,
    ) -> Result<Self> {
        let dtype = field.validate_dtype(dtype)?;
        element_count(shape)?;
        tracing::debug!(%field, ?shape, %dtype, "FieldArray::constant");
        let storage = Storage::build(dtype, shape, &constant)?;
        Ok(Self::from_parts(field.clone(), storage))
    }

    /// The `size x size` identity matrix: ones on the diagonal, zeros elsewhere.
    pub fn identity(field: &GaloisField, size: usize, dtype: Option<Dtype>) -> Result<Self> {
        let dtype = field.validate_dtype(dtype)?;
        let shape = [size, size];
        element_count(&shape)?;
        tracing::debug!(%field, size, %dtype, "FieldArray::identity");
        let storage = Storage::build(dtype, &shape, &Identity(size))?;
        Ok(Self::from_parts(field.clone(), storage))
    }

    /// An array of independent, uniformly distributed elements.
    ///
    /// With a seed the output depends on nothing but `(field.order(), shape, seed)` and is
    /// identical across runs and platforms; without one, every call draws fresh entropy. See
    /// the `random` module for the exact generator.
    ///
    /// # Examples
    /// ```
    /// use gf_arrays::{FieldArray, GaloisField, Seed};
    ///
    /// let gf7 = GaloisField::prime(7u32).unwrap();
    /// let a = FieldArray::random(&gf7, &[4], None, Some(Seed::new(42))).unwrap();
    /// let b = FieldArray::random(&gf7, &[4], None, Some(Seed::new(42))).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn random(
        field: &GaloisField,
        shape: &[usize],
        dtype: Option<Dtype>,
        seed: Option<Seed>,
    ) -> Result<Self> {
        let dtype = field.validate_dtype(dtype)?;
        let count = element_count(shape)?;
        tracing::debug!(%field, ?shape, %dtype, ?seed, "FieldArray::random");
        let values = FieldRng::new(seed).draw(field.order(), count);
        let storage = Storage::build(dtype, shape, &values)?;
        Ok(Self::from_parts(field.clone(), storage))
    }

    /// Decodes coefficient vectors over the prime subfield into elements of `field`.
    ///
    /// The innermost dimension of `vector` holds the `m` coefficients of one element, most
    /// significant first, and the leading dimensions become the shape of the result.
    ///
    /// # Returns
    /// * `Err(Error::InvalidDtype)` - `dtype` is not valid for `field`
    /// * `Err(Error::MalformedVector)` - the innermost dimension is not `m`, or a coefficient
    ///   lies outside `[0, p)`
    ///
    /// # Examples
    /// ```
    /// use gf_arrays::{FieldArray, GaloisField};
    /// use ndarray::array;
    /// use num_bigint::BigUint;
    ///
    /// let gf8 = GaloisField::new(2u32, 3, None).unwrap();
    /// let v = array![[1u8, 0, 1], [0, 1, 1]].into_dyn();
    /// let a = FieldArray::vector(&gf8, v.view(), None).unwrap();
    /// assert_eq!(a.shape(), &[2]);
    /// assert_eq!(a.to_biguint_vec(), vec![BigUint::from(5u32), BigUint::from(3u32)]);
    /// ```
    pub fn vector<T: Element>(
        field: &GaloisField,
        vector: ArrayViewD<'_, T>,
        dtype: Option<Dtype>,
    ) -> Result<Self> {
        let dtype = field.validate_dtype(dtype)?;
        vector::decode(field, vector, dtype)
    }

    /// Like [`FieldArray::vector`], for coefficients that are already an array over the prime
    /// subfield of `field`. An array over any other field is a [`Error::FieldMismatch`].
    ///
    /// [`Error::FieldMismatch`]: crate::Error::FieldMismatch
    pub fn from_vector(
        field: &GaloisField,
        vector: &FieldArray,
        dtype: Option<Dtype>,
    ) -> Result<Self> {
        let dtype = field.validate_dtype(dtype)?;
        vector::decode_array(field, vector, dtype)
    }

    /// Encodes each element as its coefficient vector over the prime subfield, the inverse of
    /// [`FieldArray::vector`]. The result has one more dimension, of length `m`, and is stored
    /// as `dtype`, validated against the prime subfield.
    pub fn to_vector(&self, dtype: Option<Dtype>) -> Result<FieldArray> {
        let dtype = self.field().prime_subfield().validate_dtype(dtype)?;
        vector::encode(self, dtype)
    }
}
