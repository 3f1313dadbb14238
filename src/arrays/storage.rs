//! The typed backing store of a field array: one `ndarray` array per storage type, wrapped
//! in a single enum so a field array can carry whichever storage its dtype selects.

use crate::arrays::element::Element;
use crate::error::{Error, Result};
use crate::fields::dtype::Dtype;
use crate::utils::element_count;
use ndarray::{ArrayD, IxDyn};
use num_bigint::BigUint;

/// Shaped element storage, one variant per [`Dtype`].
#[derive(Clone, Debug, PartialEq)]
pub enum Storage {
    U8(ArrayD<u8>),
    I8(ArrayD<i8>),
    U16(ArrayD<u16>),
    I16(ArrayD<i16>),
    U32(ArrayD<u32>),
    I32(ArrayD<i32>),
    U64(ArrayD<u64>),
    I64(ArrayD<i64>),
    Object(ArrayD<BigUint>),
}

/// Runs `$body` with `$array` bound to whichever typed array `$storage` holds.
macro_rules! for_each_storage {
    ($storage:expr, $array:ident => $body:expr) => {
        match $storage {
            $crate::arrays::storage::Storage::U8($array) => $body,
            $crate::arrays::storage::Storage::I8($array) => $body,
            $crate::arrays::storage::Storage::U16($array) => $body,
            $crate::arrays::storage::Storage::I16($array) => $body,
            $crate::arrays::storage::Storage::U32($array) => $body,
            $crate::arrays::storage::Storage::I32($array) => $body,
            $crate::arrays::storage::Storage::U64($array) => $body,
            $crate::arrays::storage::Storage::I64($array) => $body,
            $crate::arrays::storage::Storage::Object($array) => $body,
        }
    };
}
pub(crate) use for_each_storage;

/// Produces the contents of a new array for any element type. Constructors implement this
/// once and [`Storage::build`] instantiates it for the requested dtype.
pub(crate) trait Fill {
    fn fill<T: Element>(&self, shape: &[usize]) -> Result<ArrayD<T>>;
}

/// Element values computed ahead of storage selection, in row-major order.
#[derive(Clone, Debug)]
pub(crate) enum Values {
    /// Values of fields whose elements fit a machine word.
    Words(Vec<u64>),
    Big(Vec<BigUint>),
}

impl Values {
    pub(crate) fn len(&self) -> usize {
        match self {
            Values::Words(words) => words.len(),
            Values::Big(values) => values.len(),
        }
    }
}

impl Fill for Values {
    fn fill<T: Element>(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        if self.len() != element_count(shape)? {
            return Err(Error::InvalidShape(format!(
                "{} values cannot fill shape {shape:?}",
                self.len()
            )));
        }
        let elements = match self {
            Values::Words(words) => words
                .iter()
                .map(|&w| T::from_word(w).ok_or_else(|| overflow::<T>(&BigUint::from(w))))
                .collect::<Result<Vec<T>>>()?,
            Values::Big(values) => values
                .iter()
                .map(|v| T::from_value(v).ok_or_else(|| overflow::<T>(v)))
                .collect::<Result<Vec<T>>>()?,
        };
        ArrayD::from_shape_vec(IxDyn(shape), elements)
            .map_err(|e| Error::InvalidShape(format!("{shape:?}: {e}")))
    }
}

fn overflow<T: Element>(value: &BigUint) -> Error {
    Error::InvalidValue(format!("{value} does not fit in {}", T::DTYPE))
}

impl Storage {
    /// Instantiates `filler` for the element type behind `dtype`.
    pub(crate) fn build<F: Fill>(dtype: Dtype, shape: &[usize], filler: &F) -> Result<Self> {
        Ok(match dtype {
            Dtype::U8 => Storage::U8(filler.fill(shape)?),
            Dtype::I8 => Storage::I8(filler.fill(shape)?),
            Dtype::U16 => Storage::U16(filler.fill(shape)?),
            Dtype::I16 => Storage::I16(filler.fill(shape)?),
            Dtype::U32 => Storage::U32(filler.fill(shape)?),
            Dtype::I32 => Storage::I32(filler.fill(shape)?),
            Dtype::U64 => Storage::U64(filler.fill(shape)?),
            Dtype::I64 => Storage::I64(filler.fill(shape)?),
            Dtype::Object => Storage::Object(filler.fill(shape)?),
        })
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            Storage::U8(_) => Dtype::U8,
            Storage::I8(_) => Dtype::I8,
            Storage::U16(_) => Dtype::U16,
            Storage::I16(_) => Dtype::I16,
            Storage::U32(_) => Dtype::U32,
            Storage::I32(_) => Dtype::I32,
            Storage::U64(_) => Dtype::U64,
            Storage::I64(_) => Dtype::I64,
            Storage::Object(_) => Dtype::Object,
        }
    }

    pub fn shape(&self) -> &[usize] {
        for_each_storage!(self, array => array.shape())
    }

    pub fn len(&self) -> usize {
        for_each_storage!(self, array => array.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: &[usize]) -> Option<BigUint> {
        for_each_storage!(self, array => array.get(index).and_then(Element::to_value))
    }

    /// Every element widened to `BigUint`, in row-major order. Field arrays only ever hold
    /// non-negative values, so nothing is dropped for them.
    pub fn to_values(&self) -> Vec<BigUint> {
        for_each_storage!(self, array => array.iter().filter_map(Element::to_value).collect())
    }

    /// Every element as a machine word, or `None` if any of them does not fit one.
    pub(crate) fn to_words(&self) -> Option<Vec<u64>> {
        for_each_storage!(self, array => array.iter().map(Element::to_word).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_selects_variant() {
        let values = Values::Words(vec![0, 1, 2, 3, 4, 5]);
        for dtype in Dtype::ALL {
            let storage = Storage::build(dtype, &[2, 3], &values).expect("build storage");
            assert_eq!(storage.dtype(), dtype);
            assert_eq!(storage.shape(), &[2, 3]);
            assert_eq!(storage.len(), 6);
            assert_eq!(storage.get(&[1, 2]), Some(BigUint::from(5u32)));
            assert_eq!(storage.get(&[2, 0]), None, "Out of bounds index returned a value");
            assert_eq!(storage.to_words(), Some(vec![0, 1, 2, 3, 4, 5]));
        }
    }

    #[test]
    fn test_scalar_storage() {
        let storage =
            Storage::build(Dtype::U16, &[], &Values::Words(vec![9])).expect("build scalar");
        assert_eq!(storage.shape(), &[] as &[usize]);
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(&[]), Some(BigUint::from(9u32)));
    }

    #[test]
    fn test_overflowing_values_are_rejected() {
        let values = Values::Words(vec![1, 300]);
        assert!(matches!(
            Storage::build(Dtype::U8, &[2], &values),
            Err(Error::InvalidValue(_))
        ));
        let big = Values::Big(vec![BigUint::from(u64::MAX) + 1u32]);
        assert!(Storage::build(Dtype::U64, &[1], &big).is_err());
        let storage = Storage::build(Dtype::Object, &[1], &big).expect("object storage");
        assert_eq!(storage.to_words(), None);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let values = Values::Words(vec![1, 2, 3]);
        assert_eq!(values.len(), 3);
        assert!(matches!(
            Storage::build(Dtype::U8, &[2, 2], &values),
            Err(Error::InvalidShape(_))
        ));
    }
}
