//! Every storage type in the registry has a Rust element type behind it: the eight primitive
//! integers for the fixed-width tags and `BigUint` for [`Dtype::Object`]. The [`Element`]
//! trait is the common surface the constructors are written against, so a constructor is
//! written once and instantiated per storage type.

use crate::fields::dtype::Dtype;
use num_bigint::{BigUint, ToBigUint};
use num_traits::{One, ToPrimitive, Zero};
use std::fmt::Debug;

/// An integer type that can hold field element encodings.
pub trait Element: Clone + Debug + PartialEq + Zero + One + Send + Sync + 'static {
    /// The storage-type tag this element type implements.
    const DTYPE: Dtype;

    /// Converts from an arbitrary-precision value, `None` when it does not fit.
    fn from_value(value: &BigUint) -> Option<Self>;

    /// Converts from a machine word, `None` when it does not fit.
    fn from_word(value: u64) -> Option<Self>;

    /// Widens to an arbitrary-precision value, `None` for negative integers.
    fn to_value(&self) -> Option<BigUint>;

    /// Narrows to a machine word, `None` for negative or oversized integers.
    fn to_word(&self) -> Option<u64>;
}

macro_rules! impl_fixed_width_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: Dtype = Dtype::$dtype;

                fn from_value(value: &BigUint) -> Option<Self> {
                    ToPrimitive::to_u64(value).and_then(Self::from_word)
                }
                fn from_word(value: u64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
                fn to_value(&self) -> Option<BigUint> {
                    ToBigUint::to_biguint(self)
                }
                fn to_word(&self) -> Option<u64> {
                    u64::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_fixed_width_element!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
);

impl Element for BigUint {
    const DTYPE: Dtype = Dtype::Object;

    fn from_value(value: &BigUint) -> Option<Self> {
        Some(value.clone())
    }
    fn from_word(value: u64) -> Option<Self> {
        Some(BigUint::from(value))
    }
    fn to_value(&self) -> Option<BigUint> {
        Some(self.clone())
    }
    fn to_word(&self) -> Option<u64> {
        ToPrimitive::to_u64(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_tags() {
        assert_eq!(u8::DTYPE, Dtype::U8);
        assert_eq!(i16::DTYPE, Dtype::I16);
        assert_eq!(u64::DTYPE, Dtype::U64);
        assert_eq!(BigUint::DTYPE, Dtype::Object);
    }

    #[test]
    fn test_narrowing_respects_capacity() {
        assert_eq!(u8::from_word(255), Some(255u8));
        assert_eq!(u8::from_word(256), None);
        assert_eq!(i8::from_word(127), Some(127i8));
        assert_eq!(i8::from_word(128), None);
        assert_eq!(i64::from_word(u64::MAX), None);
        let big = BigUint::from(u64::MAX) + 1u32;
        assert_eq!(u64::from_value(&big), None);
        assert_eq!(BigUint::from_value(&big), Some(big.clone()));
        assert_eq!(big.to_word(), None);
    }

    #[test]
    fn test_negative_values_do_not_widen() {
        assert_eq!((-1i32).to_value(), None);
        assert_eq!((-1i64).to_word(), None);
        assert_eq!(7i8.to_value(), Some(BigUint::from(7u32)));
        assert_eq!(7i8.to_word(), Some(7));
    }
}
