//! This module contains the storage-type registry. Every field array keeps its elements in
//! exactly one integer representation, selected from a fixed, enumerable set of tags: the
//! eight fixed-width machine integers and an arbitrary-precision fallback. Which of those tags
//! a field may use is decided once, from the order of the field, by [`resolve_dtypes`], and the
//! result is cached on the field descriptor.
//!
//! The rule for a fixed-width type is deliberately conservative. The type must be able to hold
//! every element in `[0, q)`, and also the largest intermediate the arithmetic engine produces
//! before reduction, which for multiplication is `(q - 1)^2`. The second condition implies the
//! first, so only it is checked.

use crate::error::Error;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A storage-type tag.
///
/// The declaration order is the capacity order: bit width ascending, unsigned before signed at
/// equal width, and the unbounded [`Dtype::Object`] last. `Ord` follows the same order, so a
/// sorted set of tags is also sorted by capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    /// Arbitrary-precision elements, backed by `num_bigint::BigUint`.
    Object,
}

impl Dtype {
    /// Every tag in the registry, in ascending capacity order.
    pub const ALL: [Dtype; 9] = [
        Dtype::U8,
        Dtype::I8,
        Dtype::U16,
        Dtype::I16,
        Dtype::U32,
        Dtype::I32,
        Dtype::U64,
        Dtype::I64,
        Dtype::Object,
    ];

    /// The fixed-width subset of [`Dtype::ALL`].
    pub const FIXED_WIDTH: [Dtype; 8] = [
        Dtype::U8,
        Dtype::I8,
        Dtype::U16,
        Dtype::I16,
        Dtype::U32,
        Dtype::I32,
        Dtype::U64,
        Dtype::I64,
    ];

    /// Width in bits, or `None` for the arbitrary-precision tag.
    pub const fn bits(&self) -> Option<u32> {
        match self {
            Dtype::U8 | Dtype::I8 => Some(8),
            Dtype::U16 | Dtype::I16 => Some(16),
            Dtype::U32 | Dtype::I32 => Some(32),
            Dtype::U64 | Dtype::I64 => Some(64),
            Dtype::Object => None,
        }
    }

    pub const fn is_signed(&self) -> bool {
        matches!(self, Dtype::I8 | Dtype::I16 | Dtype::I32 | Dtype::I64)
    }

    /// The largest value representable by this tag, or `None` when it is unbounded.
    pub fn max_value(&self) -> Option<BigUint> {
        let bits = self.bits()?;
        let value_bits = if self.is_signed() { bits - 1 } else { bits };
        Some((BigUint::one() << value_bits as usize) - 1u32)
    }

    /// Whether `value` can be stored without truncation.
    pub fn can_hold(&self, value: &BigUint) -> bool {
        self.max_value().map_or(true, |max| *value <= max)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Dtype::U8 => "u8",
            Dtype::I8 => "i8",
            Dtype::U16 => "u16",
            Dtype::I16 => "i16",
            Dtype::U32 => "u32",
            Dtype::I32 => "i32",
            Dtype::U64 => "u64",
            Dtype::I64 => "i64",
            Dtype::Object => "object",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dtype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dtype::ALL
            .iter()
            .copied()
            .find(|dtype| dtype.name() == s)
            .ok_or_else(|| Error::InvalidField(format!("unknown dtype name {s:?}")))
    }
}

/// Computes the ordered set of storage types valid for a field of the given order.
///
/// A fixed-width tag qualifies when it can hold `(order - 1)^2`. The arbitrary-precision tag
/// is the fallback: the result is exactly `[Dtype::Object]` when no fixed-width tag
/// qualifies, and never contains it otherwise. Either way the result is never empty.
pub fn resolve_dtypes(order: &BigUint) -> Vec<Dtype> {
    let largest = if order.is_zero() {
        BigUint::zero()
    } else {
        order.clone() - 1u32
    };
    let intermediate = &largest * &largest;
    let mut dtypes: Vec<Dtype> = Dtype::FIXED_WIDTH
        .iter()
        .copied()
        .filter(|dtype| dtype.can_hold(&intermediate))
        .collect();
    if dtypes.is_empty() {
        dtypes.push(Dtype::Object);
    }
    tracing::debug!(%order, ?dtypes, "resolve_dtypes");
    dtypes
}
