//! This module implements the deterministic random generator behind [`FieldArray::random`].
//!
//! Reproducibility is specified bit-for-bit, so the same `(order, shape, seed)` triple gives
//! the same array on every platform and in every process:
//!
//! 1. The stream is `ChaCha20Rng::seed_from_u64(seed)`: the 64-bit seed is expanded to a
//!    256-bit ChaCha key with the PCG32 expansion of `rand_core`, and the generator emits the
//!    ChaCha20 keystream with a 64-bit block counter and stream id zero. Without a seed the
//!    key comes from the operating system instead.
//! 2. Elements are drawn one after another in row-major order. For a field of order `q` let
//!    `b` be the bit length of `q - 1`. A candidate is assembled from `ceil(b / 64)` calls to
//!    `next_u64`, least significant word first, with the last word masked down to the bits
//!    that remain. Candidates `>= q` are rejected and drawn again.
//!
//! Masked rejection keeps the expected number of draws below two per element and, unlike
//! reducing a word modulo `q`, is exactly uniform for every order.
//!
//! [`FieldArray::random`]: crate::FieldArray::random

use crate::arrays::storage::Values;
use crate::error::{Error, Result};
use crate::utils::element_bits;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use std::fmt;

/// A seed for reproducible generation: any non-negative integer that fits in 64 bits.
///
/// Typed callers construct one from an unsigned integer directly. Signed integers and untyped
/// configuration values go through `TryFrom`, which rejects everything that is not a
/// non-negative integer with [`Error::InvalidSeed`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl TryFrom<i64> for Seed {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| Error::InvalidSeed(format!("{value} is negative")))
    }
}

impl TryFrom<i128> for Seed {
    type Error = Error;

    fn try_from(value: i128) -> Result<Self> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| Error::InvalidSeed(format!("{value} is not in [0, 2^64)")))
    }
}

impl TryFrom<&serde_json::Value> for Seed {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;
        match value {
            Value::Number(n) => match (n.as_u64(), n.as_i64()) {
                (Some(v), _) => Ok(Self(v)),
                (None, Some(v)) => Err(Error::InvalidSeed(format!("{v} is negative"))),
                (None, None) => Err(Error::InvalidSeed(format!("{n} is not an integer"))),
            },
            Value::String(s) => Err(Error::InvalidSeed(format!("string {s:?}"))),
            Value::Array(items) => Err(Error::InvalidSeed(format!(
                "sequence of {} values",
                items.len()
            ))),
            other => Err(Error::InvalidSeed(other.to_string())),
        }
    }
}

/// A uniform sampler of field element encodings.
pub(crate) struct FieldRng {
    rng: ChaCha20Rng,
}

impl FieldRng {
    /// Seeds exclusively from `seed`, or from system entropy when there is none.
    pub(crate) fn new(seed: Option<Seed>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed.value()),
            None => {
                tracing::debug!("FieldRng::new seeding from system entropy");
                ChaCha20Rng::from_entropy()
            }
        };
        Self { rng }
    }

    /// Draws `count` independent elements of a field of the given order.
    pub(crate) fn draw(&mut self, order: &BigUint, count: usize) -> Values {
        match order.to_u64() {
            // orders up to 2^64 - 1 have elements below 2^64, one word per candidate
            Some(order) => Values::Words((0..count).map(|_| self.sample_word(order)).collect()),
            None => Values::Big((0..count).map(|_| self.sample(order)).collect()),
        }
    }

    /// Single-word rejection sampling, for orders below `2^64`.
    pub(crate) fn sample_word(&mut self, order: u64) -> u64 {
        let bits = element_bits(&BigUint::from(order));
        let mask = mask(bits);
        loop {
            let candidate = self.rng.next_u64() & mask;
            if candidate < order {
                return candidate;
            }
            tracing::trace!(candidate, order, "FieldRng::sample_word rejected");
        }
    }

    /// Multi-word rejection sampling for orders of any size.
    pub(crate) fn sample(&mut self, order: &BigUint) -> BigUint {
        let bits = element_bits(order);
        let words = ((bits + 63) / 64).max(1);
        let top_mask = mask(bits - 64 * (words - 1));
        loop {
            let mut digits = Vec::with_capacity(2 * words as usize);
            for i in 0..words {
                let mut word = self.rng.next_u64();
                if i == words - 1 {
                    word &= top_mask;
                }
                digits.push(word as u32);
                digits.push((word >> 32) as u32);
            }
            let candidate = BigUint::new(digits);
            if candidate < *order {
                return candidate;
            }
            tracing::trace!(%candidate, %order, "FieldRng::sample rejected");
        }
    }
}

/// A mask of the low `bits` bits of a word.
fn mask(bits: u64) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn words(values: Values) -> Vec<u64> {
        match values {
            Values::Words(words) => words,
            Values::Big(_) => panic!("expected machine words"),
        }
    }

    mod seed_tests {
        use super::*;

        #[test]
        fn test_integer_seeds() {
            assert_eq!(Seed::from(42u64).value(), 42);
            assert_eq!(Seed::from(1337u32).value(), 1337);
            assert_eq!(Seed::try_from(27182818284i64).ok(), Some(Seed::new(27182818284)));
            assert!(matches!(Seed::try_from(-1i64), Err(Error::InvalidSeed(_))));
            assert!(matches!(
                Seed::try_from(1i128 << 64),
                Err(Error::InvalidSeed(_))
            ));
        }

        #[test]
        fn test_untyped_seeds() {
            assert_eq!(Seed::try_from(&json!(42)).ok(), Some(Seed::new(42)));
            for invalid in [json!("hi"), json!(3.25), json!([1, 2, 3]), json!(-5), json!(true)] {
                assert!(
                    matches!(Seed::try_from(&invalid), Err(Error::InvalidSeed(_))),
                    "{invalid} accepted as a seed"
                );
            }
        }
    }

    mod sampling_tests {
        use super::*;

        #[test]
        fn test_masks() {
            assert_eq!(mask(0), 0);
            assert_eq!(mask(1), 1);
            assert_eq!(mask(3), 7);
            assert_eq!(mask(64), u64::MAX);
        }

        #[test]
        fn test_seeded_draws_are_reproducible() {
            let order = BigUint::from(3191u32);
            let a = words(FieldRng::new(Some(Seed::new(7))).draw(&order, 64));
            let b = words(FieldRng::new(Some(Seed::new(7))).draw(&order, 64));
            let c = words(FieldRng::new(Some(Seed::new(8))).draw(&order, 64));
            assert_eq!(a, b, "Same seed produced different streams");
            assert_ne!(a, c, "Different seeds produced the same stream");
        }

        #[test]
        fn test_known_stream() {
            let gf2 = words(FieldRng::new(Some(Seed::new(42))).draw(&BigUint::from(2u32), 4));
            let gf5 = words(FieldRng::new(Some(Seed::new(42))).draw(&BigUint::from(5u32), 4));
            let gf7 = words(FieldRng::new(Some(Seed::new(42))).draw(&BigUint::from(7u32), 4));
            assert_eq!(gf2, vec![0, 1, 1, 0]);
            assert_eq!(gf5, vec![0, 1, 0, 2]);
            assert_eq!(gf7, vec![0, 1, 5, 0]);
        }

        #[test]
        fn test_word_and_multiword_paths_agree() {
            // below 2^64 the general sampler consumes the stream exactly like the word sampler
            let order = 3191u64;
            let mut a = FieldRng::new(Some(Seed::new(99)));
            let mut b = FieldRng::new(Some(Seed::new(99)));
            for _ in 0..32 {
                assert_eq!(
                    BigUint::from(a.sample_word(order)),
                    b.sample(&BigUint::from(order))
                );
            }
        }

        #[test]
        fn test_values_stay_below_order() {
            let order: BigUint = "36893488147419103183".parse().expect("parse prime");
            let mut rng = FieldRng::new(None);
            match rng.draw(&order, 256) {
                Values::Big(values) => assert!(values.iter().all(|v| *v < order)),
                Values::Words(_) => panic!("expected arbitrary precision values"),
            }
            let small = words(rng.draw(&BigUint::from(3u32), 256));
            assert!(small.iter().all(|&v| v < 3));
        }

        #[test]
        fn test_draws_cover_the_field() {
            let mut rng = FieldRng::new(Some(Seed::new(2024)));
            let mut seen = [false; 7];
            for v in words(rng.draw(&BigUint::from(7u32), 500)) {
                seen[v as usize] = true;
            }
            assert!(seen.iter().all(|s| *s), "Some element of GF(7) never drawn");
        }

        #[test]
        fn test_unseeded_draws_differ() {
            let order = BigUint::from(u32::MAX);
            let a = words(FieldRng::new(None).draw(&order, 16));
            let b = words(FieldRng::new(None).draw(&order, 16));
            assert_ne!(a, b, "Two entropy seeded streams collided");
        }
    }
}
