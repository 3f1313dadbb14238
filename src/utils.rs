use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Witnesses for the Miller-Rabin test. Using the first thirteen primes makes the test
/// deterministic for every `n < 3317044064679887385961981` (about `3.3 * 10^24`); above that
/// bound a pass means `n` is a strong probable prime to all thirteen bases.
const MILLER_RABIN_WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Checks whether `n` is prime.
///
/// Small factors are stripped by trial division against the witness set, then each witness
/// `a` is checked for `a^d = 1` or `a^(d 2^r) = -1 (mod n)` with `n - 1 = d 2^s`.
pub(crate) fn is_prime(n: &BigUint) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }
    for &w in MILLER_RABIN_WITNESSES.iter() {
        let w = BigUint::from(w);
        if *n == w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    let n_minus_one = n.clone() - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;
    'witness: for &w in MILLER_RABIN_WITNESSES.iter() {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Number of elements addressed by `shape`. The empty shape is a scalar and addresses one
/// element. Shapes whose element count does not fit in `isize` are rejected, since no
/// container can be allocated for them.
pub(crate) fn element_count(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .filter(|&count| count <= isize::MAX as usize)
        .ok_or_else(|| {
            Error::InvalidShape(format!(
                "shape {shape:?} addresses more elements than can be allocated"
            ))
        })
}

/// Converts signed dimensions, as they arrive from untyped configuration, into a shape.
pub(crate) fn shape_from_dims(dims: &[i64]) -> Result<Vec<usize>> {
    dims.iter()
        .map(|&dim| {
            usize::try_from(dim).map_err(|_| {
                Error::InvalidShape(format!(
                    "dimension {dim} in {dims:?} is not a non-negative integer"
                ))
            })
        })
        .collect()
}

/// Number of bits needed to write `order - 1`, i.e. the width of the largest element of a
/// field of the given order.
pub(crate) fn element_bits(order: &BigUint) -> u64 {
    if order.is_zero() {
        return 0;
    }
    (order.clone() - 1u32).bits()
}
