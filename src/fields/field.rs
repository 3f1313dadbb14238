//! This module implements the field descriptor, the immutable metadata every field array is
//! tagged with. A descriptor records the characteristic `p`, the degree `m`, the order
//! `q = p^m`, an optional irreducible polynomial for extension fields, a handle to the prime
//! subfield GF(p), and the set of storage types resolved for `q`.
//!
//! Descriptors are shared, never owned: [`GaloisField`] is a cheap handle around an `Arc`, so
//! any number of arrays, threads and registries can hold the same field. Comparison is by
//! value, meaning two descriptors built independently from the same parameters are the same
//! field, while descriptors with any differing parameter are not.
//!
//! What this module does not do: search for irreducible or primitive polynomials. A caller
//! supplied polynomial is checked for shape, range, monicity and a nonzero constant term, which
//! catches malformed input, but full irreducibility testing belongs to the arithmetic engine.

use crate::error::{Error, Result};
use crate::fields::dtype::{resolve_dtypes, Dtype};
use crate::utils::is_prime;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct FieldDescriptor {
    characteristic: BigUint,
    degree: u32,
    order: BigUint,
    irreducible_poly: Option<Vec<BigUint>>,
    // `None` exactly when `degree == 1`, in which case the field is its own prime subfield
    prime_subfield: Option<GaloisField>,
    dtypes: Vec<Dtype>,
    name: String,
}

/// A handle to an immutable finite field descriptor.
#[derive(Clone, Debug)]
pub struct GaloisField(Arc<FieldDescriptor>);

impl GaloisField {
    /// Builds the descriptor of GF(p^m).
    ///
    /// # Arguments
    /// * `characteristic` - the prime `p`
    /// * `degree` - the extension degree `m >= 1`
    /// * `irreducible_poly` - optional modulus for the extension, `m + 1` coefficients over
    ///   GF(p) with the highest degree first
    ///
    /// # Returns
    /// * `Ok(GaloisField)` - the descriptor, with its storage types resolved
    /// * `Err(Error::InvalidField)` - when `p` is not prime, `m` is zero, or the polynomial is
    ///   malformed
    ///
    /// # Examples
    /// ```
    /// use gf_arrays::{Dtype, GaloisField};
    /// use num_bigint::BigUint;
    ///
    /// let gf256 = GaloisField::new(2u32, 8, None).unwrap();
    /// assert_eq!(gf256.order(), &BigUint::from(256u32));
    /// assert_eq!(gf256.default_dtype(), Dtype::U16);
    /// assert_eq!(gf256.prime_subfield().order(), &BigUint::from(2u32));
    /// ```
    pub fn new(
        characteristic: impl Into<BigUint>,
        degree: u32,
        irreducible_poly: Option<Vec<BigUint>>,
    ) -> Result<Self> {
        Self::build(characteristic.into(), degree, irreducible_poly, None)
    }

    /// Builds the descriptor of the prime field GF(p).
    pub fn prime(characteristic: impl Into<BigUint>) -> Result<Self> {
        Self::new(characteristic, 1, None)
    }

    /// Builds a descriptor, reusing `prime_subfield` for extensions when one is given. The
    /// registry passes its cached GF(p) here so every extension over `p` shares it.
    pub(crate) fn build(
        characteristic: BigUint,
        degree: u32,
        irreducible_poly: Option<Vec<BigUint>>,
        prime_subfield: Option<GaloisField>,
    ) -> Result<Self> {
        validate_parameters(&characteristic, degree, irreducible_poly.as_deref())?;

        let prime_subfield = match (degree, prime_subfield) {
            (1, _) => None,
            (_, Some(subfield)) if subfield.characteristic() == &characteristic => Some(subfield),
            (_, Some(subfield)) => {
                return Err(Error::FieldMismatch {
                    expected: format!("GF({characteristic})"),
                    found: subfield.name().to_string(),
                })
            }
            (_, None) => Some(Self::prime(characteristic.clone())?),
        };

        let order = characteristic.pow(degree);
        let dtypes = resolve_dtypes(&order);
        let name = if degree == 1 {
            format!("GF({characteristic})")
        } else {
            format!("GF({characteristic}^{degree})")
        };
        tracing::debug!(%name, %order, ?irreducible_poly, ?dtypes, "GaloisField::new");

        Ok(Self(Arc::new(FieldDescriptor {
            characteristic,
            degree,
            order,
            irreducible_poly,
            prime_subfield,
            dtypes,
            name,
        })))
    }

    pub fn characteristic(&self) -> &BigUint {
        &self.0.characteristic
    }

    pub fn degree(&self) -> u32 {
        self.0.degree
    }

    pub fn order(&self) -> &BigUint {
        &self.0.order
    }

    pub fn irreducible_poly(&self) -> Option<&[BigUint]> {
        self.0.irreducible_poly.as_deref()
    }

    pub fn is_prime_field(&self) -> bool {
        self.0.degree == 1
    }

    /// The degree-1 field GF(p) embedded in this field. For a prime field this is the field
    /// itself.
    pub fn prime_subfield(&self) -> GaloisField {
        match &self.0.prime_subfield {
            Some(subfield) => subfield.clone(),
            None => self.clone(),
        }
    }

    /// The storage types valid for this field, in ascending capacity order.
    pub fn dtypes(&self) -> &[Dtype] {
        &self.0.dtypes
    }

    /// The smallest valid storage type, used whenever a constructor is not given one.
    pub fn default_dtype(&self) -> Dtype {
        // never empty, the resolver falls back to `Dtype::Object`
        self.0.dtypes[0]
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn is_valid_dtype(&self, dtype: Dtype) -> bool {
        self.0.dtypes.contains(&dtype)
    }

    /// Resolves an optionally requested storage type against this field. Nothing requested
    /// means the default; anything outside [`GaloisField::dtypes`] is an
    /// [`Error::InvalidDtype`], never a silent coercion.
    pub fn validate_dtype(&self, dtype: Option<Dtype>) -> Result<Dtype> {
        match dtype {
            None => Ok(self.default_dtype()),
            Some(dtype) if self.is_valid_dtype(dtype) => Ok(dtype),
            Some(dtype) => {
                tracing::debug!(field = %self, %dtype, allowed = ?self.dtypes(), "rejecting dtype");
                Err(Error::InvalidDtype {
                    dtype,
                    order: self.order().clone(),
                    allowed: self.dtypes().to_vec(),
                })
            }
        }
    }

    /// Whether `value` is the integer encoding of an element, i.e. `value < order`.
    pub fn is_element(&self, value: &BigUint) -> bool {
        value < self.order()
    }

    /// Fails with [`Error::FieldMismatch`] unless `other` describes the same field.
    pub fn ensure_same(&self, other: &GaloisField) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(Error::FieldMismatch {
                expected: self.name().to_string(),
                found: other.name().to_string(),
            })
        }
    }
}

fn validate_parameters(
    characteristic: &BigUint,
    degree: u32,
    irreducible_poly: Option<&[BigUint]>,
) -> Result<()> {
    if degree == 0 {
        return Err(Error::InvalidField(
            "degree must be a positive integer".to_string(),
        ));
    }
    if !is_prime(characteristic) {
        return Err(Error::InvalidField(format!(
            "characteristic {characteristic} is not prime"
        )));
    }
    let Some(poly) = irreducible_poly else {
        return Ok(());
    };

    let m = degree as usize;
    if poly.len() != m + 1 {
        return Err(Error::InvalidField(format!(
            "a degree {degree} modulus needs {} coefficients, got {}",
            m + 1,
            poly.len()
        )));
    }
    if let Some(c) = poly.iter().find(|c| *c >= characteristic) {
        return Err(Error::InvalidField(format!(
            "coefficient {c} is not an element of GF({characteristic})"
        )));
    }
    if !poly[0].is_one() {
        return Err(Error::InvalidField(
            "irreducible polynomial must be monic".to_string(),
        ));
    }
    // x divides any polynomial with a zero constant term
    if m > 1 && poly[m].is_zero() {
        return Err(Error::InvalidField(
            "irreducible polynomial of degree > 1 has a zero constant term".to_string(),
        ));
    }
    Ok(())
}

impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.characteristic == other.0.characteristic
                && self.0.degree == other.0.degree
                && self.0.irreducible_poly == other.0.irreducible_poly)
    }
}

impl Eq for GaloisField {}

impl Hash for GaloisField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.characteristic.hash(state);
        self.0.degree.hash(state);
        self.0.irreducible_poly.hash(state);
    }
}

impl fmt::Display for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
