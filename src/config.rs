//! JSON configuration for fields and arrays.
//!
//! [`FieldParams`] describes a field and [`ArrayRequest`] describes one call into the
//! constructor suite. Both are plain `serde` types. Integers that may exceed 64 bits
//! (characteristics, polynomial coefficients, vector coefficients) are accepted either as JSON
//! integers or as decimal strings.
//!
//! Requests carry their untyped inputs (seeds, identity sizes, nested vectors) as raw JSON
//! values. After the requested dtype is checked against the field, these are validated into
//! typed inputs before any constructor runs, so every malformed request fails with the same
//! error kind a typed caller would get.
//!
//! ```
//! use gf_arrays::config::{ArrayRequest, FieldParams};
//!
//! let field = FieldParams::from_json(r#"{"characteristic": "7", "degree": 3}"#)
//!     .and_then(|params| params.build())
//!     .unwrap();
//! let request = ArrayRequest::from_json(r#"{"kind": "random", "shape": [2, 2], "seed": 42}"#).unwrap();
//! let a = request.build(&field).unwrap();
//! assert_eq!(a.shape(), &[2, 2]);
//! ```

use crate::arrays::array::FieldArray;
use crate::arrays::random::Seed;
use crate::error::{Error, Result};
use crate::fields::dtype::Dtype;
use crate::fields::field::GaloisField;
use crate::utils::shape_from_dims;
use ndarray::{ArrayD, IxDyn};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The parameters of GF(p^m).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldParams {
    #[serde(with = "decimal")]
    pub characteristic: BigUint,
    #[serde(default = "default_degree")]
    pub degree: u32,
    #[serde(default, with = "decimal_poly")]
    pub irreducible_poly: Option<Vec<BigUint>>,
}

fn default_degree() -> u32 {
    1
}

impl FieldParams {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds an uncached descriptor. Use [`FieldRegistry::get_params`] to share one.
    ///
    /// [`FieldRegistry::get_params`]: crate::FieldRegistry::get_params
    pub fn build(&self) -> Result<GaloisField> {
        GaloisField::new(
            self.characteristic.clone(),
            self.degree,
            self.irreducible_poly.clone(),
        )
    }
}

/// One call into the constructor suite, tagged by `"kind"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ArrayRequest {
    Zeros {
        shape: Vec<i64>,
        #[serde(default)]
        dtype: Option<Dtype>,
    },
    Ones {
        shape: Vec<i64>,
        #[serde(default)]
        dtype: Option<Dtype>,
    },
    Identity {
        size: Value,
        #[serde(default)]
        dtype: Option<Dtype>,
    },
    Random {
        shape: Vec<i64>,
        #[serde(default)]
        dtype: Option<Dtype>,
        /// Absent or `null` draws from system entropy.
        #[serde(default)]
        seed: Value,
    },
    Vector {
        vector: Value,
        #[serde(default)]
        dtype: Option<Dtype>,
    },
}

impl ArrayRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The requested storage type, if any.
    pub fn dtype(&self) -> Option<Dtype> {
        match self {
            ArrayRequest::Zeros { dtype, .. }
            | ArrayRequest::Ones { dtype, .. }
            | ArrayRequest::Identity { dtype, .. }
            | ArrayRequest::Random { dtype, .. }
            | ArrayRequest::Vector { dtype, .. } => *dtype,
        }
    }

    /// Validates the raw inputs and runs the requested constructor over `field`. The dtype is
    /// checked first, as every constructor does, so a request that is also malformed elsewhere
    /// still reports [`Error::InvalidDtype`].
    pub fn build(&self, field: &GaloisField) -> Result<FieldArray> {
        tracing::debug!(%field, request = ?self, "ArrayRequest::build");
        field.validate_dtype(self.dtype())?;
        match self {
            ArrayRequest::Zeros { shape, dtype } => {
                FieldArray::zeros(field, &shape_from_dims(shape)?, *dtype)
            }
            ArrayRequest::Ones { shape, dtype } => {
                FieldArray::ones(field, &shape_from_dims(shape)?, *dtype)
            }
            ArrayRequest::Identity { size, dtype } => {
                FieldArray::identity(field, parse_size(size)?, *dtype)
            }
            ArrayRequest::Random { shape, dtype, seed } => {
                let shape = shape_from_dims(shape)?;
                let seed = parse_seed(seed)?;
                FieldArray::random(field, &shape, *dtype, seed)
            }
            ArrayRequest::Vector { vector, dtype } => {
                let vector = parse_vector(vector)?;
                FieldArray::vector(field, vector.view(), *dtype)
            }
        }
    }
}

fn parse_size(size: &Value) -> Result<usize> {
    size.as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            Error::InvalidShape(format!("identity size {size} is not a single non-negative integer"))
        })
}

fn parse_seed(seed: &Value) -> Result<Option<Seed>> {
    match seed {
        Value::Null => Ok(None),
        seed => Seed::try_from(seed).map(Some),
    }
}

/// Reads a nested JSON array of coefficients into a dense array, rejecting ragged nesting.
fn parse_vector(value: &Value) -> Result<ArrayD<BigUint>> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut coefficients = Vec::new();
    collect_coefficients(value, &shape, &mut coefficients)?;
    ArrayD::from_shape_vec(IxDyn(&shape), coefficients)
        .map_err(|e| Error::MalformedVector(format!("{shape:?}: {e}")))
}

fn collect_coefficients(value: &Value, shape: &[usize], out: &mut Vec<BigUint>) -> Result<()> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, rest))) if items.len() == len => items
            .iter()
            .try_for_each(|item| collect_coefficients(item, rest, out)),
        (leaf, None) if !leaf.is_array() => {
            out.push(parse_coefficient(leaf)?);
            Ok(())
        }
        _ => Err(Error::MalformedVector(format!(
            "ragged nesting at {value}, expected dimensions {shape:?}"
        ))),
    }
}

fn parse_coefficient(value: &Value) -> Result<BigUint> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().map(BigUint::from),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        Error::MalformedVector(format!("coefficient {value} is not a non-negative integer"))
    })
}

/// Integers as JSON numbers or decimal strings. Written back as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Int(u64),
    Str(String),
}

impl Decimal {
    fn into_biguint(self) -> std::result::Result<BigUint, String> {
        match self {
            Decimal::Int(n) => Ok(BigUint::from(n)),
            Decimal::Str(s) => s
                .parse()
                .map_err(|_| format!("{s:?} is not a non-negative decimal integer")),
        }
    }
}

mod decimal {
    use super::Decimal;
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        Decimal::deserialize(deserializer)?
            .into_biguint()
            .map_err(D::Error::custom)
    }
}

mod decimal_poly {
    use super::Decimal;
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<BigUint>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(poly) => serializer.collect_seq(poly.iter().map(|c| c.to_str_radix(10))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<BigUint>>, D::Error> {
        Option::<Vec<Decimal>>::deserialize(deserializer)?
            .map(|poly| {
                poly.into_iter()
                    .map(Decimal::into_biguint)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(D::Error::custom)
            })
            .transpose()
    }
}
