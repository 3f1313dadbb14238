//! # gf-arrays: Field-typed integer arrays over Galois fields
//!
//! gf-arrays provides the data layer of finite field array arithmetic: immutable descriptors
//! of prime and extension fields GF(p^m), shaped arrays whose every element is guaranteed to be
//! an element of their field, and the structured constructors that build such arrays.
//!
//! ## Quick Start
//!
//! Add gf-arrays to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gf-arrays = "0.1.0"
//! ```
//!
//! ## Key Features
//!
//! - Field descriptors for GF(p) and GF(p^m), with characteristics of any size
//! - Storage types resolved per field, from `u8` up to arbitrary precision
//! - Zero, one, identity, seeded random and coefficient-vector constructors
//! - Reproducible random arrays, bit-for-bit across platforms
//! - JSON configuration of fields and constructor calls
//!
//! ## Basic Usage
//!
//! ```rust
//! use gf_arrays::{Dtype, FieldArray, GaloisField, Seed};
//! use ndarray::array;
//!
//! // GF(7^3), stored as u32 by default
//! let field = GaloisField::new(7u32, 3, None).expect("valid field");
//! assert_eq!(field.default_dtype(), Dtype::U32);
//!
//! let eye = FieldArray::identity(&field, 3, None).expect("identity");
//! let r = FieldArray::random(&field, &[2, 2], Some(Dtype::U64), Some(Seed::new(42))).expect("random");
//! assert!(r.to_biguint_vec().iter().all(|v| v < field.order()));
//!
//! // [3, 2, 6] over GF(7) is 3*49 + 2*7 + 6 = 167
//! let v = FieldArray::vector(&field, array![3u8, 2, 6].into_dyn().view(), None).expect("vector");
//! assert_eq!(v.to_vector(None).expect("encode").to_biguint_vec().len(), 3);
//! assert_eq!(eye.get(&[1, 1]), eye.get(&[2, 2]));
//! ```
//!
//! ## Core Components
//!
//! - [`GaloisField`]: the shared, immutable field descriptor, and [`FieldRegistry`] to cache them
//! - [`Dtype`], [`resolve_dtypes`]: the storage-type registry
//! - [`FieldArray`]: the field-tagged array and its constructors
//! - [`Seed`]: seeds for reproducible random arrays
//! - [`config`]: [`FieldParams`] and [`ArrayRequest`] for JSON driven construction
//!
//! ## Scope
//!
//! Arithmetic between elements is out of scope. Arrays here are built, converted and
//! inspected, and the storage types are chosen so an arithmetic engine can multiply any two
//! elements without overflow before reducing.

mod arrays;
pub mod config;
mod error;
mod fields;
pub(crate) mod utils;

pub use crate::arrays::array::FieldArray;
pub use crate::arrays::element::Element;
pub use crate::arrays::random::Seed;
pub use crate::arrays::storage::Storage;
pub use crate::arrays::vector::{coefficients_to_integer, integer_to_coefficients};

pub use crate::fields::dtype::{resolve_dtypes, Dtype};
pub use crate::fields::field::GaloisField;
pub use crate::fields::registry::FieldRegistry;

pub use crate::config::{ArrayRequest, FieldParams};
pub use crate::error::{Error, Result};
