use crate::config::FieldParams;
use crate::error::Result;
use crate::fields::field::GaloisField;
use num_bigint::BigUint;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

type FieldKey = (BigUint, u32, Option<Vec<BigUint>>);

/// A lookup-or-construct cache of field descriptors.
///
/// Each distinct `(p, m, irreducible polynomial)` triple is built once and handed out as a
/// shared handle afterwards, and every extension over `p` shares the registry's copy of
/// GF(p) as its prime subfield. The registry is an ordinary value, there is no process-wide
/// instance: callers that want sharing keep one around (it is `Send + Sync`).
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: RwLock<HashMap<FieldKey, GaloisField>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached descriptor of GF(p^m), building and caching it on first use.
    pub fn get(
        &self,
        characteristic: impl Into<BigUint>,
        degree: u32,
        irreducible_poly: Option<Vec<BigUint>>,
    ) -> Result<GaloisField> {
        let key: FieldKey = (characteristic.into(), degree, irreducible_poly);
        if let Some(field) = self
            .fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::trace!(%field, "FieldRegistry::get hit");
            return Ok(field.clone());
        }

        let prime_subfield = if key.1 > 1 {
            Some(self.get(key.0.clone(), 1, None)?)
        } else {
            None
        };
        let field = GaloisField::build(key.0.clone(), key.1, key.2.clone(), prime_subfield)?;
        tracing::trace!(%field, "FieldRegistry::get miss");

        // a concurrent caller may have won the race, in which case its descriptor is kept
        let mut fields = self.fields.write().unwrap_or_else(PoisonError::into_inner);
        Ok(fields.entry(key).or_insert(field).clone())
    }

    pub fn prime(&self, characteristic: impl Into<BigUint>) -> Result<GaloisField> {
        self.get(characteristic, 1, None)
    }

    /// Resolves configuration-supplied parameters through the cache.
    pub fn get_params(&self, params: &FieldParams) -> Result<GaloisField> {
        self.get(
            params.characteristic.clone(),
            params.degree,
            params.irreducible_poly.clone(),
        )
    }

    /// Number of cached descriptors, prime subfields included.
    pub fn len(&self) -> usize {
        self.fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lookup_is_cached() {
        let registry = FieldRegistry::new();
        assert!(registry.is_empty());
        let a = registry.get(2u32, 8, None).expect("GF(2^8)");
        let b = registry.get(2u32, 8, None).expect("GF(2^8)");
        assert_eq!(a, b);
        assert!(std::ptr::eq(a.dtypes(), b.dtypes()), "Descriptor was rebuilt");
        // GF(2^8) and its prime subfield GF(2)
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_extensions_share_the_prime_subfield() {
        let registry = FieldRegistry::new();
        let gf2 = registry.prime(2u32).expect("GF(2)");
        let gf16 = registry.get(2u32, 4, None).expect("GF(2^4)");
        let gf256 = registry.get(2u32, 8, None).expect("GF(2^8)");
        assert!(std::ptr::eq(gf16.prime_subfield().dtypes(), gf2.dtypes()));
        assert!(std::ptr::eq(gf256.prime_subfield().dtypes(), gf2.dtypes()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_distinct_moduli_are_distinct_entries() {
        let registry = FieldRegistry::new();
        let one = [1u32, 0, 1].map(BigUint::from).to_vec();
        let two = [1u32, 2, 2].map(BigUint::from).to_vec();
        let a = registry.get(3u32, 2, Some(one)).expect("GF(3^2)");
        let b = registry.get(3u32, 2, Some(two)).expect("GF(3^2)");
        assert_ne!(a, b);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let registry = FieldRegistry::new();
        assert!(matches!(
            registry.get(6u32, 1, None),
            Err(Error::InvalidField(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_lookups_agree() {
        let registry = Arc::new(FieldRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.get(7u32, 3, None).expect("GF(7^3)"))
            })
            .collect();
        let fields: Vec<GaloisField> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();
        assert!(fields.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(registry.len(), 2);
    }
}
