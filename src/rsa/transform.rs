// Per-character modular exponentiation shared by every message operation

use num_traits::ToPrimitive;

use super::bigint::{mod_pow, RsaBigInt};
use super::keygen::{RsaPrivateKey, RsaPublicKey};

/// A key viewed purely as the (exponent, modulus) pair fed to [`mod_pow`]
///
/// Encryption and verification use the public exponent, decryption and
/// signing the private one.
pub trait TransformKey {
    fn exponent(&self) -> &RsaBigInt;
    fn modulus(&self) -> &RsaBigInt;
}

impl TransformKey for RsaPublicKey {
    fn exponent(&self) -> &RsaBigInt {
        &self.e
    }

    fn modulus(&self) -> &RsaBigInt {
        &self.n
    }
}

impl TransformKey for RsaPrivateKey {
    fn exponent(&self) -> &RsaBigInt {
        &self.d
    }

    fn modulus(&self) -> &RsaBigInt {
        &self.n
    }
}

/// value^exponent mod modulus for a single unit
pub fn transform<K: TransformKey + ?Sized>(key: &K, value: &RsaBigInt) -> RsaBigInt {
    mod_pow(value, key.exponent(), key.modulus())
}

/// Apply [`transform`] to every character's code point, in order
pub fn transform_text<K: TransformKey + ?Sized>(key: &K, text: &str) -> Vec<RsaBigInt> {
    text.chars()
        .map(|c| transform(key, &RsaBigInt::from(u32::from(c))))
        .collect()
}

/// Apply [`transform`] to every value and read each result as a code point
///
/// Results that are not Unicode scalar values decode to U+FFFD.
pub fn transform_values<K: TransformKey + ?Sized>(key: &K, values: &[RsaBigInt]) -> String {
    values
        .iter()
        .map(|c| {
            transform(key, c)
                .to_u32()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;

    fn textbook_keys() -> (RsaPublicKey, RsaPrivateKey) {
        // p = 61, q = 53, e = 17, d = 2753
        (
            RsaPublicKey { e: from_u64(17), n: from_u64(3233) },
            RsaPrivateKey { d: from_u64(2753), n: from_u64(3233) },
        )
    }

    #[test]
    fn test_transform_single_value() {
        let (public, private) = textbook_keys();
        let c = transform(&public, &from_u64(65));
        assert_eq!(c, from_u64(2790));
        assert_eq!(transform(&private, &c), from_u64(65));
    }

    #[test]
    fn test_transform_text_preserves_length_and_order() {
        let (public, _) = textbook_keys();
        let out = transform_text(&public, "AAB");
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], out[1]);
        assert_ne!(out[1], out[2]);
        assert!(out.iter().all(|c| c < &public.n));
    }

    #[test]
    fn test_transform_values_replaces_invalid_code_points() {
        // identity key with a modulus large enough to hold a surrogate
        let identity = RsaPublicKey { e: from_u64(1), n: from_u64(0x11_0000) };
        let text = transform_values(&identity, &[from_u64(0x48), from_u64(0xD800)]);
        assert_eq!(text, "H\u{FFFD}");
    }
}
