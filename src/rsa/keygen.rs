// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use num_traits::One;
use rand::Rng;
use tracing::debug;

use super::bigint::{gcd, mod_inverse, random_in_range, random_prime, RsaBigInt};
use crate::error::{Result, RsaError};

/// Smallest overall key size accepted by [`generate_keypair`]
pub const MIN_KEY_BITS: u32 = 4;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub e: RsaBigInt,  // Public exponent
    pub n: RsaBigInt,  // Modulus
}

/// RSA Private Key
///
/// The primes are not retained; only the exponent and modulus survive
/// key generation.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub d: RsaBigInt,  // Private exponent
    pub n: RsaBigInt,  // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub bit_length: u32,
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.e, self.n)
    }
}

impl fmt::Display for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.d, self.n)
    }
}

// Keeps the private exponent out of logs and panic messages.
impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("d", &"[redacted]")
            .field("n", &self.n)
            .finish()
    }
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaKeyPair {
    /// Requested key size this pair was generated for
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }
}

/// Choose a public exponent: uniformly random in [1, φ] until coprime with φ
fn choose_public_exponent<R: Rng + ?Sized>(phi: &RsaBigInt, rng: &mut R) -> RsaBigInt {
    let one = RsaBigInt::one();
    let upper = phi + 1u8;

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let e = random_in_range(rng, &one, &upper);
        if gcd(&e, phi).is_one() {
            debug!(attempts, "selected public exponent");
            return e;
        }
    }
}

/// Derive a key pair from two already generated primes
///
/// p and q are consumed here and do not outlive the call.
pub fn keypair_from_primes<R: Rng + ?Sized>(
    p: RsaBigInt,
    q: RsaBigInt,
    bit_length: u32,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    // Step 1: Compute n = p * q
    let n = &p * &q;

    // Step 2: Compute φ(n) = (p-1)(q-1)
    let phi = (&p - 1u8) * (&q - 1u8);

    // Step 3: Pick e coprime with φ(n)
    let e = choose_public_exponent(&phi, rng);

    // Step 4: Compute d = e^(-1) mod φ(n)
    let d = mod_inverse(&e, &phi).ok_or_else(|| RsaError::ModularInverseUndefined {
        value: e.clone(),
        modulus: phi.clone(),
    })?;

    debug!(bit_length, modulus_bits = n.bits(), "derived key pair");

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { e, n: n.clone() },
        private_key: RsaPrivateKey { d, n },
        bit_length,
    })
}

/// Generate RSA key pair with specified bit length
/// bit_length: Overall key size; each prime gets bit_length / 2 bits
///
/// q is redrawn until it differs from p; with p == q the modulus is a
/// square and (p-1)(q-1) is not its totient, so round trips would break.
pub fn generate_keypair<R: Rng + ?Sized>(bit_length: u32, rng: &mut R) -> Result<RsaKeyPair> {
    if bit_length < MIN_KEY_BITS || bit_length % 2 != 0 {
        return Err(RsaError::InvalidKeySize {
            min: MIN_KEY_BITS,
            actual: bit_length,
        });
    }

    let half_bits = bit_length / 2;

    let p = random_prime(half_bits, rng)?;
    let mut q = random_prime(half_bits, rng)?;
    while q == p {
        debug!(half_bits, "second prime equals first, redrawing");
        q = random_prime(half_bits, rng)?;
    }

    keypair_from_primes(p, q, bit_length, rng)
}
