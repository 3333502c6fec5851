// RSA Big Integer Operations
// Wrapper around num-bigint for textbook RSA arithmetic

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Greatest common divisor (Euclidean algorithm)
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = &a % &b;
        a = std::mem::replace(&mut b, r);
    }

    a
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (
        BigInt::from_biguint(Sign::Plus, a.clone()),
        BigInt::from_biguint(Sign::Plus, b.clone()),
    );
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    // old_r is never negative: both inputs are non-negative
    (old_r.magnitude().clone(), old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m, in [0, m)
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let (g, x, _) = extended_gcd(a, m);
    if !g.is_one() {
        return None;
    }

    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut inv = x % &m_signed;
    if inv.is_negative() {
        inv += &m_signed;
    }

    inv.to_biguint()
}

/// Trial-division primality test
/// Checks every divisor from 2 up to floor(sqrt(n))
pub fn is_prime(n: &RsaBigInt) -> bool {
    if n <= &RsaBigInt::one() {
        return false;
    }

    let mut i = RsaBigInt::from(2u8);
    while &i * &i <= *n {
        if (n % &i).is_zero() {
            return false;
        }
        i += 1u8;
    }

    true
}

/// Uniformly random big integer in [low, high)
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, low: &RsaBigInt, high: &RsaBigInt) -> RsaBigInt {
    rng.gen_biguint_range(low, high)
}

/// Generate a random prime p with 2^(bit_length-1) <= p < 2^bit_length
///
/// Draws candidates until one passes [`is_prime`]. There is no retry bound,
/// so a range without primes (bit_length == 1) never returns. A zero
/// bit_length has an empty range and fails with [`RsaError::InvalidPrimeSize`].
pub fn random_prime<R: Rng + ?Sized>(bit_length: u32, rng: &mut R) -> Result<RsaBigInt> {
    if bit_length == 0 {
        return Err(RsaError::InvalidPrimeSize(bit_length));
    }

    let lower = RsaBigInt::one() << ((bit_length - 1) as usize);
    let upper = RsaBigInt::one() << (bit_length as usize);

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let candidate = random_in_range(rng, &lower, &upper);
        trace!(attempts, "testing prime candidate");

        if is_prime(&candidate) {
            debug!(bit_length, attempts, "found prime");
            return Ok(candidate);
        }
    }
}
