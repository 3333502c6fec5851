//! Textbook RSA over single-character units.
//!
//! Key generation from two trial-division primes, per-character
//! encryption/decryption and signing/verification, and a sign-then-encrypt
//! exchange between a sender and a receiver. There is no padding and no
//! constant-time arithmetic; this is for learning, not for protecting data.
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use textbook_rsa::rsa::{decrypt_msg, encrypt_msg, generate_keypair};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let keypair = generate_keypair(16, &mut rng).unwrap();
//! let ciphertext = encrypt_msg(&keypair.public_key, "HI");
//! assert_eq!(decrypt_msg(&keypair.private_key, &ciphertext), "HI");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod rsa;
pub mod util;

pub use error::{Result, RsaError};
