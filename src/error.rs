// Error types for textbook RSA operations

use crate::rsa::bigint::RsaBigInt;

/// Errors that can occur during key generation and message transforms
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error("Invalid key size: must be an even number of at least {min} bits, got {actual}")]
    InvalidKeySize { min: u32, actual: u32 },

    #[error("Invalid prime size: must be at least 1 bit, got {0}")]
    InvalidPrimeSize(u32),

    #[error("No modular inverse of {value} modulo {modulus}")]
    ModularInverseUndefined { value: RsaBigInt, modulus: RsaBigInt },

    #[error("Character {code_point} at position {index} does not fit below modulus {modulus}")]
    CharacterOutOfRange {
        index: usize,
        code_point: u32,
        modulus: RsaBigInt,
    },

    #[error("Malformed signature field {field}: {reason}")]
    ProtocolParse { field: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, RsaError>;
