// RSA Encryption and Signing
// Textbook RSA: every character is raised to the key exponent on its own

use super::bigint::RsaBigInt;
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use super::transform::{transform_text, TransformKey};
use crate::error::{Result, RsaError};

/// Encrypt a message with a public key, one integer per character
///
/// Characters whose code point is not below n come back wrong after
/// decryption; use [`encrypt_msg_checked`] to reject them instead.
pub fn encrypt_msg(public_key: &RsaPublicKey, plaintext: &str) -> Vec<RsaBigInt> {
    transform_text(public_key, plaintext)
}

/// Sign a message with a private key, one integer per character
pub fn sign_msg(private_key: &RsaPrivateKey, message: &str) -> Vec<RsaBigInt> {
    transform_text(private_key, message)
}

/// Fail with [`RsaError::CharacterOutOfRange`] on the first character
/// that does not fit below the key's modulus
pub fn check_message_fits<K: TransformKey + ?Sized>(key: &K, message: &str) -> Result<()> {
    let modulus = key.modulus();
    for (index, c) in message.chars().enumerate() {
        let code_point = u32::from(c);
        if &RsaBigInt::from(code_point) >= modulus {
            return Err(RsaError::CharacterOutOfRange {
                index,
                code_point,
                modulus: modulus.clone(),
            });
        }
    }
    Ok(())
}

/// Encrypt, refusing messages that would not survive the round trip
pub fn encrypt_msg_checked(public_key: &RsaPublicKey, plaintext: &str) -> Result<Vec<RsaBigInt>> {
    check_message_fits(public_key, plaintext)?;
    Ok(encrypt_msg(public_key, plaintext))
}

/// Sign, refusing messages that would not survive verification
pub fn sign_msg_checked(private_key: &RsaPrivateKey, message: &str) -> Result<Vec<RsaBigInt>> {
    check_message_fits(private_key, message)?;
    Ok(sign_msg(private_key, message))
}
