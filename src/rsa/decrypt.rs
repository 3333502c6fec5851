// RSA Decryption and Verification

use super::bigint::RsaBigInt;
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use super::transform::transform_values;

/// Decrypt a ciphertext with a private key back into a string
pub fn decrypt_msg(private_key: &RsaPrivateKey, ciphertext: &[RsaBigInt]) -> String {
    transform_values(private_key, ciphertext)
}

/// Recover the signed message from a signature with the signer's public key
pub fn verify_msg(public_key: &RsaPublicKey, signature: &[RsaBigInt]) -> String {
    transform_values(public_key, signature)
}
