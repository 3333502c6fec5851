// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod protocol;
pub mod transform;

pub use codec::{parse_sequence, serialize_sequence};
pub use decrypt::{decrypt_msg, verify_msg};
pub use encrypt::{encrypt_msg, encrypt_msg_checked, sign_msg, sign_msg_checked};
pub use keygen::{generate_keypair, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use protocol::{decrypt_then_verify, sign_then_encrypt, Session};
pub use transform::TransformKey;
