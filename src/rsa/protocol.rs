// Two-party message exchanges over a pair of RSA key pairs
// Each exchange returns every intermediate value so callers can display it

use rand::Rng;
use tracing::debug;

use super::bigint::RsaBigInt;
use super::codec::{parse_sequence, serialize_sequence};
use super::decrypt::{decrypt_msg, verify_msg};
use super::encrypt::{check_message_fits, encrypt_msg, sign_msg};
use super::keygen::{generate_keypair, RsaKeyPair};
use crate::error::Result;

/// Result of encrypting and then decrypting with one key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardExchange {
    pub ciphertext: Vec<RsaBigInt>,
    pub decrypted: String,
}

/// Result of signing and then verifying with one key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureExchange {
    pub signature: Vec<RsaBigInt>,
    pub verified: String,
}

/// Result of the sign-then-encrypt protocol between sender and receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedExchange {
    pub signature: Vec<RsaBigInt>,
    pub serialized: String,
    pub ciphertext: Vec<RsaBigInt>,
    pub recovered: String,
}

/// Key material for one run: the sender's and the receiver's key pairs
#[derive(Debug, Clone)]
pub struct Session {
    pub sender: RsaKeyPair,
    pub receiver: RsaKeyPair,
    /// Reject characters that do not fit below the modulus instead of
    /// silently corrupting them
    pub strict: bool,
}

/// Sign with the sender's private key, serialize, then encrypt for the receiver
pub fn sign_then_encrypt(
    sender: &RsaKeyPair,
    receiver: &RsaKeyPair,
    message: &str,
) -> (Vec<RsaBigInt>, String, Vec<RsaBigInt>) {
    let signature = sign_msg(&sender.private_key, message);
    let serialized = serialize_sequence(&signature);
    let ciphertext = encrypt_msg(&receiver.public_key, &serialized);
    debug!(
        chars = message.chars().count(),
        serialized_len = serialized.len(),
        "signed and encrypted message"
    );
    (signature, serialized, ciphertext)
}

/// Decrypt with the receiver's private key, parse, then verify with the
/// sender's public key
///
/// A ciphertext that does not decrypt to a well-formed integer list fails
/// with [`crate::error::RsaError::ProtocolParse`].
pub fn decrypt_then_verify(
    sender: &RsaKeyPair,
    receiver: &RsaKeyPair,
    ciphertext: &[RsaBigInt],
) -> Result<String> {
    let serialized = decrypt_msg(&receiver.private_key, ciphertext);
    let signature = parse_sequence(&serialized)?;
    debug!(fields = signature.len(), "decrypted signed message");
    Ok(verify_msg(&sender.public_key, &signature))
}

impl Session {
    pub fn new(sender: RsaKeyPair, receiver: RsaKeyPair) -> Self {
        Self {
            sender,
            receiver,
            strict: false,
        }
    }

    /// Generate independent sender and receiver key pairs of the same size
    pub fn generate<R: Rng + ?Sized>(bit_length: u32, rng: &mut R) -> Result<Self> {
        let sender = generate_keypair(bit_length, rng)?;
        let receiver = generate_keypair(bit_length, rng)?;
        Ok(Self::new(sender, receiver))
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Encrypt with the sender's public key, decrypt with its private key
    pub fn standard(&self, message: &str) -> Result<StandardExchange> {
        if self.strict {
            check_message_fits(&self.sender.public_key, message)?;
        }
        let ciphertext = encrypt_msg(&self.sender.public_key, message);
        let decrypted = decrypt_msg(&self.sender.private_key, &ciphertext);
        Ok(StandardExchange {
            ciphertext,
            decrypted,
        })
    }

    /// Sign with the sender's private key, verify with its public key
    pub fn signature(&self, message: &str) -> Result<SignatureExchange> {
        if self.strict {
            check_message_fits(&self.sender.private_key, message)?;
        }
        let signature = sign_msg(&self.sender.private_key, message);
        let verified = verify_msg(&self.sender.public_key, &signature);
        Ok(SignatureExchange {
            signature,
            verified,
        })
    }

    /// Full sign-then-encrypt from sender to receiver and back
    pub fn combined(&self, message: &str) -> Result<CombinedExchange> {
        if self.strict {
            check_message_fits(&self.sender.private_key, message)?;
        }
        let (signature, serialized, ciphertext) =
            sign_then_encrypt(&self.sender, &self.receiver, message);
        if self.strict {
            check_message_fits(&self.receiver.public_key, &serialized)?;
        }
        let recovered = decrypt_then_verify(&self.sender, &self.receiver, &ciphertext)?;
        Ok(CombinedExchange {
            signature,
            serialized,
            ciphertext,
            recovered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RsaError;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::{RsaPrivateKey, RsaPublicKey};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64, bits: u32) -> Session {
        Session::generate(bits, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_standard_exchange() {
        let session = session(30, 16);
        let exchange = session.standard("HI").unwrap();
        assert_eq!(exchange.ciphertext.len(), 2);
        assert_eq!(exchange.decrypted, "HI");
    }

    #[test]
    fn test_signature_exchange() {
        let session = session(31, 16);
        let exchange = session.signature("A").unwrap();
        assert_eq!(exchange.signature.len(), 1);
        assert_eq!(exchange.verified, "A");
    }

    #[test]
    fn test_combined_exchange() {
        let session = session(32, 16);
        let exchange = session.combined("Meet at noon").unwrap();

        assert_eq!(exchange.signature.len(), 12);
        assert_eq!(exchange.serialized, serialize_sequence(&exchange.signature));
        assert_eq!(exchange.ciphertext.len(), exchange.serialized.chars().count());
        assert_eq!(exchange.recovered, "Meet at noon");
    }

    #[test]
    fn test_combined_empty_message() {
        let session = session(33, 16);
        let exchange = session.combined("").unwrap();
        assert!(exchange.signature.is_empty());
        assert_eq!(exchange.serialized, "");
        assert_eq!(exchange.recovered, "");
    }

    #[test]
    fn test_sender_and_receiver_keys_differ() {
        let session = session(34, 16);
        assert_ne!(session.sender.public_key, session.receiver.public_key);
    }

    #[test]
    fn test_corrupted_transmission_is_parse_error() {
        let session = session(35, 16);
        let garbage = encrypt_msg(&session.receiver.public_key, "12,ab,3");
        let err = decrypt_then_verify(&session.sender, &session.receiver, &garbage).unwrap_err();
        assert!(matches!(err, RsaError::ProtocolParse { field: 1, .. }));
    }

    #[test]
    fn test_strict_mode_rejects_large_characters() {
        // n = 55 cannot hold 'A' (65)
        let small = RsaKeyPair {
            public_key: RsaPublicKey { e: from_u64(3), n: from_u64(55) },
            private_key: RsaPrivateKey { d: from_u64(27), n: from_u64(55) },
            bit_length: 6,
        };
        let lenient = Session::new(small.clone(), small.clone());
        assert!(lenient.standard("A").is_ok());

        let strict = lenient.with_strict(true);
        assert!(matches!(
            strict.standard("A"),
            Err(RsaError::CharacterOutOfRange { index: 0, code_point: 65, .. })
        ));
        assert!(strict.signature("A").is_err());
        assert!(strict.standard("#").is_ok());
    }
}
