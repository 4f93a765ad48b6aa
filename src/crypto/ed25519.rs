//! Ed25519 keys and signatures.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use super::byte_value_object;
use crate::error::{Error, Result};
use crate::hash::Hash;

byte_value_object!(
    /// A 32-byte ed25519 public key (compressed Edwards point).
    Ed25519PublicKey,
    32,
    "ed25519 public key"
);

byte_value_object!(
    /// A 64-byte ed25519 signature.
    Ed25519Signature,
    64,
    "ed25519 signature"
);

impl Ed25519PublicKey {
    /// Verify a signature over a 32-byte message hash. A key that does
    /// not decompress to a curve point verifies as false.
    pub fn verify(&self, hash: &Hash, signature: &Ed25519Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(self.as_bytes()) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        verifying_key.verify_strict(hash.as_ref(), &signature).is_ok()
    }
}

/// A 32-byte ed25519 private key (seed).
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    signing_key: SigningKey,
}

impl Ed25519PrivateKey {
    /// Exact byte length of a private key.
    pub const LENGTH: usize = 32;

    /// Construct from a slice, validating the length exactly.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let seed: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| Error::InvalidLength {
            entity: "ed25519 private key",
            expected: Self::LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Construct from a lowercase hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| Error::InvalidHex {
            entity: "ed25519 private key",
            message: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// The raw seed bytes.
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        self.signing_key.to_bytes()
    }

    /// The corresponding public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a 32-byte message hash. Deterministic per RFC 8032.
    pub fn sign(&self, hash: &Hash) -> Result<Ed25519Signature> {
        Ok(Ed25519Signature::new(
            self.signing_key.sign(hash.as_ref()).to_bytes(),
        ))
    }
}

impl core::fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Ed25519PrivateKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Ed25519PrivateKey {
        Ed25519PrivateKey::from_slice(&[0x29u8; 32]).unwrap()
    }

    #[test]
    fn test_private_key_length_validation() {
        let err = Ed25519PrivateKey::from_slice(&[0u8; 16]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: 32,
                actual: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_deterministic_public_key() {
        assert_eq!(key().public_key(), key().public_key());
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let public_key = key().public_key();
        assert_eq!(
            Ed25519PublicKey::from_hex(&public_key.to_hex()).unwrap(),
            public_key
        );
    }

    #[test]
    fn test_signature_length_validation() {
        let err = Ed25519Signature::from_slice(&[0u8; 65]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: 64,
                actual: 65,
                ..
            }
        ));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let hash = Hash::new([0x11u8; 32]);
        assert_eq!(key().sign(&hash).unwrap(), key().sign(&hash).unwrap());
    }

    #[test]
    fn test_sign_and_verify() {
        let hash = Hash::new([0x11u8; 32]);
        let signature = key().sign(&hash).unwrap();
        assert!(key().public_key().verify(&hash, &signature));
        assert!(!key()
            .public_key()
            .verify(&Hash::new([0x12u8; 32]), &signature));
    }
}
