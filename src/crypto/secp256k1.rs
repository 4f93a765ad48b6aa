//! secp256k1 (ECDSA) keys and recoverable signatures.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use super::byte_value_object;
use crate::error::{Error, Result};
use crate::hash::Hash;

byte_value_object!(
    /// A 33-byte compressed secp256k1 public key.
    Secp256k1PublicKey,
    33,
    "secp256k1 public key"
);

byte_value_object!(
    /// A 65-byte recoverable secp256k1 signature: recovery id byte
    /// followed by `r ‖ s`.
    Secp256k1Signature,
    65,
    "secp256k1 signature"
);

impl Secp256k1Signature {
    /// The recovery id byte.
    pub fn recovery_id(&self) -> u8 {
        self.as_bytes()[0]
    }
}

impl Secp256k1PublicKey {
    /// Verify a recoverable signature over a 32-byte message hash by
    /// recovering the signer key and comparing it to this one.
    pub fn verify(&self, hash: &Hash, signature: &Secp256k1Signature) -> bool {
        let bytes = signature.as_bytes();
        let Some(recovery_id) = RecoveryId::from_byte(bytes[0]) else {
            return false;
        };
        let Ok(parsed) = EcdsaSignature::from_slice(&bytes[1..]) else {
            return false;
        };
        let Ok(recovered) = VerifyingKey::recover_from_prehash(hash.as_bytes(), &parsed, recovery_id)
        else {
            return false;
        };
        recovered.to_encoded_point(true).as_bytes() == self.as_bytes().as_slice()
    }
}

/// A 32-byte secp256k1 private key.
#[derive(Clone)]
pub struct Secp256k1PrivateKey {
    signing_key: SigningKey,
}

impl Secp256k1PrivateKey {
    /// Exact byte length of a private key.
    pub const LENGTH: usize = 32;

    /// Construct from a slice, validating length and scalar range.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LENGTH {
            return Err(Error::InvalidLength {
                entity: "secp256k1 private key",
                expected: Self::LENGTH,
                actual: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|e| Error::Curve {
            curve: "secp256k1",
            message: e.to_string(),
        })?;
        Ok(Self { signing_key })
    }

    /// Construct from a lowercase hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| Error::InvalidHex {
            entity: "secp256k1 private key",
            message: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// The raw private key bytes.
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        self.signing_key.to_bytes().into()
    }

    /// The compressed public key.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let point = self.signing_key.verifying_key().to_encoded_point(true);
        let mut bytes = [0u8; Secp256k1PublicKey::LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        Secp256k1PublicKey::new(bytes)
    }

    /// Sign a 32-byte message hash (deterministic, RFC 6979), producing a
    /// recoverable signature.
    pub fn sign(&self, hash: &Hash) -> Result<Secp256k1Signature> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash.as_bytes())
            .map_err(|e| Error::Curve {
                curve: "secp256k1",
                message: e.to_string(),
            })?;
        let mut bytes = [0u8; Secp256k1Signature::LENGTH];
        bytes[0] = recovery_id.to_byte();
        bytes[1..].copy_from_slice(signature.to_bytes().as_slice());
        Ok(Secp256k1Signature::new(bytes))
    }
}

impl core::fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Secp256k1PrivateKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Secp256k1PrivateKey {
        Secp256k1PrivateKey::from_slice(&[0x17u8; 32]).unwrap()
    }

    #[test]
    fn test_private_key_length_validation() {
        let err = Secp256k1PrivateKey::from_slice(&[0u8; 31]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: 32,
                actual: 31,
                ..
            }
        ));
        assert!(Secp256k1PrivateKey::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let err = Secp256k1PrivateKey::from_slice(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, Error::Curve { curve: "secp256k1", .. }));
    }

    #[test]
    fn test_public_key_is_compressed() {
        let public_key = key().public_key();
        assert!(matches!(public_key.as_bytes()[0], 0x02 | 0x03));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let public_key = key().public_key();
        let hex_str = public_key.to_hex();
        assert_eq!(Secp256k1PublicKey::from_hex(&hex_str).unwrap(), public_key);
        assert_eq!(hex_str, hex_str.to_lowercase());
    }

    #[test]
    fn test_signature_length_validation() {
        let err = Secp256k1Signature::from_slice(&[0u8; 64]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: 65,
                actual: 64,
                ..
            }
        ));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let hash = Hash::new([0x42u8; 32]);
        let first = key().sign(&hash).unwrap();
        let second = key().sign(&hash).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sign_and_verify() {
        let hash = Hash::new([0x42u8; 32]);
        let signature = key().sign(&hash).unwrap();
        assert!(key().public_key().verify(&hash, &signature));

        let other = Secp256k1PrivateKey::from_slice(&[0x18u8; 32]).unwrap();
        assert!(!other.public_key().verify(&hash, &signature));
    }

    #[test]
    fn test_recovery_id_embedded() {
        let hash = Hash::new([0x42u8; 32]);
        let signature = key().sign(&hash).unwrap();
        assert!(signature.recovery_id() <= 3);
    }
}
