//! 32-byte hash value object.
//!
//! Every hash the engine produces (intent hash, signed-intent hash,
//! notarized-payload hash) is a 32-byte digest, carried on the wire as a
//! lowercase hex string with no prefix.

use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A 32-byte hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; Hash::LENGTH]);

impl Hash {
    /// Byte length of every hash in the system.
    pub const LENGTH: usize = 32;

    /// Wrap raw hash bytes.
    pub fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a hash from a byte slice with length validation.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| Error::InvalidLength {
            entity: "hash",
            expected: Self::LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Create a hash from a lowercase hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| Error::InvalidHex {
            entity: "hash",
            message: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// Lowercase hex encoding, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Hash::from_hex(&hex_str).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let hex_str = "5b1665d2f5e9f1c6a8b0d4c3e2f1a0b9c8d7e6f5a4b3c2d1e0f9a8b7c6d5e4f3";
        let hash = Hash::from_hex(hex_str).unwrap();
        assert_eq!(hash.to_hex(), hex_str);
    }

    #[test]
    fn test_invalid_length() {
        let err = Hash::from_slice(&[0u8; 31]).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidLength {
                expected: 32,
                actual: 31,
                ..
            }
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let hash = Hash::new([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
