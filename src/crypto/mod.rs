//! Cryptographic value objects for the two supported curve families.
//!
//! All keys and signatures are fixed-length byte values validated exactly
//! on construction and carried on the wire as lowercase hex strings inside
//! `kind`-tagged unions. Signing happens entirely on this side of the
//! module boundary; only hashing crosses it.
//!
//! Curve shapes:
//!
//! | curve     | private | public          | signature            |
//! |-----------|---------|-----------------|----------------------|
//! | secp256k1 | 32      | 33 (compressed) | 65 (recovery ‖ r ‖ s)|
//! | ed25519   | 32      | 32              | 64                   |
//!
//! A secp256k1 signature embeds a recovery id, so the signer's public key
//! can be recovered from the signature and message hash; an ed25519
//! signature cannot, which is why [`SignatureWithPublicKey::Ed25519`]
//! carries the public key alongside the signature.

mod ed25519;
mod secp256k1;

pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};
pub use secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey, Secp256k1Signature};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::Hash;

/// Defines a fixed-length byte value object: exact-length construction,
/// lowercase-hex round-trip, and hex-string serde.
macro_rules! byte_value_object {
    ($(#[$meta:meta])* $name:ident, $len:expr, $entity:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Exact byte length of this value.
            pub const LENGTH: usize = $len;

            /// Wrap raw bytes of the exact length.
            pub fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Construct from a slice, validating the length exactly.
            pub fn from_slice(bytes: &[u8]) -> crate::error::Result<Self> {
                let array: [u8; $len] =
                    bytes
                        .try_into()
                        .map_err(|_| crate::error::Error::InvalidLength {
                            entity: $entity,
                            expected: $len,
                            actual: bytes.len(),
                        })?;
                Ok(Self(array))
            }

            /// Construct from a lowercase hex string.
            pub fn from_hex(hex_str: &str) -> crate::error::Result<Self> {
                let bytes = hex::decode(hex_str).map_err(|e| crate::error::Error::InvalidHex {
                    entity: $entity,
                    message: e.to_string(),
                })?;
                Self::from_slice(&bytes)
            }

            /// Lowercase hex encoding, no prefix.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_hex())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let text = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&text).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}
pub(crate) use byte_value_object;

/// The two supported curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    Secp256k1,
    Ed25519,
}

/// A curve-tagged public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PublicKey {
    Secp256k1 { public_key: Secp256k1PublicKey },
    Ed25519 { public_key: Ed25519PublicKey },
}

impl PublicKey {
    pub fn curve(&self) -> Curve {
        match self {
            Self::Secp256k1 { .. } => Curve::Secp256k1,
            Self::Ed25519 { .. } => Curve::Ed25519,
        }
    }

    /// Raw key bytes regardless of curve.
    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            Self::Secp256k1 { public_key } => public_key.as_ref(),
            Self::Ed25519 { public_key } => public_key.as_ref(),
        }
    }

    /// Verify a signature over a 32-byte message hash. Curve mismatch
    /// between key and signature verifies as false.
    pub fn verify(&self, hash: &Hash, signature: &Signature) -> bool {
        match (self, signature) {
            (Self::Secp256k1 { public_key }, Signature::Secp256k1 { signature }) => {
                public_key.verify(hash, signature)
            }
            (Self::Ed25519 { public_key }, Signature::Ed25519 { signature }) => {
                public_key.verify(hash, signature)
            }
            _ => false,
        }
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(public_key: Secp256k1PublicKey) -> Self {
        Self::Secp256k1 { public_key }
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(public_key: Ed25519PublicKey) -> Self {
        Self::Ed25519 { public_key }
    }
}

/// A curve-tagged signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Signature {
    Secp256k1 { signature: Secp256k1Signature },
    Ed25519 { signature: Ed25519Signature },
}

impl Signature {
    pub fn curve(&self) -> Curve {
        match self {
            Self::Secp256k1 { .. } => Curve::Secp256k1,
            Self::Ed25519 { .. } => Curve::Ed25519,
        }
    }
}

/// A signature plus whatever is needed to identify the signer.
///
/// The secp256k1 variant carries no explicit key: the recovery id inside
/// the signature identifies the signer given the message hash. The
/// ed25519 variant must carry the public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SignatureWithPublicKey {
    Secp256k1 {
        signature: Secp256k1Signature,
    },
    Ed25519 {
        signature: Ed25519Signature,
        public_key: Ed25519PublicKey,
    },
}

impl SignatureWithPublicKey {
    pub fn curve(&self) -> Curve {
        match self {
            Self::Secp256k1 { .. } => Curve::Secp256k1,
            Self::Ed25519 { .. } => Curve::Ed25519,
        }
    }

    /// The bare curve-tagged signature.
    pub fn signature(&self) -> Signature {
        match self {
            Self::Secp256k1 { signature } => Signature::Secp256k1 {
                signature: *signature,
            },
            Self::Ed25519 { signature, .. } => Signature::Ed25519 {
                signature: *signature,
            },
        }
    }

    /// The explicit public key, when the variant carries one.
    pub fn public_key(&self) -> Option<PublicKey> {
        match self {
            Self::Secp256k1 { .. } => None,
            Self::Ed25519 { public_key, .. } => Some((*public_key).into()),
        }
    }
}

/// A curve-tagged private key.
#[derive(Clone)]
pub enum PrivateKey {
    Secp256k1(Secp256k1PrivateKey),
    Ed25519(Ed25519PrivateKey),
}

impl PrivateKey {
    pub fn curve(&self) -> Curve {
        match self {
            Self::Secp256k1(_) => Curve::Secp256k1,
            Self::Ed25519(_) => Curve::Ed25519,
        }
    }

    /// The corresponding curve-tagged public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Secp256k1(key) => key.public_key().into(),
            Self::Ed25519(key) => key.public_key().into(),
        }
    }

    /// Sign a 32-byte message hash, returning the bare signature.
    /// Deterministic: the same key and hash always produce the same bytes.
    pub fn sign(&self, hash: &Hash) -> Result<Signature> {
        Ok(match self {
            Self::Secp256k1(key) => Signature::Secp256k1 {
                signature: key.sign(hash)?,
            },
            Self::Ed25519(key) => Signature::Ed25519 {
                signature: key.sign(hash)?,
            },
        })
    }

    /// Sign a 32-byte message hash, returning a signature that identifies
    /// the signer.
    pub fn sign_with_public_key(&self, hash: &Hash) -> Result<SignatureWithPublicKey> {
        Ok(match self {
            Self::Secp256k1(key) => SignatureWithPublicKey::Secp256k1 {
                signature: key.sign(hash)?,
            },
            Self::Ed25519(key) => SignatureWithPublicKey::Ed25519 {
                signature: key.sign(hash)?,
                public_key: key.public_key(),
            },
        })
    }
}

impl From<Secp256k1PrivateKey> for PrivateKey {
    fn from(key: Secp256k1PrivateKey) -> Self {
        Self::Secp256k1(key)
    }
}

impl From<Ed25519PrivateKey> for PrivateKey {
    fn from(key: Ed25519PrivateKey) -> Self {
        Self::Ed25519(key)
    }
}
