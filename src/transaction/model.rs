//! Intent, signed intent, and notarized transaction.
//!
//! Lifecycle: an [`Intent`] is derived from a caller-supplied header and
//! manifest and never changes. A [`SignedIntent`] accumulates intent
//! signatures in append order during the signing stage (duplicates are
//! not deduplicated at this layer). A [`NotarizedTransaction`] is
//! terminal: after notarization only decompilation and static validation
//! apply.

use serde::{Deserialize, Serialize};

use crate::crypto::{Signature, SignatureWithPublicKey};
use crate::error::Result;
use crate::hash::Hash;

use super::header::TransactionHeader;
use super::manifest::TransactionManifest;

/// Header plus manifest. Its engine-derived hash is the transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub header: TransactionHeader,
    pub manifest: TransactionManifest,
}

impl Intent {
    pub fn new(header: TransactionHeader, manifest: TransactionManifest) -> Self {
        Self { header, manifest }
    }

    /// The intent hash (transaction id), derived by the engine.
    pub fn hash(&self, engine: &impl crate::engine::Engine) -> Result<Hash> {
        engine.intent_hash(self)
    }
}

/// Intent plus ordered intent signatures.
///
/// Intent signers sign the intent hash; the signed-intent hash (over
/// intent and all signatures) is what the notary signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedIntent {
    pub intent: Intent,
    pub intent_signatures: Vec<SignatureWithPublicKey>,
}

impl SignedIntent {
    pub fn new(intent: Intent, intent_signatures: Vec<SignatureWithPublicKey>) -> Self {
        Self {
            intent,
            intent_signatures,
        }
    }

    /// The signed-intent hash, derived by the engine.
    pub fn hash(&self, engine: &impl crate::engine::Engine) -> Result<Hash> {
        engine.signed_intent_hash(self)
    }
}

/// Signed intent plus the single notary signature. Terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotarizedTransaction {
    pub signed_intent: SignedIntent,
    pub notary_signature: Signature,
}

impl NotarizedTransaction {
    pub fn new(signed_intent: SignedIntent, notary_signature: Signature) -> Self {
        Self {
            signed_intent,
            notary_signature,
        }
    }

    /// The notarized-payload hash, derived by the engine.
    pub fn hash(&self, engine: &impl crate::engine::Engine) -> Result<Hash> {
        engine.notarized_transaction_hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519PrivateKey, PrivateKey, Secp256k1PrivateKey};
    use crate::transaction::TransactionManifest;

    fn header() -> TransactionHeader {
        TransactionHeader {
            network_id: 1,
            start_epoch_inclusive: 0,
            end_epoch_exclusive: 100,
            nonce: 7,
            notary_public_key: Secp256k1PrivateKey::from_slice(&[6u8; 32])
                .unwrap()
                .public_key()
                .into(),
            notary_is_signatory: false,
            tip_percentage: 0,
        }
    }

    #[test]
    fn test_notarized_transaction_serde_roundtrip() {
        let hash = Hash::new([0u8; 32]);
        let signer = PrivateKey::Ed25519(Ed25519PrivateKey::from_slice(&[2u8; 32]).unwrap());
        let notary = PrivateKey::Secp256k1(Secp256k1PrivateKey::from_slice(&[6u8; 32]).unwrap());

        let intent = Intent::new(header(), TransactionManifest::from_string("CLEAR;"));
        let signed = SignedIntent::new(
            intent,
            vec![signer.sign_with_public_key(&hash).unwrap()],
        );
        let notarized = NotarizedTransaction::new(signed, notary.sign(&hash).unwrap());

        let json = serde_json::to_string(&notarized).unwrap();
        let back: NotarizedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notarized);
    }

    #[test]
    fn test_signature_order_is_preserved_in_wire_form() {
        let hash = Hash::new([1u8; 32]);
        let keys: Vec<PrivateKey> = (1u8..=3)
            .map(|seed| PrivateKey::Ed25519(Ed25519PrivateKey::from_slice(&[seed; 32]).unwrap()))
            .collect();
        let signatures: Vec<_> = keys
            .iter()
            .map(|k| k.sign_with_public_key(&hash).unwrap())
            .collect();

        let intent = Intent::new(header(), TransactionManifest::from_string(""));
        let signed = SignedIntent::new(intent, signatures.clone());
        let value = serde_json::to_value(&signed).unwrap();
        let wire_signatures = value["intent_signatures"].as_array().unwrap();
        assert_eq!(wire_signatures.len(), 3);
        for (wire, original) in wire_signatures.iter().zip(&signatures) {
            assert_eq!(wire, &serde_json::to_value(original).unwrap());
        }
    }
}
