//! Compiled transaction forms.
//!
//! Each compiled form carries the identifying hashes captured when it was
//! compiled, so no hash is ever recomputed afterwards.

use crate::engine::{Engine, StaticValidity, TransactionSummary, ValidationConfig};
use crate::error::Result;
use crate::hash::Hash;

use super::model::{Intent, NotarizedTransaction, SignedIntent};

/// Byte encoding of an [`Intent`] plus its intent hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledIntent {
    payload: Vec<u8>,
    intent_hash: Hash,
}

impl CompiledIntent {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    /// The intent hash (transaction id).
    pub fn intent_hash(&self) -> Hash {
        self.intent_hash
    }
}

/// Byte encoding of a [`SignedIntent`] plus both of its hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSignedIntent {
    payload: Vec<u8>,
    intent_hash: Hash,
    signed_intent_hash: Hash,
}

impl CompiledSignedIntent {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    pub fn intent_hash(&self) -> Hash {
        self.intent_hash
    }

    pub fn signed_intent_hash(&self) -> Hash {
        self.signed_intent_hash
    }
}

/// Byte encoding of a [`NotarizedTransaction`] plus all three hashes.
/// This is the unit submitted to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledNotarizedTransaction {
    payload: Vec<u8>,
    intent_hash: Hash,
    signed_intent_hash: Hash,
    notarized_payload_hash: Hash,
}

impl CompiledNotarizedTransaction {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    /// The intent hash (transaction id).
    pub fn intent_hash(&self) -> Hash {
        self.intent_hash
    }

    pub fn signed_intent_hash(&self) -> Hash {
        self.signed_intent_hash
    }

    pub fn notarized_payload_hash(&self) -> Hash {
        self.notarized_payload_hash
    }

    /// Reconstruct the structured form from the compiled bytes.
    pub fn decompile(&self, engine: &impl Engine) -> Result<NotarizedTransaction> {
        engine.decompile_notarized_transaction(&self.payload)
    }

    /// Static validation against the limits of `network_id`. Invalidity
    /// is reported as data; only transport failures are errors.
    pub fn statically_validate(
        &self,
        engine: &impl Engine,
        network_id: u8,
    ) -> Result<StaticValidity> {
        let config = ValidationConfig::for_network(network_id);
        engine.statically_validate(&self.payload, &config)
    }

    /// Fail-fast form of [`Self::statically_validate`].
    pub fn ensure_statically_valid(&self, engine: &impl Engine, network_id: u8) -> Result<()> {
        self.statically_validate(engine, network_id)?.ensure_valid()
    }

    /// Locked-fee, withdraw, and deposit information, keyed by account
    /// and resource address. Decompiles to learn the network id, then
    /// asks the engine for the analysis.
    pub fn summarize(&self, engine: &impl Engine) -> Result<TransactionSummary> {
        let transaction = self.decompile(engine)?;
        let network_id = transaction.signed_intent.intent.header.network_id;
        engine.analyze_transaction(&self.payload, network_id)
    }
}

impl Intent {
    /// Compile to bytes, capturing the intent hash.
    pub fn compile(&self, engine: &impl Engine) -> Result<CompiledIntent> {
        Ok(CompiledIntent {
            payload: engine.compile_intent(self)?,
            intent_hash: engine.intent_hash(self)?,
        })
    }
}

impl SignedIntent {
    /// Compile to bytes, capturing both hashes.
    pub fn compile(&self, engine: &impl Engine) -> Result<CompiledSignedIntent> {
        Ok(CompiledSignedIntent {
            payload: engine.compile_signed_intent(self)?,
            intent_hash: engine.intent_hash(&self.intent)?,
            signed_intent_hash: engine.signed_intent_hash(self)?,
        })
    }
}

impl NotarizedTransaction {
    /// Compile to bytes, capturing all three hashes.
    pub fn compile(&self, engine: &impl Engine) -> Result<CompiledNotarizedTransaction> {
        Ok(CompiledNotarizedTransaction {
            payload: engine.compile_notarized_transaction(self)?,
            intent_hash: engine.intent_hash(&self.signed_intent.intent)?,
            signed_intent_hash: engine.signed_intent_hash(&self.signed_intent)?,
            notarized_payload_hash: engine.notarized_transaction_hash(self)?,
        })
    }
}
