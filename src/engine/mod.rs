//! Typed facade over the engine module.
//!
//! [`Engine`] is the seam the transaction pipeline consumes: one method
//! per supported operation, strongly typed on both sides. [`WasmEngine`]
//! implements it over a [`crate::host::BoundaryHost`]; tests substitute
//! deterministic implementations.

mod requests;
mod wasm;

pub use wasm::WasmEngine;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::transaction::{Intent, NotarizedTransaction, SignedIntent};
use crate::wire::decimal_str;

/// One method per engine operation.
pub trait Engine {
    /// Version information reported by the module.
    fn build_information(&self) -> Result<BuildInformation>;

    /// The intent hash (transaction id).
    fn intent_hash(&self, intent: &Intent) -> Result<Hash>;
    /// The signed-intent hash (what the notary signs).
    fn signed_intent_hash(&self, signed_intent: &SignedIntent) -> Result<Hash>;
    /// The notarized-payload hash.
    fn notarized_transaction_hash(&self, transaction: &NotarizedTransaction) -> Result<Hash>;

    fn compile_intent(&self, intent: &Intent) -> Result<Vec<u8>>;
    fn compile_signed_intent(&self, signed_intent: &SignedIntent) -> Result<Vec<u8>>;
    fn compile_notarized_transaction(&self, transaction: &NotarizedTransaction) -> Result<Vec<u8>>;

    fn decompile_intent(&self, compiled: &[u8]) -> Result<Intent>;
    fn decompile_signed_intent(&self, compiled: &[u8]) -> Result<SignedIntent>;
    fn decompile_notarized_transaction(&self, compiled: &[u8]) -> Result<NotarizedTransaction>;

    /// The virtual account address a public key controls on a network.
    fn derive_virtual_account_address(
        &self,
        network_id: u8,
        public_key: &PublicKey,
    ) -> Result<String>;

    /// Static validation of a compiled notarized transaction. Invalidity
    /// is reported as data, never as an error.
    fn statically_validate(
        &self,
        compiled: &[u8],
        config: &ValidationConfig,
    ) -> Result<StaticValidity>;

    /// Locked-fee, withdraw, and deposit information for a compiled
    /// notarized transaction.
    fn analyze_transaction(&self, compiled: &[u8], network_id: u8) -> Result<TransactionSummary>;
}

/// Module build information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInformation {
    pub version: String,
}

/// Largest compiled notarized payload the network accepts.
pub const MAX_NOTARIZED_PAYLOAD_SIZE: u64 = 1_048_576;
/// Widest epoch validity window the network accepts.
pub const MAX_EPOCH_RANGE: u64 = 8640;

/// Network-scoped limits used by static validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(with = "decimal_str")]
    pub network_id: u8,
    #[serde(with = "decimal_str")]
    pub max_notarized_payload_size: u64,
    #[serde(with = "decimal_str")]
    pub min_tip_percentage: u16,
    #[serde(with = "decimal_str")]
    pub max_tip_percentage: u16,
    #[serde(with = "decimal_str")]
    pub max_epoch_range: u64,
}

impl ValidationConfig {
    /// The default limits for a network.
    pub fn for_network(network_id: u8) -> Self {
        Self {
            network_id,
            max_notarized_payload_size: MAX_NOTARIZED_PAYLOAD_SIZE,
            min_tip_percentage: 0,
            max_tip_percentage: u16::MAX,
            max_epoch_range: MAX_EPOCH_RANGE,
        }
    }
}

/// Outcome of static validation, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticValidity {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl StaticValidity {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(error_message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(error_message.into()),
        }
    }

    /// Escalate invalidity into an error. No-op when valid.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.is_valid {
            return Ok(());
        }
        Err(Error::StaticallyInvalid {
            message: self
                .error_message
                .clone()
                .unwrap_or_else(|| "unspecified".to_string()),
        })
    }
}

/// Fee amounts locked by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeLocks {
    pub lock: Decimal,
    pub contingent_lock: Decimal,
}

/// Locked fees plus withdraw/deposit amounts keyed by account address,
/// then by resource address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub fee_locks: FeeLocks,
    pub withdraws: BTreeMap<String, BTreeMap<String, Decimal>>,
    pub deposits: BTreeMap<String, BTreeMap<String, Decimal>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_config_wire_shape() {
        let config = ValidationConfig::for_network(2);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["network_id"], "2");
        assert_eq!(value["max_notarized_payload_size"], "1048576");
        assert_eq!(value["max_tip_percentage"], "65535");
    }

    #[test]
    fn test_ensure_valid_behavior() {
        assert!(StaticValidity::valid().ensure_valid().is_ok());
        let err = StaticValidity::invalid("network id mismatch")
            .ensure_valid()
            .unwrap_err();
        assert!(matches!(err, Error::StaticallyInvalid { message } if message == "network id mismatch"));
    }

    #[test]
    fn test_summary_amounts_are_decimal_strings() {
        let mut summary = TransactionSummary::default();
        summary.fee_locks.lock = "10.5".parse().unwrap();
        summary
            .withdraws
            .entry("account_a".to_string())
            .or_default()
            .insert("resource_x".to_string(), "3.25".parse().unwrap());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["fee_locks"]["lock"], "10.5");
        assert_eq!(value["withdraws"]["account_a"]["resource_x"], "3.25");
    }
}
