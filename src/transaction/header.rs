//! Transaction header.

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::wire::decimal_str;

/// Immutable header of a transaction intent.
///
/// Numeric fields travel as decimal strings on the wire so JSON consumers
/// outside this crate never lose precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Numeric network identifier.
    #[serde(with = "decimal_str")]
    pub network_id: u8,
    /// First epoch (inclusive) at which the transaction is valid.
    #[serde(with = "decimal_str")]
    pub start_epoch_inclusive: u64,
    /// First epoch (exclusive) at which the transaction is no longer valid.
    #[serde(with = "decimal_str")]
    pub end_epoch_exclusive: u64,
    /// Caller-chosen nonce distinguishing otherwise identical intents.
    #[serde(with = "decimal_str")]
    pub nonce: u32,
    /// Public key of the notary.
    pub notary_public_key: PublicKey,
    /// Whether the notary's signature also counts as an intent signature.
    pub notary_is_signatory: bool,
    /// Tip percentage paid to validators.
    #[serde(with = "decimal_str")]
    pub tip_percentage: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519PrivateKey;
    use serde_json::json;

    #[test]
    fn test_wire_shape_uses_decimal_strings() {
        let notary = Ed25519PrivateKey::from_slice(&[1u8; 32]).unwrap();
        let header = TransactionHeader {
            network_id: 242,
            start_epoch_inclusive: 10,
            end_epoch_exclusive: 20,
            nonce: 4_000_000_000,
            notary_public_key: notary.public_key().into(),
            notary_is_signatory: true,
            tip_percentage: 5,
        };
        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["network_id"], json!("242"));
        assert_eq!(value["start_epoch_inclusive"], json!("10"));
        assert_eq!(value["end_epoch_exclusive"], json!("20"));
        assert_eq!(value["nonce"], json!("4000000000"));
        assert_eq!(value["tip_percentage"], json!("5"));
        assert_eq!(value["notary_is_signatory"], json!(true));

        let back: TransactionHeader = serde_json::from_value(value).unwrap();
        assert_eq!(back, header);
    }
}
