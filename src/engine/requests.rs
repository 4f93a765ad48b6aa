//! Wire request/response shapes, one pair per engine operation.
//!
//! Responses are classified before deserialization: a `kind` field
//! matching one of the reserved error discriminants never reaches these
//! types (see [`super::wasm`]).

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::hash::Hash;
use crate::wire::{decimal_str, hex_bytes};

use super::ValidationConfig;

#[derive(Serialize)]
pub(super) struct InformationRequest {}

#[derive(Deserialize)]
pub(super) struct HashResponse {
    pub hash: Hash,
}

#[derive(Deserialize)]
pub(super) struct CompileResponse {
    #[serde(with = "hex_bytes")]
    pub compiled: Vec<u8>,
}

#[derive(Serialize)]
pub(super) struct DecompileRequest<'a> {
    #[serde(with = "hex_bytes")]
    pub compiled: &'a [u8],
}

#[derive(Serialize)]
pub(super) struct DeriveVirtualAccountAddressRequest<'a> {
    #[serde(with = "decimal_str")]
    pub network_id: u8,
    pub public_key: &'a PublicKey,
}

#[derive(Deserialize)]
pub(super) struct DeriveVirtualAccountAddressResponse {
    pub virtual_account_address: String,
}

#[derive(Serialize)]
pub(super) struct StaticallyValidateRequest<'a> {
    #[serde(with = "hex_bytes")]
    pub compiled_notarized_transaction: &'a [u8],
    pub validation_config: &'a ValidationConfig,
}

/// Success union for static validation. Any other `kind` fails loudly as
/// a decode error.
#[derive(Deserialize)]
#[serde(tag = "kind")]
pub(super) enum StaticallyValidateResponse {
    Valid,
    Invalid { error: String },
}

#[derive(Serialize)]
pub(super) struct AnalyzeTransactionRequest<'a> {
    #[serde(with = "hex_bytes")]
    pub compiled_notarized_transaction: &'a [u8],
    #[serde(with = "decimal_str")]
    pub network_id: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519PrivateKey;
    use serde_json::json;

    #[test]
    fn test_derive_request_shape() {
        let key = Ed25519PrivateKey::from_slice(&[3u8; 32]).unwrap();
        let public_key = key.public_key().into();
        let request = DeriveVirtualAccountAddressRequest {
            network_id: 34,
            public_key: &public_key,
        };
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["network_id"], json!("34"));
        assert_eq!(value["public_key"]["kind"], json!("Ed25519"));
    }

    #[test]
    fn test_statically_validate_response_union() {
        let valid: StaticallyValidateResponse =
            serde_json::from_value(json!({"kind": "Valid"})).unwrap();
        assert!(matches!(valid, StaticallyValidateResponse::Valid));

        let invalid: StaticallyValidateResponse =
            serde_json::from_value(json!({"kind": "Invalid", "error": "bad epoch window"}))
                .unwrap();
        assert!(
            matches!(invalid, StaticallyValidateResponse::Invalid { error } if error == "bad epoch window")
        );

        let unknown = serde_json::from_value::<StaticallyValidateResponse>(
            json!({"kind": "SomethingElse"}),
        );
        assert!(unknown.is_err());
    }
}
