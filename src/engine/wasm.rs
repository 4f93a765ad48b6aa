//! `WasmEngine`: the typed facade over a live engine module.
//!
//! Each operation builds its request shape, runs one exchange through the
//! boundary host, and classifies the response by its `kind` discriminant:
//! the two reserved error tags become [`Error::EngineInvocation`] with the
//! serialized request and response embedded; everything else is cast to
//! the operation's success shape. Success payloads are not validated
//! beyond that cast — a payload that fails the cast surfaces as a decode
//! error.

use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::crypto::PublicKey;
use crate::error::{DecodeError, Error, Result};
use crate::hash::Hash;
use crate::host::BoundaryHost;
use crate::transaction::{Intent, NotarizedTransaction, SignedIntent};

use super::requests::{
    AnalyzeTransactionRequest, CompileResponse, DecompileRequest,
    DeriveVirtualAccountAddressRequest, DeriveVirtualAccountAddressResponse, HashResponse,
    InformationRequest, StaticallyValidateRequest, StaticallyValidateResponse,
};
use super::{BuildInformation, Engine, StaticValidity, TransactionSummary, ValidationConfig};

/// Response discriminants the module uses to report invocation failure.
const ERROR_KINDS: [&str; 2] = ["InvocationHandlingError", "InvocationInterpretationError"];

/// Typed facade over one instantiated engine module.
///
/// The module has a single linear memory and allocator, so calls against
/// one instance must never overlap; the internal mutex serializes them.
/// Callers wanting parallelism use independent instances.
pub struct WasmEngine {
    host: Mutex<BoundaryHost>,
}

impl WasmEngine {
    /// Instantiate the engine module from its binary.
    pub fn new(module_bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_host(BoundaryHost::new(module_bytes)?))
    }

    /// Wrap an already instantiated boundary host.
    pub fn from_host(host: BoundaryHost) -> Self {
        Self {
            host: Mutex::new(host),
        }
    }

    fn invoke<R, T>(&self, function: &'static str, request: &R) -> Result<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = {
            let mut host = self.host.lock().unwrap_or_else(PoisonError::into_inner);
            host.call(request, function)?
        };
        if let Some(kind) = response.get("kind").and_then(serde_json::Value::as_str) {
            if ERROR_KINDS.contains(&kind) {
                return Err(Error::EngineInvocation {
                    function,
                    request: serde_json::to_string(request)
                        .unwrap_or_else(|_| "<unserializable>".to_string()),
                    response: response.to_string(),
                });
            }
        }
        serde_json::from_value(response).map_err(|e| Error::Decode(DecodeError::Json(e)))
    }
}

impl Engine for WasmEngine {
    fn build_information(&self) -> Result<BuildInformation> {
        self.invoke("information", &InformationRequest {})
    }

    fn intent_hash(&self, intent: &Intent) -> Result<Hash> {
        let response: HashResponse = self.invoke("hash_transaction_intent", intent)?;
        Ok(response.hash)
    }

    fn signed_intent_hash(&self, signed_intent: &SignedIntent) -> Result<Hash> {
        let response: HashResponse = self.invoke("hash_signed_transaction_intent", signed_intent)?;
        Ok(response.hash)
    }

    fn notarized_transaction_hash(&self, transaction: &NotarizedTransaction) -> Result<Hash> {
        let response: HashResponse = self.invoke("hash_notarized_transaction", transaction)?;
        Ok(response.hash)
    }

    fn compile_intent(&self, intent: &Intent) -> Result<Vec<u8>> {
        let response: CompileResponse = self.invoke("compile_transaction_intent", intent)?;
        Ok(response.compiled)
    }

    fn compile_signed_intent(&self, signed_intent: &SignedIntent) -> Result<Vec<u8>> {
        let response: CompileResponse =
            self.invoke("compile_signed_transaction_intent", signed_intent)?;
        Ok(response.compiled)
    }

    fn compile_notarized_transaction(&self, transaction: &NotarizedTransaction) -> Result<Vec<u8>> {
        let response: CompileResponse =
            self.invoke("compile_notarized_transaction", transaction)?;
        Ok(response.compiled)
    }

    fn decompile_intent(&self, compiled: &[u8]) -> Result<Intent> {
        self.invoke("decompile_transaction_intent", &DecompileRequest { compiled })
    }

    fn decompile_signed_intent(&self, compiled: &[u8]) -> Result<SignedIntent> {
        self.invoke(
            "decompile_signed_transaction_intent",
            &DecompileRequest { compiled },
        )
    }

    fn decompile_notarized_transaction(&self, compiled: &[u8]) -> Result<NotarizedTransaction> {
        self.invoke(
            "decompile_notarized_transaction",
            &DecompileRequest { compiled },
        )
    }

    fn derive_virtual_account_address(
        &self,
        network_id: u8,
        public_key: &PublicKey,
    ) -> Result<String> {
        let response: DeriveVirtualAccountAddressResponse = self.invoke(
            "derive_virtual_account_address",
            &DeriveVirtualAccountAddressRequest {
                network_id,
                public_key,
            },
        )?;
        Ok(response.virtual_account_address)
    }

    fn statically_validate(
        &self,
        compiled: &[u8],
        config: &ValidationConfig,
    ) -> Result<StaticValidity> {
        let response: StaticallyValidateResponse = self.invoke(
            "statically_validate_transaction",
            &StaticallyValidateRequest {
                compiled_notarized_transaction: compiled,
                validation_config: config,
            },
        )?;
        Ok(match response {
            StaticallyValidateResponse::Valid => StaticValidity::valid(),
            StaticallyValidateResponse::Invalid { error } => StaticValidity::invalid(error),
        })
    }

    fn analyze_transaction(&self, compiled: &[u8], network_id: u8) -> Result<TransactionSummary> {
        self.invoke(
            "analyze_transaction",
            &AnalyzeTransactionRequest {
                compiled_notarized_transaction: compiled,
                network_id,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Same canned-response module as the host tests, seen through the
    /// typed facade.
    const TEST_MODULE: &str = r#"
        (module
          (memory (export "memory") 1)
          (global $bump (mut i32) (i32.const 4096))
          (func (export "allocate") (param $capacity i32) (result i32)
            (local $pointer i32)
            global.get $bump
            local.set $pointer
            global.get $bump
            local.get $capacity
            i32.add
            global.set $bump
            local.get $pointer)
          (func (export "free") (param $pointer i32))
          (func (export "information") (param $request i32) (result i32)
            i32.const 1024)
          (func (export "hash_transaction_intent") (param $request i32) (result i32)
            i32.const 1280)
          (data (i32.const 1024) "{\22version\22:\221.0.0\22}\00")
          (data (i32.const 1280) "{\22kind\22:\22InvocationInterpretationError\22,\22error\22:\22unexpected field\22}\00"))
    "#;

    fn engine() -> WasmEngine {
        WasmEngine::new(TEST_MODULE.as_bytes()).unwrap()
    }

    fn intent_fixture() -> Intent {
        use crate::crypto::Ed25519PrivateKey;
        use crate::transaction::{TransactionHeader, TransactionManifest};
        Intent::new(
            TransactionHeader {
                network_id: 1,
                start_epoch_inclusive: 0,
                end_epoch_exclusive: 10,
                nonce: 1,
                notary_public_key: Ed25519PrivateKey::from_slice(&[1u8; 32])
                    .unwrap()
                    .public_key()
                    .into(),
                notary_is_signatory: false,
                tip_percentage: 0,
            },
            TransactionManifest::from_string(""),
        )
    }

    #[test]
    fn test_success_response_is_typed() {
        let information = engine().build_information().unwrap();
        assert_eq!(information.version, "1.0.0");
    }

    #[test]
    fn test_error_kind_is_classified() {
        let err = engine().intent_hash(&intent_fixture()).unwrap_err();
        match err {
            Error::EngineInvocation {
                function,
                request,
                response,
            } => {
                assert_eq!(function, "hash_transaction_intent");
                assert!(request.contains("network_id"));
                assert!(response.contains("InvocationInterpretationError"));
            }
            other => panic!("expected EngineInvocation, got {other:?}"),
        }
    }
}
