//! engine-toolkit: host-side toolkit for a WASM ledger engine.
//!
//! The engine module performs compilation, hashing, and validation; this
//! crate is everything on the host side of that boundary:
//!
//! 1. **Wire codec** (`wire`) - NUL-terminated UTF-8 JSON payloads.
//! 2. **Boundary host** (`host`) - owns the module's linear memory and
//!    implements the generic allocate/write/invoke/read/free protocol.
//! 3. **Typed engine facade** (`engine`) - one method per operation
//!    (hash, compile, decompile, derive, validate, analyze), classifying
//!    error-shaped responses by their `kind` discriminant.
//! 4. **Cryptographic primitives** (`crypto`) - secp256k1 and ed25519
//!    keys and signatures with exact length validation; signing never
//!    crosses the boundary.
//! 5. **Transaction assembly** (`transaction`) - the staged builder from
//!    header and manifest through multi-signer signing and notarization
//!    to the compiled payload, with every hash derived by the engine.
//!
//! # Usage
//!
//! ```no_run
//! use engine_toolkit::{
//!     Ed25519PrivateKey, PrivateKey, TransactionBuilder, TransactionHeader,
//!     TransactionManifest, WasmEngine,
//! };
//!
//! # async fn assemble() -> engine_toolkit::Result<()> {
//! let engine = WasmEngine::new(&std::fs::read("engine.wasm").unwrap())?;
//! let signer = PrivateKey::Ed25519(Ed25519PrivateKey::from_slice(&[1u8; 32])?);
//! let notary = PrivateKey::Ed25519(Ed25519PrivateKey::from_slice(&[2u8; 32])?);
//!
//! let header = TransactionHeader {
//!     network_id: 2,
//!     start_epoch_inclusive: 100,
//!     end_epoch_exclusive: 110,
//!     nonce: 12,
//!     notary_public_key: notary.public_key(),
//!     notary_is_signatory: false,
//!     tip_percentage: 0,
//! };
//!
//! let transaction = TransactionBuilder::new()
//!     .header(header)
//!     .manifest(TransactionManifest::from_string("CALL_METHOD ...;"))
//!     .sign(&signer)
//!     .notarize(&engine, &notary)
//!     .await?;
//!
//! let compiled = transaction.compile(&engine)?;
//! compiled.ensure_statically_valid(&engine, 2)?;
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod engine;
mod error;
mod hash;
pub mod host;
pub mod transaction;
pub mod wire;

pub use crypto::{
    Curve, Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, PrivateKey, PublicKey,
    Secp256k1PrivateKey, Secp256k1PublicKey, Secp256k1Signature, Signature,
    SignatureWithPublicKey,
};
pub use engine::{
    BuildInformation, Engine, FeeLocks, StaticValidity, TransactionSummary, ValidationConfig,
    WasmEngine,
};
pub use error::{DecodeError, Error, Result};
pub use hash::Hash;
pub use host::BoundaryHost;
pub use transaction::{
    CompiledIntent, CompiledNotarizedTransaction, CompiledSignedIntent, Instructions, Intent,
    NotarizedTransaction, NotarySource, SignatureSource, SignedIntent, TransactionBuilder,
    TransactionHeader, TransactionManifest,
};
