//! Transaction assembly pipeline.
//!
//! State machine of a transaction under construction:
//!
//! ```text
//! Empty -> HasHeader -> HasManifest (= intent ready)
//!       -> Signing(0..N signatures) -> Notarized -> Compiled
//! ```
//!
//! `Notarized` and `Compiled` are terminal and immutable; no transition
//! removes a previously added signature.

mod builder;
mod compiled;
mod header;
mod manifest;
mod model;

pub use builder::{
    BoxFuture, HeaderStep, ManifestStep, NotarySource, SignatureSource, SignatureStep,
    TransactionBuilder,
};
pub use compiled::{CompiledIntent, CompiledNotarizedTransaction, CompiledSignedIntent};
pub use header::TransactionHeader;
pub use manifest::{Instructions, TransactionManifest};
pub use model::{Intent, NotarizedTransaction, SignedIntent};
