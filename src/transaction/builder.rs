//! Staged transaction builder.
//!
//! Construction order is encoded in the types: each stage exposes only
//! the next legal operations, so a manifest cannot precede a header and
//! notarization cannot precede the signing stage.
//!
//! ```text
//! TransactionBuilder::new()
//!     .header(..)      -> ManifestStep
//!     .manifest(..)    -> SignatureStep   (intent is now fixed)
//!     .sign(..)*                          (appends, never overwrites)
//!     .notarize(..)    -> NotarizedTransaction
//! ```
//!
//! Signature sources form a closed set: a precomputed value, a
//! synchronous function of the hash to sign, or an asynchronous one.
//! During notarization all intent-signature sources are resolved
//! strictly in append order before the signed-intent hash is computed;
//! the notary source is then resolved with that hash. A failing source
//! aborts the whole notarization.

use std::future::Future;
use std::pin::Pin;

use crate::crypto::{PrivateKey, Signature, SignatureWithPublicKey};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::hash::Hash;

use super::header::TransactionHeader;
use super::manifest::TransactionManifest;
use super::model::{Intent, NotarizedTransaction, SignedIntent};

/// Boxed future used by asynchronous signature sources.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Map a source failure to `SignatureResolution`, leaving errors that
/// already are one untouched so the original message survives.
fn as_resolution_failure(error: Error) -> Error {
    match error {
        Error::SignatureResolution { .. } => error,
        other => Error::SignatureResolution {
            message: other.to_string(),
        },
    }
}

type SignerFn = Box<dyn FnOnce(&Hash) -> Result<SignatureWithPublicKey> + Send>;
type AsyncSignerFn = Box<dyn FnOnce(Hash) -> BoxFuture<Result<SignatureWithPublicKey>> + Send>;
type NotaryFn = Box<dyn FnOnce(&Hash) -> Result<Signature> + Send>;
type AsyncNotaryFn = Box<dyn FnOnce(Hash) -> BoxFuture<Result<Signature>> + Send>;

/// A source of one intent signature, resolved with the intent hash.
pub enum SignatureSource {
    /// A precomputed signature.
    Literal(SignatureWithPublicKey),
    /// A synchronous signing function.
    Signer(SignerFn),
    /// An asynchronous signing function (e.g. a remote signer).
    AsyncSigner(AsyncSignerFn),
}

impl SignatureSource {
    /// Source from a synchronous signing function.
    pub fn from_fn(
        signer: impl FnOnce(&Hash) -> Result<SignatureWithPublicKey> + Send + 'static,
    ) -> Self {
        Self::Signer(Box::new(signer))
    }

    /// Source from an asynchronous signing function.
    pub fn from_async_fn<F, Fut>(signer: F) -> Self
    where
        F: FnOnce(Hash) -> Fut + Send + 'static,
        Fut: Future<Output = Result<SignatureWithPublicKey>> + Send + 'static,
    {
        Self::AsyncSigner(Box::new(move |hash| {
            Box::pin(signer(hash)) as BoxFuture<Result<SignatureWithPublicKey>>
        }))
    }

    async fn resolve(self, hash: &Hash) -> Result<SignatureWithPublicKey> {
        let resolved = match self {
            Self::Literal(signature) => Ok(signature),
            Self::Signer(signer) => signer(hash),
            Self::AsyncSigner(signer) => signer(*hash).await,
        };
        resolved.map_err(as_resolution_failure)
    }
}

impl From<SignatureWithPublicKey> for SignatureSource {
    fn from(signature: SignatureWithPublicKey) -> Self {
        Self::Literal(signature)
    }
}

impl From<&PrivateKey> for SignatureSource {
    fn from(key: &PrivateKey) -> Self {
        let key = key.clone();
        Self::from_fn(move |hash| key.sign_with_public_key(hash))
    }
}

/// The source of the single notary signature, resolved with the
/// signed-intent hash.
pub enum NotarySource {
    Literal(Signature),
    Signer(NotaryFn),
    AsyncSigner(AsyncNotaryFn),
}

impl NotarySource {
    /// Source from a synchronous signing function.
    pub fn from_fn(signer: impl FnOnce(&Hash) -> Result<Signature> + Send + 'static) -> Self {
        Self::Signer(Box::new(signer))
    }

    /// Source from an asynchronous signing function.
    pub fn from_async_fn<F, Fut>(signer: F) -> Self
    where
        F: FnOnce(Hash) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Signature>> + Send + 'static,
    {
        Self::AsyncSigner(Box::new(move |hash| {
            Box::pin(signer(hash)) as BoxFuture<Result<Signature>>
        }))
    }

    async fn resolve(self, hash: &Hash) -> Result<Signature> {
        let resolved = match self {
            Self::Literal(signature) => Ok(signature),
            Self::Signer(signer) => signer(hash),
            Self::AsyncSigner(signer) => signer(*hash).await,
        };
        resolved.map_err(as_resolution_failure)
    }
}

impl From<Signature> for NotarySource {
    fn from(signature: Signature) -> Self {
        Self::Literal(signature)
    }
}

impl From<&PrivateKey> for NotarySource {
    fn from(key: &PrivateKey) -> Self {
        let key = key.clone();
        Self::from_fn(move |hash| key.sign(hash))
    }
}

/// Entry point of the staged builder.
pub struct TransactionBuilder;

impl TransactionBuilder {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> HeaderStep {
        HeaderStep(())
    }
}

/// Stage 1: only a header may be supplied.
pub struct HeaderStep(());

impl HeaderStep {
    pub fn header(self, header: TransactionHeader) -> ManifestStep {
        ManifestStep { header }
    }
}

/// Stage 2: only a manifest may be supplied.
pub struct ManifestStep {
    header: TransactionHeader,
}

impl ManifestStep {
    pub fn manifest(self, manifest: TransactionManifest) -> SignatureStep {
        SignatureStep {
            intent: Intent::new(self.header, manifest),
            sources: Vec::new(),
        }
    }
}

/// Stage 3: zero or more signature sources, then notarization.
pub struct SignatureStep {
    intent: Intent,
    sources: Vec<SignatureSource>,
}

impl SignatureStep {
    /// Append one signature source. Repeated calls compose in order.
    pub fn sign(mut self, source: impl Into<SignatureSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// The intent under construction.
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// The intent hash signers will sign, derived by the engine.
    pub fn intent_hash(&self, engine: &impl Engine) -> Result<Hash> {
        engine.intent_hash(&self.intent)
    }

    /// Resolve every intent-signature source in append order, compute the
    /// signed-intent hash, resolve the notary source with it, and return
    /// the terminal transaction.
    pub async fn notarize(
        self,
        engine: &impl Engine,
        notary: impl Into<NotarySource>,
    ) -> Result<NotarizedTransaction> {
        let Self { intent, sources } = self;

        let mut intent_signatures = Vec::with_capacity(sources.len());
        for source in sources {
            // Fetched per source; the engine must be idempotent here.
            let intent_hash = engine.intent_hash(&intent)?;
            intent_signatures.push(source.resolve(&intent_hash).await?);
        }

        let signed_intent = SignedIntent::new(intent, intent_signatures);
        let signed_intent_hash = engine.signed_intent_hash(&signed_intent)?;
        let notary_signature = notary.into().resolve(&signed_intent_hash).await?;

        Ok(NotarizedTransaction::new(signed_intent, notary_signature))
    }
}
