//! Error types for engine-toolkit operations.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure while decoding a wire payload read from module memory.
///
/// The wire format is UTF-8 JSON text followed by a single NUL byte; a
/// payload that breaks any of those three layers is rejected whole, never
/// truncated into a partial value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No NUL terminator between the read offset and the end of memory.
    #[error("no NUL terminator within the addressable region (scanned from offset {offset})")]
    MissingTerminator { offset: usize },
    /// The terminated span is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// The decoded text is not valid JSON, or does not match the expected shape.
    #[error("payload is not valid JSON for the expected shape: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for engine-toolkit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or unterminated wire payload.
    #[error("failed to decode wire payload: {0}")]
    Decode(#[from] DecodeError),

    /// The module allocator signalled exhaustion (null pointer).
    #[error("module allocator could not provide {capacity} bytes")]
    Allocation { capacity: u32 },

    /// A fixed-length cryptographic value was constructed with the wrong length.
    #[error("invalid {entity} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        entity: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A hex string failed to decode into a cryptographic value.
    #[error("invalid {entity} hex: {message}")]
    InvalidHex {
        entity: &'static str,
        message: String,
    },

    /// A curve-level failure: invalid scalar, point, or signing error.
    #[error("{curve} error: {message}")]
    Curve {
        curve: &'static str,
        message: String,
    },

    /// The module answered with one of the reserved error discriminants.
    ///
    /// Carries the serialized request and response so the failure can be
    /// diagnosed without re-running the call.
    #[error("engine rejected `{function}`: request = {request}, response = {response}")]
    EngineInvocation {
        function: &'static str,
        request: String,
        response: String,
    },

    /// A signature source function failed while being resolved.
    #[error("signature source failed: {message}")]
    SignatureResolution { message: String },

    /// Static validation reported the transaction invalid and the caller
    /// asked for fail-fast behavior.
    #[error("transaction failed static validation: {message}")]
    StaticallyInvalid { message: String },

    /// The module does not export a function or memory the host requires.
    #[error("module is missing required export `{name}`")]
    MissingExport { name: &'static str },

    /// Instantiation, trap, or memory-access failure inside the module.
    #[error("module invocation failed: {0}")]
    Module(wasmtime::Error),
}

impl From<wasmtime::Error> for Error {
    fn from(err: wasmtime::Error) -> Self {
        Error::Module(err)
    }
}
