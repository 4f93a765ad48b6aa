//! Transaction manifest.
//!
//! The manifest is opaque to this crate: instructions pass through to the
//! engine unmodified, in either textual or parsed form, together with the
//! binary blobs they reference by hash.

use serde::{Deserialize, Serialize};

use crate::wire::hex_blobs;

/// Manifest instructions, in one of the two wire forms the engine accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Instructions {
    /// The textual manifest form.
    String { value: String },
    /// The parsed form: an opaque JSON tree per instruction.
    Parsed { value: Vec<serde_json::Value> },
}

/// An ordered sequence of instructions plus the blobs they reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionManifest {
    pub instructions: Instructions,
    /// Binary blobs referenced by hash from instructions, hex on the wire.
    #[serde(with = "hex_blobs")]
    pub blobs: Vec<Vec<u8>>,
}

impl TransactionManifest {
    /// Manifest from textual instructions with no blobs.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            instructions: Instructions::String {
                value: value.into(),
            },
            blobs: Vec::new(),
        }
    }

    /// Attach a referenced blob, preserving order.
    pub fn with_blob(mut self, blob: Vec<u8>) -> Self {
        self.blobs.push(blob);
        self
    }
}
