//! Wire codec for the module boundary.
//!
//! Every value that crosses the boundary travels as UTF-8 JSON text
//! followed by a single NUL byte. Encoding appends the terminator;
//! decoding scans forward from a given offset in the module's linear
//! memory until the first NUL, then parses the preceding span. A payload
//! with no terminator, invalid UTF-8, or invalid JSON is rejected whole.
//!
//! Also holds the serde helper modules shared by the wire shapes:
//! numeric fields that can exceed safe-integer range in JSON consumers
//! travel as decimal strings, and byte arrays travel as lowercase hex.

use serde::Serialize;

use crate::error::{DecodeError, Result};

/// Serialize a request value to UTF-8 JSON text plus a NUL terminator.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec(value).map_err(DecodeError::Json)?;
    bytes.push(0);
    Ok(bytes)
}

/// Locate the NUL-terminated span starting at `offset` in `memory`,
/// excluding the terminator itself.
pub fn terminated(memory: &[u8], offset: usize) -> Result<&[u8]> {
    let span = memory
        .get(offset..)
        .ok_or(DecodeError::MissingTerminator { offset })?;
    let end = span
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::MissingTerminator { offset })?;
    Ok(&span[..end])
}

/// Parse a JSON span whose terminator has already been stripped.
pub fn parse(bytes: &[u8]) -> Result<serde_json::Value> {
    let text = std::str::from_utf8(bytes).map_err(DecodeError::Utf8)?;
    let value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    Ok(value)
}

/// Decode a NUL-terminated JSON payload starting at `offset` in `memory`.
pub fn decode(memory: &[u8], offset: usize) -> Result<serde_json::Value> {
    parse(terminated(memory, offset)?)
}

/// Serde adapter: numbers as decimal strings.
pub mod decimal_str {
    use core::fmt;
    use core::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: fmt::Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: fmt::Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

/// Serde adapter: byte arrays as lowercase hex strings.
pub mod hex_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(&text).map_err(D::Error::custom)
    }
}

/// Serde adapter: sequences of byte blobs as lowercase hex strings.
pub mod hex_blobs {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(blobs: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(blobs.iter().map(hex::encode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| hex::decode(s).map_err(D::Error::custom))
            .collect()
    }
}
