//! Payload codec for the guest boundary.
//!
//! Everything crossing the boundary is UTF-8 text; structured values
//! cross as JSON documents in both directions. Decoding is non-strict:
//! invalid UTF-8 sequences are replaced with U+FFFD rather than rejected,
//! so guest-reported text always surfaces best-effort.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::CodecError;

/// Encode host text to the bytes written into guest memory.
///
/// The boundary encoding is UTF-8; Rust strings already are, so this is
/// a view, not a copy.
pub fn encode(text: &str) -> &[u8] {
    text.as_bytes()
}

/// Decode guest bytes to host text, replacing invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Serialize a host value to the JSON text bytes sent to the guest.
pub fn value_to_bytes(value: &Value) -> Result<Vec<u8>, CodecError> {
    let text = serde_json::to_string(value).map_err(CodecError::Serialize)?;
    Ok(text.into_bytes())
}

/// Parse guest result bytes: UTF-8 decode, then JSON.
pub fn value_from_bytes(bytes: &[u8]) -> Result<Value, CodecError> {
    let text = decode_lossy(bytes);
    serde_json::from_str(&text).map_err(CodecError::Parse)
}
