//! Codec error type for the guest payload boundary.

/// Error from encoding or decoding a JSON payload at the guest boundary.
///
/// A `Parse` failure indicates a contract mismatch — the guest produced
/// bytes that are not a JSON document. It is distinct from any failure
/// the guest declares itself, which arrives through its own channel.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Host value could not be serialized to JSON text.
    #[error("value does not serialize to JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Guest bytes did not parse as a JSON document.
    #[error("result is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}
