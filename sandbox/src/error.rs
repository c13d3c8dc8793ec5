//! Sandbox error types.

use evalbox_hostapi::CodecError;

/// Top-level error type for the sandbox crate.
///
/// Every variant surfaces to the immediate caller of the failing
/// operation; nothing is retried, and none of the per-call failures
/// (`OutOfBounds`, `GuestPanic`, `GuestTrap`, `Codec`, `MissingExport`)
/// invalidates the instance for subsequent calls.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// Wasmtime engine, compilation, or instantiation error.
    #[error("wasmtime error: {0}")]
    Wasmtime(#[from] anyhow::Error),

    /// Module validation failed (missing exports, bad imports, etc.).
    #[error("validation error: {0}")]
    Validation(String),

    /// The loaded guest does not export the invoked operation.
    #[error("guest does not export '{0}'")]
    MissingExport(&'static str),

    /// An (offset, length) pair falls outside current guest memory.
    /// Never clamped; the access is refused outright.
    #[error("out of bounds: offset {offset} len {len} exceeds memory size {size}")]
    OutOfBounds {
        offset: i64,
        len: i64,
        size: usize,
    },

    /// The guest reported a fatal error through its `panic` import.
    /// Carries the exact text the guest wrote.
    #[error("guest panic: {0}")]
    GuestPanic(String),

    /// The guest trapped without reporting through the `panic` import.
    #[error("guest trapped: {0}")]
    GuestTrap(String),

    /// Payload encoding or result decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
