//! `evalbox-hostapi` — host capability surface and payload codec for the
//! evalbox WASM bridge.
//!
//! This crate defines the host-side interface the sandbox wires into the
//! guest evaluator, independent of any WASM engine. It provides:
//!
//! - `DiagnosticSink` trait — the two capabilities the guest may invoke
//!   (log line, fatal report)
//! - `TracingSink` — production sink emitting through `tracing`
//! - `CaptureSink` — in-memory sink for tests
//! - `codec` — UTF-8 and JSON payload (de)serialization for the boundary
//! - `CodecError` — payload encode/decode failures
//!
//! The sandbox crate consumes these when registering imports and when
//! moving request/result bytes across the guest boundary.

pub mod codec;
pub mod error;
pub mod sink;

// Re-export commonly used types at the crate root.
pub use error::CodecError;
pub use sink::{CaptureSink, DiagnosticSink, TracingSink};
