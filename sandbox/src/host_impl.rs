//! Per-instance state held in the Wasmtime Store.
//!
//! `HostState` combines the diagnostic sink, the pending panic message,
//! and the memory limits into the struct that lives inside
//! `Store<HostState>` for the life of one guest instance.

use std::sync::Arc;

use evalbox_hostapi::DiagnosticSink;
use wasmtime::StoreLimits;

/// Per-instance mutable state held in the Wasmtime `Store`.
///
/// Created at instantiation and kept until the instance is dropped.
pub struct HostState {
    /// Destination for guest `log`/`panic` messages.
    pub sink: Arc<dyn DiagnosticSink>,
    /// Message recorded by the `panic` import for the in-flight call.
    pub panic_message: Option<String>,
    /// Linear memory limits enforced by the store.
    pub limits: StoreLimits,
    /// Whether `log` messages reach the sink.
    pub forward_logs: bool,
}

impl HostState {
    /// Create host state for a new instance.
    pub fn new(sink: Arc<dyn DiagnosticSink>, limits: StoreLimits, forward_logs: bool) -> Self {
        Self {
            sink,
            panic_message: None,
            limits,
            forward_logs,
        }
    }

    /// Record the message delivered through the `panic` import.
    ///
    /// The sink sees the message before the call unwinds; the stored
    /// copy becomes the error payload of the failing call.
    pub fn record_panic(&mut self, message: String) {
        self.sink.fatal(&message);
        self.panic_message = Some(message);
    }

    /// Take the pending panic message, leaving the state clean for the
    /// next call.
    pub fn take_panic(&mut self) -> Option<String> {
        self.panic_message.take()
    }

    /// Forward a guest log line to the sink, if enabled.
    pub fn forward_log(&self, message: &str) {
        if self.forward_logs {
            self.sink.log(message);
        }
    }
}
