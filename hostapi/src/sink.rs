//! Diagnostic sink — the host capabilities exposed to the guest.
//!
//! The guest's import table carries exactly two host functions: a log
//! line and a fatal report. `DiagnosticSink` is their host-side shape,
//! passed explicitly into instantiation so every instance can use an
//! independent sink instead of sharing ambient global state.

use std::sync::Mutex;

use tracing::{error, info};

/// Destination for guest-reported diagnostics.
///
/// Log messages are informational only and never affect a call's
/// outcome. A fatal message is delivered once, immediately before the
/// in-flight call unwinds carrying the same text.
pub trait DiagnosticSink: Send + Sync {
    /// A log line the guest emitted.
    fn log(&self, message: &str);

    /// An unrecoverable error the guest reported for the current call.
    fn fatal(&self, message: &str);
}

/// Default sink: emits guest diagnostics through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str) {
        info!(guest = true, "{}", message);
    }

    fn fatal(&self, message: &str) {
        error!(guest = true, "{}", message);
    }
}

/// In-memory sink retaining every message.
///
/// For tests that assert on the exact text the guest wrote.
#[derive(Debug, Default)]
pub struct CaptureSink {
    logs: Mutex<Vec<String>>,
    fatals: Mutex<Vec<String>>,
}

impl CaptureSink {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All log messages received so far, in order.
    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// All fatal messages received so far, in order.
    pub fn fatals(&self) -> Vec<String> {
        self.fatals.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DiagnosticSink for CaptureSink {
    fn log(&self, message: &str) {
        self.logs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }

    fn fatal(&self, message: &str) {
        self.fatals
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
