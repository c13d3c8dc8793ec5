//! Sandbox configuration.

/// Configuration for the evaluator sandbox.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Maximum linear memory pages the guest may grow to
    /// (1 page = 64 KiB). Default: 256 pages = 16 MiB.
    pub max_memory_pages: u64,

    /// Whether guest `log` messages are forwarded to the diagnostic
    /// sink. Fatal messages are always forwarded.
    pub forward_guest_logs: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            max_memory_pages: 256, // 16 MiB
            forward_guest_logs: true,
        }
    }
}
