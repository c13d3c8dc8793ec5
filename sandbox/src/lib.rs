//! `evalbox-sandbox` — Wasmtime-based host bridge for a sandboxed WASM
//! evaluator.
//!
//! This crate loads a precompiled evaluator module and exchanges UTF-8
//! and JSON payloads with it over linear memory. It enforces:
//!
//! - **ABI validation:** required exports and the fixed `env` import
//!   surface checked at load time
//! - **Bounds checking:** every host access to guest memory validated
//!   against the current memory size, never clamped
//! - **Fatal-signal mapping:** a guest panic unwinds only the in-flight
//!   call and surfaces with the guest's exact message; the instance
//!   stays usable
//! - **Memory limits:** bounded linear memory growth
//!
//! The primary entry points are [`Sandbox::instantiate`] and the
//! [`Instance`] operation methods (`eval_source`, `eval_value`,
//! `parse`).

pub mod error;
pub mod config;
pub mod memory;
pub mod host_impl;
pub mod validation;
pub mod linker;
pub mod protocol;

pub use config::SandboxConfig;
pub use error::SandboxError;
pub use memory::BufferHandle;
pub use protocol::{Instance, Sandbox};
