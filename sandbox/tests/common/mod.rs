//! Shared fixtures for integration tests.
//!
//! WAT guests stand in for the real evaluator binary: each implements
//! the evaluator ABI (`alloc`, operations, `result_ptr`/`result_len`)
//! with canned or echoed results, so the tests exercise the boundary
//! protocol without depending on a build artifact.

#![allow(dead_code)]

use std::sync::Arc;

use evalbox_hostapi::CaptureSink;
use evalbox_sandbox::{Instance, Sandbox, SandboxConfig};

/// Guest that hands the request buffer straight back as the result.
/// `alloc` records the request length; the result region is the request
/// region.
pub const ECHO_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (global $len (mut i32) (i32.const 0))
        (func (export "alloc") (param $n i32) (result i32)
            (global.set $len (local.get $n))
            i32.const 1024)
        (func (export "eval_source") (export "eval_value") (export "parse"))
        (func (export "result_ptr") (result i32)
            i32.const 1024)
        (func (export "result_len") (result i32)
            global.get $len)
    )
"#;

/// Guest with fixed outputs: `eval_source` produces the JSON document
/// `2`, `parse` produces a canned parse tree. No `eval_value` export.
pub const CANNED_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (data (i32.const 2048) "2")
        (data (i32.const 2304) "{\22op\22:\22add\22,\22args\22:[1,1]}")
        (global $ptr (mut i32) (i32.const 0))
        (global $len (mut i32) (i32.const 0))
        (func (export "alloc") (param i32) (result i32)
            i32.const 1024)
        (func (export "eval_source")
            (global.set $ptr (i32.const 2048))
            (global.set $len (i32.const 1)))
        (func (export "parse")
            (global.set $ptr (i32.const 2304))
            (global.set $len (i32.const 25)))
        (func (export "result_ptr") (result i32)
            global.get $ptr)
        (func (export "result_len") (result i32)
            global.get $len)
    )
"#;

/// Guest whose `parse` reports a fatal error through `env::panic`;
/// `eval_source` still succeeds with the JSON document `2`.
pub const PANIC_GUEST: &str = r#"
    (module
        (import "env" "panic" (func $panic (param i32 i32)))
        (memory (export "memory") 1)
        (data (i32.const 512) "division by zero")
        (data (i32.const 2048) "2")
        (global $ptr (mut i32) (i32.const 0))
        (global $len (mut i32) (i32.const 0))
        (func (export "alloc") (param i32) (result i32)
            i32.const 1024)
        (func (export "parse")
            (call $panic (i32.const 512) (i32.const 16)))
        (func (export "eval_source")
            (global.set $ptr (i32.const 2048))
            (global.set $len (i32.const 1)))
        (func (export "result_ptr") (result i32)
            global.get $ptr)
        (func (export "result_len") (result i32)
            global.get $len)
    )
"#;

/// Guest that emits two log lines during `eval_source` — one plain
/// ASCII, one invalid UTF-8 — then produces the JSON document `true`.
pub const LOGGING_GUEST: &str = r#"
    (module
        (import "env" "log" (func $log (param i32 i32)))
        (memory (export "memory") 1)
        (data (i32.const 512) "evaluating input")
        (data (i32.const 560) "\ff\fe")
        (data (i32.const 2048) "true")
        (func (export "alloc") (param i32) (result i32)
            i32.const 1024)
        (func (export "eval_source")
            (call $log (i32.const 512) (i32.const 16))
            (call $log (i32.const 560) (i32.const 2)))
        (func (export "result_ptr") (result i32)
            i32.const 2048)
        (func (export "result_len") (result i32)
            i32.const 4)
    )
"#;

/// Guest whose `eval_source` reports a result region past the end of
/// its one-page memory; `parse` produces a well-placed `[]`.
pub const BAD_RESULT_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (data (i32.const 2048) "[]")
        (global $ptr (mut i32) (i32.const 0))
        (global $len (mut i32) (i32.const 0))
        (func (export "alloc") (param i32) (result i32)
            i32.const 1024)
        (func (export "eval_source")
            (global.set $ptr (i32.const 131072))
            (global.set $len (i32.const 4)))
        (func (export "parse")
            (global.set $ptr (i32.const 2048))
            (global.set $len (i32.const 2)))
        (func (export "result_ptr") (result i32)
            global.get $ptr)
        (func (export "result_len") (result i32)
            global.get $len)
    )
"#;

/// Guest whose allocator hands out an offset past the end of memory.
pub const BAD_ALLOC_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (func (export "alloc") (param i32) (result i32)
            i32.const 131072)
        (func (export "eval_source"))
        (func (export "result_ptr") (result i32)
            i32.const 0)
        (func (export "result_len") (result i32)
            i32.const 0)
    )
"#;

/// Guest that traps during `eval_source` without using `env::panic`.
pub const TRAP_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (func (export "alloc") (param i32) (result i32)
            i32.const 1024)
        (func (export "eval_source")
            unreachable)
        (func (export "result_ptr") (result i32)
            i32.const 0)
        (func (export "result_len") (result i32)
            i32.const 0)
    )
"#;

/// Echoing guest whose `alloc` grows memory by one page per call and
/// places the request buffer at the start of the fresh page. A denied
/// grow makes `memory.grow` return -1, so the reported offset goes
/// negative.
pub const GROWING_GUEST: &str = r#"
    (module
        (memory (export "memory") 1)
        (global $ptr (mut i32) (i32.const 0))
        (global $len (mut i32) (i32.const 0))
        (func (export "alloc") (param $n i32) (result i32)
            (global.set $len (local.get $n))
            (global.set $ptr
                (i32.mul (memory.grow (i32.const 1)) (i32.const 65536)))
            global.get $ptr)
        (func (export "eval_value") (export "eval_source"))
        (func (export "result_ptr") (result i32)
            global.get $ptr)
        (func (export "result_len") (result i32)
            global.get $len)
    )
"#;

/// Compile a WAT guest into a sandbox with default config.
pub fn sandbox(wat: &str) -> Sandbox {
    Sandbox::new(wat.as_bytes(), SandboxConfig::default()).expect("guest should load")
}

/// Compile and instantiate a WAT guest with a capture sink.
pub fn instance_with_sink(wat: &str) -> (Instance, Arc<CaptureSink>) {
    instance_with_config(wat, SandboxConfig::default())
}

/// Compile and instantiate a WAT guest with a custom config.
pub fn instance_with_config(wat: &str, config: SandboxConfig) -> (Instance, Arc<CaptureSink>) {
    let sandbox = Sandbox::new(wat.as_bytes(), config).expect("guest should load");
    let sink = Arc::new(CaptureSink::new());
    let instance = sandbox
        .instantiate(sink.clone())
        .expect("guest should instantiate");
    (instance, sink)
}

/// Compile and instantiate a WAT guest, discarding the sink.
pub fn instance(wat: &str) -> Instance {
    instance_with_sink(wat).0
}
