//! Host import registration via Wasmtime linker.
//!
//! Registers the two `env` functions the guest may import:
//!
//! - `log(ptr, len)` — decode a guest string and forward it to the sink
//! - `panic(ptr, len)` — decode, record, and unwind the in-flight call
//!
//! Each function validates the (ptr, len) pair against current linear
//! memory before reading. `panic` raises a trap after recording its
//! message; the protocol layer maps the trap back to the recorded text.

use wasmtime::{Caller, Linker, Memory};

use evalbox_hostapi::codec;

use crate::error::SandboxError;
use crate::host_impl::HostState;
use crate::memory::{read_bytes, BufferHandle};

/// Import namespace the guest links against.
pub const IMPORT_MODULE: &str = "env";

/// Get the guest's exported memory from a Caller.
fn get_memory(caller: &mut Caller<'_, HostState>) -> Option<Memory> {
    caller.get_export("memory").and_then(|e| e.into_memory())
}

/// Read and decode the string a guest passed by (ptr, len).
fn read_guest_string(
    caller: &mut Caller<'_, HostState>,
    ptr: i32,
    len: i32,
) -> anyhow::Result<String> {
    let mem =
        get_memory(caller).ok_or_else(|| anyhow::anyhow!("guest has no memory export"))?;
    let bytes = read_bytes(mem.data(&caller), BufferHandle::new(ptr, len))?;
    Ok(codec::decode_lossy(&bytes).into_owned())
}

/// Register the `env` host functions with the linker.
pub fn register_host_imports(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    register_log(linker)?;
    register_panic(linker)?;
    Ok(())
}

fn register_log(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "log",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> anyhow::Result<()> {
            let message = read_guest_string(&mut caller, ptr, len)?;
            caller.data().forward_log(&message);
            Ok(())
        },
    )?;
    Ok(())
}

fn register_panic(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "panic",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> anyhow::Result<()> {
            let message = read_guest_string(&mut caller, ptr, len)?;
            caller.data_mut().record_panic(message.clone());
            // Trap: the in-flight call unwinds without touching any
            // result buffer.
            Err(anyhow::anyhow!("guest panic: {}", message))
        },
    )?;
    Ok(())
}
