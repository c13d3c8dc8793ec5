//! Sandbox runtime — Wasmtime engine, module loading, and the call
//! protocol.
//!
//! `Sandbox` compiles and validates the guest evaluator module;
//! [`Sandbox::instantiate`] wires the `env` imports for a given sink and
//! produces a live [`Instance`]. Every operation runs the same
//! transaction: encode the payload, obtain a destination from the
//! guest's `alloc` export, write, invoke the operation export, read the
//! result located by `result_ptr`/`result_len`, and decode it as a JSON
//! document.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use wasmtime::{
    Config, Engine, Linker, Memory, Module, Store, StoreLimitsBuilder, TypedFunc,
};

use evalbox_hostapi::{codec, DiagnosticSink};

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::host_impl::HostState;
use crate::linker::register_host_imports;
use crate::memory::{self, BufferHandle};
use crate::validation::validate_module;

/// A loaded, validated guest module, ready to instantiate.
///
/// Loading is terminal on failure: a module that does not compile or
/// does not meet the ABI produces no sandbox at all.
pub struct Sandbox {
    engine: Engine,
    module: Module,
    config: SandboxConfig,
}

impl Sandbox {
    /// Create a sandbox from WASM bytecode.
    ///
    /// Validates the module's exports and imports before accepting.
    pub fn new(wasm_bytes: &[u8], config: SandboxConfig) -> Result<Self, SandboxError> {
        let engine = create_engine()?;
        let module = Module::new(&engine, wasm_bytes)?;
        validate_module(&module)?;
        Ok(Self {
            engine,
            module,
            config,
        })
    }

    /// Load from a `.wasm` file path.
    pub fn from_file(path: &Path, config: SandboxConfig) -> Result<Self, SandboxError> {
        let engine = create_engine()?;
        let module = Module::from_file(&engine, path)?;
        validate_module(&module)?;
        Ok(Self {
            engine,
            module,
            config,
        })
    }

    /// Instantiate the module, wiring `env::log` and `env::panic` to
    /// `sink`.
    ///
    /// Each instance carries its own sink, store, and linear memory;
    /// instances are independent and live until dropped.
    pub fn instantiate(&self, sink: Arc<dyn DiagnosticSink>) -> Result<Instance, SandboxError> {
        let limits = StoreLimitsBuilder::new()
            .memory_size((self.config.max_memory_pages as usize) * 65536)
            .build();
        let state = HostState::new(sink, limits, self.config.forward_guest_logs);
        let mut store = Store::new(&self.engine, state);
        store.limiter(|state| &mut state.limits);

        let mut linker = Linker::new(&self.engine);
        register_host_imports(&mut linker)?;
        let instance = linker.instantiate(&mut store, &self.module)?;

        let memory = instance
            .get_memory(&mut store, "memory")
            .ok_or_else(|| SandboxError::Validation("no memory export".into()))?;

        Ok(Instance {
            store,
            instance,
            memory,
        })
    }
}

/// A live guest instance.
///
/// Operation methods take `&mut self`: one call is in flight at a time,
/// and the result region of one call is dead once the next begins.
/// Callers needing concurrent evaluation instantiate more instances.
pub struct Instance {
    store: Store<HostState>,
    instance: wasmtime::Instance,
    memory: Memory,
}

impl Instance {
    /// Evaluate raw source text. Returns the guest's JSON-decoded
    /// evaluation result.
    pub fn eval_source(&mut self, source: &str) -> Result<Value, SandboxError> {
        self.call("eval_source", codec::encode(source))
    }

    /// Parse source text into the guest's JSON-decoded representation
    /// without evaluating it.
    pub fn parse(&mut self, source: &str) -> Result<Value, SandboxError> {
        self.call("parse", codec::encode(source))
    }

    /// Evaluate a structured value, serialized to JSON text for
    /// transfer. Returns the guest's JSON-decoded evaluation result.
    pub fn eval_value(&mut self, value: &Value) -> Result<Value, SandboxError> {
        let payload = codec::value_to_bytes(value)?;
        self.call("eval_value", &payload)
    }

    /// Run one allocate → write → invoke → read-result transaction.
    fn call(&mut self, op: &'static str, payload: &[u8]) -> Result<Value, SandboxError> {
        // Resolve the operation before touching guest memory, so an
        // absent export fails without a dangling allocation.
        let op_fn = self.typed_func::<(), ()>(op)?;

        // 1. Ask the guest to allocate a request buffer sized exactly to
        //    the payload. The guest owns and sizes the buffer.
        let len = i32::try_from(payload.len()).map_err(|_| SandboxError::OutOfBounds {
            offset: 0,
            len: payload.len() as i64,
            size: self.memory.data_size(&self.store),
        })?;
        let alloc = self.typed_func::<i32, i32>("alloc")?;
        let result = alloc.call(&mut self.store, len);
        let offset = self.map_trap(result)?;

        // 2. Write the payload at the guest-chosen offset. The memory
        //    view is derived after the alloc call: alloc may have grown
        //    memory and relocated the backing region.
        memory::write_bytes(self.memory.data_mut(&mut self.store), offset, payload)?;

        // 3. Invoke the operation export. It works on the buffer written
        //    above and caches the result location in guest state.
        let result = op_fn.call(&mut self.store, ());
        self.map_trap(result)?;

        // 4. Locate the result and read it out before any further guest
        //    call can invalidate the region.
        let result_ptr = self.typed_func::<(), i32>("result_ptr")?;
        let result = result_ptr.call(&mut self.store, ());
        let ptr = self.map_trap(result)?;
        let result_len = self.typed_func::<(), i32>("result_len")?;
        let result = result_len.call(&mut self.store, ());
        let out_len = self.map_trap(result)?;

        let out = BufferHandle::new(ptr, out_len);
        let bytes = memory::read_bytes(self.memory.data(&self.store), out)?;

        debug!(
            op,
            request_len = payload.len(),
            result_len = bytes.len(),
            "guest call complete"
        );

        // 5. Decode as a JSON document.
        Ok(codec::value_from_bytes(&bytes)?)
    }

    /// Look up a typed export, failing with `MissingExport` if the
    /// loaded guest does not expose it.
    fn typed_func<P, R>(&mut self, name: &'static str) -> Result<TypedFunc<P, R>, SandboxError>
    where
        P: wasmtime::WasmParams,
        R: wasmtime::WasmResults,
    {
        let func = self
            .instance
            .get_func(&mut self.store, name)
            .ok_or(SandboxError::MissingExport(name))?;
        Ok(func.typed(&self.store)?)
    }

    /// Map a trapped guest call to its error.
    ///
    /// A message recorded by the `panic` import wins over the raw trap
    /// text; taking it leaves the instance clean for the next call.
    fn map_trap<R>(&mut self, result: Result<R, anyhow::Error>) -> Result<R, SandboxError> {
        match result {
            Ok(val) => Ok(val),
            Err(trap) => match self.store.data_mut().take_panic() {
                Some(message) => Err(SandboxError::GuestPanic(message)),
                None => Err(SandboxError::GuestTrap(format!("{}", trap))),
            },
        }
    }
}

/// Create a Wasmtime engine for the evaluator guest.
fn create_engine() -> Result<Engine, SandboxError> {
    let mut wasm_config = Config::new();
    // The guest is synchronous, single-threaded compute.
    wasm_config.wasm_threads(false);
    Ok(Engine::new(&wasm_config)?)
}
