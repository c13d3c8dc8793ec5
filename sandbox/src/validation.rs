//! WASM module validation — ABI compatibility checks.
//!
//! Validates a compiled module before the sandbox accepts it:
//!
//! 1. `memory` export present
//! 2. Fixed exports (`alloc`, `result_ptr`, `result_len`) present with
//!    correct signatures
//! 3. At least one operation export (`eval_source`, `eval_value`,
//!    `parse`); each present one must take and return nothing
//! 4. All imports are `env::log` / `env::panic` functions; no WASI

use wasmtime::{ExternType, Module, ValType};

use crate::error::SandboxError;
use crate::linker::IMPORT_MODULE;

/// Check if a ValType is i32.
fn is_i32(vt: &ValType) -> bool {
    matches!(vt, ValType::I32)
}

/// Required export: (name, i32 param count, i32 result count).
const REQUIRED_EXPORTS: &[(&str, usize, usize)] = &[
    ("alloc", 1, 1),
    ("result_ptr", 0, 1),
    ("result_len", 0, 1),
];

/// Operation exports — a guest exposes whichever subset it implements.
const OPERATION_EXPORTS: &[&str] = &["eval_source", "eval_value", "parse"];

/// Allowed import functions: (name, i32 param count). None return values.
const ALLOWED_IMPORTS: &[(&str, usize)] = &[("log", 2), ("panic", 2)];

/// Validate that a WASM module meets the evaluator ABI.
pub fn validate_module(module: &Module) -> Result<(), SandboxError> {
    validate_exports(module)?;
    validate_imports(module)?;
    Ok(())
}

/// Check that required exports are present with correct signatures and
/// that at least one operation is exported.
fn validate_exports(module: &Module) -> Result<(), SandboxError> {
    let has_memory = module
        .exports()
        .any(|e| e.name() == "memory" && matches!(e.ty(), ExternType::Memory(_)));
    if !has_memory {
        return Err(SandboxError::Validation(
            "module must export 'memory'".into(),
        ));
    }

    for &(name, param_count, result_count) in REQUIRED_EXPORTS {
        if !check_func_export(module, name, param_count, result_count)? {
            return Err(SandboxError::Validation(format!(
                "missing required export: {}",
                name
            )));
        }
    }

    let mut operations = 0;
    for &name in OPERATION_EXPORTS {
        if check_func_export(module, name, 0, 0)? {
            operations += 1;
        }
    }
    if operations == 0 {
        return Err(SandboxError::Validation(format!(
            "module exports none of the operations {:?}",
            OPERATION_EXPORTS
        )));
    }

    Ok(())
}

/// Find a function export by name and check its signature.
///
/// Returns `Ok(false)` if absent, `Ok(true)` if present and well typed,
/// and an error if present with the wrong shape.
fn check_func_export(
    module: &Module,
    name: &str,
    param_count: usize,
    result_count: usize,
) -> Result<bool, SandboxError> {
    let export = match module.exports().find(|e| e.name() == name) {
        Some(e) => e,
        None => return Ok(false),
    };

    let func_ty = match export.ty() {
        ExternType::Func(ft) => ft,
        _ => {
            return Err(SandboxError::Validation(format!(
                "export '{}' must be a function",
                name
            )));
        }
    };

    let params: Vec<ValType> = func_ty.params().collect();
    let results: Vec<ValType> = func_ty.results().collect();

    if params.len() != param_count || !params.iter().all(is_i32) {
        return Err(SandboxError::Validation(format!(
            "export '{}' has wrong param signature: expected {} i32 params, got {} params",
            name,
            param_count,
            params.len()
        )));
    }
    if results.len() != result_count || !results.iter().all(is_i32) {
        return Err(SandboxError::Validation(format!(
            "export '{}' has wrong result signature: expected {} i32 results, got {} results",
            name,
            result_count,
            results.len()
        )));
    }

    Ok(true)
}

/// Check that all imports are the `env` host functions and none are WASI.
fn validate_imports(module: &Module) -> Result<(), SandboxError> {
    for import in module.imports() {
        let module_name = import.module();

        if module_name.starts_with("wasi") {
            return Err(SandboxError::Validation(format!(
                "WASI import not allowed: {}::{}",
                module_name,
                import.name()
            )));
        }

        if module_name != IMPORT_MODULE {
            return Err(SandboxError::Validation(format!(
                "import from unknown module '{}' (only '{}' allowed): {}",
                module_name,
                IMPORT_MODULE,
                import.name()
            )));
        }

        let func_ty = match import.ty() {
            ExternType::Func(ft) => ft,
            _ => {
                return Err(SandboxError::Validation(format!(
                    "non-function import not allowed: {}::{}",
                    module_name,
                    import.name()
                )));
            }
        };

        let expected = ALLOWED_IMPORTS.iter().find(|(name, _)| *name == import.name());
        let param_count = match expected {
            Some(&(_, count)) => count,
            None => {
                return Err(SandboxError::Validation(format!(
                    "unknown host import: {}::{}",
                    module_name,
                    import.name()
                )));
            }
        };

        let params: Vec<ValType> = func_ty.params().collect();
        if params.len() != param_count
            || !params.iter().all(is_i32)
            || func_ty.results().len() != 0
        {
            return Err(SandboxError::Validation(format!(
                "import '{}' has wrong signature: expected {} i32 params and no results",
                import.name(),
                param_count
            )));
        }
    }

    Ok(())
}
