//! Purpose: C ABI export table for host runtimes (libextprobe).
//! Exports: C-callable module init, answer entry points, and error helpers.
//! Role: Stable dispatch surface a host binds once at module-load time.
//! Invariants: Entry points return 1 when a value was written, 0 for no value, -1 on error.
//! Invariants: Error kinds map 1:1 with core error kinds.
//! Invariants: The module binding is written exactly once and lives for the process.
#![allow(non_camel_case_types)]

use crate::api::{Error, ErrorKind, Module, ReadOutcome};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::sync::OnceLock;

#[repr(C)]
pub struct xpb_module {
    module: Module,
}

#[repr(C)]
pub struct xpb_error {
    pub kind: i32,
    pub message: *mut c_char,
    pub path: *mut c_char,
}

static MODULE: OnceLock<xpb_module> = OnceLock::new();

// There is no matching free function: the binding lives until process exit,
// and a second init fails with a Usage error instead of rebinding.
#[unsafe(no_mangle)]
pub extern "C" fn xpb_module_init(
    module_path: *const c_char,
    out_module: *mut *const xpb_module,
    out_err: *mut *mut xpb_error,
) -> i32 {
    if out_module.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_module is null"),
        );
    }
    if module_path.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("module_path is null"),
        );
    }
    let path = match unsafe { CStr::from_ptr(module_path) }.to_str() {
        Ok(path) => path,
        Err(_) => {
            return fail(
                out_err,
                Error::new(ErrorKind::Usage).with_message("module_path is not valid UTF-8"),
            );
        }
    };
    let module = match Module::bind(path) {
        Ok(module) => module,
        Err(err) => return fail(out_err, err),
    };
    if MODULE.set(xpb_module { module }).is_err() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("module is already initialized"),
        );
    }
    let Some(bound) = MODULE.get() else {
        return fail(
            out_err,
            Error::new(ErrorKind::Internal).with_message("module binding missing after init"),
        );
    };
    unsafe {
        *out_module = bound;
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn xpb_get_the_answer(
    module: *const xpb_module,
    out_answer: *mut i64,
    out_err: *mut *mut xpb_error,
) -> i32 {
    let module = match borrow_module(module, out_err) {
        Ok(module) => module,
        Err(code) => return code,
    };
    if out_answer.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_answer is null"),
        );
    }
    unsafe {
        *out_answer = module.module.get_the_answer();
    }
    1
}

#[unsafe(no_mangle)]
pub extern "C" fn xpb_read_the_answer(
    module: *const xpb_module,
    out_answer: *mut i64,
    out_err: *mut *mut xpb_error,
) -> i32 {
    let module = match borrow_module(module, out_err) {
        Ok(module) => module,
        Err(code) => return code,
    };
    if out_answer.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_answer is null"),
        );
    }
    match module.module.read_the_answer() {
        Ok(ReadOutcome::Value(value)) => {
            unsafe {
                *out_answer = value;
            }
            1
        }
        Ok(ReadOutcome::Empty) => 0,
        Err(err) => fail(out_err, err),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn xpb_error_free(err: *mut xpb_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
        if !err.path.is_null() {
            drop(CString::from_raw(err.path));
        }
    }
}

fn borrow_module<'a>(
    module: *const xpb_module,
    out_err: *mut *mut xpb_error,
) -> Result<&'a xpb_module, i32> {
    if module.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("module is null"),
        ));
    }
    unsafe { Ok(&*module) }
}

fn fail(out_err: *mut *mut xpb_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(xpb_error {
        kind: error_kind_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        path: err
            .path()
            .map(|path| to_c_string(path.to_string_lossy().as_ref()))
            .unwrap_or(ptr::null_mut()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn error_kind_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::InvalidModulePath => 3,
        ErrorKind::Open => 4,
    }
}
