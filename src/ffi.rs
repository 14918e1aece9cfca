#![allow(non_snake_case, clippy::missing_safety_doc)]
//! C-compatible bindings for [`EquivalenceCtxt`].
//!
//! A context is created with `allocNewEquivalenceCtxt` and must be released with
//! `freeEquivalenceCtxt`. References are NUL-terminated UTF-8 strings, values are `double`s.
//! A handle must only be used from one thread at a time.
//!
//! None of these functions unwinds into the caller. Every call that takes a handle
//! first clears the last error of the thread, so after a call `equivalenceLastError`
//! returns NULL unless that call failed.
//! A null handle or reference and a reference that is not valid UTF-8 are rejected and
//! leave the context untouched.
//!
//! A failed lookup in `getParameter` returns NaN, which can also be a stored value.
//! Use `getParameterChecked` to tell a missing value apart from a stored NaN.
//!
//! [`EquivalenceCtxt`]: ../struct.EquivalenceCtxt.html

use {
    std::{
        cell::RefCell,
        ffi::{CStr, CString},
        os::raw::{c_char, c_int},
        ptr,
    },
    tracing::warn,
    crate::EquivalenceCtxt,
};

/// Error codes returned by `getParameterChecked`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Success
    Ok = 0,
    /// A null handle, reference or output pointer, or a reference that is not UTF-8
    InvalidArgument = -1,
    /// The class of the reference has no value
    NoValue = -2,
}

impl From<ErrorCode> for c_int {
    fn from(code: ErrorCode) -> Self {
        code as c_int
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = RefCell::new(None);
}

fn set_last_error(message: &str) {
    LAST_ERROR.with(|error| {
        *error.borrow_mut() = CString::new(message).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|error| {
        *error.borrow_mut() = None;
    });
}

/// Borrows a C string as a reference.
///
/// On failure the last error is set and `None` is returned.
unsafe fn borrow_reference<'a>(raw: *const c_char, function: &str) -> Option<&'a str> {
    if raw.is_null() {
        warn!(function, "null reference");
        set_last_error("Null reference");
        return None
    }

    match CStr::from_ptr(raw).to_str() {
        Ok(reference) => Some(reference),
        Err(error) => {
            warn!(function, %error, "reference is not valid UTF-8");
            set_last_error("Reference is not valid UTF-8");
            None
        },
    }
}

/// Borrows the context behind a handle and clears the last error.
unsafe fn context<'a>(ctxt: *mut EquivalenceCtxt) -> Option<&'a mut EquivalenceCtxt> {
    clear_last_error();

    let ctxt = ctxt.as_mut();
    if ctxt.is_none() {
        warn!("null equivalence context handle");
        set_last_error("Null handle");
    }

    ctxt
}

/// Create a new, empty context with the setup flag lowered.
/// The handle must be released with `freeEquivalenceCtxt`.
#[no_mangle]
pub extern "C" fn allocNewEquivalenceCtxt() -> *mut EquivalenceCtxt {
    Box::into_raw(Box::new(EquivalenceCtxt::new()))
}

/// Release a context and everything it owns. A null handle is ignored.
#[no_mangle]
pub unsafe extern "C" fn freeEquivalenceCtxt(ctxt: *mut EquivalenceCtxt) {
    if !ctxt.is_null() {
        drop(Box::from_raw(ctxt));
    }
}

/// Join the classes of two references.
#[no_mangle]
pub unsafe extern "C" fn equivate(
    ctxt: *mut EquivalenceCtxt,
    left_reference: *const c_char,
    right_reference: *const c_char,
) {
    let ctxt = match context(ctxt) {
        Some(ctxt) => ctxt,
        None => return,
    };
    let left = match borrow_reference(left_reference, "equivate") {
        Some(left) => left,
        None => return,
    };
    let right = match borrow_reference(right_reference, "equivate") {
        Some(right) => right,
        None => return,
    };

    ctxt.equivate(left, right);
}

/// Store a value for the class of a reference.
#[no_mangle]
pub unsafe extern "C" fn setParameter(
    ctxt: *mut EquivalenceCtxt,
    reference: *const c_char,
    value: f64,
) {
    let ctxt = match context(ctxt) {
        Some(ctxt) => ctxt,
        None => return,
    };

    if let Some(reference) = borrow_reference(reference, "setParameter") {
        ctxt.set(reference, value);
    }
}

/// Read the value of the class of a reference.
/// Returns NaN and records the last error if there is none.
#[no_mangle]
pub unsafe extern "C" fn getParameter(ctxt: *mut EquivalenceCtxt, reference: *const c_char) -> f64 {
    let mut value = f64::NAN;
    getParameterChecked(ctxt, reference, &mut value);

    value
}

/// Read the value of the class of a reference into `value`.
/// Returns 0 on success and a negative `ErrorCode` otherwise, `value` is only written on success.
#[no_mangle]
pub unsafe extern "C" fn getParameterChecked(
    ctxt: *mut EquivalenceCtxt,
    reference: *const c_char,
    value: *mut f64,
) -> c_int {
    let ctxt = match context(ctxt) {
        Some(ctxt) => ctxt,
        None => return ErrorCode::InvalidArgument.into(),
    };
    let reference = match borrow_reference(reference, "getParameter") {
        Some(reference) => reference,
        None => return ErrorCode::InvalidArgument.into(),
    };
    if value.is_null() {
        set_last_error("Null output pointer");
        return ErrorCode::InvalidArgument.into()
    }

    match ctxt.get(reference) {
        Ok(found) => {
            *value = found;
            ErrorCode::Ok.into()
        },
        Err(error) => {
            warn!(%error, "getParameter failed");
            set_last_error(&error.to_string());
            ErrorCode::NoValue.into()
        },
    }
}

/// Raise the setup flag.
/// Returns 1 if this call raised it and 0 if it was already raised.
#[no_mangle]
pub unsafe extern "C" fn markSetupDone(ctxt: *mut EquivalenceCtxt) -> c_int {
    match context(ctxt) {
        Some(ctxt) => ctxt.mark_setup_done() as c_int,
        None => 0,
    }
}

/// Returns 1 once the setup flag has been raised and 0 before.
#[no_mangle]
pub unsafe extern "C" fn isSetupDone(ctxt: *mut EquivalenceCtxt) -> c_int {
    match context(ctxt) {
        Some(ctxt) => ctxt.is_setup_done() as c_int,
        None => 0,
    }
}

/// Get the last error message of this thread.
/// Returns NULL if there is none. The string stays valid until the next call that takes a handle.
#[no_mangle]
pub extern "C" fn equivalenceLastError() -> *const c_char {
    LAST_ERROR.with(|error| match error.borrow().as_ref() {
        Some(message) => message.as_ptr(),
        None => ptr::null(),
    })
}

/// Clear the last error of this thread.
#[no_mangle]
pub extern "C" fn equivalenceClearError() {
    clear_last_error();
}
