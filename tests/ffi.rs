use {
    std::{
        ffi::{CStr, CString},
        os::raw::c_char,
        ptr,
    },
    equivalence::ffi::*,
};

fn c(reference: &str) -> CString {
    CString::new(reference).unwrap()
}

#[test]
fn values_flow_through_equivalent_references() {
    unsafe {
        let ctxt = allocNewEquivalenceCtxt();

        equivate(ctxt, c("x.a").as_ptr(), c("x.b").as_ptr());
        setParameter(ctxt, c("x.a").as_ptr(), 3.14);

        assert_eq!(getParameter(ctxt, c("x.b").as_ptr()), 3.14);
        assert_eq!(getParameter(ctxt, c("x.a").as_ptr()), 3.14);

        freeEquivalenceCtxt(ctxt);
    }
}

#[test]
fn missing_value_is_reported() {
    unsafe {
        let ctxt = allocNewEquivalenceCtxt();
        equivalenceClearError();

        assert!(getParameter(ctxt, c("unseen").as_ptr()).is_nan());

        let message = CStr::from_ptr(equivalenceLastError()).to_str().unwrap();
        assert!(message.contains("unseen"));

        let mut value = 1.0;
        let code = getParameterChecked(ctxt, c("unseen").as_ptr(), &mut value);
        assert_eq!(code, ErrorCode::NoValue as i32);
        assert_eq!(value, 1.0);

        setParameter(ctxt, c("unseen").as_ptr(), 2.5);
        let code = getParameterChecked(ctxt, c("unseen").as_ptr(), &mut value);
        assert_eq!(code, ErrorCode::Ok as i32);
        assert_eq!(value, 2.5);

        equivalenceClearError();
        assert!(equivalenceLastError().is_null());

        freeEquivalenceCtxt(ctxt);
    }
}

fn last_error() -> Option<String> {
    let message = equivalenceLastError();

    if message.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(message) }.to_str().unwrap().to_owned())
    }
}

#[test]
fn invalid_utf8_references_are_rejected() {
    let first = b"\xff\0".as_ptr() as *const c_char;
    let second = b"\xfe\0".as_ptr() as *const c_char;

    unsafe {
        let ctxt = allocNewEquivalenceCtxt();

        setParameter(ctxt, first, 1.0);
        assert!(last_error().unwrap().contains("UTF-8"));

        let mut value = 0.0;
        assert_eq!(getParameterChecked(ctxt, second, &mut value), ErrorCode::InvalidArgument as i32);
        assert_eq!(getParameterChecked(ctxt, first, &mut value), ErrorCode::InvalidArgument as i32);
        assert_eq!(value, 0.0);

        equivate(ctxt, c("a").as_ptr(), second);
        assert!(last_error().unwrap().contains("UTF-8"));

        // Nothing was registered, so "a" is still unknown and has no value.
        setParameter(ctxt, c("b").as_ptr(), 2.0);
        assert_eq!(getParameterChecked(ctxt, c("a").as_ptr(), &mut value), ErrorCode::NoValue as i32);

        freeEquivalenceCtxt(ctxt);
    }
}

#[test]
fn stored_nan_is_told_apart_from_missing_value() {
    unsafe {
        let ctxt = allocNewEquivalenceCtxt();

        assert!(getParameter(ctxt, c("k").as_ptr()).is_nan());
        assert!(last_error().is_some());

        setParameter(ctxt, c("k").as_ptr(), std::f64::NAN);
        assert_eq!(last_error(), None);

        assert!(getParameter(ctxt, c("k").as_ptr()).is_nan());
        assert_eq!(last_error(), None);

        let mut value = 0.0;
        assert_eq!(getParameterChecked(ctxt, c("k").as_ptr(), &mut value), ErrorCode::Ok as i32);
        assert!(value.is_nan());

        freeEquivalenceCtxt(ctxt);
    }
}

#[test]
fn last_error_belongs_to_the_last_call() {
    unsafe {
        let ctxt = allocNewEquivalenceCtxt();

        getParameter(ctxt, c("first").as_ptr());
        assert!(last_error().unwrap().contains("first"));

        getParameter(ctxt, c("second").as_ptr());
        let message = last_error().unwrap();
        assert!(message.contains("second"));
        assert!(!message.contains("first"));

        assert_eq!(isSetupDone(ctxt), 0);
        assert_eq!(last_error(), None);

        freeEquivalenceCtxt(ctxt);
    }
}

#[test]
fn setup_flag_is_one_shot() {
    unsafe {
        let ctxt = allocNewEquivalenceCtxt();

        assert_eq!(isSetupDone(ctxt), 0);
        assert_eq!(markSetupDone(ctxt), 1);
        assert_eq!(isSetupDone(ctxt), 1);
        assert_eq!(markSetupDone(ctxt), 0);
        assert_eq!(isSetupDone(ctxt), 1);

        freeEquivalenceCtxt(ctxt);
    }
}

#[test]
fn null_arguments_are_rejected() {
    unsafe {
        let ctxt = allocNewEquivalenceCtxt();

        equivate(ctxt, ptr::null(), c("a").as_ptr());
        setParameter(ctxt, ptr::null(), 1.0);
        assert!(getParameter(ctxt, ptr::null()).is_nan());
        assert_eq!(
            getParameterChecked(ctxt, c("a").as_ptr(), ptr::null_mut()),
            ErrorCode::InvalidArgument as i32,
        );

        assert!(getParameter(ptr::null_mut(), c("a").as_ptr()).is_nan());
        assert_eq!(markSetupDone(ptr::null_mut()), 0);
        assert_eq!(isSetupDone(ptr::null_mut()), 0);

        freeEquivalenceCtxt(ctxt);
        freeEquivalenceCtxt(ptr::null_mut());
    }
}
