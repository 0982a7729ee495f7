//! Native fixture library for the binding integration tests.
//!
//! Compiled as a `cdylib` by `tests/support` before the tests run.

#![allow(non_upper_case_globals)]
#![allow(clippy::approx_constant)]

use std::ffi::{c_char, c_void, CStr};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[repr(transparent)]
pub struct Address(*const c_void);

unsafe impl Sync for Address {}

#[no_mangle]
pub static pi: f32 = 3.14;

#[no_mangle]
pub static vptr: Address = Address(1234 as *const c_void);

/// Print `message` and return its length in bytes
///
/// # Safety
///
/// `message` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn print(message: *const c_char) -> usize {
    if message.is_null() {
        return 0;
    }
    let message = unsafe { CStr::from_ptr(message) };
    println!("{}", message.to_string_lossy());
    message.to_bytes().len()
}

#[no_mangle]
pub extern "C" fn foo(a: i32, b: i32) -> Point {
    Point { x: a * 2, y: b + 2 }
}

#[no_mangle]
pub extern "C" fn make_point(a: i32, b: i32) -> *mut Point {
    Box::into_raw(Box::new(Point { x: a * 2, y: b + 2 }))
}

/// # Safety
///
/// `point` must be null or come from `make_point`, and be destroyed once.
#[no_mangle]
pub unsafe extern "C" fn destroy_point(point: *mut Point) {
    if !point.is_null() {
        drop(unsafe { Box::from_raw(point) });
    }
}
