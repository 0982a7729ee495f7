//! Symbol Slot Module
//!
//! A slot is a schema field that receives one resolved export address. The
//! [`SymbolSlot`] trait describes how a raw address is reinterpreted as the
//! field's declared type, and how the address is read back out.
//!
//! Supported slot types:
//!
//! - data pointers: `*const T`, `*mut T`, `Option<NonNull<T>>`
//! - function pointers: `Option<extern "C" fn(..) -> R>`,
//!   `Option<unsafe extern "C" fn(..) -> R>` and the `extern "system"`
//!   equivalents, for up to 12 arguments
//!
//! Bare (non-`Option`) function pointers are not slots: an unresolved export
//! must be representable, and a bare function pointer cannot be null.

use std::ffi::c_void;
use std::ptr::{self, NonNull};

/// Category of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Address of exported data
    Data,
    /// Address of an exported function
    Function,
}

/// A schema field type that can hold one resolved export address.
///
/// # Safety
///
/// Implementations must be pointer-sized, must represent the null address as
/// [`SymbolSlot::NULL`], and [`SymbolSlot::address`] must return exactly the
/// address passed to [`SymbolSlot::from_address`].
pub unsafe trait SymbolSlot: Copy {
    /// Data or function slot
    const KIND: SlotKind;

    /// Value of an unresolved slot
    const NULL: Self;

    /// Reinterpret a resolved address as this slot type.
    ///
    /// # Safety
    ///
    /// `address` must be null or point to an export whose real type matches
    /// `Self`. A mismatch is undefined behaviour once the slot is used.
    unsafe fn from_address(address: *mut c_void) -> Self;

    /// Address held by the slot, null if unresolved
    fn address(&self) -> *const c_void;

    /// Whether the slot holds a resolved address
    fn is_bound(&self) -> bool {
        !self.address().is_null()
    }
}

unsafe impl<T> SymbolSlot for *const T {
    const KIND: SlotKind = SlotKind::Data;
    const NULL: Self = ptr::null();

    unsafe fn from_address(address: *mut c_void) -> Self {
        address as *const T
    }

    fn address(&self) -> *const c_void {
        *self as *const c_void
    }
}

unsafe impl<T> SymbolSlot for *mut T {
    const KIND: SlotKind = SlotKind::Data;
    const NULL: Self = ptr::null_mut();

    unsafe fn from_address(address: *mut c_void) -> Self {
        address as *mut T
    }

    fn address(&self) -> *const c_void {
        *self as *const c_void
    }
}

unsafe impl<T> SymbolSlot for Option<NonNull<T>> {
    const KIND: SlotKind = SlotKind::Data;
    const NULL: Self = None;

    unsafe fn from_address(address: *mut c_void) -> Self {
        NonNull::new(address as *mut T)
    }

    fn address(&self) -> *const c_void {
        match self {
            Some(pointer) => pointer.as_ptr() as *const c_void,
            None => ptr::null(),
        }
    }
}

macro_rules! impl_function_slot {
    ($($arg:ident),*) => {
        impl_function_slot!(@abi "C"; $($arg),*);
        impl_function_slot!(@abi "system"; $($arg),*);
    };
    (@abi $abi:tt; $($arg:ident),*) => {
        unsafe impl<R $(, $arg)*> SymbolSlot for Option<extern $abi fn($($arg),*) -> R> {
            const KIND: SlotKind = SlotKind::Function;
            const NULL: Self = None;

            unsafe fn from_address(address: *mut c_void) -> Self {
                // Option<fn> is pointer-sized with None at null.
                std::mem::transmute_copy::<*mut c_void, Self>(&address)
            }

            fn address(&self) -> *const c_void {
                match self {
                    Some(function) => *function as *const c_void,
                    None => ptr::null(),
                }
            }
        }

        unsafe impl<R $(, $arg)*> SymbolSlot for Option<unsafe extern $abi fn($($arg),*) -> R> {
            const KIND: SlotKind = SlotKind::Function;
            const NULL: Self = None;

            unsafe fn from_address(address: *mut c_void) -> Self {
                std::mem::transmute_copy::<*mut c_void, Self>(&address)
            }

            fn address(&self) -> *const c_void {
                match self {
                    Some(function) => *function as *const c_void,
                    None => ptr::null(),
                }
            }
        }
    };
}

impl_function_slot!();
impl_function_slot!(A1);
impl_function_slot!(A1, A2);
impl_function_slot!(A1, A2, A3);
impl_function_slot!(A1, A2, A3, A4);
impl_function_slot!(A1, A2, A3, A4, A5);
impl_function_slot!(A1, A2, A3, A4, A5, A6);
impl_function_slot!(A1, A2, A3, A4, A5, A6, A7);
impl_function_slot!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_function_slot!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_function_slot!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_function_slot!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_function_slot!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn double_it(value: i32) -> i32 {
        value * 2
    }

    static ANSWER: u64 = 42;

    #[test]
    fn test_data_slot_round_trip() {
        let address = &ANSWER as *const u64 as *mut c_void;
        let slot = unsafe { <*const u64 as SymbolSlot>::from_address(address) };
        assert!(slot.is_bound());
        assert_eq!(unsafe { *slot }, 42);
        assert_eq!(slot.address(), address as *const c_void);
    }

    #[test]
    fn test_null_address_leaves_slot_unbound() {
        let data = unsafe { <*mut u8 as SymbolSlot>::from_address(ptr::null_mut()) };
        assert!(!data.is_bound());

        let non_null = unsafe { <Option<NonNull<u8>> as SymbolSlot>::from_address(ptr::null_mut()) };
        assert!(non_null.is_none());

        let function =
            unsafe { <Option<extern "C" fn(i32) -> i32> as SymbolSlot>::from_address(ptr::null_mut()) };
        assert!(function.is_none());
        assert!(function.address().is_null());
    }

    #[test]
    fn test_function_slot_is_callable() {
        let address = double_it as extern "C" fn(i32) -> i32 as *mut c_void;
        let slot = unsafe { <Option<extern "C" fn(i32) -> i32> as SymbolSlot>::from_address(address) };
        let function = slot.expect("function slot should be bound");
        assert_eq!(function(21), 42);
        assert_eq!(slot.address(), address as *const c_void);
    }

    #[test]
    fn test_slot_kinds_and_null_constants() {
        assert_eq!(<*const f32 as SymbolSlot>::KIND, SlotKind::Data);
        assert_eq!(<Option<NonNull<f32>> as SymbolSlot>::KIND, SlotKind::Data);
        assert_eq!(<Option<unsafe extern "C" fn()> as SymbolSlot>::KIND, SlotKind::Function);
        assert_eq!(
            <Option<extern "system" fn(u32, u32) -> u32> as SymbolSlot>::KIND,
            SlotKind::Function
        );
        assert!(!<*const f32 as SymbolSlot>::NULL.is_bound());
        assert!(!<Option<unsafe extern "C" fn(i32)> as SymbolSlot>::NULL.is_bound());
    }
}
