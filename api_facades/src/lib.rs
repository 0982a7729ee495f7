//! API Facades Layer
//!
//! Single entry point for binding a shared library's exports into a typed
//! struct of named slots.
//!
//! Declare the slots once, as a plain struct; the field names are the export
//! names. Open the library and read the bound slots through the handle:
//!
//! ```no_run
//! use std::ffi::c_char;
//!
//! use api_facades::prelude::*;
//!
//! #[derive(SymbolSchema)]
//! #[symbol_schema(crate = "api_facades")]
//! struct Api {
//!     pi: *const f32,
//!     print: Option<unsafe extern "C" fn(*const c_char) -> usize>,
//! }
//!
//! let library = unsafe { Library::<Api>::open("./libtestlib.so") };
//! if let Some(print) = library.print {
//!     unsafe { print(b"hello\0".as_ptr() as *const c_char) };
//! }
//! if !library.pi.is_null() {
//!     println!("pi = {}", unsafe { *library.pi });
//! }
//! ```
//!
//! Slots whose export is missing are left null. Check
//! [`Library::report`] or [`Library::validate`], or open with
//! [`BindOptions::fail_fast`] to turn any missing export into an error.
//!
//! The derive is behind the default `derive` feature. Without it, schemas are
//! declared with [`symbol_schema!`], which accepts flat schemas only.

pub use adapters_platform_loader::{LoaderError, Module, PlatformLoader, SystemLoader};
pub use entities_symbol_schema::{
    symbol_schema, FieldDescriptor, FieldKind, SchemaDescriptor, SlotKind, SlotVisitor,
    SymbolResolver, SymbolSchema, SymbolSlot, MAX_FIELDS,
};
#[cfg(feature = "derive")]
pub use infrastructure_schema_derive::SymbolSchema;
pub use usecases_symbol_binding::{
    bind_schema, BindEntry, BindError, BindOptions, BindPolicy, BindReport, BindStatus, Library,
    SymbolBinder,
};

/// Everything needed to declare a schema and open a library
pub mod prelude {
    pub use crate::{symbol_schema, BindOptions, BindPolicy, Library, SymbolSchema};
}
