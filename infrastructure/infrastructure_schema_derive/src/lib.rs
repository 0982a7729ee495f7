//! Infrastructure Layer: Symbol Schema Derive
//!
//! Provides `#[derive(SymbolSchema)]`, the attribute-based way to declare a
//! symbol schema.
//!
//! ## Overview
//!
//! The derive reads a struct with named fields and implements
//! `entities_symbol_schema::SymbolSchema` for it. Each field is either a slot
//! (its type implements `SymbolSlot`) or, when marked `#[symbol(nested)]`, a
//! nested group (its type is itself a schema).
//!
//! ```ignore
//! use api_facades::SymbolSchema;
//!
//! #[derive(SymbolSchema)]
//! #[symbol_schema(crate = "api_facades")]
//! struct Api {
//!     pi: *const f32,
//!     foo: Option<unsafe extern "C" fn(i32, i32) -> Point>,
//!     #[symbol(nested)]
//!     points: PointApi,
//! }
//! ```
//!
//! ## Attributes
//!
//! - `#[symbol_schema(crate = "path")]` on the struct: path under which the
//!   schema traits are reachable. Defaults to `::entities_symbol_schema`.
//! - `#[symbol(nested)]` on a field: bind the field as a nested group.
//!
//! Generic structs, tuple structs, enums and unions are rejected, as is any
//! struct with more top-level fields than the supported ceiling.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod expand;

/// Derive `SymbolSchema` for a struct of named slots.
#[proc_macro_derive(SymbolSchema, attributes(symbol, symbol_schema))]
pub fn derive_symbol_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand::expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
