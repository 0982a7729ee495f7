//! Entities Layer: Symbol Schemas
//!
//! Provides the compile-time model of a symbol schema: a plain struct whose
//! named fields are slots for addresses exported by a dynamically loaded
//! module.
//!
//! ## Overview
//!
//! A schema type implements [`SymbolSchema`]. The implementation is generated,
//! never hand-written: either by `#[derive(SymbolSchema)]` (re-exported by
//! `api_facades` behind the default `derive` feature) or by the declarative
//! [`symbol_schema!`] macro in this crate. Both produce the same artifacts:
//!
//! - a `const` [`SchemaDescriptor`] holding the ordered (name, type) list
//! - an all-null instance ([`SymbolSchema::unbound`])
//! - a positional binder ([`SymbolSchema::bind`]) that asks a
//!   [`SymbolResolver`] for one address per field in declaration order
//! - a slot visitor ([`SymbolSchema::visit_slots`]) for inspecting a bound
//!   instance after the fact
//!
//! ## Modules
//!
//! - **[`descriptor`](descriptor/index.html)**: field and schema descriptors,
//!   the field ceiling
//! - **[`slot`](slot/index.html)**: the [`SymbolSlot`] trait and its
//!   implementations for data pointers and C function pointers
//! - **[`schema`](schema/index.html)**: the [`SymbolSchema`],
//!   [`SymbolResolver`] and [`SlotVisitor`] traits
//! - **[`declare`](declare/index.html)**: the [`symbol_schema!`] macro
//!
//! ## See Also
//!
//! - [`usecases_symbol_binding`](../usecases_symbol_binding/index.html): binds
//!   schemas against loaded modules

pub mod declare;
pub mod descriptor;
pub mod schema;
pub mod slot;

pub use descriptor::{FieldDescriptor, FieldKind, SchemaDescriptor, MAX_FIELDS};
pub use schema::{SlotVisitor, SymbolResolver, SymbolSchema};
pub use slot::{SlotKind, SymbolSlot};
