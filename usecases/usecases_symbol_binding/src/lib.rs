//! Use Cases Layer: Symbol Binding
//!
//! Provides the runtime half of symbol binding: resolving the slots of a
//! symbol schema against an opened module, and owning the result.
//!
//! ## Overview
//!
//! A [`Library<S>`](Library) opens a module through the platform loader,
//! binds schema `S` against it with the [`SymbolBinder`], and keeps both. By
//! default nothing fails: an unopened module and missing exports surface as
//! null slots, recorded per slot in a [`BindReport`]. [`BindOptions`] selects
//! the fail-fast policy instead.
//!
//! ## Modules
//!
//! - **[`binder`](binder/index.html)**: the [`SymbolBinder`] resolver and
//!   [`bind_schema`]
//!
//! - **[`library`](library/index.html)**: the [`Library`] handle
//!
//! - **[`options`](options/index.html)**: [`BindOptions`] and [`BindPolicy`]
//!
//! - **[`report`](report/index.html)**: per-slot [`BindReport`]
//!
//! - **[`error`](error/index.html)**: [`BindError`]
//!
//! ## See Also
//!
//! - [`entities_symbol_schema`](../../entities/entities_symbol_schema/index.html): schema descriptors and slot types
//! - [`adapters_platform_loader`](../../adapters/adapters_platform_loader/index.html): module open, lookup and close

pub mod binder;
pub mod error;
pub mod library;
pub mod options;
pub mod report;

#[cfg(test)]
mod test_support;

pub use binder::{bind_schema, SymbolBinder};
pub use error::BindError;
pub use library::Library;
pub use options::{BindOptions, BindPolicy};
pub use report::{BindEntry, BindReport, BindStatus};
