//! Adapters Layer: Platform Module Loader
//!
//! Provides the operating system side of symbol binding: opening a shared
//! library, looking up its exports by name, and releasing it.
//!
//! ## Overview
//!
//! The `adapters_platform_loader` crate is the only place in the workspace
//! that talks to the OS dynamic linker. Everything above it sees a
//! [`Module`], an exclusive owner of one opened library that is released
//! exactly once, and a name-to-address [`Module::lookup`].
//!
//! ## Modules
//!
//! - **[`loader`](loader/index.html)**: the [`PlatformLoader`] trait and the
//!   `libloading`-backed [`SystemLoader`]
//!
//! - **[`module`](module/index.html)**: the [`Module`] handle
//!
//! ## See Also
//!
//! - [`usecases_symbol_binding`](../../usecases/usecases_symbol_binding/index.html): binds symbol schemas against a [`Module`]

pub mod loader;
pub mod module;

pub use loader::{LoaderError, PlatformLoader, SystemLoader};
pub use module::Module;
