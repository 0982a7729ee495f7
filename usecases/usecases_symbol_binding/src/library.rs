//! Library Handle Module
//!
//! [`Library`] owns one [`Module`] and the schema instance bound from it. The
//! instance is bound exactly once, at construction, and is read-only
//! afterwards: there is no rebind or refresh.
//!
//! ## Ownership
//!
//! A library is an exclusive claim on its module, so it is not `Clone`.
//! [`Library::take`] moves the module, instance and report out and leaves the
//! source empty (invalid module, all-null instance), which makes the source's
//! drop a no-op. [`std::mem::swap`] exchanges two libraries wholesale. The
//! module is released exactly once, when the library holding it is dropped or
//! explicitly [closed](Library::close).
//!
//! Module validity and slot validity are independent: an open module may still
//! leave slots null, and a library must be checked with
//! [`report`](Library::report) or [`validate`](Library::validate) before a slot
//! is relied upon.
//!
//! ## Threads
//!
//! `Library<S>` is `Send` exactly when `S` is. Raw pointers are neither
//! `Send` nor `Sync`, so a schema with data slots keeps its library on the
//! thread that opened it:
//!
//! ```compile_fail
//! use entities_symbol_schema::symbol_schema;
//! use usecases_symbol_binding::Library;
//!
//! symbol_schema! {
//!     struct Constants {
//!         pi: *const f32,
//!     }
//! }
//!
//! let library = unsafe { Library::<Constants>::open("libconstants.so") };
//! std::thread::spawn(move || drop(library));
//! ```
//!
//! When the exports behind the slots may be used from any thread, the schema
//! type can say so with `unsafe impl Send for Constants {}` (and `Sync`),
//! after which the library moves across threads like any other owned value.

use std::ffi::OsStr;
use std::fmt;
use std::ops::Deref;
use std::path::Path;

use adapters_platform_loader::{LoaderError, Module, PlatformLoader, SystemLoader};
use entities_symbol_schema::SymbolSchema;
use log::debug;

use crate::binder::bind_schema;
use crate::error::BindError;
use crate::options::{BindOptions, BindPolicy};
use crate::report::BindReport;

/// An opened module together with the schema instance bound from it
pub struct Library<S: SymbolSchema, L: PlatformLoader = SystemLoader> {
    module: Module<L>,
    symbols: S,
    report: BindReport,
}

impl<S: SymbolSchema> Library<S, SystemLoader> {
    /// Open `path` and bind `S` against it. Never fails.
    ///
    /// If the module cannot be opened, the library holds an invalid module and
    /// an all-null instance.
    ///
    /// # Safety
    ///
    /// Opening runs the module's initialisation code, and every export found
    /// is reinterpreted as the declared slot type. The caller vouches for the
    /// module and for the schema's types.
    pub unsafe fn open<P: AsRef<OsStr>>(path: P) -> Self {
        unsafe { Self::open_in(SystemLoader, path) }
    }

    /// Open `path` and bind `S` against it under `options`.
    ///
    /// # Safety
    ///
    /// See [`Library::open`].
    pub unsafe fn open_with<P: AsRef<OsStr>>(path: P, options: &BindOptions) -> Result<Self, BindError> {
        unsafe { Self::open_in_with(SystemLoader, path, options) }
    }
}

impl<S: SymbolSchema, L: PlatformLoader> Library<S, L> {
    /// Open `path` through `loader` and bind `S` against it. Never fails.
    ///
    /// # Safety
    ///
    /// See [`Library::open`].
    pub unsafe fn open_in<P: AsRef<OsStr>>(loader: L, path: P) -> Self {
        let module = unsafe { Module::open_with(loader, path) };
        unsafe { Self::from_module(module) }
    }

    /// Open `path` through `loader` and bind `S` against it under `options`.
    ///
    /// With [`BindPolicy::Partial`] this cannot fail. With
    /// [`BindPolicy::FailFast`] an open failure or any missing export is an
    /// error, and the module, if it was opened, is released before returning.
    ///
    /// # Safety
    ///
    /// See [`Library::open`].
    pub unsafe fn open_in_with<P: AsRef<OsStr>>(
        loader: L,
        path: P,
        options: &BindOptions,
    ) -> Result<Self, BindError> {
        match options.policy {
            BindPolicy::Partial => Ok(unsafe { Self::open_in(loader, path) }),
            BindPolicy::FailFast => {
                let module = unsafe { Module::try_open_with(loader, path)? };
                let library = unsafe { Self::from_module(module) };
                library.validate()?;
                Ok(library)
            }
        }
    }

    /// Bind `S` against an already opened `module`, taking ownership of it.
    ///
    /// # Safety
    ///
    /// Every export found is reinterpreted as the declared slot type.
    pub unsafe fn from_module(module: Module<L>) -> Self {
        let (symbols, report) = unsafe { bind_schema::<S, L>(&module) };
        if module.is_valid() && !report.is_complete() {
            debug!(
                "{}: {} symbols missing from {}: {}",
                S::NAME,
                report.missing_count(),
                module
                    .path()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
                report.missing_paths().join(", ")
            );
        }
        Self {
            module,
            symbols,
            report,
        }
    }

    /// Library holding no module and an all-null instance
    pub fn empty(loader: L) -> Self {
        Self {
            module: Module::invalid(loader),
            symbols: S::unbound(),
            report: BindReport::unbound(&S::DESCRIPTOR),
        }
    }

    /// The bound instance.
    ///
    /// Addresses in the instance are only meaningful while this library keeps
    /// the module open.
    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    /// Per-slot outcome of the binding pass
    pub fn report(&self) -> &BindReport {
        &self.report
    }

    pub fn module(&self) -> &Module<L> {
        &self.module
    }

    /// Whether the module is open
    pub fn is_loaded(&self) -> bool {
        self.module.is_valid()
    }

    /// Path the module was opened from
    pub fn path(&self) -> Option<&Path> {
        self.module.path()
    }

    /// Check that the module is open and every slot is bound
    pub fn validate(&self) -> Result<(), BindError> {
        if !self.module.is_valid() {
            return Err(BindError::ModuleNotLoaded);
        }
        if !self.report.is_complete() {
            return Err(BindError::MissingSymbols {
                symbols: self.report.missing_paths(),
                total: self.report.len(),
            });
        }
        Ok(())
    }

    /// Move the module and instance out, leaving this library empty
    pub fn take(&mut self) -> Self
    where
        L: Clone,
    {
        Self {
            module: self.module.take(),
            symbols: std::mem::replace(&mut self.symbols, S::unbound()),
            report: std::mem::replace(&mut self.report, BindReport::unbound(&S::DESCRIPTOR)),
        }
    }

    /// Release the module now, reporting loader failure
    pub fn close(self) -> Result<(), LoaderError> {
        self.module.close()
    }
}

impl<S: SymbolSchema, L: PlatformLoader + Default> Default for Library<S, L> {
    fn default() -> Self {
        Self::empty(L::default())
    }
}

impl<S: SymbolSchema, L: PlatformLoader> Deref for Library<S, L> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.symbols
    }
}

impl<S, L> fmt::Debug for Library<S, L>
where
    S: SymbolSchema + fmt::Debug,
    L: PlatformLoader,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("module", &self.module)
            .field("symbols", &self.symbols)
            .field("report", &self.report)
            .finish()
    }
}
