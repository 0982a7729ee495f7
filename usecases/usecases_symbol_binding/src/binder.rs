//! Symbol Binder Module
//!
//! Resolves every slot of a schema against an open [`Module`]. Each slot's
//! declared name is looked up verbatim, in declaration order, one lookup per
//! slot. A missing export leaves its slot null; the binder records the outcome
//! of each lookup in a [`BindReport`] and never fails.

use std::ffi::c_void;

use adapters_platform_loader::{Module, PlatformLoader};
use entities_symbol_schema::{FieldDescriptor, SymbolResolver, SymbolSchema};
use log::trace;

use crate::report::{BindEntry, BindReport, BindStatus};

/// [`SymbolResolver`] that looks slots up in one module
pub struct SymbolBinder<'m, L: PlatformLoader> {
    module: &'m Module<L>,
    groups: Vec<&'static str>,
    report: BindReport,
}

impl<'m, L: PlatformLoader> SymbolBinder<'m, L> {
    pub fn new(module: &'m Module<L>) -> Self {
        Self {
            module,
            groups: Vec::new(),
            report: BindReport::new(),
        }
    }

    /// Outcomes recorded so far
    pub fn report(&self) -> &BindReport {
        &self.report
    }

    pub fn into_report(self) -> BindReport {
        self.report
    }

    fn path_of(&self, field: &FieldDescriptor) -> String {
        if self.groups.is_empty() {
            field.name().to_string()
        } else {
            format!("{}.{}", self.groups.join("."), field.name())
        }
    }
}

impl<L: PlatformLoader> SymbolResolver for SymbolBinder<'_, L> {
    fn resolve(&mut self, field: &'static FieldDescriptor) -> *mut c_void {
        let address = self.module.lookup(field.name());
        let path = self.path_of(field);
        let status = if address.is_null() {
            trace!("symbol {} not found", path);
            BindStatus::Missing
        } else {
            trace!("bound {} to {:p}", path, address);
            BindStatus::Bound
        };
        self.report.push(BindEntry::new(path, field, status));
        address
    }

    fn enter(&mut self, field: &'static FieldDescriptor) {
        self.groups.push(field.name());
    }

    fn leave(&mut self) {
        self.groups.pop();
    }
}

/// Bind schema `S` against `module`.
///
/// Runs whether or not the module is open; against an invalid module every
/// slot comes out null.
///
/// # Safety
///
/// Every export found is reinterpreted as the declared slot type. The caller
/// guarantees the declared types match the module's exports.
pub unsafe fn bind_schema<S, L>(module: &Module<L>) -> (S, BindReport)
where
    S: SymbolSchema,
    L: PlatformLoader,
{
    let mut binder = SymbolBinder::new(module);
    let symbols = unsafe { S::bind(&mut binder) };
    (symbols, binder.into_report())
}
