//! Binding Error Module

use adapters_platform_loader::LoaderError;
use thiserror::Error;

/// Errors reported by the fail-fast policy and by [`Library::validate`](crate::Library::validate)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The module could not be opened
    #[error(transparent)]
    ModuleOpen(#[from] LoaderError),
    /// The handle holds no open module
    #[error("module is not loaded")]
    ModuleNotLoaded,
    /// Declared exports were not found
    #[error(
        "{count} of {total} symbols not found: {names}",
        count = .symbols.len(),
        names = .symbols.join(", ")
    )]
    MissingSymbols {
        /// Dotted paths of the missing slots
        symbols: Vec<String>,
        /// Number of slots in the schema
        total: usize,
    },
}
