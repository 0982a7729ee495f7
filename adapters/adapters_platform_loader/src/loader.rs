//! Platform Loader Module
//!
//! The OS-facing seam of the crate: open a shared library, look up an export
//! by name, close the library. [`PlatformLoader`] abstracts the three
//! primitives; [`SystemLoader`] implements them with `libloading`, which maps
//! to `dlopen`/`dlsym`/`dlclose` on Unix and
//! `LoadLibrary`/`GetProcAddress`/`FreeLibrary` on Windows.
//!
//! The OS loader reference-counts libraries process-wide. Opening the same
//! path twice yields two handles to one mapping; the mapping goes away when
//! the last handle is closed.

use std::ffi::{c_void, CStr, OsStr};
use std::path::PathBuf;
use std::ptr;

use thiserror::Error;

/// Errors reported by a platform loader
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    /// The OS loader could not find or open the module
    #[error("failed to open module '{}': {reason}", path.display())]
    Open {
        /// Path passed to the loader
        path: PathBuf,
        /// Loader diagnostic
        reason: String,
    },
    /// The OS loader refused to release the module
    #[error("failed to close module: {reason}")]
    Close {
        /// Loader diagnostic
        reason: String,
    },
}

/// Open, look up and close primitives of an OS module loader.
pub trait PlatformLoader {
    /// Owned handle to one opened module
    type Handle;

    /// Open the module at `path`.
    ///
    /// # Safety
    ///
    /// Opening a module runs its initialisation routines, which may do
    /// anything. The caller vouches for the module.
    unsafe fn open(&self, path: &OsStr) -> Result<Self::Handle, LoaderError>;

    /// Address of the export called `name`, or null if there is none
    fn lookup(&self, handle: &Self::Handle, name: &CStr) -> *mut c_void;

    /// Release `handle`
    fn close(&self, handle: Self::Handle) -> Result<(), LoaderError>;
}

/// Loader backed by the operating system's dynamic linker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemLoader;

impl PlatformLoader for SystemLoader {
    type Handle = libloading::Library;

    unsafe fn open(&self, path: &OsStr) -> Result<Self::Handle, LoaderError> {
        // Resolve everything up front and keep the exports out of the global
        // namespace.
        #[cfg(unix)]
        let result = unsafe {
            use libloading::os::unix::{Library, RTLD_LOCAL, RTLD_NOW};
            Library::open(Some(path), RTLD_NOW | RTLD_LOCAL).map(libloading::Library::from)
        };
        #[cfg(not(unix))]
        let result = unsafe { libloading::Library::new(path) };

        result.map_err(|e| LoaderError::Open {
            path: PathBuf::from(path),
            reason: e.to_string(),
        })
    }

    fn lookup(&self, handle: &Self::Handle, name: &CStr) -> *mut c_void {
        // SAFETY: the export is only read as an untyped address here; the
        // typed reinterpretation happens in the schema binder.
        match unsafe { handle.get::<*mut c_void>(name.to_bytes_with_nul()) } {
            Ok(symbol) => *symbol,
            Err(_) => ptr::null_mut(),
        }
    }

    fn close(&self, handle: Self::Handle) -> Result<(), LoaderError> {
        handle.close().map_err(|e| LoaderError::Close {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_module_fails() {
        let loader = SystemLoader;
        let result = unsafe { loader.open(OsStr::new("/nonexistent/dir/libmissing.so")) };
        match result {
            Err(LoaderError::Open { path, reason }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/dir/libmissing.so"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected open failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_loader_error_display() {
        let open = LoaderError::Open {
            path: PathBuf::from("libfoo.so"),
            reason: "not found".to_string(),
        };
        assert_eq!(open.to_string(), "failed to open module 'libfoo.so': not found");

        let close = LoaderError::Close {
            reason: "busy".to_string(),
        };
        assert_eq!(close.to_string(), "failed to close module: busy");
    }
}
