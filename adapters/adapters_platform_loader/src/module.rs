//! Module Handle Module
//!
//! [`Module`] owns at most one opened library handle. It is either *valid*
//! (open) or *invalid* (never opened, failed to open, closed, or moved out
//! of). Opening never fails outright: a loader error produces an invalid
//! module, and every lookup against an invalid module yields null.
//!
//! A valid module is released exactly once: by [`Module::close`], or on drop.
//! [`Module::take`] transfers the handle and leaves the source invalid, so
//! the source's drop releases nothing.

use std::ffi::{c_void, CString, OsStr};
use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr;

use log::{debug, trace, warn};

use crate::loader::{LoaderError, PlatformLoader, SystemLoader};

/// Exclusive owner of one opened module
pub struct Module<L: PlatformLoader = SystemLoader> {
    loader: L,
    handle: Option<L::Handle>,
    path: Option<PathBuf>,
}

impl Module<SystemLoader> {
    /// Open `path` with the system loader, yielding an invalid module on failure.
    ///
    /// # Safety
    ///
    /// See [`PlatformLoader::open`].
    pub unsafe fn open<P: AsRef<OsStr>>(path: P) -> Self {
        unsafe { Self::open_with(SystemLoader, path) }
    }

    /// Open `path` with the system loader, reporting failure.
    ///
    /// # Safety
    ///
    /// See [`PlatformLoader::open`].
    pub unsafe fn try_open<P: AsRef<OsStr>>(path: P) -> Result<Self, LoaderError> {
        unsafe { Self::try_open_with(SystemLoader, path) }
    }
}

impl<L: PlatformLoader> Module<L> {
    /// Module that holds nothing
    pub fn invalid(loader: L) -> Self {
        Self {
            loader,
            handle: None,
            path: None,
        }
    }

    /// Open `path` through `loader`, yielding an invalid module on failure.
    ///
    /// The failure reason is logged at debug level and otherwise dropped; use
    /// [`Module::try_open_with`] to keep it.
    ///
    /// # Safety
    ///
    /// See [`PlatformLoader::open`].
    pub unsafe fn open_with<P: AsRef<OsStr>>(loader: L, path: P) -> Self {
        let path = path.as_ref();
        let handle = match unsafe { loader.open(path) } {
            Ok(handle) => {
                debug!("opened module {}", Path::new(path).display());
                Some(handle)
            }
            Err(e) => {
                debug!("{}", e);
                None
            }
        };
        Self {
            loader,
            handle,
            path: Some(PathBuf::from(path)),
        }
    }

    /// Open `path` through `loader`, reporting failure.
    ///
    /// # Safety
    ///
    /// See [`PlatformLoader::open`].
    pub unsafe fn try_open_with<P: AsRef<OsStr>>(loader: L, path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let handle = unsafe { loader.open(path)? };
        debug!("opened module {}", Path::new(path).display());
        Ok(Self {
            loader,
            handle: Some(handle),
            path: Some(PathBuf::from(path)),
        })
    }

    /// Whether the module is open
    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    /// Path the module was opened from, if any open was attempted
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Underlying loader handle
    pub fn handle(&self) -> Option<&L::Handle> {
        self.handle.as_ref()
    }

    /// Loader this module was opened with
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Address of the export called `name`.
    ///
    /// Null if the module is invalid, the export is absent, or `name`
    /// contains an interior NUL byte. The match is exact and case-sensitive.
    pub fn lookup(&self, name: &str) -> *mut c_void {
        let Some(handle) = &self.handle else {
            return ptr::null_mut();
        };
        match CString::new(name) {
            Ok(symbol) => self.loader.lookup(handle, &symbol),
            Err(_) => {
                trace!("symbol name {:?} contains a NUL byte", name);
                ptr::null_mut()
            }
        }
    }

    /// Release the module now, reporting loader failure.
    ///
    /// Closing an invalid module does nothing.
    pub fn close(mut self) -> Result<(), LoaderError> {
        match self.handle.take() {
            Some(handle) => {
                debug!("closing module {}", self.display_path());
                self.loader.close(handle)
            }
            None => Ok(()),
        }
    }

    /// Move the handle out, leaving this module invalid
    pub fn take(&mut self) -> Self
    where
        L: Clone,
    {
        Self {
            loader: self.loader.clone(),
            handle: self.handle.take(),
            path: self.path.take(),
        }
    }

    fn display_path(&self) -> String {
        self.path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

impl<L: PlatformLoader + Default> Default for Module<L> {
    fn default() -> Self {
        Self::invalid(L::default())
    }
}

impl<L: PlatformLoader> Drop for Module<L> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("closing module {}", self.display_path());
            if let Err(e) = self.loader.close(handle) {
                warn!("{}", e);
            }
        }
    }
}

impl<L: PlatformLoader> fmt::Debug for Module<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("path", &self.path)
            .field("valid", &self.is_valid())
            .finish()
    }
}
