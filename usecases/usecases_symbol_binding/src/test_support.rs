//! In-memory loader shared by the unit tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_void, CStr, OsStr};
use std::path::PathBuf;
use std::ptr;
use std::rc::Rc;

use adapters_platform_loader::{LoaderError, PlatformLoader};

#[allow(clippy::approx_constant)]
pub static PI: f32 = 3.14;
pub static ANSWER: u32 = 42;

pub extern "C" fn add(a: i32, b: i32) -> i32 {
    a + b
}

/// Loader that opens any path except "missing" and counts open/close calls
#[derive(Clone, Default)]
pub struct MockLoader {
    exports: Rc<HashMap<&'static str, usize>>,
    opened: Rc<RefCell<Vec<u32>>>,
    closed: Rc<RefCell<Vec<u32>>>,
}

impl MockLoader {
    /// Exports `pi`, `answer` and `add`
    pub fn standard() -> Self {
        let exports = [
            ("pi", &PI as *const f32 as usize),
            ("answer", &ANSWER as *const u32 as usize),
            ("add", add as extern "C" fn(i32, i32) -> i32 as usize),
        ];
        Self {
            exports: Rc::new(exports.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<u32> {
        self.opened.borrow().clone()
    }

    pub fn closed(&self) -> Vec<u32> {
        self.closed.borrow().clone()
    }
}

impl PlatformLoader for MockLoader {
    type Handle = u32;

    unsafe fn open(&self, path: &OsStr) -> Result<u32, LoaderError> {
        if path == "missing" {
            return Err(LoaderError::Open {
                path: PathBuf::from(path),
                reason: "no such file".to_string(),
            });
        }
        let mut opened = self.opened.borrow_mut();
        let handle = opened.len() as u32 + 1;
        opened.push(handle);
        Ok(handle)
    }

    fn lookup(&self, _handle: &u32, name: &CStr) -> *mut c_void {
        name.to_str()
            .ok()
            .and_then(|name| self.exports.get(name))
            .map_or(ptr::null_mut(), |&address| address as *mut c_void)
    }

    fn close(&self, handle: u32) -> Result<(), LoaderError> {
        self.closed.borrow_mut().push(handle);
        Ok(())
    }
}
