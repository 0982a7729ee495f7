//! Binding Options Module
//!
//! Caller-selectable behaviour for [`Library::open_with`](crate::Library::open_with).

/// What to do when a module fails to open or a symbol is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindPolicy {
    /// Keep going: an unopened module binds an all-null instance and each
    /// missing export leaves its slot null
    Partial,
    /// Abort: a module that fails to open or lacks any declared export is
    /// reported as an error and released
    FailFast,
}

/// Options for opening a library
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Behaviour on open failure or missing exports
    pub policy: BindPolicy,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            policy: BindPolicy::Partial,
        }
    }
}

impl BindOptions {
    /// Options that tolerate missing exports
    pub fn partial() -> Self {
        Self::default()
    }

    /// Options that reject any missing export
    pub fn fail_fast() -> Self {
        Self {
            policy: BindPolicy::FailFast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_partial() {
        assert_eq!(BindOptions::default().policy, BindPolicy::Partial);
        assert_eq!(BindOptions::partial().policy, BindPolicy::Partial);
        assert_eq!(BindOptions::fail_fast().policy, BindPolicy::FailFast);
    }
}
