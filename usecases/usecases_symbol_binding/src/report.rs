//! Binding Report Module
//!
//! Per-slot outcome of one binding pass. Slots appear in binding order; slots
//! of nested groups are identified by their dotted path (`points.make_point`).

use std::fmt;

use entities_symbol_schema::{FieldDescriptor, SchemaDescriptor};

/// Whether a slot received an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
    /// The export was found
    Bound,
    /// The export was not found, or the module was not open
    Missing,
}

/// Outcome for one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindEntry {
    path: String,
    field: &'static FieldDescriptor,
    status: BindStatus,
}

impl BindEntry {
    pub(crate) fn new(path: String, field: &'static FieldDescriptor, status: BindStatus) -> Self {
        Self {
            path,
            field,
            status,
        }
    }

    /// Dotted path of the slot within the schema
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Exported symbol name that was looked up
    pub fn symbol(&self) -> &'static str {
        self.field.name()
    }

    /// Descriptor of the slot
    pub fn field(&self) -> &'static FieldDescriptor {
        self.field
    }

    pub fn status(&self) -> BindStatus {
        self.status
    }

    pub fn is_bound(&self) -> bool {
        self.status == BindStatus::Bound
    }
}

/// Outcome of binding every slot of one schema instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    entries: Vec<BindEntry>,
}

impl BindReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for an instance that was never bound: every slot missing
    pub fn unbound(descriptor: &SchemaDescriptor) -> Self {
        Self {
            entries: descriptor
                .leaves()
                .into_iter()
                .map(|(path, field)| BindEntry::new(path, field, BindStatus::Missing))
                .collect(),
        }
    }

    pub(crate) fn push(&mut self, entry: BindEntry) {
        self.entries.push(entry);
    }

    /// All slots in binding order
    pub fn entries(&self) -> &[BindEntry] {
        &self.entries
    }

    /// Slots whose export was not found
    pub fn missing(&self) -> impl Iterator<Item = &BindEntry> {
        self.entries.iter().filter(|entry| !entry.is_bound())
    }

    /// Dotted paths of the missing slots
    pub fn missing_paths(&self) -> Vec<String> {
        self.missing().map(|entry| entry.path.clone()).collect()
    }

    pub fn bound_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_bound()).count()
    }

    pub fn missing_count(&self) -> usize {
        self.entries.len() - self.bound_count()
    }

    /// Whether every slot was bound
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(BindEntry::is_bound)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for BindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} symbols bound", self.bound_count(), self.len())?;
        let missing = self.missing_paths();
        if !missing.is_empty() {
            write!(f, " (missing: {})", missing.join(", "))?;
        }
        Ok(())
    }
}
