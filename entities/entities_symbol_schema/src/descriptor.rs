//! Schema Descriptor Module
//!
//! Compile-time metadata for a symbol schema: the ordered list of
//! (field name, field type) pairs that drives symbol binding.
//!
//! A [`SchemaDescriptor`] is a `const` value produced once per schema type by
//! the schema macros. It has no runtime representation cost beyond the static
//! tables it points to, and it never changes after compilation.
//!
//! ## Arity
//!
//! The arity of a schema is the number of declared top-level fields. A nested
//! group (a field whose type is itself a schema) counts as one field, no
//! matter how many slots it contains. [`SchemaDescriptor::leaf_count`] reports
//! the number of bindable slots instead, descending into nested groups. The
//! two numbers are what distinguish `{a, b, inner: {c, d}}` (arity 3) from the
//! flat `{a, b, c, d}` (arity 4) even though both bind four symbols.

use crate::slot::SlotKind;

/// Maximum number of top-level fields a schema may declare.
///
/// Exceeding the ceiling is a compile error on every schema declaration
/// path; it can never surface at runtime.
pub const MAX_FIELDS: usize = 64;

/// What a schema field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single resolved address (data pointer or function pointer)
    Slot(SlotKind),
    /// A nested group whose own fields are bound individually
    Nested(SchemaDescriptor),
}

/// Metadata for one declared schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Describe a slot field.
    ///
    /// A leading `r#` on `name` is stripped, so a field declared as `r#type`
    /// binds the export literally named `type`.
    pub const fn slot(name: &'static str, type_name: &'static str, kind: SlotKind) -> Self {
        Self {
            name: unraw(name),
            type_name,
            kind: FieldKind::Slot(kind),
        }
    }

    /// Describe a nested group field.
    pub const fn nested(
        name: &'static str,
        type_name: &'static str,
        schema: SchemaDescriptor,
    ) -> Self {
        Self {
            name: unraw(name),
            type_name,
            kind: FieldKind::Nested(schema),
        }
    }

    /// Declared field name; also the exported symbol name for slot fields
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared field type as written in the schema
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Slot or nested group
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Slot kind, or `None` for a nested group
    pub const fn slot_kind(&self) -> Option<SlotKind> {
        match self.kind {
            FieldKind::Slot(kind) => Some(kind),
            FieldKind::Nested(_) => None,
        }
    }

    /// Nested schema, or `None` for a slot
    pub const fn nested_schema(&self) -> Option<SchemaDescriptor> {
        match self.kind {
            FieldKind::Slot(_) => None,
            FieldKind::Nested(schema) => Some(schema),
        }
    }
}

/// Ordered field list of one schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl SchemaDescriptor {
    /// Create a schema descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `fields` is longer than [`MAX_FIELDS`]. The schema macros
    /// only call this in `const` context, where the panic is a compile error;
    /// a call evaluated at runtime panics at runtime.
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        assert!(
            fields.len() <= MAX_FIELDS,
            "symbol schema exceeds the supported field ceiling"
        );
        Self { name, fields }
    }

    /// Schema type name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields in declaration order
    pub const fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Number of declared top-level fields
    pub const fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Number of bindable slots, counting through nested groups
    pub const fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut index = 0;
        while index < self.fields.len() {
            count += match self.fields[index].kind {
                FieldKind::Slot(_) => 1,
                FieldKind::Nested(group) => group.leaf_count(),
            };
            index += 1;
        }
        count
    }

    /// Field at `index`
    pub fn field(&self, index: usize) -> Option<&'static FieldDescriptor> {
        self.fields.get(index)
    }

    /// Position of the field called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Iterate over field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }

    /// Whether every top-level field name occurs once
    pub fn has_unique_names(&self) -> bool {
        self.fields
            .iter()
            .enumerate()
            .all(|(index, field)| self.fields[..index].iter().all(|earlier| earlier.name != field.name))
    }

    /// Flatten the schema into its bindable slots.
    ///
    /// Each entry pairs a dotted path (`inner.c` for slot `c` of nested group
    /// `inner`) with the slot's descriptor. Order matches binding order.
    pub fn leaves(&self) -> Vec<(String, &'static FieldDescriptor)> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        collect_leaves(self.fields, "", &mut leaves);
        leaves
    }
}

fn collect_leaves(
    fields: &'static [FieldDescriptor],
    prefix: &str,
    out: &mut Vec<(String, &'static FieldDescriptor)>,
) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        match field.kind {
            FieldKind::Slot(_) => out.push((path, field)),
            FieldKind::Nested(group) => collect_leaves(group.fields, &path, out),
        }
    }
}

/// Strip the raw identifier prefix from a stringified field name
const fn unraw(name: &'static str) -> &'static str {
    let bytes = name.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'r' && bytes[1] == b'#' {
        let (_, rest) = bytes.split_at(2);
        match core::str::from_utf8(rest) {
            Ok(stripped) => stripped,
            Err(_) => name,
        }
    } else {
        name
    }
}
