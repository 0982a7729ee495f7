//! Symbol Schema Module
//!
//! Traits connecting a schema type to the code that binds it.
//!
//! - [`SymbolSchema`] is implemented for each schema type by the schema macros
//! - [`SymbolResolver`] is implemented by whoever supplies addresses (the
//!   symbol binder in `usecases_symbol_binding`, or a test double)
//! - [`SlotVisitor`] walks the slots of an already bound instance

use std::ffi::c_void;

use crate::descriptor::{FieldDescriptor, SchemaDescriptor};

/// Supplies one address per schema slot during binding.
///
/// [`SymbolSchema::bind`] calls [`resolve`](SymbolResolver::resolve) exactly
/// once per slot, in declaration order. Nested groups are bracketed by
/// [`enter`](SymbolResolver::enter) and [`leave`](SymbolResolver::leave).
pub trait SymbolResolver {
    /// Address of the export named by `field`, or null if it is absent
    fn resolve(&mut self, field: &'static FieldDescriptor) -> *mut c_void;

    /// Called before the slots of nested group `field` are resolved
    fn enter(&mut self, _field: &'static FieldDescriptor) {}

    /// Called after the slots of the innermost entered group are resolved
    fn leave(&mut self) {}
}

impl<F> SymbolResolver for F
where
    F: FnMut(&'static FieldDescriptor) -> *mut c_void,
{
    fn resolve(&mut self, field: &'static FieldDescriptor) -> *mut c_void {
        self(field)
    }
}

/// Receives every slot of a bound schema instance.
pub trait SlotVisitor {
    /// Visit slot `field` holding `address` (null if unresolved)
    fn slot(&mut self, field: &'static FieldDescriptor, address: *const c_void);

    /// Called before the slots of nested group `field` are visited
    fn enter(&mut self, _field: &'static FieldDescriptor) {}

    /// Called after the slots of the innermost entered group are visited
    fn leave(&mut self) {}
}

/// A plain struct of named slots bound from a module's exports.
///
/// Do not implement this trait by hand; use `#[derive(SymbolSchema)]` or the
/// [`symbol_schema!`](crate::symbol_schema) macro, which keep
/// [`FIELDS`](SymbolSchema::FIELDS) and the positional binder in lockstep
/// with the struct declaration.
pub trait SymbolSchema: Sized {
    /// Schema type name
    const NAME: &'static str;

    /// Declared fields in declaration order
    const FIELDS: &'static [FieldDescriptor];

    /// Complete descriptor, computed once per schema type
    const DESCRIPTOR: SchemaDescriptor = SchemaDescriptor::new(Self::NAME, Self::FIELDS);

    /// Instance with every slot null
    fn unbound() -> Self;

    /// Build an instance by resolving every slot through `resolver`.
    ///
    /// # Safety
    ///
    /// Every non-null address the resolver returns is reinterpreted as the
    /// declared slot type. The caller guarantees the types match the exports.
    unsafe fn bind<R: SymbolResolver + ?Sized>(resolver: &mut R) -> Self;

    /// Visit every slot in declaration order
    fn visit_slots<V: SlotVisitor + ?Sized>(&self, visitor: &mut V);

    /// Number of slots holding a resolved address
    fn bound_slot_count(&self) -> usize {
        let mut counter = BoundCounter(0);
        self.visit_slots(&mut counter);
        counter.0
    }

    /// Whether every slot is null
    fn is_unbound(&self) -> bool {
        self.bound_slot_count() == 0
    }
}

struct BoundCounter(usize);

impl SlotVisitor for BoundCounter {
    fn slot(&mut self, _field: &'static FieldDescriptor, address: *const c_void) {
        if !address.is_null() {
            self.0 += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{SlotKind, SymbolSlot};

    /// Hand-expanded schema, equivalent to what the schema macros generate
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Pair {
        left: *const u32,
        right: Option<extern "C" fn() -> u32>,
    }

    impl SymbolSchema for Pair {
        const NAME: &'static str = "Pair";
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::slot("left", "*const u32", <*const u32 as SymbolSlot>::KIND),
            FieldDescriptor::slot(
                "right",
                "Option<extern \"C\" fn() -> u32>",
                <Option<extern "C" fn() -> u32> as SymbolSlot>::KIND,
            ),
        ];

        fn unbound() -> Self {
            Self {
                left: SymbolSlot::NULL,
                right: SymbolSlot::NULL,
            }
        }

        unsafe fn bind<R: SymbolResolver + ?Sized>(resolver: &mut R) -> Self {
            let fields = <Self as SymbolSchema>::FIELDS;
            Self {
                left: SymbolSlot::from_address(resolver.resolve(&fields[0])),
                right: SymbolSlot::from_address(resolver.resolve(&fields[1])),
            }
        }

        fn visit_slots<V: SlotVisitor + ?Sized>(&self, visitor: &mut V) {
            let fields = <Self as SymbolSchema>::FIELDS;
            visitor.slot(&fields[0], SymbolSlot::address(&self.left));
            visitor.slot(&fields[1], SymbolSlot::address(&self.right));
        }
    }

    static LEFT: u32 = 7;

    #[test]
    fn test_descriptor_is_derived_from_fields() {
        let descriptor = <Pair as SymbolSchema>::DESCRIPTOR;
        assert_eq!(descriptor.name(), "Pair");
        assert_eq!(descriptor.arity(), 2);
        assert_eq!(descriptor.fields()[1].slot_kind(), Some(SlotKind::Function));
    }

    #[test]
    fn test_bind_resolves_in_declaration_order() {
        let mut requested = Vec::new();
        let pair = unsafe {
            Pair::bind(&mut |field: &'static FieldDescriptor| {
                requested.push(field.name());
                if field.name() == "left" {
                    &LEFT as *const u32 as *mut c_void
                } else {
                    std::ptr::null_mut()
                }
            })
        };
        assert_eq!(requested, vec!["left", "right"]);
        assert_eq!(unsafe { *pair.left }, 7);
        assert!(pair.right.is_none());
        assert_eq!(pair.bound_slot_count(), 1);
    }

    #[test]
    fn test_unbound_instance_is_all_null() {
        let pair = Pair::unbound();
        assert!(pair.is_unbound());
        assert!(pair.left.is_null());
        assert!(pair.right.is_none());
    }
}
