//! Declarative Schema Module
//!
//! Provides [`symbol_schema!`](crate::symbol_schema), the schema declaration
//! path that needs no procedural macro. It accepts a plain struct declaration,
//! emits the struct unchanged, and implements
//! [`SymbolSchema`](crate::SymbolSchema) for it.
//!
//! Only flat schemas are accepted here; nested groups need
//! `#[derive(SymbolSchema)]`. The field ceiling is enforced by a `const`
//! assertion, so an oversized schema fails to compile.

/// Declare a flat symbol schema.
///
/// # Examples
///
/// ```rust
/// use entities_symbol_schema::{symbol_schema, SymbolSchema};
///
/// symbol_schema! {
///     #[derive(Debug, Clone, Copy)]
///     pub struct MathLib {
///         pub pi: *const f32,
///         pub add: Option<unsafe extern "C" fn(i32, i32) -> i32>,
///     }
/// }
///
/// assert_eq!(MathLib::DESCRIPTOR.arity(), 2);
/// assert_eq!(MathLib::FIELDS[1].name(), "add");
/// ```
///
/// A schema with more than [`MAX_FIELDS`](crate::MAX_FIELDS) fields does not
/// compile:
///
/// ```compile_fail
/// use entities_symbol_schema::symbol_schema;
///
/// symbol_schema! {
///     struct TooWide {
///         f0: *const u8,
///         f1: *const u8,
///         f2: *const u8,
///         f3: *const u8,
///         f4: *const u8,
///         f5: *const u8,
///         f6: *const u8,
///         f7: *const u8,
///         f8: *const u8,
///         f9: *const u8,
///         f10: *const u8,
///         f11: *const u8,
///         f12: *const u8,
///         f13: *const u8,
///         f14: *const u8,
///         f15: *const u8,
///         f16: *const u8,
///         f17: *const u8,
///         f18: *const u8,
///         f19: *const u8,
///         f20: *const u8,
///         f21: *const u8,
///         f22: *const u8,
///         f23: *const u8,
///         f24: *const u8,
///         f25: *const u8,
///         f26: *const u8,
///         f27: *const u8,
///         f28: *const u8,
///         f29: *const u8,
///         f30: *const u8,
///         f31: *const u8,
///         f32: *const u8,
///         f33: *const u8,
///         f34: *const u8,
///         f35: *const u8,
///         f36: *const u8,
///         f37: *const u8,
///         f38: *const u8,
///         f39: *const u8,
///         f40: *const u8,
///         f41: *const u8,
///         f42: *const u8,
///         f43: *const u8,
///         f44: *const u8,
///         f45: *const u8,
///         f46: *const u8,
///         f47: *const u8,
///         f48: *const u8,
///         f49: *const u8,
///         f50: *const u8,
///         f51: *const u8,
///         f52: *const u8,
///         f53: *const u8,
///         f54: *const u8,
///         f55: *const u8,
///         f56: *const u8,
///         f57: *const u8,
///         f58: *const u8,
///         f59: *const u8,
///         f60: *const u8,
///         f61: *const u8,
///         f62: *const u8,
///         f63: *const u8,
///         f64: *const u8,
///     }
/// }
/// ```
#[macro_export]
macro_rules! symbol_schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::SymbolSchema for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [$crate::FieldDescriptor] = &[
                $(
                    $crate::FieldDescriptor::slot(
                        stringify!($field),
                        stringify!($ty),
                        <$ty as $crate::SymbolSlot>::KIND,
                    ),
                )*
            ];

            fn unbound() -> Self {
                Self {
                    $( $field: <$ty as $crate::SymbolSlot>::NULL, )*
                }
            }

            #[allow(unused_unsafe, unused_variables, unused_mut)]
            unsafe fn bind<R: $crate::SymbolResolver + ?Sized>(resolver: &mut R) -> Self {
                let mut fields = <Self as $crate::SymbolSchema>::FIELDS.iter();
                Self {
                    $(
                        $field: match fields.next() {
                            Some(field) => unsafe {
                                <$ty as $crate::SymbolSlot>::from_address(resolver.resolve(field))
                            },
                            None => <$ty as $crate::SymbolSlot>::NULL,
                        },
                    )*
                }
            }

            #[allow(unused_variables, unused_mut)]
            fn visit_slots<V: $crate::SlotVisitor + ?Sized>(&self, visitor: &mut V) {
                let mut fields = <Self as $crate::SymbolSchema>::FIELDS.iter();
                $(
                    if let Some(field) = fields.next() {
                        $crate::SlotVisitor::slot(
                            visitor,
                            field,
                            <$ty as $crate::SymbolSlot>::address(&self.$field),
                        );
                    }
                )*
            }
        }

        const _: () = assert!(
            <$name as $crate::SymbolSchema>::FIELDS.len() <= $crate::MAX_FIELDS,
            "symbol schema exceeds the supported field ceiling"
        );
    };
}
