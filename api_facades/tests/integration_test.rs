//! Integration tests for api_facades
//!
//! Exercises the public surface end to end through the facade paths only.

#[path = "../../usecases/usecases_symbol_binding/tests/support/mod.rs"]
mod support;

use api_facades::prelude::*;
use api_facades::{BindError, BindStatus, SlotKind};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(SymbolSchema, Debug)]
#[symbol_schema(crate = "api_facades")]
struct Points {
    make_point: Option<extern "C" fn(i32, i32) -> *mut Point>,
    destroy_point: Option<unsafe extern "C" fn(*mut Point)>,
}

#[derive(SymbolSchema, Debug)]
#[symbol_schema(crate = "api_facades")]
struct Api {
    pi: *const f32,
    foo: Option<extern "C" fn(i32, i32) -> Point>,
    #[symbol(nested)]
    points: Points,
}

#[derive(SymbolSchema, Debug)]
#[symbol_schema(crate = "api_facades")]
struct Keywords {
    r#type: *const u8,
    pi: *const f32,
}

symbol_schema! {
    struct Minimal {
        pi: *const f32,
    }
}

#[test]
fn test_open_through_facade() {
    let library = unsafe { Library::<Api>::open(support::fixture_library()) };
    assert!(library.validate().is_ok());
    assert_eq!(unsafe { *library.pi }, 3.14);
    assert_eq!(library.foo.map(|foo| foo(24, 40)), Some(Point { x: 48, y: 42 }));

    let make_point = library.points.make_point.expect("make_point should be bound");
    let destroy_point = library.points.destroy_point.expect("destroy_point should be bound");
    let point = make_point(-1, 7);
    assert_eq!(unsafe { *point }, Point { x: -2, y: 9 });
    unsafe { destroy_point(point) };
}

#[test]
fn test_schema_introspection() {
    let descriptor = Api::DESCRIPTOR;
    assert_eq!(descriptor.arity(), 3);
    assert_eq!(descriptor.leaf_count(), 4);
    assert_eq!(descriptor.fields()[0].slot_kind(), Some(SlotKind::Data));
    assert_eq!(descriptor.fields()[1].slot_kind(), Some(SlotKind::Function));
    assert_eq!(
        descriptor.fields()[2].nested_schema().map(|group| group.name()),
        Some("Points")
    );
    assert_eq!(Minimal::DESCRIPTOR.arity(), 1);
}

#[test]
fn test_raw_identifier_resolves_plain_name() {
    let library = unsafe { Library::<Keywords>::open(support::fixture_library()) };
    assert_eq!(Keywords::DESCRIPTOR.fields()[0].name(), "type");
    assert!(library.r#type.is_null());
    assert!(!library.pi.is_null());
    assert_eq!(library.report().entries()[0].status(), BindStatus::Missing);
    assert_eq!(library.report().entries()[0].symbol(), "type");
}

#[test]
fn test_fail_fast_through_facade() {
    let library = unsafe {
        Library::<Keywords>::open_with(support::fixture_library(), &BindOptions::fail_fast())
    };
    match library {
        Err(BindError::MissingSymbols { symbols, total }) => {
            assert_eq!(symbols, vec!["type".to_string()]);
            assert_eq!(total, 2);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("fail-fast binding should reject a missing export"),
    }

    let options = BindOptions {
        policy: BindPolicy::Partial,
    };
    let library = unsafe { Library::<Minimal>::open_with(support::missing_library(), &options) };
    let library = library.expect("partial binding does not fail");
    assert!(!library.is_loaded());
    assert!(library.is_unbound());
}
