//! Unit tests for the type checker module.
//!
//! Covers the equality and subtype engines on hand-written types, the
//! environment, variant selection and the checker options.

use std::sync::Arc;

use super::{
    environment::Environment,
    equality::{alpha_eq, type_eq},
    subtype::is_subtype,
    type_checker::{type_check, CheckerOptions, TypeChecker, Variant},
};
use crate::{
    ast::{ast::Term, types::Type},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

fn parse_source(source: &str) -> Term {
    let tokens = tokenize(source, Some("test.ts".to_string())).unwrap();
    parse(tokens, Arc::new("test.ts".to_string())).unwrap()
}

fn position() -> Position {
    Position(0, Arc::new("test.ts".to_string()))
}

fn field(name: &str, ty: Type) -> (String, Type) {
    (name.to_string(), ty)
}

/// `μname.{ next: () => name }`
fn stream(name: &str) -> Type {
    Type::rec(name, Type::object(vec![field("next", Type::function(vec![], Type::var(name)))]))
}

#[test]
fn test_type_eq_atomic() {
    assert!(type_eq(&Type::Number, &Type::Number));
    assert!(type_eq(&Type::Boolean, &Type::Boolean));
    assert!(!type_eq(&Type::Number, &Type::Boolean));
}

#[test]
fn test_type_eq_ignores_parameter_names() {
    let left = Type::function(vec![field("x", Type::Number)], Type::Boolean);
    let right = Type::function(vec![field("y", Type::Number)], Type::Boolean);
    assert!(type_eq(&left, &right));

    let wrong_arity = Type::function(vec![], Type::Boolean);
    assert!(!type_eq(&left, &wrong_arity));
}

#[test]
fn test_type_eq_objects_ignore_order_but_require_same_keys() {
    let left = Type::object(vec![field("a", Type::Number), field("b", Type::Boolean)]);
    let reordered = Type::object(vec![field("b", Type::Boolean), field("a", Type::Number)]);
    let wider = Type::object(vec![
        field("a", Type::Number),
        field("b", Type::Boolean),
        field("c", Type::Number),
    ]);

    assert!(type_eq(&left, &reordered));
    assert!(!type_eq(&left, &wider));
    assert!(!type_eq(&wider, &left));
}

#[test]
fn test_type_eq_recursive_types_with_different_binders() {
    assert!(type_eq(&stream("A"), &stream("B")));
}

#[test]
fn test_type_eq_recursive_type_and_its_unfolding() {
    let rec = stream("S");
    let unfolded = rec.simplify();

    assert!(matches!(unfolded, Type::Object(_)));
    assert!(type_eq(&rec, &unfolded));
    assert!(type_eq(&unfolded, &rec));
}

#[test]
fn test_type_eq_interleaved_recursive_types() {
    // μC.{ c: { d: C } } against { c: μD.{ d: { c: D } } }
    let c = Type::rec(
        "C",
        Type::object(vec![field("c", Type::object(vec![field("d", Type::var("C"))]))]),
    );
    let d = Type::rec(
        "D",
        Type::object(vec![field("d", Type::object(vec![field("c", Type::var("D"))]))]),
    );
    let c_unfolded_once = Type::object(vec![field("c", d.clone())]);

    assert!(type_eq(&c, &c_unfolded_once));
    assert!(!type_eq(&c, &d));
}

#[test]
fn test_type_eq_distinguishes_recursive_types() {
    let numbers = Type::rec(
        "S",
        Type::object(vec![field("num", Type::Number), field("rest", Type::function(vec![], Type::var("S")))]),
    );
    let booleans = Type::rec(
        "S",
        Type::object(vec![field("num", Type::Boolean), field("rest", Type::function(vec![], Type::var("S")))]),
    );

    assert!(!type_eq(&numbers, &booleans));
}

#[test]
fn test_engines_terminate_on_non_contractive_types() {
    let alternating = Type::rec("X", Type::rec("Y", Type::var("X")));

    assert!(type_eq(&alternating, &alternating));
    assert_eq!(
        type_eq(&alternating, &Type::Number),
        type_eq(&Type::Number, &alternating)
    );
    assert!(is_subtype(&alternating, &alternating));
    is_subtype(&alternating, &Type::Boolean);
    is_subtype(&Type::Boolean, &alternating);
}

#[test]
fn test_checker_terminates_on_non_contractive_binding() {
    let term = parse_source("x + 1");
    let env = Environment::new().extend("x", Type::rec("X", Type::rec("Y", Type::var("X"))));

    let error = TypeChecker::new(Variant::Recursive).check(&term, &env).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::NumberExpected { received: Type::Rec(_) }));
}

#[test]
fn test_type_eq_with_shadowed_binders() {
    // μX.{ f: μX.{ g: X } } against μY.{ f: { g: Y } }
    let shadowed = Type::rec(
        "X",
        Type::object(vec![field("f", Type::rec("X", Type::object(vec![field("g", Type::var("X"))])))]),
    );
    let plain = Type::rec(
        "Y",
        Type::object(vec![field("f", Type::object(vec![field("g", Type::var("Y"))]))]),
    );

    // The inner X refers to the inner binder, so `g` loops on the inner record
    assert!(!type_eq(&shadowed, &plain));
    assert!(type_eq(&shadowed, &shadowed.simplify()));
    assert!(type_eq(&plain, &plain.simplify()));

    // μX.{ f: μX.{ g: X } } is the same as { f: μZ.{ g: Z } } wrapped in any binder
    let renamed = Type::rec(
        "Y",
        Type::object(vec![field("f", Type::rec("Z", Type::object(vec![field("g", Type::var("Z"))])))]),
    );
    assert!(type_eq(&shadowed, &renamed));
    assert!(is_subtype(&shadowed, &renamed));
    assert!(is_subtype(&renamed, &shadowed));
}

#[test]
fn test_alpha_eq_with_repeated_binder_names() {
    // μX.μX.{ f: X } binds f to the inner X, like μA.μB.{ f: B }
    let repeated = Type::rec("X", Type::rec("X", Type::object(vec![field("f", Type::var("X"))])));
    let inner = Type::rec("A", Type::rec("B", Type::object(vec![field("f", Type::var("B"))])));
    let outer = Type::rec("A", Type::rec("B", Type::object(vec![field("f", Type::var("A"))])));

    assert!(alpha_eq(&repeated, &inner));
    assert!(!alpha_eq(&repeated, &outer));
}

#[test]
fn test_alpha_eq_does_not_unfold() {
    assert!(alpha_eq(&stream("A"), &stream("B")));
    assert!(!alpha_eq(&stream("A"), &stream("A").simplify()));
}

#[test]
fn test_alpha_eq_respects_binder_positions() {
    // μX.μY.{ f: X } and μX.μY.{ f: Y } differ
    let outer = Type::rec("X", Type::rec("Y", Type::object(vec![field("f", Type::var("X"))])));
    let inner = Type::rec("X", Type::rec("Y", Type::object(vec![field("f", Type::var("Y"))])));

    assert!(!alpha_eq(&outer, &inner));
    assert!(alpha_eq(&outer, &outer));
}

#[test]
fn test_is_subtype_width_and_depth() {
    let foo = Type::object(vec![field("foo", Type::Number)]);
    let foo_bar = Type::object(vec![field("foo", Type::Number), field("bar", Type::Number)]);

    assert!(is_subtype(&foo_bar, &foo));
    assert!(!is_subtype(&foo, &foo_bar));

    let nested_wide = Type::object(vec![field("inner", foo_bar.clone())]);
    let nested_narrow = Type::object(vec![field("inner", foo.clone())]);
    assert!(is_subtype(&nested_wide, &nested_narrow));
    assert!(!is_subtype(&nested_narrow, &nested_wide));
}

#[test]
fn test_is_subtype_functions() {
    let foo = Type::object(vec![field("foo", Type::Number)]);
    let foo_bar = Type::object(vec![field("foo", Type::Number), field("bar", Type::Boolean)]);

    // Contravariant parameters
    let takes_foo = Type::function(vec![field("x", foo.clone())], Type::Number);
    let takes_foo_bar = Type::function(vec![field("x", foo_bar.clone())], Type::Number);
    assert!(is_subtype(&takes_foo, &takes_foo_bar));
    assert!(!is_subtype(&takes_foo_bar, &takes_foo));

    // Covariant results
    let returns_foo = Type::function(vec![], foo);
    let returns_foo_bar = Type::function(vec![], foo_bar);
    assert!(is_subtype(&returns_foo_bar, &returns_foo));
    assert!(!is_subtype(&returns_foo, &returns_foo_bar));

    // Arity must match
    assert!(!is_subtype(&takes_foo, &returns_foo));
}

#[test]
fn test_is_subtype_recursive_width() {
    // μS.{ next: () => S; extra: boolean } <: μT.{ next: () => T }
    let wide = Type::rec(
        "S",
        Type::object(vec![
            field("next", Type::function(vec![], Type::var("S"))),
            field("extra", Type::Boolean),
        ]),
    );
    let narrow = stream("T");

    assert!(is_subtype(&wide, &narrow));
    assert!(!is_subtype(&narrow, &wide));
}

#[test]
fn test_environment_extend_leaves_parent_untouched() {
    let parent = Environment::new().extend("x", Type::Number);
    let child = parent.extend("y", Type::Boolean).extend("x", Type::Boolean);

    assert!(!parent.contains("y"));
    assert_eq!(parent.get_variable("x", &position()).unwrap(), Type::Number);
    assert_eq!(child.get_variable("x", &position()).unwrap(), Type::Boolean);

    let error = parent.get_variable("y", &position()).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UndefinedVariable { variable } if variable == "y"));
}

#[test]
fn test_variant_names_round_trip() {
    for variant in Variant::ALL {
        assert_eq!(variant.name().parse::<Variant>(), Ok(variant));
        assert_eq!(variant.to_string(), variant.name());
    }

    let error = "ts".parse::<Variant>().unwrap_err();
    assert!(error.contains("unknown variant `ts`"));
}

#[test]
fn test_check_uses_initial_environment() {
    let term = parse_source("f(1) + y");
    let env: Environment = vec![
        ("f".to_string(), Type::function(vec![field("n", Type::Number)], Type::Number)),
        ("y".to_string(), Type::Number),
    ]
    .into_iter()
    .collect();

    let ty = TypeChecker::new(Variant::Basic).check(&term, &env).unwrap();
    assert_eq!(ty, Type::Number);
}

#[test]
fn test_leaky_environments_leave_caller_environment_alone() {
    let term = parse_source("((x: number) => x)(1)");
    let env = Environment::new();
    let options = CheckerOptions {
        copy_environments: false,
        ..CheckerOptions::default()
    };

    TypeChecker::new(Variant::Basic).with_options(options).check(&term, &env).unwrap();
    assert!(!env.contains("x"));
}

#[test]
fn test_unchecked_conditions_accept_numbers() {
    let term = parse_source("1 ? 2 : 3");

    let error = type_check(&term, Variant::Arith).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::BooleanExpected { .. }));

    let options = CheckerOptions {
        check_conditions: false,
        ..CheckerOptions::default()
    };
    let ty = TypeChecker::new(Variant::Arith).with_options(options).check(&term, &Environment::new()).unwrap();
    assert_eq!(ty, Type::Number);
}

#[test]
fn test_variant_gates_terms() {
    let term = parse_source("const x = 1; x");

    let error = type_check(&term, Variant::Arith).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::UnsupportedConstruct { construct, variant: Variant::Arith } if construct == "const declaration"
    ));
    assert_eq!(type_check(&term, Variant::Basic).unwrap(), Type::Number);
}

#[test]
fn test_variant_gates_annotations() {
    let term = parse_source("(o: { a: number }) => 1");

    let error = type_check(&term, Variant::Basic).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnsupportedConstruct { construct, .. } if construct == "object type"));
    assert!(type_check(&term, Variant::Object).is_ok());

    let term = parse_source("type S = { next: () => S }; (s: S) => 1");
    let error = type_check(&term, Variant::Object).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnsupportedConstruct { construct, .. } if construct == "recursive type"));
    assert!(type_check(&term, Variant::Recursive).is_ok());
}

#[test]
fn test_subtyping_join_of_branches() {
    let term = parse_source("(c: boolean) => c ? { a: 1, b: true } : { a: 2 }");

    let ty = type_check(&term, Variant::Subtyping).unwrap();
    assert_eq!(
        ty,
        Type::function(vec![field("c", Type::Boolean)], Type::object(vec![field("a", Type::Number)]))
    );

    let error = type_check(&term, Variant::Recursive).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::BranchTypeMismatch { .. }));
}

#[test]
fn test_declared_return_type_on_arrow_function() {
    let term = parse_source("(x: number): number => x + 1");
    assert_eq!(
        type_check(&term, Variant::Basic).unwrap(),
        Type::function(vec![field("x", Type::Number)], Type::Number)
    );

    let term = parse_source("(x: number): boolean => x");
    let error = type_check(&term, Variant::Basic).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::ReturnTypeMismatch { expected: Type::Boolean, received: Type::Number }
    ));
}

#[test]
fn test_declared_return_type_is_exact_under_subtyping() {
    let term = parse_source("(): { a: number } => ({ a: 1, b: 2 })");

    let error = type_check(&term, Variant::Subtyping).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::ReturnTypeMismatch { .. }));

    let term = parse_source("(): { a: number } => ({ a: 1 })");
    assert_eq!(
        type_check(&term, Variant::Subtyping).unwrap(),
        Type::function(vec![], Type::object(vec![field("a", Type::Number)]))
    );
}

#[test]
fn test_function_declaration_return_type_is_exact_under_subtyping() {
    let term = parse_source("function f(): { foo: number } { return { foo: 1, bar: 2 }; } f()");

    let error = type_check(&term, Variant::Subtyping).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::ReturnTypeMismatch { expected: Type::Object(_), received: Type::Object(_) }
    ));
}
