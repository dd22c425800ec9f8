//! Equirecursive type equality.
//!
//! Recursive types are compared by unfolding them on demand. Every pair that
//! triggered an unfolding is remembered as an assumption; meeting a pair that
//! is already assumed (up to renaming of binders) ends that branch
//! successfully. The assumption set lives for one top-level decision only.

use log::trace;

use crate::ast::types::Type;

/// Pairs of types assumed to be related while one decision is in progress.
pub(crate) type SeenPairs = Vec<(Type, Type)>;

/// Whether two types are equal, treating `μX.T` as equal to its unfolding.
pub fn type_eq(left: &Type, right: &Type) -> bool {
    type_eq_sub(left, right, &mut SeenPairs::new())
}

fn type_eq_sub(left: &Type, right: &Type, seen: &mut SeenPairs) -> bool {
    if already_assumed(seen, left, right) {
        return true;
    }

    if let Type::Rec(_) = left {
        seen.push((left.clone(), right.clone()));
        return type_eq_sub(&unfold(left), right, seen);
    }
    if let Type::Rec(_) = right {
        seen.push((left.clone(), right.clone()));
        return type_eq_sub(left, &unfold(right), seen);
    }

    match (left, right) {
        (Type::Number, Type::Number) | (Type::Boolean, Type::Boolean) => true,
        (Type::Function(left), Type::Function(right)) => {
            left.parameters.len() == right.parameters.len()
                && left
                    .parameters
                    .iter()
                    .zip(&right.parameters)
                    .all(|((_, l), (_, r))| type_eq_sub(l, r, seen))
                && type_eq_sub(&left.return_type, &right.return_type, seen)
        }
        (Type::Object(left), Type::Object(right)) => {
            left.properties.len() == right.properties.len()
                && left.properties.iter().all(|(name, l)| match right.get_property_type(name) {
                    Some(r) => type_eq_sub(l, r, seen),
                    None => false,
                })
        }
        // Free type variables never reach this point for well-formed input
        _ => false,
    }
}

/// One unfolding step of a `Rec`; any other type is returned unchanged.
///
/// Only a single step is taken, so non-contractive chains such as `μX.μY.X`
/// come back to a pair already in the assumption set.
pub(crate) fn unfold(ty: &Type) -> Type {
    let Type::Rec(rec) = ty else {
        return ty.clone();
    };
    let unfolded = rec.unfold();
    trace!("unfolded {} to {}", ty, unfolded);
    unfolded
}

/// Whether `(left, right)` matches a recorded pair up to binder renaming.
pub(crate) fn already_assumed(seen: &[(Type, Type)], left: &Type, right: &Type) -> bool {
    seen.iter()
        .any(|(seen_left, seen_right)| alpha_eq(left, seen_left) && alpha_eq(right, seen_right))
}

/// Structural equality that never unfolds, matching `Rec` binders by
/// position.
pub(crate) fn alpha_eq(left: &Type, right: &Type) -> bool {
    alpha_eq_with(left, right, &mut Vec::new())
}

fn alpha_eq_with(left: &Type, right: &Type, binders: &mut Vec<(String, String)>) -> bool {
    match (left, right) {
        (Type::Number, Type::Number) | (Type::Boolean, Type::Boolean) => true,
        (Type::Function(left), Type::Function(right)) => {
            left.parameters.len() == right.parameters.len()
                && left
                    .parameters
                    .iter()
                    .zip(&right.parameters)
                    .all(|((_, l), (_, r))| alpha_eq_with(l, r, binders))
                && alpha_eq_with(&left.return_type, &right.return_type, binders)
        }
        (Type::Object(left), Type::Object(right)) => {
            left.properties.len() == right.properties.len()
                && left.properties.iter().all(|(name, l)| match right.get_property_type(name) {
                    Some(r) => alpha_eq_with(l, r, binders),
                    None => false,
                })
        }
        (Type::TypeVar(left), Type::TypeVar(right)) => {
            // Innermost binder wins
            match binders.iter().rev().find(|(l, r)| l == left || r == right) {
                Some((l, r)) => l == left && r == right,
                None => left == right,
            }
        }
        (Type::Rec(left), Type::Rec(right)) => {
            binders.push((left.name.clone(), right.name.clone()));
            let result = alpha_eq_with(&left.body, &right.body, binders);
            binders.pop();
            result
        }
        _ => false,
    }
}
