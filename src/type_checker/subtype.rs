//! Structural subtyping over recursive types.
//!
//! Functions are contravariant in their parameters and covariant in their
//! result. Objects allow width subtyping (extra properties on the subtype)
//! and depth subtyping (property types compared covariantly), matched by
//! name. Recursive types reuse the co-inductive scheme of the equality
//! engine, with directional `(sub, sup)` assumptions.

use crate::ast::types::Type;

use super::equality::{already_assumed, unfold, SeenPairs};

/// Whether a value of type `sub` can be used where `sup` is expected.
pub fn is_subtype(sub: &Type, sup: &Type) -> bool {
    is_subtype_sub(sub, sup, &mut SeenPairs::new())
}

fn is_subtype_sub(sub: &Type, sup: &Type, seen: &mut SeenPairs) -> bool {
    if already_assumed(seen, sub, sup) {
        return true;
    }

    if let Type::Rec(_) = sub {
        seen.push((sub.clone(), sup.clone()));
        return is_subtype_sub(&unfold(sub), sup, seen);
    }
    if let Type::Rec(_) = sup {
        seen.push((sub.clone(), sup.clone()));
        return is_subtype_sub(sub, &unfold(sup), seen);
    }

    match sup {
        Type::Number => matches!(sub, Type::Number),
        Type::Boolean => matches!(sub, Type::Boolean),
        Type::Function(sup) => {
            let Type::Function(sub) = sub else {
                return false;
            };
            sub.parameters.len() == sup.parameters.len()
                && is_subtype_sub(&sub.return_type, &sup.return_type, seen)
                && sub
                    .parameters
                    .iter()
                    .zip(&sup.parameters)
                    .all(|((_, sub_param), (_, sup_param))| is_subtype_sub(sup_param, sub_param, seen))
        }
        Type::Object(sup) => {
            let Type::Object(sub) = sub else {
                return false;
            };
            sup.properties.iter().all(|(name, sup_property)| match sub.get_property_type(name) {
                Some(sub_property) => is_subtype_sub(sub_property, sup_property, seen),
                None => false,
            })
        }
        Type::TypeVar(_) | Type::Rec(_) => false,
    }
}
