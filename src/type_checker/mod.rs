//! Type checking module.
//!
//! This module assigns a type to a whole program term, or reports the first
//! violated typing rule. It is made of:
//!
//! - An environment of variable types with copy-on-extend scoping
//! - An equirecursive type-equality engine
//! - A structural subtype engine over the same recursive types
//! - The checker itself, parameterised by a `Variant` that selects the
//!   accepted language and the compatibility relation
//!
//! Recursive types are handled co-inductively: pairs of types being compared
//! are remembered while unfolding, so infinite unfoldings terminate.

pub mod environment;
pub mod equality;
pub mod subtype;
pub mod type_checker;

#[cfg(test)]
mod tests;
