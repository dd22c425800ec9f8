//! Type representations shared by the parser and the checkers.
//!
//! Types are plain immutable trees:
//!
//! - Atomic types (`number`, `boolean`)
//! - Function types, whose parameter names are documentation only
//! - Object (record) types with ordered properties
//! - Recursive types `μX.T` (`Rec`) and references to their binder (`TypeVar`)
//!
//! A recursive type is never a cyclic graph. Its infinite unfolding is
//! produced on demand by substituting the binder into its body with
//! [`expand_type`].

use std::fmt::{self, Display};

use crate::type_checker::equality::alpha_eq;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Number,
    Boolean,
    Function(FunctionType),
    Object(ObjectType),
    /// Reference to the nearest enclosing `Rec` with the same name.
    TypeVar(String),
    Rec(RecType),
}

/// Represents a function type
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<(String, Type)>,
    pub return_type: Box<Type>,
}

/// Represents an object (record) type
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub properties: Vec<(String, Type)>,
}

impl ObjectType {
    /// Type of the first property called `property`.
    pub fn get_property_type(&self, property: &str) -> Option<&Type> {
        self.properties.iter().find(|(name, _)| name == property).map(|(_, ty)| ty)
    }
}

/// Represents the recursive type `μname.body`
#[derive(Debug, Clone, PartialEq)]
pub struct RecType {
    pub name: String,
    pub body: Box<Type>,
}

impl RecType {
    /// One-step unfolding: the body with every free reference to the binder
    /// replaced by the whole recursive type.
    pub fn unfold(&self) -> Type {
        expand_type(&self.body, &self.name, &Type::Rec(self.clone()))
    }
}

impl Type {
    pub fn function(parameters: Vec<(String, Type)>, return_type: Type) -> Type {
        Type::Function(FunctionType {
            parameters,
            return_type: Box::new(return_type),
        })
    }

    pub fn object(properties: Vec<(String, Type)>) -> Type {
        Type::Object(ObjectType { properties })
    }

    pub fn var(name: &str) -> Type {
        Type::TypeVar(name.to_string())
    }

    pub fn rec(name: &str, body: Type) -> Type {
        Type::Rec(RecType {
            name: name.to_string(),
            body: Box::new(body),
        })
    }

    /// Unfolds outer `Rec` binders until a structural constructor shows.
    ///
    /// Non-contractive input such as `μX.X` or `μX.μY.X` never reaches a
    /// constructor; it is returned, still a `Rec`, as soon as an unfolding
    /// repeats a type already visited.
    pub fn simplify(&self) -> Type {
        let mut visited: Vec<Type> = Vec::new();
        let mut current = self.clone();
        while let Type::Rec(rec) = &current {
            if visited.iter().any(|seen| alpha_eq(seen, &current)) {
                break;
            }
            let unfolded = rec.unfold();
            visited.push(current);
            current = unfolded;
        }
        current
    }

    /// Whether `name` occurs free in this type.
    pub fn occurs(&self, name: &str) -> bool {
        match self {
            Type::Number | Type::Boolean => false,
            Type::Function(function) => {
                function.parameters.iter().any(|(_, ty)| ty.occurs(name))
                    || function.return_type.occurs(name)
            }
            Type::Object(object) => object.properties.iter().any(|(_, ty)| ty.occurs(name)),
            Type::TypeVar(var) => var == name,
            Type::Rec(rec) => rec.name != name && rec.body.occurs(name),
        }
    }

    /// Whether `name` is reachable from the root only through binders, as in
    /// `μY.X`. Such a definition of `X` never unfolds to a constructor.
    pub fn is_guarded(&self, name: &str) -> bool {
        match self {
            Type::TypeVar(var) => var != name,
            Type::Rec(rec) => rec.name == name || rec.body.is_guarded(name),
            _ => true,
        }
    }

    /// Whether any `Rec` or `TypeVar` appears in this type.
    pub fn is_recursive(&self) -> bool {
        match self {
            Type::Number | Type::Boolean => false,
            Type::Function(function) => {
                function.parameters.iter().any(|(_, ty)| ty.is_recursive())
                    || function.return_type.is_recursive()
            }
            Type::Object(object) => object.properties.iter().any(|(_, ty)| ty.is_recursive()),
            Type::TypeVar(_) | Type::Rec(_) => true,
        }
    }

    /// Whether an object type appears anywhere in this type.
    pub fn contains_object(&self) -> bool {
        match self {
            Type::Number | Type::Boolean | Type::TypeVar(_) => false,
            Type::Function(function) => {
                function.parameters.iter().any(|(_, ty)| ty.contains_object())
                    || function.return_type.contains_object()
            }
            Type::Object(_) => true,
            Type::Rec(rec) => rec.body.contains_object(),
        }
    }
}

/// Substitutes `replacement` for every free `TypeVar(var)` inside `ty`.
///
/// An inner `Rec` binding the same name shadows `var`, so its body is left
/// untouched.
pub fn expand_type(ty: &Type, var: &str, replacement: &Type) -> Type {
    match ty {
        Type::Number | Type::Boolean => ty.clone(),
        Type::Function(function) => Type::Function(FunctionType {
            parameters: function
                .parameters
                .iter()
                .map(|(name, ty)| (name.clone(), expand_type(ty, var, replacement)))
                .collect(),
            return_type: Box::new(expand_type(&function.return_type, var, replacement)),
        }),
        Type::Object(object) => Type::Object(ObjectType {
            properties: object
                .properties
                .iter()
                .map(|(name, ty)| (name.clone(), expand_type(ty, var, replacement)))
                .collect(),
        }),
        Type::TypeVar(name) if name == var => replacement.clone(),
        Type::TypeVar(_) => ty.clone(),
        Type::Rec(rec) if rec.name == var => ty.clone(),
        Type::Rec(rec) => Type::Rec(RecType {
            name: rec.name.clone(),
            body: Box::new(expand_type(&rec.body, var, replacement)),
        }),
    }
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[(String, Type)], separator: &str) -> fmt::Result {
    for (i, (name, ty)) in members.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}: {}", name, ty)?;
    }
    Ok(())
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::Boolean => write!(f, "boolean"),
            Type::Function(function) => {
                write!(f, "(")?;
                write_members(f, &function.parameters, ", ")?;
                write!(f, ") => {}", function.return_type)
            }
            Type::Object(object) if object.properties.is_empty() => write!(f, "{{}}"),
            Type::Object(object) => {
                write!(f, "{{ ")?;
                write_members(f, &object.properties, "; ")?;
                write!(f, " }}")
            }
            Type::TypeVar(name) => write!(f, "{}", name),
            Type::Rec(rec) => write!(f, "μ{}.{}", rec.name, rec.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_type, Type};

    fn stream() -> Type {
        Type::rec(
            "X",
            Type::function(vec![], Type::var("X")),
        )
    }

    #[test]
    fn test_expand_type_replaces_free_variable() {
        let body = Type::function(vec![], Type::var("X"));
        let expanded = expand_type(&body, "X", &stream());

        assert_eq!(expanded, Type::function(vec![], stream()));
    }

    #[test]
    fn test_expand_type_is_stable_on_unfolded_type() {
        let once = expand_type(&Type::function(vec![], Type::var("X")), "X", &stream());
        let twice = expand_type(&once, "X", &stream());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_expand_type_respects_shadowing() {
        let inner = Type::rec("X", Type::object(vec![("f".to_string(), Type::var("X"))]));
        assert_eq!(expand_type(&inner, "X", &Type::Number), inner);

        let other = Type::rec("Y", Type::object(vec![("f".to_string(), Type::var("X"))]));
        assert_eq!(
            expand_type(&other, "X", &Type::Number),
            Type::rec("Y", Type::object(vec![("f".to_string(), Type::Number)]))
        );
    }

    #[test]
    fn test_simplify_unfolds_outer_binders() {
        let nested = Type::rec("A", Type::rec("B", Type::object(vec![("a".to_string(), Type::var("A"))])));

        match nested.simplify() {
            Type::Object(object) => {
                assert_eq!(object.properties[0].0, "a");
                assert!(matches!(object.properties[0].1, Type::Rec(_)));
            }
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn test_simplify_stops_on_non_contractive_type() {
        let looping = Type::rec("X", Type::var("X"));
        assert_eq!(looping.simplify(), looping);

        // Alternates between μX.μY.X and μY.μX.μY.X
        let alternating = Type::rec("X", Type::rec("Y", Type::var("X")));
        assert!(matches!(alternating.simplify(), Type::Rec(_)));
    }

    #[test]
    fn test_occurs_and_guarded() {
        let ty = Type::object(vec![("next".to_string(), Type::var("X"))]);
        assert!(ty.occurs("X"));
        assert!(!ty.occurs("Y"));
        assert!(ty.is_guarded("X"));
        assert!(!Type::var("X").is_guarded("X"));
        assert!(!Type::rec("Y", Type::var("X")).is_guarded("X"));
        assert!(!Type::rec("X", Type::var("X")).occurs("X"));
    }

    #[test]
    fn test_display() {
        let ty = Type::function(
            vec![("x".to_string(), Type::object(vec![
                ("foo".to_string(), Type::Number),
                ("bar".to_string(), Type::Boolean),
            ]))],
            Type::rec("S", Type::object(vec![("rest".to_string(), Type::function(vec![], Type::var("S")))])),
        );

        assert_eq!(
            ty.to_string(),
            "(x: { foo: number; bar: boolean }) => μS.{ rest: () => S }"
        );
        assert_eq!(Type::object(vec![]).to_string(), "{}");
    }
}
