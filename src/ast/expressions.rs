use crate::Span;

use super::{ast::Term, types::Type};

// LITERALS

/// Boolean Expression
/// Represents `true` or `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Number Expression
/// Represents a numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

/// Symbol Expression
/// Represents a reference to a variable (including functions).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// OPERATORS

/// Add Expression
/// Represents `left + right`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpr {
    pub left: Box<Term>,
    pub right: Box<Term>,
    pub span: Span,
}

/// Conditional Expression
/// Represents `condition ? then_branch : else_branch`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Term>,
    pub then_branch: Box<Term>,
    pub else_branch: Box<Term>,
    pub span: Span,
}

// FUNCTIONS

/// Function Expression
/// Represents an arrow function `(x: T, ...) => body`.
///
/// `return_type` is set when the literal is written `(x: T): R => body`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncExpr {
    pub parameters: Vec<(String, Type)>,
    pub return_type: Option<Type>,
    pub body: Box<Term>,
    pub span: Span,
}

/// Call Expression
/// Represents `callee(arguments...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Term>,
    pub arguments: Vec<Term>,
    pub span: Span,
}

// OBJECTS

/// Object Expression
/// Represents an object literal `{ name: term, ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpr {
    pub properties: Vec<(String, Term)>,
    pub span: Span,
}

/// Member Expression
/// Represents a property read `object.property`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Term>,
    pub property: String,
    pub span: Span,
}
