//! Declaration-like terms.
//!
//! Each of these scopes over the remainder of the program (`rest`), so a
//! source file becomes one nested term rather than a list of statements.

use crate::Span;

use super::{ast::Term, types::Type};

/// Sequence Statement
/// Represents `body; rest`. The value of `body` is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqStmt {
    pub body: Box<Term>,
    pub rest: Box<Term>,
    pub span: Span,
}

/// Constant Declaration Statement
/// Represents `const identifier = init; rest`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstStmt {
    pub identifier: String,
    pub init: Box<Term>,
    pub rest: Box<Term>,
    pub span: Span,
}

/// Function Declaration Statement
/// Represents `function identifier(parameters): return_type { body } rest`.
///
/// The function may call itself inside `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<(String, Type)>,
    pub return_type: Type,
    pub body: Box<Term>,
    pub rest: Box<Term>,
    pub span: Span,
}
