use crate::Span;

use super::{
    expressions::{AddExpr, BooleanExpr, CallExpr, FuncExpr, IfExpr, MemberExpr, NumberExpr, ObjectExpr, SymbolExpr},
    statements::{ConstStmt, FnDeclStmt, SeqStmt},
};

/// Term Types
///
/// The tag of each term kind, without its payload.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum TermType {
    Boolean,
    Number,
    Add,
    If,
    Var,
    Func,
    Call,
    Seq,
    Const,
    ObjectNew,
    ObjectGet,
    RecFunc,
}

impl TermType {
    /// Human-readable name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TermType::Boolean => "boolean literal",
            TermType::Number => "number literal",
            TermType::Add => "addition",
            TermType::If => "conditional expression",
            TermType::Var => "variable reference",
            TermType::Func => "function literal",
            TermType::Call => "function call",
            TermType::Seq => "expression statement",
            TermType::Const => "const declaration",
            TermType::ObjectNew => "object literal",
            TermType::ObjectGet => "property access",
            TermType::RecFunc => "function declaration",
        }
    }
}

/// Term
///
/// A whole program or any part of it. Produced once by the parser and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Boolean(BooleanExpr),
    Number(NumberExpr),
    Add(AddExpr),
    If(IfExpr),
    Var(SymbolExpr),
    Func(FuncExpr),
    Call(CallExpr),
    Seq(SeqStmt),
    Const(ConstStmt),
    ObjectNew(ObjectExpr),
    ObjectGet(MemberExpr),
    RecFunc(FnDeclStmt),
}

impl Term {
    pub fn get_term_type(&self) -> TermType {
        match self {
            Term::Boolean(_) => TermType::Boolean,
            Term::Number(_) => TermType::Number,
            Term::Add(_) => TermType::Add,
            Term::If(_) => TermType::If,
            Term::Var(_) => TermType::Var,
            Term::Func(_) => TermType::Func,
            Term::Call(_) => TermType::Call,
            Term::Seq(_) => TermType::Seq,
            Term::Const(_) => TermType::Const,
            Term::ObjectNew(_) => TermType::ObjectNew,
            Term::ObjectGet(_) => TermType::ObjectGet,
            Term::RecFunc(_) => TermType::RecFunc,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Term::Boolean(expr) => &expr.span,
            Term::Number(expr) => &expr.span,
            Term::Add(expr) => &expr.span,
            Term::If(expr) => &expr.span,
            Term::Var(expr) => &expr.span,
            Term::Func(expr) => &expr.span,
            Term::Call(expr) => &expr.span,
            Term::Seq(stmt) => &stmt.span,
            Term::Const(stmt) => &stmt.span,
            Term::ObjectNew(expr) => &expr.span,
            Term::ObjectGet(expr) => &expr.span,
            Term::RecFunc(stmt) => &stmt.span,
        }
    }
}
