use std::collections::HashMap;

use crate::{ast::ast::Term, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Conditional,
    Additive,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser, SequenceEnd) -> Result<Term, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Term, Error>;
pub type LEDHandler = fn(&mut Parser, Term, BindingPower) -> Result<Term, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::Question, BindingPower::Conditional, parse_conditional_expr);
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_add_expr);
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::OpenParen, parse_paren_expr);
    parser.nud(TokenKind::OpenCurly, parse_object_expr);

    // Declarations
    parser.stmt(TokenKind::Const, parse_const_decl_stmt);
    parser.stmt(TokenKind::Function, parse_fn_decl_stmt);
    parser.stmt(TokenKind::Type, parse_type_decl_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
