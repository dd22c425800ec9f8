//! Program and block parsing.
//!
//! A program is a `;`-separated sequence of declarations and expressions.
//! It is folded right to left into nested terms: an expression followed by
//! more code becomes a `Seq`, and each declaration carries the rest of the
//! sequence as its scope. Function bodies use the same sequence grammar but
//! must end with `return expr;`.

use crate::{
    ast::{
        ast::Term,
        statements::{ConstStmt, FnDeclStmt, SeqStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

/// Where the sequence being parsed stops.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SequenceEnd {
    /// Top level; the final expression may omit its `;`
    Eof,
    /// Inside `{ ... }`; the sequence ends with `return expr;`
    Return,
}

pub fn parse_sequence(parser: &mut Parser, end: SequenceEnd) -> Result<Term, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser, end);
    }

    if end == SequenceEnd::Return && parser.current_token_kind() == TokenKind::Return {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(value);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    match end {
        SequenceEnd::Eof => {
            if parser.current_token_kind() != TokenKind::Semicolon {
                // The caller checks for `EOF`
                return Ok(expr);
            }
            parser.advance();
            if !parser.has_tokens() {
                return Ok(expr);
            }
        }
        SequenceEnd::Return => {
            parser.expect(TokenKind::Semicolon)?;
        }
    }

    let rest = parse_sequence(parser, end)?;

    Ok(Term::Seq(SeqStmt {
        span: Span {
            start: expr.get_span().start.clone(),
            end: rest.get_span().end.clone(),
        },
        body: Box::new(expr),
        rest: Box::new(rest),
    }))
}

/// The scope of a declaration: everything after it.
fn parse_rest(parser: &mut Parser, end: SequenceEnd) -> Result<Term, Error> {
    if !parser.has_tokens() {
        return Err(parser.detailed_error("expected a term after declaration"));
    }

    parse_sequence(parser, end)
}

pub fn parse_const_decl_stmt(parser: &mut Parser, end: SequenceEnd) -> Result<Term, Error> {
    let start = parser.advance().span.start;

    let error = parser.detailed_error("expected identifier during constant declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    // Annotations on constants are accepted but not enforced
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        parse_type(parser, BindingPower::Default)?;
    }

    let error = parser.detailed_error("expected rhs in constant definition");
    parser.expect_error(TokenKind::Assignment, Some(error))?;

    let init = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let rest = parse_rest(parser, end)?;

    Ok(Term::Const(ConstStmt {
        span: Span {
            start,
            end: rest.get_span().end.clone(),
        },
        identifier,
        init: Box::new(init),
        rest: Box::new(rest),
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser, end: SequenceEnd) -> Result<Term, Error> {
    let start = parser.advance().span.start;

    let error = parser.detailed_error("expected function name");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let parameters = parse_parameters(parser)?;

    let error = parser.detailed_error("expected return type annotation on function declaration");
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let return_type = parse_type(parser, BindingPower::Default)?;

    let body = parse_block(parser)?;
    let rest = parse_rest(parser, end)?;

    Ok(Term::RecFunc(FnDeclStmt {
        span: Span {
            start,
            end: rest.get_span().end.clone(),
        },
        identifier,
        parameters,
        return_type,
        body: Box::new(body),
        rest: Box::new(rest),
    }))
}

/// `type Name = T;`
///
/// Aliases are resolved away here. A self-referencing alias becomes a
/// recursive type binding its own name.
pub fn parse_type_decl_stmt(parser: &mut Parser, end: SequenceEnd) -> Result<Term, Error> {
    parser.advance();

    let name_token = parser.expect(TokenKind::Identifier)?;
    let name = name_token.value;

    parser.expect(TokenKind::Assignment)?;

    parser.begin_type_alias(&name);
    let body = parse_type(parser, BindingPower::Default)?;

    if !body.is_guarded(&name) {
        return Err(Error::new(
            ErrorImpl::NonContractiveType { name },
            name_token.span.start,
        ));
    }

    let resolved = if body.occurs(&name) {
        Type::rec(&name, body)
    } else {
        body
    };
    parser.end_type_alias(&name, resolved);

    parser.expect(TokenKind::Semicolon)?;

    parse_rest(parser, end)
}

/// `{ declarations and expressions; return expr; }`
pub fn parse_block(parser: &mut Parser) -> Result<Term, Error> {
    let error = parser.detailed_error("expected `{` to open a function body");
    parser.expect_error(TokenKind::OpenCurly, Some(error))?;

    // Aliases declared in the body are local to it
    let scope = parser.enter_type_scope();
    let body = parse_sequence(parser, SequenceEnd::Return);
    parser.exit_type_scope(scope);
    let body = body?;

    parser.expect(TokenKind::CloseCurly)?;

    Ok(body)
}

/// `(name: T, ...)`, shared by arrow functions and function declarations.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<(String, Type)>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let error = parser.detailed_error("expected parameter name");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

        let error = parser.detailed_error("parameters require a type annotation");
        parser.expect_error(TokenKind::Colon, Some(error))?;

        let ty = parse_type(parser, BindingPower::Default)?;
        parameters.push((name, ty));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(parameters)
}
