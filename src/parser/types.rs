//! Type annotation parsing.
//!
//! Supported annotations:
//!
//! - `number` and `boolean`
//! - Names introduced by an earlier `type` declaration
//! - Function types `(x: T, y: U) => R`
//! - Object types `{ a: T; b: U }` (`,` is accepted as a separator too)
//!
//! Type syntax has no infix operators, so only NUD handlers exist.

use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_parameters};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::OpenParen, parse_function_type);
    parser.type_nud(TokenKind::OpenCurly, parse_object_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    match token.value.as_str() {
        "number" => Ok(Type::Number),
        "boolean" => Ok(Type::Boolean),
        name => parser.resolve_type_alias(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: token.value.clone(),
                },
                token.span.start.clone(),
            )
        }),
    }
}

pub fn parse_function_type(parser: &mut Parser) -> Result<Type, Error> {
    let parameters = parse_parameters(parser)?;

    let error = parser.detailed_error("expected `=>` in function type");
    parser.expect_error(TokenKind::Arrow, Some(error))?;

    let return_type = parse_type(parser, BindingPower::Default)?;

    Ok(Type::function(parameters, return_type))
}

pub fn parse_object_type(parser: &mut Parser) -> Result<Type, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut properties = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let error = parser.detailed_error("expected property name in object type");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser, BindingPower::Default)?;
        properties.push((name, ty));

        if parser.current_token().is_one_of_many(&[TokenKind::Semicolon, TokenKind::Comma]) {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Type::object(properties))
}

pub fn parse_type(parser: &mut Parser, _bp: BindingPower) -> Result<Type, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud(parser),
        None => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}
