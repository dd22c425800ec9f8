use crate::{
    ast::{
        ast::Term,
        expressions::{AddExpr, BooleanExpr, CallExpr, FuncExpr, IfExpr, MemberExpr, NumberExpr, ObjectExpr, SymbolExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block, parse_parameters},
    types::parse_type,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Term, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        let binding_power = parser.current_binding_power();
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Term, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parser.current_token().value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )
            })?;

            Ok(Term::Number(NumberExpr {
                value,
                span: parser.advance().span,
            }))
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Term::Var(SymbolExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Term::Boolean(BooleanExpr {
                value: token.kind == TokenKind::True,
                span: token.span,
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_add_expr(parser: &mut Parser, left: Term, bp: BindingPower) -> Result<Term, Error> {
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Term::Add(AddExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// `condition ? then : else`
///
/// Both branches are parsed at the lowest binding power, which makes the
/// operator right associative.
pub fn parse_conditional_expr(parser: &mut Parser, condition: Term, _bp: BindingPower) -> Result<Term, Error> {
    parser.advance();

    let then_branch = parse_expr(parser, BindingPower::Default)?;

    let error = parser.detailed_error("expected `:` in conditional expression");
    parser.expect_error(TokenKind::Colon, Some(error))?;

    let else_branch = parse_expr(parser, BindingPower::Default)?;

    Ok(Term::If(IfExpr {
        span: Span {
            start: condition.get_span().start.clone(),
            end: else_branch.get_span().end.clone(),
        },
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    }))
}

/// Either a parenthesised expression or an arrow function.
///
/// `(` followed by `)` or by `name :` starts a parameter list.
pub fn parse_paren_expr(parser: &mut Parser) -> Result<Term, Error> {
    let starts_arrow = parser.peek_kind(1) == TokenKind::CloseParen
        || (parser.peek_kind(1) == TokenKind::Identifier && parser.peek_kind(2) == TokenKind::Colon);

    if starts_arrow {
        return parse_arrow_expr(parser);
    }

    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_arrow_expr(parser: &mut Parser) -> Result<Term, Error> {
    let start = parser.get_position();
    let parameters = parse_parameters(parser)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let error = parser.detailed_error("expected `=>` after arrow function parameters");
    parser.expect_error(TokenKind::Arrow, Some(error))?;

    let body = if parser.current_token_kind() == TokenKind::OpenCurly {
        parse_block(parser)?
    } else {
        parse_expr(parser, BindingPower::Default)?
    };

    Ok(Term::Func(FuncExpr {
        span: parser.span_from(start),
        parameters,
        return_type,
        body: Box::new(body),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Term, _bp: BindingPower) -> Result<Term, Error> {
    parser.advance();

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Term::Call(CallExpr {
        span: parser.span_from(left.get_span().start.clone()),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: Term, _bp: BindingPower) -> Result<Term, Error> {
    parser.advance();

    let error = parser.detailed_error("expected property name after `.`");
    let property = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    Ok(Term::ObjectGet(MemberExpr {
        span: parser.span_from(left.get_span().start.clone()),
        object: Box::new(left),
        property,
    }))
}

pub fn parse_object_expr(parser: &mut Parser) -> Result<Term, Error> {
    // { a: 1, b: true }
    let start = parser.advance().span.start;

    let mut properties = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let error = parser.detailed_error("expected property name in object literal");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;

        properties.push((name, value));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Term::ObjectNew(ObjectExpr {
        properties,
        span: parser.span_from(start),
    }))
}
