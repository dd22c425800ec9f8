//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, numbers, punctuation, comments, spans
//! and the unrecognised-character error.

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.ts".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("const function return type true false"),
        vec![
            TokenKind::Const,
            TokenKind::Function,
            TokenKind::Return,
            TokenKind::Type,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo number boolean baz_123 _x $y", None).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "number", "boolean", "baz_123", "_x", "$y", "EOF"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_arrow_before_assignment() {
    assert_eq!(
        kinds("= => ="),
        vec![TokenKind::Assignment, TokenKind::Arrow, TokenKind::Assignment, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } . , ; : ? +"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Question,
            TokenKind::Plus,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("1 // one\n/* block\n comment */ + 2"),
        vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_spans() {
    let tokens = tokenize("x  => y", None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 1);
    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[1].span.end.0, 5);
    assert_eq!(tokens[2].span.start.0, 6);
    assert_eq!(tokens[3].span.start.0, 7);
}

#[test]
fn test_tokenize_arrow_function() {
    assert_eq!(
        kinds("(x: number) => x + 1"),
        vec![
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_unrecognised_character() {
    let error = tokenize("1 - 2", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 2);
    assert!(matches!(error.kind(), ErrorImpl::UnrecognisedToken { token } if token == "-"));
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}
