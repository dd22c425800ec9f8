//! Parser state and entry point.
//!
//! The parser is a Pratt parser: every token kind that can start an
//! expression has a NUD handler, every infix/postfix token has a LED handler
//! and a binding power. Declarations (`const`, `function`, `type`) have
//! statement handlers that also parse the rest of the program, because each
//! declaration scopes over everything after it.
//!
//! Type annotations get their own NUD table. The parser additionally keeps
//! the type aliases declared so far, so alias names are resolved while
//! parsing and the produced terms only ever contain structural types.

use std::{collections::HashMap, sync::Arc};

use crate::{
    ast::{ast::Term, types::Type},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
    stmt::{parse_sequence, SequenceEnd},
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Arc<String>,
    /// Lookup table for declaration handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Type aliases declared so far, already resolved
    type_aliases: HashMap<String, Type>,
    /// Aliases whose definition is currently being parsed
    defining: Vec<String>,
}

impl Parser {
    /// Creates a new Parser instance with empty lookup tables.
    pub fn new(tokens: Vec<Token>, file: Arc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_aliases: HashMap::new(),
            defining: Vec::new(),
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Past the end of the stream this keeps returning the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        self.peek_token(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `n` places ahead of the current one.
    pub fn peek_token(&self, n: usize) -> &Token {
        let index = (self.pos + n).min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Returns the kind of the token `n` places ahead of the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.peek_token(n).kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(&mut self, expected_kind: TokenKind, error: Option<Error>) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UnexpectedTokenDetailed` error at the current token.
    pub fn detailed_error(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Binding power of the current token, `Default` when it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a declaration handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Resolves a type name declared with `type`.
    ///
    /// Inside the alias's own definition the name refers to the recursive
    /// binder and resolves to a type variable.
    pub fn resolve_type_alias(&self, name: &str) -> Option<Type> {
        if self.defining.iter().any(|defining| defining == name) {
            return Some(Type::var(name));
        }
        self.type_aliases.get(name).cloned()
    }

    pub fn begin_type_alias(&mut self, name: &str) {
        self.defining.push(name.to_string());
    }

    pub fn end_type_alias(&mut self, name: &str, ty: Type) {
        self.defining.pop();
        self.type_aliases.insert(name.to_string(), ty);
    }

    /// Snapshot of the aliases in scope, restored by `exit_type_scope`.
    pub fn enter_type_scope(&self) -> HashMap<String, Type> {
        self.type_aliases.clone()
    }

    pub fn exit_type_scope(&mut self, saved: HashMap<String, Type>) {
        self.type_aliases = saved;
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns the end of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        if self.pos == 0 {
            return Position(0, Arc::clone(&self.file));
        }
        self.tokens[(self.pos - 1).min(self.tokens.len() - 1)].span.end.clone()
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a stream of tokens into a single program term.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses the whole program, which must
/// end exactly at `EOF`.
pub fn parse(tokens: Vec<Token>, file: Arc<String>) -> Result<Term, Error> {
    if tokens.is_empty() {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: String::from("EOF"),
            },
            Position(0, file),
        ));
    }

    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let program = parse_sequence(&mut parser, SequenceEnd::Eof)?;
    parser.expect(TokenKind::EOF)?;

    Ok(program)
}
