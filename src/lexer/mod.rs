//! Lexical analysis for the tiny TypeScript subset.
//!
//! Converts source text into a token stream for the parser:
//!
//! - Keywords, identifiers and number literals
//! - Punctuation used by arrow functions, objects and conditionals
//! - Whitespace and line comments are skipped
//! - Every token records its byte span for diagnostics

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
