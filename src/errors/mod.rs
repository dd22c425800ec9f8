//! Error types shared by the lexer, parser and type checkers.
//!
//! Every failure is an `ErrorImpl` kind wrapped in an `Error` carrying the
//! source position of the offending token or term. Errors know their stable
//! name and can produce a human-readable tip for diagnostics.

pub mod errors;
