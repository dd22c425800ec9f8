//! Parser module for building the program term.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a single `Term`. It uses a Pratt parser for expressions with
//! binding powers for precedence and handles:
//!
//! - Declarations (`const`, `function`, `type`) scoping over the rest
//! - Expressions (addition, conditionals, calls, property access, literals)
//! - Type annotations and type aliases
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
