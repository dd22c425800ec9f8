#![allow(clippy::module_inception)]

use std::{fmt::Write, sync::Arc};

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::{type_check, Variant},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes, parses and checks `source` in one go.
///
/// `file` is only used to label positions in the returned error.
pub fn check_source(source: &str, file: Option<String>, variant: Variant) -> Result<Type, Error> {
    let file = Arc::new(file.unwrap_or_else(|| String::from("shell")));
    let tokens = tokenize(source, Some(file.as_ref().clone()))?;
    let term = parse(tokens, Arc::clone(&file))?;
    type_check(&term, variant)
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset inside that
/// line. An offset equal to the source length points just past the last line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = None;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        last = Some((line_number, line.to_string(), line.trim_end().len()));
        start = end;
        line_number += 1;
    }

    last.or_else(|| Some((1, String::new(), 0)))
}

/// Renders an error as a caret diagnostic pointing into `source`.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message (tip)
        -> main.ts
          |
        1 | ((x: number) => x)(true)
          | -------------------^
    */

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}
