#![allow(clippy::module_inception)]

use crate::{
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{type_checker::type_check, typed_ast::TypedBlockStmt},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A point in the source text: byte offset and 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32) -> Self {
        Position { offset, line }
    }

    pub fn null() -> Self {
        Position::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the whole front end over one compilation unit.
pub fn check_source(source: &str) -> Result<TypedBlockStmt, Error> {
    let tokens = tokenize(source)?;
    let tree = parse(tokens)?;
    type_check(&tree)
}

/// Returns the 1-based line number, the line text and the column of `offset`.
///
/// Offsets past the end of the source resolve to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    // `pos` sits at the very end of the source
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => (line_number - 1, last.to_string(), last.len()),
        _ => (line_number, String::new(), 0),
    }
}

/// Renders an error the way the driver prints it:
///
/// ```text
/// Error: message
/// -> file.jl
///    |
/// 20 | int a = #;
///    | --------^
/// ```
pub fn display_error(error: &Error, source: &str, file_name: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file_name));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\n\nTesting { }\n";
        let (line_number, line, line_pos) = get_line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(source, 27);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_source() {
        let (line_number, line, line_pos) = get_line_at_position("int main()", 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "int main()");
        assert_eq!(line_pos, 10);
    }

    #[test]
    fn test_display_error_points_at_offending_token() {
        let source = "int main() {\n  int x = @;\n}\n";
        let error = check_source(source).unwrap_err();
        let rendered = display_error(&error, source, "test.jl");

        assert!(rendered.starts_with("Error: UnrecognisedToken"));
        assert!(rendered.contains("-> test.jl"));
        assert!(rendered.contains("2 | int x = @;"));
        assert!(rendered.contains("--------^"));
    }
}
