//! Unit tests for the parser module.
//!
//! Trees are compared through their rendering, which shows the exact list
//! nesting the type checker indexes into.

use crate::{
    ast::{
        node::{Node, SyntaxTree},
        tags::Category,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<SyntaxTree, Error> {
    parse(tokenize(source)?)
}

/// Wraps `body` into `int main() { ... }` and returns the tree.
fn parse_body(body: &str) -> SyntaxTree {
    parse_source(&format!("int main() {{ {} }}", body)).unwrap()
}

fn statements(tree: &SyntaxTree) -> &[Node] {
    tree.root.get(0).and_then(|main| main.get(3)).unwrap().children()
}

fn render_first(body: &str) -> String {
    let tree = parse_body(body);
    statements(&tree)[0].to_string()
}

fn expected_error(source: &str) -> (String, String) {
    match parse_source(source).unwrap_err().get_impl() {
        ErrorImpl::Expected { expected, found } => (expected.clone(), found.clone()),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let tree = parse_source("int f(int a, double b) { return a; }").unwrap();

    assert_eq!(tree.root.len(), 1);
    let function = &tree.root.children()[0];
    assert_eq!(
        function.to_string(),
        "( int f ( ( int a ) ( double b ) ) ( ( return ( a ) ) ) )"
    );
    assert_eq!(tree.tags.category(function), Category::FunDecl);
    assert_eq!(tree.tags.line(function), 1);
}

#[test]
fn test_parse_empty_argument_list() {
    let tree = parse_source("void f() { return; } int main() { return 0; }").unwrap();

    assert_eq!(tree.root.len(), 2);
    assert_eq!(tree.root.children()[0].to_string(), "( void f ( ) ( ( return ) ) )");
}

#[test]
fn test_precedence() {
    assert_eq!(render_first("1 + 2 * 3;"), render_first("1 + (2 * 3);"));
    assert_eq!(render_first("1 + 2 * 3;"), "( ( 1 ) + ( ( 2 ) * ( 3 ) ) )");
    assert_eq!(render_first("1 * 2 + 3;"), "( ( ( 1 ) * ( 2 ) ) + ( 3 ) )");
    assert_eq!(
        render_first("a || b && c == d;"),
        "( ( a ) || ( ( b ) && ( ( c ) == ( d ) ) ) )"
    );
    assert_eq!(
        render_first("a < b == c >= d;"),
        "( ( ( a ) < ( b ) ) == ( ( c ) >= ( d ) ) )"
    );
}

#[test]
fn test_equal_precedence_folds_left() {
    assert_eq!(render_first("1 - 2 - 3;"), "( ( ( 1 ) - ( 2 ) ) - ( 3 ) )");
    assert_eq!(render_first("8 / 4 % 3;"), "( ( ( 8 ) / ( 4 ) ) % ( 3 ) )");
}

#[test]
fn test_single_operand_is_not_wrapped() {
    assert_eq!(render_first("42;"), "( 42 )");
    assert_eq!(render_first("(((x)));"), "( x )");
    assert_eq!(render_first("2.5;"), "( 2.5 )");
    assert_eq!(render_first("\"hi\";"), "( \"hi\" )");
}

#[test]
fn test_unary_expressions() {
    assert_eq!(render_first("-x;"), "( - ( x ) )");
    assert_eq!(render_first("!true;"), "( ! ( true ) )");
    assert_eq!(render_first("-x * 2;"), "( ( - ( x ) ) * ( 2 ) )");
}

#[test]
fn test_call_expressions() {
    assert_eq!(render_first("f();"), "( f ( ) )");
    assert_eq!(render_first("f(1, x + 2);"), "( f ( ( 1 ) ( ( x ) + ( 2 ) ) ) )");
    assert_eq!(render_first("f(g(x));"), "( f ( ( g ( ( x ) ) ) ) )");
}

#[test]
fn test_statement_shapes() {
    assert_eq!(render_first("int a, b = 2;"), "( int ( a ) ( b = ( 2 ) ) )");
    assert_eq!(render_first("x = 1;"), "( x = ( 1 ) )");
    assert_eq!(render_first("x++;"), "( x ++ )");
    assert_eq!(render_first("x--;"), "( x -- )");
    assert_eq!(render_first("return;"), "( return )");
    assert_eq!(render_first("while (x) x++;"), "( while ( x ) ( x ++ ) )");
    assert_eq!(render_first("if (x) {} else return;"), "( if ( x ) ( ) else ( return ) )");
    assert_eq!(render_first("if (x) y = 1;"), "( if ( x ) ( y = ( 1 ) ) )");
    assert_eq!(
        render_first("for (i = 0; i < 3; i++) x++;"),
        "( for ( i = ( 0 ) ) ( ( i ) < ( 3 ) ) ( i ++ ) ( x ++ ) )"
    );
}

#[test]
fn test_each_statement_kind_is_tagged() {
    let tree = parse_body(
        "{ } if (x) {} while (x) {} for (i = 0; i < 1; i++) {} return; x = 1; int y; f();",
    );

    let categories: Vec<Category> = statements(&tree)
        .iter()
        .map(|stmt| tree.tags.category(stmt))
        .collect();

    assert_eq!(
        categories,
        vec![
            Category::Block,
            Category::If,
            Category::While,
            Category::For,
            Category::Return,
            Category::Assignment,
            Category::Declaration,
            Category::Expression,
        ]
    );
}

#[test]
fn test_identifier_statements_backtrack() {
    let tree = parse_body("f(x); x; x == 1;");

    for stmt in statements(&tree) {
        assert_eq!(tree.tags.category(stmt), Category::Expression);
    }
}

#[test]
fn test_statement_lines() {
    let source = "int main() {\n  int x;\n\n  x = 1;\n  while (x < 3)\n    x++;\n}\n";
    let tree = parse_source(source).unwrap();

    let lines: Vec<u32> = statements(&tree)
        .iter()
        .map(|stmt| tree.tags.line(stmt))
        .collect();
    assert_eq!(lines, vec![2, 4, 5]);

    let while_body = statements(&tree)[2].get(2).unwrap();
    assert_eq!(tree.tags.line(while_body), 6);
}

#[test]
fn test_expression_positions() {
    let source = "int main() {\n  a\n  + b;\n}\n";
    let tree = parse_source(source).unwrap();

    let sum = &statements(&tree)[0];
    assert_eq!(tree.tags.line(sum), 2);
    assert_eq!(tree.tags.line(sum.get(0).unwrap()), 2);
    assert_eq!(tree.tags.line(sum.get(2).unwrap()), 3);
}

#[test]
fn test_declaration_items_are_positioned() {
    let source = "int main() {\n  int a,\n    b = 1;\n}\n";
    let tree = parse_source(source).unwrap();

    let decl = &statements(&tree)[0];
    assert_eq!(tree.tags.line(decl.get(1).unwrap()), 2);
    assert_eq!(tree.tags.line(decl.get(2).unwrap()), 3);
}

#[test]
fn test_committed_failures() {
    assert_eq!(
        expected_error("int main() { if x) return 0; }"),
        (String::from("'('"), String::from("x"))
    );
    assert_eq!(
        expected_error("int main() { return 1 }"),
        (String::from("';'"), String::from("}"))
    );
    assert_eq!(
        expected_error("int main() { x = ; }"),
        (String::from("expression"), String::from(";"))
    );
    assert_eq!(
        expected_error("int main() { 1 + ; }"),
        (String::from("multiplicative-expression"), String::from(";"))
    );
    assert_eq!(
        expected_error("int main() { - ; }"),
        (String::from("primary-expression"), String::from(";"))
    );
    assert_eq!(
        expected_error("int main() { if (x) }"),
        (String::from("instruction"), String::from("}"))
    );
    assert_eq!(
        expected_error("int main() { for (int i = 0; i < 1; i++) {} }"),
        (String::from("assignment"), String::from("int"))
    );
    assert_eq!(
        expected_error("int main() { int 1; }"),
        (String::from("id"), String::from("1"))
    );
}

#[test]
fn test_function_header_failures() {
    assert_eq!(
        expected_error("int main();"),
        (String::from("instruction block"), String::from(";"))
    );
    assert_eq!(
        expected_error("int f(int a, ) { return 0; }"),
        (String::from("type"), String::from(")"))
    );
    assert_eq!(
        expected_error("int main() { return 0;"),
        (String::from("'}'"), String::from("EOF"))
    );
}

#[test]
fn test_compilation_unit_boundaries() {
    assert_eq!(
        expected_error(""),
        (String::from("function-decl"), String::from("EOF"))
    );
    assert_eq!(
        expected_error("int main() { return 0; } 42"),
        (String::from("function-decl"), String::from("42"))
    );
}

#[test]
fn test_syntax_error_position() {
    let error = parse_source("int main() {\n  return 1\n}\n").unwrap_err();

    assert!(error.is_syntax_error());
    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().offset, 24);
}
