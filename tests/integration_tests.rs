//! Integration tests for the complete front end.
//!
//! These tests run whole programs through tokenization, parsing and type
//! checking and look at the typed AST or the first error reported.

use jlc::{
    ast::types::Type,
    check_source,
    errors::errors::ErrorImpl,
    type_checker::typed_ast::{TypedBlockStmt, TypedExpr, TypedStmt},
};

fn error_name(source: &str) -> String {
    match check_source(source) {
        Ok(_) => panic!("program should have been rejected:\n{}", source),
        Err(error) => error.get_error_name().to_string(),
    }
}

/// Collects the type of every expression in the program.
fn expression_types(block: &TypedBlockStmt, types: &mut Vec<Type>) {
    for stmt in &block.body {
        stmt_expression_types(stmt, types);
    }
}

fn stmt_expression_types(stmt: &TypedStmt, types: &mut Vec<Type>) {
    match stmt {
        TypedStmt::Block(block) => expression_types(block, types),
        TypedStmt::FnDecl(fn_decl) => expression_types(&fn_decl.body, types),
        TypedStmt::If(if_stmt) => {
            expr_types(&if_stmt.condition, types);
            stmt_expression_types(&if_stmt.then_body, types);
            if let Some(else_body) = &if_stmt.else_body {
                stmt_expression_types(else_body, types);
            }
        }
        TypedStmt::While(while_stmt) => {
            expr_types(&while_stmt.condition, types);
            stmt_expression_types(&while_stmt.body, types);
        }
        TypedStmt::For(for_stmt) => {
            stmt_expression_types(&for_stmt.init, types);
            expr_types(&for_stmt.condition, types);
            stmt_expression_types(&for_stmt.step, types);
            stmt_expression_types(&for_stmt.body, types);
        }
        TypedStmt::Return(return_stmt) => {
            if let Some(value) = &return_stmt.value {
                expr_types(value, types);
            }
        }
        TypedStmt::Expression(stmt) => expr_types(&stmt.expression, types),
        TypedStmt::Assignment(stmt) => expr_types(&stmt.value, types),
        TypedStmt::VarDecl(decl) => {
            for value in decl.items.iter().filter_map(|item| item.value.as_ref()) {
                expr_types(value, types);
            }
        }
        TypedStmt::IncDec(_) => {}
    }
}

fn expr_types(expr: &TypedExpr, types: &mut Vec<Type>) {
    types.push(expr.get_type());
    match expr {
        TypedExpr::Prefix(prefix) => expr_types(&prefix.operand, types),
        TypedExpr::Binary(binary) => {
            expr_types(&binary.left, types);
            expr_types(&binary.right, types);
        }
        TypedExpr::Call(call) => {
            for argument in &call.arguments {
                expr_types(argument, types);
            }
        }
        TypedExpr::Literal(_) | TypedExpr::Symbol(_) => {}
    }
}

const FIBONACCI: &str = "
// iterative and recursive fibonacci
int fib(int n) {
  if (n < 2)
    return n;
  else
    return fib(n - 1) + fib(n - 2);
}

int fibIter(int n) {
  int a = 0, b = 1, i;
  for (i = 0; i < n; i++) {
    int t = a + b;
    a = b;
    b = t;
  }
  return a;
}

/* entry point */
int main() {
  int n = readInt();
  boolean same = fib(n) == fibIter(n);
  if (!same)
    error();
  printInt(fib(n));
  printString(\"done\");
  double average = 0.5 * (1.0 + 2.0);
  printDouble(average);
  return 0;
}
";

#[test]
fn test_well_typed_program() {
    let program = check_source(FIBONACCI).unwrap();

    let names: Vec<&str> = program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            TypedStmt::FnDecl(fn_decl) => Some(fn_decl.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["fib", "fibIter", "main"]);

    let mut types = vec![];
    expression_types(&program, &mut types);
    for ty in [Type::Void, Type::Int, Type::Double, Type::Boolean, Type::String] {
        assert!(types.contains(&ty), "no expression of type {}", ty);
    }
}

#[test]
fn test_void_calls_have_void_type() {
    let program = check_source("int main() { printInt(1); return 0; }").unwrap();

    let mut types = vec![];
    expression_types(&program, &mut types);
    assert_eq!(types, vec![Type::Void, Type::Int, Type::Int]);
}

#[test]
fn test_same_scope_redeclaration() {
    assert_eq!(
        error_name("int main() { int a; double a; return 0; }"),
        "AlreadyDeclared"
    );
}

#[test]
fn test_shadowing() {
    assert!(check_source("int main() { int a; { double a; a = 1.0; } return 0; }").is_ok());
    assert!(check_source("int main() { int a; { double a; a = 1.0; } a = 2; return 0; }").is_ok());
    assert!(check_source("int f(int a) { { boolean a = true; } return a; } int main() { return f(1); }").is_ok());
}

#[test]
fn test_exact_types() {
    assert_eq!(
        error_name("int f() { return 1; } int main() { double d; d = f(); return 0; }"),
        "BadAssignExpType"
    );
    assert_eq!(
        error_name("int f() { return 1; } int main() { double d = 2.0 * f(); return 0; }"),
        "IncompatibleBinaryExpArguments"
    );
}

#[test]
fn test_mixed_equality() {
    assert_eq!(
        error_name("int main() { boolean b; int i; b == i; return 0; }"),
        "IncompatibleBinaryExpArguments"
    );
}

#[test]
fn test_no_return() {
    assert_eq!(error_name("void f(int x) { } int main() { return 0; }"), "NoReturn");
    assert!(check_source("void f(int x) { return; } int main() { return 0; }").is_ok());
}

#[test]
fn test_builtin_arguments() {
    assert_eq!(error_name("int main() { printInt(3.0); return 0; }"), "BadArgumentType");
    assert_eq!(error_name("int main() { printInt(1, 2); return 0; }"), "BadArgumentCount");
}

#[test]
fn test_string_increment() {
    assert_eq!(
        error_name("int main() { string x; x++; return 0; }"),
        "BadAssignIncDecType"
    );
}

#[test]
fn test_precedence_in_typed_ast() {
    let program = check_source("int main() { 1 + 2 * 3; 1 * 2 + 3; return 0; }").unwrap();
    let TypedStmt::FnDecl(main) = &program.body[0] else {
        panic!("expected main");
    };

    let binary = |index: usize| match &main.body.body[index] {
        TypedStmt::Expression(stmt) => match &stmt.expression {
            TypedExpr::Binary(binary) => binary.clone(),
            other => panic!("unexpected expression {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    };

    // 1 + (2 * 3)
    let first = binary(0);
    assert!(matches!(*first.left, TypedExpr::Literal(_)));
    assert!(matches!(*first.right, TypedExpr::Binary(_)));

    // (1 * 2) + 3
    let second = binary(1);
    assert!(matches!(*second.left, TypedExpr::Binary(_)));
    assert!(matches!(*second.right, TypedExpr::Literal(_)));
}

#[test]
fn test_single_literal_statement() {
    let program = check_source("int main() { 42; return 0; }").unwrap();
    let TypedStmt::FnDecl(main) = &program.body[0] else {
        panic!("expected main");
    };

    match &main.body.body[0] {
        TypedStmt::Expression(stmt) => {
            assert!(matches!(stmt.expression, TypedExpr::Literal(_)));
            assert_eq!(stmt.expression.get_type(), Type::Int);
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_first_error_wins() {
    let source = "int main() {\n  undefined();\n  int x = true;\n  return 0;\n}\n";
    let error = check_source(source).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UndefinedFunction {
            line: 2,
            node: String::from("( undefined ( ) )"),
        }
    );
}

#[test]
fn test_syntax_errors_surface_before_analysis() {
    let error = check_source("int main() { int x = 1 return x; }").unwrap_err();
    assert!(error.is_syntax_error());

    let error = check_source("int main() { /* never closed").unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedComment");
}
