use crate::{
    ast::{
        node::{Node, NodeValue, SyntaxTree},
        tags::{Category, TagStore},
        types::{Operator, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    symbols::{Symbol, SymbolTable},
    typed_ast::{
        LiteralValue, TypedAssignmentStmt, TypedBinaryExpr, TypedBlockStmt, TypedCallExpr,
        TypedExpr, TypedExpressionStmt, TypedFnDeclStmt, TypedForStmt, TypedIfStmt,
        TypedIncDecStmt, TypedLiteralExpr, TypedParameter, TypedPrefixExpr, TypedReturnStmt,
        TypedStmt, TypedSymbolExpr, TypedVarDeclItem, TypedVarDeclStmt, TypedWhileStmt,
    },
};

/// Builds the semantic error `$kind` for `$node`.
macro_rules! semantic_error {
    ($checker:expr, $node:expr, $kind:ident) => {
        $checker.error($node, |line, node| ErrorImpl::$kind { line, node })
    };
}

/// Routines every program can call without declaring them.
pub const BUILTINS: [(&str, Type, &[Type]); 6] = [
    ("printInt", Type::Void, &[Type::Int]),
    ("printString", Type::Void, &[Type::String]),
    ("printDouble", Type::Void, &[Type::Double]),
    ("error", Type::Void, &[]),
    ("readInt", Type::Int, &[]),
    ("readDouble", Type::Double, &[]),
];

#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub symbols: SymbolTable,
    tags: &'a TagStore,
    /// Declared return type of the function whose body is being checked
    current_function: Option<Type>,
    has_return: bool,
}

impl<'a> TypeChecker<'a> {
    pub fn new(tags: &'a TagStore) -> Self {
        let mut symbols = SymbolTable::new();
        symbols.begin_scope();
        for (name, return_type, parameters) in BUILTINS {
            symbols.add(Symbol::function(name, return_type, parameters));
        }

        TypeChecker {
            symbols,
            tags,
            current_function: None,
            has_return: false,
        }
    }

    pub fn line(&self, node: &Node) -> u32 {
        self.tags.line(node)
    }

    /// Wraps a semantic error kind with the node's line, rendering and
    /// source position.
    pub fn error(&self, node: &Node, kind: impl FnOnce(u32, String) -> ErrorImpl) -> Error {
        Error::new(kind(self.line(node), node.to_string()), self.tags.position(node))
    }

    fn child<'n>(&self, node: &'n Node, index: usize) -> Result<&'n Node, Error> {
        node.get(index)
            .ok_or_else(|| semantic_error!(self, node, UnexpectedShape))
    }

    fn get_symbol(&self, node: &Node, index: usize) -> Result<String, Error> {
        let child = self.child(node, index)?;
        child
            .as_symbol()
            .map(str::to_string)
            .ok_or_else(|| semantic_error!(self, node, ExpectedIdentifier))
    }

    fn get_type(&self, node: &Node, index: usize) -> Result<Type, Error> {
        let child = self.child(node, index)?;
        child
            .as_type()
            .ok_or_else(|| semantic_error!(self, node, ExpectedType))
    }

    fn get_operator(&self, node: &Node, index: usize) -> Result<Operator, Error> {
        let child = self.child(node, index)?;
        child
            .as_operator()
            .ok_or_else(|| semantic_error!(self, node, ExpectedOperator))
    }

    /// The visible variable called `name`; functions do not count.
    fn lookup_variable(&self, node: &Node, name: &str) -> Result<Type, Error> {
        match self.symbols.lookup(name) {
            Some(symbol) if !symbol.is_function() => Ok(symbol.get_type()),
            _ => Err(semantic_error!(self, node, UndefinedVariable)),
        }
    }
}

/// Checks a whole compilation unit and returns it as the program block.
pub fn type_check(tree: &SyntaxTree) -> Result<TypedBlockStmt, Error> {
    let mut type_checker = TypeChecker::new(&tree.tags);
    type_check_block(&mut type_checker, &tree.root)
}

pub fn type_check_block(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedBlockStmt, Error> {
    type_checker.symbols.begin_scope();

    // signatures first so sibling functions can call each other
    for child in node.children() {
        if type_checker.tags.category(child) == Category::FunDecl {
            declare_function(type_checker, child)?;
        }
    }

    let mut body = vec![];
    for child in node.children() {
        body.push(type_check_stmt(type_checker, child)?);
    }

    type_checker.symbols.end_scope();

    Ok(TypedBlockStmt {
        has_return: body.iter().any(TypedStmt::has_return),
        body,
        line: type_checker.line(node),
    })
}

fn declare_function(type_checker: &mut TypeChecker, node: &Node) -> Result<(), Error> {
    let return_type = type_checker.get_type(node, 0)?;
    let name = type_checker.get_symbol(node, 1)?;

    if type_checker.symbols.declared_in_current_scope(&name) {
        return Err(semantic_error!(type_checker, node, AlreadyDeclared));
    }

    let mut parameters = vec![];
    for argument in type_checker.child(node, 2)?.children() {
        parameters.push(type_checker.get_type(argument, 0)?);
    }

    type_checker
        .symbols
        .add(Symbol::function(&name, return_type, &parameters));
    Ok(())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    match type_checker.tags.category(node) {
        Category::Block => Ok(TypedStmt::Block(type_check_block(type_checker, node)?)),
        Category::If => type_check_if_stmt(type_checker, node),
        Category::For => type_check_for_stmt(type_checker, node),
        Category::While => type_check_while_stmt(type_checker, node),
        Category::Return => type_check_return_stmt(type_checker, node),
        Category::Assignment => type_check_assignment(type_checker, node),
        Category::Declaration => type_check_var_decl_stmt(type_checker, node),
        Category::FunDecl => Ok(TypedStmt::FnDecl(type_check_fn_decl_stmt(type_checker, node)?)),
        Category::Expression => Ok(TypedStmt::Expression(TypedExpressionStmt {
            expression: type_check_expr(type_checker, node)?,
            line: type_checker.line(node),
        })),
        Category::None => Err(semantic_error!(type_checker, node, UnexpectedShape)),
    }
}

/// `[type, id, [[type, id]...], block]`. The signature is already bound by
/// the enclosing block.
pub fn type_check_fn_decl_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedFnDeclStmt, Error> {
    let return_type = type_checker.get_type(node, 0)?;
    let name = type_checker.get_symbol(node, 1)?;

    type_checker.symbols.begin_scope();

    let mut parameters = vec![];
    for argument in type_checker.child(node, 2)?.children() {
        let ty = type_checker.get_type(argument, 0)?;
        let parameter = type_checker.get_symbol(argument, 1)?;

        if type_checker.symbols.declared_in_current_scope(&parameter) {
            return Err(semantic_error!(type_checker, argument, AlreadyDeclared));
        }
        type_checker.symbols.add(Symbol::variable(&parameter, ty));
        parameters.push(TypedParameter { name: parameter, ty });
    }

    let enclosing_function = type_checker.current_function.replace(return_type);
    let enclosing_has_return = std::mem::replace(&mut type_checker.has_return, false);

    let body = type_checker.child(node, 3)?;
    let body = type_check_block(type_checker, body)?;

    type_checker.symbols.end_scope();
    let has_return = std::mem::replace(&mut type_checker.has_return, enclosing_has_return);
    type_checker.current_function = enclosing_function;

    if !has_return {
        return Err(semantic_error!(type_checker, node, NoReturn));
    }

    Ok(TypedFnDeclStmt {
        name,
        return_type,
        parameters,
        body,
        line: type_checker.line(node),
    })
}

/// `[if, cond, stmt]` or `[if, cond, stmt, else, stmt]`.
fn type_check_if_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    let condition = type_check_expr_at(type_checker, node, 1)?;
    let then_body = type_check_stmt_at(type_checker, node, 2)?;

    let else_body = match node.len() {
        3 => None,
        5 => Some(Box::new(type_check_stmt_at(type_checker, node, 4)?)),
        _ => return Err(semantic_error!(type_checker, node, UnexpectedShape)),
    };

    Ok(TypedStmt::If(TypedIfStmt {
        condition,
        then_body: Box::new(then_body),
        else_body,
        line: type_checker.line(node),
    }))
}

/// `[for, assign, cond, assign, stmt]`. No scope is opened for the header.
fn type_check_for_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    let init = type_check_assignment_at(type_checker, node, 1)?;
    let condition = type_check_expr_at(type_checker, node, 2)?;
    let step = type_check_assignment_at(type_checker, node, 3)?;
    let body = type_check_stmt_at(type_checker, node, 4)?;

    Ok(TypedStmt::For(TypedForStmt {
        init: Box::new(init),
        condition,
        step: Box::new(step),
        body: Box::new(body),
        line: type_checker.line(node),
    }))
}

/// `[while, cond, stmt]`.
fn type_check_while_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    let condition = type_check_expr_at(type_checker, node, 1)?;
    let body = type_check_stmt_at(type_checker, node, 2)?;

    Ok(TypedStmt::While(TypedWhileStmt {
        condition,
        body: Box::new(body),
        line: type_checker.line(node),
    }))
}

/// `[return]` or `[return, expr]`.
fn type_check_return_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    let value = match node.get(1) {
        Some(expr) => Some(type_check_expr(type_checker, expr)?),
        None => None,
    };
    let ty = value.as_ref().map_or(Type::Void, TypedExpr::get_type);

    if type_checker.current_function != Some(ty) {
        return Err(semantic_error!(type_checker, node, BadReturnType));
    }
    type_checker.has_return = true;

    Ok(TypedStmt::Return(TypedReturnStmt {
        value,
        line: type_checker.line(node),
    }))
}

/// `[id, =, expr]` or `[id, ++|--]`.
pub fn type_check_assignment(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    let assignee = type_checker.get_symbol(node, 0)?;
    let ty = type_checker.lookup_variable(node, &assignee)?;

    match node.len() {
        3 => {
            let value = type_check_assigned_value(type_checker, node, ty)?;
            Ok(TypedStmt::Assignment(TypedAssignmentStmt {
                assignee,
                value,
                line: type_checker.line(node),
            }))
        }
        2 => {
            let operator = type_checker.get_operator(node, 1)?;
            if !ty.is_numeric() {
                return Err(semantic_error!(type_checker, node, BadAssignIncDecType));
            }

            Ok(TypedStmt::IncDec(TypedIncDecStmt {
                assignee,
                operator,
                ty,
                line: type_checker.line(node),
            }))
        }
        _ => Err(semantic_error!(type_checker, node, UnexpectedShape)),
    }
}

/// The expression in the third slot of `node`, which must have type `ty`.
fn type_check_assigned_value(type_checker: &mut TypeChecker, node: &Node, ty: Type) -> Result<TypedExpr, Error> {
    let value = type_check_expr_at(type_checker, node, 2)?;

    if value.get_type() != ty {
        return Err(semantic_error!(type_checker, node, BadAssignExpType));
    }
    Ok(value)
}

/// `[type, [id], [id, =, expr], ...]`.
///
/// Each name is bound before its initializer is checked, the same way an
/// assignment to it would be.
fn type_check_var_decl_stmt(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedStmt, Error> {
    let ty = type_checker.get_type(node, 0)?;

    let mut items = vec![];
    for item in node.children().iter().skip(1) {
        let name = type_checker.get_symbol(item, 0)?;

        if type_checker.symbols.declared_in_current_scope(&name) {
            return Err(semantic_error!(type_checker, item, AlreadyDeclared));
        }
        type_checker.symbols.add(Symbol::variable(&name, ty));

        let value = match item.len() {
            1 => None,
            3 => Some(type_check_assigned_value(type_checker, item, ty)?),
            _ => return Err(semantic_error!(type_checker, item, UnexpectedShape)),
        };

        items.push(TypedVarDeclItem {
            name,
            value,
            line: type_checker.line(item),
        });
    }

    Ok(TypedStmt::VarDecl(TypedVarDeclStmt {
        ty,
        items,
        line: type_checker.line(node),
    }))
}

fn type_check_stmt_at(type_checker: &mut TypeChecker, node: &Node, index: usize) -> Result<TypedStmt, Error> {
    let child = type_checker.child(node, index)?;
    type_check_stmt(type_checker, child)
}

fn type_check_assignment_at(type_checker: &mut TypeChecker, node: &Node, index: usize) -> Result<TypedStmt, Error> {
    let child = type_checker.child(node, index)?;
    type_check_assignment(type_checker, child)
}

fn type_check_expr_at(type_checker: &mut TypeChecker, node: &Node, index: usize) -> Result<TypedExpr, Error> {
    let child = type_checker.child(node, index)?;
    type_check_expr(type_checker, child)
}

/// Dispatches on the shape of an expression node.
///
/// A leading identifier means a variable reference (`[id]`) or a call
/// (`[id, [args...]]`). Otherwise the child count decides: one for a
/// literal, two for a prefix operator, three for a binary operator.
pub fn type_check_expr(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedExpr, Error> {
    let first = type_checker.child(node, 0)?;

    if let Some(name) = first.as_symbol() {
        return match node.len() {
            1 => Ok(TypedExpr::Symbol(TypedSymbolExpr {
                name: name.to_string(),
                ty: type_checker.lookup_variable(node, name)?,
                line: type_checker.line(node),
            })),
            _ => type_check_call_expr(type_checker, node),
        };
    }

    match node.len() {
        1 => type_check_literal_expr(type_checker, node),
        2 => type_check_prefix_expr(type_checker, node),
        3 => type_check_binary_expr(type_checker, node),
        _ => Err(semantic_error!(type_checker, node, UnexpectedShape)),
    }
}

fn type_check_literal_expr(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedExpr, Error> {
    let value = match &type_checker.child(node, 0)?.value {
        NodeValue::Bool(value) => LiteralValue::Bool(*value),
        NodeValue::Int(value) => LiteralValue::Int(*value),
        NodeValue::Double(value) => LiteralValue::Double(*value),
        NodeValue::String(value) => LiteralValue::String(value.clone()),
        _ => return Err(semantic_error!(type_checker, node, UnexpectedShape)),
    };

    Ok(TypedExpr::Literal(TypedLiteralExpr {
        value,
        line: type_checker.line(node),
    }))
}

/// `[op, operand]`: `!` takes a boolean, `+` and `-` take a numeric operand.
fn type_check_prefix_expr(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedExpr, Error> {
    let operator = type_checker.get_operator(node, 0)?;
    let operand = type_check_expr_at(type_checker, node, 1)?;
    let ty = operand.get_type();

    let accepted = match operator {
        Operator::Not => ty == Type::Boolean,
        _ => ty.is_numeric(),
    };
    if !accepted {
        return Err(semantic_error!(type_checker, node, IncompatibleUnaryExpArgument));
    }

    Ok(TypedExpr::Prefix(TypedPrefixExpr {
        operator,
        operand: Box::new(operand),
        ty,
        line: type_checker.line(node),
    }))
}

/// `[lhs, op, rhs]`: both sides must have the same type, and that type must
/// belong to the operator's argument class. Equality accepts both classes.
fn type_check_binary_expr(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedExpr, Error> {
    let operator = type_checker.get_operator(node, 1)?;
    let left = type_check_expr_at(type_checker, node, 0)?;
    let right = type_check_expr_at(type_checker, node, 2)?;

    let ty = left.get_type();
    if ty != right.get_type() {
        return Err(semantic_error!(type_checker, node, IncompatibleBinaryExpArguments));
    }

    let accepted = (operator.numeric_args() && ty.is_numeric())
        || (operator.boolean_args() && ty == Type::Boolean);
    if !accepted {
        return Err(semantic_error!(type_checker, node, IncompatibleBinaryExpArguments));
    }

    Ok(TypedExpr::Binary(TypedBinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        ty: if operator.numeric_result() { ty } else { Type::Boolean },
        line: type_checker.line(node),
    }))
}

/// `[id, [args...]]`.
fn type_check_call_expr(type_checker: &mut TypeChecker, node: &Node) -> Result<TypedExpr, Error> {
    let callee = type_checker.get_symbol(node, 0)?;

    let Some(symbol) = type_checker.symbols.lookup(&callee).cloned() else {
        return Err(semantic_error!(type_checker, node, UndefinedFunction));
    };
    if !symbol.is_function() {
        return Err(semantic_error!(type_checker, node, NotAFunction));
    }

    let arguments_node = type_checker.child(node, 1)?;
    let parameters = symbol.parameters();
    if arguments_node.len() != parameters.len() {
        let (expected, received) = (parameters.len(), arguments_node.len());
        return Err(type_checker.error(node, |line, node| ErrorImpl::BadArgumentCount {
            line,
            node,
            expected,
            received,
        }));
    }

    let mut arguments = vec![];
    for (argument, parameter) in arguments_node.children().iter().zip(parameters) {
        let argument = type_check_expr(type_checker, argument)?;
        if argument.get_type() != *parameter {
            return Err(semantic_error!(type_checker, node, BadArgumentType));
        }
        arguments.push(argument);
    }

    Ok(TypedExpr::Call(TypedCallExpr {
        callee,
        arguments,
        ty: symbol.get_type(),
        line: type_checker.line(node),
    }))
}
