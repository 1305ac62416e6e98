//! Typed Abstract Syntax Tree definitions.
//!
//! This module contains the strongly typed nodes produced by the type
//! checker. Unlike the generic syntax tree, every construct has named fields
//! and every expression carries its statically resolved [`Type`], computed
//! once when the node is built. Each node also keeps the source line it was
//! parsed from.
//!
//! Parents own their children exclusively; name resolution already happened
//! through the symbol table, so the tree has no back references.

use crate::ast::types::{Operator, Type};

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
}

impl LiteralValue {
    pub fn get_type(&self) -> Type {
        match self {
            LiteralValue::Bool(_) => Type::Boolean,
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Double(_) => Type::Double,
            LiteralValue::String(_) => Type::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedLiteralExpr {
    pub value: LiteralValue,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedPrefixExpr {
    pub operator: Operator,
    pub operand: Box<TypedExpr>,
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBinaryExpr {
    pub left: Box<TypedExpr>,
    pub operator: Operator,
    pub right: Box<TypedExpr>,
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedCallExpr {
    pub callee: String,
    pub arguments: Vec<TypedExpr>,
    /// The callee's declared return type.
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedSymbolExpr {
    pub name: String,
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExpr {
    Literal(TypedLiteralExpr),
    Prefix(TypedPrefixExpr),
    Binary(TypedBinaryExpr),
    Call(TypedCallExpr),
    Symbol(TypedSymbolExpr),
}

impl TypedExpr {
    pub fn get_type(&self) -> Type {
        match self {
            TypedExpr::Literal(literal) => literal.value.get_type(),
            TypedExpr::Prefix(prefix) => prefix.ty,
            TypedExpr::Binary(binary) => binary.ty,
            TypedExpr::Call(call) => call.ty,
            TypedExpr::Symbol(symbol) => symbol.ty,
        }
    }

    pub fn get_line(&self) -> u32 {
        match self {
            TypedExpr::Literal(literal) => literal.line,
            TypedExpr::Prefix(prefix) => prefix.line,
            TypedExpr::Binary(binary) => binary.line,
            TypedExpr::Call(call) => call.line,
            TypedExpr::Symbol(symbol) => symbol.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBlockStmt {
    pub body: Vec<TypedStmt>,
    /// Set when a return statement appears in this block or in a nested
    /// block, branch or loop body.
    pub has_return: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedIfStmt {
    pub condition: TypedExpr,
    pub then_body: Box<TypedStmt>,
    pub else_body: Option<Box<TypedStmt>>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedForStmt {
    pub init: Box<TypedStmt>,
    pub condition: TypedExpr,
    pub step: Box<TypedStmt>,
    pub body: Box<TypedStmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedWhileStmt {
    pub condition: TypedExpr,
    pub body: Box<TypedStmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedReturnStmt {
    pub value: Option<TypedExpr>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpressionStmt {
    pub expression: TypedExpr,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedAssignmentStmt {
    pub assignee: String,
    pub value: TypedExpr,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedIncDecStmt {
    pub assignee: String,
    pub operator: Operator,
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedVarDeclItem {
    pub name: String,
    pub value: Option<TypedExpr>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedVarDeclStmt {
    pub ty: Type,
    pub items: Vec<TypedVarDeclItem>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedParameter {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedFnDeclStmt {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<TypedParameter>,
    pub body: TypedBlockStmt,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmt {
    Block(TypedBlockStmt),
    If(TypedIfStmt),
    For(TypedForStmt),
    While(TypedWhileStmt),
    Return(TypedReturnStmt),
    Expression(TypedExpressionStmt),
    Assignment(TypedAssignmentStmt),
    IncDec(TypedIncDecStmt),
    VarDecl(TypedVarDeclStmt),
    FnDecl(TypedFnDeclStmt),
}

impl TypedStmt {
    /// Whether a return statement is reachable syntactically from here.
    /// A nested function's returns belong to that function.
    pub fn has_return(&self) -> bool {
        match self {
            TypedStmt::Block(block) => block.has_return,
            TypedStmt::If(if_stmt) => {
                if_stmt.then_body.has_return()
                    || if_stmt
                        .else_body
                        .as_ref()
                        .is_some_and(|body| body.has_return())
            }
            TypedStmt::For(for_stmt) => for_stmt.body.has_return(),
            TypedStmt::While(while_stmt) => while_stmt.body.has_return(),
            TypedStmt::Return(_) => true,
            _ => false,
        }
    }

    pub fn get_line(&self) -> u32 {
        match self {
            TypedStmt::Block(stmt) => stmt.line,
            TypedStmt::If(stmt) => stmt.line,
            TypedStmt::For(stmt) => stmt.line,
            TypedStmt::While(stmt) => stmt.line,
            TypedStmt::Return(stmt) => stmt.line,
            TypedStmt::Expression(stmt) => stmt.line,
            TypedStmt::Assignment(stmt) => stmt.line,
            TypedStmt::IncDec(stmt) => stmt.line,
            TypedStmt::VarDecl(stmt) => stmt.line,
            TypedStmt::FnDecl(stmt) => stmt.line,
        }
    }
}
