//! Value types and operators of the language.
//!
//! Both appear as leaves of the generic syntax tree (a type keyword or an
//! operator token is stored as its resolved enum value) and as attributes of
//! the typed AST.

use std::fmt::Display;

/// The closed set of Javalette types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Int,
    Double,
    Boolean,
    String,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Double)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Void => "void",
            Type::Int => "int",
            Type::Double => "double",
            Type::Boolean => "boolean",
            Type::String => "string",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Mul,
    Div,
    Mod,
    Plus,
    Minus,
    Greater,
    GreaterEquals,
    Less,
    LessEquals,
    Equals,
    NotEquals,
    And,
    Or,
    Not,
    Increment,
    Decrement,
}

impl Operator {
    /// Arithmetic, relational and equality operators take int or double operands.
    pub fn numeric_args(&self) -> bool {
        matches!(
            self,
            Operator::Mul
                | Operator::Div
                | Operator::Mod
                | Operator::Plus
                | Operator::Minus
                | Operator::Greater
                | Operator::GreaterEquals
                | Operator::Less
                | Operator::LessEquals
                | Operator::Equals
                | Operator::NotEquals
        )
    }

    /// Equality, logical operators and `!` take boolean operands.
    pub fn boolean_args(&self) -> bool {
        matches!(
            self,
            Operator::Equals | Operator::NotEquals | Operator::And | Operator::Or | Operator::Not
        )
    }

    /// Arithmetic operators yield their operand type, everything else yields boolean.
    pub fn numeric_result(&self) -> bool {
        matches!(
            self,
            Operator::Mul | Operator::Div | Operator::Mod | Operator::Plus | Operator::Minus
        )
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Greater => ">",
            Operator::GreaterEquals => ">=",
            Operator::Less => "<",
            Operator::LessEquals => "<=",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::Increment => "++",
            Operator::Decrement => "--",
        };
        write!(f, "{}", symbol)
    }
}
