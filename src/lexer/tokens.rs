use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{ast::types::Type, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("void", TokenKind::TypeVoid);
        map.insert("int", TokenKind::TypeInt);
        map.insert("double", TokenKind::TypeDouble);
        map.insert("boolean", TokenKind::TypeBoolean);
        map.insert("string", TokenKind::TypeString);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Double,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Comma,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    If,
    Else,
    While,
    For,
    Return,
    True,
    False,
    TypeVoid,
    TypeInt,
    TypeDouble,
    TypeBoolean,
    TypeString,
}

impl TokenKind {
    /// The type named by a type keyword.
    pub fn as_type(&self) -> Option<Type> {
        match self {
            TokenKind::TypeVoid => Some(Type::Void),
            TokenKind::TypeInt => Some(Type::Int),
            TokenKind::TypeDouble => Some(Type::Double),
            TokenKind::TypeBoolean => Some(Type::Boolean),
            TokenKind::TypeString => Some(Type::String),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
