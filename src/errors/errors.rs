use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Errors raised before a syntax tree exists (lexing and parsing).
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnterminatedComment
                | ErrorImpl::UnterminatedString
                | ErrorImpl::NumberParseError { .. }
                | ErrorImpl::Expected { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::Expected { .. } => "SyntaxError",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::ExpectedIdentifier { .. } => "ExpectedIdentifier",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::ExpectedOperator { .. } => "ExpectedOperator",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::BadArgumentCount { .. } => "BadArgumentCount",
            ErrorImpl::BadArgumentType { .. } => "BadArgumentType",
            ErrorImpl::BadReturnType { .. } => "BadReturnType",
            ErrorImpl::BadAssignExpType { .. } => "BadAssignExpType",
            ErrorImpl::BadAssignIncDecType { .. } => "BadAssignIncDecType",
            ErrorImpl::IncompatibleBinaryExpArguments { .. } => "IncompatibleBinaryExpArguments",
            ErrorImpl::IncompatibleUnaryExpArgument { .. } => "IncompatibleUnaryExpArgument",
            ErrorImpl::NoReturn { .. } => "NoReturn",
            ErrorImpl::UnexpectedShape { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::UnterminatedString => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::Expected { expected, found } => ErrorTip::Suggestion(format!(
                "Expecting {} here, found `{}`",
                expected, found
            )),
            ErrorImpl::AlreadyDeclared { .. } => {
                ErrorTip::Suggestion(String::from("Name already declared in this scope"))
            }
            ErrorImpl::UndefinedVariable { .. } => {
                ErrorTip::Suggestion(String::from("Variable used before its declaration"))
            }
            ErrorImpl::UndefinedFunction { .. } => {
                ErrorTip::Suggestion(String::from("No function with this name is visible"))
            }
            ErrorImpl::NotAFunction { .. } => {
                ErrorTip::Suggestion(String::from("Only functions can be called"))
            }
            ErrorImpl::BadArgumentCount { expected, received, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::BadReturnType { .. }
            | ErrorImpl::BadAssignExpType { .. }
            | ErrorImpl::BadArgumentType { .. }
            | ErrorImpl::IncompatibleBinaryExpArguments { .. } => ErrorTip::Suggestion(
                String::from("Types must match exactly, there is no implicit conversion"),
            ),
            ErrorImpl::BadAssignIncDecType { .. } => {
                ErrorTip::Suggestion(String::from("Only int and double can be incremented"))
            }
            ErrorImpl::IncompatibleUnaryExpArgument { .. } => ErrorTip::Suggestion(String::from(
                "`!` takes a boolean, `+` and `-` take an int or a double",
            )),
            ErrorImpl::NoReturn { .. } => {
                ErrorTip::Suggestion(String::from("Function body has no return statement"))
            }
            ErrorImpl::ExpectedIdentifier { .. }
            | ErrorImpl::ExpectedType { .. }
            | ErrorImpl::ExpectedOperator { .. }
            | ErrorImpl::UnexpectedShape { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.get_error_name(), self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Semantic variants carry the line and rendering of the node that
/// triggered them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated /* comment")]
    UnterminatedComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expecting {expected} here: {found:?}")]
    Expected { expected: String, found: String },

    #[error("at line {line}: {node}")]
    AlreadyDeclared { line: u32, node: String },
    #[error("at line {line}: {node}")]
    ExpectedIdentifier { line: u32, node: String },
    #[error("at line {line}: {node}")]
    ExpectedType { line: u32, node: String },
    #[error("at line {line}: {node}")]
    ExpectedOperator { line: u32, node: String },
    #[error("at line {line}: {node}")]
    UndefinedVariable { line: u32, node: String },
    #[error("at line {line}: {node}")]
    UndefinedFunction { line: u32, node: String },
    #[error("at line {line}: {node}")]
    NotAFunction { line: u32, node: String },
    #[error("at line {line}: {node}")]
    BadArgumentCount {
        line: u32,
        node: String,
        expected: usize,
        received: usize,
    },
    #[error("at line {line}: {node}")]
    BadArgumentType { line: u32, node: String },
    #[error("at line {line}: {node}")]
    BadReturnType { line: u32, node: String },
    #[error("at line {line}: {node}")]
    BadAssignExpType { line: u32, node: String },
    #[error("at line {line}: {node}")]
    BadAssignIncDecType { line: u32, node: String },
    #[error("at line {line}: {node}")]
    IncompatibleBinaryExpArguments { line: u32, node: String },
    #[error("at line {line}: {node}")]
    IncompatibleUnaryExpArgument { line: u32, node: String },
    #[error("at line {line}: {node}")]
    NoReturn { line: u32, node: String },
    #[error("unexpected tree shape at line {line}: {node}")]
    UnexpectedShape { line: u32, node: String },
}
