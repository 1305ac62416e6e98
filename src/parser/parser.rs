//! Parser implementation for building the generic syntax tree.
//!
//! This module contains the main Parser struct, its token cursor helpers and
//! the top-level rules (compilation unit, function declaration, argument
//! list). Statements live in `stmt.rs` and expressions in `expr.rs`.

use crate::{
    ast::{
        node::{Node, NodeValue, SyntaxTree},
        tags::{Category, TagStore},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::stmt::parse_block_stmt;

/// Outcome of a grammar rule: `Ok(None)` lets the caller try another
/// alternative, `Err` aborts the whole parse.
pub type ParseResult = Result<Option<Node>, Error>;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream, the position of the cursor in it and
/// the tag store every created node is tagged into.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Category and position metadata for the nodes built so far
    pub tags: TagStore,
}

impl Parser {
    /// Creates a new Parser instance over `tokens`.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map_or(Position::null(), |token| token.span.end);
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: end, end }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            tags: TagStore::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token `n` places ahead, `EOF` past the end.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Advances to the next token and returns the previous one.
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - Description of the construct used in the syntax error
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise a fatal Error.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance())
        } else {
            Err(self.error_expected(expected))
        }
    }

    /// Unwraps the result of a rule that must match once the caller committed.
    pub fn require(&self, node: Option<Node>, expected: &str) -> Result<Node, Error> {
        node.ok_or_else(|| self.error_expected(expected))
    }

    /// Builds the syntax error for the current token.
    pub fn error_expected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::Expected {
                expected: expected.to_string(),
                found: token.value.clone(),
            },
            token.span.start,
        )
    }

    /// Checks if the cursor reached the end of the input.
    pub fn at_eof(&self) -> bool {
        self.current_token_kind() == TokenKind::EOF
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    /// Creates an empty node already carrying the current source position.
    pub fn positioned_slot(&mut self) -> Node {
        let mut slot = Node::invalid();
        let position = self.get_position();
        self.tags.set_position(&mut slot, position);
        slot
    }
}

/// `type` leaf, or no match.
pub fn parse_type(parser: &mut Parser) -> ParseResult {
    match parser.current_token_kind().as_type() {
        Some(ty) => {
            parser.advance();
            Ok(Some(Node::new(NodeValue::Type(ty))))
        }
        None => Ok(None),
    }
}

/// `id` leaf; fatal when missing.
pub fn expect_identifier(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect(TokenKind::Identifier, "id")?;
    Ok(Node::symbol(&token.value))
}

/// `type id '(' arglist ')' block`, shaped `[type, id, [args...], block]`.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> ParseResult {
    let position = parser.get_position();
    let Some(return_type) = parse_type(parser)? else {
        return Ok(None);
    };

    let identifier = expect_identifier(parser)?;
    parser.expect(TokenKind::OpenParen, "'('")?;
    let arguments = parse_arg_list(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    let body = parse_block_stmt(parser)?;
    let body = parser.require(body, "instruction block")?;

    let mut fn_decl = Node::list(vec![return_type, identifier, arguments, body]);
    parser.tags.set_position(&mut fn_decl, position);
    Ok(Some(fn_decl))
}

/// Possibly empty, comma separated `type id` pairs, each shaped `[type, id]`.
pub fn parse_arg_list(parser: &mut Parser) -> Result<Node, Error> {
    let mut arguments = Node::list(vec![]);

    loop {
        let position = parser.get_position();
        let Some(ty) = parse_type(parser)? else {
            if arguments.is_empty() {
                break;
            }
            return Err(parser.error_expected("type"));
        };

        let mut argument = Node::list(vec![ty, expect_identifier(parser)?]);
        parser.tags.set_position(&mut argument, position);
        arguments.push(argument);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(arguments)
}

/// Parses a stream of tokens into the syntax tree of one compilation unit.
///
/// The root is a list of one or more function declarations, each tagged
/// [`Category::FunDecl`]. Leftover input is a syntax error.
pub fn parse(tokens: Vec<Token>) -> Result<SyntaxTree, Error> {
    let mut parser = Parser::new(tokens);
    let mut root = Node::list(vec![]);

    while let Some(mut fn_decl) = parse_fn_decl_stmt(&mut parser)? {
        parser.tags.set_category(&mut fn_decl, Category::FunDecl);
        root.push(fn_decl);
    }

    if root.is_empty() || !parser.at_eof() {
        return Err(parser.error_expected("function-decl"));
    }

    Ok(SyntaxTree {
        root,
        tags: parser.tags,
    })
}
