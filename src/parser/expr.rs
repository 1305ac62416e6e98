use crate::{
    ast::{
        node::{Node, NodeValue},
        tags::TagStore,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{binary_operator, unary_operator, BindingPower},
    parser::{ParseResult, Parser},
};

pub fn parse_expr(parser: &mut Parser) -> ParseResult {
    parse_binary_expr(parser, BindingPower::Or)
}

/// Parses an expression that must be present.
pub fn expect_expr(parser: &mut Parser) -> Result<Node, Error> {
    let expr = parse_expr(parser)?;
    parser.require(expr, "expression")
}

fn parse_operand(parser: &mut Parser, bp: BindingPower) -> ParseResult {
    match bp.next() {
        Some(next) => parse_binary_expr(parser, next),
        None => parse_prefix_expr(parser),
    }
}

/// One operand followed by any number of `operator operand` pairs, folded to
/// the left as `[lhs, op, rhs]`. A lone operand is returned unwrapped.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult {
    let Some(mut left) = parse_operand(parser, bp)? else {
        return Ok(None);
    };

    while let Some(operator) = binary_operator(bp, parser.current_token_kind()) {
        parser.advance();
        let right = parse_operand(parser, bp)?;
        let right = parser.require(right, bp.operand_name())?;

        left.uproot();
        left.push(Node::new(NodeValue::Operator(operator)));
        left.push(right);

        let position = parser.tags.position(&left.children()[0]);
        parser.tags.set_position(&mut left, position);
    }

    Ok(Some(left))
}

/// Optional `!`, `+` or `-` before a primary, shaped `[op, primary]`.
pub fn parse_prefix_expr(parser: &mut Parser) -> ParseResult {
    let Some(operator) = unary_operator(parser.current_token_kind()) else {
        return parse_primary_expr(parser);
    };

    parser.advance();
    let operand = parse_primary_expr(parser)?;
    let operand = parser.require(operand, "primary-expression")?;

    let mut prefix = Node::list(vec![Node::new(NodeValue::Operator(operator))]);
    parser.tags.copy_position(&operand, &mut prefix);
    prefix.push(operand);

    Ok(Some(prefix))
}

/// Function call, parenthesised expression, literal or variable reference.
///
/// Literals and variables are wrapped in a one-element list; a call is
/// `[id, [args...]]`. All of them carry the line where the primary starts.
pub fn parse_primary_expr(parser: &mut Parser) -> ParseResult {
    let mut slot = parser.positioned_slot();

    match parser.current_token_kind() {
        TokenKind::Identifier if parser.peek_kind(1) == TokenKind::OpenParen => {
            let mut call = parse_call_expr(parser)?;
            TagStore::copy_tag(&slot, &mut call);
            Ok(Some(call))
        }
        TokenKind::OpenParen => {
            parser.advance();
            let mut expr = expect_expr(parser)?;
            parser.expect(TokenKind::CloseParen, "')'")?;
            TagStore::copy_tag(&slot, &mut expr);
            Ok(Some(expr))
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            slot.push(Node::symbol(&token.value));
            Ok(Some(slot))
        }
        TokenKind::Integer
        | TokenKind::Double
        | TokenKind::True
        | TokenKind::False
        | TokenKind::String => {
            slot.push(parse_literal(parser)?);
            Ok(Some(slot))
        }
        _ => Ok(None),
    }
}

fn parse_literal(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance();
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start,
        )
    };

    let value = match token.kind {
        TokenKind::Integer => NodeValue::Int(token.value.parse().map_err(|_| number_error())?),
        TokenKind::Double => NodeValue::Double(token.value.parse().map_err(|_| number_error())?),
        TokenKind::True => NodeValue::Bool(true),
        TokenKind::False => NodeValue::Bool(false),
        _ => NodeValue::String(token.value.clone()),
    };

    Ok(Node::new(value))
}

/// `id '(' (expr % ',')? ')'`, shaped `[id, [args...]]`.
fn parse_call_expr(parser: &mut Parser) -> Result<Node, Error> {
    let callee = Node::symbol(&parser.advance().value);
    parser.expect(TokenKind::OpenParen, "'('")?;

    let mut arguments = Node::list(vec![]);
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(expect_expr(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen, "')'")?;

    Ok(Node::list(vec![callee, arguments]))
}
