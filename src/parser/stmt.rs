use crate::{
    ast::{
        node::{Node, NodeValue},
        tags::{Category, TagStore},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{expect_expr, parse_expr},
    lookups::inc_dec_operator,
    parser::{expect_identifier, parse_type, ParseResult, Parser},
};

pub type StmtHandler = fn(&mut Parser) -> ParseResult;

/// Statement alternatives in the order they are tried.
const STMT_ALTERNATIVES: [(StmtHandler, Category); 8] = [
    (parse_block_stmt, Category::Block),
    (parse_if_stmt, Category::If),
    (parse_for_stmt, Category::For),
    (parse_while_stmt, Category::While),
    (parse_return_stmt, Category::Return),
    (parse_assignment_stmt, Category::Assignment),
    (parse_var_decl_stmt, Category::Declaration),
    (parse_expression_stmt, Category::Expression),
];

/// Ordered choice over the statement alternatives.
///
/// The line is recorded before any alternative runs; the winning node then
/// takes over that tag together with its category.
pub fn parse_stmt(parser: &mut Parser) -> ParseResult {
    let mut slot = parser.positioned_slot();

    for (handler, category) in STMT_ALTERNATIVES {
        if let Some(mut stmt) = handler(parser)? {
            parser.tags.set_category(&mut slot, category);
            TagStore::copy_tag(&slot, &mut stmt);
            return Ok(Some(stmt));
        }
    }

    Ok(None)
}

fn expect_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let stmt = parse_stmt(parser)?;
    parser.require(stmt, "instruction")
}

/// `'{' stmt* '}'`, shaped as the list of its statements.
pub fn parse_block_stmt(parser: &mut Parser) -> ParseResult {
    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Ok(None);
    }
    parser.advance();

    let mut block = Node::list(vec![]);
    while let Some(stmt) = parse_stmt(parser)? {
        block.push(stmt);
    }

    parser.expect(TokenKind::CloseCurly, "'}'")?;
    Ok(Some(block))
}

/// `[if, cond, then]` or `[if, cond, then, else, otherwise]`.
pub fn parse_if_stmt(parser: &mut Parser) -> ParseResult {
    if parser.current_token_kind() != TokenKind::If {
        return Ok(None);
    }
    parser.advance();

    parser.expect(TokenKind::OpenParen, "'('")?;
    let condition = expect_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    let then_body = expect_stmt(parser)?;

    let mut if_stmt = Node::list(vec![Node::symbol("if"), condition, then_body]);

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if_stmt.push(Node::symbol("else"));
        if_stmt.push(expect_stmt(parser)?);
    }

    Ok(Some(if_stmt))
}

/// `[for, init, cond, step, body]`; init and step are assignments.
pub fn parse_for_stmt(parser: &mut Parser) -> ParseResult {
    if parser.current_token_kind() != TokenKind::For {
        return Ok(None);
    }
    parser.advance();

    parser.expect(TokenKind::OpenParen, "'('")?;
    let init = parse_assignment(parser)?;
    let init = parser.require(init, "assignment")?;
    parser.expect(TokenKind::Semicolon, "';'")?;
    let condition = expect_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "';'")?;
    let step = parse_assignment(parser)?;
    let step = parser.require(step, "assignment")?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    let body = expect_stmt(parser)?;

    Ok(Some(Node::list(vec![
        Node::symbol("for"),
        init,
        condition,
        step,
        body,
    ])))
}

/// `[while, cond, body]`.
pub fn parse_while_stmt(parser: &mut Parser) -> ParseResult {
    if parser.current_token_kind() != TokenKind::While {
        return Ok(None);
    }
    parser.advance();

    parser.expect(TokenKind::OpenParen, "'('")?;
    let condition = expect_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    let body = expect_stmt(parser)?;

    Ok(Some(Node::list(vec![Node::symbol("while"), condition, body])))
}

/// `[return]` or `[return, expr]`.
pub fn parse_return_stmt(parser: &mut Parser) -> ParseResult {
    if parser.current_token_kind() != TokenKind::Return {
        return Ok(None);
    }
    parser.advance();

    let value = parse_expr(parser)?.unwrap_or_else(Node::invalid);
    parser.expect(TokenKind::Semicolon, "';'")?;

    let mut return_stmt = Node::list(vec![Node::symbol("return"), value]);
    return_stmt.drop_invalid();
    Ok(Some(return_stmt))
}

/// An assignment followed by `;`.
pub fn parse_assignment_stmt(parser: &mut Parser) -> ParseResult {
    let Some(assignment) = parse_assignment(parser)? else {
        return Ok(None);
    };

    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Some(assignment))
}

/// `[id, =, expr]` or `[id, ++|--]`.
///
/// Backtracks when the identifier is not followed by `=`, `++` or `--`,
/// leaving the input to the declaration and expression alternatives.
pub fn parse_assignment(parser: &mut Parser) -> ParseResult {
    if parser.current_token_kind() != TokenKind::Identifier {
        return Ok(None);
    }

    let checkpoint = parser.checkpoint();
    let mut assignment = parser.positioned_slot();
    assignment.push(expect_identifier(parser)?);

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        assignment.push(Node::symbol("="));
        assignment.push(expect_expr(parser)?);
    } else if let Some(operator) = inc_dec_operator(parser.current_token_kind()) {
        parser.advance();
        assignment.push(Node::new(NodeValue::Operator(operator)));
    } else {
        parser.restore(checkpoint);
        return Ok(None);
    }

    Ok(Some(assignment))
}

/// `type item (, item)* ;`, shaped `[type, item...]` where each item is
/// `[id]` or `[id, =, expr]`.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> ParseResult {
    let Some(ty) = parse_type(parser)? else {
        return Ok(None);
    };

    let mut declaration = Node::list(vec![ty]);

    loop {
        let mut item = parser.positioned_slot();
        item.push(expect_identifier(parser)?);

        if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            item.push(Node::symbol("="));
            item.push(expect_expr(parser)?);
        }
        declaration.push(item);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Some(declaration))
}

/// An expression followed by `;`.
pub fn parse_expression_stmt(parser: &mut Parser) -> ParseResult {
    let Some(expr) = parse_expr(parser)? else {
        return Ok(None);
    };

    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Some(expr))
}
