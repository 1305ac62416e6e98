use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::types::Operator, lexer::tokens::TokenKind};

/// Precedence levels of the binary expression cascade, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl BindingPower {
    /// The next tighter binary level, `None` below multiplicative (unary).
    pub fn next(self) -> Option<BindingPower> {
        match self {
            BindingPower::Or => Some(BindingPower::And),
            BindingPower::And => Some(BindingPower::Equality),
            BindingPower::Equality => Some(BindingPower::Relational),
            BindingPower::Relational => Some(BindingPower::Additive),
            BindingPower::Additive => Some(BindingPower::Multiplicative),
            BindingPower::Multiplicative => None,
        }
    }

    /// Rule name of this level's operands, reported when one is missing.
    pub fn operand_name(self) -> &'static str {
        match self {
            BindingPower::Or => "and-expression",
            BindingPower::And => "equality-expression",
            BindingPower::Equality => "relational-expression",
            BindingPower::Relational => "additive-expression",
            BindingPower::Additive => "multiplicative-expression",
            BindingPower::Multiplicative => "unary-expression",
        }
    }
}

lazy_static! {
    static ref BINARY_LOOKUP: HashMap<TokenKind, (BindingPower, Operator)> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Or, (BindingPower::Or, Operator::Or));
        map.insert(TokenKind::And, (BindingPower::And, Operator::And));

        map.insert(TokenKind::Equals, (BindingPower::Equality, Operator::Equals));
        map.insert(TokenKind::NotEquals, (BindingPower::Equality, Operator::NotEquals));

        map.insert(TokenKind::Less, (BindingPower::Relational, Operator::Less));
        map.insert(TokenKind::LessEquals, (BindingPower::Relational, Operator::LessEquals));
        map.insert(TokenKind::Greater, (BindingPower::Relational, Operator::Greater));
        map.insert(TokenKind::GreaterEquals, (BindingPower::Relational, Operator::GreaterEquals));

        map.insert(TokenKind::Plus, (BindingPower::Additive, Operator::Plus));
        map.insert(TokenKind::Dash, (BindingPower::Additive, Operator::Minus));

        map.insert(TokenKind::Star, (BindingPower::Multiplicative, Operator::Mul));
        map.insert(TokenKind::Slash, (BindingPower::Multiplicative, Operator::Div));
        map.insert(TokenKind::Percent, (BindingPower::Multiplicative, Operator::Mod));
        map
    };
}

/// The operator `kind` denotes at precedence level `bp`, if any.
pub fn binary_operator(bp: BindingPower, kind: TokenKind) -> Option<Operator> {
    BINARY_LOOKUP
        .get(&kind)
        .filter(|(level, _)| *level == bp)
        .map(|(_, op)| *op)
}

pub fn unary_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Not => Some(Operator::Not),
        TokenKind::Plus => Some(Operator::Plus),
        TokenKind::Dash => Some(Operator::Minus),
        _ => None,
    }
}

pub fn inc_dec_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::PlusPlus => Some(Operator::Increment),
        TokenKind::MinusMinus => Some(Operator::Decrement),
        _ => None,
    }
}
