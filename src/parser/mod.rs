//! Parser module building the generic syntax tree.
//!
//! This module contains the grammar engine that transforms a stream of
//! tokens into a uniformly shaped [`Node`](crate::ast::node::Node) tree.
//! It is a recursive-descent parser with:
//!
//! - Ordered choice between statement alternatives, backtracking only
//!   before a rule has committed to a keyword or disambiguating token
//! - A precedence cascade for expressions (or, and, equality, relational,
//!   additive, multiplicative, unary, primary)
//! - Category and source position tagging of every statement and primary
//!   expression through the tag store
//!
//! Every rule returns `Result<Option<Node>, Error>`: `Ok(None)` means the
//! rule did not match and a sibling alternative may be tried, `Err` is a
//! fatal syntax error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
