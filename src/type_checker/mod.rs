//! Type checking and semantic analysis module.
//!
//! This module walks the generic syntax tree once and transforms it into the
//! typed AST while:
//!
//! - Resolving variable and function references through a scoped symbol table
//! - Checking expression, assignment, argument and return types exactly
//!   (there is no implicit conversion between `int` and `double`)
//! - Registering the functions of a block before its statements are checked,
//!   so siblings may call each other regardless of order
//!
//! The first violation aborts the pass with a semantic error carrying the
//! offending node's line and rendering.

pub mod symbols;
pub mod type_checker;
pub mod typed_ast;
