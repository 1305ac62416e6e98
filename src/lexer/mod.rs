//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts Javalette source
//! code into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered regex pattern table
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position (offset and line) tracking for error reporting
//! - Whitespace and `//`, `#`, `/* */` comment skipping

pub mod lexer;
pub mod tokens;
