//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the front end:
//!
//! - Error structures with source position information
//! - Syntax error variants raised while tokenizing and parsing
//! - Semantic error variants raised by the type checker, each carrying the
//!   line and rendering of the offending tree node
//! - Helpful error messages and suggestions

pub mod errors;
