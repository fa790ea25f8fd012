//! Parser tests
//!
//! Tests for:
//! - Lexing
//! - Lossless Java parsing and error recovery
//! - Typed AST accessors

pub mod tests_java;
