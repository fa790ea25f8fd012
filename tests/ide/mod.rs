//! IDE feature tests
//!
//! Tests for:
//! - Qualified name shortening, inferred types, parameter modifiers
//! - Width-constrained line merging
//! - Whole-file folding properties

pub mod tests_folding;
pub mod tests_line_merging;
