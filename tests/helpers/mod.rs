//! Shared helpers for folding tests.

pub mod fold_helpers;
pub mod source_fixtures;
