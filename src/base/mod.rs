//! Foundation types for the folding engine.
//!
//! This module provides:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Offset ↔ line conversion
//! - [`TextBuffer`], [`Document`] - Read-only text access used by the engine
//! - [`FoldingError`] - Why a single fold candidate was not produced
//!
//! This module has NO dependencies on other smart-folding modules.

mod error;
mod span;

pub use error::{FoldingError, FoldingResult, non_empty_range};
pub use span::{Document, LineIndex, TextBuffer};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
