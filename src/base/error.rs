//! Error types for fold construction.
//!
//! Folding is best-effort: these errors never escape the engine. Generators
//! use them to bail out of a single candidate, log the reason and move on.

use text_size::{TextRange, TextSize};
use thiserror::Error;

/// Reasons a single fold candidate could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldingError {
    /// A node the candidate depends on is absent from the tree.
    #[error("missing {kind} in {context}")]
    MissingNode {
        kind: &'static str,
        context: &'static str,
    },

    /// An offset falls outside the text buffer.
    #[error("offset {offset:?} out of bounds (text length {len:?})")]
    OffsetOutOfBounds { offset: TextSize, len: TextSize },

    /// A range that must cover text would be empty or inverted.
    #[error("empty range {start:?}..{end:?}")]
    EmptyRange { start: TextSize, end: TextSize },
}

impl FoldingError {
    /// Create a missing node error.
    pub fn missing(kind: &'static str, context: &'static str) -> Self {
        Self::MissingNode { kind, context }
    }

    /// Create an out-of-bounds error for `offset` in a text of length `len`.
    pub fn out_of_bounds(offset: TextSize, len: TextSize) -> Self {
        Self::OffsetOutOfBounds { offset, len }
    }
}

/// Result alias used while building candidates.
pub type FoldingResult<T> = Result<T, FoldingError>;

/// `start..end`, or [`FoldingError::EmptyRange`] unless `start < end`.
pub fn non_empty_range(start: TextSize, end: TextSize) -> FoldingResult<TextRange> {
    if start < end {
        Ok(TextRange::new(start, end))
    } else {
        Err(FoldingError::EmptyRange { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FoldingError::missing("name identifier", "local variable");
        assert_eq!(err.to_string(), "missing name identifier in local variable");

        let err = FoldingError::EmptyRange {
            start: TextSize::new(4),
            end: TextSize::new(4),
        };
        assert_eq!(err.to_string(), "empty range 4..4");
    }

    #[test]
    fn test_non_empty_range() {
        let (a, b) = (TextSize::new(2), TextSize::new(5));
        assert_eq!(non_empty_range(a, b), Ok(TextRange::new(a, b)));
        assert_eq!(
            non_empty_range(b, a),
            Err(FoldingError::EmptyRange { start: b, end: a })
        );
        assert!(non_empty_range(a, a).is_err());
    }
}
