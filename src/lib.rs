//! # smart-folding
//!
//! Width-aware smart code folding for Java sources.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Smart folding builder and its generators
//!   ↓
//! syntax    → SourceUnit view over the tree, import resolution
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (TextRange, LineIndex, TextBuffer, errors)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → ide)
// ============================================================================

/// Foundation types: TextRange, LineIndex, TextBuffer
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, AST wrappers
pub mod parser;

/// Syntax: the read-only tree view the folding engine consumes
pub mod syntax;

/// IDE features: smart folding
pub mod ide;

// Re-export foundation types
pub use base::{Document, LineIndex, TextBuffer, TextRange, TextSize};

// Re-export the folding entry points
pub use ide::{FoldDescriptor, FoldingOptions, GroupId, SmartFoldingBuilder, smart_folds};
