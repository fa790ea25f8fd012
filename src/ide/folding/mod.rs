//! Smart folding: collapse Java noise without hiding meaning.
//!
//! Three generators propose folds from the tree:
//!
//! - [`qualified_names`] shortens `java.util.List` to `ju.List`
//! - [`inferred_variables`] replaces local variable types with `let`/`var`
//! - [`method_parameters`] hides `final ` on parameters and marks the rest `var `
//!
//! [`collapse_lines`] then joins line breaks inside the statements and
//! parameter lists those folds live in, as long as the joined line fits the
//! right margin. [`SmartFoldingBuilder`] runs the whole pipeline.
//!
//! Folds that belong together share a [`GroupId`] so the host expands and
//! collapses them as one.

mod builder;
mod collapse_lines;
mod descriptor;
mod inferred_variables;
mod method_parameters;
mod options;
mod qualified_names;

pub use builder::SmartFoldingBuilder;
pub use descriptor::{FoldDescriptor, FoldingConventions, GroupAllocator, GroupId};
pub use options::{AbbreviationStyle, CodeStyleSettings, FoldingOptions};
