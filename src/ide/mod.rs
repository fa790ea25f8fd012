//! IDE features: editor-facing APIs over the parsed source.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No editor types**: Uses our own types, converted at the host boundary
//! 3. **Snapshot based**: Every call works on one immutable text snapshot
//!
//! ## Usage
//!
//! ```
//! use smart_folding::ide::{FoldingOptions, smart_folds};
//!
//! let text = "class A {\n  java.util.List<String> xs;\n}\n";
//! let folds = smart_folds(text, &FoldingOptions::default());
//! assert_eq!(folds[0].placeholder.as_str(), "ju.");
//! ```

pub mod folding;

pub use folding::{
    AbbreviationStyle, CodeStyleSettings, FoldDescriptor, FoldingConventions, FoldingOptions,
    GroupAllocator, GroupId, SmartFoldingBuilder,
};

use crate::base::Document;
use crate::syntax::JavaSource;

/// Parse `text` as Java and compute its smart folds.
pub fn smart_folds(text: &str, options: &FoldingOptions) -> Vec<FoldDescriptor> {
    let source = JavaSource::parse(text);
    let document = Document::new(text);
    SmartFoldingBuilder::new(options.clone()).build_fold_regions(&source, &document)
}
