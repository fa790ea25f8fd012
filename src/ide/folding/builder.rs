//! Entry point running the generators and the merger.

use tracing::debug;

use super::descriptor::{FoldDescriptor, FoldingConventions, GroupAllocator};
use super::options::{CodeStyleSettings, FoldingOptions};
use super::{collapse_lines, inferred_variables, method_parameters, qualified_names};
use crate::base::TextBuffer;
use crate::syntax::SourceUnit;

/// Computes smart folds for one file snapshot.
///
/// Holds configuration only; every call starts from scratch.
///
/// ```
/// use smart_folding::base::Document;
/// use smart_folding::ide::{FoldingOptions, SmartFoldingBuilder};
/// use smart_folding::syntax::JavaSource;
///
/// let text = "class A {\n  void f() {\n    final String s = \"x\";\n  }\n}\n";
/// let builder = SmartFoldingBuilder::new(FoldingOptions::default());
/// let folds = builder.build_fold_regions(&JavaSource::parse(text), &Document::new(text));
/// assert_eq!(folds[0].placeholder.as_str(), "let");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SmartFoldingBuilder {
    options: FoldingOptions,
}

impl SmartFoldingBuilder {
    pub fn new(options: FoldingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FoldingOptions {
        &self.options
    }

    /// Placeholder and initial state the renderer applies to these folds.
    pub fn conventions(&self) -> FoldingConventions {
        FoldingConventions::SMART
    }

    /// Folds for `source`, merged against the configured right margin.
    pub fn build_fold_regions<S: SourceUnit>(
        &self,
        source: &S,
        buffer: &impl TextBuffer,
    ) -> Vec<FoldDescriptor> {
        self.build_fold_regions_with(source, buffer, &self.options)
    }

    /// Like [`build_fold_regions`](Self::build_fold_regions), with the
    /// right margin taken from the host's code style.
    ///
    /// The host's width replaces [`FoldingOptions::right_margin`]; the
    /// remaining options still apply.
    pub fn build_fold_regions_with<S: SourceUnit>(
        &self,
        source: &S,
        buffer: &impl TextBuffer,
        settings: &impl CodeStyleSettings,
    ) -> Vec<FoldDescriptor> {
        let mut groups = GroupAllocator::new();

        let mut candidates =
            qualified_names::collect(source, self.options.abbreviation, &mut groups);
        let qualified = candidates.len();
        candidates.extend(inferred_variables::collect(
            source,
            buffer,
            &self.options,
            &mut groups,
        ));
        let inferred = candidates.len() - qualified;
        candidates.extend(method_parameters::collect(
            source,
            buffer,
            &self.options,
            &mut groups,
        ));
        let parameters = candidates.len() - qualified - inferred;
        debug!(
            "fold candidates: {} qualified, {} inferred, {} parameters",
            qualified, inferred, parameters
        );

        let folds = collapse_lines::merge(source, buffer, settings, candidates, &mut groups);
        debug!("{} folds after merging lines", folds.len());
        folds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Document;
    use crate::syntax::JavaSource;

    #[test]
    fn test_conventions() {
        let conventions = SmartFoldingBuilder::default().conventions();
        assert_eq!(conventions.placeholder_text, "...");
        assert!(conventions.collapsed_by_default);
    }

    #[test]
    fn test_all_generators_contribute() {
        let text = "class A {\n  void f(final java.util.List<String> xs) {\n    final String s = \"x\";\n  }\n}\n";
        let builder = SmartFoldingBuilder::default();
        let folds = builder.build_fold_regions(&JavaSource::parse(text), &Document::new(text));
        let labels: Vec<_> = folds.iter().map(|f| f.group.label()).collect();
        assert_eq!(labels, vec!["method", "qualified", "final"]);
    }

    #[test]
    fn test_host_margin_overrides_options() {
        let text = "class A {\n  void f() {\n    String s =\n        compute();\n  }\n}\n";
        let source = JavaSource::parse(text);
        let doc = Document::new(text);
        let builder =
            SmartFoldingBuilder::new(FoldingOptions::default().with_initializer_breaks(false));

        let wide = builder.build_fold_regions(&source, &doc);
        assert!(wide.iter().any(|f| f.group.label() == "newlines"));

        let narrow = builder.build_fold_regions_with(&source, &doc, &5usize);
        assert!(narrow.iter().all(|f| f.group.label() != "newlines"));
    }
}
