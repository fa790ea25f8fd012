//! Inferred-type markers for local variables.
//!
//! `final String name = "x";` renders as `let name = "x";` and
//! `for (Object o : list)` as `for (var o : list)`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::descriptor::{Candidate, FoldDescriptor, GroupAllocator, GroupId};
use super::options::FoldingOptions;
use crate::base::{FoldingError, FoldingResult, TextBuffer, TextSize, non_empty_range};
use crate::syntax::{Modifier, NodeKind, SourceUnit};

/// Java whitespace around at most one `=`, and nothing else.
static BARE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\n\x0B\x0C\r]*=?[ \t\n\x0B\x0C\r]*$").expect("valid assignment regex")
});

pub(crate) fn collect<S: SourceUnit>(
    source: &S,
    buffer: &impl TextBuffer,
    options: &FoldingOptions,
    groups: &mut GroupAllocator,
) -> Vec<Candidate<S::Node>> {
    let declared = source
        .nodes_of_kind(NodeKind::DeclarationStatement)
        .into_iter()
        .filter_map(|decl| source.declared_variables(&decl).into_iter().next())
        .filter(|variable| source.kind(variable) == NodeKind::LocalVariable)
        .filter(|variable| {
            // Nothing can be inferred from a bare `null`
            source
                .initializer(variable)
                .is_some_and(|init| !source.is_null_literal(&init))
        });
    let iterated = source
        .nodes_of_kind(NodeKind::ForeachStatement)
        .into_iter()
        .filter_map(|foreach| source.iteration_parameter(&foreach));

    let mut candidates = Vec::new();
    for variable in declared.chain(iterated) {
        let group = groups.allocate("final");
        match type_marker(source, buffer, options, &variable, group) {
            Ok(candidate) => candidates.push(candidate),
            Err(err) => {
                trace!("skipping inferred type for {:?}: {}", variable, err);
                continue;
            }
        }
        if !options.collapse_initializer_breaks {
            continue;
        }
        match initializer_break(source, buffer, &variable, group) {
            Ok(Some(candidate)) => candidates.push(candidate),
            Ok(None) => {}
            Err(err) => trace!("skipping initializer break for {:?}: {}", variable, err),
        }
    }
    candidates
}

/// Fold everything from the start of the declaration up to the name into
/// the inference marker.
fn type_marker<S: SourceUnit>(
    source: &S,
    buffer: &impl TextBuffer,
    options: &FoldingOptions,
    variable: &S::Node,
    group: GroupId,
) -> FoldingResult<Candidate<S::Node>> {
    let name = source
        .name_identifier(variable)
        .ok_or(FoldingError::missing("name identifier", "variable"))?;
    let start = source.range(variable).start();
    let marker = options.marker(source.has_modifier(variable, Modifier::Final));

    let before_name = buffer
        .text()
        .get(..usize::from(name.start()))
        .ok_or(FoldingError::out_of_bounds(
            name.start(),
            TextSize::of(buffer.text()),
        ))?
        .chars()
        .next_back();

    // Keep the separator before the name visible, or supply one
    let (end, placeholder) = match before_name {
        Some(c) if c.is_whitespace() => (name.start() - TextSize::of(c), marker.to_string()),
        _ => (name.start(), format!("{marker} ")),
    };
    let range = non_empty_range(start, end)?;
    Ok(Candidate::new(
        variable.clone(),
        FoldDescriptor::new(range, placeholder, group),
    ))
}

/// Fold the line break between a variable's name line and an initializer
/// that starts on a later line, when only whitespace and `=` sit between.
fn initializer_break<S: SourceUnit>(
    source: &S,
    buffer: &impl TextBuffer,
    variable: &S::Node,
    group: GroupId,
) -> FoldingResult<Option<Candidate<S::Node>>> {
    let Some(initializer) = source.initializer(variable) else {
        return Ok(None);
    };
    let name = source
        .name_identifier(variable)
        .ok_or(FoldingError::missing("name identifier", "variable"))?;
    let init_start = source.range(&initializer).start();

    let name_line = buffer.line_of(name.start());
    if name_line == buffer.line_of(init_start) {
        return Ok(None);
    }

    let run = non_empty_range(buffer.line_end(name_line), init_start)?;
    let text = buffer.slice(run).ok_or(FoldingError::out_of_bounds(
        run.end(),
        TextSize::of(buffer.text()),
    ))?;
    if !BARE_ASSIGNMENT.is_match(text) {
        return Ok(None);
    }

    let placeholder = if text.contains('=') { " = " } else { " " };
    Ok(Some(Candidate::new(
        variable.clone(),
        FoldDescriptor::new(run, placeholder, group),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Document;
    use crate::syntax::JavaSource;

    fn folds(body: &str, options: &FoldingOptions) -> Vec<(String, String, &'static str)> {
        let text = format!("class A {{\n  void f() {{\n{body}\n  }}\n}}\n");
        let source = JavaSource::parse(&text);
        let doc = Document::new(text.as_str());
        let mut groups = GroupAllocator::new();
        collect(&source, &doc, options, &mut groups)
            .into_iter()
            .map(|c| {
                let covered = doc.slice(c.range()).unwrap().to_string();
                (
                    covered,
                    c.descriptor.placeholder.to_string(),
                    c.descriptor.group.label(),
                )
            })
            .collect()
    }

    fn pairs(body: &str) -> Vec<(String, String)> {
        folds(body, &FoldingOptions::default())
            .into_iter()
            .map(|(covered, placeholder, _)| (covered, placeholder))
            .collect()
    }

    fn pair(covered: &str, placeholder: &str) -> (String, String) {
        (covered.to_string(), placeholder.to_string())
    }

    #[test]
    fn test_final_variable_uses_let() {
        assert_eq!(
            pairs("    final String name = \"x\";"),
            vec![pair("final String", "let")]
        );
    }

    #[test]
    fn test_mutable_variable_uses_var() {
        assert_eq!(pairs("    int count = 0;"), vec![pair("int", "var")]);
    }

    #[test]
    fn test_null_and_missing_initializers_are_skipped() {
        assert!(pairs("    String s = null;\n    String t;").is_empty());
    }

    #[test]
    fn test_only_first_declarator_is_annotated() {
        assert_eq!(pairs("    int a = 1, b = 2;"), vec![pair("int", "var")]);
    }

    #[test]
    fn test_foreach_variable() {
        assert_eq!(
            pairs("    for (Object o : list) {}\n    for (final String s : names) {}"),
            vec![pair("Object", "var"), pair("final String", "let")]
        );
    }

    #[test]
    fn test_name_glued_to_type_gets_a_separator() {
        assert_eq!(
            pairs("    java.util.List<String>xs = make();"),
            vec![pair("java.util.List<String>", "var ")]
        );
    }

    #[test]
    fn test_initializer_on_next_line() {
        let result = folds(
            "    String s =\n        compute();\n    String t\n        = other();",
            &FoldingOptions::default(),
        );
        assert_eq!(result.len(), 4);
        assert_eq!(result[0], ("String".into(), "var".into(), "final"));
        assert_eq!(result[1], ("\n        ".into(), " ".into(), "final"));
        assert_eq!(result[3], ("\n        = ".into(), " = ".into(), "final"));
    }

    #[test]
    fn test_initializer_break_needs_bare_separator() {
        assert_eq!(
            pairs("    String s\n        = /* seed */ compute();"),
            vec![pair("String", "var")]
        );
    }

    #[test]
    fn test_bare_assignment_is_java_whitespace_only() {
        assert!(BARE_ASSIGNMENT.is_match(" =\n        "));
        assert!(BARE_ASSIGNMENT.is_match("\r\n\t"));
        assert!(!BARE_ASSIGNMENT.is_match(" =\u{a0}\n  "));
        assert!(!BARE_ASSIGNMENT.is_match(" = =\n"));
    }

    #[test]
    fn test_crlf_break_hides_carriage_return() {
        let text = "class A {\r\n  void f() {\r\n    final String s =\r\n        \"x\";\r\n  }\r\n}\r\n";
        let source = JavaSource::parse(text);
        let doc = Document::new(text);
        let mut groups = GroupAllocator::new();
        let candidates = collect(&source, &doc, &FoldingOptions::default(), &mut groups);
        assert_eq!(candidates.len(), 2);
        assert_eq!(doc.slice(candidates[1].range()), Some("\r\n        "));
    }

    #[test]
    fn test_initializer_breaks_can_be_disabled() {
        let options = FoldingOptions::default().with_initializer_breaks(false);
        let result = folds("    String s =\n        compute();", &options);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_type_marker_and_break_share_a_group() {
        let text = "class A {\n  void f() {\n    String s =\n        compute();\n  }\n}\n";
        let source = JavaSource::parse(text);
        let doc = Document::new(text);
        let mut groups = GroupAllocator::new();
        let candidates = collect(&source, &doc, &FoldingOptions::default(), &mut groups);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].descriptor.group, candidates[1].descriptor.group);
    }
}
