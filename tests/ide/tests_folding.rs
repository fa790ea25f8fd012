//! Generator-level folding tests through the public entry point.

use rstest::rstest;
use smart_folding::ide::{AbbreviationStyle, FoldingOptions, SmartFoldingBuilder, smart_folds};
use smart_folding::syntax::JavaSource;
use smart_folding::Document;

use crate::helpers::fold_helpers::*;
use crate::helpers::source_fixtures::in_method;

fn pair(covered: &str, placeholder: &str) -> (String, String) {
    (covered.to_string(), placeholder.to_string())
}

// =============================================================================
// INFERRED TYPES
// =============================================================================

#[test]
fn test_final_local_becomes_let() {
    let text = in_method("    final String name = \"x\";");
    let folds = folds_at(&text, 40);
    assert_eq!(pairs(&text, &folds), vec![pair("final String", "let")]);
    assert!(render(&text, &folds).contains("    let name = \"x\";"));
}

#[test]
fn test_foreach_variable_becomes_var() {
    let text = in_method("    for (Object o : list) {}");
    let folds = folds_at(&text, 40);
    assert_eq!(pairs(&text, &folds), vec![pair("Object", "var")]);
    assert!(render(&text, &folds).contains("for (var o : list) {}"));
}

#[test]
fn test_null_initializer_gets_no_fold() {
    let text = in_method("    String s = null;\n    final Object o = null;");
    assert!(folds_at(&text, 40).is_empty());
}

#[test]
fn test_declaration_without_initializer_gets_no_fold() {
    let text = in_method("    String s;");
    assert!(folds_at(&text, 40).is_empty());
}

#[test]
fn test_initializer_on_next_line_is_pulled_up() {
    let text = in_method("    String s =\n        compute();");
    let folds = folds_at(&text, 40);
    assert_eq!(
        pairs(&text, &folds),
        vec![pair("String", "var"), pair("\n        ", " ")]
    );
    assert!(render(&text, &folds).contains("    var s = compute();"));
}

#[rstest]
#[case("let", "var", "    let a = 1;\n    var b = 2;")]
#[case("val", "var", "    val a = 1;\n    var b = 2;")]
#[case("const", "auto", "    const a = 1;\n    auto b = 2;")]
fn test_custom_markers(#[case] final_marker: &str, #[case] mutable_marker: &str, #[case] expected: &str) {
    let text = in_method("    final int a = 1;\n    int b = 2;");
    let options = FoldingOptions::default().with_markers(final_marker, mutable_marker);
    let folds = smart_folds(&text, &options);
    assert!(render(&text, &folds).contains(expected));
}

// =============================================================================
// QUALIFIED NAMES
// =============================================================================

#[rstest]
#[case(AbbreviationStyle::Initials, "class A { juc.Future<?> f; }")]
#[case(AbbreviationStyle::Segmented, "class A { j.u.c.Future<?> f; }")]
fn test_abbreviation_style(#[case] style: AbbreviationStyle, #[case] expected: &str) {
    let text = "class A { java.util.concurrent.Future<?> f; }";
    let folds = smart_folds(text, &FoldingOptions::default().with_abbreviation(style));
    assert_eq!(render(text, &folds), expected);
}

#[test]
fn test_imported_reference_is_not_shortened() {
    let text = "import java.util.List;\nimport java.util.Map;\nclass A {\n  List<String> xs;\n  Map.Entry<String, String> e;\n  java.util.List<String> ys;\n}\n";
    let folds = folds_at(text, 40);
    assert_eq!(pairs(text, &folds), vec![pair("java.util.", "ju.")]);
}

#[test]
fn test_new_expression_is_shortened() {
    let text = "class A {\n  Object o = new java.util.ArrayList<String>();\n}\n";
    let folds = folds_at(text, 40);
    assert_eq!(
        render(text, &folds),
        "class A {\n  Object o = new ju.ArrayList<String>();\n}\n"
    );
}

#[test]
fn test_qualified_type_inside_inferred_type_is_dropped() {
    let text = in_method("    final java.util.List<String> xs = make();");
    let folds = folds_at(&text, 40);
    assert_eq!(pairs(&text, &folds), vec![pair("final java.util.List<String>", "let")]);
}

// =============================================================================
// PARAMETER MODIFIERS
// =============================================================================

#[test]
fn test_parameter_modifiers() {
    let text = "class A {\n  void run(final int a, String b) {}\n}\n";
    let folds = folds_at(text, 40);
    assert_eq!(
        pairs(text, &folds),
        vec![pair("final ", ""), pair(" ", " var ")]
    );
    assert!(render(text, &folds).contains("void run(int a, var String b) {}"));
    assert_eq!(folds[0].group, folds[1].group);
}

#[rstest]
#[case("abstract class A {\n  abstract void run(int a);\n}\n")]
#[case("interface I {\n  void run(int a);\n}\n")]
#[case("class A {\n  void run() {}\n}\n")]
#[case("class A {\n  void run() {\n    go((a, b) -> a);\n  }\n}\n")]
fn test_parameter_lists_without_folds(#[case] text: &str) {
    assert!(folds_at(text, 40).is_empty());
}

// =============================================================================
// BUILDER
// =============================================================================

#[test]
fn test_builder_matches_entry_point() {
    let text = in_method("    final java.util.Map<String, String> m =\n        new java.util.HashMap<>();");
    let builder = SmartFoldingBuilder::default();
    let folds = builder.build_fold_regions(&JavaSource::parse(&text), &Document::new(text.as_str()));
    assert_eq!(folds, smart_folds(&text, &FoldingOptions::default()));
}

#[test]
fn test_unterminated_file_still_folds() {
    let text = "class A {\n  void f() {\n    final String s = \"x\";\n";
    let folds = folds_at(text, 40);
    assert!(pairs(text, &folds).contains(&pair("final String", "let")));
}
