//! Width-constrained line merging tests.

use rstest::rstest;
use smart_folding::ide::FoldDescriptor;

use crate::helpers::fold_helpers::*;
use crate::helpers::source_fixtures::*;

fn newline_merges(folds: &[FoldDescriptor]) -> usize {
    labelled(folds, "newlines").len()
}

fn max_line_width(rendered: &str) -> usize {
    rendered.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

// =============================================================================
// PARAMETER LISTS
// =============================================================================

#[test]
fn test_parameter_list_that_fits_is_flattened() {
    let folds = folds_at(PARAMS_THAT_FIT, 40);
    assert_eq!(labelled(&folds, "method").len(), 3);
    assert_eq!(newline_merges(&folds), 2);
    assert_eq!(
        render(PARAMS_THAT_FIT, &folds),
        "class A {\n  void f(int a, int b, int c) {}\n}\n"
    );
}

#[test]
fn test_parameter_list_too_wide_is_left_alone() {
    let folds = folds_at(PARAMS_TOO_WIDE, 40);
    assert_eq!(newline_merges(&folds), 0);
    assert_eq!(
        pairs(PARAMS_TOO_WIDE, &folds),
        vec![
            ("final ".to_string(), String::new()),
            ("final ".to_string(), String::new()),
            ("final ".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_parameter_list_merges_all_breaks_or_none() {
    let wide = folds_at(PARAMS_TOO_WIDE, 80);
    assert_eq!(newline_merges(&wide), 2);
}

#[test]
fn test_break_colliding_with_anchor_is_absorbed() {
    let folds = folds_at(PLAIN_PARAMS, 40);
    assert_eq!(
        pairs(PLAIN_PARAMS, &folds),
        vec![
            ("(".to_string(), "(var ".to_string()),
            ("\n     ".to_string(), String::new()),
            (" ".to_string(), " var ".to_string()),
        ]
    );
    assert_eq!(
        render(PLAIN_PARAMS, &folds),
        "class A {\n  void f(var int a, var int b) {}\n}\n"
    );
}

// =============================================================================
// STATEMENTS
// =============================================================================

#[rstest]
#[case(44, 0)]
#[case(45, 1)]
fn test_statement_break_against_width(#[case] width: usize, #[case] merges: usize) {
    // 25 + 20 characters, nothing saved, no indentation on the second line
    let text = in_method("    int total = sum(aaaa,\nbbbbbbbbbbbbbbbbbb);");
    assert_eq!(newline_merges(&folds_at(&text, width)), merges);
}

#[test]
fn test_statement_break_too_wide_at_forty() {
    let text = in_method("    int total = sum(aaaa,\nbbbbbbbbbbbbbbbbbb);");
    let folds = folds_at(&text, 40);
    assert_eq!(pairs(&text, &folds), vec![("int".to_string(), "var".to_string())]);
}

#[test]
fn test_savings_on_the_line_make_room() {
    // 26 + 20 characters, `final Integer` -> `let` saves 10
    let text = in_method("    final Integer n = f(a,\nbbbbbbbbbbbbbbbbbb);");
    let folds = folds_at(&text, 40);
    assert_eq!(newline_merges(&folds), 1);
    assert!(render(&text, &folds).contains("\n    let n = f(a, bbbbbbbbbbbbbbbbbb);\n"));

    assert_eq!(newline_merges(&folds_at(&text, 36)), 1);
    assert_eq!(newline_merges(&folds_at(&text, 35)), 0);
}

#[test]
fn test_merges_compound_left_to_right() {
    // Line 2 alone would fit next to line 3, but not after absorbing line 1
    let text = in_method("    int x = foo(aaaa,\n        bbbbbbbbbb,\n        cccccccccc);");
    let folds = folds_at(&text, 40);
    let merges = labelled(&folds, "newlines");
    assert_eq!(merges.len(), 1);
    assert_eq!(covered(&text, merges[0]), "\n        ");
    assert!(render(&text, &folds).contains("    var x = foo(aaaa, bbbbbbbbbb,\n        cccccccccc);"));
}

#[rstest]
#[case(40)]
#[case(120)]
#[case(1000)]
fn test_fluent_continuations_are_never_merged(#[case] width: usize) {
    let folds = folds_at(FLUENT_CHAIN, width);
    assert_eq!(newline_merges(&folds), 0);
    assert_eq!(
        pairs(FLUENT_CHAIN, &folds),
        vec![("String".to_string(), "var".to_string())]
    );
}

#[test]
fn test_break_after_initializer_fold_counts_the_joined_line() {
    // The initializer break joins lines 1 and 2 into 29 characters of budget,
    // leaving no room for the 29 characters of line 3
    let text = in_method("    String sssss =\n        compute(aaaaa,\n            bbbbbbbbbbbbbbb);");
    let folds = folds_at(&text, 40);
    assert_eq!(newline_merges(&folds), 0);

    let rendered = render(&text, &folds);
    assert!(rendered.contains("    var sssss = compute(aaaaa,\n            bbbbbbbbbbbbbbb);"));
    assert!(max_line_width(&rendered) <= 40);
}

#[test]
fn test_crlf_initializer_break_drops_carriage_return() {
    let text = "class A {\r\n  void f() {\r\n    final String s =\r\n        \"x\";\r\n  }\r\n}\r\n";
    let folds = folds_at(text, 120);
    let breaks: Vec<_> = labelled(&folds, "final")
        .into_iter()
        .map(|f| covered(text, f))
        .collect();
    assert_eq!(breaks, vec!["final String", "\r\n        "]);

    let rendered = render(text, &folds);
    assert!(rendered.contains("\r\n    let s = \"x\";\r\n"));
    assert!(!rendered.contains("=\r"));
}

#[test]
fn test_statement_without_candidates_is_not_merged() {
    let text = in_method("    run(a,\n        b);");
    assert!(folds_at(&text, 120).is_empty());
}

// =============================================================================
// WHOLE FILE PROPERTIES
// =============================================================================

#[rstest]
#[case(20)]
#[case(40)]
#[case(80)]
#[case(120)]
fn test_folds_never_overlap(#[case] width: usize) {
    for text in [PARAMS_THAT_FIT, PARAMS_TOO_WIDE, PLAIN_PARAMS, FLUENT_CHAIN, MIXED] {
        let folds = folds_at(text, width);
        assert_no_overlap(&folds);
        assert!(folds.windows(2).all(|w| w[0].range.start() <= w[1].range.start()));
    }
}

#[rstest]
#[case::initializer_break(in_method("    String sssss =\n        compute(aaaaa,\n            bbbbbbbbbbbbbbb);"), 40)]
#[case::compounding(in_method("    int x = foo(aaaa,\n        bbbbbbbbbb,\n        cccccccccc);"), 40)]
#[case::savings(in_method("    final Integer n = f(a,\n        bbbbbbbbbbbbbbbbbb);"), 40)]
#[case::foreach_body(in_method("    for (String value : items) {\n      use(value);\n    }"), 38)]
#[case::foreach_body_joined(in_method("    for (String value : items) {\n      use(value);\n    }"), 50)]
#[case::nested_foreach(
    in_method("    for (String row : rows) {\n      for (String cell : row.cells()) {\n        use(cell);\n      }\n    }"),
    40
)]
#[case::mixed(MIXED.to_string(), 120)]
fn test_merged_statements_fit(#[case] text: String, #[case] width: usize) {
    let folds = folds_at(&text, width);
    assert_no_overlap(&folds);
    assert!(max_line_width(&render(&text, &folds)) <= width);
}

#[rstest]
#[case(PARAMS_THAT_FIT)]
#[case(PLAIN_PARAMS)]
fn test_merged_parameter_lists_fit(#[case] text: &str) {
    let folds = folds_at(text, 40);
    assert!(newline_merges(&folds) > 0);
    assert!(max_line_width(&render(text, &folds)) <= 40);
}

#[test]
fn test_mixed_file() {
    let folds = folds_at(MIXED, 120);
    let rendered = render(MIXED, &folds);

    assert_eq!(labelled(&folds, "qualified").len(), 3);
    assert!(rendered.contains("private final ju.Map<String, List<String>> index = new ju.HashMap<>();"));
    assert!(rendered.contains("  void register(String key, var List<String> values) {"));
    assert!(rendered.contains("    let copy = new ju.ArrayList<>(values);"));
    assert!(rendered.contains("\n          .add(value);"));
    assert!(rendered.contains("    String missing = null;"));
    assert!(rendered.contains("  abstract void pending(int x);"));
}
