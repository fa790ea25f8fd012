//! Java parser tests through the public API.

use rstest::rstest;
use smart_folding::TextSize;
use smart_folding::parser::{
    AstNode, ClassDecl, ForeachStatement, Method, SourceFile, SyntaxKind, Variable, parse_java,
    tokenize,
};

fn parse_ok(text: &str) -> SourceFile {
    let parse = parse_java(text);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
    SourceFile::cast(parse.syntax()).unwrap()
}

// =============================================================================
// LEXER
// =============================================================================

#[test]
fn test_tokenize_covers_input() {
    let text = "final int x = 1; // done\n/* block */";
    let tokens = tokenize(text);
    let joined: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(joined, text);
    assert_eq!(tokens[0].kind, SyntaxKind::FINAL_KW);
    assert!(tokens.iter().any(|t| t.kind == SyntaxKind::LINE_COMMENT));
    assert!(tokens.iter().any(|t| t.kind == SyntaxKind::BLOCK_COMMENT));
}

#[test]
fn test_tokenize_keeps_angle_brackets_apart() {
    let kinds: Vec<_> = tokenize("List<List<String>>")
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k == SyntaxKind::GT)
        .collect();
    assert_eq!(kinds.len(), 2);
}

// =============================================================================
// PARSING
// =============================================================================

#[rstest]
#[case("package a.b;\nimport java.util.List;\nclass A {}\n")]
#[case("class A<T extends Comparable<T>> {\n  private static final int N = 1 << 4;\n}\n")]
#[case("class A {\n  A(int x) { this.x = x; }\n  int x;\n}\n")]
#[case("class A {\n  void f() {\n    for (int i = 0; i < n; i++) { sum += i; }\n  }\n}\n")]
#[case("class A {\n  void f() {\n    try { go(); } catch (final IOException e) { log(e); }\n  }\n}\n")]
#[case("class A {\n  int f(int x) {\n    return x > 0 ? x : -x;\n  }\n}\n")]
#[case("class A {\n  void f() {\n    Runnable r = () -> { run(); };\n    list.forEach(System.out::println);\n  }\n}\n")]
#[case("class A {\n  void f(Object o) {\n    if (o instanceof String) { String s = (String) o; }\n  }\n}\n")]
#[case("enum Color { RED, GREEN; }\n")]
#[case("@Deprecated\npublic interface I {\n  default void f() {}\n}\n")]
fn test_parses_without_errors(#[case] text: &str) {
    let root = parse_ok(text);
    assert_eq!(root.syntax().text().to_string(), text);
}

#[test]
fn test_garbage_is_kept_in_tree() {
    let text = "class A {\n  ) ) ;\n  void f() {}\n}\n";
    let parse = parse_java(text);
    assert!(!parse.ok());
    assert_eq!(parse.syntax().text().to_string(), text);
    let root = SourceFile::cast(parse.syntax()).unwrap();
    assert!(root.descendants::<Method>().any(|m| m.name().unwrap().text() == "f"));
}

#[test]
fn test_error_ranges_are_inside_the_input() {
    let text = "class A { void f( }";
    let parse = parse_java(text);
    assert!(!parse.errors.is_empty());
    let len = TextSize::of(text);
    assert!(parse.errors.iter().all(|e| e.range.end() <= len));
}

// =============================================================================
// AST
// =============================================================================

#[test]
fn test_classes_and_methods() {
    let root = parse_ok("class A {\n  void f() {}\n}\ninterface B {\n  void g();\n}\n");
    let classes: Vec<ClassDecl> = root.classes().collect();
    assert_eq!(classes.len(), 2);
    assert!(classes[1].is_interface());

    let methods: Vec<Method> = root.descendants().collect();
    assert!(!methods[0].is_abstract());
    assert!(methods[1].is_abstract());
    assert_eq!(methods[1].enclosing_class().unwrap().name().unwrap().text(), "B");
}

#[test]
fn test_local_variables_and_foreach() {
    let root = parse_ok(
        "class A {\n  void f() {\n    final int a = 1, b;\n    for (String s : names) {}\n  }\n}\n",
    );
    let variables: Vec<Variable> = root.descendants().collect();
    assert_eq!(variables.len(), 2);
    assert!(variables[0].modifier_list().unwrap().is_final());
    assert!(variables[0].initializer().is_some());
    assert!(variables[1].initializer().is_none());

    let foreach: ForeachStatement = root.descendants().next().unwrap();
    assert_eq!(foreach.parameter().unwrap().name().unwrap().text(), "s");
    assert_eq!(foreach.iterated().unwrap().text().to_string(), "names");
}
