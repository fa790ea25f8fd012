//! Common Java sources for folding tests.

/// Wrap statements in a class and method body.
pub fn in_method(body: &str) -> String {
    format!("class A {{\n  void f() {{\n{body}\n  }}\n}}\n")
}

pub const PARAMS_THAT_FIT: &str = "class A {
  void f(final int a,
      final int b,
      final int c) {}
}
";

pub const PARAMS_TOO_WIDE: &str = "class A {
  void f(final String alpha,
      final String beta,
      final String gamma) {}
}
";

pub const PLAIN_PARAMS: &str = "class A {
  void f(int a,
      int b) {}
}
";

pub const FLUENT_CHAIN: &str = "class A {
  void f() {
    String s = list.stream()
        .map(f)
        .collect(c);
  }
}
";

pub const MIXED: &str = "import java.util.List;

abstract class Service {
  private final java.util.Map<String, List<String>> index = new java.util.HashMap<>();

  void register(final String key,
      List<String> values) {
    final java.util.List<String> copy =
        new java.util.ArrayList<>(values);
    for (String value : copy) {
      index.get(key)
          .add(value);
    }
    String missing = null;
  }

  abstract void pending(int x);
}
";
