//! Fold computation and rendering helpers.

use smart_folding::ide::{FoldDescriptor, FoldingOptions, smart_folds};

/// Smart folds for `text` at the given right margin, default options otherwise.
pub fn folds_at(text: &str, width: usize) -> Vec<FoldDescriptor> {
    smart_folds(text, &FoldingOptions::default().with_right_margin(width))
}

/// The source text a fold covers.
pub fn covered<'a>(text: &'a str, fold: &FoldDescriptor) -> &'a str {
    &text[std::ops::Range::<usize>::from(fold.range)]
}

/// `(covered, placeholder)` pairs in result order.
pub fn pairs(text: &str, folds: &[FoldDescriptor]) -> Vec<(String, String)> {
    folds
        .iter()
        .map(|f| (covered(text, f).to_string(), f.placeholder.to_string()))
        .collect()
}

/// Folds carrying the given group label.
pub fn labelled<'a>(folds: &'a [FoldDescriptor], label: &str) -> Vec<&'a FoldDescriptor> {
    folds.iter().filter(|f| f.group.label() == label).collect()
}

/// Apply every fold to `text` the way an editor would display it.
pub fn render(text: &str, folds: &[FoldDescriptor]) -> String {
    let mut sorted: Vec<_> = folds.iter().collect();
    sorted.sort_by_key(|f| (f.range.start(), f.range.end()));

    let mut out = String::new();
    let mut cursor = 0;
    for fold in sorted {
        let start = usize::from(fold.range.start());
        let end = usize::from(fold.range.end());
        assert!(start >= cursor, "fold {:?} overlaps a previous fold", fold);
        out.push_str(&text[cursor..start]);
        out.push_str(&fold.placeholder);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Assert no two folds share a non-empty stretch of text.
pub fn assert_no_overlap(folds: &[FoldDescriptor]) {
    for (i, a) in folds.iter().enumerate() {
        for b in &folds[i + 1..] {
            let shared = a.range.intersect(b.range).is_some_and(|r| !r.is_empty());
            assert!(!shared, "folds overlap: {:?} and {:?}", a, b);
        }
    }
}
