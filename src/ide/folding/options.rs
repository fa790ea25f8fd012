//! Folding options

use smol_str::SmolStr;

/// Source of the maximum preferred line width.
///
/// Hosts usually resolve this from the code style of the file's language.
pub trait CodeStyleSettings {
    fn right_margin(&self) -> usize;
}

impl CodeStyleSettings for usize {
    fn right_margin(&self) -> usize {
        *self
    }
}

/// How the package prefix of a qualified name is abbreviated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbbreviationStyle {
    /// `java.util.List` → `ju.List`
    #[default]
    Initials,
    /// `java.util.List` → `j.u.List`
    Segmented,
}

impl AbbreviationStyle {
    /// Abbreviate a dotted package path (`java.util`), including the
    /// separator that precedes the simple name.
    pub fn abbreviate(self, package: &str) -> String {
        let initials = package.split('.').filter_map(|segment| segment.chars().next());
        match self {
            Self::Initials => {
                let mut out: String = initials.collect();
                out.push('.');
                out
            }
            Self::Segmented => initials.map(|c| format!("{c}.")).collect(),
        }
    }
}

/// Options for smart folding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldingOptions {
    /// Maximum line width merged lines must fit in
    pub right_margin: usize,
    pub abbreviation: AbbreviationStyle,
    /// Also fold the line break between a declaration and its initializer
    pub collapse_initializer_breaks: bool,
    /// Marker replacing the type of a `final` variable
    pub final_marker: SmolStr,
    /// Marker replacing the type of any other variable or parameter
    pub mutable_marker: SmolStr,
}

impl Default for FoldingOptions {
    fn default() -> Self {
        Self {
            right_margin: 120,
            abbreviation: AbbreviationStyle::default(),
            collapse_initializer_breaks: true,
            final_marker: SmolStr::new_static("let"),
            mutable_marker: SmolStr::new_static("var"),
        }
    }
}

impl FoldingOptions {
    pub fn with_right_margin(mut self, right_margin: usize) -> Self {
        self.right_margin = right_margin;
        self
    }

    pub fn with_abbreviation(mut self, abbreviation: AbbreviationStyle) -> Self {
        self.abbreviation = abbreviation;
        self
    }

    pub fn with_initializer_breaks(mut self, enabled: bool) -> Self {
        self.collapse_initializer_breaks = enabled;
        self
    }

    pub fn with_markers(mut self, final_marker: &str, mutable_marker: &str) -> Self {
        self.final_marker = SmolStr::new(final_marker);
        self.mutable_marker = SmolStr::new(mutable_marker);
        self
    }

    /// Marker for a variable, depending on whether it is `final`.
    pub fn marker(&self, is_final: bool) -> &SmolStr {
        if is_final {
            &self.final_marker
        } else {
            &self.mutable_marker
        }
    }
}

impl CodeStyleSettings for FoldingOptions {
    fn right_margin(&self) -> usize {
        self.right_margin
    }
}
