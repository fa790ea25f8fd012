//! Fold descriptors and the conventions shared by every generator.

use smol_str::SmolStr;

use crate::base::{TextBuffer, TextRange};

/// Tag linking descriptors that expand and collapse together.
///
/// Ids are only unique within one folding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupId {
    index: u32,
    label: &'static str,
}

impl GroupId {
    pub fn index(self) -> u32 {
        self.index
    }

    /// What produced the group (`"qualified"`, `"final"`, `"method"`,
    /// `"newlines"`).
    pub fn label(self) -> &'static str {
        self.label
    }
}

/// Hands out [`GroupId`]s for a single request.
#[derive(Debug, Default)]
pub struct GroupAllocator {
    next: u32,
}

impl GroupAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, label: &'static str) -> GroupId {
        let id = GroupId {
            index: self.next,
            label,
        };
        self.next += 1;
        id
    }
}

/// A range to display collapsed, and what to show instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FoldDescriptor {
    pub range: TextRange,
    /// Shown in place of the covered text; may be empty.
    pub placeholder: SmolStr,
    pub group: GroupId,
}

impl FoldDescriptor {
    pub fn new(range: TextRange, placeholder: impl Into<SmolStr>, group: GroupId) -> Self {
        Self {
            range,
            placeholder: placeholder.into(),
            group,
        }
    }

    /// Characters saved on screen when this fold is collapsed. Negative when
    /// the placeholder is longer than the text it replaces.
    pub fn saving(&self, buffer: &impl TextBuffer) -> isize {
        let covered = buffer
            .slice(self.range)
            .map_or(0, |text| text.chars().count());
        covered as isize - self.placeholder.chars().count() as isize
    }
}

/// A descriptor together with the node it was produced for.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<N> {
    pub descriptor: FoldDescriptor,
    pub node: N,
}

impl<N> Candidate<N> {
    pub fn new(node: N, descriptor: FoldDescriptor) -> Self {
        Self { descriptor, node }
    }

    pub fn range(&self) -> TextRange {
        self.descriptor.range
    }
}

/// Engine-wide settings the renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FoldingConventions {
    /// Shown for a fold that does not carry its own placeholder
    pub placeholder_text: &'static str,
    /// Whether these folds start collapsed when a file is opened
    pub collapsed_by_default: bool,
}

impl FoldingConventions {
    pub const SMART: Self = Self {
        placeholder_text: "...",
        collapsed_by_default: true,
    };
}

impl Default for FoldingConventions {
    fn default() -> Self {
        Self::SMART
    }
}
