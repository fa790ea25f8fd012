//! Line addressing over source text.
//!
//! Offsets are byte offsets ([`TextSize`]) into the UTF-8 source. Lines are
//! 0-indexed and a line's end offset points at its terminator (`\n` or
//! `\r\n`), so the terminator itself is never part of a line's text.

use std::sync::Arc;

use text_size::{TextRange, TextSize};

/// Pre-computed line start positions for offset ↔ line conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<TextSize>,
    /// Lines terminated by `\r\n` rather than a bare `\n`
    crlf: Vec<bool>,
    /// Total length of the indexed text.
    len: TextSize,
}

impl LineIndex {
    /// Build a line index by scanning the text for newline characters.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        let mut crlf = Vec::new();
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
                crlf.push(i > 0 && bytes[i - 1] == b'\r');
            }
        }
        Self {
            line_starts,
            crlf,
            len: TextSize::of(text),
        }
    }

    /// Number of lines, counting a trailing empty line after a final `\n`.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: TextSize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Offset of the first character of `line`, clamped to the text length.
    pub fn line_start(&self, line: usize) -> TextSize {
        self.line_starts.get(line).copied().unwrap_or(self.len)
    }

    /// Offset just past the last character of `line`, before its terminator.
    pub fn line_end(&self, line: usize) -> TextSize {
        match self.line_starts.get(line + 1) {
            Some(&next) => {
                let terminator = if self.crlf[line] { 2 } else { 1 };
                next - TextSize::new(terminator)
            }
            None => self.len,
        }
    }
}

/// Read-only view of the text being folded.
///
/// This is all the folding engine needs from a text buffer; hosts with their
/// own rope or document type implement it directly.
pub trait TextBuffer {
    /// The complete text.
    fn text(&self) -> &str;

    /// Number of lines in the text.
    fn line_count(&self) -> usize;

    /// The 0-indexed line containing `offset`.
    fn line_of(&self, offset: TextSize) -> usize;

    /// Offset of the first character of `line`.
    fn line_start(&self, line: usize) -> TextSize;

    /// Offset of the end of `line`, excluding its terminator.
    fn line_end(&self, line: usize) -> TextSize;

    /// The text covered by `range`, or `None` when it is out of bounds or
    /// does not fall on character boundaries.
    fn slice(&self, range: TextRange) -> Option<&str> {
        self.text().get(std::ops::Range::<usize>::from(range))
    }
}

/// An immutable text snapshot with its line index.
#[derive(Debug, Clone)]
pub struct Document {
    text: Arc<str>,
    index: LineIndex,
}

impl Document {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let index = LineIndex::new(&text);
        Self { text, index }
    }

    /// The line index backing this document.
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }
}

impl TextBuffer for Document {
    fn text(&self) -> &str {
        &self.text
    }

    fn line_count(&self) -> usize {
        self.index.line_count()
    }

    fn line_of(&self, offset: TextSize) -> usize {
        self.index.line_of(offset)
    }

    fn line_start(&self, line: usize) -> TextSize {
        self.index.line_start(line)
    }

    fn line_end(&self, line: usize) -> TextSize {
        self.index.line_end(line)
    }
}
