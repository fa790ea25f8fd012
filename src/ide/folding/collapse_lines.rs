//! Width-constrained line merging.
//!
//! Candidates from the generators are grouped by their mergeable unit, the
//! nearest enclosing statement or parameter list. Inside each unit, line
//! breaks (a newline run, see [`newline_runs`]) are folded into a single
//! space when the merged line still fits the right margin:
//!
//! - a **parameter list** is merged all-or-nothing: either its flattened text
//!   fits, and every break goes, or nothing changes;
//! - a **statement** is merged break by break, left to right, tracking the
//!   working length of each line in a [`LineBudget`] so that accepted merges
//!   compound.
//!
//! A merge never overlaps another fold. When a run collides with an existing
//! candidate it is absorbed: its last character is given back and it hides
//! with an empty placeholder. If that still collides, the run is dropped.
//! A break another fold already hides is not merged again; the statement
//! budget treats its two lines as joined.

use std::fmt::Debug;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use super::descriptor::{Candidate, FoldDescriptor, GroupAllocator, GroupId};
use super::options::CodeStyleSettings;
use crate::base::{TextBuffer, TextRange, TextSize};
use crate::syntax::{NodeKind, SourceUnit};

/// Whitespace runs containing at least one line break. The class is Java's
/// `\s`, so a `\r` before the `\n` belongs to the run.
static NEW_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[ \t\x0B\x0C\r]*\n[ \t\x0B\x0C\r]*)+").expect("valid newline-run regex")
});

/// Maximal newline runs of `text`, as absolute ranges given that `text`
/// starts at `base`.
pub(crate) fn newline_runs(text: &str, base: TextSize) -> Vec<TextRange> {
    NEW_LINES
        .find_iter(text)
        .map(|m| {
            TextRange::new(
                base + TextSize::new(m.start() as u32),
                base + TextSize::new(m.end() as u32),
            )
        })
        .collect()
}

/// Whether `descriptor` hides a line break, as the initializer-break fold
/// does. Such a fold joins two lines rather than shortening one.
fn folds_line_break(descriptor: &FoldDescriptor, buffer: &impl TextBuffer) -> bool {
    buffer
        .slice(descriptor.range)
        .is_some_and(|text| text.contains('\n'))
}

/// Run the merger over all generator output.
///
/// Returns the input descriptors, minus those nested inside a larger one,
/// together with the accepted line merges, sorted by `(start, end)`.
pub(crate) fn merge<S: SourceUnit>(
    source: &S,
    buffer: &impl TextBuffer,
    settings: &impl CodeStyleSettings,
    candidates: Vec<Candidate<S::Node>>,
    groups: &mut GroupAllocator,
) -> Vec<FoldDescriptor> {
    let candidates = drop_shadowed(candidates);
    let max_width = settings.right_margin() as isize;
    let mut occupied: Vec<TextRange> = candidates.iter().map(|c| c.range()).collect();

    let mut units: IndexMap<S::Node, Vec<FoldDescriptor>, FxBuildHasher> = IndexMap::default();
    let mut result = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match mergeable_unit(source, &candidate.node) {
            Some(unit) => units
                .entry(unit)
                .or_default()
                .push(candidate.descriptor.clone()),
            None => trace!("no mergeable unit for {:?}, passing through", candidate.node),
        }
        result.push(candidate.descriptor);
    }

    for (unit, members) in &units {
        let merges = UnitMerger {
            buffer,
            max_width,
            group: groups.allocate("newlines"),
            occupied: &mut occupied,
        }
        .run(source, unit, members);
        result.extend(merges);
    }

    result.sort_by_key(|d| (d.range.start(), d.range.end()));
    result
}

/// Drop candidates lying inside another candidate's range. The outer fold
/// hides them when collapsed, and counting both would save the same
/// characters twice. Of two equal ranges the first one stays.
fn drop_shadowed<N: Debug>(candidates: Vec<Candidate<N>>) -> Vec<Candidate<N>> {
    let ranges: Vec<TextRange> = candidates.iter().map(|c| c.range()).collect();
    candidates
        .into_iter()
        .enumerate()
        .filter(|(i, candidate)| {
            let range = candidate.range();
            let shadowed = !range.is_empty()
                && ranges.iter().enumerate().any(|(j, other)| {
                    j != *i
                        && other.contains_range(range)
                        && (other.len() > range.len() || j < *i)
                });
            if shadowed {
                trace!("dropping {:?}: nested in another fold", candidate.node);
            }
            !shadowed
        })
        .map(|(_, candidate)| candidate)
        .collect()
}

/// The node itself or its nearest ancestor that is a statement or a
/// parameter list.
fn mergeable_unit<S: SourceUnit>(source: &S, node: &S::Node) -> Option<S::Node> {
    let is_unit = |n: &S::Node| {
        let kind = source.kind(n);
        kind == NodeKind::ParameterList || kind.is_statement()
    };
    if is_unit(node) {
        return Some(node.clone());
    }
    source.ancestors(node.clone()).find(|n| is_unit(n))
}

fn overlaps(range: TextRange, occupied: &[TextRange]) -> bool {
    occupied
        .iter()
        .any(|other| other.intersect(range).is_some_and(|i| !i.is_empty()))
}

/// Per-unit merge state.
struct UnitMerger<'a, B> {
    buffer: &'a B,
    max_width: isize,
    group: GroupId,
    /// Ranges of every fold decided so far, across all units
    occupied: &'a mut Vec<TextRange>,
}

impl<B: TextBuffer> UnitMerger<'_, B> {
    fn run<S: SourceUnit>(
        mut self,
        source: &S,
        unit: &S::Node,
        members: &[FoldDescriptor],
    ) -> Vec<FoldDescriptor> {
        let buffer = self.buffer;
        let range = source.range(unit);
        let first_line = buffer.line_of(range.start());
        let last_line = buffer.line_of(range.end());
        if first_line == last_line {
            return Vec::new();
        }

        let span = TextRange::new(buffer.line_start(first_line), buffer.line_end(last_line));
        let Some(text) = buffer.slice(span) else {
            trace!("unit {:?} spans outside the buffer", unit);
            return Vec::new();
        };
        let runs = newline_runs(text, span.start());

        let kind = source.kind(unit);
        let merges = if kind == NodeKind::ParameterList {
            self.merge_all_or_nothing(text, &runs, members)
        } else {
            let budget = LineBudget::new(text, first_line, members, buffer);
            self.merge_line_by_line(budget, &runs)
        };
        debug!(
            "{:?} unit on lines {}..={}: {} candidates, {} of {} breaks merged",
            kind,
            first_line,
            last_line,
            members.len(),
            merges.len(),
            runs.len()
        );
        merges
    }

    /// Parameter lists fold every break, or none when the flattened list
    /// would not fit.
    fn merge_all_or_nothing(
        &mut self,
        text: &str,
        runs: &[TextRange],
        members: &[FoldDescriptor],
    ) -> Vec<FoldDescriptor> {
        let saved: isize = members
            .iter()
            .filter(|d| !folds_line_break(d, self.buffer))
            .map(|d| d.saving(self.buffer))
            .sum();
        let collapsed: isize = runs.iter().map(|run| run_chars(*run) - 1).sum();
        let flattened = text.chars().count() as isize - collapsed;
        if flattened - saved > self.max_width {
            trace!(
                "flattened parameter list is {} wide after saving {}",
                flattened,
                saved
            );
            return Vec::new();
        }
        let open: Vec<TextRange> = runs
            .iter()
            .copied()
            .filter(|run| !self.is_folded(*run))
            .collect();
        open.into_iter().filter_map(|run| self.place(run)).collect()
    }

    /// Statements fold breaks one at a time while the joined lines fit.
    fn merge_line_by_line(
        &mut self,
        mut budget: LineBudget<'_>,
        runs: &[TextRange],
    ) -> Vec<FoldDescriptor> {
        let mut merges = Vec::new();
        for &run in runs {
            let (Some(upper), Some(lower)) = (
                budget.index(self.buffer.line_of(run.start())),
                budget.index(self.buffer.line_of(run.end())),
            ) else {
                continue;
            };
            let merged = budget.merged_length(upper, lower);
            if self.is_folded(run) {
                // The lines are joined on screen already
                budget.commit(lower, merged);
                continue;
            }
            if budget.is_fluent_continuation(lower) {
                trace!("keeping break before fluent call at {:?}", run.end());
                continue;
            }
            if merged > self.max_width {
                trace!("break at {:?} would make a {} wide line", run.start(), merged);
                continue;
            }
            if let Some(merge) = self.place(run) {
                merges.push(merge);
                budget.commit(lower, merged);
            }
        }
        merges
    }

    /// Whether every line break in `run` is already hidden by another fold.
    fn is_folded(&self, run: TextRange) -> bool {
        let Some(text) = self.buffer.slice(run) else {
            return false;
        };
        text.match_indices('\n').all(|(i, _)| {
            let at = run.start() + TextSize::new(i as u32);
            self.occupied.iter().any(|range| range.contains(at))
        })
    }

    /// Emit a merge for `run`, absorbing it into a neighbouring fold when
    /// they collide.
    fn place(&mut self, run: TextRange) -> Option<FoldDescriptor> {
        let (range, placeholder) = if !overlaps(run, self.occupied.as_slice()) {
            (run, " ")
        } else {
            let shrunk = TextRange::new(run.start(), run.end() - TextSize::of(' '));
            if shrunk.is_empty() || overlaps(shrunk, self.occupied.as_slice()) {
                trace!("dropping break at {:?}: collides with an existing fold", run);
                return None;
            }
            (shrunk, "")
        };
        self.occupied.push(range);
        Some(FoldDescriptor::new(range, placeholder, self.group))
    }
}

/// Width of a newline run; runs are ASCII whitespace only.
fn run_chars(run: TextRange) -> isize {
    u32::from(run.len()) as isize
}

/// Working line widths of one statement, indexed relative to its first line.
struct LineBudget<'a> {
    first_line: usize,
    lines: Vec<&'a str>,
    /// Raw width of each line, or its merged width once a break into it
    /// was accepted
    lengths: Vec<isize>,
    /// Leading plus trailing whitespace of each line
    blanks: Vec<isize>,
    /// Width already saved by candidates starting on each line, not
    /// counting folds that hide a line break
    saved: Vec<isize>,
}

impl<'a> LineBudget<'a> {
    fn new(
        text: &'a str,
        first_line: usize,
        members: &[FoldDescriptor],
        buffer: &impl TextBuffer,
    ) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let lengths: Vec<isize> = lines.iter().map(|l| l.chars().count() as isize).collect();
        let blanks = lines
            .iter()
            .zip(&lengths)
            .map(|(line, len)| len - line.trim().chars().count() as isize)
            .collect();

        let mut budget = Self {
            first_line,
            saved: vec![0; lines.len()],
            lines,
            lengths,
            blanks,
        };
        // Folds hiding a break are accounted for when the break is reached
        for descriptor in members.iter().filter(|d| !folds_line_break(d, buffer)) {
            let line = buffer.line_of(descriptor.range.start());
            if let Some(i) = budget.index(line) {
                budget.saved[i] += descriptor.saving(buffer);
            }
        }
        budget
    }

    fn index(&self, line: usize) -> Option<usize> {
        line.checked_sub(self.first_line)
            .filter(|&i| i < self.lines.len())
    }

    /// A line that continues a call chain (`.map(..)`) stays on its own.
    fn is_fluent_continuation(&self, line: usize) -> bool {
        self.lines[line].trim_start().starts_with('.')
    }

    /// Width of `upper` and `lower` joined, after the folds already on them
    /// and without the whitespace around `lower`.
    fn merged_length(&self, upper: usize, lower: usize) -> isize {
        let total = self.lengths[upper] + self.lengths[lower];
        let by_folding = self.saved[upper] + self.saved[lower];
        total - by_folding - self.blanks[lower]
    }

    /// Record that `lower` now carries the merged line.
    fn commit(&mut self, lower: usize, merged: isize) {
        self.lengths[lower] = merged;
        self.blanks[lower] = 0;
        self.saved[lower] = 0;
    }
}
