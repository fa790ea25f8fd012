//! Shortening of fully qualified type references.
//!
//! `java.util.List<String> xs` is folded to `ju.List<String> xs`: only the
//! package prefix is covered, the simple name and type arguments stay.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::descriptor::{Candidate, FoldDescriptor, GroupAllocator};
use super::options::AbbreviationStyle;
use crate::base::{FoldingError, FoldingResult, TextRange, TextSize};
use crate::syntax::{NodeKind, SourceUnit};

/// Propose one candidate per type reference written out in full.
pub(crate) fn collect<S: SourceUnit>(
    source: &S,
    style: AbbreviationStyle,
    groups: &mut GroupAllocator,
) -> Vec<Candidate<S::Node>> {
    let references = source
        .nodes_of_kind(NodeKind::TypeElement)
        .into_iter()
        .chain(source.nodes_of_kind(NodeKind::NewExpression))
        .filter_map(|owner| source.child_of_kind(&owner, NodeKind::CodeReference));

    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    for reference in references {
        match shorten(source, &reference, style) {
            Ok(Some((range, placeholder))) => {
                if seen.insert(range) {
                    let group = groups.allocate("qualified");
                    let descriptor = FoldDescriptor::new(range, placeholder, group);
                    candidates.push(Candidate::new(reference, descriptor));
                }
            }
            Ok(None) => {}
            Err(err) => trace!("skipping qualified reference {:?}: {}", reference, err),
        }
    }
    candidates
}

/// Range and placeholder for the package prefix of `reference`, or `None`
/// when the reference is not written in fully qualified form.
fn shorten<S: SourceUnit>(
    source: &S,
    reference: &S::Node,
    style: AbbreviationStyle,
) -> FoldingResult<Option<(TextRange, String)>> {
    let Some(qualified) = source.qualified_name(reference) else {
        return Ok(None);
    };
    // Written text must spell out the canonical name; imported or partially
    // qualified references render differently.
    if !source.text(reference).starts_with(&qualified) {
        return Ok(None);
    }
    let Some(last_dot) = qualified.rfind('.') else {
        return Ok(None);
    };

    let anchor = leftmost(source, reference);
    let start = source.range(&anchor).start();
    let len = TextSize::of(&qualified[..=last_dot]);
    let range = TextRange::at(start, len);

    let outer = source.range(reference);
    if !outer.contains_range(range) {
        return Err(FoldingError::out_of_bounds(range.end(), outer.end()));
    }
    Ok(Some((range, style.abbreviate(&qualified[..last_dot]))))
}

/// Innermost reference of a qualified chain; `a.b.C` nests as `((a).b).C`.
fn leftmost<S: SourceUnit>(source: &S, reference: &S::Node) -> S::Node {
    let mut current = reference.clone();
    while let Some(qualifier) = source.child_of_kind(&current, NodeKind::CodeReference) {
        current = qualifier;
    }
    current
}
