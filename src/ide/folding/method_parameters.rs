//! Parameter modifier collapsing.
//!
//! In `void run(final int a, String b)` the `final ` is hidden and `b` gains
//! a `var ` marker, so every parameter reads the same way as local
//! variables do.

use tracing::trace;

use super::descriptor::{Candidate, FoldDescriptor, GroupAllocator, GroupId};
use super::options::FoldingOptions;
use crate::base::{FoldingError, FoldingResult, TextBuffer, TextRange, TextSize};
use crate::syntax::{Modifier, NodeKind, SourceUnit};

pub(crate) fn collect<S: SourceUnit>(
    source: &S,
    buffer: &impl TextBuffer,
    options: &FoldingOptions,
    groups: &mut GroupAllocator,
) -> Vec<Candidate<S::Node>> {
    let mut candidates = Vec::new();
    for list in source.nodes_of_kind(NodeKind::ParameterList) {
        // Lambda parameter lists never have a method parent
        let Some(method) = source.parent(&list) else {
            continue;
        };
        if source.kind(&method) != NodeKind::Method
            || source.has_modifier(&method, Modifier::Abstract)
        {
            continue;
        }
        let parameters = source.parameters(&list);
        if parameters.is_empty() {
            continue;
        }

        let group = groups.allocate("method");
        for parameter in parameters {
            match collapse(source, buffer, options, &parameter, group) {
                Ok(found) => candidates.extend(found),
                Err(err) => trace!("skipping parameter {:?}: {}", parameter, err),
            }
        }
    }
    candidates
}

fn collapse<S: SourceUnit>(
    source: &S,
    buffer: &impl TextBuffer,
    options: &FoldingOptions,
    parameter: &S::Node,
    group: GroupId,
) -> FoldingResult<Vec<Candidate<S::Node>>> {
    let Some(modifiers) = source.modifier_list(parameter) else {
        return Ok(Vec::new());
    };
    let len = TextSize::of(buffer.text());

    let finals: Vec<_> = source
        .modifier_tokens(&modifiers)
        .into_iter()
        .filter(|(modifier, _)| *modifier == Modifier::Final)
        .collect();
    if !finals.is_empty() {
        // Hide the keyword together with the space after it
        return finals
            .into_iter()
            .map(|(_, keyword)| {
                let range = TextRange::new(keyword.start(), keyword.end() + TextSize::of(' '));
                if range.end() > len {
                    return Err(FoldingError::out_of_bounds(range.end(), len));
                }
                Ok(Candidate::new(
                    parameter.clone(),
                    FoldDescriptor::new(range, "", group),
                ))
            })
            .collect();
    }

    // An empty range would not render, so the marker borrows the character
    // just before the modifier list
    let start = source.range(&modifiers).start();
    let anchor_char = buffer
        .text()
        .get(..usize::from(start))
        .and_then(|before| before.chars().next_back())
        .ok_or(FoldingError::out_of_bounds(start, len))?;
    let anchor = TextRange::new(start - TextSize::of(anchor_char), start);
    let placeholder = format!("{anchor_char}{} ", options.mutable_marker);
    Ok(vec![Candidate::new(
        parameter.clone(),
        FoldDescriptor::new(anchor, placeholder, group),
    )])
}
