//! Splice confirmed-duplicate definitions out of a source tree.
//!
//! Removal is line-based against the original bytes: the definition's lines
//! (decorators and attached comments included), plus the blank run directly
//! above it, are dropped; everything else is emitted untouched. The one
//! deliberate formatting repair is collapsing a 3+ blank-line run at a
//! deletion junction down to 2.

use crate::error::PruneError;
use crate::extract::{Definition, line_of};
use crate::source::{SourceTree, is_blank};
use std::collections::HashMap;
use std::ops::Range;

/// Remove every definition in `deletions` from `tree`, returning a new tree.
///
/// Fails with [`PruneError::StaleReference`] if any definition was extracted
/// from a different revision or its span no longer resolves to a def node.
/// Containers are never removed: a class whose every member is deleted keeps
/// its header and gets a `pass` placeholder so the output stays valid Python.
pub fn remove(tree: &SourceTree, deletions: &[Definition]) -> Result<SourceTree, PruneError> {
    let text = tree.text();
    let lines = tree.line_spans();
    let mut removed = vec![false; lines.len()];
    // class-body block id -> its statement spans, for the emptied-body check
    let mut touched_blocks: HashMap<usize, BlockRef> = HashMap::new();

    for def in deletions {
        if def.revision != tree.revision() {
            return Err(PruneError::StaleReference {
                name: def.name.clone(),
            });
        }
        let node = resolve(tree.root(), &def.span).ok_or_else(|| PruneError::StaleReference {
            name: def.name.clone(),
        })?;

        if let Some(block) = class_body_of(node) {
            touched_blocks
                .entry(block.id())
                .or_insert_with(|| BlockRef::new(block));
        }

        mark_definition(text, &lines, def, &mut removed);
    }

    collapse_junction_blanks(text, &lines, &mut removed);

    let placeholders = placeholder_lines(text, &lines, &removed, &touched_blocks);

    let mut out = String::with_capacity(text.len());
    for (i, span) in lines.iter().enumerate() {
        if let Some(placeholder) = placeholders.get(&i) {
            out.push_str(placeholder);
        }
        if !removed[i] {
            out.push_str(&text[span.clone()]);
        }
    }

    tracing::debug!(
        file = tree.label(),
        definitions = deletions.len(),
        lines = removed.iter().filter(|r| **r).count(),
        "removed definitions"
    );

    SourceTree::parse_revision(tree.label().to_string(), out, tree.revision() + 1).map_err(|e| {
        match e {
            PruneError::Parse { file, line, column } => PruneError::Reparse { file, line, column },
            other => other,
        }
    })
}

/// Mark the definition's display lines plus the blank run directly above.
fn mark_definition(
    text: &str,
    lines: &[Range<usize>],
    def: &Definition,
    removed: &mut [bool],
) {
    let (Some(first), Some(last)) = (
        line_of(lines, def.display_span.start),
        line_of(lines, def.span.end.saturating_sub(1)),
    ) else {
        return;
    };
    for flag in &mut removed[first..=last] {
        *flag = true;
    }
    let mut j = first;
    while j > 0 && is_blank(text, &lines[j - 1]) {
        removed[j - 1] = true;
        j -= 1;
    }
}

/// At each junction left by a removed run, cap the surviving blank run at 2.
fn collapse_junction_blanks(text: &str, lines: &[Range<usize>], removed: &mut [bool]) {
    let mut i = 0;
    while i < lines.len() {
        if !removed[i] {
            i += 1;
            continue;
        }
        // End of this removed run.
        let mut end = i;
        while end < lines.len() && removed[end] {
            end += 1;
        }
        // Surviving blank run right after the junction.
        let mut kept = 0;
        let mut j = end;
        while j < lines.len() && !removed[j] && is_blank(text, &lines[j]) {
            kept += 1;
            if kept > 2 {
                removed[j] = true;
            }
            j += 1;
        }
        i = j.max(end);
    }
}

/// A class body whose members were (partly) deleted.
struct BlockRef {
    statements: Vec<Range<usize>>,
}

impl BlockRef {
    fn new(block: tree_sitter::Node<'_>) -> Self {
        let mut cursor = block.walk();
        let statements = block
            .named_children(&mut cursor)
            .map(|c| c.byte_range())
            .collect();
        Self { statements }
    }
}

/// For each class body left with no statements, a `pass` line to emit at the
/// position of its first (removed) statement, matching that statement's
/// indentation. Keeps the container header valid when every member is gone.
fn placeholder_lines(
    text: &str,
    lines: &[Range<usize>],
    removed: &[bool],
    blocks: &HashMap<usize, BlockRef>,
) -> HashMap<usize, String> {
    let mut placeholders = HashMap::new();
    for block in blocks.values() {
        let emptied = block.statements.iter().all(|span| {
            let (Some(a), Some(b)) = (
                line_of(lines, span.start),
                line_of(lines, span.end.saturating_sub(1)),
            ) else {
                return false;
            };
            removed[a..=b].iter().all(|r| *r)
        });
        if !emptied {
            continue;
        }
        let Some(first_stmt) = block.statements.first() else {
            continue;
        };
        let Some(line_idx) = line_of(lines, first_stmt.start) else {
            continue;
        };
        let line = &text[lines[line_idx].clone()];
        let indent: String = line
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        let terminator = if line.ends_with("\r\n") { "\r\n" } else { "\n" };
        placeholders.insert(line_idx, format!("{indent}pass{terminator}"));
    }
    placeholders
}

/// Find the def node whose byte range is exactly `span`.
fn resolve<'t>(
    root: tree_sitter::Node<'t>,
    span: &Range<usize>,
) -> Option<tree_sitter::Node<'t>> {
    if span.is_empty() || span.end > root.end_byte() {
        return None;
    }
    let mut node = root.descendant_for_byte_range(span.start, span.end - 1)?;
    loop {
        if node.byte_range() == *span
            && matches!(node.kind(), "function_definition" | "decorated_definition")
        {
            return Some(node);
        }
        node = node.parent()?;
    }
}

/// The class body block containing `node`, if its direct parent is one.
fn class_body_of<'t>(node: tree_sitter::Node<'t>) -> Option<tree_sitter::Node<'t>> {
    let parent = node.parent()?;
    if parent.kind() != "block" {
        return None;
    }
    let grandparent = parent.parent()?;
    if grandparent.kind() == "class_definition" {
        Some(parent)
    } else {
        None
    }
}
