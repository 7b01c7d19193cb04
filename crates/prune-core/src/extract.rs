//! Extract prefix-named test definitions from a parsed source file.

use crate::source::{SourceTree, indent_width, is_blank, is_comment};
use std::collections::HashMap;
use std::ops::Range;

/// Default naming convention for test definitions.
pub const DEFAULT_PREFIX: &str = "test_";

/// One extracted function or method definition.
///
/// A non-owning view into the [`SourceTree`] it was extracted from: valid only
/// while that tree's revision is unchanged.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Simple name (`test_x`), without any class qualification.
    pub name: String,
    /// Enclosing class names, outermost first. Empty for module-level defs.
    pub scope: Vec<String>,
    /// Byte span of the definition node, decorators included.
    pub span: Range<usize>,
    /// Byte span handed to the equivalence oracle: the node plus the
    /// contiguous run of whole-line comments directly above it. Never
    /// includes surrounding blank lines.
    pub display_span: Range<usize>,
    /// 1-based line range of `span`.
    pub line_start: usize,
    pub line_end: usize,
    /// Revision of the tree this was extracted from.
    pub revision: u64,
}

impl Definition {
    /// The exact text presented to the equivalence oracle.
    pub fn display_text<'a>(&self, tree: &'a SourceTree) -> &'a str {
        &tree.text()[self.display_span.clone()]
    }
}

/// Definitions indexed by simple name.
///
/// Iteration follows first-insertion traversal order. A name collision within
/// one file (same name in two classes, or an accidental duplicate top-level
/// def) keeps the later definition: last-wins, by design, not an error.
#[derive(Debug, Default)]
pub struct DefinitionSet {
    order: Vec<String>,
    by_name: HashMap<String, Definition>,
}

impl DefinitionSet {
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Names in first-insertion traversal order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    fn insert(&mut self, def: Definition) {
        if !self.by_name.contains_key(&def.name) {
            self.order.push(def.name.clone());
        }
        self.by_name.insert(def.name.clone(), def);
    }
}

/// Collect every definition in `tree` whose simple name starts with `prefix`.
///
/// Walks the module body and nested class bodies to any depth; never descends
/// into function bodies, so helpers defined inside a test are not extracted.
/// Scope paths are recorded but matching is by simple name only.
pub fn extract(tree: &SourceTree, prefix: &str) -> DefinitionSet {
    let mut set = DefinitionSet::default();
    let lines = tree.line_spans();
    let mut scope: Vec<String> = Vec::new();
    visit(tree, tree.root(), prefix, &lines, &mut scope, &mut set);
    tracing::debug!(
        file = tree.label(),
        count = set.len(),
        prefix,
        "extracted test definitions"
    );
    set
}

fn visit(
    tree: &SourceTree,
    node: tree_sitter::Node<'_>,
    prefix: &str,
    lines: &[Range<usize>],
    scope: &mut Vec<String>,
    set: &mut DefinitionSet,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                record(tree, child, child, prefix, lines, scope, set);
            }
            "decorated_definition" => {
                // Decorators belong to the definition's span.
                if let Some(inner) = child.child_by_field_name("definition") {
                    match inner.kind() {
                        "function_definition" => {
                            record(tree, child, inner, prefix, lines, scope, set);
                        }
                        "class_definition" => {
                            visit_class(tree, inner, prefix, lines, scope, set);
                        }
                        _ => {}
                    }
                }
            }
            "class_definition" => {
                visit_class(tree, child, prefix, lines, scope, set);
            }
            _ => {
                // Compound statements at module level (if/try/with blocks) may
                // hold defs; class bodies only hold their own members.
                if scope.is_empty() {
                    visit(tree, child, prefix, lines, scope, set);
                }
            }
        }
    }
}

fn visit_class(
    tree: &SourceTree,
    class_node: tree_sitter::Node<'_>,
    prefix: &str,
    lines: &[Range<usize>],
    scope: &mut Vec<String>,
    set: &mut DefinitionSet,
) {
    let Some(name_node) = class_node.child_by_field_name("name") else {
        return;
    };
    let class_name = tree.text()[name_node.byte_range()].to_string();
    if let Some(body) = class_node.child_by_field_name("body") {
        scope.push(class_name);
        visit(tree, body, prefix, lines, scope, set);
        scope.pop();
    }
}

fn record(
    tree: &SourceTree,
    outer: tree_sitter::Node<'_>,
    func: tree_sitter::Node<'_>,
    prefix: &str,
    lines: &[Range<usize>],
    scope: &[String],
    set: &mut DefinitionSet,
) {
    let Some(name_node) = func.child_by_field_name("name") else {
        return;
    };
    let name = &tree.text()[name_node.byte_range()];
    if !name.starts_with(prefix) {
        return;
    }
    let span = outer.byte_range();
    set.insert(Definition {
        name: name.to_string(),
        scope: scope.to_vec(),
        display_span: display_span(tree, &span, lines),
        line_start: outer.start_position().row + 1,
        line_end: outer.end_position().row + 1,
        span,
        revision: tree.revision(),
    });
}

/// Extend a definition span upward over the contiguous run of whole-line
/// comments directly above it. Stops at the first blank or code line, and at
/// any comment indented deeper than the definition — that one sits inside the
/// previous sibling's body, not above this one.
fn display_span(
    tree: &SourceTree,
    span: &Range<usize>,
    lines: &[Range<usize>],
) -> Range<usize> {
    let text = tree.text();
    let Some(def_line) = line_of(lines, span.start) else {
        return span.clone();
    };
    let def_indent = indent_width(text, &lines[def_line]);
    let mut first = def_line;
    while first > 0 {
        let prev = &lines[first - 1];
        if is_blank(text, prev)
            || !is_comment(text, prev)
            || indent_width(text, prev) > def_indent
        {
            break;
        }
        first -= 1;
    }
    if first == def_line {
        span.clone()
    } else {
        lines[first].start..span.end
    }
}

/// Index of the line containing byte `offset`.
pub(crate) fn line_of(lines: &[Range<usize>], offset: usize) -> Option<usize> {
    lines
        .iter()
        .position(|span| span.start <= offset && offset < span.end)
}
