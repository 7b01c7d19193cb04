//! Lossless source model: original text plus its tree-sitter parse.
//!
//! The text is the single source of truth. Serialization returns the owned
//! bytes unchanged, and structural edits are byte-span splices that produce a
//! new `SourceTree` with a bumped revision, so round-trip fidelity holds by
//! construction for any unedited tree.

use crate::error::PruneError;
use std::ops::Range;

/// A parsed source file that can be re-serialized byte-for-byte.
#[derive(Debug)]
pub struct SourceTree {
    label: String,
    text: String,
    tree: tree_sitter::Tree,
    revision: u64,
}

impl SourceTree {
    /// Parse Python source into a tree. `label` is the file name used in
    /// error messages; the text itself is owned by the tree.
    pub fn parse(
        label: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, PruneError> {
        Self::parse_revision(label.into(), text.into(), 0)
    }

    pub(crate) fn parse_revision(
        label: String,
        text: String,
        revision: u64,
    ) -> Result<Self, PruneError> {
        let lang: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&lang)
            .map_err(|_| PruneError::Parse {
                file: label.clone(),
                line: 0,
                column: 0,
            })?;
        let tree = parser
            .parse(text.as_bytes(), None)
            .ok_or_else(|| PruneError::Parse {
                file: label.clone(),
                line: 0,
                column: 0,
            })?;

        if tree.root_node().has_error() {
            let (line, column) =
                first_error_position(tree.root_node()).unwrap_or((0, 0));
            return Err(PruneError::Parse {
                file: label,
                line,
                column,
            });
        }

        Ok(Self {
            label,
            text,
            tree,
            revision,
        })
    }

    /// The file label this tree was parsed from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the tree back to source. Byte-identical to the parsed input.
    pub fn serialize(&self) -> String {
        self.text.clone()
    }

    /// Edit generation. Bumped by every structural edit; references extracted
    /// from an older revision are stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Byte span of each line, terminator included.
    pub(crate) fn line_spans(&self) -> Vec<Range<usize>> {
        line_spans(&self.text)
    }
}

/// Split `text` into per-line byte spans, each including its `\n` (and `\r`)
/// terminator. A trailing fragment without a newline is its own line.
pub(crate) fn line_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\n' {
            spans.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < bytes.len() {
        spans.push(start..bytes.len());
    }
    spans
}

/// Whether a line span contains only whitespace.
pub(crate) fn is_blank(text: &str, span: &Range<usize>) -> bool {
    text[span.clone()].trim().is_empty()
}

/// Whether a line span is a whole-line `#` comment.
pub(crate) fn is_comment(text: &str, span: &Range<usize>) -> bool {
    text[span.clone()].trim_start().starts_with('#')
}

/// Leading whitespace width of a line span, in characters.
pub(crate) fn indent_width(text: &str, span: &Range<usize>) -> usize {
    text[span.clone()]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count()
}

fn first_error_position(node: tree_sitter::Node<'_>) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !child.has_error() && !child.is_missing() {
            continue;
        }
        if let Some(found) = first_error_position(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spans_trailing_fragment() {
        let spans = line_spans("a\nb");
        assert_eq!(spans, vec![0..2, 2..3]);
    }

    #[test]
    fn test_line_spans_empty() {
        assert!(line_spans("").is_empty());
    }

    #[test]
    fn test_parse_reports_error_location() {
        let err = SourceTree::parse("bad.py", "def broken(:\n").unwrap_err();
        match err {
            PruneError::Parse { file, line, .. } => {
                assert_eq!(file, "bad.py");
                assert_eq!(line, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
