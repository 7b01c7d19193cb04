//! End-to-end deduplication flow.
//!
//! parse both files → extract → match by name → one oracle call per pair, in
//! match order → splice confirmed duplicates out of file1 → serialize. An
//! oracle abort fails the whole run before any removal: all-or-nothing.

use crate::error::PruneError;
use crate::extract::{Definition, extract};
use crate::matching::match_pairs;
use crate::oracle::{Oracle, Verdict};
use crate::remove::remove;
use crate::source::SourceTree;
use serde::Serialize;

/// Result of a completed run. `output` is file1's text with the confirmed
/// duplicates removed; file2 is never modified.
#[derive(Debug, Serialize)]
pub struct DedupOutcome {
    #[serde(skip)]
    pub output: String,
    /// Names confirmed equivalent and removed, in decision order.
    pub removed: Vec<String>,
    /// Names judged distinct and kept, in decision order.
    pub skipped: Vec<String>,
    /// Total matched pairs presented to the oracle.
    pub matched: usize,
    /// Test definitions found in each file.
    pub found_in_file1: usize,
    pub found_in_file2: usize,
}

impl DedupOutcome {
    /// Whether the output differs from the input at all.
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Run the full flow for one file pair.
///
/// `file1`/`file2` are labels for error messages; `text1`/`text2` the full
/// source. Definitions whose names start with `prefix` and appear in both
/// files are presented to `oracle`; those judged equivalent are removed from
/// file1's copy.
pub fn dedup(
    file1: &str,
    text1: &str,
    file2: &str,
    text2: &str,
    prefix: &str,
    oracle: &mut dyn Oracle,
) -> Result<DedupOutcome, PruneError> {
    let tree1 = SourceTree::parse(file1, text1)?;
    let tree2 = SourceTree::parse(file2, text2)?;

    let defs1 = extract(&tree1, prefix);
    let defs2 = extract(&tree2, prefix);
    let pairs = match_pairs(&defs1, &defs2);
    let total = pairs.len();

    let mut removed_names = Vec::new();
    let mut skipped_names = Vec::new();
    let mut to_remove: Vec<Definition> = Vec::new();

    for (decided, pair) in pairs.iter().enumerate() {
        let left_text = pair.left.display_text(&tree1);
        let right_text = pair.right.display_text(&tree2);
        match oracle.judge(&pair.name, left_text, right_text) {
            Verdict::Equivalent => {
                removed_names.push(pair.name.clone());
                to_remove.push(pair.left.clone());
            }
            Verdict::Distinct => skipped_names.push(pair.name.clone()),
            Verdict::Abort => {
                return Err(PruneError::Aborted { decided, total });
            }
        }
    }

    let output = if to_remove.is_empty() {
        tree1.serialize()
    } else {
        remove(&tree1, &to_remove)?.serialize()
    };

    tracing::info!(
        file = file1,
        matched = total,
        removed = removed_names.len(),
        "deduplication complete"
    );

    Ok(DedupOutcome {
        output,
        removed: removed_names,
        skipped: skipped_names,
        matched: total,
        found_in_file1: defs1.len(),
        found_in_file2: defs2.len(),
    })
}
