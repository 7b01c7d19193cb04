//! Pair definitions across two files by simple name.

use crate::extract::{Definition, DefinitionSet};

/// A name present in both files, with the definition from each side.
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub name: String,
    pub left: Definition,
    pub right: Definition,
}

/// Pair up names present in both sets, in `left`'s first-insertion order.
///
/// The order only fixes the sequence pairs are presented to the oracle in;
/// names present on one side produce no pair and are never touched.
pub fn match_pairs(left: &DefinitionSet, right: &DefinitionSet) -> Vec<MatchedPair> {
    let mut pairs = Vec::new();
    for name in left.names() {
        let (Some(l), Some(r)) = (left.get(name), right.get(name)) else {
            continue;
        };
        pairs.push(MatchedPair {
            name: name.to_string(),
            left: l.clone(),
            right: r.clone(),
        });
    }
    tracing::debug!(count = pairs.len(), "matched common test names");
    pairs
}
