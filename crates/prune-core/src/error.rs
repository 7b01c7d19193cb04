//! Error taxonomy for the deduplication engine.

/// Errors from parsing, matching, and removal.
///
/// Every variant is fatal for the run: the engine never produces output after
/// any of these, so the caller can always assume the original file is intact.
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    /// The input source does not parse under the Python grammar.
    #[error("syntax error in {file} at line {line}, column {column}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
    },

    /// A definition reference no longer resolves in its tree. This signals an
    /// orchestration bug (a reference used after the tree it came from was
    /// edited), never an expected runtime condition.
    #[error("stale reference to definition '{name}': tree was modified since extraction")]
    StaleReference { name: String },

    /// The equivalence oracle cancelled mid-sequence. No removal was applied.
    #[error("comparison aborted after {decided} of {total} decision(s); file left unchanged")]
    Aborted { decided: usize, total: usize },

    /// The edited source no longer parses. Internal-consistency failure: the
    /// splice produced invalid Python, and nothing was written.
    #[error("internal error: edited source for {file} no longer parses at line {line}, column {column}")]
    Reparse {
        file: String,
        line: usize,
        column: usize,
    },
}
