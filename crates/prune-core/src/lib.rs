//! Format-preserving deduplication of test functions across two Python files.
//!
//! Parses both files with tree-sitter, extracts prefix-named test definitions
//! ([`extract`]), pairs them by simple name ([`matching`]), asks an injected
//! [`oracle::Oracle`] whether each pair is equivalent, and splices the confirmed
//! duplicates out of file1's source ([`remove`]) without touching any other byte.

pub mod engine;
pub mod error;
pub mod extract;
pub mod matching;
pub mod oracle;
pub mod remove;
pub mod source;
